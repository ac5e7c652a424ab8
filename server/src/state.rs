use std::sync::Arc;

use card::contact::DirectoryContact;
use meilisearch_sdk::client::Client;
use redis::aio::ConnectionManager;

use super::{
    config::Config, database::init_redis, directory::load_directory, search::init_meilisearch,
};

pub struct AppState {
    pub config: Config,
    pub redis_connection: ConnectionManager,
    pub meili_client: Arc<Client>,
    pub directory: Vec<DirectoryContact>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let directory = load_directory(&config.directory_path);

        let redis_connection = init_redis(&config.redis_url).await;
        let meili_client =
            init_meilisearch(&config.meili_url, &config.meili_key, &directory).await;

        Arc::new(Self {
            config,
            redis_connection,
            meili_client,
            directory,
        })
    }
}
