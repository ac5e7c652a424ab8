//! # Meilisearch
//!
//! Search engine answering contact name queries by proxy.
//!
//!
//!
//! ## Schema
//! - One index for all contacts, static and registered alike
//! - Fields: slug (**string**, primary key), name (**string**), role (**string**), avatar (**string**)
//! - Only the name is searchable, the rest ride along for display
//!
//!
//!
//! ## Seeding
//! - The static directory is upserted once at startup
//! - Each successful registration adds its contact afterwards
//! - Indexing failures never fail a registration, they are logged and the
//!   profile stays reachable by slug
//!
//!
//!
//! ## Proxy
//! The frontend never talks to Meilisearch directly. Queries go through
//! our backend, which keeps the engine key private and the response shape
//! under our control.
use std::sync::Arc;

use card::contact::{ContactRecord, DirectoryContact};
use meilisearch_sdk::{
    client::Client,
    settings::{MinWordSizeForTypos, Settings, TypoToleranceSettings},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const CONTACT_INDEX: &str = "contacts";
pub const CONTACT_SLUG: &str = "slug";
pub const CONTACT_NAME: &str = "name";

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchContact {
    pub slug: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

impl From<&ContactRecord> for SearchContact {
    fn from(record: &ContactRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            name: record.name.clone(),
            role: record.role.clone(),
            avatar: record.avatar_or_placeholder().to_string(),
        }
    }
}

impl From<&DirectoryContact> for SearchContact {
    fn from(contact: &DirectoryContact) -> Self {
        Self {
            slug: contact.slug.clone(),
            name: contact.full_name.clone(),
            role: contact.position.clone(),
            avatar: contact.avatar.clone(),
        }
    }
}

pub async fn init_meilisearch(
    meili_url: &str,
    meili_admin_key: &str,
    directory: &[DirectoryContact],
) -> Arc<Client> {
    let meili_client = Arc::new(Client::new(meili_url, Some(meili_admin_key)).unwrap());

    meili_client
        .index(CONTACT_INDEX)
        .set_settings(&init_settings())
        .await
        .unwrap();

    let seed: Vec<SearchContact> = directory.iter().map(Into::into).collect();
    upsert_contacts(meili_client.clone(), &seed).await.unwrap();

    meili_client
}

pub async fn upsert_contacts(
    meili_client: Arc<Client>,
    contacts: &[SearchContact],
) -> Result<(), AppError> {
    if contacts.is_empty() {
        return Ok(());
    }

    let _result = meili_client
        .index(CONTACT_INDEX)
        .add_or_update(contacts, Some(CONTACT_SLUG))
        .await?
        .wait_for_completion(&meili_client, None, None)
        .await?;

    #[cfg(feature = "verbose")]
    println!("Meili task result: {:?}", _result);

    Ok(())
}

fn init_settings() -> Settings {
    Settings::new()
        .with_ranking_rules([
            "words",
            "typo",
            "proximity",
            "exactness",
            "attribute",
            "sort",
        ])
        .with_searchable_attributes([CONTACT_NAME])
        .with_typo_tolerance(TypoToleranceSettings {
            enabled: Some(true),
            disable_on_attributes: None,
            disable_on_words: None,
            min_word_size_for_typos: Some(MinWordSizeForTypos {
                one_typo: Some(5),
                two_typos: Some(9),
            }),
        })
}
