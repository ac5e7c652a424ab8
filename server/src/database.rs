//! # Redis
//!
//! The record store.
//!
//! One hash holds every live profile, slug to JSON value. Slugs double as
//! the uniqueness constraint: writes go through `HSETNX`, so a taken slug
//! can never be overwritten and lookups resolve to at most one record.
//!
//! ## Keys
//!
//! - `contacts` hash: slug (**string**) to profile (**JSON string**)
//! - `contacts:next_id` counter: atomic `INCR` source for record ids
use std::time::Duration;

use card::contact::ContactRecord;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};

use crate::error::AppError;

pub const CONTACT_HASH: &str = "contacts";
pub const CONTACT_ID_COUNTER: &str = "contacts:next_id";

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();
    let connection_manager = client
        .get_connection_manager_with_config(config)
        .await
        .unwrap();

    connection_manager
}

pub async fn fetch_contact(
    connection: &mut ConnectionManager,
    slug: &str,
) -> Result<Option<ContactRecord>, AppError> {
    let raw: Option<String> = connection.hget(CONTACT_HASH, slug).await?;

    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Reserves the slug and stores the record in one atomic step.
///
/// Returns `false` when the slug is already taken, leaving the existing
/// record untouched.
pub async fn insert_contact(
    connection: &mut ConnectionManager,
    record: &ContactRecord,
) -> Result<bool, AppError> {
    let json = serde_json::to_string(record)?;
    let created: bool = connection.hset_nx(CONTACT_HASH, &record.slug, json).await?;

    Ok(created)
}

pub async fn next_contact_id(connection: &mut ConnectionManager) -> Result<u64, AppError> {
    let id: u64 = connection.incr(CONTACT_ID_COUNTER, 1).await?;

    Ok(id)
}
