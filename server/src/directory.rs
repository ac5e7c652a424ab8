//! The static contact directory.
//!
//! `contacts.json` is generated offline by the `process` crate and loaded
//! once at startup. A missing or unparsable file leaves the directory
//! empty instead of keeping the live side of the service down.
use std::fs;

use card::contact::DirectoryContact;
use tracing::{info, warn};

pub fn load_directory(path: &str) -> Vec<DirectoryContact> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to read directory {path}: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<DirectoryContact>>(&raw) {
        Ok(contacts) => {
            info!("Loaded {} directory contacts from {path}", contacts.len());
            contacts
        }
        Err(e) => {
            warn!("Failed to parse directory {path}: {e}");
            Vec::new()
        }
    }
}

pub fn find_by_slug<'a>(
    contacts: &'a [DirectoryContact],
    slug: &str,
) -> Option<&'a DirectoryContact> {
    contacts.iter().find(|contact| contact.slug == slug)
}
