//! # Card
//!
//! Shared contact structures used across the workspace.
//!
//! Holds the contact records themselves plus the two pure pieces every
//! consumer needs: slug derivation and vCard text generation. The server
//! serves these records, the converter produces them.

pub mod contact;
pub mod slug;
pub mod vcard;
