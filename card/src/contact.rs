use serde::{Deserialize, Serialize};

/// Shown whenever a contact never uploaded an avatar.
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150";

/// A live profile stored by the server.
///
/// Optional fields are empty strings rather than `Option`s since the
/// registration form submits every field, filled in or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub social: String,
    #[serde(default, rename = "socialText")]
    pub social_text: String,
    #[serde(default)]
    pub zalo: String,
    #[serde(default)]
    pub avatar: String,
}

impl ContactRecord {
    pub fn avatar_or_placeholder(&self) -> &str {
        if self.avatar.is_empty() {
            PLACEHOLDER_AVATAR
        } else {
            &self.avatar
        }
    }
}

/// One entry of the pre-generated contact directory.
///
/// The converter writes these out as a JSON array, the server loads the
/// array once at startup. Field names match the generated file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryContact {
    pub id: u32,
    pub slug: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_placeholder() {
        let mut record = ContactRecord {
            id: 1,
            slug: "a".to_string(),
            name: "A".to_string(),
            role: String::new(),
            phone: String::new(),
            email: String::new(),
            about: String::new(),
            social: String::new(),
            social_text: String::new(),
            zalo: String::new(),
            avatar: String::new(),
        };
        assert_eq!(record.avatar_or_placeholder(), PLACEHOLDER_AVATAR);

        record.avatar = "https://cdn.example.com/a.png".to_string();
        assert_eq!(record.avatar_or_placeholder(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_minimal_record_decodes() {
        let record: ContactRecord =
            serde_json::from_str(r#"{"slug":"an-binh","name":"An Binh"}"#).unwrap();

        assert_eq!(record.id, 0);
        assert_eq!(record.slug, "an-binh");
        assert_eq!(record.name, "An Binh");
        assert!(record.role.is_empty());
        assert!(record.avatar.is_empty());
    }

    #[test]
    fn test_directory_contact_decodes() {
        let contact: DirectoryContact = serde_json::from_str(
            r#"{"id":3,"slug":"tran-thi-b","full_name":"Trần Thị B","company":"ACME"}"#,
        )
        .unwrap();

        assert_eq!(contact.id, 3);
        assert_eq!(contact.slug, "tran-thi-b");
        assert_eq!(contact.company, "ACME");
        assert!(contact.position.is_empty());
    }
}
