use crate::contact::{ContactRecord, DirectoryContact};

/// Organization line used for profiles registered through the form.
pub const ORG_NAME: &str = "VCard Vietnam";

/// The fields that end up in a generated `.vcf` payload.
///
/// Rendering is deterministic, the same card always produces the same
/// bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct VCard {
    pub full_name: String,
    pub org: String,
    pub title: String,
    pub phone: String,
    pub email: String,
}

impl VCard {
    /// Renders the fixed-schema vCard 3.0 text block.
    pub fn render(&self) -> String {
        format!(
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             FN:{}\n\
             ORG:{}\n\
             TITLE:{}\n\
             TEL;TYPE=CELL:{}\n\
             EMAIL:{}\n\
             END:VCARD",
            escape(&self.full_name),
            escape(&self.org),
            escape(&self.title),
            escape(&self.phone),
            escape(&self.email),
        )
    }
}

impl From<&ContactRecord> for VCard {
    fn from(record: &ContactRecord) -> Self {
        Self {
            full_name: record.name.clone(),
            org: ORG_NAME.to_string(),
            title: record.role.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
        }
    }
}

impl From<&DirectoryContact> for VCard {
    fn from(contact: &DirectoryContact) -> Self {
        Self {
            full_name: contact.full_name.clone(),
            org: contact.company.clone(),
            title: contact.position.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}

/// Escapes the characters the vCard text-value grammar reserves.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContactRecord {
        ContactRecord {
            id: 1,
            slug: "a-b".to_string(),
            name: "A B".to_string(),
            role: "Dev".to_string(),
            phone: "123".to_string(),
            email: "a@b.com".to_string(),
            about: String::new(),
            social: String::new(),
            social_text: String::new(),
            zalo: String::new(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_literal_lines() {
        let text = VCard::from(&sample()).render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
        assert_eq!(lines.last(), Some(&"END:VCARD"));
        assert!(lines.contains(&"VERSION:3.0"));
        assert!(lines.contains(&"FN:A B"));
        assert!(lines.contains(&"TITLE:Dev"));
        assert!(lines.contains(&"TEL;TYPE=CELL:123"));
        assert!(lines.contains(&"EMAIL:a@b.com"));
    }

    #[test]
    fn test_deterministic() {
        let record = sample();
        assert_eq!(VCard::from(&record).render(), VCard::from(&record).render());
    }

    #[test]
    fn test_record_org_is_fixed() {
        let text = VCard::from(&sample()).render();
        assert!(text.contains(&format!("ORG:{ORG_NAME}")));
    }

    #[test]
    fn test_directory_org_is_company() {
        let contact = DirectoryContact {
            id: 1,
            slug: "tran-thi-b".to_string(),
            full_name: "Trần Thị B".to_string(),
            phone: "0901".to_string(),
            email: "b@acme.vn".to_string(),
            company: "ACME".to_string(),
            position: "Sales".to_string(),
            avatar: String::new(),
        };

        let text = VCard::from(&contact).render();
        assert!(text.contains("ORG:ACME"));
        assert!(text.contains("TITLE:Sales"));
        assert!(text.contains("FN:Trần Thị B"));
    }

    #[test]
    fn test_empty_fields_keep_their_lines() {
        let mut record = sample();
        record.role = String::new();
        record.email = String::new();

        let text = VCard::from(&record).render();
        assert!(text.contains("TITLE:\n"));
        assert!(text.contains("EMAIL:"));
    }

    #[test]
    fn test_escaping() {
        let mut record = sample();
        record.name = "Dev; Ops, Inc\\".to_string();
        record.role = "line\nbreak".to_string();

        let text = VCard::from(&record).render();
        assert!(text.contains("FN:Dev\\; Ops\\, Inc\\\\"));
        assert!(text.contains("TITLE:line\\nbreak"));
    }
}
