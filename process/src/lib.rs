//! # Contact Processing
//!
//! One-off conversion of the contact spreadsheet into the static
//! directory the server ships.
//!
//! ## Flow
//! 1. Read the first worksheet, header row `FullName, Phone, Email,
//!    Company, Position, Avatar`
//! 2. Map every data row to a directory contact: 1-based id, slug derived
//!    from the name, placeholder avatar when the cell is empty
//! 3. Rows whose name yields no slug fall back to `contact-<id>` so every
//!    entry stays addressable
//! 4. Write the whole batch as pretty-printed JSON
//!
//! Column order in the sheet does not matter, only the header names do.
use calamine::{open_workbook, Data, Reader, Xlsx};
use indicatif::{ProgressBar, ProgressStyle};

use card::{
    contact::{DirectoryContact, PLACEHOLDER_AVATAR},
    slug::slugify,
};

#[derive(Debug, Default, Clone)]
pub struct ContactRow {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub avatar: String,
}

pub fn convert(input: &str, output: &str) {
    let rows = read_rows(input);
    println!("Loaded rows: {}", rows.len());

    let contacts = map_contacts(&rows);
    write_directory(output, &contacts);

    println!("Wrote {} contacts to {}", contacts.len(), output);
}

fn read_rows(input: &str) -> Vec<ContactRow> {
    let mut workbook: Xlsx<_> = open_workbook(input).expect("Failed to open spreadsheet");

    let range = workbook
        .worksheet_range_at(0)
        .expect("Spreadsheet has no worksheets")
        .expect("Failed to read worksheet");

    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => return Vec::new(),
    };

    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };

    let full_name = column("FullName");
    let phone = column("Phone");
    let email = column("Email");
    let company = column("Company");
    let position = column("Position");
    let avatar = column("Avatar");

    let pick = |row: &[Data], index: Option<usize>| {
        index
            .and_then(|i| row.get(i))
            .map(cell_text)
            .unwrap_or_default()
    };

    rows.map(|row| ContactRow {
        full_name: pick(row, full_name),
        phone: pick(row, phone),
        email: pick(row, email),
        company: pick(row, company),
        position: pick(row, position),
        avatar: pick(row, avatar),
    })
    .collect()
}

pub fn map_contacts(rows: &[ContactRow]) -> Vec<DirectoryContact> {
    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let contacts = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            pb.inc(1);
            map_contact(row, index)
        })
        .collect();

    pb.finish_with_message("Done");

    contacts
}

pub fn map_contact(row: &ContactRow, index: usize) -> DirectoryContact {
    let full_name = row.full_name.trim().to_string();

    let mut slug = slugify(&full_name);
    if slug.is_empty() {
        slug = format!("contact-{}", index + 1);

        #[cfg(feature = "verbose")]
        println!("Row {} has no usable name, slug: {}", index + 1, slug);
    }

    let avatar = row.avatar.trim();

    DirectoryContact {
        id: (index + 1) as u32,
        slug,
        full_name,
        phone: row.phone.trim().to_string(),
        email: row.email.trim().to_string(),
        company: row.company.trim().to_string(),
        position: row.position.trim().to_string(),
        avatar: if avatar.is_empty() {
            PLACEHOLDER_AVATAR.to_string()
        } else {
            avatar.to_string()
        },
    }
}

fn write_directory(output: &str, contacts: &[DirectoryContact]) {
    let json = serde_json::to_string_pretty(contacts).expect("Failed to encode directory");

    std::fs::write(output, json).expect("Failed to write directory");
}

/// Spreadsheet cells come back typed, phone numbers usually as floats.
/// Everything is flattened to the string it reads as.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_contact() {
        let row = ContactRow {
            full_name: " Nguyễn Văn A ".to_string(),
            phone: "0901234567".to_string(),
            email: "a@acme.vn".to_string(),
            company: "ACME".to_string(),
            position: "Dev".to_string(),
            avatar: "https://cdn.example.com/a.png".to_string(),
        };

        let contact = map_contact(&row, 0);

        assert_eq!(contact.id, 1);
        assert_eq!(contact.slug, "nguyen-van-a");
        assert_eq!(contact.full_name, "Nguyễn Văn A");
        assert_eq!(contact.avatar, "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_slug_fallback() {
        let row = ContactRow::default();

        let contact = map_contact(&row, 4);

        assert_eq!(contact.id, 5);
        assert_eq!(contact.slug, "contact-5");
        assert!(contact.full_name.is_empty());
    }

    #[test]
    fn test_avatar_placeholder() {
        let row = ContactRow {
            full_name: "Trần Thị B".to_string(),
            ..Default::default()
        };

        let contact = map_contact(&row, 1);

        assert_eq!(contact.slug, "tran-thi-b");
        assert_eq!(contact.avatar, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("abc".to_string())), "abc");
        assert_eq!(cell_text(&Data::Float(901234567.0)), "901234567");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }
}
