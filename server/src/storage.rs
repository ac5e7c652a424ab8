//! # Media store
//!
//! Local-disk object storage for avatars and shared vCards.
//!
//! Objects are flat files in one directory, each addressable by a public
//! URL under `/media`. Names carry the owning slug plus a millisecond
//! timestamp so re-uploads never collide.
use std::path::Path;

use chrono::Utc;
use tokio::fs;

/// Builds the object name for a new upload: `<slug>-<millis>[.<ext>]`.
pub fn object_name(slug: &str, extension: &str) -> String {
    let stamp = Utc::now().timestamp_millis();

    if extension.is_empty() {
        format!("{slug}-{stamp}")
    } else {
        format!("{slug}-{stamp}.{extension}")
    }
}

/// Extension of an uploaded file name, empty when it has none.
pub fn extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}

/// Object names are single path segments. Anything that could walk the
/// filesystem is refused.
pub fn is_valid_object(object: &str) -> bool {
    !object.is_empty() && !object.contains(['/', '\\']) && !object.contains("..")
}

pub fn public_url(base_url: &str, object: &str) -> String {
    format!("{}/media/{object}", base_url.trim_end_matches('/'))
}

pub fn content_type(object: &str) -> &'static str {
    match extension(object).to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "vcf" => "text/vcard",
        _ => "application/octet-stream",
    }
}

pub async fn save(media_dir: &str, object: &str, bytes: &[u8]) -> std::io::Result<()> {
    fs::create_dir_all(media_dir).await?;
    fs::write(Path::new(media_dir).join(object), bytes).await
}

pub async fn read(media_dir: &str, object: &str) -> std::io::Result<Vec<u8>> {
    fs::read(Path::new(media_dir).join(object)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_shape() {
        let name = object_name("nguyen-van-a", "png");

        let rest = name.strip_prefix("nguyen-van-a-").unwrap();
        let stamp = rest.strip_suffix(".png").unwrap();
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn test_object_name_without_extension() {
        let name = object_name("nguyen-van-a", "");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("photo.png"), "png");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("noext"), "");
    }

    #[test]
    fn test_object_validation() {
        assert!(is_valid_object("a-123.png"));
        assert!(!is_valid_object(""));
        assert!(!is_valid_object("../secrets"));
        assert!(!is_valid_object("a/b.png"));
        assert!(!is_valid_object("a\\b.png"));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("http://localhost:1111/", "a.png"),
            "http://localhost:1111/media/a.png"
        );
        assert_eq!(
            public_url("https://cards.example.com", "a.vcf"),
            "https://cards.example.com/media/a.vcf"
        );
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a.PNG"), "image/png");
        assert_eq!(content_type("a.jpeg"), "image/jpeg");
        assert_eq!(content_type("a.vcf"), "text/vcard");
        assert_eq!(content_type("a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let media_dir = dir.path().to_str().unwrap();

        save(media_dir, "a-1.vcf", b"BEGIN:VCARD").await.unwrap();
        let bytes = read(media_dir, "a-1.vcf").await.unwrap();

        assert_eq!(bytes, b"BEGIN:VCARD");
    }
}
