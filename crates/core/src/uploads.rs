//! Rules for which uploaded files are accepted as photos.

/// Extensions accepted for photo uploads (compared lowercase).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Default cap on a single upload request body (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Lowercase text after the last `.`, if the name has one.
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Whether `name` carries one of the [`ALLOWED_EXTENSIONS`].
pub fn is_allowed_file(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type to send when a stored photo is downloaded.
pub fn content_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions_case_insensitively() {
        assert!(is_allowed_file("a.png"));
        assert!(is_allowed_file("a.JPG"));
        assert!(is_allowed_file("holiday.photo.Jpeg"));
        assert!(is_allowed_file("x.webp"));
        assert!(is_allowed_file("x.gif"));
    }

    #[test]
    fn rejects_other_files() {
        assert!(!is_allowed_file("notes.txt"));
        assert!(!is_allowed_file("png"));
        assert!(!is_allowed_file("archive.png.zip"));
        assert!(!is_allowed_file(""));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }
}
