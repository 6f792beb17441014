//! Filename rules for stored photos and downloadable archives.
//!
//! Client-supplied filenames are never trusted: they are reduced with
//! [`secure_filename`] before being embedded in a stored name.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::uploads::{extension_of, is_allowed_file};

/// Characters allowed to survive in a secured filename.
static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid regex"));

/// Archive name used when nothing printable is left of the owner and trip.
const FALLBACK_ARCHIVE_STEM: &str = "album";

/// Username segment used when a username has no filename-safe characters.
const FALLBACK_USER_SEGMENT: &str = "user";

/// Reduce an untrusted filename to a flat, ASCII-only name.
///
/// Non-ASCII characters are dropped, path separators become whitespace,
/// whitespace runs collapse to `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing `.` and `_` are stripped. The result can be
/// empty, callers must handle that.
///
/// ```
/// use friendtrip_core::naming::secure_filename;
///
/// assert_eq!(secure_filename("My cat.jpg"), "My_cat.jpg");
/// assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
/// ```
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS_RE.replace_all(&joined, "");
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Secure an uploaded photo's name while keeping its image extension.
///
/// Callers check [`is_allowed_file`] on `original` first. If securing the
/// name strips its extension (e.g. a name made only of non-ASCII characters),
/// `photo.{ext}` is used instead.
pub fn secure_upload_name(original: &str) -> String {
    let secured = secure_filename(original);
    if is_allowed_file(&secured) {
        return secured;
    }
    match extension_of(original) {
        Some(ext) => format!("photo.{ext}"),
        None => "photo".to_string(),
    }
}

/// Build the on-disk name for an uploaded photo.
///
/// Convention: `{TRIPCODE}_{username}_{YYYYMMDDHHMMSS}_{secure_name}`. The
/// username segment is passed through [`secure_filename`] as well.
pub fn stored_photo_filename(
    trip_code: &str,
    username: &str,
    at: DateTime<Utc>,
    secure_name: &str,
) -> String {
    let user = secure_filename(username);
    let user = if user.is_empty() {
        FALLBACK_USER_SEGMENT
    } else {
        user.as_str()
    };
    format!(
        "{trip_code}_{user}_{}_{secure_name}",
        at.format("%Y%m%d%H%M%S")
    )
}

/// Insert `_{n}` before the extension of `name`.
///
/// ```
/// use friendtrip_core::naming::with_suffix;
///
/// assert_eq!(with_suffix("beach.jpg", 2), "beach_2.jpg");
/// assert_eq!(with_suffix("README", 3), "README_3");
/// ```
pub fn with_suffix(name: &str, n: u32) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{n}.{ext}"),
        _ => format!("{name}_{n}"),
    }
}

/// Download name for a whole album: `{owner}_{trip}.zip`.
pub fn album_archive_name(owner: &str, trip_name: &str) -> String {
    let stem = secure_filename(&format!("{owner}_{trip_name}"));
    if stem.is_empty() {
        format!("{FALLBACK_ARCHIVE_STEM}.zip")
    } else {
        format!("{stem}.zip")
    }
}

/// Download name for an ad-hoc selection: `selected_photos_{YYYYMMDD}.zip`.
pub fn selection_archive_name(at: DateTime<Utc>) -> String {
    format!("selected_photos_{}.zip", at.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn secure_filename_keeps_plain_names() {
        assert_eq!(secure_filename("IMG_0001.JPG"), "IMG_0001.JPG");
        assert_eq!(secure_filename("sunset-2024.png"), "sunset-2024.png");
    }

    #[test]
    fn secure_filename_flattens_paths() {
        assert_eq!(secure_filename("/var/www/photo.png"), "var_www_photo.png");
        assert_eq!(secure_filename("..\\..\\boot.ini"), "boot.ini");
    }

    #[test]
    fn secure_filename_drops_non_ascii_and_symbols() {
        assert_eq!(secure_filename("café résumé.jpg"), "caf_rsum.jpg");
        assert_eq!(secure_filename("a<b>c|d?.gif"), "abcd.gif");
    }

    #[test]
    fn secure_filename_can_be_empty() {
        assert_eq!(secure_filename("..."), "");
        assert_eq!(secure_filename("日本"), "");
    }

    #[test]
    fn upload_names_keep_their_extension() {
        assert_eq!(secure_upload_name("Beach Day.JPG"), "Beach_Day.JPG");
        assert_eq!(secure_upload_name("日本.jpg"), "photo.jpg");
        assert_eq!(secure_upload_name("../.png"), "photo.png");
    }

    #[test]
    fn stored_filename_embeds_trip_user_and_time() {
        let at = Utc.with_ymd_and_hms(2024, 7, 3, 9, 5, 1).unwrap();
        assert_eq!(
            stored_photo_filename("AB12CD", "maya", at, "beach.jpg"),
            "AB12CD_maya_20240703090501_beach.jpg"
        );
        assert_eq!(
            stored_photo_filename("AB12CD", "zoë / k", at, "x.png"),
            "AB12CD_zo_k_20240703090501_x.png"
        );
        assert_eq!(
            stored_photo_filename("AB12CD", "日本", at, "x.png"),
            "AB12CD_user_20240703090501_x.png"
        );
    }

    #[test]
    fn album_archive_name_is_header_safe() {
        assert_eq!(album_archive_name("maya", "Goa 2024"), "maya_Goa_2024.zip");
        assert_eq!(album_archive_name("maya", "\"x\""), "maya_x.zip");
        assert_eq!(album_archive_name("", "…"), "album.zip");
    }

    #[test]
    fn selection_archive_name_uses_date() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(selection_archive_name(at), "selected_photos_20241231.zip");
    }

    #[test]
    fn suffix_on_dotfile_like_names() {
        assert_eq!(with_suffix(".hidden", 1), ".hidden_1");
        assert_eq!(with_suffix("a.tar.gz", 4), "a.tar_4.gz");
    }
}
