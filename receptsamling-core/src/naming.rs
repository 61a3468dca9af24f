//! Blob naming.
//!
//! Uploaded images are stored under `<namespace>/<random_hex>_<sanitized>`,
//! where the random component makes concurrent uploads with identical
//! filenames collision-free and the sanitized original filename keeps the
//! name recognizable to a human browsing the store.

use uuid::Uuid;

/// Fallback used when sanitizing leaves nothing of the original filename.
const FALLBACK_FILENAME: &str = "upload";

/// Reduce a client-supplied filename to a safe single path component.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Path separators are stripped first so a name like `../../etc/passwd`
/// cannot escape the namespace.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = safe.trim_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed
    }
}

/// Build a collision-resistant blob name for an uploaded file.
pub fn build_blob_name(namespace: &str, filename: &str) -> String {
    let unique = Uuid::new_v4().simple();
    format!("{}/{}_{}", namespace, unique, sanitize_filename(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("cake.png"), "cake.png");
        assert_eq!(sanitize_filename("my-photo_2.jpeg"), "my-photo_2.jpeg");
    }

    #[test]
    fn test_sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_filename("C:\\Users\\me\\pie.jpg"), "pie.jpg");
    }

    #[test]
    fn test_sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn test_blob_names_are_unique_per_upload() {
        let a = build_blob_name("recipes", "cake.png");
        let b = build_blob_name("recipes", "cake.png");
        assert_ne!(a, b);
        assert!(a.starts_with("recipes/"));
        assert!(a.ends_with("_cake.png"));
    }
}
