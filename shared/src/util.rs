/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a random resource id (UUID v4, hyphenated)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

const SLUG_SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Turn free text into a URL slug.
///
/// Lowercases, drops anything that is not an ASCII word character, whitespace
/// or dash, turns each run of whitespace/underscore/dash into a single `-`,
/// and trims dashes from both ends. `"  Jane Doe_Card! "` → `"jane-doe-card"`.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        }
    }
    out
}

/// Normalize a slug typed directly by the user.
///
/// Lowercases, replaces every character outside `[a-z0-9-]` with `-` and
/// collapses repeated dashes. Leading/trailing dashes are kept so the input
/// box does not fight the cursor; [`is_valid_slug`] rejects them on save.
pub fn sanitize_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

/// `^[a-z0-9]+(?:-[a-z0-9]+)*$`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

/// Slugify `base` and append a random 6-char base36 suffix
pub fn generate_unique_slug(base: &str) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SLUG_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    let slug = slugify(base);
    if slug.is_empty() {
        suffix
    } else {
        format!("{slug}-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Jane Doe"), "jane-doe");
        assert_eq!(slugify("  Jane Doe_Card! "), "jane-doe-card");
        assert_eq!(slugify("--Hello   World--"), "hello-world");
        assert_eq!(slugify("Café Owner"), "caf-owner");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_sanitize_slug() {
        assert_eq!(sanitize_slug("Jane Doe"), "jane-doe");
        assert_eq!(sanitize_slug("a__b..c"), "a-b-c");
        assert_eq!(sanitize_slug("My Card!"), "my-card-");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("jane"));
        assert!(is_valid_slug("jane-doe-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-jane"));
        assert!(!is_valid_slug("jane-"));
        assert!(!is_valid_slug("jane--doe"));
        assert!(!is_valid_slug("Jane"));
        assert!(!is_valid_slug("jane_doe"));
    }

    #[test]
    fn test_generate_unique_slug() {
        let slug = generate_unique_slug("Jane Doe");
        assert!(slug.starts_with("jane-doe-"));
        assert_eq!(slug.len(), "jane-doe-".len() + SLUG_SUFFIX_LEN);
        assert!(is_valid_slug(&slug));

        let bare = generate_unique_slug("!!!");
        assert_eq!(bare.len(), SLUG_SUFFIX_LEN);
        assert!(is_valid_slug(&bare));
    }

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        assert_ne!(id, new_id());
    }
}
