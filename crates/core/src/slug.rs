//! URL-safe keys derived from display names

/// Derives a slug from a display name
///
/// Lowercases the name, keeps ASCII letters, Cyrillic letters, digits,
/// whitespace and hyphens, turns whitespace runs into single hyphens and
/// strips leading/trailing hyphens. The result is deterministic but not
/// unique: two names can map to the same slug.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        } else if is_slug_char(ch) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        }
    }

    slug
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ('а'..='я').contains(&ch) || ch == 'ё'
}
