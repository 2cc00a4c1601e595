//! Identifier casing and pluralization shared by the mapper and the template helpers.
//!
//! The route rules downstream templates depend on are implemented here:
//!
//! - [`to_kebab_case`] inserts a hyphen at every lowercase→uppercase letter boundary and then
//!   lowercases the whole string (`CalendarEvent` → `calendar-event`).
//! - [`pluralize`] is a deliberately small heuristic. Irregular nouns come out wrong
//!   (`Person` → `persons`, `Child` → `childs`); the linter points these out instead of
//!   patching them with a dictionary.

/// Convert a declaration name to hyphenated lowercase.
///
/// Only lowercase→uppercase letter boundaries produce a hyphen, so acronym runs stay joined:
/// `HTTPServer` → `httpserver`, `OAuth2Token` → `oauth2token`.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }
    out
}

/// Pluralize an English word with a minimal suffix heuristic.
///
/// - `s`, `x`, `z`, `ch`, `sh` → append `es`
/// - consonant followed by `y` → replace `y` with `ies`
/// - anything else → append `s`
///
/// The casing of the input is preserved; suffix checks are case-insensitive.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }
    if lower.ends_with('y') {
        let before = lower.chars().rev().nth(1);
        if let Some(c) = before {
            if !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') {
                let stem = &word[..word.len() - 1];
                return format!("{stem}ies");
            }
        }
    }
    format!("{word}s")
}

/// Route segment for a resource: `plural(kebab(name))`.
pub fn resource_path_segment(name: &str) -> String {
    pluralize(&to_kebab_case(name))
}

/// Split an identifier into lowercase words on `_`, `-`, whitespace and case boundaries.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false);
            // `HTTPServer` splits as `HTTP` + `Server`
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `calendar_event` / `calendar-event` / `calendarEvent` → `CalendarEvent`
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// `CalendarEvent` → `calendarEvent`
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, w) in words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

/// `CalendarEvent` → `calendar_event`
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_boundaries() {
        assert_eq!(to_kebab_case("CalendarEvent"), "calendar-event");
        assert_eq!(to_kebab_case("Resource"), "resource");
        assert_eq!(to_kebab_case("HTTPServer"), "httpserver");
        assert_eq!(to_kebab_case("OAuth2Token"), "oauth2token");
        assert_eq!(to_kebab_case("userProfileImage"), "user-profile-image");
    }

    #[test]
    fn test_pluralize_sibilant_endings() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("quiz"), "quizes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("dish"), "dishes");
    }

    #[test]
    fn test_pluralize_consonant_y() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn test_pluralize_default_and_irregular() {
        assert_eq!(pluralize("resource"), "resources");
        assert_eq!(pluralize("person"), "persons");
        assert_eq!(pluralize("y"), "ys");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_resource_path_segment() {
        assert_eq!(resource_path_segment("CalendarEvent"), "calendar-events");
        assert_eq!(resource_path_segment("Box"), "boxes");
        assert_eq!(resource_path_segment("Category"), "categories");
        assert_eq!(resource_path_segment("Resource"), "resources");
        assert_eq!(resource_path_segment("SearchIndex"), "search-indexes");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("calendar_event"), "CalendarEvent");
        assert_eq!(to_pascal_case("calendar-event"), "CalendarEvent");
        assert_eq!(to_camel_case("CalendarEvent"), "calendarEvent");
        assert_eq!(to_snake_case("CalendarEvent"), "calendar_event");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_camel_case(""), "");
    }
}
