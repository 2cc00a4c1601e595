//! Name-convention classification for declarations without role tags.

use super::model::{ComponentTags, Role};

/// Add every declaration whose name follows a role's naming convention to that role.
///
/// `names` are visited in the order given, so appended entries keep declaration order. Names
/// already in a role list are not added twice, which makes the pass idempotent:
/// `classify_by_name(classify_by_name(t, n), n) == classify_by_name(t, n)`.
pub fn classify_by_name<'a>(
    mut tags: ComponentTags,
    names: impl IntoIterator<Item = &'a str>,
) -> ComponentTags {
    for name in names {
        for role in Role::ALL {
            if role.matches_name(name) {
                tags.insert(role, name);
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 6] = [
        "TextResource",
        "CallTool",
        "GetPromptRequest",
        "SystemPrompt",
        "ServerCapabilities",
        "ClientCapability",
    ];

    #[test]
    fn test_suffix_conventions() {
        let tags = classify_by_name(ComponentTags::default(), NAMES);
        assert_eq!(tags.resources, vec!["TextResource"]);
        assert_eq!(tags.tools, vec!["CallTool"]);
        // "Prompt" must be the suffix, not just a substring
        assert_eq!(tags.prompts, vec!["SystemPrompt"]);
        assert_eq!(tags.capabilities, vec!["ServerCapabilities", "ClientCapability"]);
    }

    #[test]
    fn test_existing_tags_are_kept_first_and_not_duplicated() {
        let mut tags = ComponentTags::default();
        tags.insert(Role::Resource, "CalendarEvent");
        tags.insert(Role::Resource, "TextResource");
        let tags = classify_by_name(tags, NAMES);
        assert_eq!(tags.resources, vec!["CalendarEvent", "TextResource"]);
    }

    #[test]
    fn test_idempotent() {
        let once = classify_by_name(ComponentTags::default(), NAMES);
        let twice = classify_by_name(once.clone(), NAMES);
        assert_eq!(once, twice);
    }
}
