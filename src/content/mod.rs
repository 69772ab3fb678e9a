//! Content registry - built-in documentation sections
//!
//! Every documentation panel is a static [`ContentDescriptor`]: an id, a
//! display title, and a markdown body. Fenced code blocks inside the body are
//! the copyable code samples; their fence info string carries the language
//! and an optional title:
//!
//! ````text
//! ```json title="Response"
//! { "ok": true }
//! ```
//! ````
//!
//! Lookups never fail. An id with no registered section resolves to the
//! default (introductory) section.

mod sections;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Section shown at startup and for any unknown id
pub const DEFAULT_SECTION: &str = "introduction";

/// Language assumed for code samples whose fence has no info string
const DEFAULT_LANGUAGE: &str = "text";

/// One documentation panel
#[derive(Debug, Clone, Serialize)]
pub struct ContentDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// Markdown source rendered in the content pane
    pub body: &'static str,
}

/// A copyable code sample extracted from a descriptor body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSample {
    pub language: String,
    pub title: Option<String>,
    pub code: String,
}

impl ContentDescriptor {
    /// Fenced code blocks of the body, in document order
    pub fn code_samples(&self) -> Vec<CodeSample> {
        let mut samples = Vec::new();
        let mut current: Option<CodeSample> = None;

        for event in Parser::new(self.body) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let (language, title) = match kind {
                        CodeBlockKind::Fenced(info) => parse_fence_info(&info),
                        CodeBlockKind::Indented => (DEFAULT_LANGUAGE.to_string(), None),
                    };
                    current = Some(CodeSample {
                        language,
                        title,
                        code: String::new(),
                    });
                }
                Event::Text(text) => {
                    if let Some(sample) = current.as_mut() {
                        sample.code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(mut sample) = current.take() {
                        // Fenced blocks always end with a newline; the copy payload shouldn't
                        if sample.code.ends_with('\n') {
                            sample.code.pop();
                        }
                        samples.push(sample);
                    }
                }
                _ => {}
            }
        }

        samples
    }
}

/// Split a fence info string like `json title="Response"` into language and title
pub fn parse_fence_info(info: &str) -> (String, Option<String>) {
    let info = info.trim();
    let language = info
        .split_whitespace()
        .next()
        .filter(|lang| !lang.starts_with("title="))
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string();

    let title = info.find("title=\"").and_then(|start| {
        let rest = &info[start + "title=\"".len()..];
        rest.find('"').map(|end| rest[..end].to_string())
    });

    (language, title.filter(|t| !t.is_empty()))
}

/// Static mapping from section id to descriptor
pub struct ContentRegistry {
    sections: HashMap<&'static str, &'static ContentDescriptor>,
    order: Vec<&'static ContentDescriptor>,
    default: &'static ContentDescriptor,
}

static BUILTIN: LazyLock<ContentRegistry> =
    LazyLock::new(|| ContentRegistry::new(&sections::INTRODUCTION, sections::ALL));

impl ContentRegistry {
    /// Build a registry; `default` is returned for every unknown id
    pub fn new(
        default: &'static ContentDescriptor,
        sections: &[&'static ContentDescriptor],
    ) -> Self {
        let mut map = HashMap::with_capacity(sections.len() + 1);
        let mut order = Vec::with_capacity(sections.len() + 1);
        for descriptor in std::iter::once(&default).chain(sections.iter()) {
            if let Entry::Vacant(slot) = map.entry(descriptor.id) {
                slot.insert(*descriptor);
                order.push(*descriptor);
            }
        }

        Self {
            sections: map,
            order,
            default,
        }
    }

    /// The documentation compiled into the binary
    pub fn builtin() -> &'static ContentRegistry {
        &BUILTIN
    }

    /// Descriptor for `id`, or the default section when `id` is unknown
    pub fn lookup(&self, id: &str) -> &'static ContentDescriptor {
        self.get(id).unwrap_or(self.default)
    }

    /// Descriptor for `id` without fallback
    pub fn get(&self, id: &str) -> Option<&'static ContentDescriptor> {
        self.sections.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn default_id(&self) -> &'static str {
        self.default.id
    }

    /// All registered sections, default first
    pub fn iter(&self) -> impl Iterator<Item = &'static ContentDescriptor> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_introduction() {
        let registry = ContentRegistry::builtin();
        for id in ["", "posts", "does-not-exist", "USERS", "introduction "] {
            assert_eq!(registry.lookup(id).id, DEFAULT_SECTION, "id {:?}", id);
        }
        assert!(registry.get("posts").is_none());
    }

    #[test]
    fn known_ids_resolve_to_their_section() {
        let registry = ContentRegistry::builtin();
        assert_eq!(registry.lookup("users").title, "Users API");
        assert_eq!(registry.lookup("errors").title, "Error Handling");
        assert_eq!(registry.default_id(), "introduction");
        assert_eq!(registry.iter().count(), 5);
    }

    #[test]
    fn every_navigation_leaf_renders_something() {
        let registry = ContentRegistry::builtin();
        for group in crate::nav::NAVIGATION {
            for entry in group.entries {
                let descriptor = registry.lookup(entry.id);
                if registry.contains(entry.id) {
                    assert_eq!(descriptor.id, entry.id);
                } else {
                    assert_eq!(descriptor.id, DEFAULT_SECTION);
                }
            }
        }
    }

    #[test]
    fn fence_info_parsing() {
        assert_eq!(
            parse_fence_info(r#"json title="Response""#),
            ("json".to_string(), Some("Response".to_string()))
        );
        assert_eq!(parse_fence_info("bash"), ("bash".to_string(), None));
        assert_eq!(parse_fence_info(""), ("text".to_string(), None));
        assert_eq!(
            parse_fence_info(r#"title="Base URL""#),
            ("text".to_string(), Some("Base URL".to_string()))
        );
        assert_eq!(
            parse_fence_info(r#"text title="""#),
            ("text".to_string(), None)
        );
    }

    #[test]
    fn code_samples_extracted_in_order() {
        let samples = ContentRegistry::builtin()
            .lookup("quickstart")
            .code_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].language, "bash");
        assert_eq!(samples[0].title.as_deref(), Some("cURL Example"));
        assert!(samples[0].code.starts_with("curl -X GET"));
        assert!(!samples[0].code.ends_with('\n'));
        assert_eq!(samples[1].language, "json");
        assert_eq!(samples[1].title.as_deref(), Some("Response"));
    }

    #[test]
    fn untitled_samples_have_no_title() {
        let samples = ContentRegistry::builtin().lookup("users").code_samples();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.title.is_none()));
    }

    #[test]
    fn duplicate_ids_keep_first_registration() {
        static A: ContentDescriptor = ContentDescriptor {
            id: "a",
            title: "First",
            body: "",
        };
        static A2: ContentDescriptor = ContentDescriptor {
            id: "a",
            title: "Second",
            body: "",
        };
        let registry = ContentRegistry::new(&A, &[&A2]);
        assert_eq!(registry.lookup("a").title, "First");
        assert_eq!(registry.get("a").map(|d| d.title), Some("First"));
        assert_eq!(registry.lookup("missing").title, "First");
        assert_eq!(registry.iter().count(), 1);
    }
}
