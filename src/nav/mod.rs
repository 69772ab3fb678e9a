//! Navigation outline - section groups and their expansion state
//!
//! The outline itself is static. [`NavTree`] owns the only mutable parts:
//! which groups are expanded and where the keyboard cursor sits. Selecting an
//! entry doesn't change any tree state; it produces a [`NavEvent`] for the
//! shell to act on.

use serde::Serialize;
use std::collections::HashSet;

/// A selectable leaf of the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub title: &'static str,
}

/// A collapsible group of entries; the title doubles as its expansion key
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavigationGroup {
    pub title: &'static str,
    #[serde(skip)]
    pub icon: &'static str,
    pub entries: &'static [NavEntry],
}

pub static NAVIGATION: &[NavigationGroup] = &[
    NavigationGroup {
        title: "Getting Started",
        icon: "📖",
        entries: &[
            NavEntry {
                id: "introduction",
                title: "Introduction",
            },
            NavEntry {
                id: "quickstart",
                title: "Quick Start",
            },
            NavEntry {
                id: "authentication",
                title: "Authentication",
            },
            NavEntry {
                id: "errors",
                title: "Error Handling",
            },
        ],
    },
    NavigationGroup {
        title: "API Reference",
        icon: "⚡",
        entries: &[
            NavEntry {
                id: "users",
                title: "Users",
            },
            NavEntry {
                id: "posts",
                title: "Posts",
            },
            NavEntry {
                id: "comments",
                title: "Comments",
            },
            NavEntry {
                id: "media",
                title: "Media",
            },
        ],
    },
    NavigationGroup {
        title: "Authentication",
        icon: "🛡",
        entries: &[
            NavEntry {
                id: "oauth",
                title: "OAuth 2.0",
            },
            NavEntry {
                id: "jwt",
                title: "JWT Tokens",
            },
            NavEntry {
                id: "api-keys",
                title: "API Keys",
            },
        ],
    },
    NavigationGroup {
        title: "Data Models",
        icon: "🗄",
        entries: &[
            NavEntry {
                id: "user-model",
                title: "User Model",
            },
            NavEntry {
                id: "post-model",
                title: "Post Model",
            },
            NavEntry {
                id: "comment-model",
                title: "Comment Model",
            },
        ],
    },
];

/// Groups expanded when a session starts
pub const DEFAULT_EXPANDED: [&str; 2] = ["Getting Started", "API Reference"];

/// Notifications emitted by the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The user picked an entry; the shell makes it the active section
    SectionSelected(String),
}

/// A visible line of the outline, as indices into the group table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRow {
    Group(usize),
    Entry { group: usize, entry: usize },
}

/// Expansion state and cursor over a static outline
#[derive(Debug, Clone)]
pub struct NavTree {
    groups: &'static [NavigationGroup],
    expanded: HashSet<String>,
    cursor: usize,
}

impl NavTree {
    /// Built-in outline with the default groups expanded
    pub fn new() -> Self {
        Self::with_expanded(NAVIGATION, DEFAULT_EXPANDED)
    }

    pub fn with_expanded<I, S>(groups: &'static [NavigationGroup], expanded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups,
            expanded: expanded.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.contains(title)
    }

    /// Flip the expansion of `title`. Any string is a legal key.
    pub fn toggle_group(&mut self, title: &str) {
        let current_row = self.cursor_row();

        if !self.expanded.remove(title) {
            self.expanded.insert(title.to_string());
        }

        // Keep the cursor on the same logical row; a hidden entry falls back to its group
        let rows = self.visible_rows();
        self.cursor = match current_row {
            Some(row) => rows
                .iter()
                .position(|r| *r == row)
                .or_else(|| match row {
                    NavRow::Entry { group, .. } => {
                        rows.iter().position(|r| *r == NavRow::Group(group))
                    }
                    NavRow::Group(_) => None,
                })
                .unwrap_or(0),
            None => 0,
        };
    }

    /// Notify that `id` was picked
    pub fn select_entry(&self, id: &str) -> NavEvent {
        tracing::debug!(section = id, "Navigation entry selected");
        NavEvent::SectionSelected(id.to_string())
    }

    /// Rows currently shown: every group header, plus entries of expanded groups
    pub fn visible_rows(&self) -> Vec<NavRow> {
        let mut rows = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            rows.push(NavRow::Group(g));
            if self.is_expanded(group.title) {
                for e in 0..group.entries.len() {
                    rows.push(NavRow::Entry { group: g, entry: e });
                }
            }
        }
        rows
    }

    pub fn group(&self, index: usize) -> Option<&'static NavigationGroup> {
        self.groups.get(index)
    }

    pub fn entry(&self, group: usize, entry: usize) -> Option<&'static NavEntry> {
        self.groups.get(group).and_then(|g| g.entries.get(entry))
    }

    // ─────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<NavRow> {
        self.visible_rows().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.visible_rows().len().saturating_sub(1);
    }

    /// Enter on the cursor row: toggles a group, selects an entry
    pub fn activate_cursor(&mut self) -> Option<NavEvent> {
        match self.cursor_row()? {
            NavRow::Group(g) => {
                let title = self.groups[g].title;
                self.toggle_group(title);
                None
            }
            NavRow::Entry { group, entry } => {
                let id = self.groups[group].entries[entry].id;
                Some(self.select_entry(id))
            }
        }
    }

    /// Move the cursor onto the row for `id`, or its group header when collapsed
    ///
    /// Never changes expansion state.
    pub fn focus_entry(&mut self, id: &str) {
        let rows = self.visible_rows();
        let target = rows.iter().position(|row| match *row {
            NavRow::Entry { group, entry } => self.groups[group].entries[entry].id == id,
            NavRow::Group(_) => false,
        });
        let target = target.or_else(|| {
            let g = self
                .groups
                .iter()
                .position(|group| group.entries.iter().any(|e| e.id == id))?;
            rows.iter().position(|row| *row == NavRow::Group(g))
        });
        if let Some(index) = target {
            self.cursor = index;
        }
    }

    /// Case-insensitive match on entry titles and ids, in outline order
    pub fn search(&self, query: &str) -> Vec<&'static NavEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle) || entry.id.contains(&needle)
            })
            .collect()
    }
}

impl Default for NavTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_expansion() {
        let tree = NavTree::new();
        assert!(tree.is_expanded("Getting Started"));
        assert!(tree.is_expanded("API Reference"));
        assert!(!tree.is_expanded("Authentication"));
        assert!(!tree.is_expanded("Data Models"));
        // 4 headers + 4 + 4 entries
        assert_eq!(tree.visible_rows().len(), 12);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut tree = NavTree::new();
        for title in ["Getting Started", "Data Models", "not a group", ""] {
            let before = tree.is_expanded(title);
            tree.toggle_group(title);
            assert_ne!(tree.is_expanded(title), before);
            tree.toggle_group(title);
            assert_eq!(tree.is_expanded(title), before);
        }
    }

    #[test]
    fn unknown_title_does_not_change_shape() {
        let mut tree = NavTree::new();
        let rows = tree.visible_rows();
        tree.toggle_group("Nonexistent");
        assert!(tree.is_expanded("Nonexistent"));
        assert_eq!(tree.visible_rows(), rows);
    }

    #[test]
    fn select_entry_emits_event_without_state_change() {
        let tree = NavTree::new();
        let rows = tree.visible_rows();
        assert_eq!(
            tree.select_entry("users"),
            NavEvent::SectionSelected("users".to_string())
        );
        assert_eq!(tree.visible_rows(), rows);
    }

    #[test]
    fn activate_group_row_toggles() {
        let mut tree = NavTree::new();
        assert_eq!(tree.cursor_row(), Some(NavRow::Group(0)));
        assert_eq!(tree.activate_cursor(), None);
        assert!(!tree.is_expanded("Getting Started"));
        assert_eq!(tree.cursor_row(), Some(NavRow::Group(0)));
    }

    #[test]
    fn activate_entry_row_selects() {
        let mut tree = NavTree::new();
        tree.cursor_down();
        tree.cursor_down();
        assert_eq!(
            tree.activate_cursor(),
            Some(NavEvent::SectionSelected("quickstart".to_string()))
        );
    }

    #[test]
    fn collapsing_moves_cursor_to_group_header() {
        let mut tree = NavTree::new();
        // Cursor onto "Comments" (API Reference, third entry)
        tree.focus_entry("comments");
        assert_eq!(tree.cursor_row(), Some(NavRow::Entry { group: 1, entry: 2 }));

        tree.toggle_group("API Reference");
        assert_eq!(tree.cursor_row(), Some(NavRow::Group(1)));
    }

    #[test]
    fn collapsing_above_keeps_cursor_on_same_row() {
        let mut tree = NavTree::new();
        tree.focus_entry("media");
        tree.toggle_group("Getting Started");
        assert_eq!(tree.cursor_row(), Some(NavRow::Entry { group: 1, entry: 3 }));
    }

    #[test]
    fn cursor_is_clamped() {
        let mut tree = NavTree::new();
        tree.cursor_up();
        assert_eq!(tree.cursor(), 0);
        tree.cursor_to_bottom();
        let last = tree.cursor();
        tree.cursor_down();
        assert_eq!(tree.cursor(), last);
        assert_eq!(tree.cursor_row(), Some(NavRow::Group(3)));
    }

    #[test]
    fn focus_entry_in_collapsed_group_targets_header() {
        let mut tree = NavTree::new();
        tree.focus_entry("jwt");
        assert_eq!(tree.cursor_row(), Some(NavRow::Group(2)));
        assert!(!tree.is_expanded("Authentication"));
    }

    #[test]
    fn search_matches_titles_and_ids() {
        let tree = NavTree::new();
        let ids: Vec<_> = tree.search("model").iter().map(|e| e.id).collect();
        assert_eq!(ids, ["user-model", "post-model", "comment-model"]);

        let ids: Vec<_> = tree.search("JWT").iter().map(|e| e.id).collect();
        assert_eq!(ids, ["jwt"]);

        let ids: Vec<_> = tree.search("api-keys").iter().map(|e| e.id).collect();
        assert_eq!(ids, ["api-keys"]);

        assert!(tree.search("   ").is_empty());
        assert!(tree.search("zzz").is_empty());
    }
}
