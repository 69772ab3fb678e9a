// Theme system for the TUI
//
// Two palettes, dark and light. ThemeState owns the dark flag and the
// resolved palette; every render function reads colours from it, so
// "applying" a mode is just swapping the palette.
//
// Initial mode priority:
// 1. Persisted preference (preferences.toml, key `theme`)
// 2. System preference (config `system_theme`, COLORFGBG for `auto`)

mod store;
mod system;

#[cfg(test)]
pub use store::MemoryPreferenceStore;
pub use store::{FilePreferenceStore, PreferenceStore, THEME_KEY};
pub use system::SystemPreference;

use ratatui::style::Color;
use ratatui::widgets::BorderType;
use std::str::FromStr;

/// The two visual modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

/// Complete resolved palette ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Chrome ───────────────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color, // Focused border, active nav entry
    pub status_bar: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Document Colors ─────────────────────────────────────
    pub heading: Color,
    pub link: Color,
    pub info: Color,
    pub warning: Color,
    pub success: Color,
    pub error: Color,

    // ─── Code Highlighting Colors ────────────────────────────
    pub code_inline: Color,
    pub code_block: Color,
    pub json_key: Color,
    pub json_number: Color,
    pub json_keyword: Color,

    // ─── Border Style ────────────────────────────────────────
    pub border_type: BorderType,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// One Half Dark
    pub fn dark() -> Self {
        Self {
            name: "Dark",

            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(127, 132, 142),

            title: Color::Rgb(86, 182, 194),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(229, 192, 123),
            status_bar: Color::Rgb(171, 178, 191),

            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),

            heading: Color::Rgb(97, 175, 239),
            link: Color::Rgb(97, 175, 239),
            info: Color::Rgb(86, 182, 194),
            warning: Color::Rgb(229, 192, 123),
            success: Color::Rgb(152, 195, 121),
            error: Color::Rgb(224, 108, 117),

            code_inline: Color::Rgb(86, 182, 194),
            code_block: Color::Rgb(220, 223, 228),
            json_key: Color::Rgb(224, 108, 117),
            json_number: Color::Rgb(209, 154, 102),
            json_keyword: Color::Rgb(198, 120, 221),

            border_type: BorderType::Rounded,
        }
    }

    /// One Half Light
    pub fn light() -> Self {
        Self {
            name: "Light",

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            muted: Color::Rgb(160, 161, 167),

            title: Color::Rgb(1, 132, 188),
            border: Color::Rgb(200, 200, 200),
            highlight: Color::Rgb(193, 132, 1),
            status_bar: Color::Rgb(80, 161, 79),

            selection: Color::Rgb(229, 229, 230),
            selection_fg: Color::Rgb(56, 58, 66),

            heading: Color::Rgb(64, 120, 242),
            link: Color::Rgb(64, 120, 242),
            info: Color::Rgb(1, 132, 188),
            warning: Color::Rgb(193, 132, 1),
            success: Color::Rgb(80, 161, 79),
            error: Color::Rgb(228, 86, 73),

            code_inline: Color::Rgb(1, 132, 188),
            code_block: Color::Rgb(56, 58, 66),
            json_key: Color::Rgb(228, 86, 73),
            json_number: Color::Rgb(152, 104, 1),
            json_keyword: Color::Rgb(166, 38, 164),

            border_type: BorderType::Rounded,
        }
    }

    /// Border color for a panel based on focus state
    pub fn panel_border(&self, focused: bool) -> Color {
        if focused {
            self.highlight
        } else {
            self.border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Process-wide dark/light flag plus the palette it selects
pub struct ThemeState {
    dark: bool,
    palette: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemeState {
    /// Light, not yet initialized
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self {
            dark: false,
            palette: Theme::light(),
            store,
        }
    }

    /// Pick the mode from the persisted value, falling back to the system
    /// preference, and apply it. Returns the resulting dark flag.
    pub fn initialize(&mut self, system_prefers_dark: bool) -> bool {
        let persisted = match self.store.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse::<ThemeMode>() {
                Ok(mode) => Some(mode),
                Err(()) => {
                    tracing::debug!(value = %value, "Ignoring unrecognised theme preference");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    "Theme preference unavailable, using system preference: {}",
                    e
                );
                None
            }
        };

        let mode = persisted.unwrap_or(ThemeMode::from_dark(system_prefers_dark));
        self.apply(mode);
        tracing::debug!(
            mode = mode.as_str(),
            persisted = persisted.is_some(),
            "Theme initialized"
        );
        self.dark
    }

    /// Flip the mode, persist it and re-apply. Returns the new dark flag.
    ///
    /// A store that can't be written leaves the change in memory only.
    pub fn toggle(&mut self) -> bool {
        let mode = ThemeMode::from_dark(!self.dark);
        self.apply(mode);
        if let Err(e) = self.store.set(THEME_KEY, mode.as_str()) {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }
        self.dark
    }

    #[cfg(test)]
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark)
    }

    /// Palette for the current mode
    pub fn palette(&self) -> &Theme {
        &self.palette
    }

    fn apply(&mut self, mode: ThemeMode) {
        self.dark = mode == ThemeMode::Dark;
        self.palette = Theme::for_mode(mode);
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("dark", &self.dark)
            .field("palette", &self.palette.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(store: &MemoryPreferenceStore) -> ThemeState {
        ThemeState::new(Box::new(store.clone()))
    }

    #[test]
    fn system_dark_without_persisted_value() {
        let store = MemoryPreferenceStore::new();
        let mut state = state_with(&store);
        assert!(state.initialize(true));
        assert!(state.is_dark());
        assert_eq!(state.palette().name, "Dark");
        // Initializing never writes
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn persisted_value_beats_system() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let mut state = state_with(&store);
        assert!(!state.initialize(true));
        assert_eq!(state.palette().name, "Light");
    }

    #[test]
    fn toggle_round_trips_through_store() {
        let store = MemoryPreferenceStore::new();
        let mut state = state_with(&store);
        assert!(!state.initialize(false));

        assert!(state.toggle());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let mut next = state_with(&store);
        assert!(next.initialize(false));

        assert!(!next.toggle());
        let mut third = state_with(&store);
        assert!(!third.initialize(true));
    }

    #[test]
    fn unavailable_store_degrades_to_memory() {
        let mut state = ThemeState::new(Box::new(MemoryPreferenceStore::unavailable()));
        assert!(state.initialize(true));
        assert!(!state.toggle());
        assert_eq!(state.palette().name, "Light");
        assert!(state.toggle());
    }

    #[test]
    fn unavailable_store_is_reported() {
        let mut state = ThemeState::new(Box::new(MemoryPreferenceStore::unavailable()));
        let logs = crate::logging::capture(|| {
            state.initialize(false);
        });
        let warning = logs.latest_warning().unwrap();
        assert!(warning.message.starts_with("Theme preference unavailable"));

        let logs = crate::logging::capture(|| {
            state.toggle();
        });
        let warning = logs.latest_warning().unwrap();
        assert!(warning.message.starts_with("Failed to persist theme preference"));
    }

    #[test]
    fn unrecognised_value_is_absent() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        let mut state = state_with(&store);
        assert!(state.initialize(true));
    }

    #[test]
    fn file_store_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = ThemeState::new(Box::new(FilePreferenceStore::in_dir(dir.path())));
        state.initialize(false);
        state.toggle();

        let mut next = ThemeState::new(Box::new(FilePreferenceStore::in_dir(dir.path())));
        assert!(next.initialize(false));
    }
}
