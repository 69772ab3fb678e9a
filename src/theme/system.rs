// Ambient dark/light preference of the host terminal

use std::fmt;
use std::str::FromStr;

/// Terminal hint of the form `fg;bg` (rxvt, konsole, some tmux setups)
const COLORFGBG: &str = "COLORFGBG";

/// Where the initial theme comes from when nothing is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemPreference {
    /// Ask the terminal via `COLORFGBG`; light when it says nothing
    #[default]
    Auto,
    Dark,
    Light,
}

impl SystemPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Resolve against the current environment. Read once at startup.
    pub fn prefers_dark(&self) -> bool {
        self.resolve(std::env::var(COLORFGBG).ok().as_deref())
    }

    /// Resolve against an explicit `COLORFGBG` value
    pub fn resolve(&self, colorfgbg: Option<&str>) -> bool {
        match self {
            Self::Dark => true,
            Self::Light => false,
            Self::Auto => colorfgbg.and_then(colorfgbg_is_dark).unwrap_or(false),
        }
    }
}

impl FromStr for SystemPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!(
                "unknown system_theme '{}' (expected auto, dark or light)",
                other
            )),
        }
    }
}

impl fmt::Display for SystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpret a `COLORFGBG` value; the background is the last field.
///
/// ANSI indices 0-6 and 8 are dark backgrounds, everything else is light.
/// Returns `None` when the value carries no usable index.
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_preferences_ignore_terminal() {
        assert!(SystemPreference::Dark.resolve(Some("0;15")));
        assert!(!SystemPreference::Light.resolve(Some("15;0")));
    }

    #[test]
    fn auto_reads_background_index() {
        let auto = SystemPreference::Auto;
        assert!(auto.resolve(Some("15;0")));
        assert!(auto.resolve(Some("7;default;8")));
        assert!(!auto.resolve(Some("0;15")));
        assert!(!auto.resolve(Some("0;7")));
    }

    #[test]
    fn auto_without_signal_is_light() {
        let auto = SystemPreference::Auto;
        assert!(!auto.resolve(None));
        assert!(!auto.resolve(Some("")));
        assert!(!auto.resolve(Some("default;default")));
    }

    #[test]
    fn parses_config_values() {
        assert_eq!("Dark".parse::<SystemPreference>(), Ok(SystemPreference::Dark));
        assert_eq!(
            " light ".parse::<SystemPreference>(),
            Ok(SystemPreference::Light)
        );
        assert_eq!("auto".parse::<SystemPreference>(), Ok(SystemPreference::Auto));
        assert!("sepia".parse::<SystemPreference>().is_err());
    }
}
