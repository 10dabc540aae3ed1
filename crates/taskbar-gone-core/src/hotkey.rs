use std::fmt;

use serde::{Deserialize, Serialize};

/// The single hotkey slot used by the main window.
///
/// Registering again in the same slot replaces the previous combination,
/// so the platform layer always releases the old one first.
pub const HOTKEY_ID: i32 = 0;

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
    Win,
}

impl Modifier {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alt" => Some(Self::Alt),
            "ctrl" | "control" => Some(Self::Ctrl),
            "shift" => Some(Self::Shift),
            "win" | "super" => Some(Self::Win),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Alt => "Alt",
            Self::Ctrl => "Ctrl",
            Self::Shift => "Shift",
            Self::Win => "Win",
        }
    }
}

/// Named keys accepted besides letters, digits and function keys.
const NAMED_KEYS: &[&str] = &[
    "SPACE", "ENTER", "TAB", "INSERT", "DELETE", "HOME", "END", "PAGEUP", "PAGEDOWN", "LEFT", "UP",
    "RIGHT", "DOWN",
];

/// A global key combination, written as `"Ctrl+Shift+9"` in the settings.
///
/// Modifiers are kept sorted and deduplicated so two spellings of the same
/// combination compare equal. The key is stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub modifiers: Vec<Modifier>,
    pub key: String,
}

impl Hotkey {
    /// Ctrl+Shift+9, the default combination.
    pub fn ctrl_shift_9() -> Self {
        Self {
            modifiers: vec![Modifier::Ctrl, Modifier::Shift],
            key: "9".into(),
        }
    }

    /// Alt+Shift+S, the alternative preset.
    pub fn alt_shift_s() -> Self {
        Self {
            modifiers: vec![Modifier::Alt, Modifier::Shift],
            key: "S".into(),
        }
    }

    /// Parses a `+`-separated combination such as `"alt+shift+s"`.
    ///
    /// The last segment is the key; every other segment must be a
    /// modifier, and at least one modifier is required so a bare key
    /// cannot be stolen system-wide.
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, mods)) = parts.split_last() else {
            return Err("empty hotkey".into());
        };

        let mut modifiers = Vec::with_capacity(mods.len());
        for part in mods {
            let m = Modifier::parse(part).ok_or_else(|| format!("unknown modifier {part:?}"))?;
            modifiers.push(m);
        }
        modifiers.sort();
        modifiers.dedup();
        if modifiers.is_empty() {
            return Err(format!("hotkey {s:?} needs at least one modifier"));
        }

        let key = key.to_ascii_uppercase();
        if !is_supported_key(&key) {
            return Err(format!("unsupported key {key:?}"));
        }

        Ok(Self { modifiers, key })
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self::ctrl_shift_9()
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m.as_str())?;
        }
        f.write_str(&self.key)
    }
}

impl TryFrom<String> for Hotkey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Hotkey> for String {
    fn from(hotkey: Hotkey) -> Self {
        hotkey.to_string()
    }
}

/// Returns whether `key` (already upper-cased) names a key the platform
/// layer can map to a virtual key code.
pub fn is_supported_key(key: &str) -> bool {
    if key.len() == 1 {
        return key.as_bytes()[0].is_ascii_alphanumeric();
    }
    if let Some(n) = key.strip_prefix('F')
        && let Ok(n) = n.parse::<u32>()
    {
        return (1..=24).contains(&n);
    }
    NAMED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ctrl_shift_9() {
        // Act
        let hotkey = Hotkey::default();

        // Assert
        assert_eq!(hotkey.to_string(), "Ctrl+Shift+9");
    }

    #[test]
    fn parse_is_case_insensitive_and_normalises_order() {
        // Act
        let hotkey = Hotkey::parse("shift + ALT + s").unwrap();

        // Assert
        assert_eq!(hotkey, Hotkey::alt_shift_s());
        assert_eq!(hotkey.to_string(), "Alt+Shift+S");
    }

    #[test]
    fn parse_deduplicates_modifiers() {
        let hotkey = Hotkey::parse("Ctrl+Control+Shift+9").unwrap();

        assert_eq!(hotkey, Hotkey::ctrl_shift_9());
    }

    #[test]
    fn parse_accepts_function_and_named_keys() {
        assert_eq!(Hotkey::parse("Win+F12").unwrap().key, "F12");
        assert_eq!(Hotkey::parse("Ctrl+F24").unwrap().key, "F24");
        assert_eq!(Hotkey::parse("Alt+PageDown").unwrap().key, "PAGEDOWN");
    }

    #[test]
    fn parse_rejects_bare_keys() {
        // Act
        let result = Hotkey::parse("9");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_unknown_parts() {
        assert!(Hotkey::parse("Hyper+S").is_err());
        assert!(Hotkey::parse("Ctrl+F25").is_err());
        assert!(Hotkey::parse("Ctrl+Banana").is_err());
        assert!(Hotkey::parse("Ctrl+").is_err());
        assert!(Hotkey::parse("").is_err());
    }

    #[test]
    fn display_parses_back_to_the_same_hotkey() {
        // Arrange
        let hotkey = Hotkey::parse("win+alt+home").unwrap();

        // Act
        let reparsed = Hotkey::parse(&hotkey.to_string()).unwrap();

        // Assert
        assert_eq!(reparsed, hotkey);
    }
}
