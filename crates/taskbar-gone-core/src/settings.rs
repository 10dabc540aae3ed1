//! The settings sidecar file.
//!
//! Settings live in `TaskbarGone-SettingsData.txt` next to the executable.
//! The file is TOML with PascalCase keys, written wholesale on every save.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Hotkey;
use crate::log::LogConfig;

/// Product name used for the settings file, the log directory and the
/// autostart registry value.
pub const PRODUCT_NAME: &str = "TaskbarGone";

/// User preferences persisted between runs.
///
/// Missing keys fall back to defaults thanks to `#[serde(default)]`, so an
/// older or hand-edited file still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SettingsData {
    pub always_on_top: bool,
    pub start_on_login: bool,
    pub start_minimized: bool,
    pub hide_in_tray: bool,
    pub enable_hotkeys: bool,
    /// Combination bound while `enable_hotkeys` is on.
    pub hotkey: Hotkey,
    pub logging: LogConfig,
}

/// A checkable entry of the Options menu, backed by one settings flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    AlwaysOnTop,
    StartOnLogin,
    StartMinimized,
    HideInTray,
    EnableHotkeys,
}

impl OptionItem {
    /// Menu order.
    pub const ALL: [OptionItem; 5] = [
        Self::AlwaysOnTop,
        Self::StartOnLogin,
        Self::StartMinimized,
        Self::HideInTray,
        Self::EnableHotkeys,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AlwaysOnTop => "&Always on top",
            Self::StartOnLogin => "Start on &login",
            Self::StartMinimized => "Start &minimized",
            Self::HideInTray => "&Hide in tray",
            Self::EnableHotkeys => "Enable hot&keys",
        }
    }
}

impl SettingsData {
    /// Returns the flag behind a menu item.
    pub fn option(&self, item: OptionItem) -> bool {
        match item {
            OptionItem::AlwaysOnTop => self.always_on_top,
            OptionItem::StartOnLogin => self.start_on_login,
            OptionItem::StartMinimized => self.start_minimized,
            OptionItem::HideInTray => self.hide_in_tray,
            OptionItem::EnableHotkeys => self.enable_hotkeys,
        }
    }

    /// Flips the flag behind a menu item and returns its new value.
    pub fn toggle_option(&mut self, item: OptionItem) -> bool {
        let flag = match item {
            OptionItem::AlwaysOnTop => &mut self.always_on_top,
            OptionItem::StartOnLogin => &mut self.start_on_login,
            OptionItem::StartMinimized => &mut self.start_minimized,
            OptionItem::HideInTray => &mut self.hide_in_tray,
            OptionItem::EnableHotkeys => &mut self.enable_hotkeys,
        };
        *flag = !*flag;
        *flag
    }
}

/// Returns the settings file name: `TaskbarGone-SettingsData.txt`.
pub fn settings_file_name() -> String {
    format!("{PRODUCT_NAME}-SettingsData.txt")
}

/// Returns the settings path beside the running executable.
pub fn settings_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|dir| dir.join(settings_file_name()))
}

/// Reads and parses the settings file.
pub fn load(path: &Path) -> Result<SettingsData, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Writes the settings file, replacing whatever was there.
pub fn save(path: &Path, settings: &SettingsData) -> Result<(), String> {
    let content =
        toml::to_string_pretty(settings).map_err(|e| format!("{}: {e}", path.display()))?;
    std::fs::write(path, content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the settings, first creating the file with defaults if absent.
pub fn load_or_create(path: &Path) -> Result<SettingsData, String> {
    if !path.exists() {
        save(path, &SettingsData::default())?;
    }
    load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modifier;

    /// A unique file under the OS temp directory, removed on drop.
    struct TempFile(PathBuf);

    impl TempFile {
        fn new(tag: &str) -> Self {
            let name = format!("taskbar-gone-{tag}-{}.txt", std::process::id());
            let path = std::env::temp_dir().join(name);
            let _ = std::fs::remove_file(&path);
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn defaults_are_all_off_with_ctrl_shift_9() {
        // Act
        let settings = SettingsData::default();

        // Assert
        for item in OptionItem::ALL {
            assert!(!settings.option(item), "{item:?} should default to off");
        }
        assert_eq!(settings.hotkey, Hotkey::ctrl_shift_9());
        assert!(!settings.logging.enabled);
    }

    #[test]
    fn file_name_uses_product_name() {
        assert_eq!(settings_file_name(), "TaskbarGone-SettingsData.txt");
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        // Arrange
        let file = TempFile::new("create");

        // Act
        let settings = load_or_create(&file.0).unwrap();

        // Assert
        assert!(file.0.exists());
        assert_eq!(settings, SettingsData::default());
    }

    #[test]
    fn save_then_load_reproduces_every_field() {
        // Arrange
        let file = TempFile::new("roundtrip");
        let settings = SettingsData {
            always_on_top: true,
            start_on_login: false,
            start_minimized: true,
            hide_in_tray: true,
            enable_hotkeys: true,
            hotkey: Hotkey::alt_shift_s(),
            logging: LogConfig {
                enabled: true,
                level: "debug".into(),
                max_file_mb: 2,
            },
        };

        // Act
        save(&file.0, &settings).unwrap();
        let loaded = load(&file.0).unwrap();

        // Assert
        assert_eq!(loaded, settings);
    }

    #[test]
    fn save_overwrites_existing_file() {
        // Arrange
        let file = TempFile::new("overwrite");
        let first = SettingsData {
            always_on_top: true,
            ..Default::default()
        };
        save(&file.0, &first).unwrap();

        // Act
        save(&file.0, &SettingsData::default()).unwrap();

        // Assert
        assert_eq!(load(&file.0).unwrap(), SettingsData::default());
    }

    #[test]
    fn existing_file_is_not_replaced_by_load_or_create() {
        // Arrange
        let file = TempFile::new("existing");
        std::fs::write(&file.0, "HideInTray = true\n").unwrap();

        // Act
        let settings = load_or_create(&file.0).unwrap();

        // Assert
        assert!(settings.hide_in_tray);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_keys() {
        // Arrange
        let toml_str = "EnableHotkeys = true\nHotkey = \"alt+shift+s\"\n";

        // Act
        let settings: SettingsData = toml::from_str(toml_str).unwrap();

        // Assert
        assert!(settings.enable_hotkeys);
        assert!(!settings.always_on_top);
        assert_eq!(settings.hotkey.modifiers, vec![Modifier::Alt, Modifier::Shift]);
        assert_eq!(settings.logging, LogConfig::default());
    }

    #[test]
    fn written_file_uses_pascal_case_keys() {
        // Act
        let text = toml::to_string_pretty(&SettingsData::default()).unwrap();

        // Assert
        for key in [
            "AlwaysOnTop",
            "StartOnLogin",
            "StartMinimized",
            "HideInTray",
            "EnableHotkeys",
        ] {
            assert!(text.contains(&format!("{key} = false")), "missing {key}");
        }
        assert!(text.contains("Hotkey = \"Ctrl+Shift+9\""));
    }

    #[test]
    fn invalid_hotkey_is_a_load_error() {
        // Arrange
        let file = TempFile::new("badhotkey");
        std::fs::write(&file.0, "Hotkey = \"Q\"\n").unwrap();

        // Act
        let result = load(&file.0);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn toggle_option_flips_only_that_flag() {
        // Arrange
        let mut settings = SettingsData::default();

        // Act
        let now = settings.toggle_option(OptionItem::StartOnLogin);

        // Assert
        assert!(now);
        assert!(settings.start_on_login);
        assert!(!settings.enable_hotkeys);
        assert!(!settings.toggle_option(OptionItem::StartOnLogin));
    }
}
