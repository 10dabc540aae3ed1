use crate::OptionItem;

/// A user-initiated request, produced by the window procedure and
/// consumed by [`App::handle`](crate::App::handle).
///
/// The main button, the tray menu and the global hotkey all arrive here,
/// so every trigger goes through one code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Hide the taskbar if shown, show it if hidden.
    ToggleTaskbar,
    /// The global hotkey was pressed. Handled like `ToggleTaskbar`.
    Hotkey,
    /// Flip one of the Options menu flags.
    ToggleOption(OptionItem),
    /// Send the main window to the notification area.
    MinimizeToTray,
    /// Bring the main window back from the notification area.
    RestoreWindow,
    /// Leave the message loop.
    Exit,
}

// Menu and control identifiers. Zero is reserved by Win32 for "no id".
const ID_TOGGLE: u16 = 1;
const ID_MINIMIZE: u16 = 2;
const ID_RESTORE: u16 = 3;
const ID_EXIT: u16 = 9;
const ID_OPTION_BASE: u16 = 10;

impl Command {
    /// Returns the `WM_COMMAND` identifier for menu-reachable commands.
    pub fn menu_id(self) -> Option<u16> {
        match self {
            Self::ToggleTaskbar => Some(ID_TOGGLE),
            Self::MinimizeToTray => Some(ID_MINIMIZE),
            Self::RestoreWindow => Some(ID_RESTORE),
            Self::Exit => Some(ID_EXIT),
            Self::ToggleOption(item) => OptionItem::ALL
                .iter()
                .position(|&i| i == item)
                .map(|pos| ID_OPTION_BASE + pos as u16),
            Self::Hotkey => None,
        }
    }

    /// Maps a `WM_COMMAND` identifier back to its command.
    pub fn from_menu_id(id: u16) -> Option<Self> {
        match id {
            ID_TOGGLE => Some(Self::ToggleTaskbar),
            ID_MINIMIZE => Some(Self::MinimizeToTray),
            ID_RESTORE => Some(Self::RestoreWindow),
            ID_EXIT => Some(Self::Exit),
            _ => {
                let index = usize::from(id.checked_sub(ID_OPTION_BASE)?);
                OptionItem::ALL.get(index).copied().map(Self::ToggleOption)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_command_maps_back_to_itself() {
        // Arrange
        let mut commands = vec![
            Command::ToggleTaskbar,
            Command::MinimizeToTray,
            Command::RestoreWindow,
            Command::Exit,
        ];
        commands.extend(OptionItem::ALL.map(Command::ToggleOption));

        for command in commands {
            // Act
            let id = command.menu_id().unwrap();

            // Assert
            assert_eq!(Command::from_menu_id(id), Some(command));
        }
    }

    #[test]
    fn hotkey_has_no_menu_id() {
        assert_eq!(Command::Hotkey.menu_id(), None);
    }

    #[test]
    fn unknown_ids_map_to_none() {
        assert_eq!(Command::from_menu_id(0), None);
        assert_eq!(Command::from_menu_id(5), None);
        assert_eq!(Command::from_menu_id(ID_OPTION_BASE + 5), None);
    }

    #[test]
    fn menu_ids_are_unique() {
        // Arrange
        let mut ids: Vec<u16> = OptionItem::ALL
            .map(Command::ToggleOption)
            .iter()
            .filter_map(|c| c.menu_id())
            .collect();
        ids.extend([ID_TOGGLE, ID_MINIMIZE, ID_RESTORE, ID_EXIT]);

        // Act
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();

        // Assert
        assert_eq!(ids.len(), before);
    }
}
