pub mod app;
pub mod command;
pub mod hotkey;
pub mod log;
pub mod rect;
pub mod settings;
pub mod taskbar;
pub mod window;

pub use app::{App, Desktop, Flow};
pub use command::Command;
pub use hotkey::{HOTKEY_ID, Hotkey, Modifier};
pub use rect::Rect;
pub use settings::{OptionItem, PRODUCT_NAME, SettingsData};
pub use taskbar::{Resolution, ShellTarget, TaskbarController, ToggleState};
pub use window::{ShellWindows, WindowResult};
