//! The application state and its command handlers.
//!
//! [`App`] owns the settings and the [`TaskbarController`]. Everything
//! that touches the desktop outside the taskbar (hotkeys, autostart, the
//! main window, dialogs) goes through the [`Desktop`] trait so the
//! platform crate can supply Win32 calls and tests can record them.

use std::path::PathBuf;

use crate::settings::{self, OptionItem, SettingsData};
use crate::{
    Command, Hotkey, ShellWindows, TaskbarController, ToggleState, WindowResult, log_error,
    log_info, log_warn,
};

/// Side effects the application asks of the desktop shell.
pub trait Desktop {
    /// Binds `hotkey` to the main window, replacing any previous binding.
    fn register_hotkey(&mut self, hotkey: &Hotkey) -> WindowResult<()>;

    /// Releases the hotkey binding. Does nothing if none is active.
    fn unregister_hotkey(&mut self);

    /// Adds or removes the run-at-login entry.
    fn set_autostart(&mut self, enabled: bool) -> Result<(), String>;

    fn set_always_on_top(&mut self, enabled: bool);

    /// Shows the tray icon and minimizes the main window, or hides it
    /// entirely when `hide_window` is set.
    fn send_to_tray(&mut self, hide_window: bool);

    /// Restores the main window and removes the tray icon.
    fn restore_from_tray(&mut self);

    /// Brings labels and check marks in line with the current state.
    fn sync(&mut self, state: ToggleState, settings: &SettingsData);

    /// Shows a blocking error message.
    fn report_error(&mut self, title: &str, message: &str);
}

/// What the message loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App<S> {
    controller: TaskbarController<S>,
    settings: SettingsData,
    settings_path: Option<PathBuf>,
    shut_down: bool,
}

impl<S: ShellWindows> App<S> {
    pub fn new(shell: S, settings: SettingsData, settings_path: Option<PathBuf>) -> Self {
        Self {
            controller: TaskbarController::new(shell),
            settings,
            settings_path,
            shut_down: false,
        }
    }

    /// Loads the settings file, creating it if needed.
    ///
    /// A broken or unwritable file is reported and the application
    /// continues with defaults.
    pub fn load(shell: S, settings_path: Option<PathBuf>, desktop: &mut impl Desktop) -> Self {
        let loaded = match settings_path.as_deref() {
            Some(path) => settings::load_or_create(path),
            None => Err("could not determine the executable directory".into()),
        };
        let settings = match loaded {
            Ok(settings) => settings,
            Err(e) => {
                desktop.report_error(
                    "Initialization error",
                    &format!("Error when initializing the program.\n\nMessage:\n{e}"),
                );
                SettingsData::default()
            }
        };
        Self::new(shell, settings, settings_path)
    }

    pub fn settings(&self) -> &SettingsData {
        &self.settings
    }

    pub fn controller(&self) -> &TaskbarController<S> {
        &self.controller
    }

    pub fn state(&self) -> ToggleState {
        self.controller.state()
    }

    /// Applies the loaded settings once the main window exists.
    pub fn start(&mut self, desktop: &mut impl Desktop) {
        log_info!(
            "Starting (always_on_top={}, start_minimized={}, hide_in_tray={}, hotkeys={} [{}])",
            self.settings.always_on_top,
            self.settings.start_minimized,
            self.settings.hide_in_tray,
            self.settings.enable_hotkeys,
            self.settings.hotkey
        );
        desktop.set_always_on_top(self.settings.always_on_top);
        if self.settings.enable_hotkeys {
            self.register_hotkey(desktop);
        }
        if self.settings.start_minimized {
            desktop.send_to_tray(self.settings.hide_in_tray);
        }
        desktop.sync(self.state(), &self.settings);
    }

    /// Handles one command. Never fails: problems are reported through
    /// the desktop or the log.
    pub fn handle(&mut self, command: Command, desktop: &mut impl Desktop) -> Flow {
        match command {
            Command::ToggleTaskbar => {
                self.toggle_taskbar();
            }
            Command::Hotkey => {
                if let Some(e) = self.toggle_taskbar() {
                    log_error!("Hotkey toggle failed: {e}");
                }
            }
            Command::ToggleOption(item) => self.toggle_option(item, desktop),
            Command::MinimizeToTray => desktop.send_to_tray(self.settings.hide_in_tray),
            Command::RestoreWindow => desktop.restore_from_tray(),
            Command::Exit => return Flow::Exit,
        }
        desktop.sync(self.state(), &self.settings);
        Flow::Continue
    }

    /// Puts the taskbar back, releases the hotkey and saves the settings.
    ///
    /// Runs at most once: a session end may trigger it before the normal
    /// exit path does.
    pub fn shutdown(&mut self, desktop: &mut impl Desktop) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.controller.restore();
        if self.settings.enable_hotkeys {
            desktop.unregister_hotkey();
        }
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(e) = settings::save(path, &self.settings) {
            log_error!("Saving settings failed: {e}");
            desktop.report_error(
                "File error",
                &format!("Error saving settings file.\n\nMessage:\n{e}"),
            );
        }
    }

    /// The single toggle path shared by the button, the tray menu and the
    /// hotkey. Returns the OS error recorded by the controller, if any.
    fn toggle_taskbar(&mut self) -> Option<String> {
        let state = self.controller.toggle();
        log_info!("Taskbar {state:?}");
        self.controller.last_error().map(str::to_owned)
    }

    fn toggle_option(&mut self, item: OptionItem, desktop: &mut impl Desktop) {
        let enabled = self.settings.toggle_option(item);
        log_info!("{item:?} set to {enabled}");
        match item {
            OptionItem::AlwaysOnTop => desktop.set_always_on_top(enabled),
            OptionItem::StartOnLogin => {
                if let Err(e) = desktop.set_autostart(enabled) {
                    log_warn!("Autostart update failed: {e}");
                    desktop.report_error(
                        "Registry error",
                        &format!("Could not update the startup entry.\n\nMessage:\n{e}"),
                    );
                }
            }
            OptionItem::EnableHotkeys => {
                if enabled {
                    self.register_hotkey(desktop);
                } else {
                    desktop.unregister_hotkey();
                }
            }
            OptionItem::StartMinimized | OptionItem::HideInTray => {}
        }
    }

    fn register_hotkey(&self, desktop: &mut impl Desktop) {
        let hotkey = &self.settings.hotkey;
        if let Err(e) = desktop.register_hotkey(hotkey) {
            log_warn!("Registering {hotkey} failed: {e}");
            desktop.report_error(
                "Hotkey error",
                &format!("Could not register the {hotkey} hotkey.\n\nMessage:\n{e}"),
            );
        }
    }
}
