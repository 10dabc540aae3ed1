use taskbar_gone_core::{Desktop, Hotkey, SettingsData, ToggleState, WindowResult, log_warn};
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyWindow, HWND_NOTOPMOST, HWND_TOPMOST, SW_HIDE, SW_MINIMIZE, SW_RESTORE, SW_SHOWNORMAL,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SetForegroundWindow, SetWindowPos, SetWindowTextW,
    ShowWindow,
};
use windows::core::HSTRING;

use crate::hotkey::HotkeyRegistration;
use crate::main_window::{self, MainWindow};
use crate::tray::TrayIcon;
use crate::{autostart, dialog, menu};

/// The Win32 side of the application: main window, hotkey and tray icon.
pub struct Win32Desktop {
    window: MainWindow,
    hotkey: HotkeyRegistration,
    tray: TrayIcon,
}

impl Win32Desktop {
    pub fn new(window: MainWindow) -> Self {
        Self {
            window,
            hotkey: HotkeyRegistration::new(Some(window.hwnd)),
            tray: TrayIcon::new(window.hwnd),
        }
    }

    pub fn show_window(&self) {
        // SAFETY: the main window is alive until `destroy`.
        unsafe {
            let _ = ShowWindow(self.window.hwnd, SW_SHOWNORMAL);
        }
    }

    /// Releases the hotkey and tray icon, then destroys the main window.
    pub fn destroy(&mut self) {
        self.hotkey.unregister();
        self.tray.hide();
        // SAFETY: nothing refers to the window after this point.
        unsafe {
            let _ = DestroyWindow(self.window.hwnd);
        }
    }
}

impl Desktop for Win32Desktop {
    fn register_hotkey(&mut self, hotkey: &Hotkey) -> WindowResult<()> {
        self.hotkey.register(hotkey)
    }

    fn unregister_hotkey(&mut self) {
        self.hotkey.unregister();
    }

    fn set_autostart(&mut self, enabled: bool) -> Result<(), String> {
        autostart::set_enabled(enabled)
    }

    fn set_always_on_top(&mut self, enabled: bool) {
        let insert_after = if enabled { HWND_TOPMOST } else { HWND_NOTOPMOST };
        // SAFETY: only the z-order changes; position and size are kept.
        let result = unsafe {
            SetWindowPos(
                self.window.hwnd,
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        };
        if let Err(e) = result {
            log_warn!("Could not change topmost state: {e}");
        }
    }

    fn send_to_tray(&mut self, hide_window: bool) {
        let cmd = if hide_window { SW_HIDE } else { SW_MINIMIZE };
        // SAFETY: ShowWindow on our own live window.
        unsafe {
            let _ = ShowWindow(self.window.hwnd, cmd);
        }
        self.tray.show();
    }

    fn restore_from_tray(&mut self) {
        // SAFETY: ShowWindow/SetForegroundWindow on our own live window.
        unsafe {
            let _ = ShowWindow(self.window.hwnd, SW_RESTORE);
            let _ = SetForegroundWindow(self.window.hwnd);
        }
        self.tray.hide();
    }

    fn sync(&mut self, state: ToggleState, settings: &SettingsData) {
        // SAFETY: the button is a child of the live main window.
        unsafe {
            let _ = SetWindowTextW(self.window.button, &HSTRING::from(state.button_label()));
        }
        main_window::set_toggle_state(state);
        menu::sync_checks(self.window.hwnd, settings);
    }

    fn report_error(&mut self, title: &str, message: &str) {
        dialog::show_error(Some(self.window.hwnd), title, message);
    }
}
