#![cfg(windows)]

/// Application start-up and the GUI message loop.
pub mod app;

/// Run-at-login registration.
pub mod autostart;

/// `Desktop` implementation backed by the main window.
pub mod desktop;

/// Modal message boxes.
pub mod dialog;

/// Global hotkey registration.
pub mod hotkey;

/// Key name to virtual key code mapping.
pub mod keys;

/// Main window class, controls and window procedure.
pub mod main_window;

/// Menu bar and tray popup menu.
pub mod menu;

/// Shell tray window lookup and placement.
pub mod shell;

/// Notification area icon.
pub mod tray;

pub use app::run;
pub use shell::Win32Shell;
