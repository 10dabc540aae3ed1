use crate::{Rect, ToggleState};

/// A boxed error type for OS-facing window operations.
///
/// Any error type that implements the `Error` trait can be boxed into this,
/// so the Win32 layer can hand back `windows::core::Error` while the core
/// stays platform-agnostic.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Access to the shell windows that make up the taskbar.
///
/// Handles are carried as pointer-sized integers so the core never depends
/// on a platform crate. The Windows crate provides the real implementation;
/// tests use an in-memory fake.
pub trait ShellWindows {
    /// Looks up the taskbar (shell tray) window.
    fn find_taskbar(&self) -> Option<usize>;

    /// Looks up the Start button window, if the shell exposes one.
    fn find_start_button(&self) -> Option<usize>;

    /// Returns the window's current screen rectangle.
    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect>;

    /// Moves a window to `(x, y)` without resizing it and applies the
    /// matching visibility flag.
    fn place(&self, hwnd: usize, x: i32, y: i32, state: ToggleState) -> WindowResult<()>;

    /// Forces the window to repaint.
    fn repaint(&self, hwnd: usize);
}
