//! Taskbar visibility control.
//!
//! [`TaskbarController`] owns the shell window handles and the positions
//! they had when first seen, and moves them off screen or back.

use crate::{Rect, ShellWindows, log_debug, log_info, log_warn};

/// Whether the taskbar is currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Shown,
    Hidden,
}

impl ToggleState {
    pub fn flipped(self) -> Self {
        match self {
            Self::Shown => Self::Hidden,
            Self::Hidden => Self::Shown,
        }
    }

    /// Caption of the main window's button.
    ///
    /// "Enable" turns the hiding on, "Disable" turns it off again.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Shown => "&Enable",
            Self::Hidden => "&Disable",
        }
    }

    /// Caption of the toggle entry in the tray menu.
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Shown => "&Hide taskbar",
            Self::Hidden => "&Show taskbar",
        }
    }
}

/// A shell window together with the rect it had when first resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellTarget {
    pub hwnd: usize,
    pub rect: Rect,
}

/// Whether the shell windows have been located yet.
///
/// The restore positions are only trusted once `Resolved`; an all-zero
/// rect is a perfectly valid resolved position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Unresolved,
    Resolved {
        taskbar: ShellTarget,
        /// Newer shells have no separate Start button window.
        start_button: Option<ShellTarget>,
    },
}

/// Hides and shows the taskbar and Start button.
///
/// All methods run on the GUI thread. OS failures never propagate: they
/// are logged and kept in [`last_error`](Self::last_error) so the caller
/// can surface them without interrupting the event loop.
pub struct TaskbarController<S> {
    shell: S,
    resolution: Resolution,
    state: ToggleState,
    last_error: Option<String>,
}

impl<S: ShellWindows> TaskbarController<S> {
    /// Creates an unresolved controller. Nothing is queried until the
    /// first toggle.
    pub fn new(shell: S) -> Self {
        Self {
            shell,
            resolution: Resolution::Unresolved,
            state: ToggleState::Shown,
            last_error: None,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// The most recent OS failure from the last hide or show, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Locates the shell windows, capturing their rects the first time.
    ///
    /// Safe to call on every toggle. Once resolved, handles are refreshed
    /// (Explorer may have restarted) but the cached rects never change.
    /// Returns whether the taskbar is resolved.
    pub fn resolve(&mut self) -> bool {
        match self.resolution {
            Resolution::Unresolved => {
                let Some(hwnd) = self.shell.find_taskbar() else {
                    log_warn!("Taskbar window not found");
                    return false;
                };
                let rect = match self.shell.window_rect(hwnd) {
                    Ok(rect) => rect,
                    Err(e) => {
                        log_warn!("Could not read taskbar rect 0x{hwnd:X}: {e}");
                        return false;
                    }
                };
                let taskbar = ShellTarget { hwnd, rect };
                let start_button = self.capture_start_button();
                log_info!(
                    "Resolved taskbar 0x{:X} at ({},{})-({},{}), start button: {:?}",
                    hwnd,
                    rect.left,
                    rect.top,
                    rect.right,
                    rect.bottom,
                    start_button.map(|t| t.hwnd)
                );
                self.resolution = Resolution::Resolved {
                    taskbar,
                    start_button,
                };
            }
            Resolution::Resolved {
                mut taskbar,
                mut start_button,
            } => {
                if let Some(hwnd) = self.shell.find_taskbar() {
                    taskbar.hwnd = hwnd;
                }
                start_button = match start_button {
                    Some(mut target) => {
                        if let Some(hwnd) = self.shell.find_start_button() {
                            target.hwnd = hwnd;
                        }
                        Some(target)
                    }
                    None => self.capture_start_button(),
                };
                self.resolution = Resolution::Resolved {
                    taskbar,
                    start_button,
                };
            }
        }
        true
    }

    /// Moves the taskbar and Start button below the screen and hides them.
    pub fn hide(&mut self) {
        self.resolve();
        self.last_error = None;
        for target in self.targets().into_iter().flatten() {
            let (x, y) = target.rect.parked_origin();
            self.place(target, x, y, ToggleState::Hidden);
        }
        self.state = ToggleState::Hidden;
    }

    /// Puts the taskbar and Start button back where they were first seen.
    pub fn show(&mut self) {
        self.resolve();
        self.last_error = None;
        for target in self.targets().into_iter().flatten() {
            self.place(target, target.rect.left, target.rect.top, ToggleState::Shown);
        }
        // The Start button keeps stale pixels after being re-shown.
        if let Resolution::Resolved {
            start_button: Some(start),
            ..
        } = self.resolution
        {
            self.shell.repaint(start.hwnd);
        }
        self.state = ToggleState::Shown;
    }

    /// Flips the taskbar visibility and returns the new state.
    ///
    /// The state flips even when the OS refuses the move, so consecutive
    /// toggles always alternate.
    pub fn toggle(&mut self) -> ToggleState {
        match self.state.flipped() {
            ToggleState::Hidden => self.hide(),
            ToggleState::Shown => self.show(),
        }
        self.state
    }

    /// Shows the taskbar if it is hidden. Used on exit.
    pub fn restore(&mut self) {
        if self.state == ToggleState::Hidden {
            log_info!("Restoring taskbar before exit");
            self.show();
        }
    }

    fn capture_start_button(&self) -> Option<ShellTarget> {
        let hwnd = self.shell.find_start_button()?;
        match self.shell.window_rect(hwnd) {
            Ok(rect) => Some(ShellTarget { hwnd, rect }),
            Err(e) => {
                log_debug!("Could not read start button rect 0x{hwnd:X}: {e}");
                None
            }
        }
    }

    fn targets(&self) -> [Option<ShellTarget>; 2] {
        match self.resolution {
            Resolution::Unresolved => [None, None],
            Resolution::Resolved {
                taskbar,
                start_button,
            } => [Some(taskbar), start_button],
        }
    }

    fn place(&mut self, target: ShellTarget, x: i32, y: i32, state: ToggleState) {
        if let Err(e) = self.shell.place(target.hwnd, x, y, state) {
            let message = format!("could not move window 0x{:X} to ({x},{y}): {e}", target.hwnd);
            log_warn!("{message}");
            self.last_error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests;
