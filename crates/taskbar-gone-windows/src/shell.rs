use taskbar_gone_core::{Rect, ShellWindows, ToggleState, WindowResult};

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    RDW_ALLCHILDREN, RDW_ERASE, RDW_FRAME, RDW_INVALIDATE, RDW_UPDATENOW, RedrawWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowExW, FindWindowW, GetWindowRect, SWP_HIDEWINDOW, SWP_NOACTIVATE, SWP_NOSIZE,
    SWP_NOZORDER, SWP_SHOWWINDOW, SetWindowPos,
};
use windows::core::{PCWSTR, w};

/// Window class of the taskbar.
const TASKBAR_CLASS: PCWSTR = w!("Shell_TrayWnd");

/// Integer atom of the system `Button` class. The classic Start button is
/// the first top-level window of that class.
const BUTTON_CLASS_ATOM: usize = 0xC017;

/// The real shell, queried through `user32`.
///
/// Lookups are cheap and uncached here; the controller decides what to
/// keep.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Shell;

fn hwnd(handle: usize) -> HWND {
    HWND(handle as *mut _)
}

/// `FindWindow*` reports "not found" as an error or a null handle
/// depending on the call; fold both into `None`.
fn found(result: windows::core::Result<HWND>) -> Option<usize> {
    match result {
        Ok(h) if !h.is_invalid() => Some(h.0 as usize),
        _ => None,
    }
}

impl ShellWindows for Win32Shell {
    fn find_taskbar(&self) -> Option<usize> {
        // SAFETY: FindWindowW only reads the class name we pass.
        found(unsafe { FindWindowW(TASKBAR_CLASS, PCWSTR::null()) })
    }

    fn find_start_button(&self) -> Option<usize> {
        // SAFETY: an integer atom in the low word is a valid class name
        // argument for FindWindowExW.
        found(unsafe {
            FindWindowExW(
                None,
                None,
                PCWSTR(BUTTON_CLASS_ATOM as *const u16),
                PCWSTR::null(),
            )
        })
    }

    fn window_rect(&self, handle: usize) -> WindowResult<Rect> {
        let mut rect = RECT::default();
        // SAFETY: GetWindowRect writes into our local RECT. An invalid
        // handle yields an error instead of touching memory.
        unsafe { GetWindowRect(hwnd(handle), &mut rect)? };
        Ok(Rect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn place(&self, handle: usize, x: i32, y: i32, state: ToggleState) -> WindowResult<()> {
        let visibility = match state {
            ToggleState::Shown => SWP_SHOWWINDOW,
            ToggleState::Hidden => SWP_HIDEWINDOW,
        };
        let flags = visibility | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE;

        taskbar_gone_core::log_debug!("place 0x{handle:X} at ({x},{y}) {state:?}");

        // SAFETY: SetWindowPos validates the handle and fails cleanly on
        // a stale one.
        unsafe { SetWindowPos(hwnd(handle), None, x, y, 0, 0, flags)? };
        Ok(())
    }

    fn repaint(&self, handle: usize) {
        // SAFETY: RedrawWindow on a stale handle is a harmless no-op.
        unsafe {
            let _ = RedrawWindow(
                Some(hwnd(handle)),
                None,
                None,
                RDW_INVALIDATE | RDW_UPDATENOW | RDW_FRAME | RDW_ERASE | RDW_ALLCHILDREN,
            );
        }
    }
}
