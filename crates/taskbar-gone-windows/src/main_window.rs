use std::cell::{Cell, RefCell};
use std::sync::mpsc::Sender;

use taskbar_gone_core::{
    Command, HOTKEY_ID, PRODUCT_NAME, ToggleState, WindowResult, log_info, log_warn,
};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{COLOR_BTNFACE, GetSysColorBrush};
use windows::Win32::UI::WindowsAndMessaging::{
    BS_DEFPUSHBUTTON, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, HMENU, IDC_ARROW,
    IDI_APPLICATION, LoadCursorW, LoadIconW, PostQuitMessage, RegisterClassW, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_CLOSE, WM_COMMAND, WM_DESTROY, WM_ENDSESSION, WM_HOTKEY, WM_LBUTTONUP,
    WM_RBUTTONUP, WNDCLASSW, WS_CAPTION, WS_CHILD, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU,
    WS_TABSTOP, WS_VISIBLE,
};
use windows::core::{HSTRING, w};

use crate::menu;
use crate::tray::WM_TRAYICON;

// The window procedure cannot borrow the application, so it only queues
// commands; the message pump drains them on the same thread.
thread_local! {
    static COMMAND_SENDER: RefCell<Option<Sender<Command>>> = const { RefCell::new(None) };
    static TOGGLE_STATE: Cell<ToggleState> = const { Cell::new(ToggleState::Shown) };
    static END_SESSION_HOOK: RefCell<Option<Box<dyn FnOnce()>>> = const { RefCell::new(None) };
}

/// The main window and its toggle button.
#[derive(Debug, Clone, Copy)]
pub struct MainWindow {
    pub hwnd: HWND,
    pub button: HWND,
}

/// Routes commands raised on this thread into `tx`.
pub fn set_command_sender(tx: Sender<Command>) {
    COMMAND_SENDER.with(|cell| *cell.borrow_mut() = Some(tx));
}

/// Queues a command for the message pump. Returns `false` if no sender
/// is installed or the receiver is gone.
pub fn post(command: Command) -> bool {
    COMMAND_SENDER.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok())
    })
}

/// Remembers the taskbar state so the tray menu can label its toggle.
pub fn set_toggle_state(state: ToggleState) {
    TOGGLE_STATE.with(|cell| cell.set(state));
}

/// Installs the work to run when Windows ends the session.
///
/// No `WM_CLOSE` arrives at logoff or shutdown, and the process may be
/// terminated as soon as `WM_ENDSESSION` returns, so the hook runs inside
/// the window procedure.
pub fn set_end_session_hook(hook: Box<dyn FnOnce()>) {
    END_SESSION_HOOK.with(|cell| *cell.borrow_mut() = Some(hook));
}

/// Drops the end-session hook without running it.
pub fn clear_end_session_hook() {
    END_SESSION_HOOK.with(|cell| cell.borrow_mut().take());
}

fn run_end_session_hook() {
    let hook = END_SESSION_HOOK.with(|cell| cell.borrow_mut().take());
    if let Some(hook) = hook {
        log_info!("Session ending");
        hook();
    }
}

/// Registers the window class and creates the (still hidden) main window
/// with its button and menu bar.
pub fn create() -> WindowResult<MainWindow> {
    let class_name = w!("TaskbarGoneMain");
    let button_id = Command::ToggleTaskbar.menu_id().map_or(0, usize::from);

    // SAFETY: the class and window are created on the GUI thread that
    // later runs the message pump; all strings are static or outlive the
    // calls.
    unsafe {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(wnd_proc),
            lpszClassName: class_name,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
            hbrBackground: GetSysColorBrush(COLOR_BTNFACE),
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err("failed to register the main window class".into());
        }

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            &HSTRING::from(PRODUCT_NAME),
            WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            300,
            160,
            None,
            None,
            None,
            None,
        )?;

        // The button shares its id with the menu's toggle entry, so both
        // arrive as the same WM_COMMAND.
        let button = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            w!("BUTTON"),
            &HSTRING::from(ToggleState::Shown.button_label()),
            WS_CHILD | WS_VISIBLE | WS_TABSTOP | WINDOW_STYLE(BS_DEFPUSHBUTTON as u32),
            20,
            20,
            244,
            56,
            Some(hwnd),
            Some(HMENU(button_id as *mut _)),
            None,
            None,
        )?;

        menu::attach_menu_bar(hwnd)?;

        Ok(MainWindow { hwnd, button })
    }
}

/// WNDPROC for the main window.
///
/// Menu and button clicks, the hotkey, tray clicks and the close box
/// become queued commands. `WM_HOTKEY` is handled here rather than in the
/// pump so presses are not lost while a modal loop (message box, popup
/// menu) is dispatching. Everything else goes to `DefWindowProcW`.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_COMMAND => {
            let id = (wparam.0 & 0xFFFF) as u16;
            if let Some(command) = Command::from_menu_id(id) {
                post(command);
                return LRESULT(0);
            }
        }
        WM_HOTKEY => {
            if wparam.0 == HOTKEY_ID as usize {
                post(Command::Hotkey);
                return LRESULT(0);
            }
        }
        WM_ENDSESSION => {
            if wparam.0 != 0 {
                run_end_session_hook();
            }
            return LRESULT(0);
        }
        WM_TRAYICON => {
            match lparam.0 as u32 {
                WM_LBUTTONUP => {
                    post(Command::RestoreWindow);
                }
                WM_RBUTTONUP => {
                    let state = TOGGLE_STATE.with(Cell::get);
                    if let Err(e) = menu::show_tray_menu(hwnd, state) {
                        log_warn!("Tray menu failed: {e}");
                    }
                }
                _ => {}
            }
            return LRESULT(0);
        }
        // Closing goes through the command path so settings get saved.
        WM_CLOSE => {
            post(Command::Exit);
            return LRESULT(0);
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            return LRESULT(0);
        }
        _ => {}
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn hotkey_message_is_queued_as_a_command() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        set_command_sender(tx);

        // Act
        let result = unsafe {
            wnd_proc(
                HWND::default(),
                WM_HOTKEY,
                WPARAM(HOTKEY_ID as usize),
                LPARAM(0),
            )
        };

        // Assert
        assert_eq!(result, LRESULT(0));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Command::Hotkey]);
    }

    #[test]
    fn hotkey_from_another_slot_is_not_queued() {
        let (tx, rx) = mpsc::channel();
        set_command_sender(tx);

        let _ = unsafe { wnd_proc(HWND::default(), WM_HOTKEY, WPARAM(5), LPARAM(0)) };

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn session_end_runs_the_hook_once() {
        // Arrange
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        set_end_session_hook(Box::new(move || counter.set(counter.get() + 1)));

        // Act
        unsafe {
            let _ = wnd_proc(HWND::default(), WM_ENDSESSION, WPARAM(1), LPARAM(0));
            let _ = wnd_proc(HWND::default(), WM_ENDSESSION, WPARAM(1), LPARAM(0));
        }

        // Assert
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn cancelled_session_end_keeps_the_hook() {
        // Arrange
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        set_end_session_hook(Box::new(move || counter.set(counter.get() + 1)));

        // Act
        let _ = unsafe { wnd_proc(HWND::default(), WM_ENDSESSION, WPARAM(0), LPARAM(0)) };

        // Assert
        assert_eq!(runs.get(), 0);
        clear_end_session_hook();
    }
}
