use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use taskbar_gone_core::settings::settings_path;
use taskbar_gone_core::{App, Command, Flow, PRODUCT_NAME, WindowResult, log, log_info, log_warn};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage,
};

use crate::desktop::Win32Desktop;
use crate::main_window;
use crate::shell::Win32Shell;

/// Runs TaskbarGone until the user exits.
///
/// Everything happens on the calling thread: the window procedure queues
/// commands, and the pump hands them to the [`App`] one at a time.
pub fn run() -> WindowResult<()> {
    enable_dpi_awareness();

    let (tx, rx) = mpsc::channel::<Command>();
    main_window::set_command_sender(tx);

    let mut desktop = Win32Desktop::new(main_window::create()?);
    let app = App::load(Win32Shell, settings_path(), &mut desktop);
    log::init(&app.settings().logging);
    log_info!("{PRODUCT_NAME} started (PID: {})", std::process::id());

    let session = Rc::new(RefCell::new(Session { app, desktop }));
    main_window::set_end_session_hook(end_session_hook(&session));

    {
        let mut guard = session.borrow_mut();
        let Session { app, desktop } = &mut *guard;
        desktop.show_window();
        app.start(desktop);
    }

    run_message_pump(&session, &rx);

    main_window::clear_end_session_hook();
    let mut guard = session.borrow_mut();
    let Session { app, desktop } = &mut *guard;
    app.shutdown(desktop);
    desktop.destroy();
    log_info!("{PRODUCT_NAME} exited");
    Ok(())
}

/// The application and its Win32 side, shared between the message pump
/// and the end-session hook.
struct Session {
    app: App<Win32Shell>,
    desktop: Win32Desktop,
}

/// Shuts down from inside `WM_ENDSESSION`.
///
/// The session is only borrowed while a command runs, so a busy borrow
/// means the session ended under a modal dialog; that case is logged.
fn end_session_hook(session: &Rc<RefCell<Session>>) -> Box<dyn FnOnce()> {
    let session = Rc::downgrade(session);
    Box::new(move || {
        let Some(session) = session.upgrade() else {
            return;
        };
        match session.try_borrow_mut() {
            Ok(mut guard) => {
                let Session { app, desktop } = &mut *guard;
                app.shutdown(desktop);
            }
            Err(_) => {
                log_warn!("Session ended while a command was running, shutdown skipped");
            }
        }
    })
}

/// Taskbar coordinates must be raw pixels, otherwise the cached rect is
/// scaled on mixed-DPI setups and the restore lands in the wrong place.
fn enable_dpi_awareness() {
    // SAFETY: called once before any window exists. Failure (already set
    // by a manifest) is fine.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// The Win32 message pump. Dispatches each message, then drains the
/// command queue. Returns on `Exit` or `WM_QUIT`.
fn run_message_pump(session: &RefCell<Session>, rx: &Receiver<Command>) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        for command in rx.try_iter() {
            let mut guard = session.borrow_mut();
            let Session { app, desktop } = &mut *guard;
            if app.handle(command, desktop) == Flow::Exit {
                return;
            }
        }
    }
}
