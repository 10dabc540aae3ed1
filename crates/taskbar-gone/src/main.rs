#![cfg_attr(windows, windows_subsystem = "windows")]

#[cfg(windows)]
fn main() {
    if let Err(e) = taskbar_gone_windows::run() {
        taskbar_gone_core::log_error!("Fatal: {e}");
        taskbar_gone_windows::dialog::show_error(
            None,
            "Initialization error",
            &format!("Error when initializing the program.\n\nMessage:\n{e}"),
        );
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    eprintln!("{} only runs on Windows.", taskbar_gone_core::PRODUCT_NAME);
    std::process::exit(1);
}
