// logging.rs — Debug-only diagnostics
//
// Mirrors the original tool's `LOG(n)` / `OUTPUT_DEBUG_STRING` switch: by
// default the original shipped with logging compiled out entirely
// (`NO___OUTPUT_DEBUG_STRING`). Here the equivalent knob is
// `cfg(debug_assertions)` — release builds compile `log_debug!` away to
// nothing, debug builds write the line to both the debugger (via
// `OutputDebugStringW`) and stderr. Used only at startup, enumeration-error
// and delete-error call sites; never on the hot per-entry success path.

#[cfg(debug_assertions)]
pub fn write_debug_string(line: &str) {
    use std::os::windows::ffi::OsStrExt;
    let wide: Vec<u16> = std::ffi::OsStr::new(line)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    unsafe {
        windows::Win32::System::Diagnostics::Debug::OutputDebugStringW(windows::core::PCWSTR(
            wide.as_ptr(),
        ));
    }
    eprintln!("{line}");
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::write_debug_string(&format!($($arg)*));
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub use crate::log_debug;
