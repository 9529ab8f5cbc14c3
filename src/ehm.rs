// ehm.rs — Error handling module
//
// Unifies the startup/fatal error path behind Result<T, AppError> + the ?
// operator, with From impls for the two foreign error types setup code can
// produce. Per-entry delete/enumerate failures during the run are NOT
// routed through AppError — those are non-fatal and tracked by the counter
// bank + structured error line (see errors.rs); AppError is reserved for
// the startup path that ends the process before the engine ever spawns a
// worker.

use std::fmt;
use std::path::PathBuf;





/// Unified error type for paratree's startup path.
#[derive(Debug)]
pub enum AppError {
    /// Win32 API error (wraps windows::core::Error)
    Win32(windows::core::Error),

    /// Standard I/O error
    Io(std::io::Error),

    /// Invalid command-line argument (triggers usage display + exit 2)
    InvalidArg(String),

    /// Root path does not exist (exit 3)
    PathNotFound(PathBuf),

    /// Root node allocation failed (exit 4) — the path itself was already
    /// confirmed to exist; this is the node allocator's own out-of-memory
    /// path (§4.1), not a missing-path condition.
    AllocationFailed(PathBuf),
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl AppError
//
//  Exit code mapping, per the external interface contract.
//
////////////////////////////////////////////////////////////////////////////////

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidArg(_) => 2,
            AppError::PathNotFound(_) => 3,
            AppError::Win32(_) | AppError::Io(_) | AppError::AllocationFailed(_) => 4,
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl fmt::Display for AppError
//
//  Formats AppError variants for display output.
//
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Win32(e) => write!(f, "{}", e),
            AppError::Io(e) => write!(f, "{}", e),
            AppError::InvalidArg(msg) => write!(f, "{}", msg),
            AppError::PathNotFound(path) => {
                write!(f, "Error:   {} does not exist", path.display())
            }
            AppError::AllocationFailed(path) => {
                write!(f, "Error:   failed to allocate root node for {}", path.display())
            }
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl std::error::Error for AppError
//
//  Returns the underlying error source, if any.
//
////////////////////////////////////////////////////////////////////////////////

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Win32(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl From<windows::core::Error> for AppError
//
//  Converts a Win32 error into AppError::Win32.
//
////////////////////////////////////////////////////////////////////////////////

impl From<windows::core::Error> for AppError {
    fn from(e: windows::core::Error) -> Self {
        AppError::Win32(e)
    }
}





////////////////////////////////////////////////////////////////////////////////
//
//  impl From<std::io::Error> for AppError
//
//  Converts a standard I/O error into AppError::Io.
//
////////////////////////////////////////////////////////////////////////////////

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}





#[cfg(test)]
mod tests {
    use super::*;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  display_invalid_arg
    //
    //  Verifies display output for InvalidArg error.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn display_invalid_arg() {
        let e = AppError::InvalidArg("bad switch".into());
        assert_eq!(format!("{}", e), "bad switch");
        assert_eq!(e.exit_code(), 2);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  display_path_not_found
    //
    //  Verifies display output for PathNotFound error.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn display_path_not_found() {
        let e = AppError::PathNotFound(PathBuf::from(r"C:\NoSuchDir"));
        assert_eq!(format!("{}", e), r"Error:   C:\NoSuchDir does not exist");
        assert_eq!(e.exit_code(), 3);
    }




    ////////////////////////////////////////////////////////////////////////////
    //
    //  allocation_failed_is_exit_code_four_not_path_not_found
    //
    //  A root allocation failure happens after the path was already proven
    //  to exist, so it must not be confused with PathNotFound's exit code.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn allocation_failed_is_exit_code_four_not_path_not_found() {
        let e = AppError::AllocationFailed(PathBuf::from(r"C:\tmp\victim"));
        assert_eq!(e.exit_code(), 4);
        assert_eq!(
            format!("{}", e),
            r"Error:   failed to allocate root node for C:\tmp\victim"
        );
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_io_error
    //
    //  Verifies conversion from std::io::Error to AppError::Io.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert_eq!(app_err.exit_code(), 4);
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_win32_error
    //
    //  Verifies conversion from windows::core::Error to AppError::Win32.
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn from_win32_error() {
        let win_err = windows::core::Error::from_hresult(windows::core::HRESULT(0x80070002u32 as i32));
        let app_err: AppError = win_err.into();
        assert!(matches!(app_err, AppError::Win32(_)));
        assert_eq!(app_err.exit_code(), 4);
    }
}
