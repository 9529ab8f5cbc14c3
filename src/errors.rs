// errors.rs — Structured per-entry error lines
//
// Per-entry failures (enumeration errors, delete/remove failures) are not
// fatal and never become an AppError (see ehm.rs). They are reported as a
// one-line record — operation, path, OS error code — gated by the
// counters' bounded report governors (§7), so a pathological tree with
// thousands of failures does not flood stderr.

use std::path::Path;

use crate::counters::Counters;

/// The Win32 (or std::io) operation that failed, for the structured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindFirstFile,
    FindNextFile,
    DeleteFile,
    RemoveDirectory,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::FindFirstFile => "FindFirstFileW",
            Operation::FindNextFile => "FindNextFileW",
            Operation::DeleteFile => "DeleteFileW",
            Operation::RemoveDirectory => "RemoveDirectoryW",
        };
        write!(f, "{s}")
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  report_delete_failure
//
//  Increments `counters.failed` and, if still under the report limit,
//  prints a structured error line to stderr.
//
////////////////////////////////////////////////////////////////////////////////

pub fn report_delete_failure(counters: &Counters, op: Operation, path: &Path, code: u32) {
    if counters.record_failure() {
        eprintln!("Error:   {op} failed on {} (code {code})", path.display());
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  report_enumeration_failure
//
//  Increments the enumeration-error governor and, if still under the
//  report limit, prints a structured error line to stderr. Does not touch
//  `counters.failed` — see counters.rs field comment.
//
////////////////////////////////////////////////////////////////////////////////

pub fn report_enumeration_failure(counters: &Counters, op: Operation, path: &Path, code: u32) {
    if counters.record_enumeration_error() {
        eprintln!("Error:   {op} failed on {} (code {code})", path.display());
    }
}
