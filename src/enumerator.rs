// enumerator.rs — Directory enumeration
//
// Port of: relmer/RCDir's directory_lister.rs / multi_threaded_lister.rs
// FindFirstFileW/FindNextFileW loop shape, repurposed from "collect matches
// for display" to "submit one child job per entry". `FindHandle` is a
// thin RAII guard around the search handle (the reference tooling relies
// on this same pattern but never defines the guard itself outside its
// call sites; here it owns the handle explicitly so `FindClose` runs on
// every exit path, including the early returns on enumeration failure).

use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use windows::Win32::Storage::FileSystem::{FindClose, FindFirstFileW, FindNextFileW, WIN32_FIND_DATAW};
use windows::core::PCWSTR;

use crate::counters::Counters;
use crate::errors::{self, Operation};
use crate::job_queue::{Job, JobQueue};
use crate::node::{self, Node};
use crate::termination::TerminationSignal;

struct FindHandle(windows::Win32::Foundation::HANDLE);

impl Drop for FindHandle {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            unsafe {
                let _ = FindClose(self.0);
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  enumerate
//
//  Walks `dir`'s immediate children, allocating and submitting one job per
//  non-dot entry. See §4.3: the children_remaining increment always
//  precedes the push, preserving the happens-before relationship the
//  counter-walk depends on.
//
////////////////////////////////////////////////////////////////////////////////

pub fn enumerate(
    dir: &Arc<Node>,
    queue: &JobQueue,
    counters: &Counters,
    term: &TerminationSignal,
) {
    let pattern_wide: Vec<u16> = dir
        .path
        .as_os_str()
        .encode_wide()
        .chain([b'\\' as u16, b'*' as u16, 0])
        .collect();

    let mut wfd = WIN32_FIND_DATAW::default();
    let handle = unsafe { FindFirstFileW(PCWSTR(pattern_wide.as_ptr()), &mut wfd) };

    let handle = match handle {
        Ok(h) if !h.is_invalid() => h,
        Ok(h) => {
            // INVALID_HANDLE_VALUE with Ok(_) means "no matches" for an
            // otherwise valid search, which cannot occur for a `\*`
            // pattern on an openable directory; treat defensively as
            // enumeration failure.
            let _ = h;
            let code = unsafe { windows::Win32::Foundation::GetLastError() }.0;
            errors::report_enumeration_failure(counters, Operation::FindFirstFile, &dir.path, code);
            return;
        }
        Err(e) => {
            let code = e.code().0 as u32;
            errors::report_enumeration_failure(counters, Operation::FindFirstFile, &dir.path, code);
            return;
        }
    };

    let _guard = FindHandle(handle);

    loop {
        if !is_dot_entry(&wfd.cFileName) {
            submit_child(dir, &wfd, queue, counters, term);
        }

        if unsafe { FindNextFileW(handle, &mut wfd) }.is_err() {
            let code = unsafe { windows::Win32::Foundation::GetLastError() }.0;
            const ERROR_NO_MORE_FILES: u32 = 18;
            if code != ERROR_NO_MORE_FILES {
                errors::report_enumeration_failure(counters, Operation::FindNextFile, &dir.path, code);
            }
            break;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  submit_child
//
//  Allocate a node for one FindNextFileW result and push it to the job
//  queue, bumping `dir.children_remaining` before the push (I2 vs I4).
//
////////////////////////////////////////////////////////////////////////////////

fn submit_child(
    dir: &Arc<Node>,
    wfd: &WIN32_FIND_DATAW,
    queue: &JobQueue,
    counters: &Counters,
    term: &TerminationSignal,
) {
    let name_len = wfd.cFileName.iter().position(|&c| c == 0).unwrap_or(0);
    let name = std::ffi::OsString::from_wide(&wfd.cFileName[..name_len]);

    let child = match node::allocate(Some(Arc::clone(dir)), wfd.dwFileAttributes, &name, term) {
        Some(child) => child,
        None => return,
    };

    dir.children_remaining.fetch_add(1, Ordering::Relaxed);
    counters.queued.fetch_add(1, Ordering::Relaxed);
    queue.push(Job::Entry(child));
}

////////////////////////////////////////////////////////////////////////////////
//
//  is_dot_entry
//
//  True for "." and ".." only, identified purely by name per §4.3.
//
////////////////////////////////////////////////////////////////////////////////

fn is_dot_entry(name: &[u16; 260]) -> bool {
    let dot = name[0] == b'.' as u16 && name[1] == 0;
    let dotdot = name[0] == b'.' as u16 && name[1] == b'.' as u16 && name[2] == 0;
    dot || dotdot
}
