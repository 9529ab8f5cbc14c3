// supervisor.rs — Single-threaded orchestrator
//
// Port of: relmer/RCDir's main.rs thread-spawning and join sequence,
// adapted to §4.5: seed the root, spawn THREADS workers, poll the
// termination signal on a REPORT_PERIOD_MS cadence emitting status lines,
// then broadcast shutdown and join with a bounded per-worker wait.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::config::Config;
use crate::counters::Counters;
use crate::ehm::AppError;
use crate::job_queue::{Job, JobQueue};
use crate::node;
use crate::termination::TerminationSignal;
use crate::worker;

/// Bounded wait per worker at shutdown; a worker that has not joined by
/// then is abandoned rather than risking a hang of the whole process.
const WORKER_JOIN_TIMEOUT: Duration = Duration::from_millis(500);

pub struct RunOutcome {
    pub snapshot: crate::counters::Snapshot,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.snapshot.failed == 0
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  run
//
//  Deletes the tree rooted at `root_path` per the full sequence in §4.5.
//  Returns the final counter snapshot on success, or an AppError for a
//  startup failure (root missing, root attribute query failed, or root
//  allocation failed).
//
////////////////////////////////////////////////////////////////////////////////

pub fn run(root_path: &Path, config: Config, quiet: bool) -> Result<RunOutcome, AppError> {
    let attributes = query_attributes(root_path)?;

    let term = Arc::new(TerminationSignal::new());
    let queue = Arc::new(JobQueue::new());
    let counters = Arc::new(Counters::new());

    let root = node::allocate(None, attributes, OsStr::new(root_path.as_os_str()), &term)
        .ok_or_else(|| AppError::AllocationFailed(root_path.to_path_buf()))?;

    counters.queued.fetch_add(1, Ordering::Relaxed);
    queue.push(Job::Entry(root));

    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let counters = Arc::clone(&counters);
            let term = Arc::clone(&term);
            std::thread::spawn(move || worker::run(&queue, &counters, &term))
        })
        .collect();

    let period = Duration::from_millis(config.report_period_ms as u64);
    loop {
        if term.wait_timeout(period) {
            break;
        }
        if !quiet {
            eprintln!("{}", counters.snapshot());
        }
    }

    for _ in 0..handles.len() {
        counters.queued.fetch_add(1, Ordering::Relaxed);
        queue.push(Job::Terminator);
    }

    join_with_timeout(handles, WORKER_JOIN_TIMEOUT);

    let snapshot = counters.snapshot();
    eprintln!("{snapshot}");

    Ok(RunOutcome { snapshot })
}

////////////////////////////////////////////////////////////////////////////////
//
//  query_attributes
//
//  Validates that `path` exists and returns its Win32 attribute bitmask.
//
////////////////////////////////////////////////////////////////////////////////

fn query_attributes(path: &Path) -> Result<u32, AppError> {
    use windows::Win32::Storage::FileSystem::GetFileAttributesW;
    use windows::core::PCWSTR;
    use std::os::windows::ffi::OsStrExt;

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
    let attrs = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };

    const INVALID_FILE_ATTRIBUTES: u32 = u32::MAX;
    if attrs == INVALID_FILE_ATTRIBUTES {
        return Err(AppError::PathNotFound(path.to_path_buf()));
    }

    Ok(attrs)
}

////////////////////////////////////////////////////////////////////////////////
//
//  join_with_timeout
//
//  Joins each worker handle with a bounded wait. The standard library has
//  no join-with-timeout primitive, so each join runs on its own watchdog
//  thread and we wait on that instead; a worker that does not finish in
//  time is abandoned (its OS thread keeps running detached).
//
////////////////////////////////////////////////////////////////////////////////

fn join_with_timeout(handles: Vec<std::thread::JoinHandle<()>>, timeout: Duration) {
    let waiters: Vec<_> = handles
        .into_iter()
        .map(|h| {
            std::thread::spawn(move || {
                let _ = h.join();
            })
        })
        .collect();

    for w in waiters {
        let start = std::time::Instant::now();
        while !w.is_finished() && start.elapsed() < timeout {
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
