// counters.rs — Counter bank
//
// Four atomics used only for progress reporting and the final exit status:
// queued (rises on push, falls on pop — tracks queue depth), enumerating
// (directories currently being walked by the enumerator), failed and
// deleted (cumulative, used for the exit code and the final status line).
// The supervisor reads these with relaxed ordering; they carry no
// synchronization responsibility of their own — happens-before is
// established by the job queue's mutex and by children_remaining.

use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct Counters {
    pub queued: AtomicI64,
    pub enumerating: AtomicI64,
    pub failed: AtomicI64,
    pub deleted: AtomicI64,
    /// Governor shared by both delete failures and enumeration failures
    /// (P5: at most ERROR_FAILED_REPORT_LIMIT structured lines in total).
    /// Kept separate from `failed` itself: an enumeration failure does not
    /// bump `failed` (a directory that fails to enumerate will separately
    /// fail to be removed once its counter-walk reaches it, which is where
    /// its own `failed` increment belongs), but it still spends from the
    /// same report budget so the two paths together can never exceed the
    /// limit.
    reported: AtomicI64,
}

/// Bound on how many structured error lines (delete failures and
/// enumeration failures combined) are printed in one run; failures past
/// this limit are still tallied (`failed`, for delete failures) but
/// printed silently.
pub const ERROR_FAILED_REPORT_LIMIT: i64 = 10;

impl Counters {
    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new() -> Self {
        Self::default()
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  snapshot
    //
    //  Relaxed read of all four counters for a status line.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            queued: self.queued.load(Ordering::Relaxed),
            enumerating: self.enumerating.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  record_failure
    //
    //  Increments `failed` and returns whether this particular failure is
    //  still under the shared structured-error-line report limit (P5).
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn record_failure(&self) -> bool {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.spend_report_budget()
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  record_enumeration_error
    //
    //  Returns whether this enumeration error is still under the shared
    //  report limit. Does not touch `failed` — see field comment on
    //  `reported`.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn record_enumeration_error(&self) -> bool {
        self.spend_report_budget()
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  spend_report_budget
    //
    //  Single shared governor for both call sites above, so that delete
    //  failures and enumeration failures together never emit more than
    //  ERROR_FAILED_REPORT_LIMIT structured lines (P5).
    //
    ////////////////////////////////////////////////////////////////////////////

    fn spend_report_budget(&self) -> bool {
        let prev = self.reported.fetch_add(1, Ordering::Relaxed);
        prev + 1 <= ERROR_FAILED_REPORT_LIMIT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub queued: i64,
    pub enumerating: i64,
    pub failed: i64,
    pub deleted: i64,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deleted={} queued={} enumerating={} failed={}",
            self.deleted, self.queued, self.enumerating, self.failed
        )
    }
}
