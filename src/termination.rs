// termination.rs — One-shot termination latch
//
// A settable-once event the supervisor waits on with a timeout (for
// periodic status reporting) and that the node allocator and the
// counter-walk may also raise: by the allocator on out-of-memory, and by
// the counter-walk when it decrements a null parent (the root has
// finished). Raising it more than once is a harmless no-op.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

pub struct TerminationSignal {
    raised: Mutex<bool>,
    cv: Condvar,
}

impl Default for TerminationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminationSignal {
    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new() -> Self {
        TerminationSignal {
            raised: Mutex::new(false),
            cv: Condvar::new(),
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  raise
    //
    //  Set the latch and wake anyone waiting on it. Idempotent.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn raise(&self) {
        let mut raised = self.raised.lock().unwrap();
        *raised = true;
        self.cv.notify_all();
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  is_raised
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn is_raised(&self) -> bool {
        *self.raised.lock().unwrap()
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  wait_timeout
    //
    //  Block until the latch is raised or `timeout` elapses. Returns true
    //  if raised, false on timeout — the supervisor uses a false return to
    //  decide "emit a status line and wait again".
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let raised = self.raised.lock().unwrap();
        if *raised {
            return true;
        }
        let (guard, _result) = self.cv.wait_timeout(raised, timeout).unwrap();
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    ////////////////////////////////////////////////////////////////////////////
    //
    //  starts_unraised
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn starts_unraised() {
        let sig = TerminationSignal::new();
        assert!(!sig.is_raised());
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  raise_is_observed
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn raise_is_observed() {
        let sig = TerminationSignal::new();
        sig.raise();
        assert!(sig.is_raised());
        assert!(sig.wait_timeout(Duration::from_millis(1)));
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  wait_timeout_elapses_when_unraised
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn wait_timeout_elapses_when_unraised() {
        let sig = TerminationSignal::new();
        assert!(!sig.wait_timeout(Duration::from_millis(10)));
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  raise_from_other_thread_wakes_waiter
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn raise_from_other_thread_wakes_waiter() {
        let sig = Arc::new(TerminationSignal::new());
        let sig2 = Arc::clone(&sig);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sig2.raise();
        });

        let woke = sig.wait_timeout(Duration::from_secs(5));
        assert!(woke);
        handle.join().unwrap();
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  raise_is_idempotent
    //
    ////////////////////////////////////////////////////////////////////////////

    #[test]
    fn raise_is_idempotent() {
        let sig = TerminationSignal::new();
        sig.raise();
        sig.raise();
        assert!(sig.is_raised());
    }
}
