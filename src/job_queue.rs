// job_queue.rs — Thread-safe MPMC job queue with a distinguished terminator
//
// Port of: relmer/RCDir's work_queue.rs (Mutex<VecDeque> + Condvar), adapted
// for the engine's shutdown model: rather than a single "done" flag that
// closes the queue, the supervisor pushes exactly one `Terminator` per
// worker, and `pop` never returns early — it always yields a Job. The
// `queued` counter mandated by §4.2 lives in counters.rs, incremented by
// every producer before push and decremented by every consumer right after
// pop (see worker.rs and supervisor.rs).

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

use crate::node::Node;

/// A job handed to a worker: either a node to process, or the sentinel that
/// tells the worker to exit its main loop.
pub enum Job {
    Entry(Arc<Node>),
    Terminator,
}

/// Thread-safe FIFO job queue.
pub struct JobQueue {
    inner: Mutex<VecDeque<Job>>,
    cv: Condvar,
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue {
    ////////////////////////////////////////////////////////////////////////////
    //
    //  new
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn new() -> Self {
        JobQueue {
            inner: Mutex::new(VecDeque::new()),
            cv: Condvar::new(),
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  push
    //
    //  Non-blocking; wakes one waiting consumer.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn push(&self, item: Job) {
        let mut inner = self.inner.lock().unwrap();
        inner.push_back(item);
        self.cv.notify_one();
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  pop
    //
    //  Blocks until an item is available.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn pop(&self) -> Job {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(item) = inner.pop_front() {
                return item;
            }
            inner = self.cv.wait(inner).unwrap();
        }
    }
}
