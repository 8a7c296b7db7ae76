//! # Tick-Thread Scheduling
//!
//! The host advances worlds and writes to connections on one thread only.
//! [`TickScheduler`] is how this crate asks the host two things: "am I on
//! that thread?" and "run this there later".
//!
//! [`TaskQueue`] is the in-crate implementation: a multi-producer queue that
//! the tick thread drains once per tick.
//!
//! ```text
//! worker ──┐
//! worker ──┼──▶ crossbeam channel ──▶ tick thread: run_pending()
//! worker ──┘
//! ```

pub mod tick;

use std::thread::{self, ThreadId};

use crossbeam_channel::{Receiver, Sender, TrySendError};

pub use tick::{TickLoop, TickStats};

/// Work deferred to the tick thread.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Host scheduling capability.
pub trait TickScheduler: Send + Sync {
    /// Returns true if the caller is on the tick thread.
    fn is_tick_thread(&self) -> bool;

    /// Runs `task` on the tick thread at a later tick. Must not block.
    fn run_task(&self, task: Task);
}

/// Channel-backed scheduler bound to one thread.
#[derive(Clone)]
pub struct TaskQueue {
    tick_thread: ThreadId,
    sender: Sender<Task>,
    receiver: Receiver<Task>,
}

impl TaskQueue {
    /// Unbounded queue whose tick thread is the calling thread.
    #[must_use]
    pub fn bound_to_current() -> Self {
        Self::for_thread(thread::current().id(), None)
    }

    /// Queue for a specific tick thread. With a capacity, batches submitted
    /// while the queue is full are dropped.
    #[must_use]
    pub fn for_thread(tick_thread: ThreadId, capacity: Option<usize>) -> Self {
        let (sender, receiver) = match capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        Self { tick_thread, sender, receiver }
    }

    /// Id of the tick thread.
    #[must_use]
    pub fn tick_thread(&self) -> ThreadId {
        self.tick_thread
    }

    /// Tasks waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Runs every task queued so far and returns how many ran.
    ///
    /// Tasks queued while draining wait for the next call.
    pub fn run_pending(&self) -> usize {
        debug_assert!(self.is_tick_thread(), "run_pending called off the tick thread");
        let queued = self.receiver.len();
        let mut ran = 0;
        while ran < queued {
            let Ok(task) = self.receiver.try_recv() else { break };
            task();
            ran += 1;
        }
        ran
    }
}

impl TickScheduler for TaskQueue {
    fn is_tick_thread(&self) -> bool {
        thread::current().id() == self.tick_thread
    }

    fn run_task(&self, task: Task) {
        match self.sender.try_send(task) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(capacity = ?self.sender.capacity(), "tick queue full, batch dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("tick queue closed, batch dropped");
            }
        }
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("tick_thread", &self.tick_thread)
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_thread_identity() {
        let queue = TaskQueue::bound_to_current();
        assert!(queue.is_tick_thread());

        let remote = queue.clone();
        let on_tick = thread::spawn(move || remote.is_tick_thread()).join().unwrap();
        assert!(!on_tick);
    }

    #[test]
    fn test_tasks_run_in_order_on_drain() {
        let queue = TaskQueue::bound_to_current();
        let log = Arc::new(Mutex::new(Vec::new()));

        let worker_queue = queue.clone();
        let worker_log = Arc::clone(&log);
        thread::spawn(move || {
            for i in 0..5 {
                let log = Arc::clone(&worker_log);
                worker_queue.run_task(Box::new(move || log.lock().push(i)));
            }
        })
        .join()
        .unwrap();

        assert!(log.lock().is_empty());
        assert_eq!(queue.pending(), 5);
        assert_eq!(queue.run_pending(), 5);
        assert_eq!(*log.lock(), vec![0, 1, 2, 3, 4]);
        assert_eq!(queue.run_pending(), 0);
    }

    #[test]
    fn test_tasks_queued_while_draining_wait() {
        let queue = TaskQueue::bound_to_current();
        let inner = queue.clone();
        queue.run_task(Box::new(move || inner.run_task(Box::new(|| {}))));

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.run_pending(), 1);
    }

    #[test]
    fn test_full_queue_drops() {
        let queue = TaskQueue::for_thread(thread::current().id(), Some(1));
        queue.run_task(Box::new(|| {}));
        queue.run_task(Box::new(|| {}));
        assert_eq!(queue.pending(), 1);
    }
}
