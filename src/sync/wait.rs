// SPDX-License-Identifier: MPL-2.0

use core::time::Duration;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

/// A wait queue.
///
/// One may wait on a wait queue to put its executing thread to sleep.
/// Multiple threads may be the waiters of a wait queue.
/// Other threads may invoke the `wake`-family methods of a wait queue to
/// wake up one or many waiter threads.
pub struct WaitQueue {
    lock: Mutex<()>,
    cond: Condvar,
}

impl WaitQueue {
    pub const fn new() -> Self {
        WaitQueue {
            lock: Mutex::new(()),
            cond: Condvar::new(),
        }
    }

    /// Wait until some condition becomes true.
    ///
    /// This method takes a closure that tests a user-given condition.
    /// The method only returns if the condition returns `Some(_)`.
    /// A waker thread should first make the condition `Some(_)`, then invoke
    /// a `wake`-family method. The wake methods take the queue lock, so a
    /// waiter can never miss a wakeup between testing the condition and
    /// going to sleep.
    pub fn wait_until<F, R>(&self, mut cond: F) -> R
    where
        F: FnMut() -> Option<R>,
    {
        if let Some(res) = cond() {
            return res;
        }

        let mut guard = self.lock.lock();
        loop {
            if let Some(res) = cond() {
                return res;
            }
            self.cond.wait(&mut guard);
        }
    }

    /// Wait until some condition becomes true or the timeout expires.
    ///
    /// Returns `None` if the timeout expired with the condition still
    /// untrue. The condition is tested one final time after the deadline
    /// passes, so a wakeup that races the timeout is never lost.
    pub fn wait_until_or_timeout<F, R>(&self, mut cond: F, timeout: &Duration) -> Option<R>
    where
        F: FnMut() -> Option<R>,
    {
        if let Some(res) = cond() {
            return Some(res);
        }

        let deadline = Instant::now() + *timeout;
        let mut guard = self.lock.lock();
        loop {
            if let Some(res) = cond() {
                return Some(res);
            }
            if self.cond.wait_until(&mut guard, deadline).timed_out() {
                return cond();
            }
        }
    }

    /// Wake up one waiting thread.
    pub fn wake_one(&self) {
        let _guard = self.lock.lock();
        self.cond.notify_one();
    }

    /// Wake up all waiting threads.
    pub fn wake_all(&self) {
        let _guard = self.lock.lock();
        self.cond.notify_all();
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::prelude::*;

    #[test]
    fn wait_until_sees_prior_state() {
        let queue = WaitQueue::new();
        assert_eq!(queue.wait_until(|| Some(7)), 7);
    }

    #[test]
    fn wakeup_is_not_lost() {
        let queue = Arc::new(WaitQueue::new());
        let ready = Arc::new(AtomicBool::new(false));

        let waker = {
            let queue = queue.clone();
            let ready = ready.clone();
            std::thread::spawn(move || {
                ready.store(true, Ordering::Release);
                queue.wake_all();
            })
        };

        queue.wait_until(|| ready.load(Ordering::Acquire).then_some(()));
        waker.join().unwrap();
    }

    #[test]
    fn timeout_expires() {
        let queue = WaitQueue::new();
        let res: Option<()> =
            queue.wait_until_or_timeout(|| None, &Duration::from_millis(10));
        assert!(res.is_none());
    }
}
