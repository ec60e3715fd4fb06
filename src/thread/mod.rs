// SPDX-License-Identifier: MPL-2.0

//! Kernel thread records.
//!
//! A [`Thread`] is the kernel-side record of one thread of a process: its
//! joinable/detached state, its exit value, and the wait queue its joiners
//! block on. The scheduler-level execution context behind it is a host
//! thread, managed by the [`task`] module.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use self::status::{AtomicThreadStatus, ThreadStatus};
use crate::{
    prelude::*,
    process::{ExitCode, Process},
};

pub mod status;
pub mod task;
pub mod thread_table;

pub type Tid = u32;

static TID_ALLOCATOR: AtomicU32 = AtomicU32::new(0);

/// Allocates a new tid for a new thread.
pub(crate) fn allocate_tid() -> Tid {
    TID_ALLOCATOR.fetch_add(1, Ordering::SeqCst)
}

/// Restarts tid allocation. Only the boot path may call this, with no other
/// kernel threads running.
pub(crate) fn reset_tid_allocator() {
    TID_ALLOCATOR.store(0, Ordering::SeqCst);
}

/// A thread record.
///
/// The record outlives the execution of its task: a joinable thread that has
/// exited stays in the thread table (and in its process's thread list) until
/// the last joiner has observed the exit value, so a tid can never
/// dereference freed state.
pub struct Thread {
    // immutable part
    tid: Tid,
    process: Weak<Process>,
    is_main: bool,

    // mutable part
    status: AtomicThreadStatus,
    detached: AtomicBool,
    joiners: AtomicU32,
    exit_code: Mutex<Option<ExitCode>>,
    exited_queue: WaitQueue,
}

impl Thread {
    pub(crate) fn new(tid: Tid, process: Weak<Process>, is_main: bool) -> Arc<Self> {
        Arc::new(Thread {
            tid,
            process,
            is_main,
            status: AtomicThreadStatus::new(ThreadStatus::Init),
            detached: AtomicBool::new(false),
            joiners: AtomicU32::new(0),
            exit_code: Mutex::new(None),
            exited_queue: WaitQueue::new(),
        })
    }

    /// Returns the record of the calling thread.
    ///
    /// # Panics
    ///
    /// Panics if the calling thread is not a kernel task.
    pub fn current() -> Arc<Self> {
        task::current_thread().expect("the calling thread is not a kernel task")
    }

    pub fn tid(&self) -> Tid {
        self.tid
    }

    pub fn process(&self) -> Option<Arc<Process>> {
        self.process.upgrade()
    }

    pub(crate) fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn status(&self) -> ThreadStatus {
        self.status.load(Ordering::Acquire)
    }

    pub(crate) fn set_status(&self, status: ThreadStatus) {
        self.status.store(status, Ordering::Release);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    /// Returns the exit value, or `None` if the thread has not exited.
    pub fn exit_code(&self) -> Option<ExitCode> {
        *self.exit_code.lock()
    }

    pub(crate) fn exited_queue(&self) -> &WaitQueue {
        &self.exited_queue
    }

    /// Freezes the exit value. Must happen before the status flips to
    /// `Exited` so that a woken joiner always finds it.
    pub(crate) fn publish_exit(&self, exit_code: ExitCode) {
        *self.exit_code.lock() = Some(exit_code);
    }

    /// Waits for the thread to exit and returns its exit value.
    ///
    /// Many threads may join the same target concurrently; each of them
    /// observes the exit value, and the last one to leave reaps the record.
    /// Joining a detached target, or a target that is detached while being
    /// joined, fails.
    pub fn join(&self) -> Result<ExitCode> {
        if self.is_detached() {
            return_errno_with_message!(Errno::EINVAL, "cannot join a detached thread");
        }

        self.joiners.fetch_add(1, Ordering::SeqCst);
        let res = self.exited_queue.wait_until(|| {
            if self.is_detached() {
                return Some(Err(Error::with_message(
                    Errno::EINVAL,
                    "the thread was detached while being joined",
                )));
            }
            self.exit_code().map(Ok)
        });

        let is_last_joiner = self.joiners.fetch_sub(1, Ordering::SeqCst) == 1;
        if is_last_joiner && res.is_ok() {
            thread_table::remove_thread(self.tid);
            if let Some(process) = self.process() {
                process.remove_thread(self.tid);
            }
        }

        res
    }

    /// Marks the thread detached and wakes all current joiners, which then
    /// observe the detach and fail. Detaching is monotonic; detaching an
    /// already-detached thread succeeds. Detaching an exited thread fails.
    pub fn detach(&self) -> Result<()> {
        {
            let exit_code = self.exit_code.lock();
            if exit_code.is_some() {
                return_errno_with_message!(Errno::EINVAL, "cannot detach an exited thread");
            }
            self.detached.store(true, Ordering::Release);
        }
        self.exited_queue.wake_all();
        Ok(())
    }

    pub fn yield_now() {
        std::thread::yield_now()
    }
}
