// SPDX-License-Identifier: MPL-2.0

//! Scheduler-level execution of kernel tasks.
//!
//! Each kernel task runs on a host thread. The entry trampoline binds the
//! thread record as the current context, runs the task payload, and then
//! performs the exit path. Exiting is the last act of every thread, whether
//! the payload returned, exited explicitly, or panicked.

use std::cell::RefCell;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use super::{status::ThreadStatus, Thread};
use crate::{
    prelude::*,
    process::{self, ExitCode, TaskFn},
};

/// Exit value of a task that panicked instead of returning.
const PANICKED_EXIT_CODE: i32 = 101;

/// The unwind payload of an explicit thread exit.
struct ExitRequest(ExitCode);

/// Terminates the calling kernel task with `exit_code`.
///
/// Unwinds back to the entry trampoline, which then runs the exit path, so
/// no caller code after this call ever executes. Must be called on a kernel
/// task; the unwind is not resumable.
pub(crate) fn exit_current(exit_code: ExitCode) -> ! {
    // `resume_unwind` skips the panic hook: an explicit exit is not an error.
    resume_unwind(Box::new(ExitRequest(exit_code)))
}

thread_local! {
    static CURRENT_THREAD: RefCell<Option<Arc<Thread>>> = const { RefCell::new(None) };
}

pub(crate) fn current_thread() -> Option<Arc<Thread>> {
    CURRENT_THREAD.with(|current| current.borrow().clone())
}

/// Binds `thread` as the calling host thread's kernel context. Used by the
/// boot path, which turns the booting thread into the idle process's thread.
pub(crate) fn bind_current(thread: Arc<Thread>) {
    thread.set_status(ThreadStatus::Running);
    CURRENT_THREAD.with(|current| *current.borrow_mut() = Some(thread));
}

pub(crate) fn unbind_current() {
    CURRENT_THREAD.with(|current| current.borrow_mut().take());
}

/// Spawns a host thread running `task` under `thread`'s identity.
pub(crate) fn spawn(thread: Arc<Thread>, task: TaskFn, args: Arc<[u8]>) -> Result<()> {
    let name = format!("ktask-{}", thread.tid());
    std::thread::Builder::new()
        .name(name)
        .spawn(move || kernel_task_entry(thread, task, args))
        .map(|_| ())
        .map_err(|_| Error::with_message(Errno::EAGAIN, "failed to spawn a kernel task"))
}

fn kernel_task_entry(thread: Arc<Thread>, task: TaskFn, args: Arc<[u8]>) {
    bind_current(thread.clone());

    let result = catch_unwind(AssertUnwindSafe(move || task(&args)));
    let exit_code = match result {
        Ok(exit_code) => exit_code,
        Err(payload) => match payload.downcast::<ExitRequest>() {
            Ok(request) => request.0,
            Err(_) => {
                error!(
                    "task of thread {} panicked; exiting with status {}",
                    thread.tid(),
                    PANICKED_EXIT_CODE
                );
                PANICKED_EXIT_CODE
            }
        },
    };

    process::do_exit(&thread, exit_code);
    unbind_current();
}
