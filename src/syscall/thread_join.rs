// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::ExitCode,
    thread::{thread_table, Tid},
};

/// Waits for a thread of the current process to exit and returns its exit
/// value. Fails on self-join, unknown tids, tids of other processes, and
/// detached targets.
pub fn sys_thread_join(tid: Tid) -> Result<ExitCode> {
    debug!("tid = {}", tid);

    let current_thread = current_thread!();
    if tid == current_thread.tid() {
        return_errno_with_message!(Errno::EDEADLK, "a thread cannot join itself");
    }

    let thread = thread_table::get_thread(tid)
        .ok_or_else(|| Error::with_message(Errno::ESRCH, "no thread to join"))?;

    let same_process = match (thread.process(), current_thread.process()) {
        (Some(target), Some(current)) => Arc::ptr_eq(&target, &current),
        _ => false,
    };
    if !same_process {
        return_errno_with_message!(Errno::ESRCH, "the thread belongs to another process");
    }

    thread.join()
}
