// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    thread::{thread_table, Tid},
};

/// Detaches a thread of the current process, waking (and failing) all of its
/// current joiners. Fails if the thread has already exited.
pub fn sys_thread_detach(tid: Tid) -> Result<()> {
    debug!("tid = {}", tid);

    let current_thread = current_thread!();
    let thread = thread_table::get_thread(tid)
        .ok_or_else(|| Error::with_message(Errno::ESRCH, "no thread to detach"))?;

    let same_process = match (thread.process(), current_thread.process()) {
        (Some(target), Some(current)) => Arc::ptr_eq(&target, &current),
        _ => false,
    };
    if !same_process {
        return_errno_with_message!(Errno::ESRCH, "the thread belongs to another process");
    }

    thread.detach()
}
