// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::TaskFn,
    thread::{self, task, thread_table, Thread, Tid},
};

/// Creates a thread in the current process running `task` with a private
/// copy of `args`, and returns its tid.
pub fn sys_create_thread(task_fn: TaskFn, args: &[u8]) -> Result<Tid> {
    let current = current!();
    debug!("create thread in pid = {}, argl = {}", current.pid(), args.len());

    let thread = Thread::new(thread::allocate_tid(), Arc::downgrade(&current), false);
    current.add_thread(thread.clone());
    thread_table::add_thread(thread.clone());

    if let Err(err) = task::spawn(thread.clone(), task_fn, Arc::from(args)) {
        thread_table::remove_thread(thread.tid());
        current.remove_thread(thread.tid());
        return Err(err);
    }

    Ok(thread.tid())
}
