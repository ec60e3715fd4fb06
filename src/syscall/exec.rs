// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::{self, process_table, Pid, ProcessBuilder, TaskFn, MAX_PROC},
};

/// Creates a child process of the caller running `task` with a private copy
/// of `args`, inheriting the caller's file table. With no task the child is
/// born an exit-value-0 zombie, awaiting reaping.
pub fn sys_exec(task: Option<TaskFn>, args: &[u8]) -> Result<Pid> {
    let current = current!();
    debug!("exec from pid = {}, argl = {}", current.pid(), args.len());

    let new_process = {
        let mut process_table_mut = process_table::process_table_mut();
        if process_table_mut.len() >= MAX_PROC {
            return_errno_with_message!(Errno::EAGAIN, "the process table is full");
        }

        let pid = process::allocate_pid();
        let mut builder = ProcessBuilder::new(pid, Arc::downgrade(&current));
        builder
            .main_task(task)
            .args(args)
            .file_table(current.file_table().lock().clone());
        let new_process = builder.build()?;

        process_table_mut.insert(pid, new_process.clone());
        new_process
    };

    current
        .children()
        .lock()
        .insert(new_process.pid(), new_process.clone());

    if let Err(err) = new_process.run() {
        current.children().lock().remove(&new_process.pid());
        process_table::remove_process(new_process.pid());
        return Err(err);
    }

    Ok(new_process.pid())
}
