// SPDX-License-Identifier: MPL-2.0

use super::Process;
use crate::{
    fs::file_table::FileTable,
    prelude::*,
    process::{Pid, TaskFn},
    thread::{self, thread_table, Thread},
};

/// The builder to build a new process.
pub struct ProcessBuilder {
    // The essential part
    pid: Pid,
    parent: Weak<Process>,

    // Optional part
    main_task: Option<TaskFn>,
    args: Vec<u8>,
    file_table: Option<FileTable>,
}

impl ProcessBuilder {
    pub fn new(pid: Pid, parent: Weak<Process>) -> Self {
        Self {
            pid,
            parent,
            main_task: None,
            args: Vec::new(),
            file_table: None,
        }
    }

    pub fn main_task(&mut self, main_task: Option<TaskFn>) -> &mut Self {
        self.main_task = main_task;
        self
    }

    /// Copies the arguments into storage owned by the new process.
    pub fn args(&mut self, args: &[u8]) -> &mut Self {
        self.args = args.to_vec();
        self
    }

    /// The file table the new process starts with, typically an inherited
    /// clone of its parent's.
    pub fn file_table(&mut self, file_table: FileTable) -> &mut Self {
        self.file_table = Some(file_table);
        self
    }

    pub fn build(self) -> Result<Arc<Process>> {
        let Self {
            pid,
            parent,
            main_task,
            args,
            file_table,
        } = self;

        let process = Arc::new(Process::new(
            pid,
            parent,
            main_task,
            Arc::from(args),
            file_table.unwrap_or_default(),
        ));

        if process.has_main_task() {
            let main_thread = Thread::new(
                thread::allocate_tid(),
                Arc::downgrade(&process),
                true,
            );
            process.add_thread(main_thread.clone());
            thread_table::add_thread(main_thread);
        }

        Ok(process)
    }
}
