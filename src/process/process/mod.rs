// SPDX-License-Identifier: MPL-2.0

use super::{status::ProcessStatus, ExitCode, Pid, TaskFn};
use crate::{
    fs::file_table::FileTable,
    prelude::*,
    thread::{Thread, Tid},
};

mod builder;

pub use builder::ProcessBuilder;

/// Process stands for a set of threads that share the same identity,
/// parent/child relations, and file-descriptor table.
pub struct Process {
    // Immutable part
    pid: Pid,
    has_main_task: bool,

    // Mutable part
    /// The not-yet-started main task; taken when the process is run.
    main_task: Mutex<Option<TaskFn>>,
    /// Main-task arguments; released when the process exits.
    args: Mutex<Option<Arc<[u8]>>>,
    /// The thread records, live and not-yet-reaped.
    threads: Mutex<Vec<Arc<Thread>>>,
    /// Process status
    status: Mutex<ProcessStatus>,
    /// The exit value recorded by `Exit` or by the main task's return.
    recorded_exit: Mutex<Option<ExitCode>>,
    /// Parent process
    parent: Mutex<Weak<Process>>,
    /// Children processes
    children: Mutex<BTreeMap<Pid, Arc<Process>>>,
    /// Wakes the parent blocked in `wait_child` when a child exits.
    children_queue: WaitQueue,
    /// File table
    file_table: Mutex<FileTable>,
}

impl Process {
    fn new(
        pid: Pid,
        parent: Weak<Process>,
        main_task: Option<TaskFn>,
        args: Arc<[u8]>,
        file_table: FileTable,
    ) -> Self {
        Self {
            pid,
            has_main_task: main_task.is_some(),
            main_task: Mutex::new(main_task),
            args: Mutex::new(Some(args)),
            threads: Mutex::new(Vec::new()),
            status: Mutex::new(ProcessStatus::Runnable),
            recorded_exit: Mutex::new(None),
            parent: Mutex::new(parent),
            children: Mutex::new(BTreeMap::new()),
            children_queue: WaitQueue::new(),
            file_table: Mutex::new(file_table),
        }
    }

    // *********** Basic structures ***********

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub(crate) fn has_main_task(&self) -> bool {
        self.has_main_task
    }

    pub(crate) fn threads(&self) -> &Mutex<Vec<Arc<Thread>>> {
        &self.threads
    }

    pub fn main_thread(&self) -> Option<Arc<Thread>> {
        self.threads
            .lock()
            .iter()
            .find(|thread| thread.is_main())
            .cloned()
    }

    /// Counts the threads that have not exited.
    pub fn live_thread_count(&self) -> usize {
        self.threads
            .lock()
            .iter()
            .filter(|thread| !thread.status().is_exited())
            .count()
    }

    pub(crate) fn add_thread(&self, thread: Arc<Thread>) {
        self.threads.lock().push(thread);
    }

    pub(crate) fn remove_thread(&self, tid: Tid) {
        self.threads.lock().retain(|thread| thread.tid() != tid);
    }

    // *********** Parent and child ***********

    pub fn parent(&self) -> Option<Arc<Process>> {
        self.parent.lock().upgrade()
    }

    pub(crate) fn set_parent(&self, parent: Weak<Process>) {
        *self.parent.lock() = parent;
    }

    pub(crate) fn children(&self) -> &Mutex<BTreeMap<Pid, Arc<Process>>> {
        &self.children
    }

    pub fn has_child(&self, pid: Pid) -> bool {
        self.children.lock().contains_key(&pid)
    }

    pub(crate) fn children_queue(&self) -> &WaitQueue {
        &self.children_queue
    }

    // ************** File table ****************

    pub fn file_table(&self) -> &Mutex<FileTable> {
        &self.file_table
    }

    // ************** Arguments *****************

    pub(crate) fn args_snapshot(&self) -> Option<Arc<[u8]>> {
        self.args.lock().clone()
    }

    pub(crate) fn release_args(&self) {
        self.args.lock().take();
    }

    // ******************* Status ********************

    pub fn is_zombie(&self) -> bool {
        self.status.lock().is_zombie()
    }

    pub(crate) fn set_zombie(&self, exit_code: ExitCode) {
        *self.status.lock() = ProcessStatus::Zombie(exit_code);
    }

    /// Returns the exit value, or `None` while the process is runnable.
    pub fn exit_code(&self) -> Option<ExitCode> {
        self.status.lock().exit_code()
    }

    /// Records the value the process will publish when it becomes a zombie.
    /// The last writer wins, matching repeated `Exit` calls.
    pub(crate) fn record_exit_code(&self, exit_code: ExitCode) {
        *self.recorded_exit.lock() = Some(exit_code);
    }

    pub(crate) fn recorded_exit_code(&self) -> Option<ExitCode> {
        *self.recorded_exit.lock()
    }

    /// Starts the main task, or finalizes the process right away if it has
    /// none: a taskless process has nothing that could ever exit it.
    pub(crate) fn run(&self) -> Result<()> {
        let main_task = self.main_task.lock().take();
        let Some(main_task) = main_task else {
            super::exit::exit_process(self);
            return Ok(());
        };

        let main_thread = self
            .main_thread()
            .expect("a process with a main task must have a main thread");
        let args = self
            .args_snapshot()
            .unwrap_or_else(|| Arc::from(&[] as &[u8]));

        if let Err(err) = crate::thread::task::spawn(main_thread.clone(), main_task, args) {
            crate::thread::thread_table::remove_thread(main_thread.tid());
            self.threads.lock().clear();
            return Err(err);
        }
        Ok(())
    }
}

pub fn current() -> Arc<Process> {
    let current_thread = current_thread!();
    current_thread
        .process()
        .expect("[Internal error] the current thread does not belong to a process")
}
