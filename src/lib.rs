// SPDX-License-Identifier: MPL-2.0

//! The concurrency core and IPC fabric of a small Unix-like teaching kernel:
//! processes with threads, ref-counted stream handles, anonymous byte pipes,
//! and stream sockets that reuse pipes as their transport.
//!
//! The kernel is hosted: tasks are Rust closures running on scheduler-backed
//! threads, and every blocking operation suspends on a per-object
//! [`sync::WaitQueue`]. A kernel comes up with [`boot`], which runs the init
//! process (pid 1) and returns its exit value once every other process has
//! been drained:
//!
//! ```
//! use minos::syscall::*;
//!
//! let exit_code = minos::boot(
//!     Box::new(|_args| {
//!         let (read_fd, write_fd) = sys_pipe().unwrap();
//!         sys_write(write_fd, b"ping").unwrap();
//!         let mut buf = [0u8; 4];
//!         sys_read(read_fd, &mut buf).unwrap();
//!         0
//!     }),
//!     &[],
//! )
//! .unwrap();
//! assert_eq!(exit_code, 0);
//! ```

pub mod error;
pub mod fs;
pub mod net;
pub mod process;
pub mod sync;
pub mod syscall;
pub mod thread;

mod prelude;

pub use error::{Errno, Error};

pub type Result<T> = core::result::Result<T, Error>;

use process::{ExitCode, ProcessBuilder, ProcessFilter, TaskFn};
use std::sync::{Arc, Weak};

/// Serializes kernel lifetimes: at most one booted kernel exists at a time.
static BOOT_LOCK: sync::Mutex<()> = sync::Mutex::new(());

/// Boots the kernel and runs `init_task` as the init process (pid 1).
///
/// The calling thread becomes the idle process (pid 0) for the duration of
/// the boot: it backs the kernel context that execs and finally reaps init.
/// Init adopts every orphaned process and drains all of its children before
/// exiting, so when this function returns the kernel is fully torn down.
///
/// Returns init's exit value.
pub fn boot(init_task: TaskFn, args: &[u8]) -> Result<ExitCode> {
    let _boot_guard = BOOT_LOCK.lock();

    process::reset_pid_allocator();
    thread::reset_tid_allocator();

    // Bring up the idle process and bind the booting thread to it.
    let idle_process = {
        let mut process_table_mut = process::process_table::process_table_mut();
        let pid = process::allocate_pid();
        assert_eq!(pid, process::IDLE_PID, "pid 0 is not the idle process");
        let idle_process = ProcessBuilder::new(pid, Weak::new()).build()?;
        process_table_mut.insert(pid, idle_process.clone());
        idle_process
    };
    let idle_thread = thread::Thread::new(
        thread::allocate_tid(),
        Arc::downgrade(&idle_process),
        true,
    );
    idle_process.add_thread(idle_thread.clone());
    thread::thread_table::add_thread(idle_thread.clone());
    thread::task::bind_current(idle_thread.clone());

    let result = (|| {
        let init_pid = syscall::sys_exec(Some(init_task), args)?;
        debug_assert_eq!(init_pid, process::INIT_PID);

        let (_, exit_code) = syscall::sys_wait_child(ProcessFilter::WithPid(init_pid))?;
        Ok(exit_code)
    })();

    // Tear down the idle binding; nothing else survives init.
    thread::task::unbind_current();
    thread::thread_table::remove_thread(idle_thread.tid());
    idle_process.remove_thread(idle_thread.tid());
    process::process_table::remove_process(idle_process.pid());

    #[cfg(debug_assertions)]
    {
        debug_assert!(process::process_table::is_empty());
        debug_assert!(thread::thread_table::is_empty());
    }

    result
}
