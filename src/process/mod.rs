// SPDX-License-Identifier: MPL-2.0

//! Process management.

use core::sync::atomic::{AtomicU32, Ordering};

mod exit;
mod process;
mod process_filter;
pub mod process_table;
mod status;
mod wait;

pub use process::{current, Process, ProcessBuilder};
pub use process_filter::ProcessFilter;
pub use status::ProcessStatus;
pub use wait::wait_child_exit;

pub(crate) use exit::do_exit;

/// Process id.
pub type Pid = u32;

pub type ExitCode = i32;

/// The body of a task: runs with the arguments that were copied in at
/// creation time and returns the exit value.
pub type TaskFn = Box<dyn FnOnce(&[u8]) -> ExitCode + Send + 'static>;

/// The upper bound on concurrently existing processes.
pub const MAX_PROC: usize = 65536;

/// The idle process; it exists for the whole life of the kernel and backs
/// the booting thread.
pub const IDLE_PID: Pid = 0;

/// The init process; orphaned processes are re-parented to it.
pub const INIT_PID: Pid = 1;

static PID_ALLOCATOR: AtomicU32 = AtomicU32::new(0);

/// Allocates a pid for a new process.
pub(crate) fn allocate_pid() -> Pid {
    PID_ALLOCATOR.fetch_add(1, Ordering::SeqCst)
}

/// Restarts pid allocation. Only the boot path may call this, with no other
/// kernel threads running.
pub(crate) fn reset_pid_allocator() {
    PID_ALLOCATOR.store(0, Ordering::SeqCst);
}
