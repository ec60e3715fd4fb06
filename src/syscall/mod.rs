// SPDX-License-Identifier: MPL-2.0

//! The system-call surface.
//!
//! Every operation the kernel core exposes lives here, one file per call.
//! Calls must run on a kernel task (a thread created through this surface or
//! the booting thread); fallible calls return a typed `Result` in place of
//! the C-style `-1` convention, and the exit calls never return at all.

mod accept;
mod close;
mod connect;
mod create_thread;
mod dup;
mod exec;
mod exit;
mod getpid;
mod getppid;
mod gettid;
mod listen;
mod open_info;
mod pipe;
mod read;
mod shutdown;
mod socket;
mod thread_detach;
mod thread_exit;
mod thread_join;
mod wait_child;
mod write;

pub use accept::sys_accept;
pub use close::sys_close;
pub use connect::sys_connect;
pub use create_thread::sys_create_thread;
pub use dup::sys_dup2;
pub use exec::sys_exec;
pub use exit::sys_exit;
pub use getpid::sys_getpid;
pub use getppid::sys_getppid;
pub use gettid::sys_gettid;
pub use listen::sys_listen;
pub use open_info::sys_open_info;
pub use pipe::sys_pipe;
pub use read::sys_read;
pub use shutdown::sys_shutdown;
pub use socket::sys_socket;
pub use thread_detach::sys_thread_detach;
pub use thread_exit::sys_thread_exit;
pub use thread_join::sys_thread_join;
pub use wait_child::sys_wait_child;
pub use write::sys_write;
