// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::ExitCode,
    thread::task,
};

/// Terminates the calling thread with `exit_code` at the call site; this
/// call never returns. Joiners observe the given value.
pub fn sys_thread_exit(exit_code: ExitCode) -> ! {
    debug!("exit_code = {}", exit_code);

    // Resolving the current thread first keeps the misuse failure mode (a
    // call from outside any kernel task) a plain panic instead of a stray
    // unwind.
    let _current_thread = current_thread!();
    task::exit_current(exit_code)
}
