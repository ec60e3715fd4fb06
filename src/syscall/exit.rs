// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::ExitCode,
    thread::task,
};

/// Records `exit_code` as the process exit value and terminates the calling
/// thread at the call site; this call never returns. The process becomes a
/// zombie once its last thread has exited.
pub fn sys_exit(exit_code: ExitCode) -> ! {
    debug!("exit_code = {}", exit_code);

    let current_thread = current_thread!();
    if let Some(process) = current_thread.process() {
        process.record_exit_code(exit_code);
    }
    task::exit_current(exit_code)
}
