// SPDX-License-Identifier: MPL-2.0

use crate::{
    prelude::*,
    process::{wait_child_exit, ExitCode, Pid, ProcessFilter},
};

/// Waits for a matching child to exit and reaps it, returning its pid and
/// exit value.
pub fn sys_wait_child(filter: ProcessFilter) -> Result<(Pid, ExitCode)> {
    debug!("filter = {:?}", filter);

    wait_child_exit(filter)
}
