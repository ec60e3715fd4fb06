// SPDX-License-Identifier: MPL-2.0

use crate::{prelude::*, process::Pid};

/// Returns the parent's pid, or 0 for a process with no parent.
pub fn sys_getppid() -> Pid {
    current!().parent().map(|parent| parent.pid()).unwrap_or(0)
}
