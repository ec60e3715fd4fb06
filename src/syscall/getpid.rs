// SPDX-License-Identifier: MPL-2.0

use crate::{prelude::*, process::Pid};

pub fn sys_getpid() -> Pid {
    current!().pid()
}
