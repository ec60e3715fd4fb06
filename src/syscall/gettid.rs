// SPDX-License-Identifier: MPL-2.0

use crate::{prelude::*, thread::Tid};

pub fn sys_gettid() -> Tid {
    current_thread!().tid()
}
