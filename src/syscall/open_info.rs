// SPDX-License-Identifier: MPL-2.0

use crate::{
    fs::{file_table::FileDesc, procinfo::ProcInfoStream},
    prelude::*,
};

/// Opens a read-only snapshot stream over the process table.
pub fn sys_open_info() -> Result<FileDesc> {
    let stream = ProcInfoStream::new();
    current!().file_table().lock().insert(stream)
}
