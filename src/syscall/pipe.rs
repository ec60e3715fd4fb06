// SPDX-License-Identifier: MPL-2.0

use crate::{
    fs::{self, file_table::FileDesc},
    prelude::*,
};

/// Creates a pipe and returns its (read end, write end) descriptors, both
/// reserved atomically.
pub fn sys_pipe() -> Result<(FileDesc, FileDesc)> {
    let (pipe_reader, pipe_writer) = fs::pipe::new_pair()?;

    let current = current!();
    let mut file_table = current.file_table().lock();
    let pipe_fds = file_table.insert_pair(pipe_reader, pipe_writer)?;
    debug!("pipe fds: {:?}", pipe_fds);

    Ok(pipe_fds)
}
