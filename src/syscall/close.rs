// SPDX-License-Identifier: MPL-2.0

use crate::{fs::file_table::FileDesc, prelude::*};

pub fn sys_close(fd: FileDesc) -> Result<()> {
    debug!("fd = {}", fd);

    let file = current!()
        .file_table()
        .lock()
        .close_file(fd)
        .ok_or_else(|| Error::with_message(Errno::EBADF, "the file descriptor is not open"))?;
    drop(file);
    Ok(())
}
