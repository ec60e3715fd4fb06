// SPDX-License-Identifier: MPL-2.0

use super::file_handle::FileLike;
use crate::{net::socket::Socket, prelude::*};

pub type FileDesc = i32;

/// The fixed width of a process's file-descriptor table.
pub const MAX_FILEID: usize = 16;

/// A process's file-descriptor table.
///
/// Entries share their stream objects by reference counting: inheriting the
/// table on exec clones every entry, and a stream is released when its last
/// entry anywhere goes away.
pub struct FileTable {
    table: [Option<Arc<dyn FileLike>>; MAX_FILEID],
}

impl FileTable {
    pub const fn new() -> Self {
        const VACANT: Option<Arc<dyn FileLike>> = None;
        Self {
            table: [VACANT; MAX_FILEID],
        }
    }

    fn check_fd(fd: FileDesc) -> Result<usize> {
        if fd < 0 || fd as usize >= MAX_FILEID {
            return_errno_with_message!(Errno::EBADF, "the file descriptor is out of range");
        }
        Ok(fd as usize)
    }

    fn lowest_free(&self) -> Option<usize> {
        self.table.iter().position(|entry| entry.is_none())
    }

    /// Installs `file` in the lowest free slot.
    pub fn insert(&mut self, file: Arc<dyn FileLike>) -> Result<FileDesc> {
        let fd = self
            .lowest_free()
            .ok_or_else(|| Error::with_message(Errno::EMFILE, "the file table is full"))?;
        self.table[fd] = Some(file);
        Ok(fd as FileDesc)
    }

    /// Atomically reserves two handles, e.g. for the two ends of a pipe.
    pub fn insert_pair(
        &mut self,
        first: Arc<dyn FileLike>,
        second: Arc<dyn FileLike>,
    ) -> Result<(FileDesc, FileDesc)> {
        let first_fd = self.insert(first)?;
        match self.insert(second) {
            Ok(second_fd) => Ok((first_fd, second_fd)),
            Err(err) => {
                self.table[first_fd as usize] = None;
                Err(err)
            }
        }
    }

    /// Duplicates `fd` into the slot `new_fd`, closing any previous
    /// occupant. Duplicating a descriptor onto itself is a no-op.
    pub fn dup(&mut self, fd: FileDesc, new_fd: FileDesc) -> Result<FileDesc> {
        let file = self.get_file(fd)?.clone();
        let new_idx = Self::check_fd(new_fd)?;
        if fd != new_fd {
            self.table[new_idx] = Some(file);
        }
        Ok(new_fd)
    }

    pub fn get_file(&self, fd: FileDesc) -> Result<&Arc<dyn FileLike>> {
        let idx = Self::check_fd(fd)?;
        self.table[idx]
            .as_ref()
            .ok_or_else(|| Error::with_message(Errno::EBADF, "the file descriptor is not open"))
    }

    pub fn get_socket(&self, sockfd: FileDesc) -> Result<Arc<dyn Socket>> {
        let file_like = self.get_file(sockfd)?.clone();
        file_like
            .as_socket()
            .ok_or_else(|| Error::with_message(Errno::ENOTSOCK, "the fd is not a socket"))
    }

    pub fn close_file(&mut self, fd: FileDesc) -> Option<Arc<dyn FileLike>> {
        let idx = Self::check_fd(fd).ok()?;
        self.table[idx].take()
    }

    pub fn close_all(&mut self) -> Vec<Arc<dyn FileLike>> {
        self.table.iter_mut().filter_map(Option::take).collect()
    }
}

impl Default for FileTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FileTable {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct DummyFile;
    impl FileLike for DummyFile {}

    #[test]
    fn insert_returns_lowest_free_fd() {
        let mut table = FileTable::new();
        assert_eq!(table.insert(Arc::new(DummyFile)).unwrap(), 0);
        assert_eq!(table.insert(Arc::new(DummyFile)).unwrap(), 1);
        table.close_file(0).unwrap();
        assert_eq!(table.insert(Arc::new(DummyFile)).unwrap(), 0);
    }

    #[test]
    fn table_width_is_fixed() {
        let mut table = FileTable::new();
        for _ in 0..MAX_FILEID {
            table.insert(Arc::new(DummyFile)).unwrap();
        }
        assert_eq!(
            table.insert(Arc::new(DummyFile)).unwrap_err().error(),
            Errno::EMFILE
        );
    }

    #[test]
    fn dup_closes_previous_occupant() {
        let mut table = FileTable::new();
        let fd = table.insert(Arc::new(DummyFile)).unwrap();
        let other = table.insert(Arc::new(DummyFile)).unwrap();
        assert_eq!(table.dup(fd, other).unwrap(), other);
        assert!(table.get_file(other).is_ok());
        assert_eq!(table.dup(fd, fd).unwrap(), fd);
        assert_eq!(
            table.dup(100, 0).unwrap_err().error(),
            Errno::EBADF
        );
    }
}
