// SPDX-License-Identifier: MPL-2.0

//! A read-only snapshot stream over the process table.

use super::file_handle::FileLike;
use crate::{
    prelude::*,
    process::{process_table, Pid, Process},
};

/// How many leading argument bytes a process record carries.
pub const PROCINFO_MAX_ARGS_SIZE: usize = 128;

/// One snapshot record of a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcInfo {
    pub pid: Pid,
    pub ppid: Pid,
    pub is_alive: bool,
    pub has_main_task: bool,
    pub thread_count: u32,
    /// The full length of the argument buffer, which may exceed the
    /// `args` prefix carried here.
    pub args_len: u32,
    pub args: Vec<u8>,
}

impl ProcInfo {
    /// The wire size of one encoded record.
    pub const RECORD_SIZE: usize = 18 + PROCINFO_MAX_ARGS_SIZE;

    fn snapshot(process: &Arc<Process>) -> Self {
        let (args_len, args) = match process.args_snapshot() {
            Some(args) => {
                let prefix_len = args.len().min(PROCINFO_MAX_ARGS_SIZE);
                (args.len() as u32, args[..prefix_len].to_vec())
            }
            None => (0, Vec::new()),
        };

        Self {
            pid: process.pid(),
            ppid: process.parent().map(|parent| parent.pid()).unwrap_or(0),
            is_alive: !process.is_zombie(),
            has_main_task: process.has_main_task(),
            thread_count: process.live_thread_count() as u32,
            args_len,
            args,
        }
    }

    pub fn encode_into(&self, buf: &mut [u8]) {
        assert!(buf.len() >= Self::RECORD_SIZE);
        buf[0..4].copy_from_slice(&self.pid.to_le_bytes());
        buf[4..8].copy_from_slice(&self.ppid.to_le_bytes());
        buf[8] = self.is_alive as u8;
        buf[9] = self.has_main_task as u8;
        buf[10..14].copy_from_slice(&self.thread_count.to_le_bytes());
        buf[14..18].copy_from_slice(&self.args_len.to_le_bytes());
        buf[18..Self::RECORD_SIZE].fill(0);
        buf[18..18 + self.args.len()].copy_from_slice(&self.args);
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::RECORD_SIZE {
            return_errno_with_message!(Errno::EINVAL, "the buffer is too short for a record");
        }
        let pid = Pid::from_le_bytes(buf[0..4].try_into().unwrap());
        let ppid = Pid::from_le_bytes(buf[4..8].try_into().unwrap());
        let is_alive = buf[8] != 0;
        let has_main_task = buf[9] != 0;
        let thread_count = u32::from_le_bytes(buf[10..14].try_into().unwrap());
        let args_len = u32::from_le_bytes(buf[14..18].try_into().unwrap());
        let prefix_len = (args_len as usize).min(PROCINFO_MAX_ARGS_SIZE);
        let args = buf[18..18 + prefix_len].to_vec();
        Ok(Self {
            pid,
            ppid,
            is_alive,
            has_main_task,
            thread_count,
            args_len,
            args,
        })
    }
}

/// A cursor over the process table. Each `read` yields one encoded record
/// and advances past vacant pids; a read past the last process returns 0.
pub struct ProcInfoStream {
    cursor: Mutex<Pid>,
}

impl ProcInfoStream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            cursor: Mutex::new(0),
        })
    }

    fn next_record(&self) -> Option<ProcInfo> {
        let mut cursor = self.cursor.lock();
        let process = process_table::next_process_from(*cursor)?;
        *cursor = process.pid() + 1;
        Some(ProcInfo::snapshot(&process))
    }
}

impl FileLike for ProcInfoStream {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < ProcInfo::RECORD_SIZE {
            return_errno_with_message!(Errno::EINVAL, "the buffer cannot hold a process record");
        }
        match self.next_record() {
            Some(record) => {
                record.encode_into(buf);
                Ok(ProcInfo::RECORD_SIZE)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_roundtrip() {
        let record = ProcInfo {
            pid: 7,
            ppid: 1,
            is_alive: true,
            has_main_task: true,
            thread_count: 3,
            args_len: 5,
            args: b"hello".to_vec(),
        };

        let mut buf = [0u8; ProcInfo::RECORD_SIZE];
        record.encode_into(&mut buf);
        assert_eq!(ProcInfo::decode(&buf).unwrap(), record);
    }

    #[test]
    fn args_prefix_is_bounded() {
        let record = ProcInfo {
            pid: 2,
            ppid: 1,
            is_alive: false,
            has_main_task: false,
            thread_count: 0,
            args_len: 1000,
            args: vec![9; PROCINFO_MAX_ARGS_SIZE],
        };

        let mut buf = [0u8; ProcInfo::RECORD_SIZE];
        record.encode_into(&mut buf);
        let decoded = ProcInfo::decode(&buf).unwrap();
        assert_eq!(decoded.args_len, 1000);
        assert_eq!(decoded.args.len(), PROCINFO_MAX_ARGS_SIZE);
    }
}
