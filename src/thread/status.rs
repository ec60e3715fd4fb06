// SPDX-License-Identifier: MPL-2.0

use core::sync::atomic::{AtomicU8, Ordering};

/// The status of a thread record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadStatus {
    Init = 0,
    Running = 1,
    Exited = 2,
}

impl ThreadStatus {
    pub fn is_exited(&self) -> bool {
        *self == ThreadStatus::Exited
    }
}

/// An atomic cell holding a [`ThreadStatus`].
pub struct AtomicThreadStatus(AtomicU8);

impl AtomicThreadStatus {
    pub fn new(status: ThreadStatus) -> Self {
        Self(AtomicU8::new(status as u8))
    }

    pub fn load(&self, order: Ordering) -> ThreadStatus {
        match self.0.load(order) {
            0 => ThreadStatus::Init,
            1 => ThreadStatus::Running,
            2 => ThreadStatus::Exited,
            _ => unreachable!("invalid thread status"),
        }
    }

    pub fn store(&self, status: ThreadStatus, order: Ordering) {
        self.0.store(status as u8, order);
    }
}
