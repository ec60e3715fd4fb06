// SPDX-License-Identifier: MPL-2.0

//! Synchronization primitives shared by the whole kernel core.
//!
//! The lock types are re-exported so the rest of the crate is insulated from
//! the concrete lock implementation.

mod wait;

pub use parking_lot::{
    Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
pub use wait::WaitQueue;
