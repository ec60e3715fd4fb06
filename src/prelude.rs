// SPDX-License-Identifier: MPL-2.0

#![allow(unused)]

pub(crate) use std::{
    any::Any,
    collections::{BTreeMap, VecDeque},
    fmt::Debug,
    sync::{Arc, Weak},
};

pub(crate) use bitflags::bitflags;
pub(crate) use log::{debug, error, info, trace, warn};

pub(crate) use crate::sync::{Mutex, MutexGuard, RwLock, WaitQueue};

/// return current process
#[macro_export]
macro_rules! current {
    () => {
        $crate::process::current()
    };
}

/// return current thread
#[macro_export]
macro_rules! current_thread {
    () => {
        $crate::thread::Thread::current()
    };
}

pub(crate) use crate::{
    current, current_thread,
    error::{Errno, Error},
};
pub(crate) type Result<T> = core::result::Result<T, Error>;
pub(crate) use crate::{return_errno, return_errno_with_message};
