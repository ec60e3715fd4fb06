// SPDX-License-Identifier: MPL-2.0

//! A global table stores the tid to thread mapping.
//!
//! Thread ids handed to userspace are keys into this table, never addresses;
//! a stale tid simply misses.

use super::{Thread, Tid};
use crate::prelude::*;

static THREAD_TABLE: Mutex<BTreeMap<Tid, Arc<Thread>>> = Mutex::new(BTreeMap::new());

pub fn add_thread(thread: Arc<Thread>) {
    let tid = thread.tid();
    THREAD_TABLE.lock().insert(tid, thread);
}

pub fn remove_thread(tid: Tid) {
    THREAD_TABLE.lock().remove(&tid);
}

pub fn get_thread(tid: Tid) -> Option<Arc<Thread>> {
    THREAD_TABLE.lock().get(&tid).cloned()
}

#[cfg(debug_assertions)]
pub(crate) fn is_empty() -> bool {
    THREAD_TABLE.lock().is_empty()
}
