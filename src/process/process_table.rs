// SPDX-License-Identifier: MPL-2.0

//! A global table stores the pid to process mapping.
//! This table can be used to get a process with its pid.

use super::{Pid, Process};
use crate::prelude::*;

static PROCESS_TABLE: Mutex<BTreeMap<Pid, Arc<Process>>> = Mutex::new(BTreeMap::new());

/// Gets a process with pid
pub fn get_process(pid: Pid) -> Option<Arc<Process>> {
    PROCESS_TABLE.lock().get(&pid).cloned()
}

pub(crate) fn process_table_mut() -> MutexGuard<'static, BTreeMap<Pid, Arc<Process>>> {
    PROCESS_TABLE.lock()
}

pub(crate) fn remove_process(pid: Pid) {
    PROCESS_TABLE.lock().remove(&pid);
}

/// Returns the process with the smallest pid not below `pid`. This is the
/// cursor primitive behind the process-info stream.
pub(crate) fn next_process_from(pid: Pid) -> Option<Arc<Process>> {
    PROCESS_TABLE
        .lock()
        .range(pid..)
        .next()
        .map(|(_, process)| process.clone())
}

#[cfg(debug_assertions)]
pub(crate) fn is_empty() -> bool {
    PROCESS_TABLE.lock().is_empty()
}
