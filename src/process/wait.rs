// SPDX-License-Identifier: MPL-2.0

use super::{process_table, ExitCode, Pid, Process, ProcessFilter};
use crate::prelude::*;

/// Waits until a matching child of the current process exits, reaps it, and
/// returns its pid and exit value.
pub fn wait_child_exit(filter: ProcessFilter) -> Result<(Pid, ExitCode)> {
    wait_child_exit_of(&current!(), filter)
}

pub(crate) fn wait_child_exit_of(
    process: &Process,
    filter: ProcessFilter,
) -> Result<(Pid, ExitCode)> {
    // Fail fast when the awaited child cannot exist.
    match filter {
        ProcessFilter::Any => {
            if process.children().lock().is_empty() {
                return_errno_with_message!(Errno::ECHILD, "the process has no children");
            }
        }
        ProcessFilter::WithPid(pid) => {
            if !process.has_child(pid) {
                return_errno_with_message!(Errno::ECHILD, "the pid is not a child of the process");
            }
        }
    }

    // Finding and unlinking the zombie happens under the children lock, so
    // concurrent waiters can never reap the same child twice.
    let zombie = process.children_queue().wait_until(|| {
        let mut children = process.children().lock();
        let zombie_pid = match filter {
            ProcessFilter::Any => {
                if children.is_empty() {
                    return Some(Err(Error::with_message(
                        Errno::ECHILD,
                        "the children were reaped by a concurrent waiter",
                    )));
                }
                children
                    .values()
                    .find(|child| child.is_zombie())
                    .map(|child| child.pid())
            }
            ProcessFilter::WithPid(pid) => match children.get(&pid) {
                None => {
                    return Some(Err(Error::with_message(
                        Errno::ECHILD,
                        "the child was reaped by a concurrent waiter",
                    )))
                }
                Some(child) if child.is_zombie() => Some(pid),
                Some(_) => None,
            },
        }?;
        children.remove(&zombie_pid).map(Ok)
    })?;

    process_table::remove_process(zombie.pid());

    let exit_code = zombie.exit_code().unwrap_or(0);
    debug!("reaped child {} with exit code {}", zombie.pid(), exit_code);
    Ok((zombie.pid(), exit_code))
}
