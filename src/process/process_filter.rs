// SPDX-License-Identifier: MPL-2.0

use super::Pid;

/// Selects which child a `wait_child` call is willing to reap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessFilter {
    /// Any child of the caller.
    Any,
    /// The child with the given pid.
    WithPid(Pid),
}
