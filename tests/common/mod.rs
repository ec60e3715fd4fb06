// SPDX-License-Identifier: MPL-2.0

#![allow(dead_code)]

use minos::process::ExitCode;

/// Boots a kernel whose init process runs `task`, and requires a clean
/// zero exit. Assertion failures inside any task surface as a nonzero init
/// exit value (a panicking task exits with 101).
pub fn run_init<F>(task: F)
where
    F: FnOnce(&[u8]) -> ExitCode + Send + 'static,
{
    run_init_with_args(task, &[]);
}

pub fn run_init_with_args<F>(task: F, args: &[u8])
where
    F: FnOnce(&[u8]) -> ExitCode + Send + 'static,
{
    let _ = env_logger::builder().is_test(true).try_init();
    let exit_code = minos::boot(Box::new(task), args).expect("boot failed");
    assert_eq!(exit_code, 0, "init task reported failure");
}
