// SPDX-License-Identifier: MPL-2.0

mod common;

use common::run_init;
use minos::{syscall::*, Errno};
use serial_test::serial;

#[test]
#[serial]
fn join_returns_exit_value() {
    run_init(|_| {
        let tid = sys_create_thread(Box::new(|_| 42), &[]).unwrap();

        assert_eq!(sys_thread_join(tid).unwrap(), 42);
        // The record was reaped by the first join.
        assert_eq!(sys_thread_join(tid).unwrap_err().error(), Errno::ESRCH);
        0
    });
}

#[test]
#[serial]
fn join_self_fails() {
    run_init(|_| {
        let tid = sys_gettid();
        assert_eq!(sys_thread_join(tid).unwrap_err().error(), Errno::EDEADLK);
        0
    });
}

#[test]
#[serial]
fn detach_then_join_fails() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        let tid = sys_create_thread(
            Box::new(move |_| {
                let mut buf = [0u8; 1];
                sys_read(read_fd, &mut buf).unwrap();
                0
            }),
            &[],
        )
        .unwrap();

        sys_thread_detach(tid).unwrap();
        assert!(sys_thread_join(tid).is_err());

        // Release the worker; its record is freed after its exit. The pipe
        // handles are left for the exit path to close once the worker is
        // done with them.
        sys_write(write_fd, &[1]).unwrap();
        0
    });
}

#[test]
#[serial]
fn detach_after_exit_fails() {
    run_init(|_| {
        let tid = sys_create_thread(Box::new(|_| 3), &[]).unwrap();
        assert_eq!(sys_thread_join(tid).unwrap(), 3);

        assert_eq!(sys_thread_detach(tid).unwrap_err().error(), Errno::ESRCH);
        0
    });
}

#[test]
#[serial]
fn concurrent_joiners_all_observe_exit() {
    run_init(|_| {
        let (release_read, release_write) = sys_pipe().unwrap();
        let (ready_read, ready_write) = sys_pipe().unwrap();

        let target = sys_create_thread(
            Box::new(move |_| {
                let mut buf = [0u8; 1];
                sys_read(release_read, &mut buf).unwrap();
                7
            }),
            &[],
        )
        .unwrap();

        let joiner_a = sys_create_thread(
            Box::new(move |_| {
                sys_write(ready_write, &[b'a']).unwrap();
                sys_thread_join(target).unwrap()
            }),
            &[],
        )
        .unwrap();
        let joiner_b = sys_create_thread(
            Box::new(move |_| {
                sys_write(ready_write, &[b'b']).unwrap();
                sys_thread_join(target).unwrap()
            }),
            &[],
        )
        .unwrap();

        // Release the target only once both joiners have announced
        // themselves and had ample time to park in the join.
        let mut ready = [0u8; 2];
        let mut announced = 0;
        while announced < 2 {
            announced += sys_read(ready_read, &mut ready[announced..]).unwrap();
        }
        std::thread::sleep(core::time::Duration::from_millis(50));
        sys_write(release_write, &[1]).unwrap();

        assert_eq!(sys_thread_join(joiner_a).unwrap(), 7);
        assert_eq!(sys_thread_join(joiner_b).unwrap(), 7);

        for fd in [release_read, release_write, ready_read, ready_write] {
            sys_close(fd).unwrap();
        }
        0
    });
}

#[test]
#[serial]
fn join_from_another_process_fails() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        let worker = sys_create_thread(
            Box::new(move |_| {
                let mut buf = [0u8; 1];
                sys_read(read_fd, &mut buf).unwrap();
                0
            }),
            &[],
        )
        .unwrap();

        let child = sys_exec(
            Some(Box::new(|args: &[u8]| {
                let tid = u32::from_le_bytes(args.try_into().unwrap());
                // The tid is valid, but it names a thread of the parent.
                assert_eq!(sys_thread_join(tid).unwrap_err().error(), Errno::ESRCH);
                0
            })),
            &worker.to_le_bytes(),
        )
        .unwrap();

        assert_eq!(
            sys_wait_child(minos::process::ProcessFilter::WithPid(child)).unwrap(),
            (child, 0)
        );

        sys_write(write_fd, &[1]).unwrap();
        assert_eq!(sys_thread_join(worker).unwrap(), 0);

        sys_close(read_fd).unwrap();
        sys_close(write_fd).unwrap();
        0
    });
}

#[test]
#[serial]
#[allow(unreachable_code)]
fn thread_exit_terminates_at_the_call_site() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        let tid = sys_create_thread(
            Box::new(move |_| {
                sys_thread_exit(9);
                // Exit is the thread's last act; none of this may run.
                sys_write(write_fd, b"ghost").unwrap();
                0
            }),
            &[],
        )
        .unwrap();

        assert_eq!(sys_thread_join(tid).unwrap(), 9);

        // Nothing was written after the exit.
        sys_close(write_fd).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 0);

        sys_close(read_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn join_unknown_tid_fails() {
    run_init(|_| {
        assert_eq!(sys_thread_join(54321).unwrap_err().error(), Errno::ESRCH);
        assert_eq!(sys_thread_detach(54321).unwrap_err().error(), Errno::ESRCH);
        0
    });
}
