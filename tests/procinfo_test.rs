// SPDX-License-Identifier: MPL-2.0

mod common;

use common::run_init_with_args;
use minos::{
    fs::procinfo::ProcInfo,
    process::ProcessFilter,
    syscall::*,
};
use serial_test::serial;

fn read_all_records(info_fd: i32) -> Vec<ProcInfo> {
    let mut records = Vec::new();
    let mut buf = [0u8; ProcInfo::RECORD_SIZE];
    loop {
        let n = sys_read(info_fd, &mut buf).unwrap();
        if n == 0 {
            break;
        }
        assert_eq!(n, ProcInfo::RECORD_SIZE);
        records.push(ProcInfo::decode(&buf).unwrap());
    }
    records
}

#[test]
#[serial]
fn info_stream_snapshots_the_process_table() {
    run_init_with_args(
        |_| {
            let (read_fd, write_fd) = sys_pipe().unwrap();

            let child = sys_exec(
                Some(Box::new(move |_| {
                    let mut buf = [0u8; 1];
                    sys_read(read_fd, &mut buf).unwrap();
                    0
                })),
                b"child args",
            )
            .unwrap();

            let info_fd = sys_open_info().unwrap();
            let records = read_all_records(info_fd);

            // One record per occupied pid, in pid order: idle, init, child.
            let pids: Vec<u32> = records.iter().map(|record| record.pid).collect();
            assert_eq!(pids, vec![0, sys_getpid(), child]);

            let init_record = &records[1];
            assert!(init_record.is_alive);
            assert!(init_record.has_main_task);
            assert!(init_record.thread_count >= 1);
            assert_eq!(init_record.ppid, 0);
            assert_eq!(&init_record.args, b"procinfo boot args");

            let child_record = &records[2];
            assert!(child_record.is_alive);
            assert_eq!(child_record.ppid, sys_getpid());
            assert_eq!(child_record.thread_count, 1);
            assert_eq!(&child_record.args, b"child args");
            assert_eq!(child_record.args_len, b"child args".len() as u32);

            sys_close(info_fd).unwrap();

            sys_write(write_fd, &[1]).unwrap();
            assert_eq!(
                sys_wait_child(ProcessFilter::WithPid(child)).unwrap(),
                (child, 0)
            );

            sys_close(read_fd).unwrap();
            sys_close(write_fd).unwrap();
            0
        },
        b"procinfo boot args",
    );
}

#[test]
#[serial]
fn zombies_show_up_with_no_threads() {
    run_init_with_args(
        |_| {
            let child = sys_exec(Some(Box::new(|_| 4)), &[]).unwrap();

            // Park until the child has become a zombie; its record must
            // stay visible until the reap below.
            loop {
                let info_fd = sys_open_info().unwrap();
                let records = read_all_records(info_fd);
                sys_close(info_fd).unwrap();

                let child_record = records
                    .iter()
                    .find(|record| record.pid == child)
                    .expect("an unreaped child stays in the table");

                if !child_record.is_alive {
                    assert_eq!(child_record.thread_count, 0);
                    // Argument storage was released at exit.
                    assert_eq!(child_record.args_len, 0);
                    break;
                }
                std::thread::yield_now();
            }

            assert_eq!(
                sys_wait_child(ProcessFilter::WithPid(child)).unwrap(),
                (child, 4)
            );

            // Reaping frees the slot.
            let info_fd = sys_open_info().unwrap();
            let records = read_all_records(info_fd);
            assert!(records.iter().all(|record| record.pid != child));
            sys_close(info_fd).unwrap();
            0
        },
        &[],
    );
}

#[test]
#[serial]
fn short_info_buffer_is_rejected() {
    run_init_with_args(
        |_| {
            let info_fd = sys_open_info().unwrap();
            let mut buf = [0u8; 16];
            assert!(sys_read(info_fd, &mut buf).is_err());
            sys_close(info_fd).unwrap();
            0
        },
        &[],
    );
}
