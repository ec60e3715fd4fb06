// SPDX-License-Identifier: MPL-2.0

mod common;

use common::run_init;
use minos::{syscall::*, Errno};
use serial_test::serial;

#[test]
#[serial]
fn pipe_loopback() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        assert_eq!(sys_write(write_fd, &[0x41, 0x42, 0x43, 0x44]).unwrap(), 4);

        let mut buf = [0u8; 10];
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], &[0x41, 0x42, 0x43, 0x44]);

        sys_close(write_fd).unwrap();
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 0);

        sys_close(read_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn pipe_blocks_on_full_then_drains() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        // 600 bytes into a 512-byte pipe: the writer must suspend and can
        // only finish once the reader starts draining.
        let writer_tid = sys_create_thread(
            Box::new(move |_| {
                let payload: Vec<u8> = (0..600u32).map(|i| (i % 251) as u8).collect();
                sys_write(write_fd, &payload).unwrap() as i32
            }),
            &[],
        )
        .unwrap();

        let mut received = Vec::new();
        let mut buf = [0u8; 200];
        while received.len() < 600 {
            let n = sys_read(read_fd, &mut buf).unwrap();
            assert!(n > 0);
            received.extend_from_slice(&buf[..n]);
        }

        // Bytes arrive in write order with no duplication or loss.
        let expected: Vec<u8> = (0..600u32).map(|i| (i % 251) as u8).collect();
        assert_eq!(received, expected);

        assert_eq!(sys_thread_join(writer_tid).unwrap(), 600);

        sys_close(read_fd).unwrap();
        sys_close(write_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn short_read_then_end_of_data() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();

        assert_eq!(sys_write(write_fd, b"abc").unwrap(), 3);
        sys_close(write_fd).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 3);
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 0);
        assert_eq!(sys_read(read_fd, &mut buf).unwrap(), 0);

        sys_close(read_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn write_to_closed_reader_fails() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();
        sys_close(read_fd).unwrap();

        assert_eq!(
            sys_write(write_fd, b"x").unwrap_err().error(),
            Errno::EPIPE
        );

        sys_close(write_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn closed_fd_is_invalid() {
    run_init(|_| {
        let (read_fd, write_fd) = sys_pipe().unwrap();
        sys_close(read_fd).unwrap();

        let mut buf = [0u8; 1];
        assert_eq!(sys_read(read_fd, &mut buf).unwrap_err().error(), Errno::EBADF);
        assert_eq!(sys_close(read_fd).unwrap_err().error(), Errno::EBADF);

        sys_close(write_fd).unwrap();
        0
    });
}

#[test]
#[serial]
fn pipes_in_series_preserve_bytes() {
    run_init(|_| {
        let (read_a, write_a) = sys_pipe().unwrap();
        let (read_b, write_b) = sys_pipe().unwrap();

        let original = b"round and round the bytes go";
        assert_eq!(sys_write(write_a, original).unwrap(), original.len());

        let mut stage = [0u8; 64];
        let n = sys_read(read_a, &mut stage).unwrap();
        assert_eq!(sys_write(write_b, &stage[..n]).unwrap(), n);

        let mut result = [0u8; 64];
        let n = sys_read(read_b, &mut result).unwrap();
        assert_eq!(&result[..n], original);

        for fd in [read_a, write_a, read_b, write_b] {
            sys_close(fd).unwrap();
        }
        0
    });
}
