// SPDX-License-Identifier: MPL-2.0

use super::{
    file_handle::FileLike,
    utils::{Channel, Consumer, Producer},
};
use crate::prelude::*;

/// The capacity of a pipe's cyclic byte buffer.
pub const PIPE_BUF_SIZE: usize = 512;

pub fn new_pair() -> Result<(Arc<PipeReader>, Arc<PipeWriter>)> {
    new_pair_with_capacity(PIPE_BUF_SIZE)
}

pub fn new_pair_with_capacity(capacity: usize) -> Result<(Arc<PipeReader>, Arc<PipeWriter>)> {
    let (producer, consumer) = Channel::with_capacity(capacity)?.split();

    Ok((
        Arc::new(PipeReader { consumer }),
        Arc::new(PipeWriter { producer }),
    ))
}

pub struct PipeReader {
    consumer: Consumer,
}

impl FileLike for PipeReader {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.consumer.read(buf)
    }
}

pub struct PipeWriter {
    producer: Producer,
}

impl FileLike for PipeWriter {
    fn write(&self, buf: &[u8]) -> Result<usize> {
        self.producer.write(buf)
    }
}
