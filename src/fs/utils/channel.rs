// SPDX-License-Identifier: MPL-2.0

use core::sync::atomic::{AtomicBool, Ordering};

use ringbuf::{HeapConsumer as HeapRbConsumer, HeapProducer as HeapRbProducer, HeapRb};

use crate::prelude::*;

/// A unidirectional communication channel, intended to implement IPC, e.g.,
/// pipes and stream sockets.
///
/// Bytes flow from the [`Producer`] half to the [`Consumer`] half through a
/// bounded cyclic buffer. Each half can be shut down independently; the
/// buffer is released when both halves are gone.
pub struct Channel {
    producer: Producer,
    consumer: Consumer,
}

impl Channel {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return_errno_with_message!(Errno::EINVAL, "the channel capacity cannot be zero");
        }

        let rb: HeapRb<u8> = HeapRb::new(capacity);
        let (rb_producer, rb_consumer) = rb.split();

        let common = Arc::new(Common {
            producer: FifoInner::new(rb_producer),
            consumer: FifoInner::new(rb_consumer),
            capacity,
            has_data: WaitQueue::new(),
            has_space: WaitQueue::new(),
        });

        Ok(Self {
            producer: Producer(common.clone()),
            consumer: Consumer(common),
        })
    }

    pub fn split(self) -> (Producer, Consumer) {
        let Self { producer, consumer } = self;
        (producer, consumer)
    }

    pub fn capacity(&self) -> usize {
        self.producer.0.capacity
    }
}

/// The write end of a channel.
pub struct Producer(Arc<Common>);

/// The read end of a channel.
pub struct Consumer(Arc<Common>);

impl Producer {
    fn this_end(&self) -> &FifoInner<HeapRbProducer<u8>> {
        &self.0.producer
    }

    fn peer_end(&self) -> &FifoInner<HeapRbConsumer<u8>> {
        &self.0.consumer
    }

    pub fn shutdown(&self) {
        self.this_end().shutdown();
        // Closing an end is the supported unblock mechanism; both queues
        // must wake.
        self.0.has_data.wake_all();
        self.0.has_space.wake_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.this_end().is_shutdown()
    }

    pub fn is_peer_shutdown(&self) -> bool {
        self.peer_end().is_shutdown()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity
    }

    /// Writes all of `buf`, suspending while the buffer is full and the read
    /// end keeps the channel open. The returned count is less than
    /// `buf.len()` only if the read end closed mid-write; in that case the
    /// bytes written so far are reported, and an error is returned only when
    /// nothing was written at all.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            match self.try_write(&buf[written..]) {
                Ok(n) => {
                    written += n;
                    self.0.has_data.wake_all();
                }
                Err(err) if err.error() == Errno::EAGAIN => {
                    // Resume any reader waiting for the first byte before
                    // suspending for space.
                    self.0.has_data.wake_all();
                    self.0.has_space.wait_until(|| self.can_write().then_some(()));
                }
                Err(err) => {
                    if written > 0 {
                        break;
                    }
                    return Err(err);
                }
            }
        }
        Ok(written)
    }

    /// Writes as many bytes as currently fit, without suspending.
    pub fn try_write(&self, buf: &[u8]) -> Result<usize> {
        if buf.is_empty() {
            // Even after shutdown, writing an empty buffer is still fine.
            return Ok(0);
        }

        if self.is_shutdown() || self.is_peer_shutdown() {
            return_errno_with_message!(Errno::EPIPE, "the channel is shut down");
        }

        let written = self.this_end().rb().push_slice(buf);
        if written > 0 {
            Ok(written)
        } else {
            return_errno_with_message!(Errno::EAGAIN, "the channel is full")
        }
    }

    fn can_write(&self) -> bool {
        self.is_shutdown() || self.is_peer_shutdown() || !self.this_end().rb().is_full()
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Consumer {
    fn this_end(&self) -> &FifoInner<HeapRbConsumer<u8>> {
        &self.0.consumer
    }

    fn peer_end(&self) -> &FifoInner<HeapRbProducer<u8>> {
        &self.0.producer
    }

    pub fn shutdown(&self) {
        self.this_end().shutdown();
        self.0.has_data.wake_all();
        self.0.has_space.wake_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.this_end().is_shutdown()
    }

    pub fn is_peer_shutdown(&self) -> bool {
        self.peer_end().is_shutdown()
    }

    /// The number of bytes currently buffered. Never exceeds the capacity.
    pub fn len(&self) -> usize {
        self.this_end().rb().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads up to `buf.len()` bytes, suspending until at least one byte is
    /// available or the write end is closed. Returns `Ok(0)` only at end of
    /// data.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            match self.try_read(buf) {
                Ok(read) => {
                    self.0.has_space.wake_all();
                    return Ok(read);
                }
                Err(err) if err.error() == Errno::EAGAIN => {
                    // Resume any writer waiting for space before suspending
                    // for data.
                    self.0.has_space.wake_all();
                    self.0.has_data.wait_until(|| self.can_read().then_some(()));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Reads the currently buffered bytes, without suspending.
    pub fn try_read(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.is_shutdown() {
            return_errno_with_message!(Errno::ESHUTDOWN, "the read end is shut down");
        }

        // This must be recorded before the pop to avoid losing bytes that
        // arrive between an empty pop and the shutdown check.
        let is_peer_shutdown = self.is_peer_shutdown();

        let read = self.this_end().rb().pop_slice(buf);
        if read > 0 {
            Ok(read)
        } else if is_peer_shutdown {
            Ok(0)
        } else {
            return_errno_with_message!(Errno::EAGAIN, "the channel is empty")
        }
    }

    fn can_read(&self) -> bool {
        self.is_shutdown() || self.is_peer_shutdown() || !self.this_end().rb().is_empty()
    }
}

impl Drop for Consumer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Common {
    producer: FifoInner<HeapRbProducer<u8>>,
    consumer: FifoInner<HeapRbConsumer<u8>>,
    capacity: usize,
    has_data: WaitQueue,
    has_space: WaitQueue,
}

struct FifoInner<T> {
    rb: Mutex<T>,
    is_shutdown: AtomicBool,
}

impl<T> FifoInner<T> {
    fn new(rb: T) -> Self {
        Self {
            rb: Mutex::new(rb),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn rb(&self) -> MutexGuard<T> {
        self.rb.lock()
    }

    fn is_shutdown(&self) -> bool {
        self.is_shutdown.load(Ordering::Acquire)
    }

    fn shutdown(&self) {
        self.is_shutdown.store(true, Ordering::Release)
    }
}
