// SPDX-License-Identifier: MPL-2.0

use core::mem;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use super::{connected::Connected, endpoint::Endpoint, socket::StreamSocket};
use crate::{net::socket::Port, prelude::*};

pub(super) struct Listener {
    backlog: Arc<Backlog>,
}

impl Listener {
    /// Publishes a new backlog for `port`; fails if the port already has a
    /// listener.
    pub(super) fn new(port: Port) -> Result<Self> {
        let backlog = BACKLOG_TABLE.add_backlog(port)?;
        Ok(Self { backlog })
    }

    /// Waits for a connection request and admits it, returning the
    /// server-side socket of the new connection.
    pub(super) fn accept(&self) -> Result<Arc<StreamSocket>> {
        let request = self.backlog.pop_request()?;

        let (server_end, client_end) = match Endpoint::new_pair() {
            Ok(pair) => pair,
            Err(err) => {
                // The connector must still be woken when resources run out.
                request.refuse();
                return Err(err);
            }
        };

        let socket = StreamSocket::new_connected(Connected::new(server_end));
        request.admit(client_end);
        Ok(socket)
    }

    /// Unpublishes the backlog: refuses every pending request and wakes any
    /// blocked acceptor, which then observes the closed state and fails.
    pub(super) fn close(&self) {
        BACKLOG_TABLE.remove_backlog(&self.backlog);
        self.backlog.shutdown();
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builds a connection to the listener at `port`, blocking until an acceptor
/// admits the request, the listener goes away, or the timeout elapses. The
/// connector removes and frees its own request whatever the outcome; a
/// request admitted concurrently with the timeout still counts as success.
pub(super) fn connect(port: Port, timeout: Option<&Duration>) -> Result<Endpoint> {
    let Some(backlog) = BACKLOG_TABLE.get_backlog(port) else {
        // With no listener there is nothing to rendezvous with. A timed
        // connect still waits out its timeout, so that a caller polling for
        // a service to appear observes the timeout it asked for.
        if let Some(timeout) = timeout {
            std::thread::sleep(*timeout);
            return_errno_with_message!(Errno::ETIMEDOUT, "the connection request timed out");
        }
        return_errno_with_message!(Errno::ECONNREFUSED, "no socket is listening at the port");
    };

    let request = ConnRequest::new();
    backlog.push_request(request.clone())?;

    let outcome = match timeout {
        None => Some(request.wait()),
        Some(timeout) => request.wait_timeout(timeout),
    };

    backlog.remove_request(&request);

    match outcome {
        Some(result) => result,
        // Timed out; honor an admission that raced the deadline.
        None => match request.try_take() {
            Some(result) => result,
            None => {
                return_errno_with_message!(Errno::ETIMEDOUT, "the connection request timed out")
            }
        },
    }
}

static BACKLOG_TABLE: BacklogTable = BacklogTable::new();

/// The port map: every published listener's backlog, keyed by port.
struct BacklogTable {
    backlogs: Mutex<BTreeMap<Port, Arc<Backlog>>>,
}

impl BacklogTable {
    const fn new() -> Self {
        Self {
            backlogs: Mutex::new(BTreeMap::new()),
        }
    }

    fn add_backlog(&self, port: Port) -> Result<Arc<Backlog>> {
        let mut backlogs = self.backlogs.lock();
        if backlogs.contains_key(&port) {
            return_errno_with_message!(Errno::EADDRINUSE, "the port already has a listener");
        }
        let backlog = Arc::new(Backlog::new(port));
        backlogs.insert(port, backlog.clone());
        Ok(backlog)
    }

    fn get_backlog(&self, port: Port) -> Option<Arc<Backlog>> {
        self.backlogs.lock().get(&port).cloned()
    }

    fn remove_backlog(&self, backlog: &Arc<Backlog>) {
        let mut backlogs = self.backlogs.lock();
        // The port may have been re-bound by a newer listener already; only
        // this backlog's own entry may go.
        if backlogs
            .get(&backlog.port)
            .is_some_and(|current| Arc::ptr_eq(current, backlog))
        {
            backlogs.remove(&backlog.port);
        }
    }
}

struct Backlog {
    port: Port,
    is_published: AtomicBool,
    pending: Mutex<VecDeque<Arc<ConnRequest>>>,
    req_available: WaitQueue,
}

impl Backlog {
    fn new(port: Port) -> Self {
        Self {
            port,
            is_published: AtomicBool::new(true),
            pending: Mutex::new(VecDeque::new()),
            req_available: WaitQueue::new(),
        }
    }

    fn is_published(&self) -> bool {
        self.is_published.load(Ordering::Acquire)
    }

    fn push_request(&self, request: Arc<ConnRequest>) -> Result<()> {
        {
            let mut pending = self.pending.lock();
            // Checked under the queue lock so a concurrent close cannot
            // strand the request.
            if !self.is_published() {
                return_errno_with_message!(
                    Errno::ECONNREFUSED,
                    "the listening socket is closed"
                );
            }
            pending.push_back(request);
        }
        self.req_available.wake_all();
        Ok(())
    }

    fn pop_request(&self) -> Result<Arc<ConnRequest>> {
        self.req_available.wait_until(|| {
            let mut pending = self.pending.lock();
            if !self.is_published() {
                return Some(Err(Error::with_message(
                    Errno::EINVAL,
                    "the listening socket is closed",
                )));
            }
            pending.pop_front().map(Ok)
        })
    }

    fn remove_request(&self, request: &Arc<ConnRequest>) {
        self.pending
            .lock()
            .retain(|pending| !Arc::ptr_eq(pending, request));
    }

    fn shutdown(&self) {
        let drained: Vec<_> = {
            let mut pending = self.pending.lock();
            self.is_published.store(false, Ordering::Release);
            pending.drain(..).collect()
        };
        for request in drained {
            request.refuse();
        }
        self.req_available.wake_all();
    }
}

/// A connection request parked on a listener's backlog. Allocated and freed
/// by the connecting thread; admitted or refused by the accepting side.
struct ConnRequest {
    result: Mutex<ConnResult>,
    connected: WaitQueue,
}

enum ConnResult {
    Pending,
    Admitted(Endpoint),
    Refused,
}

impl ConnRequest {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(ConnResult::Pending),
            connected: WaitQueue::new(),
        })
    }

    fn admit(&self, endpoint: Endpoint) {
        *self.result.lock() = ConnResult::Admitted(endpoint);
        self.connected.wake_all();
    }

    fn refuse(&self) {
        {
            let mut result = self.result.lock();
            if matches!(*result, ConnResult::Pending) {
                *result = ConnResult::Refused;
            }
        }
        self.connected.wake_all();
    }

    /// Takes the settled outcome, or `None` while still pending.
    fn try_take(&self) -> Option<Result<Endpoint>> {
        let mut result = self.result.lock();
        match *result {
            ConnResult::Pending => None,
            _ => match mem::replace(&mut *result, ConnResult::Refused) {
                ConnResult::Admitted(endpoint) => Some(Ok(endpoint)),
                ConnResult::Refused => Some(Err(Error::with_message(
                    Errno::ECONNREFUSED,
                    "the connection was refused",
                ))),
                ConnResult::Pending => unreachable!(),
            },
        }
    }

    fn wait(&self) -> Result<Endpoint> {
        self.connected.wait_until(|| self.try_take())
    }

    fn wait_timeout(&self, timeout: &Duration) -> Option<Result<Endpoint>> {
        self.connected
            .wait_until_or_timeout(|| self.try_take(), timeout)
    }
}
