// SPDX-License-Identifier: MPL-2.0

#![allow(dead_code)]

/// Error number.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Errno {
    EPERM = 1,        /* Operation not permitted */
    ESRCH = 3,        /* No such process */
    EINTR = 4,        /* Interrupted system call */
    EIO = 5,          /* I/O error */
    E2BIG = 7,        /* Argument list too long */
    EBADF = 9,        /* Bad file number */
    ECHILD = 10,      /* No child processes */
    EAGAIN = 11,      /* Try again */
    ENOMEM = 12,      /* Out of memory */
    EFAULT = 14,      /* Bad address */
    EBUSY = 16,       /* Device or resource busy */
    EINVAL = 22,      /* Invalid argument */
    ENFILE = 23,      /* File table overflow */
    EMFILE = 24,      /* Too many open files */
    EPIPE = 32,       /* Broken pipe */
    EDEADLK = 35,     /* Resource deadlock would occur */
    ENOTSOCK = 88,    /* Socket operation on non-socket */
    EOPNOTSUPP = 95,  /* Operation not supported on transport endpoint */
    EADDRINUSE = 98,  /* Address already in use */
    EISCONN = 106,    /* Transport endpoint is already connected */
    ENOTCONN = 107,   /* Transport endpoint is not connected */
    ESHUTDOWN = 108,  /* Cannot send after transport endpoint shutdown */
    ETIMEDOUT = 110,  /* Connection timed out */
    ECONNREFUSED = 111, /* Connection refused */
}

/// error used in this crate
#[derive(Debug, Clone, Copy)]
pub struct Error {
    errno: Errno,
    msg: Option<&'static str>,
}

impl Error {
    pub const fn new(errno: Errno) -> Self {
        Error { errno, msg: None }
    }

    pub const fn with_message(errno: Errno, msg: &'static str) -> Self {
        Error {
            errno,
            msg: Some(msg),
        }
    }

    pub const fn error(&self) -> Errno {
        self.errno
    }

    pub const fn message(&self) -> Option<&'static str> {
        self.msg
    }
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::new(errno)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.msg {
            Some(msg) => write!(f, "{:?}: {}", self.errno, msg),
            None => write!(f, "{:?}", self.errno),
        }
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! return_errno {
    ($errno: expr) => {
        return Err($crate::error::Error::new($errno))
    };
}

#[macro_export]
macro_rules! return_errno_with_message {
    ($errno: expr, $message: expr) => {
        return Err($crate::error::Error::with_message($errno, $message))
    };
}
