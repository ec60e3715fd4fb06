// SPDX-License-Identifier: MPL-2.0

mod channel;

pub use channel::{Channel, Consumer, Producer};
