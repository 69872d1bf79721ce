//! Command engine
//!
//! [`Dispatcher`] turns one command line into driver calls and a
//! [`osdlink_protocol::Response`]. [`Console`] runs the dispatcher over a
//! serial link.

pub mod console;
pub mod dispatcher;

#[cfg(test)]
pub(crate) mod fake;

pub use console::{Console, ConsoleError, BANNER};
pub use dispatcher::Dispatcher;
