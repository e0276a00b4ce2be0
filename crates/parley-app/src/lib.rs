//! Application layer for Parley
//!
//! Binds the sans-IO dialog engine from [`parley_core`] to a chat backend.
//!
//! # Components
//!
//! - [`Transport`]: Trait for backend-specific chat I/O
//! - [`Script`]: Author-supplied conversation root
//! - [`Driver`]: Session binding, inbound forwarding and restart/recovery

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod script;
mod transport;

pub use driver::Driver;
pub use script::Script;
pub use transport::{InboundEvent, Transport};
