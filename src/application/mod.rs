// Application layer: the validating caller in front of the ledger.
// The domain declines bad input silently; this layer names the reason.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
