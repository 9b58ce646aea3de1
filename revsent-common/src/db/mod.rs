//! Database access: schema setup and the scored-review store

pub mod init;
pub mod reviews;

pub use init::*;
pub use reviews::*;
