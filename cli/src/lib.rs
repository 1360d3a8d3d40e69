//! Host side of the items client: a reqwest [`items_core::Transport`] and
//! the `items` command line built on top of it.

pub mod commands;
pub mod logging;
pub mod transport;

pub use commands::{Args, Command};
pub use transport::ReqwestTransport;
