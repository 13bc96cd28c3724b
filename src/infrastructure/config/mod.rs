//! Infrastructure configuration modules.

pub mod blacklist;
pub mod credentials;
pub mod logging;
pub mod orders;
pub mod repricer;
pub mod server;
pub mod settings;
