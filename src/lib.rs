// Library surface exists for the crate-level flow tests; skipper ships as a binary.
pub mod checks;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod forge;
pub mod logging;
pub mod protocol;
pub mod retest;
pub mod server;
pub mod skip;
