//! Command implementations for casper-cli

pub mod build;
pub mod diff;
pub mod fetch;
pub mod push;

pub use build::run_build;
pub use diff::run_diff;
pub use fetch::run_fetch;
pub use push::run_push;
