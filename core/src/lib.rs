pub mod clock;
pub mod commands;
pub mod config;
pub mod identity;
pub mod records;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
