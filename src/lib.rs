//! Resume role matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, RoleMatcherError};
pub use config::Config;
