// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod page;
pub mod session;
pub mod specs;

pub mod analyze;
pub mod file;
pub mod log;
pub mod model;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
