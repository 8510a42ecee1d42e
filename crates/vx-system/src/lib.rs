//! # vx-system
//!
//! Portable system services for the vx toolkit.
//!
//! - [`config`] - hierarchical configuration store saved as YAML
//! - [`dir`] - glob-filtered directory walking
//! - [`profiler`] - millisecond stopwatch
//!
//! Threads, mutexes and file reading come straight from `std`
//! (`std::thread`, `std::sync::Mutex`, `std::fs`) and have no wrappers here.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod config;
pub mod dir;
pub mod profiler;

pub use config::{Configuration, Section, Value};
pub use dir::DirectoryParser;
pub use error::{SystemError, SystemResult};
pub use profiler::TimeProfiler;
