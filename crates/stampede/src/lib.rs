#![doc = include_str!("../README.md")]

mod common;
pub use common::*;

pub mod config;
pub mod pipeline;
pub mod target;
pub mod telemetry;

pub use config::{CliArgs, LoadConfig};
pub use pipeline::{Report, StatusTally, run, run_http};
pub use target::{HttpTarget, Target};
