//! # treemint-cli
//!
//! The `treemint` command line client.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod handler;
pub mod notifier;
pub mod opts;
pub mod utils;
