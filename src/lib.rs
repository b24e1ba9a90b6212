//! NES
//!
//! A worked example of Natural Evolution Strategies: example objectives, the
//! command line plumbing used by the `nes-example` binary, and a JSON loader
//! for optimizer settings.
#![warn(missing_docs, unused)]

#[macro_use]
extern crate clap;
#[macro_use]
extern crate serde_derive;

/// Tools for binaries
pub mod bin_utils;
/// Example objectives
pub mod example;
