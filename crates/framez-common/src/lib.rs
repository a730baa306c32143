//! Common utilities for the Framez engine.
//!
//! This crate provides shared infrastructure used by all Framez components:
//! - **Address** - frame addresses with fragment handling and the blank sentinel
//! - **Warning System** - deduplicated colored terminal output for tolerated failures

pub mod address;
pub mod warning;

pub use address::{Address, AddressError, resolve};
