//! European roulette Monte-Carlo simulators.
//!
//! Library crate exposing all modules for use by integration tests
//! and the `frequency`, `strategy` and `martingale` binaries.

pub mod cli;
pub mod config;
pub mod report;
pub mod simulation;
pub mod strategy;
pub mod types;
pub mod wheel;
