//! Core library for the `slotscope` CLI.
//!
//! This crate provides the internal building blocks used by the binary: the
//! REST fetch layer, the normalization/aggregation/series-assembly pipeline,
//! the geographic hierarchy builder, chart rendering and export sinks. The
//! primary user-facing interface is the `slotscope` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod api;
pub mod app;
pub mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod geo;
pub mod logger;
pub mod series;
pub mod sinks;
