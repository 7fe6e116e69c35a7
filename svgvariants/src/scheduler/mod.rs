//! Bounded-concurrency fan-out of variant jobs.
//!
//! A run submits every variant at once; at most `max_concurrency` render at a time and the rest
//! wait in FIFO order. Outcomes stream into a [`sink::VariantSink`] as jobs finish.

/// The `convert` entry point and its options.
pub mod run;
/// Outcome consumers.
pub mod sink;
/// Admission and queue bookkeeping.
pub mod state;
