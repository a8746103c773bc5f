//! bibcorpus-stats - Statistical reducers for corpus reports
//!
//! This crate provides the three reducers the aggregation reports
//! dispatch over:
//!
//! - **Mean**: arithmetic mean
//! - **Median**: middle value, averaging the two central values for
//!   even-length input
//! - **Mode**: every value tied at maximal frequency, ascending
//!
//! All reducers operate on finite sequences of integer measurements
//! (author counts, publication counts) and fail on empty input; report
//! code is expected to skip empty groups rather than recover here.

pub mod reducer;

pub use reducer::{mean, median, mode, Reducer, StatValue, StatsError};
