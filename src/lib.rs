//! Payroll anomaly detector
//!
//! This crate loads a payroll table, flags rows matching fixed anomaly rules
//! (excessive hours, high hourly rate, duplicate employee ID), and writes a
//! two-sheet spreadsheet holding the full data and the flagged subset.

#![warn(missing_docs)]

pub mod cli;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sample;
pub mod sink;
pub mod source;
