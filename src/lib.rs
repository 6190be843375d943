//! Attendance Classification Engine
//!
//! This crate decides what attendance status a shift should be recorded as,
//! given the employee's shift schedule and the biometric clock-in and
//! clock-out recorded for the shift date.

#![warn(missing_docs)]

pub mod classification;
pub mod config;
pub mod error;
pub mod models;
