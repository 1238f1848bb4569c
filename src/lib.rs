//! End-of-Service Settlement Engine for UAE Labour Law
//!
//! This crate calculates the End-of-Service (EOS) settlement owed to an
//! employee leaving a UAE employer: gratuity under the federal law or a
//! free zone variant, unused leave payout, other payments and deductions.
//! Every calculation returns a step-by-step breakdown of how the figures
//! were reached.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod sequence;
