//! Estimate Intake: a two-step tile estimate request form.

pub mod advice;
pub mod config;
pub mod console;
pub mod delivery;
pub mod error;
pub mod intake;
