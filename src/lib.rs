#![allow(non_snake_case)]

pub mod calibration;
pub mod error;
pub mod fields;
pub mod strategy;
pub mod utilities;

pub use error::StrategyError;
pub use strategy::{Plan, compute_strategy, compute_strategy_with_bucket, optimised_strategy};
