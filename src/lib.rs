pub mod acquire;
pub mod classify;
pub mod error;
pub mod fetch;
pub mod observations;
pub mod output;
