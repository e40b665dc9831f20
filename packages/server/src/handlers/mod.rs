pub mod auth;
pub mod average;
pub mod signal;
pub mod teaching_block;
