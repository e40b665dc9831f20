pub mod auth;
pub mod average;
pub mod shared;
pub mod signal;
pub mod teaching_block;
