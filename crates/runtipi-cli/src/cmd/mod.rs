pub mod env;
pub mod start;
