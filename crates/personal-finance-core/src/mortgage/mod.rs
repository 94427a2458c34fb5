pub mod affordability;
pub mod lending;
pub mod spend;
