pub mod allocation;
pub mod factors;
pub mod score;
