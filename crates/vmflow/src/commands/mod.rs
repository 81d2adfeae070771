pub mod plan;
pub mod provision;
