pub mod branch;
pub mod classify;
pub mod enumerate;
pub mod git;
pub mod plan;
