pub mod assignment;
pub mod constraint;
pub mod constraints;
pub mod csp;
pub mod engine;
pub mod heuristics;
pub mod stats;
