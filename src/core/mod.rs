pub mod circuit;
pub mod errors;
pub mod execution;
pub mod math;
pub mod period_detector;
pub mod solver;
pub mod state;
pub mod types;
