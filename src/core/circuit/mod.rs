pub mod builder;
pub mod declaration;
pub mod graph;

// Re-export commonly used types
pub use builder::CircuitBuilder;
pub use declaration::Declaration;
pub use graph::Circuit;
