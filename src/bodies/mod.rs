pub mod body;
pub mod simulation;
pub mod vector;

#[cfg(test)]
mod body_test;

pub use simulation::Simulation;
pub use vector::VectorExt;
