//! Physics modules for the aiming kernel

pub mod ballistics;

pub use ballistics::{ApexSolution, ArcAngles, Ballistics, SolveFailure};
