//! Trajectory sampling for visualization

mod sample;
mod sampler;

pub use sample::{Trajectory, TrajectorySample};
pub use sampler::{sample, SampleCountPolicy, TrajectorySampler};
