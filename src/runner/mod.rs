//! The animated runner

mod figure;
pub mod pose;

pub use figure::RunnerFigure;
pub use pose::{animate, Pose};
