mod placement;
mod solution;

pub use placement::Placement;
pub use solution::{Extent, LogFormat, Solution, SolutionSet};
