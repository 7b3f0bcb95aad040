//! Low-level building blocks for custom spotting pipelines.
//!
//! These re-exports expose the pipeline stages individually for advanced
//! use cases (custom seeds, pre-thinned skeletons, instrumented energy
//! folds). Most users should prefer the top-level `CompiledQuery` and
//! `Spotter` types.

pub use crate::dt::energy::{compose_energy, EnergyParams};
pub use crate::dt::euclidean_dt;
pub use crate::landmark::{place_landmarks, Landmarks};
pub use crate::skeleton::corners::{detect_corners, CornerParams};
pub use crate::skeleton::{pad_border, skeletonize};
pub use crate::tree::assemble::assemble;
