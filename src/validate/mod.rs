//! Checks and fixes that run directly on encoded buffers.

mod bounds;
mod indices;
mod overlap;
mod weights;

pub use bounds::{compute_bounds, verify_bounds, Bounds};
pub use indices::verify_vertex_indices;
pub use overlap::{any_overlapping_buffers, have_overlapping_buffers};
pub use weights::{
    sanitize_weights_sum, sanitize_weights_sum_pair, sanitize_weights_sum_pair_in, verify_weights_sum,
    verify_weights_sum_pair, verify_weights_sum_pair_in, WEIGHT_SUM_TOLERANCE,
};
