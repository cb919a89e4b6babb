//! Tour cost evaluation.
//!
//! [`full_cost`] is the ground truth. The delta functions only look at the
//! edges a move touches and are used to rank candidate moves during a
//! neighborhood sweep.

mod cost;

pub use cost::{full_cost, reversal_delta_cost, swap_delta_cost};
