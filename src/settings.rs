//! Fixed report constants shared by every visual preset.
//!
//! Target values and the instance reference are properties of the benchmark
//! campaign, not of the figure styling, so they live here once instead of
//! being duplicated per preset.

/// Δf targets summarized by the ECDF performance profiles.
pub const SUMMARIZED_TARGETS: [f64; 7] = [1e1, 1e0, 1e-1, 1e-2, 1e-3, 1e-5, 1e-8];

/// Δf targets used as comparison-table columns.
pub const TABLE_TARGETS: [f64; 6] = [1e1, 1e0, 1e-1, 1e-3, 1e-5, 1e-7];

/// The single target precision of the ERT scaling figures.
pub const SCALING_TARGET: f64 = 1e-8;

/// Dimensions the instance-count sanity check applies to. Datasets of other
/// dimensions are still rendered; they just skip the check.
pub const DIMS_OF_INTEREST: [u32; 5] = [2, 3, 5, 10, 20];

/// Reference (instance, trial count) pairs a complete experiment records
/// per function and dimension.
pub const INSTANCES_OF_INTEREST: [(u32, usize); 5] = [(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)];
