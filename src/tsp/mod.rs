//! # Tsp
//!
//! Greedy tour construction. Cities are seeded, then the path is extended
//! one nearest city at a time and finally closed back onto its start.

pub mod group;
pub mod nn;
pub mod seed;
pub mod util;

pub use group::{grouped_tours, partition, short_paths, GroupRouting, Partition};
pub use nn::{constrained_nn, constrained_with, seeded_nn, Fallback};
pub use util::Tour;

use crate::city::{City, Dimensions};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
/// Error types for tour construction
pub enum TourError {
    #[error("invalid city at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },
    #[error("every remaining city crosses the tour at step {step}")]
    NoCandidate { step: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Morton seeded nearest neighbor
    Seeded,
    /// nearest neighbor that refuses crossing edges
    Constrained,
}

/// How a dataset mixing 2d and 3d cities is handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimensionPolicy {
    /// classify by the first city, a missing z reads as 0
    Lenient,
    /// reject the dataset
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TourOptions {
    pub dimensions: DimensionPolicy,
    pub fallback: Fallback,
    pub ignore_shared_endpoint: bool,
    pub routing: GroupRouting,
}

impl Default for TourOptions {
    fn default() -> Self {
        TourOptions {
            dimensions: DimensionPolicy::Lenient,
            fallback: Fallback::LastRemaining,
            ignore_shared_endpoint: false,
            routing: GroupRouting::Compat,
        }
    }
}

impl TourOptions {
    /// Dimensionality for this run, validated when the policy is strict
    pub fn dimensions_for(&self, cities: &[City]) -> Result<Dimensions, TourError> {
        match self.dimensions {
            DimensionPolicy::Lenient => Ok(Dimensions::classify(cities)),
            DimensionPolicy::Strict => Dimensions::validate(cities),
        }
    }
}

/// Build a closed tour with the chosen algorithm
pub fn build_tour<'a>(
    cities: &'a [City],
    algorithm: Algorithm,
    options: &TourOptions,
) -> Result<Tour<'a>, TourError> {
    match algorithm {
        Algorithm::Seeded => seeded_nn(cities, options),
        Algorithm::Constrained => constrained_nn(cities, options),
    }
}
