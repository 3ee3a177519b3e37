//! Numerical core for the sampling and cellular-automaton simulations.
//!
//! Main components:
//! - [`sampler`] — deviates for nine distributions from a uniform source.
//! - [`life1d`] — elementary automaton on a circular lattice.
//! - [`life2d`] — Conway life on a bounded grid.
//! - [`epidemic`] — SIR-D contact simulation on a bounded grid.
//!
//! Supporting modules:
//! - [`rng`] — seeded generator construction and uniform/normal primitives.
//! - [`grid`] — fixed-size row-major lattice with clipped neighborhoods.
//! - [`history`] — bounded snapshot record.
//! - [`config`] — construction parameters and canonical defaults.
//! - [`stats`] — summary statistics and histograms over samples.
//! - [`error`] — the shared [`SimError`] type.
//! - [`types`] — cell types shared across simulations.
//!
//! Nothing here holds global random state: every operation that needs
//! randomness borrows a caller-owned generator.

pub mod config;
pub mod epidemic;
pub mod error;
pub mod grid;
pub mod history;
pub mod life1d;
pub mod life2d;
pub mod rng;
pub mod sampler;
pub mod stats;
pub mod types;

pub use error::{Result, SimError};
