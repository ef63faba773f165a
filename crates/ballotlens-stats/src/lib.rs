//! Statistical utilities for the ballotlens workspace.
//!
//! This crate provides the numeric building blocks used by the story engine:
//!
//! - **Percentiles**: Linear-interpolation quantiles over sorted data
//! - **Descriptive statistics**: Min, max, mean and median of a dataset
//! - **Extent**: Minimum, maximum and span of a dataset
//! - **Rounding**: Half-up rounding to the nearest integer
//!
//! # Modules
//!
//! - [`percentiles`]: Percentile computation and storage
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`extent`]: Value extents used as normalization baselines
//! - [`rounding`]: Rounding helpers for display-stable values
//!
//! # Examples
//!
//! ## Computing percentiles
//!
//! ```
//! use ballotlens_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use ballotlens_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing an extent
//!
//! ```
//! use ballotlens_stats::extent::Extent;
//!
//! let extent = Extent::new([4.0, 10.0, 1.0]).unwrap();
//! assert_eq!(extent.span(), 9.0);
//! ```

pub mod descriptive;
pub mod extent;
pub mod percentiles;
pub mod rounding;
