//! Core library for airq
//!
//! This crate implements the **Functional Core** of the airq application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`airq_core`** (this crate): Pure transformation functions with zero I/O
//! - **`airq`**: HTTP, terminal and plot rendering (the Imperative Shell)
//!
//! Every function here takes data and returns data. The shell fetches the
//! measurements body, hands it to [`pipeline::run_pipeline`], and decides what
//! to print and draw from the returned [`pipeline::CycleReport`].
//!
//! # Module Organization
//!
//! - [`table`]: The in-memory measurement table
//! - [`openaq`]: Request parameters and response parsing for the measurements API
//! - [`clean`]: Missing-value and range filtering
//! - [`analyze`]: Pearson correlation matrix over numeric columns
//! - [`encoding`]: Categorical encoding and the location color map
//! - [`plot`]: Scatter plot specification
//! - [`pipeline`]: The stages chained together, plus input validation
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use airq_core::openaq::MeasurementsQuery;
//! use airq_core::pipeline::run_pipeline;
//!
//! let body = serde_json::json!({
//!     "results": [{"location": "A", "parameter": "pm25", "value": 12}]
//! });
//!
//! let report = run_pipeline(&MeasurementsQuery::new("US", 100), &body)?;
//!
//! assert_eq!(report.cleaned_rows, 1);
//! ```

pub mod analyze;
pub mod clean;
pub mod encoding;
pub mod error;
pub mod openaq;
pub mod pipeline;
pub mod plot;
pub mod table;

pub use error::PipelineError;
