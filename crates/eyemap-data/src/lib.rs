//! Eyemap Column Data Pipeline
//!
//! Canonical data model and processing pipeline for per-column
//! anatomical measurements: raw loosely-typed records cross the
//! [`adapter`] boundary exactly once, becoming immutable [`ColumnData`]
//! entities that the rest of the pipeline consumes.
//!
//! # Pipeline
//!
//! ```text
//! raw records → DataAdapter → ValidationManager → metric computation
//!                                               → gap filling → ProcessingResult
//! ```
//!
//! Sides are the canonical single-letter alphabet `'L'`/`'R'`/`'M'`
//! everywhere inside the pipeline. Flexible external spellings
//! ("left", "bilateral", "center", "*") resolve to [`SomaSide`] at the
//! ingestion edge only; downstream code never compares against ad hoc
//! strings.

mod adapter;
mod error;
mod manager;
mod model;
mod processor;
mod raw;
mod side;
mod validation;

pub use adapter::adapt;
pub use error::{DataError, Result};
pub use manager::ColumnDataManager;
pub use model::{
    expected_layer_count, ColumnData, LayerData, ProcessedColumn, ProcessingConfig,
    RegionColumnsMap,
};
pub use processor::{build_minmax, DataProcessor, ProcessingResult};
pub use raw::RawColumnRecord;
pub use side::SomaSide;
pub use validation::{ValidationManager, ValidationMode, ValidationResult};
