#![forbid(unsafe_code)]
//! Genoscope domain model.
//!
//! Holds the validated patient-metadata types shared by the form boundary,
//! the prediction pipeline, and the store, plus the record shapes the store
//! reads and writes.

mod metadata;
mod record;

pub use metadata::{Age, ParseError, PatientMetadata, PatientName, Sex, NA, NAME_MAX_LEN};
pub use record::{sequence_preview, HistoryRow, NewPrediction, PredictionRecord, PREVIEW_LEN};

pub const CRATE_NAME: &str = "genoscope-model";
