//! Export module for the finance tracker
//!
//! Dumps the collections to a single JSON document and reads such a document
//! back in.

pub mod json;

pub use json::{
    export_json, export_to_file, import_from_file, import_from_json, FinanceExport,
    DEFAULT_EXPORT_FILE,
};
