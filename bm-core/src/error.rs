//! Error types, re-exported from `bm-error`

pub use bm_error::{BoardmonError, Result};
