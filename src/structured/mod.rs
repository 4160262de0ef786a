//! Structured output module for prompt-director.
//!
//! Turns free-form model text into a JSON value:
//! - [`OutputRecovery`]: staged recovery pipeline that always yields a [`RecoveredResult`]
//! - [`lenient`]: tolerant JSON reader used when strict parsing fails
//!
//! # Examples
//!
//! ```
//! use prompt_director::structured::{recover, RecoveredResult};
//! use serde_json::json;
//!
//! let result = recover("```json\n{\"a\": 1,}\n```");
//! assert_eq!(result, RecoveredResult::Parsed(json!({"a": 1})));
//! ```

pub mod lenient;
pub mod recovery;

pub use lenient::LenientParseError;
pub use recovery::{
    bracket_slice, clean, recover, strip_fences, Diagnostic, OutputRecovery, RecoveredResult,
    RecoveryStage,
};
