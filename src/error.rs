//! Error types for declaration conversion.
//!
//! Only contract violations are errors. Malformed comments and odd
//! annotation values degrade to best-effort output instead.

use crate::source::ElementKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The declaration is not a class, interface, enum or annotation type.
    #[error("Unsupported element kind: {kind} ({name})")]
    UnsupportedKind { kind: ElementKind, name: String },
}
