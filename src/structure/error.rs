// Tue Jan 13 2026 - Alex

use std::fmt;
use thiserror::Error;

/// One invalid field inside a declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    #[error("field `{field}` has unsupported type `{type_name}`")]
    UnsupportedType { field: String, type_name: String },
    #[error("field `{field}` is declared more than once")]
    DuplicateField { field: String },
    #[error("field `{field}` has non-positive array count {count}")]
    InvalidCount { field: String, count: i64 },
}

impl FieldIssue {
    pub fn field(&self) -> &str {
        match self {
            Self::UnsupportedType { field, .. }
            | Self::DuplicateField { field }
            | Self::InvalidCount { field, .. } => field,
        }
    }
}

/// Every problem found while compiling one declaration list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid declaration of `{type_name}`: {}", IssueList(.issues))]
pub struct DeclarationError {
    pub type_name: String,
    pub issues: Vec<FieldIssue>,
}

impl DeclarationError {
    pub fn new(type_name: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        Self {
            type_name: type_name.into(),
            issues,
        }
    }

    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

struct IssueList<'a>(&'a [FieldIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("input for `{type_name}` too short: need 0x{required:X} bytes, got 0x{actual:X}")]
pub struct TruncatedInputError {
    pub type_name: String,
    pub required: usize,
    pub actual: usize,
}

#[derive(Error, Debug)]
pub enum StructureError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    #[error(transparent)]
    TruncatedInput(#[from] TruncatedInputError),
    #[error("Value does not match layout: {0}")]
    ValueMismatch(String),
    #[error("Type not found: {0}")]
    TypeNotFound(String),
    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
