use thiserror::Error;

use crate::layout::FieldKind;

/// Crate-wide decode error.
///
/// A failed decode of any record aborts the whole action; callers never see
/// a partially populated action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer shorter than the layout's declared width.
    #[error("truncated {layout}: need {need} bytes, have {have}")]
    Truncated {
        layout: &'static str,
        need: usize,
        have: usize,
    },

    /// A typed accessor disagreed with the layout descriptor.
    #[error("{layout} field #{index}: expected {expected:?}")]
    FieldMismatch {
        layout: &'static str,
        index: usize,
        expected: FieldKind,
    },

    /// A record decode or encode stopped before visiting every declared field.
    #[error("{layout}: {remaining} declared fields not visited")]
    Incomplete {
        layout: &'static str,
        remaining: usize,
    },

    /// Value handed to the encoder does not fit its byte-array field.
    #[error("{layout}.{field}: {have} bytes do not fit in {width}")]
    Oversize {
        layout: &'static str,
        field: &'static str,
        width: usize,
        have: usize,
    },

    /// A nested encoder wrote a different width than its layout declares.
    #[error("{layout}: nested encoder wrote {have} bytes, layout needs {need}")]
    WidthMismatch {
        layout: &'static str,
        need: usize,
        have: usize,
    },
}

impl DecodeError {
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
