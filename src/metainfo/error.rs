use thiserror::Error;

use crate::bencode::DecodeError;

/// Errors that can occur when projecting a decoded value into [`Metainfo`].
///
/// [`Metainfo`]: super::Metainfo
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] DecodeError),

    /// The top-level value is not a dictionary.
    #[error("top-level value is not a dictionary")]
    NotADictionary,

    /// A required field is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A present field has the wrong bencode kind.
    #[error("field {field} is not a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// The `pieces` blob length is not a multiple of 20.
    #[error("pieces length {0} is not a multiple of 20")]
    MalformedPieces(usize),
}
