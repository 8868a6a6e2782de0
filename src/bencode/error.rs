use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("invalid string length prefix")]
    InvalidLengthPrefix,

    #[error("invalid integer token: {0:?}")]
    InvalidIntegerToken(String),

    #[error("unterminated list or dictionary")]
    UnterminatedContainer,

    #[error("dictionary key without a value")]
    OddDictionaryArity,

    #[error("dictionary key is not a byte string")]
    NonStringDictionaryKey,

    #[error("unexpected byte: 0x{0:02x}")]
    UnexpectedByte(u8),

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,
}
