use super::error::DecodeError;
use super::value::{Dict, Value};
use bytes::Bytes;

const MAX_DEPTH: usize = 64;

/// Decodes a complete bencoded document into a [`Value`] tree.
///
/// The input must contain exactly one value spanning the whole buffer; that
/// value may be any of the four bencode kinds. The input is never mutated
/// and no I/O is performed.
///
/// # Errors
///
/// Returns the [`DecodeError`] variant matching the first malformed token
/// encountered; see the variant docs for the exact conditions.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;

    if pos != data.len() {
        return Err(DecodeError::TrailingData);
    }

    Ok(value)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::NestingTooDeep);
    }

    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEndOfInput);
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos),
        c => Err(DecodeError::UnexpectedByte(c)),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, DecodeError> {
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEndOfInput);
    }

    let lexeme = &data[start..*pos];
    let invalid = || DecodeError::InvalidIntegerToken(String::from_utf8_lossy(lexeme).into_owned());

    let int_str = std::str::from_utf8(lexeme).map_err(|_| invalid())?;

    let digits = int_str.strip_prefix('-').unwrap_or(int_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // "i-0e" and zero-padded forms are not canonical bencode.
    if int_str == "-0" || (digits.starts_with('0') && digits.len() > 1) {
        return Err(invalid());
    }

    // Overflow policy: the format allows arbitrary magnitude, but anything
    // outside i64 is rejected rather than saturated or widened.
    let value: i64 = int_str.parse().map_err(|_| invalid())?;

    *pos += 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, DecodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(DecodeError::UnexpectedEndOfInput);
    }

    if data[*pos] != b':' {
        return Err(DecodeError::InvalidLengthPrefix);
    }

    let len_str =
        std::str::from_utf8(&data[start..*pos]).map_err(|_| DecodeError::InvalidLengthPrefix)?;
    let len: usize = len_str.parse().map_err(|_| DecodeError::InvalidLengthPrefix)?;

    *pos += 1;

    // A declared length past the end of the buffer can never be satisfied.
    if len > data.len() - *pos {
        return Err(DecodeError::InvalidLengthPrefix);
    }

    let bytes = Bytes::copy_from_slice(&data[*pos..*pos + len]);
    *pos += len;

    Ok(Value::Bytes(bytes))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, DecodeError> {
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(DecodeError::UnterminatedContainer);
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, DecodeError> {
    *pos += 1;
    let mut dict = Dict::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key = match decode_value(data, pos, depth + 1)? {
            Value::Bytes(b) => b,
            _ => return Err(DecodeError::NonStringDictionaryKey),
        };

        if *pos >= data.len() {
            return Err(DecodeError::UnterminatedContainer);
        }

        // A terminator here means the key has no paired value.
        if data[*pos] == b'e' {
            return Err(DecodeError::OddDictionaryArity);
        }

        let value = decode_value(data, pos, depth + 1)?;
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(DecodeError::UnterminatedContainer);
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
