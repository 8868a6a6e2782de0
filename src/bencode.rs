//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used by BitTorrent metainfo files.
//! A `.torrent` file is one bencoded dictionary.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Byte strings are raw bytes, not text: the `pieces` field of a torrent is
//! a concatenation of SHA1 digests and must survive decoding untouched.
//! Dictionaries keep their keys in order of appearance (see [`Dict`]), so a
//! decoded value re-encodes to the exact source bytes.
//!
//! # Examples
//!
//! ```
//! use torinfo::bencode::{decode, encode};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a dictionary and look up a key
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//!
//! // Round-trip is byte-exact
//! let data = b"d4:listl4:spami42eee";
//! assert_eq!(encode(&decode(data).unwrap()), data);
//! ```
//!
//! # Error Handling
//!
//! Decoding fails with the [`DecodeError`] variant naming the first
//! malformed token: truncated input, a bad length prefix, a bad integer
//! token, an unterminated container, a dictionary key without a value, or a
//! non-string dictionary key. Malformed input is never silently truncated
//! or defaulted.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::DecodeError;
pub use value::{Dict, Value};
