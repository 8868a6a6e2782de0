//! torinfo - bencode decoding and torrent metainfo extraction
//!
//! This library decodes bencoded documents ([BEP-3]) into a generic value
//! tree and projects that tree into a normalized view of torrent metadata:
//! tracker tiers, a unified file listing, and segmented piece hashes.
//!
//! The core is pure: it reads a complete in-memory buffer, performs no I/O,
//! and produces immutable values owned by the caller. Both steps are safe to
//! run concurrently on independent inputs.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 bencode encoding/decoding
//! - [`metainfo`] - Torrent metainfo projection and info hashing
//!
//! # Examples
//!
//! ```no_run
//! use torinfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("example.torrent")?;
//! let torrent = Metainfo::from_bytes(&data)?;
//! println!("{}: {} pieces", torrent.name_str(), torrent.piece_count());
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod bencode;
pub mod metainfo;

pub use bencode::{decode, encode, DecodeError, Dict, Value};
pub use metainfo::{FileEntry, InfoHash, Metainfo, ProjectionError};
