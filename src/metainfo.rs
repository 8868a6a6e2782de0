//! Torrent metainfo handling ([BEP-3], [BEP-12]).
//!
//! A torrent file (`.torrent`) is one bencoded dictionary describing the
//! files to be shared:
//!
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//! - **announce** - Primary tracker URL
//! - **announce-list** - Tracker tiers (BEP-12)
//! - **creation date** - Unix timestamp when created
//! - **comment** - Optional comment
//! - **created by** - Client that created the torrent
//!
//! [`Metainfo`] is the normalized view of that dictionary. The two legacy
//! forks of the format are flattened away: a lone `announce` becomes a
//! one-tier `announce_tiers`, and a single-file `info` becomes a one-entry
//! file listing, so consumers handle modern and legacy torrents with the
//! same code.
//!
//! # Examples
//!
//! ```no_run
//! use torinfo::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("example.torrent")?;
//! let torrent = Metainfo::from_bytes(&data)?;
//!
//! println!("Name: {}", torrent.name_str());
//! println!("Info hash: {}", torrent.info_hash);
//! println!("Total size: {} bytes", torrent.total_length());
//! println!("Piece length: {} bytes", torrent.piece_length);
//! println!("Number of pieces: {}", torrent.piece_count());
//!
//! // List files (same shape for single- and multi-file torrents)
//! for (path, file) in &torrent.files {
//!     println!("  {} ({} bytes)", String::from_utf8_lossy(path), file.length);
//! }
//!
//! // Tracker endpoints, flattened
//! for tracker in torrent.trackers() {
//!     println!("Tracker: {}", String::from_utf8_lossy(&tracker));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod error;
mod info_hash;
mod torrent;

pub use error::ProjectionError;
pub use info_hash::InfoHash;
pub use torrent::{FileEntry, Metainfo};

#[cfg(test)]
mod tests;
