use std::borrow::Cow;
use std::collections::BTreeMap;

use bytes::Bytes;

use super::error::ProjectionError;
use super::info_hash::InfoHash;
use crate::bencode::{decode, encode, Value};

/// A parsed torrent file.
///
/// Contains the normalized metadata of a `.torrent` file: creation
/// attributes, tracker tiers, the unified file listing, and the segmented
/// piece hashes. Built once from a decoded value and not mutated after.
///
/// # Examples
///
/// ```no_run
/// use torinfo::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = std::fs::read("example.torrent")?;
/// let metainfo = Metainfo::from_bytes(&data)?;
///
/// println!("Torrent: {}", metainfo.name_str());
/// println!("Info hash: {}", metainfo.info_hash);
/// println!("Size: {} bytes in {} pieces", metainfo.total_length(), metainfo.piece_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// The unique identifier for this torrent (SHA1 of the info dictionary).
    pub info_hash: InfoHash,
    /// Tracker endpoints grouped into tiers ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    ///
    /// A legacy `announce`-only torrent normalizes to one tier holding one
    /// endpoint, so consumers never special-case the single-tracker form.
    pub announce_tiers: Vec<Vec<Bytes>>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
    /// Unix timestamp when the torrent was created, unformatted.
    pub creation_date: Option<i64>,
    /// Optional comment about the torrent.
    pub comment: Option<String>,
    /// If true, clients should only use trackers in the metainfo (no DHT/PEX).
    pub private: bool,
    /// Suggested name for the file or root directory. Raw bytes, not
    /// guaranteed to be valid UTF-8.
    pub name: Bytes,
    /// Number of bytes per piece.
    pub piece_length: u64,
    /// SHA1 hash of each piece (20 bytes each), in piece order.
    pub pieces: Vec<[u8; 20]>,
    /// Files keyed by their joined path, in one shape for both single-file
    /// and multi-file torrents.
    pub files: BTreeMap<Bytes, FileEntry>,
}

/// One file within a torrent.
///
/// Single-file torrents are presented as a one-entry listing so that a
/// consumer needs exactly one code path for both layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Size of the file in bytes.
    pub length: u64,
    /// Path components, raw bytes.
    pub path: Vec<Bytes>,
    /// Optional MD5 digest carried by some torrents.
    pub md5sum: Option<Bytes>,
}

impl Metainfo {
    /// Parses a torrent file from raw bytes.
    ///
    /// Decodes the buffer as bencode and projects the result. The caller is
    /// responsible for acquiring the buffer; no I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is not valid bencode
    /// - The top-level value is not a dictionary
    /// - Required fields are missing (info, name, piece length, pieces,
    ///   any tracker)
    /// - A present field has the wrong bencode kind
    /// - The pieces field length is not a multiple of 20
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use torinfo::metainfo::Metainfo;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let data = std::fs::read("example.torrent")?;
    /// let metainfo = Metainfo::from_bytes(&data)?;
    /// println!("Name: {}", metainfo.name_str());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self, ProjectionError> {
        let value = decode(data)?;
        Self::from_value(&value)
    }

    /// Projects an already-decoded value into a `Metainfo`.
    ///
    /// The value is only read; it stays usable afterwards.
    pub fn from_value(root: &Value) -> Result<Self, ProjectionError> {
        let dict = root.as_dict().ok_or(ProjectionError::NotADictionary)?;

        let announce_tiers = match dict.get(b"announce-list") {
            Some(value) => {
                let tiers = expect_list(value, "announce-list")?;
                tiers
                    .iter()
                    .map(|tier| {
                        let endpoints = expect_list(tier, "announce-list tier")?;
                        endpoints
                            .iter()
                            .map(|url| expect_bytes(url, "announce-list endpoint").cloned())
                            .collect::<Result<Vec<Bytes>, ProjectionError>>()
                    })
                    .collect::<Result<_, _>>()?
            }
            None => {
                let announce = dict
                    .get(b"announce")
                    .ok_or(ProjectionError::MissingField("announce"))?;
                vec![vec![expect_bytes(announce, "announce")?.clone()]]
            }
        };

        let created_by = optional_text(dict.get(b"created by"), "created by")?;
        let comment = optional_text(dict.get(b"comment"), "comment")?;

        let creation_date = dict
            .get(b"creation date")
            .map(|v| expect_integer(v, "creation date"))
            .transpose()?;

        let info_value = dict
            .get(b"info")
            .ok_or(ProjectionError::MissingField("info"))?;
        let info = expect_dict(info_value, "info")?;

        // Order preservation makes the re-encoding byte-identical to the
        // source slice, so the digest is exact.
        let info_hash = InfoHash::from_info_bytes(&encode(info_value));

        let name = expect_bytes(
            info.get(b"name")
                .ok_or(ProjectionError::MissingField("name"))?,
            "name",
        )?
        .clone();

        let piece_length = expect_length(
            info.get(b"piece length")
                .ok_or(ProjectionError::MissingField("piece length"))?,
            "piece length",
        )?;

        let pieces_blob = expect_bytes(
            info.get(b"pieces")
                .ok_or(ProjectionError::MissingField("pieces"))?,
            "pieces",
        )?;

        if pieces_blob.len() % 20 != 0 {
            return Err(ProjectionError::MalformedPieces(pieces_blob.len()));
        }

        let pieces: Vec<[u8; 20]> = pieces_blob
            .chunks_exact(20)
            .map(|chunk| {
                let mut arr = [0u8; 20];
                arr.copy_from_slice(chunk);
                arr
            })
            .collect();

        let private = info
            .get(b"private")
            .map(|v| expect_integer(v, "private"))
            .transpose()?
            .map(|v| v != 0)
            .unwrap_or(false);

        let files = match info.get(b"files") {
            Some(value) => {
                let entries = expect_list(value, "files")?;
                let mut files = BTreeMap::new();

                for entry in entries {
                    let entry_dict = expect_dict(entry, "files entry")?;

                    let length = expect_length(
                        entry_dict
                            .get(b"length")
                            .ok_or(ProjectionError::MissingField("file length"))?,
                        "file length",
                    )?;

                    let path_list = expect_list(
                        entry_dict
                            .get(b"path")
                            .ok_or(ProjectionError::MissingField("file path"))?,
                        "file path",
                    )?;

                    let path: Vec<Bytes> = path_list
                        .iter()
                        .map(|component| expect_bytes(component, "file path").cloned())
                        .collect::<Result<_, _>>()?;

                    let md5sum = entry_dict
                        .get(b"md5sum")
                        .map(|v| expect_bytes(v, "md5sum").cloned())
                        .transpose()?;

                    let key = join_path(&name, &path);
                    files.insert(key, FileEntry { length, path, md5sum });
                }

                files
            }
            None => {
                // Single-file torrent: synthesize one entry keyed by the
                // torrent name so both layouts look the same to callers.
                let length = expect_length(
                    info.get(b"length")
                        .ok_or(ProjectionError::MissingField("length or files"))?,
                    "length",
                )?;

                let md5sum = info
                    .get(b"md5sum")
                    .map(|v| expect_bytes(v, "md5sum").cloned())
                    .transpose()?;

                let mut files = BTreeMap::new();
                files.insert(
                    name.clone(),
                    FileEntry {
                        length,
                        path: vec![name.clone()],
                        md5sum,
                    },
                );
                files
            }
        };

        Ok(Self {
            info_hash,
            announce_tiers,
            created_by,
            creation_date,
            comment,
            private,
            name,
            piece_length,
            pieces,
            files,
        })
    }

    /// Returns the torrent name, replacement-decoding invalid UTF-8.
    pub fn name_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns all tracker endpoints across tiers, deduplicated, tier order
    /// preserved.
    pub fn trackers(&self) -> Vec<Bytes> {
        let mut trackers: Vec<Bytes> = Vec::new();

        for tier in &self.announce_tiers {
            for endpoint in tier {
                if !trackers.contains(endpoint) {
                    trackers.push(endpoint.clone());
                }
            }
        }

        trackers
    }

    /// Total size of all files in bytes.
    pub fn total_length(&self) -> u64 {
        self.files.values().map(|f| f.length).sum()
    }

    /// Number of pieces.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

/// Joins the torrent name and a file's path components with `/`.
fn join_path(name: &Bytes, components: &[Bytes]) -> Bytes {
    let mut key = Vec::with_capacity(name.len() + components.iter().map(|c| c.len() + 1).sum::<usize>());
    key.extend_from_slice(name);
    for component in components {
        key.push(b'/');
        key.extend_from_slice(component);
    }
    Bytes::from(key)
}

fn expect_bytes<'a>(value: &'a Value, field: &'static str) -> Result<&'a Bytes, ProjectionError> {
    value.as_bytes().ok_or(ProjectionError::TypeMismatch {
        field,
        expected: "byte string",
    })
}

fn expect_integer(value: &Value, field: &'static str) -> Result<i64, ProjectionError> {
    value.as_integer().ok_or(ProjectionError::TypeMismatch {
        field,
        expected: "integer",
    })
}

fn expect_list<'a>(value: &'a Value, field: &'static str) -> Result<&'a Vec<Value>, ProjectionError> {
    value.as_list().ok_or(ProjectionError::TypeMismatch {
        field,
        expected: "list",
    })
}

fn expect_dict<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<&'a crate::bencode::Dict, ProjectionError> {
    value.as_dict().ok_or(ProjectionError::TypeMismatch {
        field,
        expected: "dictionary",
    })
}

/// Extracts a byte-count field, rejecting negative values.
fn expect_length(value: &Value, field: &'static str) -> Result<u64, ProjectionError> {
    u64::try_from(expect_integer(value, field)?).map_err(|_| ProjectionError::TypeMismatch {
        field,
        expected: "non-negative integer",
    })
}

/// Extracts an optional textual field, replacement-decoding invalid UTF-8.
///
/// Byte strings are not guaranteed to be text; fields known to be
/// descriptive are decoded lossily rather than dropped or errored.
fn optional_text(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<String>, ProjectionError> {
    value
        .map(|v| expect_bytes(v, field).map(|b| String::from_utf8_lossy(b).into_owned()))
        .transpose()
}
