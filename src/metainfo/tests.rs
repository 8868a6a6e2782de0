use bytes::Bytes;
use sha1::{Digest, Sha1};

use super::*;
use crate::bencode::{decode, encode, Dict, Value};

fn b(s: &[u8]) -> Bytes {
    Bytes::copy_from_slice(s)
}

fn single_file_info() -> Dict {
    let mut info = Dict::new();
    info.insert("name", Value::string("example.txt"));
    info.insert("piece length", Value::Integer(16384));
    info.insert("pieces", Value::Bytes(b(&[0xAB; 20])));
    info.insert("length", Value::Integer(1024));
    info
}

fn torrent_with_info(info: Dict) -> Vec<u8> {
    let mut root = Dict::new();
    root.insert("announce", Value::string("http://tracker"));
    root.insert("info", Value::Dict(info));
    encode(&Value::Dict(root))
}

#[test]
fn test_single_file_projection() {
    let data = torrent_with_info(single_file_info());
    let metainfo = Metainfo::from_bytes(&data).unwrap();

    assert_eq!(metainfo.name.as_ref(), b"example.txt");
    assert_eq!(metainfo.piece_length, 16384);
    assert_eq!(metainfo.piece_count(), 1);

    // One entry keyed by the torrent name, same shape as the multi-file case.
    assert_eq!(metainfo.files.len(), 1);
    let entry = metainfo.files.get(b"example.txt".as_slice()).unwrap();
    assert_eq!(entry.length, 1024);
    assert_eq!(entry.path, vec![b(b"example.txt")]);
    assert_eq!(entry.md5sum, None);
    assert_eq!(metainfo.total_length(), 1024);
}

#[test]
fn test_single_file_md5sum() {
    let mut info = single_file_info();
    info.insert("md5sum", Value::string("d41d8cd98f00b204e9800998ecf8427e"));

    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    let entry = metainfo.files.get(b"example.txt".as_slice()).unwrap();
    assert_eq!(
        entry.md5sum.as_deref(),
        Some(b"d41d8cd98f00b204e9800998ecf8427e".as_slice())
    );
}

#[test]
fn test_multi_file_projection() {
    let mut file_a = Dict::new();
    file_a.insert("length", Value::Integer(100));
    file_a.insert("path", Value::List(vec![Value::string("a.txt")]));

    let mut file_b = Dict::new();
    file_b.insert("length", Value::Integer(200));
    file_b.insert(
        "path",
        Value::List(vec![Value::string("sub"), Value::string("b.txt")]),
    );

    let mut info = Dict::new();
    info.insert("name", Value::string("X"));
    info.insert("piece length", Value::Integer(16384));
    info.insert("pieces", Value::Bytes(b(&[0xCD; 20])));
    info.insert(
        "files",
        Value::List(vec![Value::Dict(file_a), Value::Dict(file_b)]),
    );

    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();

    assert_eq!(metainfo.files.len(), 2);

    let a = metainfo.files.get(b"X/a.txt".as_slice()).unwrap();
    assert_eq!(a.length, 100);
    assert_eq!(a.path, vec![b(b"a.txt")]);

    let sub = metainfo.files.get(b"X/sub/b.txt".as_slice()).unwrap();
    assert_eq!(sub.length, 200);
    assert_eq!(sub.path, vec![b(b"sub"), b(b"b.txt")]);

    assert_eq!(metainfo.total_length(), 300);
}

#[test]
fn test_piece_segmentation() {
    let mut blob = vec![0x11u8; 20];
    blob.extend_from_slice(&[0x22u8; 20]);

    let mut info = single_file_info();
    info.insert("pieces", Value::Bytes(Bytes::from(blob)));

    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    assert_eq!(metainfo.pieces.len(), 2);
    assert_eq!(metainfo.pieces[0], [0x11u8; 20]);
    assert_eq!(metainfo.pieces[1], [0x22u8; 20]);
}

#[test]
fn test_malformed_pieces() {
    // A trailing partial hash is an error, never silently dropped.
    let mut info = single_file_info();
    info.insert("pieces", Value::Bytes(b(&[0u8; 30])));

    let err = Metainfo::from_bytes(&torrent_with_info(info)).unwrap_err();
    assert!(matches!(err, ProjectionError::MalformedPieces(30)));
}

#[test]
fn test_announce_normalizes_to_one_tier() {
    let data = torrent_with_info(single_file_info());
    let metainfo = Metainfo::from_bytes(&data).unwrap();

    assert_eq!(metainfo.announce_tiers, vec![vec![b(b"http://tracker")]]);
}

#[test]
fn test_announce_list_preserved() {
    let tiers = Value::List(vec![
        Value::List(vec![Value::string("http://a1"), Value::string("http://a2")]),
        Value::List(vec![Value::string("http://b1")]),
    ]);

    let mut root = Dict::new();
    root.insert("announce", Value::string("http://primary"));
    root.insert("announce-list", tiers);
    root.insert("info", Value::Dict(single_file_info()));

    let metainfo = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap();

    assert_eq!(
        metainfo.announce_tiers,
        vec![
            vec![b(b"http://a1"), b(b"http://a2")],
            vec![b(b"http://b1")],
        ]
    );
}

#[test]
fn test_trackers_flattened_and_deduplicated() {
    let tiers = Value::List(vec![
        Value::List(vec![Value::string("http://a"), Value::string("http://b")]),
        Value::List(vec![Value::string("http://a")]),
    ]);

    let mut root = Dict::new();
    root.insert("announce-list", tiers);
    root.insert("info", Value::Dict(single_file_info()));

    let metainfo = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap();
    assert_eq!(metainfo.trackers(), vec![b(b"http://a"), b(b"http://b")]);
}

#[test]
fn test_missing_trackers() {
    let mut root = Dict::new();
    root.insert("info", Value::Dict(single_file_info()));

    let err = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap_err();
    assert!(matches!(err, ProjectionError::MissingField("announce")));
}

#[test]
fn test_optional_fields() {
    let metainfo = Metainfo::from_bytes(&torrent_with_info(single_file_info())).unwrap();
    assert_eq!(metainfo.created_by, None);
    assert_eq!(metainfo.creation_date, None);
    assert_eq!(metainfo.comment, None);
    assert!(!metainfo.private);

    let mut root = Dict::new();
    root.insert("announce", Value::string("http://tracker"));
    root.insert("created by", Value::string("torinfo 0.1"));
    root.insert("creation date", Value::Integer(1_700_000_000));
    root.insert("comment", Value::string("hello"));
    root.insert("info", Value::Dict(single_file_info()));

    let metainfo = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap();
    assert_eq!(metainfo.created_by.as_deref(), Some("torinfo 0.1"));
    assert_eq!(metainfo.creation_date, Some(1_700_000_000));
    assert_eq!(metainfo.comment.as_deref(), Some("hello"));
}

#[test]
fn test_textual_field_invalid_utf8_is_replaced() {
    let mut root = Dict::new();
    root.insert("announce", Value::string("http://tracker"));
    root.insert("comment", Value::Bytes(b(&[0x68, 0x69, 0xff])));
    root.insert("info", Value::Dict(single_file_info()));

    let metainfo = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap();
    assert_eq!(metainfo.comment.as_deref(), Some("hi\u{fffd}"));
}

#[test]
fn test_private_flag() {
    let mut info = single_file_info();
    info.insert("private", Value::Integer(1));
    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    assert!(metainfo.private);

    // Any non-zero value counts as set.
    let mut info = single_file_info();
    info.insert("private", Value::Integer(-3));
    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    assert!(metainfo.private);

    let mut info = single_file_info();
    info.insert("private", Value::Integer(0));
    let metainfo = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    assert!(!metainfo.private);
}

#[test]
fn test_root_not_a_dictionary() {
    let err = Metainfo::from_value(&Value::Integer(42)).unwrap_err();
    assert!(matches!(err, ProjectionError::NotADictionary));

    let err = Metainfo::from_bytes(b"li42ee").unwrap_err();
    assert!(matches!(err, ProjectionError::NotADictionary));
}

#[test]
fn test_missing_required_fields() {
    let mut root = Dict::new();
    root.insert("announce", Value::string("http://tracker"));
    let err = Metainfo::from_bytes(&encode(&Value::Dict(root))).unwrap_err();
    assert!(matches!(err, ProjectionError::MissingField("info")));

    for field in ["name", "piece length", "pieces"] {
        let info: Dict = single_file_info()
            .into_iter()
            .filter(|(k, _)| k.as_ref() != field.as_bytes())
            .collect();
        let err = Metainfo::from_bytes(&torrent_with_info(info)).unwrap_err();
        assert!(
            matches!(err, ProjectionError::MissingField(f) if f == field),
            "expected missing {field}, got {err:?}"
        );
    }

    // Neither `length` nor `files` present.
    let info: Dict = single_file_info()
        .into_iter()
        .filter(|(k, _)| k.as_ref() != b"length")
        .collect();
    let err = Metainfo::from_bytes(&torrent_with_info(info)).unwrap_err();
    assert!(matches!(err, ProjectionError::MissingField("length or files")));
}

#[test]
fn test_type_mismatch() {
    let mut info = single_file_info();
    info.insert("piece length", Value::string("not a number"));

    let err = Metainfo::from_bytes(&torrent_with_info(info)).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::TypeMismatch {
            field: "piece length",
            expected: "integer",
        }
    ));

    let mut info = single_file_info();
    info.insert("length", Value::Integer(-1));
    let err = Metainfo::from_bytes(&torrent_with_info(info)).unwrap_err();
    assert!(matches!(err, ProjectionError::TypeMismatch { field: "length", .. }));
}

#[test]
fn test_invalid_bencode_is_surfaced() {
    let err = Metainfo::from_bytes(b"d3:foo").unwrap_err();
    assert!(matches!(err, ProjectionError::Bencode(_)));
}

#[test]
fn test_info_hash_matches_independent_digest() {
    let info = Value::Dict(single_file_info());
    let info_encoded = encode(&info);

    let mut hasher = Sha1::new();
    hasher.update(&info_encoded);
    let expected: [u8; 20] = hasher.finalize().into();

    let metainfo = Metainfo::from_bytes(&torrent_with_info(single_file_info())).unwrap();
    assert_eq!(metainfo.info_hash.as_bytes(), &expected);
    assert_eq!(metainfo.info_hash, InfoHash::from(expected));
    assert_eq!(metainfo.info_hash.to_hex().len(), 40);
}

#[test]
fn test_info_hash_of_unsorted_info_dict() {
    // Keys out of sorted order: the hash must cover the bytes as they
    // appear in the file, not a re-sorted encoding.
    let raw = b"d8:announce14:http://tracker4:infod4:name1:n6:lengthi1e12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";

    // The info dict runs from its 'd' to the 'e' before the root's final 'e'.
    let start = raw
        .windows(5)
        .position(|w| w == b"infod")
        .map(|i| i + 4)
        .unwrap();
    let info_slice = &raw[start..raw.len() - 1];

    let mut hasher = Sha1::new();
    hasher.update(info_slice);
    let expected: [u8; 20] = hasher.finalize().into();

    let metainfo = Metainfo::from_bytes(raw).unwrap();
    assert_eq!(metainfo.info_hash.as_bytes(), &expected);
}

#[test]
fn test_from_value_leaves_input_usable() {
    let data = torrent_with_info(single_file_info());
    let value = decode(&data).unwrap();

    let first = Metainfo::from_value(&value).unwrap();
    let second = Metainfo::from_value(&value).unwrap();
    assert_eq!(first.info_hash, second.info_hash);
    assert_eq!(first.files.len(), second.files.len());
}
