use super::value::Value;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical token forms:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`
///
/// Dictionary entries are written in stored order. For a decoded value that
/// is the order the keys appeared in the source, so `encode(&decode(data)?)`
/// reproduces `data` byte for byte; a dictionary built by hand is written in
/// insertion order.
///
/// # Examples
///
/// ```
/// use torinfo::bencode::{encode, Dict, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// let mut dict = Dict::new();
/// dict.insert("a", Value::Integer(1));
/// dict.insert("b", Value::Integer(2));
/// assert_eq!(encode(&Value::Dict(dict)), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf);
    buf
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Integer(i) => {
            buf.extend_from_slice(format!("i{}e", i).as_bytes());
        }
        Value::Bytes(b) => {
            encode_bytes(b, buf);
        }
        Value::List(l) => {
            buf.push(b'l');
            for item in l {
                encode_value(item, buf);
            }
            buf.push(b'e');
        }
        Value::Dict(d) => {
            buf.push(b'd');
            for (key, val) in d.iter() {
                encode_bytes(key, buf);
                encode_value(val, buf);
            }
            buf.push(b'e');
        }
    }
}

fn encode_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    buf.extend_from_slice(format!("{}:", bytes.len()).as_bytes());
    buf.extend_from_slice(bytes);
}
