//! ASDF files: a YAML tree followed by binary blocks.
//!
//! File layout:
//!
//! ```text
//! #ASDF 1.0.0
//! #ASDF_STANDARD 1.5.0
//! %YAML 1.1
//! %TAG ! tag:stsci.edu:asdf/
//! --- !core/asdf-1.1.0
//! instrument: Lir
//! ...                 # metadata keys
//! data: !core/ndarray-1.0.0
//!   source: 0
//!   datatype: float64
//!   byteorder: little
//!   shape: [10, 20]
//! ...
//! \xd3BLK <header> <data>   # block 0
//! ```
//!
//! The `data` node may instead hold the array inline as nested lists.

use ndarray::{ArrayD, IxDyn};
use satmap::Metadata;
use serde_json::Value;
use serde_yaml::Value as YamlValue;
use tracing::debug;

use super::Loader;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::kind::ContainerKind;
use crate::record::{as_record, parse_metadata};

const BLOCK_MAGIC: &[u8; 4] = b"\xd3BLK";
const TREE_END: &[u8] = b"\n...";

/// Fixed part of a block header after the magic and the header size field.
const BLOCK_HEADER_LEN: usize = 48;

const FLAG_STREAMED: u32 = 0x1;

/// Reads `.asdf` archive files.
#[derive(Debug, Clone, Default)]
pub struct AsdfLoader {
    config: LoaderConfig,
}

impl AsdfLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }
}

impl Loader for AsdfLoader {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Asdf
    }

    fn load(&self, bytes: &[u8]) -> LoaderResult<(Metadata, ArrayD<f64>)> {
        if !bytes.starts_with(b"#ASDF") {
            return Err(LoaderError::InvalidFormat(
                "missing #ASDF header".to_string(),
            ));
        }

        let (tree_bytes, rest) = split_tree(bytes);
        let tree = parse_tree(tree_bytes)?;
        let record = as_record(&tree)?;
        let metadata = parse_metadata(record, &self.config)?;

        let node = record
            .get("data")
            .ok_or_else(|| LoaderError::MissingField("data".to_string()))?;
        let data = match node {
            Value::Array(_) => inline_array(node)?,
            Value::Object(fields) => match fields.get("data") {
                Some(inline @ Value::Array(_)) => inline_array(inline)?,
                _ => {
                    let blocks = read_blocks(rest)?;
                    block_array(&BlockRef::from_node(fields)?, &blocks)?
                }
            },
            other => {
                return Err(LoaderError::InvalidFormat(format!(
                    "'data' is not an ndarray node: {}",
                    other
                )))
            }
        };

        debug!(
            shape = ?data.shape(),
            instrument = %metadata.instrument,
            "Loaded asdf file"
        );
        Ok((metadata, data))
    }
}

/// Split the file at the end of the YAML document (`...` line).
fn split_tree(bytes: &[u8]) -> (&[u8], &[u8]) {
    match find(bytes, TREE_END) {
        Some(pos) => {
            let end = pos + TREE_END.len();
            (&bytes[..end], &bytes[end..])
        }
        None => (bytes, &[]),
    }
}

/// Parse the YAML tree into a tag-free JSON value.
fn parse_tree(bytes: &[u8]) -> LoaderResult<Value> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LoaderError::InvalidFormat(format!("tree is not UTF-8: {}", e)))?;

    // Comment lines and directives precede the document proper.
    let document: String = text
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('%'))
        .collect::<Vec<_>>()
        .join("\n");

    let yaml: YamlValue = serde_yaml::from_str(&document)?;
    yaml_to_json(yaml)
}

fn yaml_to_json(value: YamlValue) -> LoaderResult<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // NaN and infinities have no JSON form.
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<LoaderResult<_>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                let key = match key {
                    YamlValue::String(s) => s,
                    YamlValue::Number(n) => n.to_string(),
                    YamlValue::Bool(b) => b.to_string(),
                    other => {
                        return Err(LoaderError::InvalidFormat(format!(
                            "unsupported mapping key {:?}",
                            other
                        )))
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// A nested list of numbers as an n-dimensional array. Nulls read as NaN.
fn inline_array(node: &Value) -> LoaderResult<ArrayD<f64>> {
    let mut shape = Vec::new();
    let mut cursor = node;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut values = Vec::with_capacity(shape.iter().product());
    flatten(node, &shape, &mut values)?;
    ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| LoaderError::InvalidFormat(format!("inline array: {}", e)))
}

fn flatten(node: &Value, shape: &[usize], out: &mut Vec<f64>) -> LoaderResult<()> {
    match (node, shape.split_first()) {
        (Value::Array(items), Some((&len, inner))) if items.len() == len => {
            for item in items {
                flatten(item, inner, out)?;
            }
            Ok(())
        }
        (Value::Null, None) => {
            out.push(f64::NAN);
            Ok(())
        }
        (Value::Number(n), None) => {
            out.push(n.as_f64().unwrap_or(f64::NAN));
            Ok(())
        }
        _ => Err(LoaderError::InvalidFormat(
            "inline array is ragged or holds non-numeric values".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataType {
    Float64,
    Float32,
    Int64,
    Int32,
    Int16,
    Uint16,
    Uint8,
}

impl DataType {
    fn parse(name: &str) -> LoaderResult<Self> {
        match name {
            "float64" => Ok(DataType::Float64),
            "float32" => Ok(DataType::Float32),
            "int64" => Ok(DataType::Int64),
            "int32" => Ok(DataType::Int32),
            "int16" => Ok(DataType::Int16),
            "uint16" => Ok(DataType::Uint16),
            "uint8" => Ok(DataType::Uint8),
            other => Err(LoaderError::InvalidFormat(format!(
                "unsupported datatype '{}'",
                other
            ))),
        }
    }

    fn width(&self) -> usize {
        match self {
            DataType::Float64 | DataType::Int64 => 8,
            DataType::Float32 | DataType::Int32 => 4,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Uint8 => 1,
        }
    }
}

/// An ndarray node pointing into a binary block.
#[derive(Debug, Clone, PartialEq)]
struct BlockRef {
    source: usize,
    datatype: DataType,
    byteorder: ByteOrder,
    shape: Vec<usize>,
    offset: usize,
}

impl BlockRef {
    fn from_node(fields: &serde_json::Map<String, Value>) -> LoaderResult<Self> {
        let source = match fields.get("source") {
            Some(Value::Number(n)) => n.as_u64().map(|v| v as usize),
            Some(Value::String(s)) => {
                return Err(LoaderError::InvalidFormat(format!(
                    "external block source '{}' is not supported",
                    s
                )))
            }
            _ => None,
        }
        .ok_or_else(|| LoaderError::MissingField("data.source".to_string()))?;

        let datatype = fields
            .get("datatype")
            .and_then(Value::as_str)
            .ok_or_else(|| LoaderError::MissingField("data.datatype".to_string()))
            .and_then(DataType::parse)?;

        let byteorder = match fields.get("byteorder").and_then(Value::as_str) {
            Some("little") => ByteOrder::Little,
            Some("big") => ByteOrder::Big,
            Some(other) => {
                return Err(LoaderError::InvalidFormat(format!(
                    "unknown byteorder '{}'",
                    other
                )))
            }
            None => return Err(LoaderError::MissingField("data.byteorder".to_string())),
        };

        let shape = fields
            .get("shape")
            .and_then(Value::as_array)
            .ok_or_else(|| LoaderError::MissingField("data.shape".to_string()))?
            .iter()
            .map(|dim| {
                dim.as_u64().map(|d| d as usize).ok_or_else(|| {
                    LoaderError::InvalidFormat(format!("unsupported shape entry {}", dim))
                })
            })
            .collect::<LoaderResult<Vec<_>>>()?;

        if fields.get("strides").is_some_and(|s| !s.is_null()) {
            return Err(LoaderError::InvalidFormat(
                "strided arrays are not supported".to_string(),
            ));
        }

        let offset = fields
            .get("offset")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;

        Ok(Self {
            source,
            datatype,
            byteorder,
            shape,
            offset,
        })
    }
}

/// Split the bytes after the tree into block payloads (the used bytes of
/// each block).
fn read_blocks(bytes: &[u8]) -> LoaderResult<Vec<&[u8]>> {
    let mut blocks = Vec::new();
    let mut pos = match find(bytes, BLOCK_MAGIC) {
        Some(pos) => pos,
        None => return Ok(blocks),
    };

    while bytes.len() >= pos + 6 && &bytes[pos..pos + 4] == BLOCK_MAGIC {
        let header_size = u16::from_be_bytes([bytes[pos + 4], bytes[pos + 5]]) as usize;
        let header_start = pos + 6;
        if header_size < BLOCK_HEADER_LEN || bytes.len() < header_start + header_size {
            return Err(LoaderError::InvalidFormat(format!(
                "truncated header for block {}",
                blocks.len()
            )));
        }

        let h = &bytes[header_start..header_start + BLOCK_HEADER_LEN];
        let flags = u32::from_be_bytes([h[0], h[1], h[2], h[3]]);
        let compression = &h[4..8];
        let allocated = be_u64(&h[8..16]) as usize;
        let used = be_u64(&h[16..24]) as usize;

        if compression.iter().any(|&b| b != 0) {
            return Err(LoaderError::InvalidFormat(format!(
                "block {} is compressed ({}); only uncompressed blocks are supported",
                blocks.len(),
                String::from_utf8_lossy(compression)
            )));
        }

        let data_start = header_start + header_size;
        if flags & FLAG_STREAMED != 0 {
            blocks.push(&bytes[data_start..]);
            break;
        }
        if bytes.len() < data_start + allocated || used > allocated {
            return Err(LoaderError::InvalidFormat(format!(
                "block {} runs past the end of the file",
                blocks.len()
            )));
        }

        blocks.push(&bytes[data_start..data_start + used]);
        pos = data_start + allocated;
    }

    Ok(blocks)
}

fn block_array(node: &BlockRef, blocks: &[&[u8]]) -> LoaderResult<ArrayD<f64>> {
    let block = blocks.get(node.source).ok_or_else(|| {
        LoaderError::InvalidFormat(format!(
            "data refers to block {} but the file holds {}",
            node.source,
            blocks.len()
        ))
    })?;

    let count: usize = node.shape.iter().product();
    let len = count * node.datatype.width();
    let raw = block
        .get(node.offset..node.offset + len)
        .ok_or_else(|| {
            LoaderError::InvalidFormat(format!(
                "block {} holds {} bytes, array needs {}",
                node.source,
                block.len(),
                node.offset + len
            ))
        })?;

    let values = decode(raw, node.datatype, node.byteorder);
    ArrayD::from_shape_vec(IxDyn(&node.shape), values)
        .map_err(|e| LoaderError::InvalidFormat(format!("block array: {}", e)))
}

macro_rules! decode_as {
    ($raw:expr, $ty:ty, $order:expr) => {{
        const WIDTH: usize = std::mem::size_of::<$ty>();
        $raw.chunks_exact(WIDTH)
            .map(|chunk| {
                let mut buf = [0u8; WIDTH];
                buf.copy_from_slice(chunk);
                let value = match $order {
                    ByteOrder::Little => <$ty>::from_le_bytes(buf),
                    ByteOrder::Big => <$ty>::from_be_bytes(buf),
                };
                value as f64
            })
            .collect::<Vec<f64>>()
    }};
}

fn decode(raw: &[u8], datatype: DataType, order: ByteOrder) -> Vec<f64> {
    match datatype {
        DataType::Float64 => decode_as!(raw, f64, order),
        DataType::Float32 => decode_as!(raw, f32, order),
        DataType::Int64 => decode_as!(raw, i64, order),
        DataType::Int32 => decode_as!(raw, i32, order),
        DataType::Int16 => decode_as!(raw, i16, order),
        DataType::Uint16 => decode_as!(raw, u16, order),
        DataType::Uint8 => raw.iter().map(|&b| b as f64).collect(),
    }
}

fn be_u64(b: &[u8]) -> u64 {
    u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tree() {
        let bytes = b"#ASDF 1.0.0\n--- a: 1\n...\n\xd3BLKrest";
        let (tree, rest) = split_tree(bytes);
        assert!(tree.ends_with(b"\n..."));
        assert!(rest.starts_with(b"\n\xd3BLK"));
    }

    #[test]
    fn test_parse_tree_strips_tags() {
        let text = b"#ASDF 1.0.0\n%YAML 1.1\n%TAG ! tag:stsci.edu:asdf/\n--- !core/asdf-1.1.0\nresolution: 30\nnested: !core/ndarray-1.0.0\n  shape: [2, 3]\n...\n";
        let tree = parse_tree(text).unwrap();
        assert_eq!(tree["resolution"], 30);
        assert_eq!(tree["nested"]["shape"][1], 3);
    }

    #[test]
    fn test_inline_array() {
        let node: Value = serde_json::from_str("[[1, 2, 3], [4, null, 6]]").unwrap();
        let data = inline_array(&node).unwrap();
        assert_eq!(data.shape(), &[2, 3]);
        assert_eq!(data[[1, 2]], 6.0);
        assert!(data[[1, 1]].is_nan());
    }

    #[test]
    fn test_ragged_inline_array() {
        let node: Value = serde_json::from_str("[[1, 2], [3]]").unwrap();
        assert!(matches!(
            inline_array(&node),
            Err(LoaderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_decode_byte_orders() {
        let le = 1.5f64.to_le_bytes();
        let be = (-7i32).to_be_bytes();
        assert_eq!(decode(&le, DataType::Float64, ByteOrder::Little), vec![1.5]);
        assert_eq!(decode(&be, DataType::Int32, ByteOrder::Big), vec![-7.0]);
    }

    #[test]
    fn test_compressed_block_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(BLOCK_MAGIC);
        bytes.extend_from_slice(&(BLOCK_HEADER_LEN as u16).to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(b"zlib");
        bytes.extend_from_slice(&[0u8; 40]);
        assert!(matches!(
            read_blocks(&bytes),
            Err(LoaderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_no_blocks() {
        assert!(read_blocks(b"\n").unwrap().is_empty());
    }
}
