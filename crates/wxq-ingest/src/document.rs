//! JSON documents as nested values

use crate::{IngestError, IngestResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
use wxq_core::NestedValue;

/// Load a JSON document from disk
pub fn load_document(path: impl AsRef<Path>) -> IngestResult<NestedValue> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let document = read_document(BufReader::new(file))?;
    debug!(path = %path.display(), "Loaded document");
    Ok(document)
}

/// Parse a JSON document. Objects are rejected; every other JSON value
/// maps onto a [`NestedValue`].
///
/// Nesting depth is unbounded: the parser grows its stack on demand and
/// the conversion walks the tree with an explicit work stack.
pub fn read_document<R: Read>(reader: R) -> IngestResult<NestedValue> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    to_nested(value)
}

/// A list under construction
struct Frame {
    items: std::vec::IntoIter<Value>,
    built: Vec<NestedValue>,
    path: String,
}

fn to_nested(value: Value) -> IngestResult<NestedValue> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    begin(value, "$".to_string(), &mut stack, &mut root)?;
    while let Some(frame) = stack.last_mut() {
        match frame.items.next() {
            Some(item) => {
                let path = format!("{}[{}]", frame.path, frame.built.len());
                begin(item, path, &mut stack, &mut root)?;
            }
            None => {
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut root, NestedValue::List(done.built));
                }
            }
        }
    }

    Ok(root.unwrap_or(NestedValue::Null))
}

/// Open a frame for an array, or convert a leaf in place
fn begin(
    value: Value,
    path: String,
    stack: &mut Vec<Frame>,
    root: &mut Option<NestedValue>,
) -> IngestResult<()> {
    match value {
        Value::Array(items) => {
            stack.push(Frame {
                built: Vec::with_capacity(items.len()),
                items: items.into_iter(),
                path,
            });
        }
        leaf => {
            let leaf = leaf_value(leaf, &path)?;
            attach(stack, root, leaf);
        }
    }
    Ok(())
}

fn attach(stack: &mut [Frame], root: &mut Option<NestedValue>, value: NestedValue) {
    match stack.last_mut() {
        Some(parent) => parent.built.push(value),
        None => *root = Some(value),
    }
}

fn leaf_value(value: Value, path: &str) -> IngestResult<NestedValue> {
    Ok(match value {
        Value::Null => NestedValue::Null,
        Value::Bool(v) => NestedValue::Bool(v),
        Value::Number(n) => match n.as_i64() {
            Some(v) => NestedValue::Integer(v),
            None => NestedValue::Float(n.as_f64().ok_or_else(|| IngestError::UnsupportedValue {
                path: path.to_string(),
                kind: "number",
            })?),
        },
        Value::String(v) => NestedValue::Text(v),
        Value::Object(_) => {
            return Err(IngestError::UnsupportedValue {
                path: path.to_string(),
                kind: "object",
            })
        }
        // arrays are opened as frames by `begin`
        Value::Array(_) => {
            return Err(IngestError::UnsupportedValue {
                path: path.to_string(),
                kind: "array",
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_document() {
        let doc = read_document(r#"[1, [2.5, "x"], null, true]"#.as_bytes()).unwrap();
        assert_eq!(
            doc,
            NestedValue::List(vec![
                NestedValue::Integer(1),
                NestedValue::List(vec![NestedValue::Float(2.5), NestedValue::from("x")]),
                NestedValue::Null,
                NestedValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let doc = read_document("[18446744073709551615]".as_bytes()).unwrap();
        assert!(matches!(doc, NestedValue::List(items) if matches!(items[0], NestedValue::Float(_))));
    }

    #[test]
    fn test_object_rejected_with_path() {
        let err = read_document(r#"[1, [2, {"a": 3}]]"#.as_bytes()).unwrap_err();
        match err {
            IngestError::UnsupportedValue { path, kind } => {
                assert_eq!(path, "$[1][1]");
                assert_eq!(kind, "object");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = read_document("[1, ".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Json(_)));
    }

    #[test]
    fn test_load_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[0, "a"], 0]"#).unwrap();

        let doc = load_document(file.path()).unwrap();
        let leaves: Vec<_> = doc.flatten().cloned().collect();
        assert_eq!(leaves, vec![NestedValue::from("a"), NestedValue::Integer(0)]);
    }

    #[test]
    fn test_deeply_nested_document() {
        let depth = 1000;
        let json = format!("{}7{}", "[".repeat(depth), "]".repeat(depth));

        let doc = read_document(json.as_bytes()).unwrap();
        let leaves: Vec<_> = doc.flatten().cloned().collect();
        assert_eq!(leaves, vec![NestedValue::Integer(7)]);
    }

    #[test]
    fn test_deep_object_path() {
        let json = format!("{}{{}}{}", "[".repeat(300), "]".repeat(300));

        let err = read_document(json.as_bytes()).unwrap_err();
        match err {
            IngestError::UnsupportedValue { path, kind } => {
                assert_eq!(path, format!("${}", "[0]".repeat(300)));
                assert_eq!(kind, "object");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
