//! Lazy depth-first flattening of nested documents
//!
//! Leaves taken directly from the top-level list are always yielded.
//! Leaves reached through a nested list are yielded only when truthy,
//! so `[0, [[]], "apple"]` flattens to `0, "apple"`.

use crate::types::NestedValue;
use std::iter::FusedIterator;
use std::slice;

/// Flatten a nested value into its leaves.
///
/// A missing value, a leaf, or an empty list produce nothing. The returned
/// iterator walks an explicit stack of sibling cursors, so nesting depth
/// costs heap frames rather than call-stack frames.
pub fn flatten(value: Option<&NestedValue>) -> Flatten<'_> {
    let stack = match value {
        Some(NestedValue::List(children)) if !children.is_empty() => vec![children.iter()],
        _ => Vec::new(),
    };
    Flatten { stack }
}

impl NestedValue {
    /// Flatten this value; see [`flatten`]
    pub fn flatten(&self) -> Flatten<'_> {
        flatten(Some(self))
    }
}

/// Iterator over the leaves of a nested value
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    /// One cursor per open list; the bottom frame is the top-level list
    stack: Vec<slice::Iter<'a, NestedValue>>,
}

impl Flatten<'_> {
    /// Number of lists currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a NestedValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            let frame = self.stack.last_mut()?;

            match frame.next() {
                None => {
                    self.stack.pop();
                }
                Some(NestedValue::List(children)) => {
                    if !children.is_empty() {
                        self.stack.push(children.iter());
                    }
                }
                Some(leaf) => {
                    if depth == 1 || leaf.is_truthy() {
                        return Some(leaf);
                    }
                }
            }
        }
    }
}

impl FusedIterator for Flatten<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> NestedValue {
        serde_json::from_str(json).unwrap()
    }

    fn flat(json: &str) -> Vec<NestedValue> {
        doc(json).flatten().cloned().collect()
    }

    fn ints(values: &[i64]) -> Vec<NestedValue> {
        values.iter().copied().map(NestedValue::Integer).collect()
    }

    #[test]
    fn test_flatten_basic() {
        assert_eq!(flat("[[1, 2, [3]], 4]"), ints(&[1, 2, 3, 4]));
        assert_eq!(flat("[1]"), ints(&[1]));
    }

    #[test]
    fn test_flatten_empty_inputs() {
        assert_eq!(flatten(None).count(), 0);
        assert!(flat("[]").is_empty());
        assert!(flat("[[[[[]]]]]").is_empty());
    }

    #[test]
    fn test_flatten_non_container_is_empty() {
        assert!(flat("true").is_empty());
        assert!(flat("42").is_empty());
        assert!(flat(r#""text""#).is_empty());
        assert!(flat("null").is_empty());
    }

    #[test]
    fn test_flatten_negative_numbers() {
        assert_eq!(flat("[-1, -2, -3, -4]"), ints(&[-1, -2, -3, -4]));
    }

    #[test]
    fn test_flatten_strings() {
        assert_eq!(
            flat(r#"[["this", ["should"]], [[["solve"]]], ["this"], "problem"]"#),
            vec![
                NestedValue::from("this"),
                NestedValue::from("should"),
                NestedValue::from("solve"),
                NestedValue::from("this"),
                NestedValue::from("problem"),
            ]
        );
    }

    #[test]
    fn test_flatten_mixed_types_in_order() {
        let leaves = flat(r#"[["Approach"], 3, [[["is"], ["better"]], "than"], "Approach", 2, ["and", [[[1]]]]]"#);
        let rendered: Vec<String> = leaves.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["Approach", "3", "is", "better", "than", "Approach", "2", "and", "1"]
        );
    }

    #[test]
    fn test_flatten_keeps_top_level_falsy() {
        assert_eq!(
            flat(r#"[0, [[]], "apple"]"#),
            vec![NestedValue::Integer(0), NestedValue::from("apple")]
        );
        assert_eq!(
            flat(r#"[0, "", false, null, 0.0]"#),
            vec![
                NestedValue::Integer(0),
                NestedValue::from(""),
                NestedValue::Bool(false),
                NestedValue::Null,
                NestedValue::Float(0.0),
            ]
        );
    }

    #[test]
    fn test_flatten_drops_nested_falsy() {
        assert_eq!(
            flat(r#"[[0, 1, "", false, null, [0.0]], 2]"#),
            ints(&[1, 2])
        );
    }

    #[test]
    fn test_flatten_is_lazy_and_restartable() {
        let value = doc("[[1, [2]], 3, [4]]");
        let mut leaves = value.flatten();

        assert_eq!(leaves.next(), Some(&NestedValue::Integer(1)));
        assert_eq!(leaves.depth(), 2);

        let resumed = leaves.clone();
        assert_eq!(leaves.count(), 3);
        assert_eq!(resumed.count(), 3);
        assert_eq!(value.flatten().count(), 4);
    }

    #[test]
    fn test_flatten_stops_early_without_draining() {
        let value = NestedValue::from(vec![vec![1_i64; 1000]; 1000]);
        let mut leaves = value.flatten();

        assert_eq!(leaves.next(), Some(&NestedValue::Integer(1)));
        // only the first row is open under the top-level list
        assert_eq!(leaves.depth(), 2);

        let first: Vec<_> = leaves.by_ref().take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(leaves.depth(), 2);
    }

    #[test]
    fn test_flatten_deep_nesting() {
        let mut value = NestedValue::from(vec![7_i64]);
        for _ in 0..2_000 {
            value = NestedValue::List(vec![value]);
        }

        let leaves: Vec<_> = value.flatten().collect();
        assert_eq!(leaves, vec![&NestedValue::Integer(7)]);
    }
}
