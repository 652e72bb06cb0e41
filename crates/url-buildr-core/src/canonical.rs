//! Canonicalization of heterogeneous name/value arguments.
//!
//! Callers may describe parameters and queries as a JSON mapping, as an
//! alternating `name, value, name, value` list, or as a list of such lists.
//! [`accumulate`] folds every shape into a [`ParamMap`].

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::query::ParamMap;

/// Fold `args` into an ordered mapping.
///
/// The first argument decides the shape:
///
/// - an object: its entries become the pairs; later arguments are ignored.
/// - an array: array arguments are flattened (nested arrays included), then
///   the result is read as an alternating list. This accepts both
///   `["a", 1, "b", 2]` and `[["a", 1], ["b", 2]]`.
/// - a string, number or bool: `args` itself is read as an alternating list.
///
/// An alternating list of odd length loses its trailing element. Repeated
/// names keep the last value.
///
/// # Errors
///
/// Returns [`Error::InvalidArgumentShape`] when the first argument is `null`,
/// or when a name or value is an object (or a `null` name).
///
/// A mapping value that is an array renders as its elements joined with `,`,
/// so `{"ids": [1, 2]}` yields `ids=1,2`.
pub fn accumulate(args: &[Value]) -> Result<ParamMap> {
    let Some(first) = args.first() else {
        return Ok(ParamMap::new());
    };

    match first {
        Value::Object(entries) => {
            let mut map = ParamMap::new();
            for (name, value) in entries {
                map.insert(name.as_str(), scalar_value(value)?);
            }
            Ok(map)
        }
        Value::Array(_) => {
            let mut flat = Vec::new();
            flatten_into(args, &mut flat);
            alternating(&flat)
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            alternating(&args.iter().collect::<Vec<_>>())
        }
        Value::Null => Err(Error::InvalidArgumentShape(
            "expected a mapping, a sequence or a scalar, found null".to_string(),
        )),
    }
}

fn flatten_into<'a>(items: &'a [Value], out: &mut Vec<&'a Value>) {
    for item in items {
        match item {
            Value::Array(nested) => flatten_into(nested, out),
            other => out.push(other),
        }
    }
}

fn alternating(items: &[&Value]) -> Result<ParamMap> {
    let mut map = ParamMap::new();
    let mut chunks = items.chunks_exact(2);
    for pair in chunks.by_ref() {
        let name = scalar_name(pair[0])?;
        let value = scalar_value(pair[1])?;
        trace!(%name, %value, "accumulated pair");
        map.insert(name, value);
    }
    if let [dropped] = chunks.remainder() {
        debug!(%dropped, "dropping unpaired trailing argument");
    }
    Ok(map)
}

/// Render a scalar the way it appears in a URL.
///
/// Strings are written verbatim, numbers and bools by their JSON display.
/// Arrays, objects and `null` have no scalar form.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_name(value: &Value) -> Result<String> {
    scalar_to_string(value).ok_or_else(|| {
        Error::InvalidArgumentShape(format!("name must be a string or number, found {value}"))
    })
}

/// Value position: `null` renders literally, arrays join their elements with
/// `,` (`null` elements contribute an empty string).
fn scalar_value(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Array(items) => joined(items),
        other => scalar_to_string(other).ok_or_else(|| {
            Error::InvalidArgumentShape(format!("value must be a scalar, found {other}"))
        }),
    }
}

fn joined(items: &[Value]) -> Result<String> {
    let parts = items
        .iter()
        .map(|item| match item {
            Value::Null => Ok(String::new()),
            other => scalar_value(other),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(map: &ParamMap) -> Vec<(&str, &str)> {
        map.iter().collect()
    }

    #[test]
    fn test_empty_args() {
        assert!(accumulate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_mapping() {
        let map = accumulate(&[json!({"userId": 54298, "active": true})]).unwrap();
        assert_eq!(pairs(&map), vec![("userId", "54298"), ("active", "true")]);
    }

    #[test]
    fn test_mapping_ignores_trailing_args() {
        let map = accumulate(&[json!({"a": 1}), json!("b"), json!(2)]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1")]);
    }

    #[test]
    fn test_variadic_alternating() {
        let map = accumulate(&[json!("a"), json!(1), json!("b"), json!("two")]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1"), ("b", "two")]);
    }

    #[test]
    fn test_odd_length_drops_trailing() {
        let map = accumulate(&[json!("a"), json!(1), json!("orphan")]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1")]);
    }

    #[test]
    fn test_single_array() {
        let map = accumulate(&[json!(["userId", 54298, "page", 3])]).unwrap();
        assert_eq!(pairs(&map), vec![("userId", "54298"), ("page", "3")]);
    }

    #[test]
    fn test_array_of_pairs() {
        let map = accumulate(&[json!([["a", 1], ["b", 2]])]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1"), ("b", "2")]);

        let map = accumulate(&[json!(["a", 1]), json!(["b", 2])]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_object_inside_sequence_is_invalid_shape() {
        let err = accumulate(&[json!([{"a": 1}, 2])]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentShape(_)));
    }

    #[test]
    fn test_array_first_absorbs_scalar_args() {
        let map = accumulate(&[json!(["a", 1]), json!("b"), json!(2)]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let map = accumulate(&[json!("a"), json!(1), json!("a"), json!(2)]).unwrap();
        assert_eq!(pairs(&map), vec![("a", "2")]);
    }

    #[test]
    fn test_number_as_name() {
        let map = accumulate(&[json!(7), json!("seven")]).unwrap();
        assert_eq!(map.get("7"), Some("seven"));
    }

    #[test]
    fn test_null_value_renders_literally() {
        let map = accumulate(&[json!("a"), Value::Null]).unwrap();
        assert_eq!(map.get("a"), Some("null"));
    }

    #[test]
    fn test_null_first_is_invalid_shape() {
        let err = accumulate(&[Value::Null]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT_SHAPE");
    }

    #[test]
    fn test_object_value_is_invalid_shape() {
        let err = accumulate(&[json!({"a": {"nested": true}})]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentShape(_)));
    }

    #[test]
    fn test_array_value_joins_with_comma() {
        let map = accumulate(&[json!({"ids": [1, 2], "tags": ["a", null, ["b", true]]})]).unwrap();
        assert_eq!(pairs(&map), vec![("ids", "1,2"), ("tags", "a,,b,true")]);
    }

    #[test]
    fn test_object_inside_array_value_is_invalid_shape() {
        let err = accumulate(&[json!({"ids": [1, {"x": 2}]})]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentShape(_)));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&json!("x")), Some("x".to_string()));
        assert_eq!(scalar_to_string(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(scalar_to_string(&json!(false)), Some("false".to_string()));
        assert_eq!(scalar_to_string(&Value::Null), None);
    }
}
