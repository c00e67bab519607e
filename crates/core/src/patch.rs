//! JSON Patch (RFC 6902 shaped) applied to flat, typed documents.
//!
//! The target is any `T` that serializes to a JSON object. Each operation
//! addresses one top-level member through a JSON Pointer such as `/genre`.
//! Member names match case-insensitively, so `/Genre` and `/genre` address the
//! same field.
//!
//! Application is all-or-nothing: the first failing operation aborts and the
//! caller's value is left untouched. After every operation the working
//! document must still deserialize into `T`, so a type mismatch is reported
//! against the operation that introduced it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, FieldError};

/// Field key used when an error cannot be attributed to a single member.
pub const DOCUMENT_KEY: &str = "patch";

/// A single patch instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    /// The pointer this operation writes to (or checks, for `test`).
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Move { path, .. }
            | Self::Copy { path, .. }
            | Self::Test { path, .. } => path,
        }
    }
}

/// An ordered list of patch operations, as sent in a PATCH body.
pub type PatchDocument = Vec<PatchOperation>;

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("'{path}' is not a supported JSON pointer; expected '/<member>'")]
    InvalidPath { path: String },

    #[error("The target location specified by path '{path}' was not found")]
    UnknownMember { path: String },

    #[error("The current value at '{path}' is not equal to the test value")]
    TestFailed { path: String },

    #[error("The value at '{path}' is invalid: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Patch target is not a JSON object")]
    NotAnObject,

    #[error("Patch target could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PatchError {
    /// The member a client should look at, if one can be named.
    pub fn member(&self) -> Option<String> {
        match self {
            Self::InvalidPath { .. } | Self::NotAnObject | Self::Serialization(_) => None,
            Self::UnknownMember { path }
            | Self::TestFailed { path }
            | Self::InvalidValue { path, .. } => parse_pointer(path).ok(),
        }
    }
}

impl From<PatchError> for CoreError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::NotAnObject | PatchError::Serialization(_) => {
                CoreError::Internal(err.to_string())
            }
            other => {
                let field = other.member().unwrap_or_else(|| DOCUMENT_KEY.to_string());
                CoreError::InvalidFields(vec![FieldError::new(field, other.to_string())])
            }
        }
    }
}

/// Apply `operations` to a copy of `target` and return the patched value.
///
/// `remove` resets a member to its value in `T::default()`, since every member
/// of a typed target must stay present.
pub fn apply_patch<T>(target: &T, operations: &[PatchOperation]) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let defaults = to_object(&T::default())?;
    let mut doc = to_object(target)?;

    for op in operations {
        apply_operation(&mut doc, &defaults, op)?;
        // Typecheck eagerly so the error names the offending operation.
        serde_json::from_value::<T>(Value::Object(doc.clone())).map_err(|e| {
            PatchError::InvalidValue {
                path: op.path().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(serde_json::from_value(Value::Object(doc))?)
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, PatchError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(PatchError::NotAnObject),
    }
}

fn apply_operation(
    doc: &mut Map<String, Value>,
    defaults: &Map<String, Value>,
    op: &PatchOperation,
) -> Result<(), PatchError> {
    match op {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let key = resolve_member(doc, path)?;
            doc.insert(key, value.clone());
        }
        PatchOperation::Remove { path } => {
            let key = resolve_member(doc, path)?;
            let reset = defaults.get(&key).cloned().unwrap_or(Value::Null);
            doc.insert(key, reset);
        }
        PatchOperation::Move { from, path } => {
            let source = resolve_member(doc, from)?;
            let dest = resolve_member(doc, path)?;
            if source != dest {
                let value = doc.get(&source).cloned().unwrap_or(Value::Null);
                let reset = defaults.get(&source).cloned().unwrap_or(Value::Null);
                doc.insert(source, reset);
                doc.insert(dest, value);
            }
        }
        PatchOperation::Copy { from, path } => {
            let source = resolve_member(doc, from)?;
            let dest = resolve_member(doc, path)?;
            let value = doc.get(&source).cloned().unwrap_or(Value::Null);
            doc.insert(dest, value);
        }
        PatchOperation::Test { path, value } => {
            let key = resolve_member(doc, path)?;
            if !doc.get(&key).is_some_and(|current| json_equal(current, value)) {
                return Err(PatchError::TestFailed { path: path.clone() });
            }
        }
    }
    Ok(())
}

/// Structural JSON equality where numbers compare by value, so `155` and
/// `155.0` are equal.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Decode a single-segment JSON Pointer (`/name`) into its member name.
fn parse_pointer(path: &str) -> Result<String, PatchError> {
    let invalid = || PatchError::InvalidPath {
        path: path.to_string(),
    };
    let segment = path.strip_prefix('/').ok_or_else(invalid)?;
    if segment.is_empty() || segment.contains('/') {
        return Err(invalid());
    }
    Ok(segment.replace("~1", "/").replace("~0", "~"))
}

/// Find the existing member addressed by `path`, ignoring ASCII case.
fn resolve_member(doc: &Map<String, Value>, path: &str) -> Result<String, PatchError> {
    let name = parse_pointer(path)?;
    doc.keys()
        .find(|k| k.eq_ignore_ascii_case(&name))
        .cloned()
        .ok_or_else(|| PatchError::UnknownMember {
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Draft {
        title: String,
        genre: String,
        duration: i32,
    }

    fn draft() -> Draft {
        Draft {
            title: "Dune".into(),
            genre: "Sci-Fi".into(),
            duration: 155,
        }
    }

    fn ops(value: Value) -> PatchDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_rfc6902_document() {
        let doc = ops(json!([
            {"op": "replace", "path": "/title", "value": "Arrival"},
            {"op": "remove", "path": "/genre"},
            {"op": "move", "from": "/title", "path": "/genre"},
            {"op": "test", "path": "/duration", "value": 155}
        ]));
        assert_eq!(doc.len(), 4);
        assert_eq!(doc[2].path(), "/genre");
    }

    #[test]
    fn replace_updates_only_the_addressed_member() {
        let patched = apply_patch(
            &draft(),
            &ops(json!([{"op": "replace", "path": "/genre", "value": "Drama"}])),
        )
        .unwrap();
        assert_eq!(patched.genre, "Drama");
        assert_eq!(patched.title, "Dune");
        assert_eq!(patched.duration, 155);
    }

    #[test]
    fn member_names_match_case_insensitively() {
        let patched = apply_patch(
            &draft(),
            &ops(json!([{"op": "add", "path": "/Duration", "value": 90}])),
        )
        .unwrap();
        assert_eq!(patched.duration, 90);
    }

    #[test]
    fn remove_resets_to_default() {
        let patched =
            apply_patch(&draft(), &ops(json!([{"op": "remove", "path": "/title"}]))).unwrap();
        assert_eq!(patched.title, "");
    }

    #[test]
    fn move_resets_source_and_copy_keeps_it() {
        let moved = apply_patch(
            &draft(),
            &ops(json!([{"op": "move", "from": "/title", "path": "/genre"}])),
        )
        .unwrap();
        assert_eq!(moved.genre, "Dune");
        assert_eq!(moved.title, "");

        let copied = apply_patch(
            &draft(),
            &ops(json!([{"op": "copy", "from": "/title", "path": "/genre"}])),
        )
        .unwrap();
        assert_eq!(copied.genre, "Dune");
        assert_eq!(copied.title, "Dune");
    }

    #[test]
    fn failed_test_aborts_whole_patch() {
        let err = apply_patch(
            &draft(),
            &ops(json!([
                {"op": "replace", "path": "/title", "value": "Other"},
                {"op": "test", "path": "/duration", "value": 100}
            ])),
        )
        .unwrap_err();
        assert_matches!(err, PatchError::TestFailed { ref path } if path == "/duration");
        assert_eq!(err.member().as_deref(), Some("duration"));
    }

    #[test]
    fn test_compares_numbers_by_value() {
        let patched = apply_patch(
            &draft(),
            &ops(json!([
                {"op": "test", "path": "/duration", "value": 155.0},
                {"op": "replace", "path": "/duration", "value": 120}
            ])),
        )
        .unwrap();
        assert_eq!(patched.duration, 120);

        let err = apply_patch(
            &draft(),
            &ops(json!([{"op": "test", "path": "/duration", "value": 155.5}])),
        )
        .unwrap_err();
        assert_matches!(err, PatchError::TestFailed { .. });
    }

    #[test]
    fn test_does_not_coerce_across_types() {
        let err = apply_patch(
            &draft(),
            &ops(json!([{"op": "test", "path": "/duration", "value": "155"}])),
        )
        .unwrap_err();
        assert_matches!(err, PatchError::TestFailed { .. });
    }

    #[test]
    fn unknown_member_is_rejected() {
        let err = apply_patch(
            &draft(),
            &ops(json!([{"op": "replace", "path": "/id", "value": 3}])),
        )
        .unwrap_err();
        assert_matches!(err, PatchError::UnknownMember { .. });
    }

    #[test]
    fn nested_and_root_pointers_are_rejected() {
        for path in ["", "/", "/title/0", "title"] {
            let err = apply_patch(
                &draft(),
                &[PatchOperation::Remove {
                    path: path.to_string(),
                }],
            )
            .unwrap_err();
            assert_matches!(err, PatchError::InvalidPath { .. }, "path {path:?}");
        }
    }

    #[test]
    fn escaped_pointer_segments_are_decoded() {
        assert_eq!(parse_pointer("/a~1b").unwrap(), "a/b");
        assert_eq!(parse_pointer("/a~0b").unwrap(), "a~b");
    }

    #[test]
    fn type_mismatch_names_the_operation_path() {
        let err = apply_patch(
            &draft(),
            &ops(json!([{"op": "replace", "path": "/duration", "value": "long"}])),
        )
        .unwrap_err();
        assert_matches!(err, PatchError::InvalidValue { ref path, .. } if path == "/duration");
    }

    #[test]
    fn empty_document_is_identity() {
        assert_eq!(apply_patch(&draft(), &[]).unwrap(), draft());
    }

    #[test]
    fn converts_to_field_errors_keyed_by_member() {
        let err: CoreError = PatchError::TestFailed {
            path: "/genre".into(),
        }
        .into();
        assert_matches!(err, CoreError::InvalidFields(fields) if fields[0].field == "genre");

        let err: CoreError = PatchError::InvalidPath { path: "".into() }.into();
        assert_matches!(err, CoreError::InvalidFields(fields) if fields[0].field == DOCUMENT_KEY);
    }
}
