use std::{
  fs,
  path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Kubernetes version used when neither the CLI nor the config file names one
pub const DEFAULT_VERSION: &str = "master";

/// File name of the schema for a given Kubernetes version within the schema directory
pub fn file_name(version: &str) -> String {
  format!("swagger-{version}.json")
}

/// Resolve the location of the schema file
///
/// An explicit path always wins. Otherwise the schema is expected at
/// `<dir>/swagger-<version>.json`. Retrieving the file is left to the user,
/// this only checks that it is present.
pub fn locate(explicit: Option<&Path>, version: &str, dir: &Path) -> Result<PathBuf> {
  let path = match explicit {
    Some(path) => path.to_path_buf(),
    None => dir.join(file_name(version)),
  };

  if !path.is_file() {
    return Err(Error::SchemaNotFound { path });
  }

  Ok(path)
}

/// Read and parse the schema file into a generic JSON tree
pub fn read(path: &Path) -> Result<Value> {
  debug!("Opening the schema file for reading: {}", path.display());
  let contents = fs::read(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;

  parse(&contents)
}

/// Parse raw schema bytes into a generic JSON tree
pub fn parse(bytes: &[u8]) -> Result<Value> {
  Ok(serde_json::from_slice(bytes)?)
}

/// Name of the JSON type held by a value, used in error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn type_error(fields: &[&str], expected: &'static str, found: &Value) -> Error {
  Error::FieldType {
    path: fields.join("."),
    expected,
    found: kind_of(found),
  }
}

/// Walk `fields` from `obj` and return the value found at the end of the path
///
/// Returns `Ok(None)` when any field along the path is absent and an error when
/// an intermediate value is not an object.
pub fn nested_field<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Result<Option<&'a Value>> {
  let Some((last, parents)) = fields.split_last() else {
    return Ok(None);
  };

  let mut current = obj;
  for (depth, field) in parents.iter().enumerate() {
    match current.get(*field) {
      None => return Ok(None),
      Some(Value::Object(map)) => current = map,
      Some(other) => return Err(type_error(&fields[..=depth], "object", other)),
    }
  }

  Ok(current.get(*last))
}

/// String value at the end of `fields`
pub fn nested_str<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Result<Option<&'a str>> {
  match nested_field(obj, fields)? {
    None => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.as_str())),
    Some(other) => Err(type_error(fields, "string", other)),
  }
}

/// Array value at the end of `fields`
pub fn nested_slice<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Result<Option<&'a [Value]>> {
  match nested_field(obj, fields)? {
    None => Ok(None),
    Some(Value::Array(items)) => Ok(Some(items.as_slice())),
    Some(other) => Err(type_error(fields, "array", other)),
  }
}

/// Object value at the end of `fields`
pub fn nested_map<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Result<Option<&'a Map<String, Value>>> {
  match nested_field(obj, fields)? {
    None => Ok(None),
    Some(Value::Object(map)) => Ok(Some(map)),
    Some(other) => Err(type_error(fields, "object", other)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      other => panic!("expected object, got {other}"),
    }
  }

  #[test]
  fn nested_str_found() {
    let obj = object(json!({ "description": "Pod is a collection of containers" }));
    assert_eq!(
      nested_str(&obj, &["description"]).unwrap(),
      Some("Pod is a collection of containers")
    );
  }

  #[test]
  fn nested_str_missing_is_none() {
    let obj = object(json!({ "type": "object" }));
    assert_eq!(nested_str(&obj, &["description"]).unwrap(), None);
  }

  #[test]
  fn nested_str_wrong_type_is_error() {
    let obj = object(json!({ "description": 42 }));
    let err = nested_str(&obj, &["description"]).unwrap_err();
    assert_eq!(err.to_string(), "field `description` is number, expected string");
  }

  #[test]
  fn nested_slice_wrong_type_is_error() {
    let obj = object(json!({ "x-kubernetes-group-version-kind": "v1/Pod" }));
    assert!(nested_slice(&obj, &["x-kubernetes-group-version-kind"]).is_err());
  }

  #[test]
  fn nested_map_walks_path() {
    let obj = object(json!({ "properties": { "spec": { "description": "desired state" } } }));
    let spec = nested_map(&obj, &["properties", "spec"]).unwrap().unwrap();
    assert_eq!(nested_str(spec, &["description"]).unwrap(), Some("desired state"));
  }

  #[test]
  fn nested_field_intermediate_not_object() {
    let obj = object(json!({ "properties": ["replicas"] }));
    let err = nested_map(&obj, &["properties", "replicas"]).unwrap_err();
    assert_eq!(err.to_string(), "field `properties` is array, expected object");
  }

  #[test]
  fn nested_field_empty_path() {
    let obj = object(json!({ "a": 1 }));
    assert!(nested_field(&obj, &[]).unwrap().is_none());
  }

  #[test]
  fn parse_invalid_json() {
    let err = parse(b"{ definitions: ").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().starts_with("error parsing the JSON"));
  }

  #[test]
  fn locate_versioned_file() {
    let tmp = tempfile::tempdir().unwrap();
    let expected = tmp.path().join("swagger-v1.29.0.json");
    fs::write(&expected, "{}").unwrap();

    let path = locate(None, "v1.29.0", tmp.path()).unwrap();
    assert_eq!(path, expected);
  }

  #[test]
  fn locate_explicit_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let explicit = tmp.path().join("openapi.json");
    fs::write(&explicit, "{}").unwrap();

    let path = locate(Some(explicit.as_path()), "master", Path::new("does-not-exist")).unwrap();
    assert_eq!(path, explicit);
  }

  #[test]
  fn locate_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let err = locate(None, "master", tmp.path()).unwrap_err();
    assert!(matches!(err, Error::SchemaNotFound { .. }));
  }

  #[test]
  fn read_missing_file_is_io_error() {
    let err = read(Path::new("/tmp/does-not-exist-k8s-deprecations.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
