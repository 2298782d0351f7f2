use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
  deprecation,
  error::{Error, Result},
  gvk::{self, GroupVersionKind},
  schema,
};

/// A property of an API type whose description marks it as deprecated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedField {
  pub name: String,
  pub description: String,
}

/// An API type taken from the Kubernetes schema
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
  /// Description with line breaks replaced by spaces
  pub description: String,
  #[serde(flatten)]
  pub gvk: GroupVersionKind,
  /// The type description itself mentions a deprecation
  pub deprecated: bool,
  /// Properties flagged as deprecated, in schema order
  pub deprecated_fields: Vec<DeprecatedField>,
}

impl ApiRecord {
  pub fn identity(&self) -> String {
    self.gvk.identity()
  }

  /// Deprecated itself or carries at least one deprecated field
  pub fn has_deprecations(&self) -> bool {
    self.deprecated || !self.deprecated_fields.is_empty()
  }
}

/// API types keyed by `group/version/kind` (`version/kind` for the core group)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
  apis: BTreeMap<String, ApiRecord>,
}

impl Registry {
  /// Insert a record under its identity, returning the record it replaced
  pub fn insert(&mut self, record: ApiRecord) -> Option<ApiRecord> {
    self.apis.insert(record.identity(), record)
  }

  pub fn get(&self, identity: &str) -> Option<&ApiRecord> {
    self.apis.get(identity)
  }

  pub fn len(&self) -> usize {
    self.apis.len()
  }

  pub fn is_empty(&self) -> bool {
    self.apis.is_empty()
  }

  /// Records in identity order
  pub fn iter(&self) -> impl Iterator<Item = (&String, &ApiRecord)> {
    self.apis.iter()
  }

  /// Copy of the registry holding only the records with deprecations
  pub fn deprecated(&self) -> Registry {
    let apis = self
      .apis
      .iter()
      .filter(|(_, record)| record.has_deprecations())
      .map(|(identity, record)| (identity.clone(), record.clone()))
      .collect();

    Registry { apis }
  }
}

/// Build the registry of API types from a parsed schema document
///
/// Definitions are visited in document order; when two definitions resolve to
/// the same identity the later one replaces the earlier one. Definitions that
/// do not describe an API type are skipped, only a malformed document is an error.
pub fn build_registry(document: &Value) -> Result<Registry> {
  let root = document
    .as_object()
    .ok_or_else(|| Error::SchemaFormat(format!("document root is {}, expected object", schema::kind_of(document))))?;

  let definitions = match schema::nested_map(root, &["definitions"]) {
    Ok(Some(definitions)) => definitions,
    Ok(None) => return Err(Error::SchemaFormat("missing `definitions` collection".to_string())),
    Err(err) => return Err(Error::SchemaFormat(err.to_string())),
  };

  debug!("Iterating through {} definitions", definitions.len());

  let mut registry = Registry::default();
  for (name, value) in definitions {
    let Some(entry) = value.as_object() else {
      debug!("{name} is {} rather than an object - ignoring...", schema::kind_of(value));
      continue;
    };

    debug!("Getting API values from {name}");
    if let Some(record) = classify_entry(name, entry) {
      let identity = record.identity();
      debug!("Adding {identity} to registry. Deprecated: {}", record.deprecated);
      if registry.insert(record).is_some() {
        debug!("{identity} from {name} replaces an earlier definition");
      }
    }
  }

  Ok(registry)
}

/// Decide whether a definition is an API type and extract its record
///
/// A record is only produced when the definition carries a group/version/kind
/// extension or has properties, and its version and kind could be resolved.
/// Definitions that are not `*Spec` objects must also have a description.
pub fn classify_entry(name: &str, entry: &Map<String, Value>) -> Option<ApiRecord> {
  let spec_like = gvk::is_spec_like(name);

  let hints = match gvk::extension_hints(entry) {
    Ok(hints) => hints,
    Err(err) => {
      warn!("invalid {} on {name}: {err} - ignoring...", gvk::GVK_EXTENSION);
      return None;
    }
  };
  let has_hint = hints.is_some();

  // The extension on a spec describes the owning resource, so specs always go by name
  let gvk = match hints {
    Some(hints) if !spec_like => match gvk::from_hints(hints) {
      Ok(gvk) => gvk,
      Err(err) => {
        warn!("invalid {} on {name}: {err} - ignoring...", gvk::GVK_EXTENSION);
        return None;
      }
    },
    _ => match gvk::infer_from_name(name) {
      Ok(gvk) => gvk,
      Err(err) => {
        warn!("{err} - ignoring...");
        return None;
      }
    },
  };

  let description = match schema::nested_str(entry, &["description"]) {
    Ok(Some(description)) if !description.is_empty() => description,
    _ if spec_like => "",
    _ => {
      warn!("no description found for {name} - ignoring...");
      return None;
    }
  };

  let deprecated = deprecation::is_deprecated(description);
  if deprecated {
    debug!("{name} description contains 'deprecated'");
  }

  let properties = match schema::nested_map(entry, &["properties"]) {
    Ok(properties) => properties,
    Err(err) => {
      debug!("unreadable properties in {name}: {err}");
      None
    }
  };
  if properties.is_none() {
    debug!("no properties in {name}");
  }

  let has_properties = properties.is_some_and(|p| !p.is_empty());
  if !has_hint && !has_properties {
    debug!("{name} has neither {} nor properties - ignoring...", gvk::GVK_EXTENSION);
    return None;
  }

  if !gvk.is_complete() {
    debug!("{name} has no version or kind - ignoring...");
    return None;
  }

  Some(ApiRecord {
    description: deprecation::remove_newlines(description),
    gvk,
    deprecated,
    deprecated_fields: properties.map(|p| deprecated_fields(name, p)).unwrap_or_default(),
  })
}

/// Properties whose description mentions a deprecation, in schema order
fn deprecated_fields(name: &str, properties: &Map<String, Value>) -> Vec<DeprecatedField> {
  properties
    .iter()
    .filter_map(|(field, value)| {
      let description = value
        .as_object()
        .and_then(|property| schema::nested_str(property, &["description"]).ok().flatten())
        .filter(|description| !description.is_empty());

      match description {
        None => {
          debug!("property {field} in {name} has no description - ignoring...");
          None
        }
        Some(description) if deprecation::is_deprecated(description) => {
          debug!("{field} property in {name} description contains 'deprecated'");
          Some(DeprecatedField {
            name: field.clone(),
            description: deprecation::remove_newlines(description),
          })
        }
        Some(_) => None,
      }
    })
    .collect()
}
