use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
  error::{Error, Result},
  schema,
};

/// Prefix shared by every built-in Kubernetes API definition name
pub const API_PREFIX: &str = "io.k8s.api.";

/// OpenAPI extension that carries the group/version/kind of a definition
pub const GVK_EXTENSION: &str = "x-kubernetes-group-version-kind";

/// Suffix of definitions describing the spec of a resource rather than the resource itself
pub const SPEC_SUFFIX: &str = "Spec";

/// Group/version/kind of a Kubernetes API type
///
/// The group is empty for the core API group (`v1/Pod`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVersionKind {
  pub group: String,
  pub version: String,
  pub kind: String,
}

impl GroupVersionKind {
  pub fn new(group: &str, version: &str, kind: &str) -> Self {
    Self {
      group: group.to_owned(),
      version: version.to_owned(),
      kind: kind.to_owned(),
    }
  }

  /// `group/version/kind`, or `version/kind` for the core group
  pub fn identity(&self) -> String {
    if self.group.is_empty() {
      format!("{}/{}", self.version, self.kind)
    } else {
      format!("{}/{}/{}", self.group, self.version, self.kind)
    }
  }

  /// Both version and kind are known
  pub fn is_complete(&self) -> bool {
    !self.version.is_empty() && !self.kind.is_empty()
  }

  /// Read one element of the extension array; absent or non-string fields are left empty
  fn from_fields(fields: &Map<String, Value>) -> Self {
    let field = |key: &str| {
      schema::nested_str(fields, &[key])
        .ok()
        .flatten()
        .unwrap_or_default()
        .to_owned()
    };

    Self {
      group: field("group"),
      version: field("version"),
      kind: field("kind"),
    }
  }
}

impl fmt::Display for GroupVersionKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.identity())
  }
}

/// Definition names ending in `Spec` describe a nested spec object
pub fn is_spec_like(name: &str) -> bool {
  name.ends_with(SPEC_SUFFIX)
}

/// Raw `x-kubernetes-group-version-kind` extension of a definition
///
/// Returns `Ok(None)` when the extension is absent and an error when it is not
/// an array. The array itself may be empty.
pub fn extension_hints(entry: &Map<String, Value>) -> Result<Option<&[Value]>> {
  schema::nested_slice(entry, &[GVK_EXTENSION])
}

/// Group/version/kind from the first element of the extension array
pub fn from_hints(hints: &[Value]) -> Result<GroupVersionKind> {
  let first = hints
    .first()
    .ok_or_else(|| Error::SchemaFormat(format!("`{GVK_EXTENSION}` is an empty array")))?;

  match first {
    Value::Object(fields) => Ok(GroupVersionKind::from_fields(fields)),
    other => Err(Error::FieldType {
      path: format!("{GVK_EXTENSION}[0]"),
      expected: "object",
      found: schema::kind_of(other),
    }),
  }
}

/// Infer the group/version/kind from a dotted definition name
///
/// `io.k8s.api.apps.v1.DeploymentSpec` gives `apps/v1/Deployment`, while a two
/// segment remainder such as `io.k8s.api.v1.Status` has no group. Names outside
/// of `io.k8s.api.` return an empty group/version/kind.
pub fn infer_from_name(name: &str) -> Result<GroupVersionKind> {
  let Some(remainder) = name.strip_prefix(API_PREFIX) else {
    debug!("{name} is not part of {API_PREFIX} - ignoring...");
    return Ok(GroupVersionKind::default());
  };

  let trim = |kind: &str| kind.strip_suffix(SPEC_SUFFIX).unwrap_or(kind).to_owned();

  match remainder.split('.').collect::<Vec<_>>().as_slice() {
    [group, version, kind] => Ok(GroupVersionKind {
      group: (*group).to_owned(),
      version: (*version).to_owned(),
      kind: trim(*kind),
    }),
    [version, kind] => Ok(GroupVersionKind {
      group: String::new(),
      version: (*version).to_owned(),
      kind: trim(*kind),
    }),
    _ => Err(Error::Inference { name: name.to_owned() }),
  }
}
