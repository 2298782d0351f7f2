use std::path::PathBuf;

/// Errors surfaced while locating, reading, extracting or rendering the API schema
///
/// Structural problems with the document abort the run. Problems with a single
/// definition are absorbed by the extractor and never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("error parsing the JSON, file might be invalid: {0}")]
  Json(#[from] serde_json::Error),

  /// The document does not have the shape of an OpenAPI v2 schema
  #[error("invalid schema document: {0}")]
  SchemaFormat(String),

  /// A field exists but holds a value of the wrong type
  #[error("field `{path}` is {found}, expected {expected}")]
  FieldType {
    path: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("cannot derive valid GVK from {name}")]
  Inference { name: String },

  #[error("schema file not found at {} - download it first or pass --schema", path.display())]
  SchemaNotFound { path: PathBuf },

  #[error("failed to load template: {0}")]
  Template(#[from] handlebars::TemplateError),

  #[error("failed to render template: {0}")]
  Render(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, Error>;
