use std::path::Path;

use handlebars::{Handlebars, handlebars_helper, no_escape};
use rust_embed::RustEmbed;

use crate::{deprecation, error::Result, extract::Registry};

/// Name of the built-in template used when no template file is given
pub const DEFAULT_TEMPLATE: &str = "deprecations.md";

/// Name a user supplied template is registered under
const USER_TEMPLATE: &str = "user";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

handlebars_helper!(extract_deprecation: |description: str| deprecation::extract_deprecation(description));

/// Renders the registry through a handlebars template
///
/// The registry is the whole template context, keyed by API identity. Templates
/// can call `{{extractDeprecation description}}` to reduce a description to its
/// deprecation note.
pub struct Renderer {
  handlebars: Handlebars<'static>,
  template: String,
}

impl Renderer {
  /// Renderer for the built-in template
  pub fn embedded() -> Result<Self> {
    let mut handlebars = handlebars();
    handlebars.register_embed_templates::<Templates>()?;

    Ok(Self {
      handlebars,
      template: DEFAULT_TEMPLATE.to_string(),
    })
  }

  /// Renderer for a template file on disk
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let mut handlebars = handlebars();
    handlebars.register_template_file(USER_TEMPLATE, path)?;

    Ok(Self {
      handlebars,
      template: USER_TEMPLATE.to_string(),
    })
  }

  /// Renderer for an in-memory template
  pub fn from_source(source: &str) -> Result<Self> {
    let mut handlebars = handlebars();
    handlebars.register_template_string(USER_TEMPLATE, source)?;

    Ok(Self {
      handlebars,
      template: USER_TEMPLATE.to_string(),
    })
  }

  pub fn render(&self, apis: &Registry) -> Result<String> {
    Ok(self.handlebars.render(&self.template, apis)?)
  }
}

fn handlebars() -> Handlebars<'static> {
  let mut handlebars = Handlebars::new();
  // Output is Markdown/Rego/etc., never HTML
  handlebars.register_escape_fn(no_escape);
  handlebars.register_helper("extractDeprecation", Box::new(extract_deprecation));
  handlebars
}
