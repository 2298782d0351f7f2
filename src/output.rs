use std::{fs::File, io::prelude::*};

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::extract::Registry;

/// Converts vec into comma separated string for tabled output
pub fn tabled_vec_to_string(v: &[String]) -> String {
  v.join(", ")
}

#[derive(Clone, Copy, Debug, Default, ValueEnum, Serialize, Deserialize)]
pub enum Format {
  /// JSON format used for logging or writing to a *.json file
  Json,
  /// Text format used for writing to stdout
  #[default]
  Text,
  /// YAML format used for writing to a *.yaml file
  Yaml,
}

#[derive(Tabled)]
#[tabled(rename_all = "UpperCase")]
struct ApiRow {
  api: String,
  deprecated: String,
  #[tabled(rename = "DEPRECATED FIELDS")]
  deprecated_fields: String,
}

/// Renders the registry as a table, one row per API
pub fn to_stdout_table(apis: &Registry) -> String {
  if apis.is_empty() {
    return "✅ - No deprecated APIs or fields found\n".to_string();
  }

  let rows = apis.iter().map(|(identity, record)| ApiRow {
    api: identity.to_owned(),
    deprecated: if record.deprecated { "❌".to_string() } else { String::new() },
    deprecated_fields: tabled_vec_to_string(
      &record
        .deprecated_fields
        .iter()
        .map(|field| field.name.to_owned())
        .collect::<Vec<_>>(),
    ),
  });

  let mut table = Table::new(rows);
  table.with(Style::sharp());

  format!("{table}\n")
}

/// Serialize the registry in the requested format
pub fn format(apis: &Registry, format: &Format) -> Result<String> {
  let output = match format {
    Format::Json => serde_json::to_string_pretty(apis)?,
    Format::Text => to_stdout_table(apis),
    Format::Yaml => serde_yaml::to_string(apis)?,
  };

  Ok(output)
}

/// Write to the named file, or stdout when no file is given
pub(crate) fn write(output: &str, filename: &Option<String>) -> Result<()> {
  match filename {
    Some(filename) => {
      let mut file = File::create(filename)?;
      file.write_all(output.as_bytes())?;
    }
    None => write_terminated(&mut std::io::stdout().lock(), output)?,
  }

  Ok(())
}

/// Write `output` followed by a newline unless it already ends with one
fn write_terminated(writer: &mut impl Write, output: &str) -> Result<()> {
  writer.write_all(output.as_bytes())?;
  if !output.ends_with('\n') {
    writer.write_all(b"\n")?;
  }

  Ok(())
}
