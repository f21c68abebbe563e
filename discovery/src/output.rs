//! Output formatting for collections, schematics and reports.

use schematics_core::{Schematic, SchematicCollection};

use crate::report::DiscoveryReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats discovered collections in the requested output format.
pub fn format_collections(
    collections: &[SchematicCollection],
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(collections)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(collections)
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(collections.iter().map(collection_to_markdown).collect()),
        OutputFormat::Table => Ok(collections_to_table(collections)),
    }
}

/// Formats one schematic with its parameters.
pub fn format_schematic(schematic: &Schematic, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(schematic)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(schematic).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(schematic_to_markdown(schematic)),
        OutputFormat::Table => Ok(schematic_to_table(schematic)),
    }
}

/// Formats a discovery report.
pub fn format_report(report: &DiscoveryReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn collection_to_markdown(collection: &SchematicCollection) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", collection.name));
    out.push_str("| Schematic | Description |\n");
    out.push_str("|-----------|-------------|\n");
    for schematic in &collection.schematics {
        out.push_str(&format!(
            "| `{}` | {} |\n",
            schematic.name, schematic.description
        ));
    }
    out.push('\n');

    out
}

fn collections_to_table(collections: &[SchematicCollection]) -> String {
    let mut out = String::new();

    for collection in collections {
        out.push_str(&format!("{}\n", collection.name));
        let max_name = collection
            .schematics
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(4);
        for schematic in &collection.schematics {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                schematic.name,
                schematic.description,
                width = max_name
            ));
        }
    }

    out
}

fn schematic_to_markdown(schematic: &Schematic) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", schematic.qualified_name()));
    if !schematic.description.is_empty() {
        out.push_str(&format!("{}\n\n", schematic.description));
    }

    if !schematic.schema.is_empty() {
        out.push_str("## Parameters\n\n");
        out.push_str("| Parameter | Type | Required | Default | Completion | Description |\n");
        out.push_str("|-----------|------|----------|---------|------------|-------------|\n");
        for param in &schematic.schema {
            let name = if param.positional {
                format!("<{}>", param.name)
            } else {
                format!("--{}", param.name)
            };
            let required = if param.required { "yes" } else { "no" };
            let default = param.default_value.as_deref().unwrap_or("");
            let completion = param.completion.map(|c| c.as_str()).unwrap_or("");
            out.push_str(&format!(
                "| `{name}` | {} | {required} | {default} | {completion} | {} |\n",
                param.value_type, param.description
            ));
        }
        out.push('\n');
    }

    out
}

fn schematic_to_table(schematic: &Schematic) -> String {
    let mut out = String::new();

    out.push_str(&format!("Schematic: {}\n", schematic.qualified_name()));
    if !schematic.description.is_empty() {
        out.push_str(&format!("  {}\n", schematic.description));
    }

    if !schematic.schema.is_empty() {
        out.push_str("\nParameters:\n");
        let labels: Vec<String> = schematic
            .schema
            .iter()
            .map(|p| {
                let mut label = if p.positional {
                    format!("<{}>", p.name)
                } else {
                    format!("--{}", p.name)
                };
                if p.required {
                    label.push('*');
                }
                label
            })
            .collect();
        let max_name = labels.iter().map(String::len).max().unwrap_or(4);

        for (param, label) in schematic.schema.iter().zip(&labels) {
            let mut line = format!("  {:<width$}  {}", label, param.value_type, width = max_name);
            if param.is_constrained() {
                line.push_str(&format!(" [{}]", param.enum_values.join("|")));
            }
            if let Some(ref default) = param.default_value {
                line.push_str(&format!(" (default: {default})"));
            }
            if let Some(completion) = param.completion {
                line.push_str(&format!(" {{{completion}}}"));
            }
            if !param.description.is_empty() {
                line.push_str(&format!("  {}", param.description));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

fn report_to_markdown(report: &DiscoveryReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Schematics Report: {}\n\n", report.base_dir));
    out.push_str(&format!("- **Generated:** {}\n", report.generated_at));
    out.push_str(&format!("- **Collections:** {}\n", report.collection_count));
    out.push_str(&format!("- **Schematics:** {}\n", report.schematic_count));

    if !report.collections.is_empty() {
        out.push_str("\n## Collections\n\n");
        for c in &report.collections {
            out.push_str(&format!("- `{}`: {}\n", c.name, c.schematics.join(", ")));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn report_to_table(report: &DiscoveryReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} collections={} schematics={} warnings={}\n",
        report.base_dir,
        report.collection_count,
        report.schematic_count,
        report.warnings.len(),
    ));
    for c in &report.collections {
        out.push_str(&format!("  {:<30} {}\n", c.name, c.schematics.len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use schematics_core::{
        CompletionType, DiscoveryOutcome, DiscoveryWarning, ParameterDescriptor,
    };

    use super::*;

    fn sample_schematic() -> Schematic {
        let mut schematic = Schematic::new("@nrwl/react", "library");
        schematic.description = "Create a React library".to_string();
        let mut name = ParameterDescriptor::new("name", "string").required();
        name.positional = true;
        let mut style = ParameterDescriptor::new("style", "string");
        style.enum_values = vec!["css".into(), "scss".into()];
        style.default_value = Some("css".into());
        schematic.schema = vec![
            name,
            style,
            ParameterDescriptor::new("project", "string")
                .with_completion(CompletionType::Project),
        ];
        schematic
    }

    fn sample_collections() -> Vec<SchematicCollection> {
        let mut collection = SchematicCollection::new("@nrwl/react");
        collection.schematics.push(sample_schematic());
        vec![collection]
    }

    #[test]
    fn test_format_collections_json() {
        let json = format_collections(&sample_collections(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"name\": \"@nrwl/react\""));
        assert!(json.contains("\"defaultValue\": \"css\""));
    }

    #[test]
    fn test_format_collections_yaml() {
        let yaml = format_collections(&sample_collections(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("@nrwl/react"));
        assert!(yaml.contains("name: library"));
    }

    #[test]
    fn test_format_collections_markdown_and_table() {
        let md = format_collections(&sample_collections(), OutputFormat::Markdown).unwrap();
        assert!(md.contains("# @nrwl/react"));
        assert!(md.contains("| `library` | Create a React library |"));

        let table = format_collections(&sample_collections(), OutputFormat::Table).unwrap();
        assert!(table.starts_with("@nrwl/react\n"));
        assert!(table.contains("library  Create a React library"));
    }

    #[test]
    fn test_format_schematic_markdown() {
        let md = format_schematic(&sample_schematic(), OutputFormat::Markdown).unwrap();
        assert!(md.contains("# @nrwl/react:library"));
        assert!(md.contains("| `<name>` | string | yes |"));
        assert!(md.contains("| `--project` | string | no |  | project |"));
    }

    #[test]
    fn test_format_schematic_table() {
        let table = format_schematic(&sample_schematic(), OutputFormat::Table).unwrap();
        assert!(table.contains("Schematic: @nrwl/react:library"));
        assert!(table.contains("<name>*"));
        assert!(table.contains("[css|scss] (default: css)"));
        assert!(table.contains("{project}"));
    }

    #[test]
    fn test_format_report_markdown_with_warnings() {
        let outcome = DiscoveryOutcome {
            collections: sample_collections(),
            warnings: vec![DiscoveryWarning::new("@nrwl/react", "hook", "bad schema")],
        };
        let report = DiscoveryReport::with_timestamp(
            Path::new("/work"),
            &outcome,
            "2026-01-01T00:00:00+00:00",
        );
        let md = format_report(&report, OutputFormat::Markdown).unwrap();
        assert!(md.contains("# Schematics Report: /work"));
        assert!(md.contains("- **Schematics:** 1"));
        assert!(md.contains("- `@nrwl/react`: library"));
        assert!(md.contains("invalid schematic @nrwl/react:hook: bad schema"));

        let table = format_report(&report, OutputFormat::Table).unwrap();
        assert!(table.contains("collections=1 schematics=1 warnings=1"));
    }
}
