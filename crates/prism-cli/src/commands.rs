//! Subcommand entry points.

use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use prism_model::Report;
use prism_schema::{SchemaStore, available_versions, schemas_root};
use prism_validate::validate_dataset;

use crate::cli::ValidateArgs;
use crate::summary::apply_table_style;

/// Run a full validation pass and produce the report.
pub fn run_validate(args: &ValidateArgs) -> Result<Report> {
    let span = info_span!("validate", root = %args.root.display());
    let _guard = span.enter();

    let schemas = schemas_root();
    let store = SchemaStore::load(&schemas, args.schema_version.as_deref())
        .context("load schema bundle")?;
    info!(
        version = store.version(),
        schemas = store.schema_count(),
        "schema bundle loaded"
    );

    let outcome = validate_dataset(&args.root, &store).context("validate dataset")?;
    let report = outcome.into_report(store.version());

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(report)
}

/// List installed schema bundle versions, default first.
pub fn run_versions() -> Result<()> {
    let schemas = schemas_root();
    let versions = available_versions(&schemas).context("list schema versions")?;
    let mut table = Table::new();
    table.set_header(vec!["Version", "Default"]);
    apply_table_style(&mut table);
    for version in versions {
        let default = if version == prism_schema::DEFAULT_VERSION {
            "✓"
        } else {
            ""
        };
        table.add_row(vec![version, default.to_string()]);
    }
    println!("{table}");
    Ok(())
}
