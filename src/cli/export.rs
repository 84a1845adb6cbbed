//! CLI command for order export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{OrderError, OrderResult};
use crate::export::{export_orders_csv, export_orders_json, export_orders_yaml};
use crate::storage::OrderStore;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON with export metadata
    Json,
    /// CSV, one row per order
    Csv,
    /// YAML, human-readable
    Yaml,
}

/// Export all orders to a file, or to stdout when no path is given
pub fn handle_export_command(
    store: &dyn OrderStore,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> OrderResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                OrderError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(store, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| OrderError::Export(e.to_string()))?;

            println!("Exported orders to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(store, format, &mut writer)?;
            writeln!(writer).map_err(|e| OrderError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    store: &dyn OrderStore,
    format: ExportFormat,
    writer: &mut W,
) -> OrderResult<()> {
    match format {
        ExportFormat::Json => export_orders_json(store, writer, true),
        ExportFormat::Csv => export_orders_csv(store, writer),
        ExportFormat::Yaml => export_orders_yaml(store, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrderPaths;
    use crate::storage::FileOrderStore;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OrderPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = FileOrderStore::from_paths(&paths);
        let output = temp_dir.path().join("orders.yaml");

        handle_export_command(&store, ExportFormat::Yaml, Some(output.clone())).unwrap();

        let contents = std::fs::read_to_string(output).unwrap();
        assert!(contents.contains("order_count: 0"));
    }
}
