use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::DayExport;
use crate::models::report::DayRecord;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the per-day attendance history of one worker.
    ///
    /// Rows are written oldest first. `file` must be an absolute path.
    pub fn export(
        worker_id: &str,
        days: &[DayRecord],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        if days.is_empty() {
            warning("No days in the selected window.");
            return Ok(());
        }

        let rows: Vec<DayExport> = days
            .iter()
            .rev()
            .map(|d| DayExport::from_record(worker_id, d))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }
}
