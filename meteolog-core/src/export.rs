use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::{model::WeatherRecord, store::WeatherStore};

/// Column titles of the exported sheet, in storage column order.
pub const HEADERS: [&str; 6] = [
    "Температура",
    "Направление ветра",
    "Скорость ветра",
    "Атмосферное давление",
    "Тип осадков",
    "Количество осадков",
];

pub const SHEET_NAME: &str = "Данные";

/// Export target, relative to the working directory.
pub const EXPORT_FILE: &str = "weather_data.xlsx";

/// How many records an export needs; fewer means no file is written.
pub const EXPORT_ROWS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The spreadsheet was written with this many data rows.
    Written(usize),
    /// Fewer than [`EXPORT_ROWS`] records are stored; nothing was written.
    NotEnoughData,
}

/// One-shot export branch: all-or-nothing at [`EXPORT_ROWS`] records.
pub async fn export_last_ten(store: &WeatherStore, path: &Path) -> Result<ExportOutcome> {
    let records = store.last_n(EXPORT_ROWS).await?;
    export_records(&records, path)
}

/// Gate and write: fewer than [`EXPORT_ROWS`] records means no file is
/// touched, otherwise the spreadsheet is written to `path`.
pub fn export_records(records: &[WeatherRecord], path: &Path) -> Result<ExportOutcome> {
    if (records.len() as i64) < EXPORT_ROWS {
        return Ok(ExportOutcome::NotEnoughData);
    }

    write_xlsx(path, records)?;
    log::debug!("wrote {} records to {}", records.len(), path.display());
    Ok(ExportOutcome::Written(records.len()))
}

/// Write one worksheet: bold header row, then the records in given order.
/// Overwrites `path`; the write is not atomic.
pub fn write_xlsx(path: &Path, records: &[WeatherRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), records)
        .context("Failed to lay out the export sheet")?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn fill_sheet(sheet: &mut Worksheet, records: &[WeatherRecord]) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, record.temperature)?;
        sheet.write_string(row, 1, &record.wind_direction)?;
        sheet.write_number(row, 2, record.wind_speed)?;
        sheet.write_number(row, 3, record.pressure)?;
        sheet.write_string(row, 4, &record.precipitation_type)?;
        sheet.write_string(row, 5, &record.precipitation_strength)?;
    }

    Ok(())
}
