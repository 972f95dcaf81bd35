use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{InventorySource, SourceError};
use crate::ops::domain::{InventoryItem, StockStatus};

/// Reads inventory from a CSV drop file (`item_id,name,status,expected_back,notes,updated_at`).
///
/// The file is re-read on every fetch so a POS export landing in the inbox is picked up
/// without a restart. Rows with a blank `name` keep `name: None` and render as the
/// unknown-item placeholder.
#[derive(Debug, Clone)]
pub struct CsvInventoryAdapter {
    path: PathBuf,
}

impl CsvInventoryAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse<R: Read>(reader: R) -> Result<Vec<InventoryItem>, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut items = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(index as u64 + 2);
            let row: InventoryRow = record.deserialize(Some(&headers))?;
            items.push(row.into_item(index as u64 + 1, line)?);
        }

        Ok(items)
    }
}

impl InventorySource for CsvInventoryAdapter {
    fn fetch_current(&self) -> Result<Vec<InventoryItem>, SourceError> {
        tracing::debug!(path = %self.path().display(), "reading inventory inbox");
        let file = std::fs::File::open(self.path()).map_err(|err| {
            tracing::warn!(
                path = %self.path().display(),
                error = %err,
                "inventory inbox unreadable"
            );
            SourceError::Io(err)
        })?;
        Self::parse(file)
    }
}

#[derive(Debug, Deserialize)]
struct InventoryRow {
    item_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expected_back: Option<String>,
    #[serde(default)]
    notes: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    updated_at: Option<String>,
}

impl InventoryRow {
    fn into_item(self, id: u64, line: u64) -> Result<InventoryItem, SourceError> {
        let invalid = |reason: String| SourceError::InvalidRow { line, reason };

        let status: StockStatus = self
            .status
            .parse()
            .map_err(|err: crate::ops::domain::UnknownStockStatus| invalid(err.to_string()))?;

        let expected_back = self
            .expected_back
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|err| invalid(format!("expected_back '{raw}': {err}")))
            })
            .transpose()?;

        let updated_at = match self.updated_at.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| invalid(format!("updated_at '{raw}' is not a timestamp")))?,
            None => Utc::now(),
        };

        Ok(InventoryItem {
            id,
            item_id: self.item_id,
            name: self.name,
            status,
            expected_back,
            notes: self.notes,
            updated_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_and_resolves_statuses() {
        let csv = "item_id,name,status,expected_back,notes,updated_at\n\
i1,Branzino,86,2025-05-04,Supplier delay,2025-05-02T16:00:00Z\n\
i2,Assyrtiko,low,,8 bottles left,2025-05-02\n\
i9,,ok,,,\n";

        let items = CsvInventoryAdapter::parse(Cursor::new(csv)).expect("csv parses");

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].status, StockStatus::EightySix);
        assert_eq!(
            items[0].expected_back,
            NaiveDate::from_ymd_opt(2025, 5, 4)
        );
        assert_eq!(items[1].status, StockStatus::Low);
        assert!(items[1].expected_back.is_none());
        assert_eq!(items[2].display_name(), "Unknown Item");
        assert_eq!(items[2].id, 3);
    }

    #[test]
    fn unknown_status_reports_line_number() {
        let csv = "item_id,name,status\ni1,Branzino,86\ni2,Feta,plenty\n";

        match CsvInventoryAdapter::parse(Cursor::new(csv)) {
            Err(SourceError::InvalidRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("plenty"));
            }
            other => panic!("expected invalid row error, got {other:?}"),
        }
    }

    #[test]
    fn missing_inbox_file_propagates_io_error() {
        let adapter = CsvInventoryAdapter::new("./does-not-exist/inventory.csv");
        match adapter.fetch_current() {
            Err(SourceError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
