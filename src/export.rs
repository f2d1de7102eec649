//! Dataset export: the document handed to hosts, its JSON and CSV renditions
//! and file saving.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ChartDataset;
use crate::error::ChartResult;

const FILE_NAME_PREFIX: &str = "vibe_chart_";

/// A chart's dataset together with its axis titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub points: ChartDataset,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

impl ExportDocument {
    #[must_use]
    pub fn new(points: ChartDataset, x_axis_label: &str, y_axis_label: &str) -> Self {
        Self {
            points,
            x_axis_label: x_axis_label.to_owned(),
            y_axis_label: y_axis_label.to_owned(),
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// CSV with the axis titles as header.
    ///
    /// Bar rows quote the category; scatter rows are written as is. An empty
    /// dataset gives an empty string, header included.
    #[must_use]
    pub fn to_csv(&self) -> String {
        if self.points.is_empty() {
            return String::new();
        }
        let mut rows = vec![format!("{},{}", self.x_axis_label, self.y_axis_label)];
        match &self.points {
            ChartDataset::Bar(entries) => {
                rows.extend(
                    entries
                        .iter()
                        .map(|entry| format!("{},{}", quote(&entry.category), entry.value)),
                );
            }
            ChartDataset::Scatter(points) => {
                rows.extend(points.iter().map(|point| format!("{},{}", point.x, point.y)));
            }
        }
        rows.join("\n")
    }

    pub fn render(&self, format: ExportFormat) -> ChartResult<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// `vibe_chart_<unix millis>.<ext>`.
#[must_use]
pub fn default_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "{FILE_NAME_PREFIX}{}.{}",
        now.timestamp_millis(),
        format.extension()
    )
}

/// Writes `document` into `dir/file_name` and returns the written path.
pub fn save(
    document: &ExportDocument,
    format: ExportFormat,
    dir: &Path,
    file_name: &str,
) -> ChartResult<PathBuf> {
    let contents = document.render(format)?;
    let path = dir.join(file_name);
    fs::write(&path, contents.as_bytes())?;
    debug!(path = %path.display(), ?format, points = document.points.len(), "dataset exported");
    Ok(path)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{ExportDocument, ExportFormat, default_file_name};
    use crate::core::{BarEntry, ChartDataset, ScatterPoint};

    #[test]
    fn bar_csv_quotes_categories() {
        let document = ExportDocument::new(
            ChartDataset::Bar(vec![BarEntry::new("Sales", 250.0), BarEntry::new("R\"D", 0.0)]),
            "Categories",
            "Value",
        );
        assert_eq!(
            document.to_csv(),
            "Categories,Value\n\"Sales\",250\n\"R\"\"D\",0"
        );
    }

    #[test]
    fn scatter_csv_keeps_click_order() {
        let document = ExportDocument::new(
            ChartDataset::Scatter(vec![
                ScatterPoint::new(12.5, "High"),
                ScatterPoint::new(3.0, "Low"),
            ]),
            "Score",
            "Level",
        );
        assert_eq!(document.to_csv(), "Score,Level\n12.5,High\n3,Low");
    }

    #[test]
    fn empty_dataset_exports_empty_csv() {
        let document = ExportDocument::new(ChartDataset::Scatter(Vec::new()), "x", "y");
        assert_eq!(document.to_csv(), "");
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let document = ExportDocument::new(
            ChartDataset::Bar(vec![BarEntry::new("Sales", 10.0)]),
            "Categories",
            "Value",
        );
        let json = document.to_json().expect("json");
        assert!(json.contains("\"xAxisLabel\": \"Categories\""));
        assert!(json.contains("\"label\": \"Sales\""));
        let parsed: ExportDocument = serde_json::from_str(&json).expect("parse back");
        assert_eq!(parsed, document);
    }

    #[test]
    fn file_name_uses_unix_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).single().expect("timestamp");
        assert_eq!(
            default_file_name(ExportFormat::Csv, now),
            "vibe_chart_1700000000123.csv"
        );
        assert_eq!(ExportFormat::parse(" JSON "), Some(ExportFormat::Json));
    }
}
