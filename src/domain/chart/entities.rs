use super::format::ValueFormatter;
use super::value_objects::{ChartKind, DataPoint, Series};
use crate::domain::errors::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

#[derive(Deserialize)]
struct LinePayload {
    series: Vec<Series>,
    #[serde(default)]
    labels: Vec<String>,
}

/// Data fed to one chart instance. Owned by the caller; the engine only
/// reads it (sanitizing a private copy when needed).
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Bar(Vec<DataPoint>),
    Line { series: Vec<Series>, labels: Vec<String> },
    Donut(Vec<DataPoint>),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Bar(_) => ChartKind::Bar,
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Donut(_) => ChartKind::Donut,
        }
    }

    /// Number of logical items: points for bar/donut, the longest series
    /// for line charts.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Bar(points) | ChartData::Donut(points) => points.len(),
            ChartData::Line { series, .. } => series.iter().map(|s| s.data.len()).max().unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse the JSON shape used by the JS API: an array of
    /// `{label, value, colorKey?}` for bar/donut, `{series, labels?}` for
    /// line charts.
    pub fn from_json(kind: ChartKind, json: &str) -> ChartResult<Self> {
        Ok(match kind {
            ChartKind::Bar => ChartData::Bar(serde_json::from_str(json)?),
            ChartKind::Donut => ChartData::Donut(serde_json::from_str(json)?),
            ChartKind::Line => {
                let LinePayload { series, labels } = serde_json::from_str(json)?;
                ChartData::Line { series, labels }
            }
        })
    }

    /// Label of the item at `index`; line charts fall back to a 1-based
    /// position when no label was supplied.
    pub fn label_at(&self, index: usize) -> String {
        match self {
            ChartData::Bar(points) | ChartData::Donut(points) => {
                points.get(index).map(|p| p.label.clone()).unwrap_or_default()
            }
            ChartData::Line { labels, .. } => {
                labels.get(index).cloned().unwrap_or_else(|| (index + 1).to_string())
            }
        }
    }

    /// Check the value invariants: finite everywhere, non-negative for
    /// bar and donut.
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            ChartData::Bar(points) | ChartData::Donut(points) => {
                for p in points {
                    if !p.value.is_finite() || p.value < 0.0 {
                        return Err(ChartError::InvalidValue { label: p.label.clone(), value: p.value });
                    }
                }
            }
            ChartData::Line { series, .. } => {
                for s in series {
                    if let Some(v) = s.data.iter().find(|v| !v.is_finite()) {
                        return Err(ChartError::InvalidValue { label: s.name.clone(), value: *v });
                    }
                }
            }
        }
        Ok(())
    }

    /// Copy with every invalid value replaced by zero.
    pub fn sanitized(&self) -> ChartData {
        let fix = |v: f64, allow_negative: bool| {
            if !v.is_finite() || (!allow_negative && v < 0.0) { 0.0 } else { v }
        };
        match self {
            ChartData::Bar(points) => ChartData::Bar(
                points.iter().map(|p| DataPoint { value: fix(p.value, false), ..p.clone() }).collect(),
            ),
            ChartData::Donut(points) => ChartData::Donut(
                points.iter().map(|p| DataPoint { value: fix(p.value, false), ..p.clone() }).collect(),
            ),
            ChartData::Line { series, labels } => ChartData::Line {
                series: series
                    .iter()
                    .map(|s| Series {
                        data: s.data.iter().map(|v| fix(*v, true)).collect(),
                        ..s.clone()
                    })
                    .collect(),
                labels: labels.clone(),
            },
        }
    }

    /// Row-oriented projection handed to the export collaborator.
    pub fn export_table(&self) -> ExportTable {
        match self {
            ChartData::Bar(points) | ChartData::Donut(points) => ExportTable {
                columns: vec!["value".to_string()],
                rows: points
                    .iter()
                    .map(|p| ExportRow { label: p.label.clone(), values: vec![Some(p.value)] })
                    .collect(),
            },
            ChartData::Line { series, .. } => ExportTable {
                columns: unique_columns(series.iter().map(|s| s.name.as_str())),
                rows: (0..self.len())
                    .map(|i| ExportRow {
                        label: self.label_at(i),
                        values: series.iter().map(|s| s.data.get(i).copied()).collect(),
                    })
                    .collect(),
            },
        }
    }

    /// Plain-text `label: value` lines mirroring the visual chart.
    pub fn accessibility_lines(&self, formatter: &ValueFormatter) -> Vec<String> {
        match self {
            ChartData::Bar(points) | ChartData::Donut(points) => {
                points.iter().map(|p| format!("{}: {}", p.label, formatter.format(p.value))).collect()
            }
            ChartData::Line { series, .. } => series
                .iter()
                .flat_map(|s| {
                    s.data.iter().enumerate().map(move |(i, v)| {
                        format!("{} ({}): {}", s.name, self.label_at(i), formatter.format(*v))
                    })
                })
                .collect(),
        }
    }
}

/// Series names as record keys. `label` is reserved for the row label and
/// repeated names get a ` (n)` suffix so no column overwrites another.
fn unique_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::from(["label".to_string()]);
    names
        .map(|name| {
            let column = (1..)
                .map(|n| if n == 1 { name.to_string() } else { format!("{} ({})", name, n) })
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| name.to_string());
            taken.insert(column.clone());
            column
        })
        .collect()
}

/// One exported row; `values` lines up with `ExportTable::columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Flattened chart data for CSV/image export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Array of `{ "label": .., <column>: .. }` objects.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert("label".to_string(), Value::String(row.label.clone()));
                for (column, value) in self.columns.iter().zip(&row.values) {
                    let cell = value.and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null);
                    record.insert(column.clone(), cell);
                }
                Value::Object(record)
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        Value::Array(self.to_records()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launches() -> ChartData {
        ChartData::Line {
            series: vec![
                Series::new("SpaceX", vec![31.0, 61.0, 96.0]),
                Series::new("CASC", vec![48.0, 64.0]),
            ],
            labels: vec!["2021".into(), "2022".into()],
        }
    }

    #[test]
    fn line_len_uses_longest_series() {
        assert_eq!(launches().len(), 3);
        assert_eq!(launches().label_at(2), "3");
    }

    #[test]
    fn validation_rejects_negative_bars_and_nan_lines() {
        let bars = ChartData::Bar(vec![DataPoint::new("A", -1.0)]);
        assert!(matches!(bars.validate(), Err(ChartError::InvalidValue { .. })));

        let line = ChartData::Line { series: vec![Series::new("s", vec![1.0, f64::NAN])], labels: vec![] };
        assert!(line.validate().is_err());
        assert!(line.sanitized().validate().is_ok());

        let negative_line = ChartData::Line { series: vec![Series::new("s", vec![-4.0])], labels: vec![] };
        assert!(negative_line.validate().is_ok());
    }

    #[test]
    fn sanitize_zeroes_invalid_bars() {
        let bars = ChartData::Bar(vec![DataPoint::new("A", -1.0), DataPoint::new("B", 3.0)]);
        assert_eq!(
            bars.sanitized(),
            ChartData::Bar(vec![DataPoint::new("A", 0.0), DataPoint::new("B", 3.0)])
        );
    }

    #[test]
    fn export_line_rows_fill_missing_with_null() {
        let json = launches().export_table().to_json();
        assert_eq!(
            json,
            r#"[{"label":"2021","SpaceX":31.0,"CASC":48.0},{"label":"2022","SpaceX":61.0,"CASC":64.0},{"label":"3","SpaceX":96.0,"CASC":null}]"#
        );
    }

    #[test]
    fn export_bar_rows_have_label_and_value() {
        let data = ChartData::Bar(vec![DataPoint::new("Falcon 9", 2720.0)]);
        assert_eq!(data.export_table().to_json(), r#"[{"label":"Falcon 9","value":2720.0}]"#);
    }

    #[test]
    fn parses_js_payloads_per_kind() {
        let bars = ChartData::from_json(ChartKind::Bar, r#"[{"label":"A","value":2,"colorKey":"danger"}]"#).unwrap();
        assert_eq!(
            bars,
            ChartData::Bar(vec![DataPoint::new("A", 2.0).with_color(crate::domain::chart::ColorKey::Danger)])
        );

        let line = ChartData::from_json(ChartKind::Line, r#"{"series":[{"name":"s","data":[1,2]}]}"#).unwrap();
        assert_eq!(line.len(), 2);
        assert_eq!(line.label_at(0), "1");

        let err = ChartData::from_json(ChartKind::Donut, r#"{"series":[]}"#).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }

    #[test]
    fn accessibility_lines_use_formatter() {
        let data = ChartData::Donut(vec![DataPoint::new("LEO", 30.0), DataPoint::new("GEO", 10.0)]);
        let lines = data.accessibility_lines(&ValueFormatter::default());
        assert_eq!(lines, vec!["LEO: 30", "GEO: 10"]);
    }

    #[test]
    fn export_columns_never_collide() {
        let data = ChartData::Line {
            series: vec![
                Series::new("label", vec![1.0]),
                Series::new("Crew", vec![2.0]),
                Series::new("Crew", vec![3.0]),
            ],
            labels: vec!["2024".into()],
        };
        let table = data.export_table();
        assert_eq!(table.columns, vec!["label (2)", "Crew", "Crew (2)"]);
        assert_eq!(
            table.to_json(),
            r#"[{"label":"2024","label (2)":1.0,"Crew":2.0,"Crew (2)":3.0}]"#
        );
    }
}
