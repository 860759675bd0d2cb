use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::location::{self, LocationError};
use super::model::{Coordinate, LoadReport, ShotDataset, ShotEvent, ShotOutcome};

/// Event type kept by the loader; every other row is dropped.
pub const SHOT_EVENT_TYPE: &str = "Shot";

/// xG assumed for a shot whose value is missing or unreadable.
pub const DEFAULT_XG: f64 = 0.05;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a shot-event file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one event per row, `location` as a string-encoded pair
/// * `.json`    – `[{ "type": "Shot", "team": ..., "location": [x, y] }, ...]`
/// * `.parquet` – same columns; `location` may be a string or a list column
///
/// Only file-level problems (unreadable file, missing required column) are
/// errors. Bad rows are skipped or defaulted and counted in the
/// [`LoadReport`].
pub fn load_file(path: &Path) -> Result<ShotDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading shots from {}", path.display()))?;

    let report = &dataset.report;
    log::info!(
        "Loaded {} shots from {} rows ({} teams) in {}",
        report.shots_kept,
        report.rows_read,
        dataset.teams.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column resolution shared by all formats
// ---------------------------------------------------------------------------

/// Source columns the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EventType,
    Team,
    Player,
    Location,
    Outcome,
    Xg,
    Minute,
    ShotType,
    Technique,
    BodyPart,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::EventType,
        Field::Team,
        Field::Player,
        Field::Location,
        Field::Outcome,
        Field::Xg,
        Field::Minute,
        Field::ShotType,
        Field::Technique,
        Field::BodyPart,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Field::EventType => "type",
            Field::Team => "team",
            Field::Player => "player",
            Field::Location => "location",
            Field::Outcome => "shot_outcome",
            Field::Xg => "shot_statsbomb_xg",
            Field::Minute => "minute",
            Field::ShotType => "shot_type",
            Field::Technique => "shot_technique",
            Field::BodyPart => "shot_body_part",
        }
    }

    pub fn required(self) -> bool {
        matches!(
            self,
            Field::EventType | Field::Team | Field::Player | Field::Location | Field::Outcome
        )
    }
}

/// Position of each known field in a header row.
#[derive(Debug, Clone)]
struct ColumnMap {
    index: [Option<usize>; Field::ALL.len()],
}

impl ColumnMap {
    /// Match header names (whitespace-trimmed) against the known fields.
    fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<&str> = headers.into_iter().map(clean_header).collect();

        let mut index = [None; Field::ALL.len()];
        for (slot, field) in index.iter_mut().zip(Field::ALL) {
            *slot = headers.iter().position(|h| *h == field.column());
        }

        let missing: Vec<&str> = Field::ALL
            .iter()
            .zip(index.iter())
            .filter(|(field, idx)| field.required() && idx.is_none())
            .map(|(field, _)| field.column())
            .collect();
        if !missing.is_empty() {
            bail!("missing required column(s): {}", missing.join(", "));
        }

        Ok(ColumnMap { index })
    }

    fn get(&self, field: Field) -> Option<usize> {
        self.index[field as usize]
    }
}

fn clean_header(h: &str) -> &str {
    h.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

// ---------------------------------------------------------------------------
// RawShot – one undecoded row, format independent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
enum RawLocation {
    #[default]
    Missing,
    Text(String),
    Numbers(Vec<f64>),
}

impl RawLocation {
    fn to_coordinate(&self) -> Result<Coordinate, LocationError> {
        match self {
            RawLocation::Missing => Err(LocationError::Empty),
            RawLocation::Text(s) => location::parse_location(s),
            RawLocation::Numbers(v) => location::location_from_numbers(v),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RawShot {
    event_type: Option<String>,
    team: Option<String>,
    player: Option<String>,
    location: RawLocation,
    outcome: Option<String>,
    xg: Option<String>,
    minute: Option<String>,
    shot_type: Option<String>,
    technique: Option<String>,
    body_part: Option<String>,
}

impl RawShot {
    /// Store a text cell, trimming whitespace; blank cells become `None`.
    fn set(&mut self, field: Field, value: Option<&str>) {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        match field {
            Field::EventType => self.event_type = value,
            Field::Team => self.team = value,
            Field::Player => self.player = value,
            Field::Location => {
                self.location = value.map(RawLocation::Text).unwrap_or_default();
            }
            Field::Outcome => self.outcome = value,
            Field::Xg => self.xg = value,
            Field::Minute => self.minute = value,
            Field::ShotType => self.shot_type = value,
            Field::Technique => self.technique = value,
            Field::BodyPart => self.body_part = value,
        }
    }

    fn is_shot(&self) -> bool {
        self.event_type.as_deref() == Some(SHOT_EVENT_TYPE)
    }
}

// ---------------------------------------------------------------------------
// Cleaning: RawShot → ShotEvent
// ---------------------------------------------------------------------------

/// Accumulates rows into a dataset, keeping the data-quality counters.
#[derive(Debug, Default)]
struct ShotCleaner {
    shots: Vec<ShotEvent>,
    report: LoadReport,
}

impl ShotCleaner {
    fn skip_row(&mut self) {
        self.report.rows_read += 1;
        self.report.rows_skipped += 1;
    }

    fn push(&mut self, raw: RawShot) {
        self.report.rows_read += 1;
        if !raw.is_shot() {
            return;
        }
        let (Some(team), Some(player)) = (raw.team, raw.player) else {
            self.report.unnamed_shots += 1;
            return;
        };

        let (location, location_defaulted) = location::or_origin(raw.location.to_coordinate());
        if location_defaulted {
            self.report.bad_locations += 1;
        }

        let xg = match raw.xg.as_deref().and_then(parse_finite) {
            Some(xg) => xg,
            None => {
                self.report.missing_xg += 1;
                DEFAULT_XG
            }
        };

        let minute = raw
            .minute
            .as_deref()
            .and_then(parse_finite)
            .filter(|m| *m >= 0.0)
            .map(|m| m as u32)
            .unwrap_or(0);

        self.shots.push(ShotEvent {
            team,
            player,
            minute,
            location,
            xg,
            outcome: ShotOutcome::parse(raw.outcome.as_deref().unwrap_or("")),
            shot_type: raw.shot_type,
            technique: raw.technique,
            body_part: raw.body_part,
            location_defaulted,
        });
        self.report.shots_kept += 1;
    }

    fn finish(self) -> ShotDataset {
        let report = self.report;
        if report.bad_locations > 0 {
            log::warn!(
                "{} of {} shots had an unreadable location and were placed at (0, 0); \
                 check the source data",
                report.bad_locations,
                report.shots_kept
            );
        }
        if report.missing_xg > 0 {
            log::warn!(
                "{} shots had no usable xG and were given {DEFAULT_XG}",
                report.missing_xg
            );
        }
        if report.unnamed_shots > 0 {
            log::warn!(
                "{} shots had a blank team or player and were dropped",
                report.unnamed_shots
            );
        }
        if report.rows_skipped > 0 {
            log::warn!("{} rows could not be decoded and were skipped", report.rows_skipped);
        }
        ShotDataset::from_shots(self.shots, report)
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one event per row.
/// `location` holds a string-encoded pair: `"[108.1, 35.4]"` or `"['108.1', '35.4']"`.
/// Columns other than the known fields are ignored.
fn load_csv(path: &Path) -> Result<ShotDataset> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    read_csv(reader)
}

/// Read shot rows from any CSV source.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<ShotDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = ColumnMap::resolve(headers.iter())?;

    let mut cleaner = ShotCleaner::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Skipping CSV row {row_no}: {e}");
                cleaner.skip_row();
                continue;
            }
        };

        let mut raw = RawShot::default();
        for field in Field::ALL {
            let cell = columns.get(field).and_then(|idx| record.get(idx));
            raw.set(field, cell);
        }
        cleaner.push(raw);
    }

    Ok(cleaner.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "type": "Shot", "team": "Spain", "player": "Dani Olmo",
///     "location": [104.2, 33.1], "shot_outcome": "Goal",
///     "shot_statsbomb_xg": 0.12, "minute": 51 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ShotDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Read shot records from JSON text.
pub fn read_json(text: &str) -> Result<ShotDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    // An empty array has no keys to check, same as a header-only CSV with no rows.
    if !records.is_empty() {
        let keys: Vec<&str> = records
            .iter()
            .filter_map(|r| r.as_object())
            .flat_map(|obj| obj.keys().map(String::as_str))
            .collect();
        // Only the presence check matters here; cells are looked up by name.
        ColumnMap::resolve(keys)?;
    }

    let mut cleaner = ShotCleaner::default();
    for rec in records {
        let Some(obj) = rec.as_object() else {
            cleaner.skip_row();
            continue;
        };

        let mut raw = RawShot::default();
        for (key, value) in obj {
            let Some(field) = Field::ALL
                .into_iter()
                .find(|f| f.column() == clean_header(key))
            else {
                continue;
            };
            match (field, value) {
                (Field::Location, JsonValue::Array(items)) => {
                    raw.location = RawLocation::Numbers(
                        items
                            .iter()
                            .map(|v| location::json_number(v).unwrap_or(f64::NAN))
                            .collect(),
                    );
                }
                (_, JsonValue::String(s)) => raw.set(field, Some(s.as_str())),
                (_, JsonValue::Null) => raw.set(field, None),
                (_, other) => raw.set(field, Some(other.to_string().as_str())),
            }
        }
        cleaner.push(raw);
    }

    Ok(cleaner.finish())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of events.
///
/// Expected schema: the same column names as the CSV. `location` may be
/// `Utf8` (string-encoded pair) or `List<Float64>` / `LargeList<Float64>`.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ShotDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut cleaner = ShotCleaner::default();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let columns = ColumnMap::resolve(schema.fields().iter().map(|f| f.name().as_str()))?;

        for row in 0..batch.num_rows() {
            let mut raw = RawShot::default();
            for field in Field::ALL {
                let Some(col) = columns.get(field).map(|idx| batch.column(idx)) else {
                    continue;
                };
                if field == Field::Location && is_list(col.data_type()) {
                    raw.location = match extract_f64_list(col, row) {
                        Some(values) => RawLocation::Numbers(values),
                        None => RawLocation::Missing,
                    };
                } else {
                    raw.set(field, cell_text(col, row).as_deref());
                }
            }
            cleaner.push(raw);
        }
    }

    Ok(cleaner.finish())
}

// -- Parquet / Arrow helpers --

fn is_list(data_type: &DataType) -> bool {
    matches!(data_type, DataType::List(_) | DataType::LargeList(_))
}

/// Render any scalar cell as text; `None` for nulls.
fn cell_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    array_value_to_string(col.as_ref(), row).ok()
}

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Option<Vec<f64>> {
    if col.is_null(row) {
        return None;
    }

    let values = match col.data_type() {
        DataType::List(_) => col.as_list_opt::<i32>()?.value(row),
        DataType::LargeList(_) => col.as_list_opt::<i64>()?.value(row),
        _ => return None,
    };

    // The inner array can be Float64 or Float32
    if let Some(arr) = values.as_primitive_opt::<Float64Type>() {
        Some(arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else {
        values
            .as_primitive_opt::<Float32Type>()
            .map(|arr| arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect())
    }
}
