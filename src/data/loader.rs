use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataError;
use super::model::{Dataset, TransferRecord};

/// The dataset shipped with the application.
pub const BUNDLED_JSON: &str = include_str!("../../assets/dinamo_transfers.json");

// Source column names, exactly as exported.
pub const SEASON: &str = "Season";
pub const NAME: &str = "name";
pub const CLUB_FROM: &str = "Club From";
pub const CLUB_TO: &str = "Club To";
pub const LAT_FROM: &str = "Latitude From";
pub const LON_FROM: &str = "Longitude From";
pub const LAT_TO: &str = "Latitude To";
pub const LON_TO: &str = "Longitude To";
pub const MARKET_VALUE: &str = "Market Value";
pub const FEE: &str = "Fee";

const TEXT_COLUMNS: [&str; 4] = [SEASON, NAME, CLUB_FROM, CLUB_TO];
const NUMERIC_COLUMNS: [&str; 6] = [LAT_FROM, LON_FROM, LAT_TO, LON_TO, MARKET_VALUE, FEE];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a transfer dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Season": "23/24", "name": ..., "Fee": 0 }, ...]`
/// * `.csv`     – header row with the same column names
/// * `.parquet` – one column per field, text columns as strings
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} transfers over {} seasons from {}",
        dataset.len(),
        dataset.seasons.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse the dataset compiled into the binary.
pub fn load_bundled() -> Result<Dataset> {
    parse_json(BUNDLED_JSON).context("parsing bundled dataset")
}

// ---------------------------------------------------------------------------
// Row validation shared by every format
// ---------------------------------------------------------------------------

/// Field access for one source row.  Implementations report absent or
/// mistyped cells as [`DataError::MalformedRecord`].
trait FieldSource {
    fn row(&self) -> usize;
    fn text(&self, field: &'static str) -> Result<String, DataError>;
    fn number(&self, field: &'static str) -> Result<f64, DataError>;
}

fn build_record(src: &impl FieldSource) -> Result<TransferRecord, DataError> {
    let row = src.row();

    let text = |field: &'static str| -> Result<String, DataError> {
        // Labels are stored as written; season and club matching is exact.
        let value = src.text(field)?;
        if value.trim().is_empty() {
            return Err(DataError::malformed(row, field, "is empty"));
        }
        Ok(value)
    };
    let number = |field: &'static str| -> Result<f64, DataError> {
        let v = src.number(field)?;
        if !v.is_finite() {
            return Err(DataError::malformed(row, field, format!("is not finite ({v})")));
        }
        Ok(v)
    };
    let in_range = |field: &'static str, v: f64, limit: f64| -> Result<f64, DataError> {
        if v.abs() > limit {
            return Err(DataError::malformed(
                row,
                field,
                format!("{v} is outside [-{limit}, {limit}]"),
            ));
        }
        Ok(v)
    };
    let non_negative = |field: &'static str, v: f64| -> Result<f64, DataError> {
        if v < 0.0 {
            return Err(DataError::malformed(row, field, format!("is negative ({v})")));
        }
        Ok(v)
    };

    Ok(TransferRecord {
        season: text(SEASON)?,
        player_name: text(NAME)?,
        club_from: text(CLUB_FROM)?,
        club_to: text(CLUB_TO)?,
        lat_from: in_range(LAT_FROM, number(LAT_FROM)?, 90.0)?,
        lon_from: in_range(LON_FROM, number(LON_FROM)?, 180.0)?,
        lat_to: in_range(LAT_TO, number(LAT_TO)?, 90.0)?,
        lon_to: in_range(LON_TO, number(LON_TO)?, 180.0)?,
        market_value: non_negative(MARKET_VALUE, number(MARKET_VALUE)?)?,
        fee: non_negative(FEE, number(FEE)?)?,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape of the bundled dataset:
///
/// ```json
/// [
///   {
///     "Season": "23/24",
///     "name": "Josip Šutalo",
///     "Club From": "Dinamo Zagreb",
///     "Club To": "Ajax",
///     "Latitude From": 45.8131, "Longitude From": 15.978,
///     "Latitude To": 52.3676, "Longitude To": 4.9041,
///     "Market Value": 15000000,
///     "Fee": 20700000
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let object = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        records.push(build_record(&JsonRow { row: i, object })?);
    }

    Ok(Dataset::from_records(records))
}

struct JsonRow<'a> {
    row: usize,
    object: &'a Map<String, JsonValue>,
}

impl JsonRow<'_> {
    fn get(&self, field: &'static str) -> Result<&JsonValue, DataError> {
        match self.object.get(field) {
            None => Err(DataError::malformed(self.row, field, "is missing")),
            Some(JsonValue::Null) => Err(DataError::malformed(self.row, field, "is null")),
            Some(v) => Ok(v),
        }
    }
}

impl FieldSource for JsonRow<'_> {
    fn row(&self) -> usize {
        self.row
    }

    fn text(&self, field: &'static str) -> Result<String, DataError> {
        self.get(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DataError::malformed(self.row, field, "is not a string"))
    }

    fn number(&self, field: &'static str) -> Result<f64, DataError> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| DataError::malformed(self.row, field, "is not a number"))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the source column names, one transfer per
/// line.  Column order does not matter.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(build_record(&CsvRow {
            row: row_no,
            headers: &headers,
            record: &record,
        })?);
    }

    Ok(Dataset::from_records(records))
}

struct CsvRow<'a> {
    row: usize,
    headers: &'a [String],
    record: &'a csv::StringRecord,
}

impl CsvRow<'_> {
    fn cell(&self, field: &'static str) -> Result<&str, DataError> {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|idx| self.record.get(idx))
            .ok_or_else(|| DataError::malformed(self.row, field, "is missing"))
    }
}

impl FieldSource for CsvRow<'_> {
    fn row(&self) -> usize {
        self.row
    }

    fn text(&self, field: &'static str) -> Result<String, DataError> {
        self.cell(field).map(str::to_string)
    }

    fn number(&self, field: &'static str) -> Result<f64, DataError> {
        let cell = self.cell(field)?.trim();
        if cell.is_empty() {
            return Err(DataError::malformed(self.row, field, "is missing"));
        }
        cell.parse::<f64>()
            .map_err(|_| DataError::malformed(self.row, field, format!("'{cell}' is not a number")))
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Text columns may be Utf8, LargeUtf8 or Utf8View; numeric columns any
/// integer or float type.  Any other column type is a malformed record, as
/// a mistyped JSON value is.  Accepted columns are normalised with an Arrow
/// cast before rows are read, so files written by Pandas and Polars work
/// alike.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let offset = records.len();
        let mut columns: BTreeMap<&'static str, ArrayRef> = BTreeMap::new();
        for (names, target) in [
            (&TEXT_COLUMNS[..], DataType::Utf8),
            (&NUMERIC_COLUMNS[..], DataType::Float64),
        ] {
            for &name in names {
                let Ok(idx) = schema.index_of(name) else {
                    continue;
                };
                let column = batch.column(idx);
                let source = column.data_type();
                let accepted = match target {
                    DataType::Utf8 => is_text(source),
                    _ => source.is_numeric(),
                };
                if !accepted {
                    return Err(DataError::malformed(
                        offset,
                        name,
                        format!("has column type {source}, expected {target}"),
                    )
                    .into());
                }
                let normalised = cast(column.as_ref(), &target)
                    .with_context(|| format!("converting parquet column '{name}' to {target}"))?;
                columns.insert(name, normalised);
            }
        }

        for row in 0..batch.num_rows() {
            records.push(build_record(&ParquetRow {
                row,
                global_row: offset + row,
                columns: &columns,
            })?);
        }
    }

    Ok(Dataset::from_records(records))
}

fn is_text(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

struct ParquetRow<'a> {
    /// Row within the current batch.
    row: usize,
    /// Row within the file, used in error messages.
    global_row: usize,
    columns: &'a BTreeMap<&'static str, ArrayRef>,
}

impl ParquetRow<'_> {
    fn column(&self, field: &'static str) -> Result<&ArrayRef, DataError> {
        let col = self
            .columns
            .get(field)
            .ok_or_else(|| DataError::malformed(self.global_row, field, "is missing"))?;
        if col.is_null(self.row) {
            return Err(DataError::malformed(self.global_row, field, "is null"));
        }
        Ok(col)
    }
}

impl FieldSource for ParquetRow<'_> {
    fn row(&self) -> usize {
        self.global_row
    }

    fn text(&self, field: &'static str) -> Result<String, DataError> {
        self.column(field)?
            .as_string_opt::<i32>()
            .map(|a| a.value(self.row).to_string())
            .ok_or_else(|| DataError::malformed(self.global_row, field, "is not a string"))
    }

    fn number(&self, field: &'static str) -> Result<f64, DataError> {
        self.column(field)?
            .as_primitive_opt::<Float64Type>()
            .map(|a| a.value(self.row))
            .ok_or_else(|| DataError::malformed(self.global_row, field, "is not a number"))
    }
}
