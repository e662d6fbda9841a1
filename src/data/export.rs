use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::loader::{
    CLUB_FROM, CLUB_TO, FEE, LAT_FROM, LAT_TO, LON_FROM, LON_TO, MARKET_VALUE, NAME, SEASON,
};
use super::model::TransferRecord;

/// Write records as CSV with the source column names as header.
pub fn write_csv<W: Write>(records: &[TransferRecord], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for r in records {
        writer.serialize(r).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Write records as a single-batch Parquet file.
pub fn write_parquet(records: &[TransferRecord], path: &Path) -> Result<()> {
    let text = |f: fn(&TransferRecord) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&TransferRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(SEASON, DataType::Utf8, false),
        Field::new(NAME, DataType::Utf8, false),
        Field::new(CLUB_FROM, DataType::Utf8, false),
        Field::new(CLUB_TO, DataType::Utf8, false),
        Field::new(LAT_FROM, DataType::Float64, false),
        Field::new(LON_FROM, DataType::Float64, false),
        Field::new(LAT_TO, DataType::Float64, false),
        Field::new(LON_TO, DataType::Float64, false),
        Field::new(MARKET_VALUE, DataType::Float64, false),
        Field::new(FEE, DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| r.season.as_str()),
            text(|r| r.player_name.as_str()),
            text(|r| r.club_from.as_str()),
            text(|r| r.club_to.as_str()),
            number(|r| r.lat_from),
            number(|r| r.lon_from),
            number(|r| r.lat_to),
            number(|r| r.lon_to),
            number(|r| r.market_value),
            number(|r| r.fee),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_bundled, read_csv};

    #[test]
    fn csv_export_reads_back() {
        let bundled = load_bundled().unwrap();
        let mut buf = Vec::new();
        write_csv(&bundled.records, &mut buf).unwrap();

        let header = String::from_utf8_lossy(&buf);
        assert!(header.starts_with("Season,name,Club From,Club To,"));
        assert_eq!(read_csv(buf.as_slice()).unwrap().records, bundled.records);
    }
}
