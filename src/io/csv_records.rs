//! Reading input records from, and writing enriched rows to, CSV.

use crate::io::error::RecordIoError;
use crate::types::record::{InputRecord, OutputRow};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::info;
use std::io::{Read, Write};
use std::path::Path;

const BOM: char = '\u{feff}';

const REPORT_DATE: &str = "report_date";
const LOCATION: &str = "location";
const LAT: &str = "lat";
const LON: &str = "long";

/// Column positions of the required fields within an input header.
struct InputColumns {
    report_date: usize,
    location: usize,
    lat: usize,
    lon: usize,
}

impl InputColumns {
    fn from_header(header: &StringRecord) -> Result<Self, RecordIoError> {
        let names: Vec<&str> = header
            .iter()
            .map(|h| h.trim_start_matches(BOM).trim())
            .collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|n| *n == column)
                .ok_or(RecordIoError::MissingColumn(column))
        };
        Ok(Self {
            report_date: find(REPORT_DATE)?,
            location: find(LOCATION)?,
            lat: find(LAT)?,
            lon: find(LON)?,
        })
    }

    fn record(&self, row: &StringRecord) -> InputRecord {
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();
        InputRecord {
            report_date: field(self.report_date),
            location: field(self.location),
            lat: field(self.lat),
            lon: field(self.lon),
        }
    }
}

/// Reads every record from CSV data with a `report_date, location, lat, long` header.
///
/// Columns are located by name, so their order and any extra columns do not
/// matter. A byte-order mark in front of the first header is ignored.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<InputRecord>, RecordIoError> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    read_from_csv_reader(rdr)
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<InputRecord>, RecordIoError> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RecordIoError::Open(path.to_path_buf(), e))?;
    let records = read_from_csv_reader(rdr)?;
    info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn read_from_csv_reader<R: Read>(
    mut rdr: csv::Reader<R>,
) -> Result<Vec<InputRecord>, RecordIoError> {
    let columns = InputColumns::from_header(rdr.headers()?)?;
    rdr.records()
        .map(|r| r.map(|row| columns.record(&row)).map_err(RecordIoError::from))
        .collect()
}

/// Writes the 19-column header followed by `rows`, every field quoted.
pub fn write_rows<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), RecordIoError> {
    let wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    write_to_csv_writer(wtr, rows)
}

pub fn write_rows_to_path(path: &Path, rows: &[OutputRow]) -> Result<(), RecordIoError> {
    let wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .map_err(|e| RecordIoError::Create(path.to_path_buf(), e))?;
    write_to_csv_writer(wtr, rows)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_to_csv_writer<W: Write>(
    mut wtr: csv::Writer<W>,
    rows: &[OutputRow],
) -> Result<(), RecordIoError> {
    wtr.write_record(OutputRow::header())?;
    for row in rows {
        wtr.write_record(row.to_fields())?;
    }
    wtr.flush()?;
    Ok(())
}
