//! Tabular I/O for direction lists: CSV in, CSV or Parquet out.

use anyhow::{anyhow, Context, Result};
use fovcheck::{ConeClock, Containment};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Read columns `cone` and `clock` from a CSV file.
pub fn read_cone_clock(path: &Path, degrees: bool) -> Result<Vec<ConeClock>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("cone").cast(DataType::Float64),
            col("clock").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading cone/clock columns from {}", path.display()))?;
    let cone = df.column("cone")?.f64()?;
    let clock = df.column("clock")?.f64()?;
    cone.into_iter()
        .zip(clock.into_iter())
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(a), Some(b)) if degrees => Ok(ConeClock::from_degrees(a, b)),
            (Some(a), Some(b)) => Ok(ConeClock::new(a, b)),
            _ => Err(anyhow!("{}: row {row} has an empty cone or clock", path.display())),
        })
        .collect()
}

/// Columns `cone`, `clock` (radians) and, when given, `containment`.
pub fn to_frame(points: &[ConeClock], labels: Option<&[Containment]>) -> Result<DataFrame> {
    let cone: Vec<f64> = points.iter().map(|p| p.cone).collect();
    let clock: Vec<f64> = points.iter().map(|p| p.clock).collect();
    let df = match labels {
        Some(labels) => {
            let containment: Vec<&str> = labels.iter().map(|c| c.as_str()).collect();
            df!("cone" => cone, "clock" => clock, "containment" => containment)?
        }
        None => df!("cone" => cone, "clock" => clock)?,
    };
    Ok(df)
}

/// Write `df` as Parquet when `path` ends in `.parquet`, CSV otherwise.
pub fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    Ok(())
}
