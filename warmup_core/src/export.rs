//! Machine-readable output for generated warmup protocols.

use crate::{Result, WarmupSet};
use std::io::Write;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    set_number: u32,
    weight: f64,
    reps: u32,
    percentage: u8,
    note: &'a str,
}

impl<'a> From<&'a WarmupSet> for CsvRow<'a> {
    fn from(set: &'a WarmupSet) -> Self {
        CsvRow {
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            percentage: set.percentage_of_working_weight,
            note: set.note.map(|n| n.label()).unwrap_or(""),
        }
    }
}

/// Write `sets` as CSV with a header row
pub fn write_csv<W: Write>(sets: &[WarmupSet], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    if sets.is_empty() {
        writer.write_record(["set_number", "weight", "reps", "percentage", "note"])?;
    }

    for set in sets {
        writer.serialize(CsvRow::from(set))?;
    }

    writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON array of `sets`
pub fn to_json(sets: &[WarmupSet]) -> Result<String> {
    Ok(serde_json::to_string_pretty(sets)?)
}
