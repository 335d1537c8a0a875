//! CSV export of the full program.
//!
//! Flattens all twelve weeks into one row per prescription and writes the
//! file atomically so a half-written export never replaces a good one.

use crate::formulas::{round1, round_to_increment};
use crate::{Error, Result, WeekPlan};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExportRow {
    pub week: u8,
    pub day: u8,
    pub exercise: &'static str,
    pub weight_kg: f64,
    /// Weight rounded to the nearest loadable plate increment
    pub plate_kg: f64,
    pub reps: u32,
    pub sets: u32,
    /// Displayed as a whole number; blank for ramp sets
    pub rpe: Option<u32>,
    pub estimated_max_kg: Option<f64>,
}

/// Flatten the program into export rows, in week/day/slot order
pub fn export_rows(program: &[WeekPlan], increment: f64) -> Vec<ExportRow> {
    program
        .iter()
        .flat_map(|week| {
            week.days.iter().flat_map(move |day| {
                day.prescriptions.iter().map(move |p| ExportRow {
                    week: week.week,
                    day: day.day,
                    exercise: p.exercise.name(),
                    weight_kg: round1(p.weight),
                    plate_kg: round_to_increment(p.weight, increment),
                    reps: p.reps,
                    sets: p.sets,
                    rpe: p.rpe.map(|r| r.round() as u32),
                    estimated_max_kg: p.estimated_max.map(round1),
                })
            })
        })
        .collect()
}

/// Write export rows as CSV to any writer
pub fn write_rows<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export the program to a CSV file
///
/// Writes to a temp file beside the target, syncs it, then renames it into
/// place. Returns the number of rows written.
pub fn write_csv(program: &[WeekPlan], path: &Path, increment: f64) -> Result<usize> {
    let rows = export_rows(program, increment);

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    write_rows(&rows, temp.as_file())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} rows to {:?}", rows.len(), path);
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_program;

    #[test]
    fn test_row_count_and_order() {
        let program = generate_program(90.0, 80.0, 80.0);
        let rows = export_rows(&program, 0.5);
        assert_eq!(rows.len(), 69);

        let first = &rows[0];
        assert_eq!((first.week, first.day), (1, 1));
        assert_eq!(first.exercise, "Bench Press");
        assert_eq!(first.weight_kg, 74.7);
        assert_eq!(first.plate_kg, 74.5);
        assert_eq!(first.rpe, Some(8));
        assert_eq!(first.estimated_max_kg, Some(90.5));

        let last = rows.last().unwrap();
        assert_eq!((last.week, last.day), (12, 3));
        assert_eq!(last.rpe, Some(10));
    }

    #[test]
    fn test_ramp_rows_blank() {
        let program = generate_program(90.0, 80.0, 80.0);
        let rows = export_rows(&program, 0.5);
        let ramp = rows.iter().find(|r| r.week == 1 && r.day == 2).unwrap();
        assert_eq!(ramp.rpe, None);
        assert_eq!(ramp.estimated_max_kg, None);
    }

    #[test]
    fn test_half_rpe_rounds_up() {
        let program = generate_program(90.0, 80.0, 80.0);
        let rows = export_rows(&program, 0.5);
        // Week 3 day 1 opens at RPE 8.5
        let row = rows.iter().find(|r| r.week == 3 && r.day == 1).unwrap();
        assert_eq!(row.rpe, Some(9));
    }

    #[test]
    fn test_write_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("program.csv");

        let program = generate_program(90.0, 80.0, 80.0);
        let count = write_csv(&program, &path, 0.5).unwrap();
        assert_eq!(count, 69);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "week",
                "day",
                "exercise",
                "weight_kg",
                "plate_kg",
                "reps",
                "sets",
                "rpe",
                "estimated_max_kg"
            ]
        );
        assert_eq!(reader.records().count(), 69);
    }

    #[test]
    fn test_write_csv_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("program.csv");
        std::fs::write(&path, "stale").unwrap();

        let program = generate_program(100.0, 90.0, 90.0);
        write_csv(&program, &path, 0.5).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("week,day,exercise"));
        assert!(!contents.contains("stale"));
    }
}
