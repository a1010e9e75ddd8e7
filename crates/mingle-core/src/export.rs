use crate::core_types::ScheduleSnapshot;
use crate::error::MingleResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the seating plan as CSV: one row per slot row per day with one
/// column per group, male rows first, a blank record between days.
pub fn write_csv<W: Write>(snapshot: &ScheduleSnapshot, writer: W) -> MingleResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for day in 0..snapshot.days {
        for slot in 0..snapshot.males_per_group {
            let row: Vec<String> = (0..snapshot.groups)
                .map(|group| snapshot.male_at[day][group][slot].to_string())
                .collect();
            csv.write_record(&row)?;
        }
        for slot in 0..snapshot.females_per_group {
            let row: Vec<String> = (0..snapshot.groups)
                .map(|group| snapshot.female_at[day][group][slot].to_string())
                .collect();
            csv.write_record(&row)?;
        }
        if day + 1 < snapshot.days {
            csv.write_record([""])?;
        }
    }
    csv.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(
    snapshot: &ScheduleSnapshot,
    path: P,
) -> MingleResult<()> {
    let file = File::create(path)?;
    write_csv(snapshot, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Schedule;

    #[test]
    fn csv_layout_matches_the_grid() {
        let schedule = Schedule::new(2, 2, 1, 2, Some(5)).unwrap();
        let mut out = Vec::new();
        write_csv(&schedule.snapshot(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Two days of three slot rows each, one separator line.
        assert_eq!(lines.len(), 7);
        // Day 0 is canonical: first male row seats ids 0 and 1.
        assert_eq!(lines[0], "0,1");
        assert_eq!(lines[1], "2,3");
        assert_eq!(lines[2], "4,5");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        let schedule = Schedule::new(3, 2, 2, 2, Some(11)).unwrap();
        write_csv_file(&schedule.snapshot(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().next().unwrap().split(',').count() == 3);
    }
}
