use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use mingle_core::core_types::SolveReport;
use mingle_core::ScheduleSnapshot;
use std::time::Duration;

pub fn print_summary(report: &SolveReport, elapsed: Duration) {
    let total = report.schedule.total_people() as i64;
    let pair_bound = total * (total - 1) / 2;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![Cell::new("Initial contacts"), num(report.initial_score)]);
    table.add_row(vec![Cell::new("Final contacts"), num(report.final_score)]);
    table.add_row(vec![Cell::new("Pair bound"), num(pair_bound)]);
    table.add_row(vec![
        Cell::new("Avg contacts / person"),
        Cell::new(format!("{:.2}", report.average_contacts))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Repetition penalty"),
        num(report.final_repetition_penalty),
    ]);
    table.add_row(vec![Cell::new("Iterations"), num(report.iterations as i64)]);
    table.add_row(vec![Cell::new("Restarts"), num(report.restarts as i64)]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.3}s", elapsed.as_secs_f64()))
            .set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");
}

pub fn print_schedule(snapshot: &ScheduleSnapshot) {
    for (day, table) in day_tables(snapshot).into_iter().enumerate() {
        println!("\nDay {day}");
        println!("{table}");
    }
}

/// One table per day: a header of group labels, then the male slot rows
/// followed by the female slot rows.
fn day_tables(snapshot: &ScheduleSnapshot) -> Vec<Table> {
    (0..snapshot.days)
        .map(|day| {
            let mut table = Table::new();
            table.load_preset(ASCII_FULL);
            table.set_header(
                (0..snapshot.groups)
                    .map(|g| Cell::new(format!("G{g}")))
                    .collect::<Vec<_>>(),
            );
            for slot in 0..snapshot.males_per_group {
                table.add_row(
                    (0..snapshot.groups)
                        .map(|g| {
                            Cell::new(format!("M{}", snapshot.male_at[day][g][slot]))
                                .set_alignment(CellAlignment::Right)
                        })
                        .collect::<Vec<_>>(),
                );
            }
            for slot in 0..snapshot.females_per_group {
                table.add_row(
                    (0..snapshot.groups)
                        .map(|g| {
                            Cell::new(format!("F{}", snapshot.female_at[day][g][slot]))
                                .set_alignment(CellAlignment::Right)
                        })
                        .collect::<Vec<_>>(),
                );
            }
            table
        })
        .collect()
}

fn num(value: i64) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}
