//! Plain-text substitution announcements for a generated schedule.
//!
//! Blocks, separated by a blank line and omitted when empty:
//!   one per location with substitutes (location id order)
//!   AFTERNOON:          the afternoon pool
//!   CLEANING OVERTIME:  cleaning overtime records

use crate::{
    schedule::{Assignment, Schedule},
    snapshot::Snapshot,
};

pub fn render_announcements(snapshot: &Snapshot, schedule: &Schedule) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for (location_id, assignments) in &schedule.locations {
        let lines: Vec<String> = assignments
            .iter()
            .filter(|a| a.is_substitute)
            .map(|a| substitute_line(snapshot, a))
            .collect();
        if !lines.is_empty() {
            blocks.push(block(&format!("{}:", snapshot.location_name(*location_id)), lines));
        }
    }

    if !schedule.afternoon_pool.is_empty() {
        let lines = schedule
            .afternoon_pool
            .iter()
            .map(|a| substitute_line(snapshot, a))
            .collect();
        blocks.push(block("AFTERNOON:", lines));
    }

    if !schedule.cleaning_overtime.is_empty() {
        let lines = schedule
            .cleaning_overtime
            .iter()
            .map(|c| {
                format!(
                    "- {} stays {} minutes to clean {}",
                    snapshot.staff_name(c.staff_id),
                    c.overtime_minutes,
                    c.location_name
                )
            })
            .collect();
        blocks.push(block("CLEANING OVERTIME:", lines));
    }

    blocks.join("\n\n").trim().to_string()
}

fn block(header: &str, lines: Vec<String>) -> String {
    std::iter::once(header.to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

fn substitute_line(snapshot: &Snapshot, a: &Assignment) -> String {
    let name = snapshot.staff_name(a.staff_id);
    let body = match (a.partial_end, a.original_location_id) {
        (Some(returns_at), Some(home)) => format!(
            "- {name} enters at {}, returns to {} at {returns_at}, leaves at {}",
            a.start,
            snapshot.location_name(home),
            a.end
        ),
        _ => format!("- {name} enters at {} and leaves at {}", a.start, a.end),
    };
    match a.replaces_staff_id {
        Some(replaced) => format!("{body} (replaces {})", snapshot.staff_name(replaced)),
        None           => body,
    }
}
