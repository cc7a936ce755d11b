use std::time::Instant;

use crate::data::model::TripTable;
use crate::stats::finish_section;

// ---------------------------------------------------------------------------
// Trip duration stats – total and mean travel time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSummary {
    /// Sum of all stored durations, in minutes.
    pub total_min: f64,
    /// Arithmetic mean duration, in minutes.
    pub mean_min: f64,
    /// Number of trips that carried a duration value.
    pub trips: usize,
}

impl DurationSummary {
    pub fn total_hours(&self) -> f64 {
        self.total_min / 60.0
    }

    pub fn mean_hours(&self) -> f64 {
        self.mean_min / 60.0
    }
}

/// `None` when the table lacks a duration column or no row carries a value.
/// Rows without a duration (from a source lacking the column) are skipped,
/// not counted as zero.
pub fn summarize(table: &TripTable) -> Option<DurationSummary> {
    if !table.capabilities.trip_duration {
        return None;
    }

    let mut total_min = 0.0;
    let mut trips = 0usize;
    for minutes in table.rows.iter().filter_map(|t| t.duration_min) {
        total_min += minutes;
        trips += 1;
    }
    if trips == 0 {
        return None;
    }

    Some(DurationSummary {
        total_min,
        mean_min: total_min / trips as f64,
        trips,
    })
}

/// Print total and mean trip duration, in minutes and hours.
pub fn report(table: &TripTable) {
    println!("\nCalculating Trip Duration...\n");
    let started = Instant::now();

    if !table.capabilities.trip_duration {
        println!("Unfortunately, we don't have data regarding Trip Duration for the selected city.");
    } else {
        match summarize(table) {
            Some(summary) => {
                println!(
                    "Total trip duration in the selected city and time range was {:.1} minutes or {:.1} hours",
                    summary.total_min,
                    summary.total_hours()
                );
                println!(
                    "Mean trip duration in the selected city and time range was {:.1} minutes or {:.1} hours",
                    summary.mean_min,
                    summary.mean_hours()
                );
            }
            None => println!("No trips matched the selected filters."),
        }
    }

    finish_section(started);
}
