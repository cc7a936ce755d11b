use std::time::Instant;

use chrono::Weekday;

use crate::data::model::{weekday_name, TripTable};
use crate::stats::{finish_section, mode_by};

// ---------------------------------------------------------------------------
// Time stats – most frequent travel times
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSummary {
    /// Most frequent start hour, 0–23.
    pub popular_hour: u32,
    /// Most frequent start day of week.
    pub popular_day: Weekday,
}

/// `None` when the table holds no trips.
pub fn summarize(table: &TripTable) -> Option<TimeSummary> {
    let popular_hour = mode_by(table.rows.iter().map(|t| t.start_hour()))?;
    let popular_day = mode_by(table.rows.iter().map(|t| t.weekday))?;
    Some(TimeSummary {
        popular_hour,
        popular_day,
    })
}

/// Print the most frequent hour and day of travel.
pub fn report(table: &TripTable) {
    println!("\nCalculating The Most Frequent Times of Travel...\n");
    let started = Instant::now();

    match summarize(table) {
        Some(summary) => {
            println!("The most popular hour was: {}", summary.popular_hour);
            println!(
                "The most popular day was: {}",
                weekday_name(summary.popular_day)
            );
        }
        None => println!("No trips matched the selected filters."),
    }

    finish_section(started);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Capabilities, TripRecord};
    use chrono::NaiveDate;

    fn trip(day: u32, hour: u32) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        TripRecord::new(ts)
    }

    #[test]
    fn finds_popular_hour_and_day() {
        // 2017-04-03 and 2017-04-10 were Mondays, 2017-04-04 a Tuesday.
        let table = TripTable::new(
            vec![trip(3, 8), trip(3, 17), trip(4, 8), trip(10, 8)],
            Capabilities::default(),
        );
        let summary = summarize(&table).unwrap();
        assert_eq!(summary.popular_hour, 8);
        assert_eq!(summary.popular_day, Weekday::Mon);
    }

    #[test]
    fn empty_table_has_no_summary() {
        let table = TripTable::default();
        assert_eq!(summarize(&table), None);
        report(&table); // prints the fallback, must not panic
    }
}
