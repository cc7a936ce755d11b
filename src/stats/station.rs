use std::time::Instant;

use crate::data::model::TripTable;
use crate::stats::{finish_section, mode_by};

// ---------------------------------------------------------------------------
// Station stats – most popular stations and route
// ---------------------------------------------------------------------------

/// Separator between the two station names of a route.
const ROUTE_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub popular_start: String,
    pub popular_end: String,
    /// Most frequent (start, end) pair rendered as `start -> end`.
    pub popular_route: String,
}

/// `None` when the table lacks station columns or holds no station values.
pub fn summarize(table: &TripTable) -> Option<StationSummary> {
    if !table.capabilities.stations {
        return None;
    }

    let popular_start = mode_by(table.rows.iter().filter_map(|t| t.start_station.clone()))?;
    let popular_end = mode_by(table.rows.iter().filter_map(|t| t.end_station.clone()))?;
    let (route_start, route_end) = mode_by(table.rows.iter().filter_map(|t| {
        Some((t.start_station.clone()?, t.end_station.clone()?))
    }))?;

    Some(StationSummary {
        popular_start,
        popular_end,
        popular_route: format!("{route_start}{ROUTE_SEPARATOR}{route_end}"),
    })
}

/// Print the most popular start station, end station, and route.
pub fn report(table: &TripTable) {
    println!("\nCalculating The Most Popular Stations and Trip...\n");
    let started = Instant::now();

    if !table.capabilities.stations {
        println!("Unfortunately, we don't have data related to routes for that city.");
    } else {
        match summarize(table) {
            Some(summary) => {
                println!("The most popular start station was: {}", summary.popular_start);
                println!("The most popular end station was: {}", summary.popular_end);
                println!("The most popular route was: {}", summary.popular_route);
            }
            None => println!("No trips matched the selected filters."),
        }
    }

    finish_section(started);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Capabilities, TripRecord};
    use chrono::NaiveDate;

    fn trip(start: &str, end: &str) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut rec = TripRecord::new(ts);
        rec.start_station = Some(start.to_string());
        rec.end_station = Some(end.to_string());
        rec
    }

    fn capable() -> Capabilities {
        Capabilities {
            stations: true,
            ..Capabilities::default()
        }
    }

    #[test]
    fn finds_popular_stations_and_route() {
        let table = TripTable::new(
            vec![
                trip("Clark St", "Lake St"),
                trip("Clark St", "State St"),
                trip("State St", "Lake St"),
                trip("Clark St", "Lake St"),
            ],
            capable(),
        );
        let summary = summarize(&table).unwrap();
        assert_eq!(summary.popular_start, "Clark St");
        assert_eq!(summary.popular_end, "Lake St");
        assert_eq!(summary.popular_route, "Clark St -> Lake St");
    }

    #[test]
    fn missing_station_columns_reports_unavailable() {
        let table = TripTable::new(vec![trip("A", "B")], Capabilities::default());
        assert_eq!(summarize(&table), None);
        report(&table); // unavailability notice, must not panic
    }

    #[test]
    fn capable_but_empty_table_has_no_summary() {
        let table = TripTable::new(vec![], capable());
        assert_eq!(summarize(&table), None);
    }
}
