use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use log::debug;

use crate::data::model::{weekday_name, TripTable};

// ---------------------------------------------------------------------------
// CityChoice – which source(s) to load
// ---------------------------------------------------------------------------

/// One configured city by name, or the union of all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityChoice {
    Named(String),
    All,
}

impl fmt::Display for CityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityChoice::Named(name) => write!(f, "{name}"),
            CityChoice::All => write!(f, "All Cities"),
        }
    }
}

// ---------------------------------------------------------------------------
// MonthFilter – January–June or no constraint
// ---------------------------------------------------------------------------

/// Month constraint. The city exports cover the first half-year only, so the
/// menu stops at June.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    January,
    February,
    March,
    April,
    May,
    June,
    All,
}

impl MonthFilter {
    /// Menu order: the six covered months, then "All".
    pub const MENU: [MonthFilter; 7] = [
        MonthFilter::January,
        MonthFilter::February,
        MonthFilter::March,
        MonthFilter::April,
        MonthFilter::May,
        MonthFilter::June,
        MonthFilter::All,
    ];

    /// Month number 1–6, or `None` for no constraint.
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::January => Some(1),
            MonthFilter::February => Some(2),
            MonthFilter::March => Some(3),
            MonthFilter::April => Some(4),
            MonthFilter::May => Some(5),
            MonthFilter::June => Some(6),
            MonthFilter::All => None,
        }
    }

    pub fn matches(self, month: u32) -> bool {
        self.number().map_or(true, |m| m == month)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonthFilter::January => "January",
            MonthFilter::February => "February",
            MonthFilter::March => "March",
            MonthFilter::April => "April",
            MonthFilter::May => "May",
            MonthFilter::June => "June",
            MonthFilter::All => "All",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthFilter::MENU
            .iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown month '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// DayFilter – a weekday or no constraint
// ---------------------------------------------------------------------------

/// Day-of-week constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    Day(Weekday),
    All,
}

impl DayFilter {
    /// Menu order: Monday through Sunday, then "All".
    pub const MENU: [DayFilter; 8] = [
        DayFilter::Day(Weekday::Mon),
        DayFilter::Day(Weekday::Tue),
        DayFilter::Day(Weekday::Wed),
        DayFilter::Day(Weekday::Thu),
        DayFilter::Day(Weekday::Fri),
        DayFilter::Day(Weekday::Sat),
        DayFilter::Day(Weekday::Sun),
        DayFilter::All,
    ];

    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::Day(day) => day == weekday,
            DayFilter::All => true,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::Day(day) => write!(f, "{}", weekday_name(*day)),
            DayFilter::All => write!(f, "All"),
        }
    }
}

impl FromStr for DayFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        // chrono parses weekday names case-insensitively ("monday", "Mon", …).
        s.parse::<Weekday>()
            .map(DayFilter::Day)
            .map_err(|_| format!("unknown day '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// FilterSelection and the filter stage itself
// ---------------------------------------------------------------------------

/// The (city, month, day) triple chosen once per session iteration.
#[derive(Debug, Clone)]
pub struct FilterSelection {
    pub city: CityChoice,
    pub month: MonthFilter,
    pub day: DayFilter,
}

/// Keep the rows matching both the month and the day constraint.
///
/// The result keeps the input's capabilities; an empty result is a valid
/// table, not an error.
pub fn apply(table: &TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|trip| month.matches(trip.month) && day.matches(trip.weekday))
        .cloned()
        .collect();
    debug!(
        "filter month={month} day={day}: {} of {} trips retained",
        rows.len(),
        table.len()
    );
    TripTable::new(rows, table.capabilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Capabilities, TripRecord};
    use chrono::NaiveDate;

    fn table() -> TripTable {
        // Jan 2 (Mon), Feb 6 (Mon), Feb 7 (Tue), Jun 4 (Sun) of 2017.
        let rows = [(1, 2), (2, 6), (2, 7), (6, 4)]
            .into_iter()
            .map(|(month, day)| {
                let ts = NaiveDate::from_ymd_opt(2017, month, day)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap();
                TripRecord::new(ts)
            })
            .collect();
        TripTable::new(rows, Capabilities::default())
    }

    #[test]
    fn all_all_preserves_every_row() {
        let table = table();
        let filtered = apply(&table, MonthFilter::All, DayFilter::All);
        assert_eq!(filtered.len(), table.len());
        assert_eq!(filtered.capabilities, table.capabilities);
    }

    #[test]
    fn month_and_day_are_anded() {
        let filtered = apply(
            &table(),
            MonthFilter::February,
            DayFilter::Day(Weekday::Mon),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0].month, 2);
        assert_eq!(filtered.rows[0].weekday, Weekday::Mon);
    }

    #[test]
    fn day_filter_keeps_only_that_day() {
        let day: DayFilter = "monday".parse().unwrap();
        let filtered = apply(&table(), MonthFilter::All, day);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.rows.iter().all(|t| t.weekday == Weekday::Mon));
    }

    #[test]
    fn no_matches_is_an_empty_table_not_an_error() {
        let filtered = apply(&table(), MonthFilter::May, DayFilter::All);
        assert!(filtered.is_empty());
    }

    #[test]
    fn filters_parse_case_insensitively() {
        assert_eq!("JUNE".parse::<MonthFilter>().unwrap(), MonthFilter::June);
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "Sunday".parse::<DayFilter>().unwrap(),
            DayFilter::Day(Weekday::Sun)
        );
        assert!("Smarch".parse::<MonthFilter>().is_err());
    }
}
