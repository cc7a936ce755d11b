use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

// ---------------------------------------------------------------------------
// Capabilities – which optional column groups a table carries
// ---------------------------------------------------------------------------

/// Optional column groups probed once per loaded file from the CSV header.
///
/// The city exports do not share a schema: one of them carries no station or
/// demographic columns at all. Reporters receive this probe instead of
/// re-checking column presence themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Start and end station name columns are both present.
    pub stations: bool,
    /// Trip duration column is present.
    pub trip_duration: bool,
    /// User type column is present.
    pub user_type: bool,
    /// Gender column is present (its cells may still be blank).
    pub gender: bool,
}

impl Capabilities {
    /// Schema union: a combined table carries every column any source had.
    pub fn union(self, other: Self) -> Self {
        Self {
            stations: self.stations || other.stations,
            trip_duration: self.trip_duration || other.trip_duration,
            user_type: self.user_type || other.user_type,
            gender: self.gender || other.gender,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the renderable columns of a table
// ---------------------------------------------------------------------------

/// Identifies one displayable column of a [`TripTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    StartTime,
    Month,
    DayOfWeek,
    StartStation,
    EndStation,
    TripDuration,
    UserType,
    Gender,
}

impl Column {
    /// Header text used when rendering raw data.
    pub fn title(self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::Month => "Month",
            Column::DayOfWeek => "Day of Week",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::TripDuration => "Trip Duration",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
        }
    }
}

// ---------------------------------------------------------------------------
// TripRecord – one row of bikeshare usage data
// ---------------------------------------------------------------------------

/// A single trip (one row of a source CSV).
///
/// The month number and weekday are derived from the start time at load time.
/// Fields a source schema lacks stay `None`.
#[derive(Debug, Clone)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    /// Calendar month of `start_time`, 1–12.
    pub month: u32,
    /// Day of week of `start_time`.
    pub weekday: Weekday,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Trip duration in minutes, normalized to `f64` across sources.
    pub duration_min: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
}

impl TripRecord {
    /// Build a record with the calendar fields derived and all optional
    /// columns unset.
    pub fn new(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            month: start_time.month(),
            weekday: start_time.weekday(),
            start_station: None,
            end_station: None,
            duration_min: None,
            user_type: None,
            gender: None,
        }
    }

    /// Hour-of-day of the start time, 0–23.
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Cell text for one column; absent values render as `-`.
    pub fn cell(&self, column: Column) -> String {
        fn opt(v: &Option<String>) -> String {
            v.clone().unwrap_or_else(|| "-".to_string())
        }
        match column {
            Column::StartTime => self.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            Column::Month => self.month.to_string(),
            Column::DayOfWeek => weekday_name(self.weekday).to_string(),
            Column::StartStation => opt(&self.start_station),
            Column::EndStation => opt(&self.end_station),
            Column::TripDuration => self
                .duration_min
                .map(|d| format!("{d:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            Column::UserType => opt(&self.user_type),
            Column::Gender => opt(&self.gender),
        }
    }
}

/// Full English name of a weekday (`chrono`'s `Display` uses the short form).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ---------------------------------------------------------------------------
// TripTable – the loaded (or filtered) dataset
// ---------------------------------------------------------------------------

/// An in-memory table of trips together with its capability probe.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    pub rows: Vec<TripRecord>,
    pub capabilities: Capabilities,
}

impl TripTable {
    pub fn new(rows: Vec<TripRecord>, capabilities: Capabilities) -> Self {
        Self { rows, capabilities }
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no trips.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Combine tables left-anchored: the first table's rows first, each in
    /// its source order, and the result's schema is the union of every
    /// source schema. Rows from a source lacking a column keep `None` there;
    /// no column present in any source is dropped.
    pub fn union(tables: impl IntoIterator<Item = TripTable>) -> TripTable {
        let mut rows = Vec::new();
        let mut capabilities = Capabilities::default();
        for table in tables {
            capabilities = capabilities.union(table.capabilities);
            rows.extend(table.rows);
        }
        TripTable { rows, capabilities }
    }

    /// Displayable columns in render order: the always-present calendar
    /// columns, then whichever optional groups this table carries.
    pub fn columns(&self) -> Vec<Column> {
        let mut cols = vec![Column::StartTime, Column::Month, Column::DayOfWeek];
        if self.capabilities.stations {
            cols.push(Column::StartStation);
            cols.push(Column::EndStation);
        }
        if self.capabilities.trip_duration {
            cols.push(Column::TripDuration);
        }
        if self.capabilities.user_type {
            cols.push(Column::UserType);
        }
        if self.capabilities.gender {
            cols.push(Column::Gender);
        }
        cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 3, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        TripRecord::new(ts)
    }

    #[test]
    fn calendar_fields_are_derived() {
        let rec = record(6); // 2017-03-06 was a Monday
        assert_eq!(rec.month, 3);
        assert_eq!(rec.weekday, Weekday::Mon);
        assert_eq!(rec.start_hour(), 8);
    }

    #[test]
    fn union_sums_rows_and_unions_capabilities() {
        let full = TripTable::new(
            vec![record(1), record(2)],
            Capabilities {
                stations: true,
                trip_duration: true,
                user_type: true,
                gender: true,
            },
        );
        let minimal = TripTable::new(
            vec![record(3)],
            Capabilities {
                trip_duration: true,
                ..Capabilities::default()
            },
        );

        let combined = TripTable::union([minimal.clone(), full.clone()]);
        assert_eq!(combined.len(), full.len() + minimal.len());
        // Left-anchored: first table's rows come first.
        assert_eq!(combined.rows[0].start_time, minimal.rows[0].start_time);
        // Schema union keeps every column any source had.
        assert!(combined.capabilities.stations);
        assert!(combined.capabilities.gender);
        assert_eq!(combined.columns().len(), 8);
    }

    #[test]
    fn columns_track_capabilities() {
        let table = TripTable::new(vec![], Capabilities::default());
        assert_eq!(
            table.columns(),
            vec![Column::StartTime, Column::Month, Column::DayOfWeek]
        );
    }

    #[test]
    fn absent_cells_render_as_dash() {
        let rec = record(1);
        assert_eq!(rec.cell(Column::StartStation), "-");
        assert_eq!(rec.cell(Column::DayOfWeek), "Wednesday"); // 2017-03-01
    }
}
