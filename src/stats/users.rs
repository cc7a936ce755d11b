use std::time::Instant;

use crate::data::model::TripTable;
use crate::stats::finish_section;

// ---------------------------------------------------------------------------
// User stats – rider types and demographics
// ---------------------------------------------------------------------------

const USER_TYPE_SUBSCRIBER: &str = "Subscriber";
const USER_TYPE_CUSTOMER: &str = "Customer";
const GENDER_MALE: &str = "Male";
const GENDER_FEMALE: &str = "Female";

/// Counts over the user-type column. A category absent from the filtered
/// subset is a plain zero, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTypeSummary {
    /// Trips carrying any user-type value.
    pub total: usize,
    pub subscribers: usize,
    pub customers: usize,
}

/// Counts over the gender column; `unspecified` covers blank cells and rows
/// from sources without the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderSummary {
    pub male: usize,
    pub female: usize,
    pub unspecified: usize,
}

/// `None` when the table lacks a user-type column.
pub fn summarize_user_types(table: &TripTable) -> Option<UserTypeSummary> {
    if !table.capabilities.user_type {
        return None;
    }

    let mut summary = UserTypeSummary {
        total: 0,
        subscribers: 0,
        customers: 0,
    };
    for user_type in table.rows.iter().filter_map(|t| t.user_type.as_deref()) {
        summary.total += 1;
        match user_type {
            USER_TYPE_SUBSCRIBER => summary.subscribers += 1,
            USER_TYPE_CUSTOMER => summary.customers += 1,
            _ => {}
        }
    }
    Some(summary)
}

/// `None` when the table lacks a gender column.
pub fn summarize_genders(table: &TripTable) -> Option<GenderSummary> {
    if !table.capabilities.gender {
        return None;
    }

    let mut summary = GenderSummary {
        male: 0,
        female: 0,
        unspecified: 0,
    };
    for trip in &table.rows {
        match trip.gender.as_deref() {
            Some(GENDER_MALE) => summary.male += 1,
            Some(GENDER_FEMALE) => summary.female += 1,
            _ => summary.unspecified += 1,
        }
    }
    Some(summary)
}

/// Print user-type counts and, when available, gender counts.
pub fn report(table: &TripTable) {
    println!("\nCalculating User Stats...\n");
    let started = Instant::now();

    match summarize_user_types(table) {
        Some(users) => {
            println!(
                "In the selected time range, we registered {} users that used the service",
                users.total
            );
            println!(
                "Within that, there were {} subscribers and {} customers.",
                users.subscribers, users.customers
            );
        }
        None => {
            println!("Unfortunately, we don't have data regarding User Types for the selected city.")
        }
    }

    match summarize_genders(table) {
        Some(genders) => {
            println!(
                "In the selected range, there were {} male and {} female users",
                genders.male, genders.female
            );
            println!("{} decided not to share their gender.", genders.unspecified);
        }
        None => {
            println!("Unfortunately, we don't have data regarding users' Gender for the selected city.")
        }
    }

    finish_section(started);
}
