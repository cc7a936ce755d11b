//! Writes the three bundled sample city CSVs into `data/`.
//!
//! Two cities carry the full schema (stations, user type, gender); the third
//! carries only timestamps and a float-typed trip duration, matching the
//! schema spread of the real exports.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

const STATIONS: &[&str] = &[
    "Canal St & Adams St",
    "Clinton St & Washington Blvd",
    "Lake Shore Dr & Monroe St",
    "Michigan Ave & Oak St",
    "State St & Randolph St",
    "Wabash Ave & 9th St",
];

const ROWS_PER_CITY: usize = 240;

/// A trip start somewhere in the covered January–June window, biased toward
/// commute hours.
fn random_start(rng: &mut SimpleRng) -> NaiveDateTime {
    let month = 1 + rng.pick(6) as u32;
    let day = 1 + rng.pick(28) as u32;
    let hour = if rng.next_f64() < 0.5 {
        // commute peaks
        [8u32, 8, 9, 17, 17, 18][rng.pick(6)]
    } else {
        rng.pick(24) as u32
    };
    let minute = rng.pick(60) as u32;
    NaiveDate::from_ymd_opt(2017, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn random_duration_min(rng: &mut SimpleRng) -> f64 {
    rng.gauss(16.0, 6.0).max(2.0)
}

fn timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Full schema: stations, user type, gender (with some blanks).
fn write_full_city(path: &str, seed: u64) -> Result<()> {
    let mut rng = SimpleRng::new(seed);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
        "Gender",
    ])?;

    for _ in 0..ROWS_PER_CITY {
        let start = random_start(&mut rng);
        let minutes = random_duration_min(&mut rng).round();
        let end = start + Duration::minutes(minutes as i64);
        let start_station = STATIONS[rng.pick(STATIONS.len())];
        let end_station = STATIONS[rng.pick(STATIONS.len())];
        let user_type = if rng.next_f64() < 0.7 {
            "Subscriber"
        } else {
            "Customer"
        };
        let gender = match rng.next_f64() {
            g if g < 0.12 => "", // withheld
            g if g < 0.60 => "Male",
            _ => "Female",
        };

        writer.write_record([
            timestamp(start),
            timestamp(end),
            format!("{}", minutes as i64),
            start_station.to_string(),
            end_station.to_string(),
            user_type.to_string(),
            gender.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reduced schema: timestamps and a float-typed duration only.
fn write_minimal_city(path: &str, seed: u64) -> Result<()> {
    let mut rng = SimpleRng::new(seed);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Start Time", "End Time", "Trip Duration"])?;

    for _ in 0..ROWS_PER_CITY {
        let start = random_start(&mut rng);
        let minutes = random_duration_min(&mut rng);
        let end = start + Duration::seconds((minutes * 60.0) as i64);
        writer.write_record([
            timestamp(start),
            timestamp(end),
            format!("{minutes:.1}"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    std::fs::create_dir_all("data")?;
    write_full_city("data/chicago.csv", 42)?;
    write_full_city("data/new_york_city.csv", 1337)?;
    write_minimal_city("data/washington.csv", 7)?;
    println!("Wrote sample data for 3 cities into data/");
    Ok(())
}
