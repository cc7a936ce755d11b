use anyhow::Result;
use log::info;

use crate::config::SourceConfig;
use crate::data::filter::{self, CityChoice, DayFilter, FilterSelection, MonthFilter};
use crate::data::loader::DatasetLoader;
use crate::stats;
use crate::ui::{menu, view};

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

pub struct App {
    loader: DatasetLoader,
}

impl App {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            loader: DatasetLoader::new(config),
        }
    }

    /// Drive the session loop: gather filters, load, filter, run the four
    /// reporters, offer the raw data viewer, ask to restart. Loops until the
    /// user declines the restart.
    pub fn run(&self) -> Result<()> {
        println!("Hello! Let's explore some US bikeshare data!");
        loop {
            let selection = self.gather_filters()?;
            info!(
                "session: city={} month={} day={}",
                selection.city, selection.month, selection.day
            );

            let loaded = self.loader.load(&selection.city)?;
            let table = filter::apply(&loaded, selection.month, selection.day);

            stats::time::report(&table);
            stats::station::report(&table);
            stats::duration::report(&table);
            stats::users::report(&table);
            view::browse(&table)?;

            if !menu::confirm("\nWould you like to restart?")? {
                return Ok(());
            }
        }
    }

    /// Ask for the city, month, and day through three single-choice menus.
    /// The returned selection stays fixed for the rest of the iteration.
    fn gather_filters(&self) -> Result<FilterSelection> {
        let mut city_options: Vec<String> = self
            .loader
            .config()
            .city_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        city_options.push("All Cities".to_string());

        let picked = menu::select(
            "Which city's data would you like to analyze?",
            &city_options,
        )?;
        let city = if picked == city_options.len() - 1 {
            CityChoice::All
        } else {
            CityChoice::Named(city_options[picked].clone())
        };
        println!("You have selected {city}!");
        if city == CityChoice::All {
            println!(
                "Please keep in mind that some data may not be available for all cities. \
                 Some statistics may be incomplete."
            );
        }

        let month_options: Vec<String> = MonthFilter::MENU.iter().map(|m| m.to_string()).collect();
        let month = MonthFilter::MENU[menu::select("Select a month for the analysis:", &month_options)?];
        println!("We'll show data for {month}");

        let day_options: Vec<String> = DayFilter::MENU.iter().map(|d| d.to_string()).collect();
        let day = DayFilter::MENU[menu::select("Select a day for the analysis:", &day_options)?];
        println!("We'll show data for {day}");

        println!("{}", "-".repeat(40));
        Ok(FilterSelection { city, month, day })
    }
}
