mod app;
mod config;
mod data;
mod stats;
mod ui;

use std::path::Path;

use anyhow::Result;

use app::App;
use config::SourceConfig;

/// Optional TOML file overriding the bundled city list.
const CONFIG_PATH: &str = "sources.toml";

fn main() -> Result<()> {
    env_logger::init();

    let config = SourceConfig::load(Path::new(CONFIG_PATH))?;
    App::new(config).run()
}
