mod config;
mod db;
mod entry;
mod logging;
mod models;
mod report;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_args(&args)?;
    let db_path = config.resolve_db_path()?;

    logging::init(&db_path.with_extension("log"), config.verbose)?;

    let store = db::Store::new(db_path);
    store.initialize()?;
    log::info!(
        "Opened {} with {} expense(s)",
        store.path().display(),
        store.count()?
    );

    if config.command.is_empty() {
        run::as_tui(&store)
    } else {
        run::as_cli(&config.command, &store)
    }
}
