use std::io;

use anyhow::Context;

use foodwaste_cli::{CliConfig, Shell};
use foodwaste_inventory::FoodTracker;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env().context("invalid configuration")?;
    foodwaste_observability::init(config.log_format);

    tracing::info!(warning_days = config.warning_days, "starting food waste shell");

    let tracker = FoodTracker::new(config.tracker_config());
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    Shell::new(tracker, stdin, stdout)
        .run()
        .context("terminal I/O failed")?;
    Ok(())
}
