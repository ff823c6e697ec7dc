use anyhow::Context;

use stockroom_console::{ConsoleConfig, Retention, SeedSource, Session};

fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env().context("failed to load configuration")?;
    stockroom_observability::init(config.log_format);

    match &config.seed_source {
        SeedSource::Builtin => tracing::warn!("STOCKROOM_SEED_FILE not set; using built-in seed"),
        SeedSource::File(path) => tracing::info!(path = %path.display(), "seed loaded"),
    }
    tracing::info!(retention = config.retention.as_str(), "session starting");

    let mut session = Session::from_config(&config).context("invalid seed data")?;

    println!("Stockroom: type 'help' for commands.");
    if config.retention == Retention::Reset {
        println!("Note: changes are not kept; stock returns to the starting seed after every action.");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session
        .run(stdin.lock(), stdout.lock())
        .context("console I/O failed")?;

    Ok(())
}
