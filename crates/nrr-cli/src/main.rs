// NRR calculator entry point.
//
// Startup sequence:
// 1. Resolve the base directory and initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the points table
// 4. Run one interactive session on stdin/stdout

use nrr_cli::config;
use nrr_cli::session::{Session, SessionError};
use nrr_core::{load_points_table, ScenarioEngine};

use anyhow::Context;
use std::path::Path;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (the terminal is used for prompts)
    let base_dir = config::base_dir().context("failed to resolve base directory")?;
    init_tracing(&base_dir)?;
    info!("NRR calculator starting up in {}", base_dir.display());

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} overs per innings, points table {}",
        config.full_innings_overs,
        config.points_table.display()
    );

    // 3. Load the points table
    let table = load_points_table(&config.points_table).with_context(|| {
        format!(
            "failed to load points table from {}",
            config.points_table.display()
        )
    })?;

    // 4. Run the session
    let engine = ScenarioEngine::new(config.full_innings_overs);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), &table, engine);

    match session.run() {
        Ok(_) => {
            info!("NRR calculator finished");
            Ok(())
        }
        Err(SessionError::InputClosed) => {
            info!("Input closed before a result was produced");
            Err(SessionError::InputClosed.into())
        }
        Err(e) => {
            error!("Session failed: {}", e);
            Err(e.into())
        }
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used for prompts).
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("nrr-calc.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nrr_cli=info,nrr_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
