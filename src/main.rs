// ABOUTME: Main entry point: pick a running server container and open an interactive shell in it

use enterthematrix::docker::DockerRuntime;
use enterthematrix::terminal::CrosstermTerminal;
use enterthematrix::{App, AppConfig, EnterError};
use std::io::{self, BufReader};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    setup_logging();
    setup_panic_handler();

    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            e.exit_code()
        }
    };

    // The blocking stdin reader may still be parked; exit instead of waiting on it.
    std::process::exit(code);
}

async fn run() -> Result<(), EnterError> {
    let config = AppConfig::load_or_default();
    info!("Starting with config {:?}", config);

    let runtime = DockerRuntime::connect(&config.docker)
        .await
        .map_err(EnterError::Connection)?;

    let app = App::new(config, Arc::new(runtime), Arc::new(CrosstermTerminal));
    let mut stdout = tokio::io::stdout();

    app.run(
        BufReader::new(io::stdin()),
        io::stdout(),
        tokio::io::stdin(),
        &mut stdout,
    )
    .await
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    // The terminal belongs to the remote shell, so logs only ever go to a file.
    let log_dir = AppConfig::config_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "enterthematrix-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enterthematrix=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before reporting the panic
        let _ = crossterm::terminal::disable_raw_mode();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!(
            "Please check the logs in {} for more details.",
            AppConfig::config_dir().join("logs").display()
        );
    }));
}
