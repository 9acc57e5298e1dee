use std::sync::Arc;

use envbadge_common::{error::Result, serve, state::Config};
use scorched::{logf, LogData, LogImportance};
use tokio::signal;

const APP_NAME: &str = "envbadge";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    logf!(
        Info,
        "Loading config from file: {}",
        confy::get_configuration_file_path(APP_NAME, None)?.display()
    );

    let config: Config = confy::load(APP_NAME, None)?;

    match &config.badge {
        Some(badge) => {
            logf!(
                Info,
                "Title prefix: {}, badge: {} ({})",
                badge.title_prefix_enabled(),
                badge.badge_enabled(),
                badge.badge_background_color
            );
        }
        None => {
            logf!(Info, "No badge section in the config file");
        }
    }

    serve(Arc::new(config), shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            logf!(Error, "Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                logf!(Error, "Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    logf!(Info, "Shutting down");
}
