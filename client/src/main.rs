//! Roster - console front end for a remote person record collection.
//!
//! Commands are read from stdin and the view is printed to stdout. Logs go
//! to stderr. See [`roster_client::console`] for the command list.

use roster_client::{console, Config, HttpCollection, Session};
use tokio::io::BufReader;
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_client=info,roster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Using record collection at {}", config.api_url);

    let remote = HttpCollection::from_config(&config)?;
    let session = Session::new(remote);
    let stdin = BufReader::new(tokio::io::stdin());

    LocalSet::new()
        .run_until(console::run(session, stdin))
        .await?;

    Ok(())
}
