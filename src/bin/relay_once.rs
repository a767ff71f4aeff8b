// Runs a single relay cycle from the environment configuration and prints
// the report. Exits non-zero when the cycle reports status 500.

use bch_tx_relay::{blockchain::Relay, config::Config};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env()?;
    let relay = Relay::new(config.relay)?;

    info!("Running relay cycle for {} addresses", relay.addresses().len());
    let report = relay.relay().await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(
        "{} transactions seen, total amount {}",
        report.transactions_seen, report.total_amount
    );

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
