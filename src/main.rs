use regulus_sdk::{TransactionClient, TransactionRecord};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Sends one sample transaction using the settings from `.env`
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("regulus_sdk=debug".parse().expect("valid directive"))
                .add_directive("regulus_send=debug".parse().expect("valid directive")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let client = match TransactionClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to configure client: {}", e);
            return;
        }
    };

    let record = TransactionRecord::new(
        format!("txn_{}", uuid::Uuid::new_v4().simple()),
        std::env::var("SAMPLE_USER_ID").unwrap_or_else(|_| "user_002".to_string()),
        3_000_000.0,
        "USD",
        "US",
        chrono::Utc::now().to_rfc3339(),
    );

    match client.submit_transaction(&record).await {
        Ok(response) => info!("Transaction sent successfully: {}", response),
        Err(e) => error!("Error sending transaction: {}", e),
    }
}
