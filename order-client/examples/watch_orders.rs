//! Terminal dashboard: polls the order server and redraws on every change
//!
//! ```text
//! ORDER_SERVER_URL=http://localhost:8080 cargo run -p order-client --example watch_orders
//! ```

use order_client::{ClientConfig, DashboardView, NetworkHttpClient, OrderSync, OrdersClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_client=info".into()),
        )
        .init();

    let base_url =
        std::env::var("ORDER_SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let config = ClientConfig::new(base_url);

    let api = OrdersClient::new(NetworkHttpClient::new(&config)?);
    let sync = OrderSync::from_config(api, &config);
    let mut revisions = sync.subscribe();
    let handle = sync.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = sync.snapshot();
                if !state.is_loading() {
                    println!("{}", DashboardView::from_state(&state));
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
