use std::env;

use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

use restify_partner::api::http::HttpPartnerApi;
use restify_partner::client::PartnerClient;
use restify_partner::config::Config;
use restify_partner::error::ClientError;

/// Headless monitor: logs in, keeps the order store in sync, and logs every
/// snapshot change until Ctrl-C. Useful for watching a partner account
/// without the mobile shell.
#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let email = env::var("PARTNER_EMAIL")
        .map_err(|_| ClientError::Config("PARTNER_EMAIL is not set".to_string()))?;
    let password = env::var("PARTNER_PASSWORD")
        .map_err(|_| ClientError::Config("PARTNER_PASSWORD is not set".to_string()))?;

    let api = HttpPartnerApi::new(&config)?;
    let partner = PartnerClient::new(api, &config);

    partner.login(&email, &password).await?;
    info!(base_url = %config.base_url, "watching orders");

    let mut snapshots = WatchStream::new(partner.state().subscribe_orders());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            snapshot = snapshots.next() => {
                if snapshot.is_none() {
                    break;
                }
                info!(
                    active = partner.state().active_orders().len(),
                    completed = partner.state().completed_orders().len(),
                    "order snapshot updated"
                );
            }
            _ = &mut ctrl_c => {
                info!("shutting down");
                break;
            }
        }
    }

    partner.logout().await;
    Ok(())
}
