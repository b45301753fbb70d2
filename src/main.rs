// Registration server binary.
//
// Serves POST /api/register, driving one browser session per request.
// Credentials come from the environment (OKTA_USER, OKTA_PASS, OTP_SECRET);
// browser settings from config.yaml.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = banner_autoreg::load_yaml_config()?;
    let addr =
        std::env::var("AUTOREG_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    banner_autoreg::server::serve(&addr, config).await
}
