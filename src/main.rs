use clap::Parser;
use lead_relay::relay_state::{
    DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_PROVIDER_URL, RelayConfig, RelayState,
};
use lead_relay::server;

/// Real-estate lead chat relay
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "127.0.0.1", help = "Host address to bind the server to")]
    host: String,

    #[arg(long, default_value_t = 3000, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        default_value = DEFAULT_PROVIDER_URL,
        help = "Chat-completion endpoint requests are relayed to"
    )]
    provider_url: String,

    #[arg(
        long,
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        help = "Bearer token for the completion provider"
    )]
    api_key: Option<String>,

    #[arg(long, help = "Timeout in seconds for provider requests (transport default if unset)")]
    timeout_secs: Option<u64>,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PAYLOAD_SIZE,
        help = "Maximum size in bytes of a chat request body, history included"
    )]
    max_payload_size: usize,

    #[arg(long, default_value = "info", help = "Log level: error, warn, info, debug or trace")]
    log_level: log::LevelFilter,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            host: self.host.clone(),
            port: self.port,
            provider_url: self.provider_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout_secs,
            max_payload_size: self.max_payload_size,
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    server::init_logging(args.log_level);
    let relay_state = RelayState::new(args.relay_config())?;
    server::startup(relay_state).await?;
    Ok(())
}
