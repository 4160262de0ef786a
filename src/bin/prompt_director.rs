//! prompt-director server — 创意简报生成服务
//!
//! Usage:
//!   prompt-director            Serve on PROMPT_DIRECTOR_BIND (default 0.0.0.0:8888)
//!
//! Configuration is read from the environment; see `prompt_director::config`.
//! Log verbosity follows `RUST_LOG` (default `info`).

use prompt_director::DirectorConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DirectorConfig::from_env()?;
    if config.fallback_credential.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; requests must carry userApiKey");
    }

    prompt_director::server::run(config).await?;
    Ok(())
}
