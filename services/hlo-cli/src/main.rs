//! HeroLab Online CLI
//!
//! Interactive client for the Hero Lab Online API:
//! 1. Resolves the user and access tokens
//! 2. Exchanges the user token for an access token when needed
//! 3. Runs a menu to fetch characters, list a campaign's cast and manage
//!    the access token

mod args;
mod config;
mod console;
mod output;
mod session;

use anyhow::{Context, Result};
use hlo_api::{HloClient, TokenStore};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Args, USAGE};
use crate::config::Config;
use crate::console::Console;
use crate::session::{KnownTokens, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    // Logs go to stderr so they never mix with menu output.
    // LOG_LEVEL / RUST_LOG select the filter, LOG_FORMAT=json the format.
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let (config_path, explicit) = Config::resolve_path(args.config.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path, explicit)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let store = match &config.storage.token_dir {
        Some(dir) => TokenStore::new(dir),
        None => TokenStore::default_location()
            .context("cannot determine home directory; set storage.token_dir")?,
    };

    info!(
        base_url = %config.api.base_url,
        tool_name = %config.api.tool_name,
        auto_token_handling = config.api.auto_token_handling,
        token_dir = %store.dir().display(),
        "configuration loaded"
    );

    let known = KnownTokens {
        user_token: args.user_token.or(config.user_token),
        access_token: args.access_token.or(config.access_token),
        save_access_token: args.save_access_token,
    }
    .with_stored(&store)
    .await?;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let known = Session::prompt_for_tokens(&mut console, known).await?;

    let mut builder = HloClient::builder(
        known
            .user_token
            .as_ref()
            .map(|token| token.as_str().to_owned())
            .unwrap_or_default(),
    )
    .tool_name(config.api.tool_name.clone())
    .auto_token_handling(config.api.auto_token_handling)
    .base_url(config.api.base_url.clone())
    .timeout(config.api.timeout());
    if let Some(token) = &known.access_token {
        builder = builder.access_token(token.as_str());
    }

    let mut session = Session::new(builder.build(), store, console);
    session.bootstrap(known.save_access_token).await?;
    session.run().await
}
