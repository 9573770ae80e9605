//! # Storefront CLI Library
//!
//! Terminal rendering surface for the storefront: a product grid, a cart
//! badge, a cart modal, toasts and checkout, driven by one command per line.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (startup & event loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── shop.rs     ◄─── Session state (cart manager, filter, badge)
//! │   └── config.rs   ◄─── Configuration (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── catalog.rs  ◄─── products / filter / search / categories
//! │   └── cart.rs     ◄─── add / inc / dec / remove / clear / checkout
//! ├── notification.rs ◄─── Expiring toasts
//! ├── render.rs       ◄─── Text and JSON output
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod notification;
pub mod render;
pub mod state;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use storefront_core::Catalog;

use commands::{Command, Response};
use render::Renderer;
use state::{OutputFormat, ShopState, StorefrontConfig};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Terminal storefront: browse products, fill a cart, check out",
    after_help = "Examples:\n  storefront\n  storefront --json\n  echo 'add 9' | storefront"
)]
pub struct Cli {
    #[arg(long, value_name = "PATH", help = "Config file (default: platform config dir)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Emit one JSON document per response")]
    json: bool,
}

/// Runs the storefront until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse flags (clap)                                                  │
/// │  2. Load StorefrontConfig: defaults → storefront.toml → STOREFRONT_*    │
/// │  3. Initialize logging (stderr, RUST_LOG or config.log_filter)          │
/// │  4. Build ShopState over the built-in catalog                           │
/// │  5. Event loop on stdin/stdout                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match StorefrontConfig::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("storefront: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.json {
        config.output = OutputFormat::Json;
    }

    init_tracing(&config.log_filter);
    match &config.source {
        Some(path) => info!(path = %path.display(), "Loaded configuration file"),
        None => debug!("No configuration file, using defaults"),
    }
    for ignored in &config.ignored_overrides {
        warn!(%ignored, "Ignoring invalid environment override");
    }
    info!(store = %config.store_name, output = ?config.output, "Starting storefront");

    let mut state = ShopState::new(Arc::new(Catalog::builtin()), &config);
    let renderer = Renderer::new(&config);
    let stdin = BufReader::new(tokio::io::stdin());

    match serve(&mut state, &renderer, stdin, tokio::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}

/// The event loop: one input line at a time, plus toast expiry.
///
/// ## Events
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  select! ─┬─► next line ──► parse ──► execute ──► render ──► header    │
/// │           │                                                             │
/// │           └─► next toast deadline ──► prune_expired ──► header         │
/// │                                                                         │
/// │  Ends on `quit` or end of input.                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Each line runs to completion before the next event is taken, so cart
/// transactions never interleave.
pub async fn serve<R, W>(
    state: &mut ShopState,
    renderer: &Renderer,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    emit(&mut writer, &renderer.render(&Ok(commands::catalog::products(state)))).await?;
    if let Some(header) = renderer.header(state) {
        emit(&mut writer, &header).await?;
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let result = line
                    .parse::<Command>()
                    .and_then(|command| commands::execute(state, command));
                emit(&mut writer, &renderer.render(&result)).await?;

                if matches!(result, Ok(Response::Quit)) {
                    break;
                }
                if let Some(header) = renderer.header(state) {
                    emit(&mut writer, &header).await?;
                }
            }
            _ = notification::sleep_until(state.notifier().next_deadline()) => {
                if state.notifier_mut().prune_expired() > 0 {
                    if let Some(header) = renderer.header(state) {
                        emit(&mut writer, &header).await?;
                    }
                }
            }
        }
    }

    writer.flush().await
}

async fn emit<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command and cart change
/// - `RUST_LOG=storefront_core=debug` - Core crate only
/// - Default: `log_filter` from the config (`warn`)
///
/// Logs go to stderr so they never mix with the rendered page.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
