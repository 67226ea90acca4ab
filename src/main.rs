//! Brazilian postal code (CEP) lookup from the terminal.
//!
//! Reads a CEP, queries the ViaCEP service once and prints the address.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the CEP
//! viacep
//!
//! # Look up directly and print every field
//! viacep 01001000 --full
//!
//! # Scripted use, no closing key press
//! echo 01001000 | viacep --no-pause
//! ```

use std::io::{self, IsTerminal, Write};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viacep::api_client::ViaCepClient;
use viacep::config::{self, Settings, BASE_URL_ENV};
use viacep::session::{Session, CLOSING_PROMPT};
use viacep::terminal::TerminalManager;
use viacep::ui::{self, colors};

/// CLI arguments.
#[derive(Parser)]
#[command(name = "viacep")]
#[command(about = "Look up a Brazilian postal code (CEP)")]
#[command(version)]
struct Cli {
    /// CEP to look up. Prompted for when omitted.
    #[arg(value_name = "CEP")]
    cep: Option<String>,

    /// Base URL of the lookup service.
    #[arg(long, value_name = "URL", env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Print every address field.
    #[arg(long)]
    full: bool,

    /// Exit without waiting for a key press.
    #[arg(long)]
    no_pause: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Only log to stderr so stdout carries the lookup result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viacep=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let file_config = config::load_config();
    let settings = Settings::resolve(
        &file_config,
        cli.base_url.as_deref(),
        cli.full,
        cli.no_pause,
    )?;
    debug!(?settings, "Resolved settings");

    let styled = io::stdout().is_terminal();
    ui::display_banner(styled);

    let outcome = {
        let client = ViaCepClient::new(&settings.base_url, settings.timeout)?;
        let mut session = Session::new(client, io::stdout(), settings.show_all_fields);
        match cli.cep {
            Some(raw) => session.run(&raw).await?,
            None => session.prompt_and_run(&mut io::stdin().lock()).await?,
        }
    };

    if outcome.reaches_closing_prompt() {
        wait_for_exit(settings.pause_on_exit, styled)?;
    }

    Ok(())
}

/// Prints the closing prompt and waits for a key press.
///
/// Skipped when pausing is disabled or stdin is not a terminal.
fn wait_for_exit(pause: bool, styled: bool) -> anyhow::Result<()> {
    if !pause || !TerminalManager::is_interactive() {
        debug!(pause, "Skipping closing key press");
        return Ok(());
    }

    let mut stdout = io::stdout();
    if styled {
        writeln!(
            stdout,
            "\n{}{}{}",
            ui::fg_color(colors::TEXT_MUTED),
            CLOSING_PROMPT,
            ui::RESET
        )?;
    } else {
        writeln!(stdout, "\n{}", CLOSING_PROMPT)?;
    }
    stdout.flush()?;

    TerminalManager::new().wait_for_key()?;
    Ok(())
}
