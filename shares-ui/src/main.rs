use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use shares_core::{FieldEvent, InputController};
use shares_ui::{commands, event_loader, logging, view};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Shares return calculator.
///
/// Works out the profit or loss on buying and then selling shares, with
/// optional 0.5% stamp duty. Prices are in pence.
#[derive(Debug, Parser)]
#[command(name = "shares-return", version, about)]
struct Cli {
    /// Buy price per share in pence (e.g. 150 for £1.50).
    #[arg(long, allow_hyphen_values = true)]
    buy_price: Option<String>,

    /// Number of shares bought. Sell shares follow this unless set.
    #[arg(long, allow_hyphen_values = true)]
    buy_shares: Option<String>,

    /// Sell price per share in pence.
    #[arg(long, allow_hyphen_values = true)]
    sell_price: Option<String>,

    /// Number of shares sold. Capped at the shares bought.
    #[arg(long, allow_hyphen_values = true)]
    sell_shares: Option<String>,

    /// Include stamp duty in the buy total and percentage return.
    #[arg(long)]
    inc_tax: bool,

    /// Show the buy and sell totals.
    #[arg(long)]
    details: bool,

    /// Replay recorded edits from a CSV file with `field,value` columns.
    #[arg(long, value_name = "CSV")]
    events: Option<PathBuf>,

    /// Keep editing the form from stdin after applying the other options.
    #[arg(short, long)]
    interactive: bool,

    /// Log filter, e.g. `debug` or `shares_core=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// The field flags as edits, in form order.
    fn field_events(&self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        if let Some(raw) = &self.buy_price {
            events.push(FieldEvent::BuyPrice(raw.clone()));
        }
        if let Some(raw) = &self.buy_shares {
            events.push(FieldEvent::BuyShares(raw.clone()));
        }
        if let Some(raw) = &self.sell_price {
            events.push(FieldEvent::SellPrice(raw.clone()));
        }
        if let Some(raw) = &self.sell_shares {
            events.push(FieldEvent::SellShares(raw.clone()));
        }
        if self.inc_tax {
            events.push(FieldEvent::IncTax(true));
        }
        events
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    if let Some(filter) = &cli.log_level {
        logging::set_log_level(filter)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?cli, "starting");

    let mut controller = InputController::new();
    event_loader::replay(&mut controller, cli.field_events());
    if cli.details {
        controller.toggle_details();
    }

    if let Some(path) = &cli.events {
        let events = event_loader::load_from_file(path)
            .with_context(|| format!("Failed to load events from: {}", path.display()))?;
        info!(count = events.len(), file = %path.display(), "replaying recorded edits");
        event_loader::replay(&mut controller, events);
    }

    if cli.interactive {
        commands::run_session(&mut controller, io::stdin().lock(), io::stdout().lock())?;
    } else {
        print!("{}", view::render(&controller));
    }

    logging::disable_file_logging();
    Ok(())
}
