use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use invoicekit_app::pages::dashboard::Dashboard;
use invoicekit_app::pages::detail::InvoiceDetail;
use invoicekit_app::pages::overdue::{OverdueFilter, OverdueReport, send_bulk_reminders};
use invoicekit_app::pages::InvoiceSummary;
use invoicekit_app::{AppConfig, SimulatedMailer, build_store, render};
use invoicekit_core::{InvoiceId, SystemClock};

#[derive(Parser)]
#[command(name = "invoicekit", about = "Invoice manager over an in-memory store")]
struct Cli {
    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary cards and recent invoices
    Dashboard,
    /// Every invoice, insertion order
    List,
    /// One invoice with its line items
    Show {
        /// Invoice id
        id: String,
    },
    /// Overdue invoices report
    Overdue {
        /// all, late or outstanding
        #[arg(long, default_value = "all")]
        filter: String,
        /// Send (simulated) reminder emails to every listed client
        #[arg(long)]
        remind: bool,
    },
}

fn print<T: Serialize>(json: bool, value: &T, table: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", table(value));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;
    invoicekit_observability::init(config.log_format);

    let store = build_store(&config, SystemClock);
    let currency = config.currency.as_str();

    tracing::debug!(invoices = store.all_invoices().len(), currency, "store ready");

    match cli.command {
        Command::Dashboard => {
            let dashboard = Dashboard::build(&store, currency, config.recent_limit);
            print(cli.json, &dashboard, render::dashboard)?;
        }
        Command::List => {
            let rows: Vec<InvoiceSummary> = store
                .all_invoices()
                .iter()
                .map(|invoice| InvoiceSummary::new(invoice, currency))
                .collect();
            print(cli.json, &rows, |rows| render::invoice_table(rows).to_string())?;
        }
        Command::Show { id } => {
            let id: InvoiceId = id.parse()?;
            let Some(invoice) = store.invoice_by_id(&id) else {
                bail!("invoice {id} not found");
            };
            let detail = InvoiceDetail::build(invoice, store.now(), currency);
            print(cli.json, &detail, render::detail)?;
        }
        Command::Overdue { filter, remind } => {
            let filter: OverdueFilter = filter.parse()?;
            let report = OverdueReport::build(&store, filter, currency);
            print(cli.json, &report, render::overdue)?;

            if remind && !report.is_empty() {
                let mailer = SimulatedMailer::new();
                let sent = send_bulk_reminders(&store, &mailer, filter, currency)?;
                eprintln!("Bulk reminder emails sent to {sent} clients!");
            }
        }
    }

    Ok(())
}
