use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crypto_tax_dashboard::config::init_logging;
use crypto_tax_dashboard::filter::{AnomalyFilter, ClientFilter, TransactionFilter};
use crypto_tax_dashboard::reports::{allocation_segments, disposals_in_year, ordinary_income};
use crypto_tax_dashboard::view_state::{ExportAction, NotificationAction};
use crypto_tax_dashboard::{
    export_form_8949, fixtures, ConnectionRegistry, DashboardOverview, ExportJob,
    GainLossSummary, NotificationsView, PieChart, Reducer, RuleEngine, Severity, Transaction,
    TransactionStatus, TransactionType,
};

#[derive(Parser)]
#[command(name = "tax-dashboard", version, about = "Crypto tax dashboard panels in the terminal")]
struct Cli {
    /// Load transactions from a CSV file instead of the sample data
    #[arg(long, global = true)]
    transactions: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary cards: portfolio value, net gain, review queue
    Overview,

    /// Transaction list with filters
    Transactions {
        #[arg(long, default_value = "")]
        search: String,
        /// buy, sell, trade, transfer, staking_reward, airdrop, income, fee
        #[arg(long = "type")]
        tx_type: Option<String>,
        /// classified, needs_review, reviewed, flagged
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Re-run classification rules before listing
        #[arg(long)]
        classify: bool,
        /// JSON rules file (defaults to the built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Detected anomalies
    Anomalies {
        #[arg(long, default_value = "")]
        search: String,
        /// high, medium, low
        #[arg(long)]
        severity: Option<String>,
    },

    /// Accountant client list
    Clients {
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Notification feed
    Notifications {
        /// Mark these notification ids as read
        #[arg(long = "mark-read")]
        mark_read: Vec<u32>,
    },

    /// Linked exchanges and wallets
    Connections,

    /// Realized gain/loss summary
    Report {
        #[arg(long, default_value_t = 2024)]
        year: i32,
    },

    /// Portfolio allocation donut as SVG
    Chart {
        #[arg(long, default_value = "allocation.svg")]
        output: PathBuf,
        #[arg(long, default_value_t = 240.0)]
        size: f64,
    },

    /// Export IRS Form 8949 as CSV
    Export {
        #[arg(long, default_value_t = 2024)]
        year: i32,
        #[arg(long, default_value = "form-8949.csv")]
        output: PathBuf,
    },

    /// Audit trail for an export id
    Audit {
        #[arg(default_value = fixtures::SAMPLE_EXPORT_ID)]
        export_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let transactions = match &cli.transactions {
        Some(path) => fixtures::load_transactions_csv(path)?,
        None => fixtures::transactions(),
    };
    info!(count = transactions.len(), "transactions loaded");

    match cli.command {
        Command::Overview => run_overview(&transactions),
        Command::Transactions { search, tx_type, status, from, to, classify, rules } => {
            let filter = TransactionFilter {
                search,
                tx_type: tx_type.as_deref().map(parse_type).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                date_from: from,
                date_to: to,
            };
            run_transactions(transactions, &filter, classify, rules)
        }
        Command::Anomalies { search, severity } => {
            let severity = severity
                .as_deref()
                .map(|s| Severity::parse(s).ok_or_else(|| anyhow!("Unknown severity: {}", s)))
                .transpose()?;
            run_anomalies(&AnomalyFilter { search, kind: None, severity });
            Ok(())
        }
        Command::Clients { search } => {
            run_clients(&ClientFilter { search });
            Ok(())
        }
        Command::Notifications { mark_read } => {
            run_notifications(mark_read);
            Ok(())
        }
        Command::Connections => {
            run_connections();
            Ok(())
        }
        Command::Report { year } => {
            run_report(year, &transactions);
            Ok(())
        }
        Command::Chart { output, size } => run_chart(&output, size),
        Command::Export { year, output } => run_export(year, &output),
        Command::Audit { export_id } => {
            run_audit(&export_id);
            Ok(())
        }
    }
}

fn parse_type(s: &str) -> Result<TransactionType> {
    TransactionType::parse(s).ok_or_else(|| anyhow!("Unknown transaction type: {}", s))
}

fn parse_status(s: &str) -> Result<TransactionStatus> {
    TransactionStatus::parse(s).ok_or_else(|| anyhow!("Unknown status: {}", s))
}

fn header(title: &str) {
    println!("{}", title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn run_overview(transactions: &[Transaction]) -> Result<()> {
    header("📊 Dashboard Overview");

    let overview = DashboardOverview::build(
        &fixtures::holdings(),
        &fixtures::disposals(),
        transactions,
        &fixtures::notifications(),
    );

    println!("Portfolio value:      ${:>12.2}", overview.portfolio_value);
    println!("Net realized gain:    ${:>12.2}", overview.net_gain);
    println!("Ordinary income:      ${:>12.2}", overview.ordinary_income);
    println!("Needs review:          {:>12}", overview.transactions_needing_review);
    println!("Unread notifications:  {:>12}", overview.unread_notifications);

    let chart = PieChart::layout(&allocation_segments(&fixtures::holdings()), 240.0)?;
    println!("\nAllocation");
    for line in chart.legend_lines() {
        println!("  • {}", line);
    }

    Ok(())
}

fn run_transactions(
    transactions: Vec<Transaction>,
    filter: &TransactionFilter,
    classify: bool,
    rules: Option<PathBuf>,
) -> Result<()> {
    header("💱 Transactions");

    let transactions = if classify {
        let engine = match rules {
            Some(path) => RuleEngine::from_file(path)?,
            None => RuleEngine::with_default_rules(),
        };
        println!("✓ Applied {} classification rules", engine.rule_count());
        engine.apply(&transactions)
    } else {
        transactions
    };

    let visible = filter.apply(&transactions);

    for tx in &visible {
        println!(
            "{:<8} {} {:<15} {:>12.6} {:<5} ${:>11.2}  {:<24} {:>3}%  {}",
            tx.id,
            tx.date,
            tx.tx_type.as_str(),
            tx.amount,
            tx.asset,
            tx.fmv,
            tx.ai_label,
            tx.confidence,
            tx.status.as_str()
        );
    }

    println!("\n{} of {} transactions", visible.len(), transactions.len());
    Ok(())
}

fn run_anomalies(filter: &AnomalyFilter) {
    header("⚠️  Anomalies");

    let anomalies = fixtures::anomalies();
    let visible = filter.apply(&anomalies);

    for a in &visible {
        println!(
            "[{:<6}] {:<22} {} {:<5} {}  {}",
            a.severity.as_str(),
            a.kind.as_str(),
            a.date,
            a.asset,
            a.transaction_id,
            a.description
        );
    }

    println!("\n{} of {} anomalies", visible.len(), anomalies.len());
}

fn run_clients(filter: &ClientFilter) {
    header("👥 Clients");

    let clients = fixtures::clients();
    for c in filter.apply(&clients) {
        println!("{:<16} {:<26} {}  {}", c.name, c.email, c.tax_year, c.status.as_str());
    }
}

fn run_notifications(mark_read: Vec<u32>) {
    header("🔔 Notifications");

    let view = NotificationsView::new(fixtures::notifications())
        .reduce_all(mark_read.into_iter().map(NotificationAction::MarkRead));

    for n in &view.items {
        let dot = if n.read { " " } else { "●" };
        println!("{} {:<30} {:<14} {}", dot, n.title, n.time, n.kind.icon());
        if let Some(description) = &n.description {
            println!("    {}", description);
        }
    }

    println!("\n{} unread", view.unread_count());
}

fn run_connections() {
    header("🔗 Connections");

    let registry = ConnectionRegistry::with_default_connections();
    for c in registry.all() {
        let synced = c
            .last_synced
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<16} {:<11} {:<13} {:>5} txs  synced {}",
            c.name,
            c.kind.as_str(),
            c.status.as_str(),
            c.transaction_count,
            synced
        );
    }

    let attention = registry.needing_attention();
    if !attention.is_empty() {
        println!("\n{} connection(s) need attention", attention.len());
    }
}

fn run_report(year: i32, transactions: &[Transaction]) {
    header(&format!("📈 Gain/Loss Report - {}", year));

    let disposals = disposals_in_year(&fixtures::disposals(), year);
    if disposals.is_empty() {
        println!("No disposals sold in {}", year);
    }
    for d in &disposals {
        println!(
            "{:>8} {:<5} {} → {}  {:<10} gain ${:>10.2}",
            d.quantity,
            d.asset,
            d.acquired,
            d.sold,
            d.term().as_str(),
            d.gain()
        );
    }

    let summary = GainLossSummary::from_disposals(&disposals);
    println!("\n{}", summary.summary());

    println!(
        "Ordinary income (staking, airdrops, payments): ${:.2}",
        ordinary_income(transactions)
    );
}

fn run_chart(output: &Path, size: f64) -> Result<()> {
    header("🍩 Allocation Chart");

    let chart = PieChart::layout(&allocation_segments(&fixtures::holdings()), size)?;
    let svg = chart.to_svg("Portfolio allocation", "#FFFFFF");

    fs::write(output, svg).with_context(|| format!("Failed to write chart: {:?}", output))?;

    for line in chart.legend_lines() {
        println!("  • {}", line);
    }
    println!("\n✓ Wrote {:?}", output);
    Ok(())
}

fn run_export(year: i32, output: &Path) -> Result<()> {
    header(&format!("🧾 Form 8949 Export - {}", year));

    // Same fixed-step progress the export screen shows
    let mut job = ExportJob::new("Form 8949").reduce(ExportAction::Start);
    while !job.is_done() {
        job = job.reduce(ExportAction::Tick);
        println!("  {:>3}%", job.progress);
    }

    let (bytes, record) = export_form_8949(&fixtures::disposals(), year)?;
    fs::write(output, &bytes).with_context(|| format!("Failed to write export: {:?}", output))?;

    println!(
        "\n✓ Export {} ({} rows: {} short-term, {} long-term)",
        record.id, record.row_count, record.short_term_rows, record.long_term_rows
    );
    println!("✓ SHA-256 {}", record.sha256);
    println!("✓ Wrote {:?}", output);
    Ok(())
}

fn run_audit(export_id: &str) {
    header(&format!("🕑 Audit Trail - {}", export_id));

    let entries = fixtures::audit_trail(export_id);
    if entries.is_empty() {
        println!("No audit history for {}", export_id);
        return;
    }

    for e in entries {
        println!(
            "{}  {:<10} {:<14} {:<24} {}",
            e.time.format("%Y-%m-%d %H:%M"),
            e.icon.icon(),
            e.user,
            e.action,
            e.details
        );
    }
}
