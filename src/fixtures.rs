// 🗂️ Mock Datasets - the dashboard's in-memory data
//
// Every page renders from these lists. Transactions can also be loaded from a
// CSV export with the same columns as `Transaction`.

use anyhow::{ensure, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::debug;

use crate::model::{
    Anomaly, AnomalyKind, AuditEntry, AuditIcon, Client, ClientStatus, NotificationItem,
    NotificationKind, Severity, Transaction, TransactionStatus, TransactionType, MAX_CONFIDENCE,
};
use crate::reports::{Disposal, Holding};

/// Export id carried by the sample Form 8949 audit trail
pub const SAMPLE_EXPORT_ID: &str = "EXP-2024-001";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_hms_opt(h, min, 0)
        .unwrap_or(NaiveDateTime::MIN)
}

#[allow(clippy::too_many_arguments)]
fn tx(
    id: &str,
    date: NaiveDate,
    tx_type: TransactionType,
    asset: &str,
    amount: f64,
    fmv: f64,
    memo: &str,
    ai_label: &str,
    confidence: u8,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date,
        tx_type,
        asset: asset.to_string(),
        amount,
        fmv,
        memo: memo.to_string(),
        ai_label: ai_label.to_string(),
        confidence,
        status,
    }
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

#[rustfmt::skip]
pub fn transactions() -> Vec<Transaction> {
    use TransactionStatus::*;
    use TransactionType::*;

    vec![
        tx("TX-1001", date(2024, 1, 15), Buy, "BTC", 0.5, 21_450.00,
           "Coinbase market buy BTC-USD", "Purchase", 98, Classified),
        tx("TX-1002", date(2024, 2, 3), StakingReward, "ETH", 0.042, 97.35,
           "Kraken staking reward ETH2.S", "Staking Income", 94, Classified),
        tx("TX-1003", date(2024, 2, 20), Trade, "ETH", 2.0, 5_880.00,
           "Uniswap swap USDC -> ETH", "Crypto-to-Crypto Trade", 87, Classified),
        tx("TX-1004", date(2024, 3, 8), Transfer, "BTC", 0.25, 16_800.00,
           "Withdrawal to Ledger Nano X", "Self Transfer", 62, NeedsReview),
        tx("TX-1005", date(2024, 3, 29), Sell, "SOL", 40.0, 7_640.00,
           "Coinbase market sell SOL-USD", "Disposal", 96, Classified),
        tx("TX-1006", date(2024, 4, 12), Airdrop, "ARB", 625.0, 812.50,
           "Arbitrum airdrop claim", "Airdrop Income", 91, Classified),
        tx("TX-1007", date(2024, 5, 2), Fee, "ETH", 0.004, 12.40,
           "Gas fee contract interaction", "Network Fee", 55, NeedsReview),
        tx("TX-1008", date(2024, 6, 18), Sell, "BTC", 0.1, 6_540.00,
           "Kraken limit sell XBT/USD", "Disposal", 97, Reviewed),
        tx("TX-1009", date(2024, 7, 9), Income, "USDC", 1_500.0, 1_500.00,
           "Payment for consulting invoice 2024-07", "Business Income", 48, Flagged),
        tx("TX-1010", date(2024, 8, 22), Trade, "SOL", 25.0, 3_675.00,
           "Jupiter swap ETH -> SOL", "Crypto-to-Crypto Trade", 83, Classified),
        tx("TX-1011", date(2024, 10, 5), StakingReward, "SOL", 1.8, 270.90,
           "Marinade staking reward mSOL", "Staking Income", 89, Classified),
        tx("TX-1012", date(2024, 11, 27), Buy, "ETH", 1.5, 5_175.00,
           "Gemini recurring buy ETH", "Purchase", 99, Reviewed),
    ]
}

/// Load transactions from a CSV file (same columns as `Transaction`)
pub fn load_transactions_csv(csv_path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;

    let mut transactions = Vec::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        let transaction: Transaction = result.context("Failed to deserialize transaction")?;
        ensure!(
            transaction.confidence <= MAX_CONFIDENCE,
            "Row {}: confidence {} out of range (0-{})",
            idx + 1,
            transaction.confidence,
            MAX_CONFIDENCE
        );
        transactions.push(transaction);
    }

    debug!(count = transactions.len(), path = ?csv_path, "loaded transactions from CSV");
    Ok(transactions)
}

// ============================================================================
// CLIENTS
// ============================================================================

pub fn clients() -> Vec<Client> {
    let client = |id: u32, name: &str, email: &str, status: ClientStatus| Client {
        id,
        name: name.to_string(),
        email: email.to_string(),
        tax_year: 2024,
        status,
    };

    vec![
        client(1, "John Smith", "john.smith@example.com", ClientStatus::Active),
        client(2, "Sarah Johnson", "sarah.j@example.com", ClientStatus::Pending),
        client(3, "Michael Brown", "mbrown@example.com", ClientStatus::Completed),
        client(4, "Lisa Davis", "lisa.davis@example.com", ClientStatus::Active),
    ]
}

// ============================================================================
// ANOMALIES
// ============================================================================

#[rustfmt::skip]
pub fn anomalies() -> Vec<Anomaly> {
    let anomaly = |id: &str,
                   transaction_id: &str,
                   kind: AnomalyKind,
                   severity: Severity,
                   asset: &str,
                   date: NaiveDate,
                   description: &str| Anomaly {
        id: id.to_string(),
        transaction_id: transaction_id.to_string(),
        kind,
        severity,
        asset: asset.to_string(),
        date,
        description: description.to_string(),
    };

    vec![
        anomaly("AN-01", "TX-1004", AnomalyKind::UnmatchedTransfer, Severity::High, "BTC",
                date(2024, 3, 8), "Outgoing transfer has no matching deposit in any connected wallet"),
        anomaly("AN-02", "TX-1005", AnomalyKind::MissingCostBasis, Severity::High, "SOL",
                date(2024, 3, 29), "Sold 40 SOL but only 22 SOL have a recorded acquisition"),
        anomaly("AN-03", "TX-1007", AnomalyKind::PriceDeviation, Severity::Low, "ETH",
                date(2024, 5, 2), "Reported FMV differs from market close by 6.2%"),
        anomaly("AN-04", "TX-1008", AnomalyKind::DuplicateTransaction, Severity::Medium, "BTC",
                date(2024, 6, 18), "Same sell imported from both Kraken API and CSV upload"),
        anomaly("AN-05", "TX-1009", AnomalyKind::PriceDeviation, Severity::Medium, "USDC",
                date(2024, 7, 9), "Stablecoin valued off-peg at 1.004 USD"),
    ]
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

#[rustfmt::skip]
pub fn notifications() -> Vec<NotificationItem> {
    let item = |id: u32, title: &str, description: Option<&str>, time: &str, read: bool, kind| {
        NotificationItem {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            time: time.to_string(),
            read,
            kind,
        }
    };

    vec![
        item(1, "Coinbase sync complete", Some("142 new transactions imported"),
             "5 minutes ago", false, NotificationKind::Success),
        item(2, "3 transactions need review", Some("Low-confidence classifications on ETH and BTC"),
             "1 hour ago", false, NotificationKind::Warning),
        item(3, "MetaMask connection failed", Some("Re-authorize the wallet to resume syncing"),
             "3 hours ago", false, NotificationKind::Error),
        item(4, "Form 8949 ready", None, "Yesterday", true, NotificationKind::Info),
        item(5, "Tax year 2024 opened", None, "2 days ago", true, NotificationKind::Info),
    ]
}

// ============================================================================
// AUDIT TRAIL
// ============================================================================

/// Static audit trail for an export; unknown ids have no history
#[rustfmt::skip]
pub fn audit_trail(export_id: &str) -> Vec<AuditEntry> {
    if export_id != SAMPLE_EXPORT_ID {
        return Vec::new();
    }

    let entry = |time: NaiveDateTime, user: &str, action: &str, icon: AuditIcon, details: &str| {
        AuditEntry {
            time,
            user: user.to_string(),
            action: action.to_string(),
            icon,
            details: details.to_string(),
        }
    };

    vec![
        entry(at(2025, 2, 10, 9, 12), "Sarah Johnson", "Export created", AuditIcon::Created,
              "Form 8949 draft for tax year 2024"),
        entry(at(2025, 2, 10, 9, 13), "System", "Form generated", AuditIcon::Generated,
              "6 disposals across Part I and Part II"),
        entry(at(2025, 2, 11, 16, 40), "Sarah Johnson", "Cost basis edited", AuditIcon::Edited,
              "SOL lot basis corrected from 2,900.00 to 3,100.00"),
        entry(at(2025, 2, 12, 10, 5), "John Smith", "Export downloaded", AuditIcon::Downloaded,
              "form-8949-2024.csv"),
        entry(at(2025, 2, 12, 10, 7), "John Smith", "Shared with accountant", AuditIcon::Shared,
              "Sent to michael.brown@example.com"),
    ]
}

// ============================================================================
// REALIZED DISPOSALS + HOLDINGS
// ============================================================================

pub fn disposals() -> Vec<Disposal> {
    let disposal = |asset: &str, quantity: f64, acquired, sold, proceeds: f64, cost_basis: f64| {
        Disposal {
            asset: asset.to_string(),
            quantity,
            acquired,
            sold,
            proceeds,
            cost_basis,
        }
    };

    vec![
        disposal("SOL", 40.0, date(2023, 11, 2), date(2024, 3, 29), 7_640.00, 1_640.00),
        disposal("BTC", 0.1, date(2022, 6, 18), date(2024, 6, 18), 6_540.00, 2_050.00),
        disposal("ETH", 1.2, date(2023, 2, 20), date(2024, 2, 20), 3_528.00, 1_980.00),
        disposal("ETH", 0.8, date(2021, 11, 9), date(2024, 2, 20), 2_352.00, 3_810.00),
        disposal("ARB", 300.0, date(2024, 4, 12), date(2024, 9, 30), 165.00, 390.00),
        disposal("SOL", 8.0, date(2023, 8, 21), date(2024, 8, 22), 1_176.00, 168.00),
    ]
}

pub fn holdings() -> Vec<Holding> {
    let holding = |asset: &str, value_usd: f64, color: &str| Holding {
        asset: asset.to_string(),
        value_usd,
        color: color.to_string(),
    };

    vec![
        holding("Bitcoin", 42_750.00, "#F7931A"),
        holding("Ethereum", 24_310.00, "#627EEA"),
        holding("Solana", 9_820.00, "#14F195"),
        holding("USD Coin", 6_200.00, "#2775CA"),
        holding("Arbitrum", 1_140.00, "#28A0F0"),
    ]
}
