// 📈 Gain/Loss Reports
//
// Realized gains per disposal, split by holding period:
//   gain = proceeds - cost_basis
//   long-term  ⇔ sold more than one year after acquisition
// plus the portfolio allocation donut and the dashboard overview cards.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::chart::PieSegment;
use crate::model::{NotificationItem, Transaction};

/// Fallback swatches for holdings without a brand color
const PALETTE: [&str; 6] = ["#2563EB", "#16A34A", "#EAB308", "#DC2626", "#9333EA", "#6B7280"];

// ============================================================================
// HOLDING PERIOD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingTerm {
    ShortTerm,
    LongTerm,
}

impl HoldingTerm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingTerm::ShortTerm => "Short-term",
            HoldingTerm::LongTerm => "Long-term",
        }
    }
}

// ============================================================================
// DISPOSAL
// ============================================================================

/// A realized sale of one lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disposal {
    pub asset: String,
    pub quantity: f64,
    pub acquired: NaiveDate,
    pub sold: NaiveDate,
    pub proceeds: f64,
    pub cost_basis: f64,
}

impl Disposal {
    pub fn gain(&self) -> f64 {
        self.proceeds - self.cost_basis
    }

    /// More than one year: a lot sold on its one-year anniversary is short-term
    pub fn term(&self) -> HoldingTerm {
        match self.acquired.checked_add_months(Months::new(12)) {
            Some(anniversary) if self.sold > anniversary => HoldingTerm::LongTerm,
            _ => HoldingTerm::ShortTerm,
        }
    }

    pub fn holding_days(&self) -> i64 {
        (self.sold - self.acquired).num_days()
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GainLossSummary {
    pub disposal_count: usize,
    pub total_proceeds: f64,
    pub total_cost_basis: f64,
    pub short_term_gain: f64,
    pub long_term_gain: f64,
}

impl GainLossSummary {
    pub fn from_disposals(disposals: &[Disposal]) -> Self {
        disposals
            .iter()
            .fold(GainLossSummary::default(), |mut acc, d| {
                acc.disposal_count += 1;
                acc.total_proceeds += d.proceeds;
                acc.total_cost_basis += d.cost_basis;
                match d.term() {
                    HoldingTerm::ShortTerm => acc.short_term_gain += d.gain(),
                    HoldingTerm::LongTerm => acc.long_term_gain += d.gain(),
                }
                acc
            })
    }

    /// Only disposals sold within `tax_year`
    pub fn for_tax_year(disposals: &[Disposal], tax_year: i32) -> Self {
        Self::from_disposals(&disposals_in_year(disposals, tax_year))
    }

    pub fn net_gain(&self) -> f64 {
        self.short_term_gain + self.long_term_gain
    }

    pub fn summary(&self) -> String {
        format!(
            "{} disposals | proceeds ${:.2} | basis ${:.2} | short-term ${:.2} | long-term ${:.2} | net ${:.2}",
            self.disposal_count,
            self.total_proceeds,
            self.total_cost_basis,
            self.short_term_gain,
            self.long_term_gain,
            self.net_gain()
        )
    }
}

/// Disposals whose sale date falls in `tax_year`, in input order
pub fn disposals_in_year(disposals: &[Disposal], tax_year: i32) -> Vec<Disposal> {
    disposals
        .iter()
        .filter(|d| d.sold.year() == tax_year)
        .cloned()
        .collect()
}

/// Income-type transactions (staking, airdrops, payments) valued at FMV
pub fn ordinary_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.tx_type.is_income())
        .map(|tx| tx.fmv)
        .sum()
}

// ============================================================================
// ALLOCATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset: String,
    pub value_usd: f64,
    #[serde(default)]
    pub color: String,
}

/// One donut segment per holding, in holding order
pub fn allocation_segments(holdings: &[Holding]) -> Vec<PieSegment> {
    holdings
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let color = if h.color.is_empty() {
                PALETTE[i % PALETTE.len()]
            } else {
                h.color.as_str()
            };
            PieSegment::new(h.value_usd, color, &h.asset)
        })
        .collect()
}

// ============================================================================
// DASHBOARD OVERVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub portfolio_value: f64,
    pub net_gain: f64,
    pub ordinary_income: f64,
    pub transactions_needing_review: usize,
    pub unread_notifications: usize,
}

impl DashboardOverview {
    pub fn build(
        holdings: &[Holding],
        disposals: &[Disposal],
        transactions: &[Transaction],
        notifications: &[NotificationItem],
    ) -> Self {
        DashboardOverview {
            portfolio_value: holdings.iter().map(|h| h.value_usd).sum(),
            net_gain: GainLossSummary::from_disposals(disposals).net_gain(),
            ordinary_income: ordinary_income(transactions),
            transactions_needing_review: transactions.iter().filter(|t| t.needs_review()).count(),
            unread_notifications: notifications.iter().filter(|n| !n.read).count(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
