// 📋 View Models - transactions, clients, anomalies, notifications, audit
//
// Everything here is a transient, read-only view model. Status and type tags
// are closed enums: their badge tone and icon come from exhaustive matches, so
// a new variant fails to compile until it has a display mapping.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::{merge_classes, readable_text_on};

// ============================================================================
// DISPLAY TONE
// ============================================================================

/// Badge color family shared by every tag enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Blue,
    Purple,
    Gray,
}

impl Tone {
    /// Solid swatch color (chart legends, dots)
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Green => "#16A34A",
            Tone::Yellow => "#EAB308",
            Tone::Red => "#DC2626",
            Tone::Blue => "#2563EB",
            Tone::Purple => "#9333EA",
            Tone::Gray => "#6B7280",
        }
    }

    /// Text color with the best contrast on the swatch
    pub fn text_hex(&self) -> &'static str {
        // Every swatch above is a valid 6-digit hex literal
        readable_text_on(self.hex()).unwrap_or("#000000")
    }

    pub fn badge_classes(&self) -> String {
        let palette = match self {
            Tone::Green => "bg-green-100 text-green-800",
            Tone::Yellow => "bg-yellow-100 text-yellow-800",
            Tone::Red => "bg-red-100 text-red-800",
            Tone::Blue => "bg-blue-100 text-blue-800",
            Tone::Purple => "bg-purple-100 text-purple-800",
            Tone::Gray => "bg-gray-100 text-gray-800",
        };
        merge_classes(["inline-flex rounded-full px-2 py-1 text-xs font-medium", palette])
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Buy,
    Sell,
    Trade,
    Transfer,
    StakingReward,
    Airdrop,
    Income,
    Fee,
}

impl TransactionType {
    pub const ALL: [TransactionType; 8] = [
        TransactionType::Buy,
        TransactionType::Sell,
        TransactionType::Trade,
        TransactionType::Transfer,
        TransactionType::StakingReward,
        TransactionType::Airdrop,
        TransactionType::Income,
        TransactionType::Fee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "Buy",
            TransactionType::Sell => "Sell",
            TransactionType::Trade => "Trade",
            TransactionType::Transfer => "Transfer",
            TransactionType::StakingReward => "Staking Reward",
            TransactionType::Airdrop => "Airdrop",
            TransactionType::Income => "Income",
            TransactionType::Fee => "Fee",
        }
    }

    /// Parse either the display name or the snake_case tag
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
    }

    pub fn tone(&self) -> Tone {
        match self {
            TransactionType::Buy => Tone::Green,
            TransactionType::Sell => Tone::Red,
            TransactionType::Trade => Tone::Blue,
            TransactionType::Transfer => Tone::Gray,
            TransactionType::StakingReward | TransactionType::Airdrop => Tone::Purple,
            TransactionType::Income => Tone::Green,
            TransactionType::Fee => Tone::Yellow,
        }
    }

    /// Whether the event is ordinary income rather than a capital event
    pub fn is_income(&self) -> bool {
        matches!(
            self,
            TransactionType::StakingReward | TransactionType::Airdrop | TransactionType::Income
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Classified,
    NeedsReview,
    Reviewed,
    Flagged,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Classified,
        TransactionStatus::NeedsReview,
        TransactionStatus::Reviewed,
        TransactionStatus::Flagged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Classified => "Classified",
            TransactionStatus::NeedsReview => "Needs Review",
            TransactionStatus::Reviewed => "Reviewed",
            TransactionStatus::Flagged => "Flagged",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
    }

    pub fn tone(&self) -> Tone {
        match self {
            TransactionStatus::Classified => Tone::Blue,
            TransactionStatus::NeedsReview => Tone::Yellow,
            TransactionStatus::Reviewed => Tone::Green,
            TransactionStatus::Flagged => Tone::Red,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TransactionStatus::Classified => "sparkles",
            TransactionStatus::NeedsReview => "alert-circle",
            TransactionStatus::Reviewed => "check-circle",
            TransactionStatus::Flagged => "flag",
        }
    }
}

/// Upper bound for classifier confidence percentages
pub const MAX_CONFIDENCE: u8 = 100;

/// A transaction row as shown on the transactions page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub tx_type: TransactionType,
    pub asset: String,
    pub amount: f64,

    /// Fair market value in USD at transaction time
    pub fmv: f64,

    /// Exchange/wallet memo, the text classification rules match against
    #[serde(default)]
    pub memo: String,

    pub ai_label: String,

    /// Classifier confidence, 0-100
    pub confidence: u8,

    pub status: TransactionStatus,
}

impl Transaction {
    pub fn needs_review(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::NeedsReview | TransactionStatus::Flagged
        )
    }

    /// Text handed to the rule engine
    pub fn classification_text(&self) -> String {
        format!("{} {} {}", self.memo, self.tx_type.as_str(), self.asset)
    }
}

// ============================================================================
// CLIENT (accountant view)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Pending,
    Completed,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Pending => "Pending",
            ClientStatus::Completed => "Completed",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ClientStatus::Active => Tone::Blue,
            ClientStatus::Pending => Tone::Yellow,
            ClientStatus::Completed => Tone::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub tax_year: i32,
    pub status: ClientStatus,
}

// ============================================================================
// ANOMALY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    MissingCostBasis,
    DuplicateTransaction,
    PriceDeviation,
    UnmatchedTransfer,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::MissingCostBasis => "Missing Cost Basis",
            AnomalyKind::DuplicateTransaction => "Duplicate Transaction",
            AnomalyKind::PriceDeviation => "Price Deviation",
            AnomalyKind::UnmatchedTransfer => "Unmatched Transfer",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AnomalyKind::MissingCostBasis => "help-circle",
            AnomalyKind::DuplicateTransaction => "copy",
            AnomalyKind::PriceDeviation => "trending-up",
            AnomalyKind::UnmatchedTransfer => "shuffle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Severity::High => Tone::Red,
            Severity::Medium => Tone::Yellow,
            Severity::Low => Tone::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    pub transaction_id: String,
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub asset: String,
    pub date: NaiveDate,
    pub description: String,
}

// ============================================================================
// NOTIFICATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn tone(&self) -> Tone {
        match self {
            NotificationKind::Info => Tone::Blue,
            NotificationKind::Success => Tone::Green,
            NotificationKind::Warning => Tone::Yellow,
            NotificationKind::Error => Tone::Red,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "check-circle",
            NotificationKind::Warning => "alert-triangle",
            NotificationKind::Error => "x-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Relative time label ("2 hours ago")
    pub time: String,
    pub read: bool,
    pub kind: NotificationKind,
}

// ============================================================================
// AUDIT ENTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditIcon {
    Created,
    Generated,
    Downloaded,
    Edited,
    Shared,
}

impl AuditIcon {
    pub fn icon(&self) -> &'static str {
        match self {
            AuditIcon::Created => "file-plus",
            AuditIcon::Generated => "cpu",
            AuditIcon::Downloaded => "download",
            AuditIcon::Edited => "edit",
            AuditIcon::Shared => "share-2",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            AuditIcon::Created => Tone::Blue,
            AuditIcon::Generated => Tone::Purple,
            AuditIcon::Downloaded => Tone::Green,
            AuditIcon::Edited => Tone::Yellow,
            AuditIcon::Shared => Tone::Gray,
        }
    }
}

/// One line of an export's audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub time: NaiveDateTime,
    pub user: String,
    pub action: String,
    pub icon: AuditIcon,
    pub details: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("staking_reward"), Some(TransactionType::StakingReward));
        assert_eq!(TransactionType::parse("Staking Reward"), Some(TransactionType::StakingReward));
        assert_eq!(TransactionType::parse("BUY"), Some(TransactionType::Buy));
        assert_eq!(TransactionType::parse("mint"), None);
    }

    #[test]
    fn test_status_parse_and_tone() {
        assert_eq!(TransactionStatus::parse("needs-review"), Some(TransactionStatus::NeedsReview));
        assert_eq!(TransactionStatus::NeedsReview.tone(), Tone::Yellow);
        assert_eq!(TransactionStatus::Flagged.icon(), "flag");
    }

    #[test]
    fn test_income_types() {
        assert!(TransactionType::StakingReward.is_income());
        assert!(TransactionType::Airdrop.is_income());
        assert!(!TransactionType::Sell.is_income());
    }

    #[test]
    fn test_tone_badge_classes_merge_palette() {
        let classes = Tone::Red.badge_classes();
        assert!(classes.starts_with("inline-flex rounded-full"));
        assert!(classes.ends_with("bg-red-100 text-red-800"));
    }

    #[test]
    fn test_tone_text_is_readable() {
        assert_eq!(Tone::Yellow.text_hex(), "#000000");
        assert_eq!(Tone::Purple.text_hex(), "#FFFFFF");
    }

    #[test]
    fn test_transaction_serde_tags() {
        let json = serde_json::to_string(&TransactionType::StakingReward).unwrap();
        assert_eq!(json, "\"staking_reward\"");
        let status: TransactionStatus = serde_json::from_str("\"needs_review\"").unwrap();
        assert_eq!(status, TransactionStatus::NeedsReview);
    }
}
