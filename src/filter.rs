// 🔍 List Filtering - transactions, anomalies, clients
//
// A linear scan over small in-memory lists, re-run on every keystroke.
// Criteria are ANDed together; unset criteria match everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    Anomaly, AnomalyKind, Client, Severity, Transaction, TransactionStatus, TransactionType,
};

// ============================================================================
// SEARCHABLE ROWS
// ============================================================================

/// A row whose visible text can be searched
pub trait Searchable {
    /// All visible column text, concatenated
    fn search_text(&self) -> String;
}

impl Searchable for Transaction {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.id,
            self.date,
            self.tx_type.as_str(),
            self.asset,
            self.memo,
            self.ai_label,
            self.status.as_str()
        )
    }
}

impl Searchable for Anomaly {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.transaction_id,
            self.kind.as_str(),
            self.severity.as_str(),
            self.asset,
            self.description
        )
    }
}

impl Searchable for Client {
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// Case-insensitive substring match; a blank term matches every row
pub fn matches_search<T: Searchable>(row: &T, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    row.search_text()
        .to_lowercase()
        .contains(&term.to_lowercase())
}

// ============================================================================
// TRANSACTION FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub search: String,
    pub tx_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    /// Inclusive lower bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.tx_type.is_none()
            && self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.tx_type.map_or(true, |t| tx.tx_type == t)
            && self.status.map_or(true, |s| tx.status == s)
            && self.date_from.map_or(true, |from| tx.date >= from)
            && self.date_to.map_or(true, |to| tx.date <= to)
            && matches_search(tx, &self.search)
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }
}

// ============================================================================
// ANOMALY FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFilter {
    pub search: String,
    pub kind: Option<AnomalyKind>,
    pub severity: Option<Severity>,
}

impl AnomalyFilter {
    pub fn matches(&self, anomaly: &Anomaly) -> bool {
        self.kind.map_or(true, |k| anomaly.kind == k)
            && self.severity.map_or(true, |s| anomaly.severity == s)
            && matches_search(anomaly, &self.search)
    }

    pub fn apply(&self, anomalies: &[Anomaly]) -> Vec<Anomaly> {
        anomalies
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }
}

// ============================================================================
// CLIENT FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientFilter {
    pub search: String,
}

impl ClientFilter {
    pub fn apply(&self, clients: &[Client]) -> Vec<Client> {
        clients
            .iter()
            .filter(|c| matches_search(*c, &self.search))
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_client_search_returns_all() {
        let clients = fixtures::clients();
        let result = ClientFilter::default().apply(&clients);
        assert_eq!(result.len(), 4);
        assert_eq!(result, clients);
    }

    #[test]
    fn test_client_search_is_case_insensitive_substring() {
        let filter = ClientFilter { search: "john".to_string() };
        let names: Vec<String> = filter
            .apply(&fixtures::clients())
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["John Smith", "Sarah Johnson"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let clients = fixtures::clients();
        let filter = ClientFilter { search: "   ".to_string() };
        assert_eq!(filter.apply(&clients).len(), 4);
    }

    #[test]
    fn test_empty_transaction_filter_returns_full_list() {
        let txs = fixtures::transactions();
        let filter = TransactionFilter::default();

        assert!(filter.is_empty());
        assert_eq!(filter.apply(&txs), txs);
    }

    #[test]
    fn test_transaction_filter_by_type() {
        let filter = TransactionFilter {
            tx_type: Some(TransactionType::Sell),
            ..Default::default()
        };
        let result = filter.apply(&fixtures::transactions());

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.tx_type == TransactionType::Sell));
    }

    #[test]
    fn test_transaction_filter_date_range_is_inclusive() {
        let filter = TransactionFilter {
            date_from: Some(date(2024, 2, 3)),
            date_to: Some(date(2024, 3, 8)),
            ..Default::default()
        };
        let ids: Vec<String> = filter
            .apply(&fixtures::transactions())
            .into_iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec!["TX-1002", "TX-1003", "TX-1004"]);
    }

    #[test]
    fn test_transaction_filter_combines_criteria() {
        let filter = TransactionFilter {
            search: "staking".to_string(),
            tx_type: Some(TransactionType::StakingReward),
            date_from: Some(date(2024, 6, 1)),
            ..Default::default()
        };
        let result = filter.apply(&fixtures::transactions());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "TX-1011");
    }

    #[test]
    fn test_transaction_search_covers_visible_columns() {
        let txs = fixtures::transactions();
        let by_memo = TransactionFilter {
            search: "ledger nano".to_string(),
            ..Default::default()
        };
        let by_status = TransactionFilter {
            search: "needs review".to_string(),
            ..Default::default()
        };

        assert_eq!(by_memo.apply(&txs).len(), 1);
        assert_eq!(by_status.apply(&txs).len(), 2);
    }

    #[test]
    fn test_anomaly_filter() {
        let anomalies = fixtures::anomalies();

        let high = AnomalyFilter { severity: Some(Severity::High), ..Default::default() };
        assert_eq!(high.apply(&anomalies).len(), 2);

        let price = AnomalyFilter {
            kind: Some(AnomalyKind::PriceDeviation),
            search: "usdc".to_string(),
            ..Default::default()
        };
        let result = price.apply(&anomalies);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "AN-05");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let filter = ClientFilter { search: "zzz".to_string() };
        assert!(filter.apply(&fixtures::clients()).is_empty());
    }
}
