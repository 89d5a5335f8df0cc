// 🏷️ Classification Rules - Rules as Data
// Pattern rules that assign a tax label and type to transaction memos

use anyhow::{ensure, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::model::{Transaction, TransactionStatus, TransactionType, MAX_CONFIDENCE};

/// Results below this confidence go to the review queue
pub const REVIEW_THRESHOLD: u8 = 70;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Rule ID for tracking
    pub id: String,

    /// Pattern to match (supports wildcards with *)
    pub pattern: String,

    /// Tax label to assign ("Staking Income", "Self Transfer", ...)
    pub label: String,

    /// Transaction type override
    #[serde(default)]
    pub tx_type: Option<TransactionType>,

    /// Confidence score (0-100)
    pub confidence: u8,

    /// Priority (higher = applied first)
    #[serde(default)]
    pub priority: i32,
}

impl ClassificationRule {
    /// Check if pattern matches the given text
    pub fn matches(&self, text: &str) -> bool {
        let pattern_lower = self.pattern.to_lowercase();
        let text_lower = text.to_lowercase();

        if !pattern_lower.contains('*') {
            return text_lower.contains(&pattern_lower);
        }

        let parts: Vec<&str> = pattern_lower.split('*').collect();
        let first = parts[0];
        let last = parts[parts.len() - 1];

        if !text_lower.starts_with(first) {
            return false;
        }

        // Middle parts must appear in order after the prefix
        let mut current_pos = first.len();
        for part in &parts[1..parts.len() - 1] {
            if part.is_empty() {
                continue;
            }
            match text_lower[current_pos..].find(part) {
                Some(pos) => current_pos += pos + part.len(),
                None => return false,
            }
        }

        text_lower.len() >= current_pos + last.len() && text_lower.ends_with(last)
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationResult {
    pub label: Option<String>,
    pub tx_type: Option<TransactionType>,
    pub confidence: u8,
    pub rule_id: Option<String>,
}

impl ClassificationResult {
    pub fn needs_review(&self) -> bool {
        self.confidence < REVIEW_THRESHOLD
    }
}

// ============================================================================
// RULE ENGINE
// ============================================================================

#[derive(Debug)]
pub struct RuleEngine {
    rules: Vec<ClassificationRule>,
}

impl RuleEngine {
    /// Create a new empty rule engine
    pub fn new() -> Self {
        RuleEngine { rules: Vec::new() }
    }

    /// Load rules from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rules file: {:?}", path.as_ref()))?;

        let rules: Vec<ClassificationRule> =
            serde_json::from_str(&content).context("Failed to parse rules JSON")?;

        for rule in &rules {
            ensure!(
                rule.confidence <= MAX_CONFIDENCE,
                "Rule '{}': confidence {} out of range (0-{})",
                rule.id,
                rule.confidence,
                MAX_CONFIDENCE
            );
        }

        debug!(count = rules.len(), "loaded classification rules");
        Ok(RuleEngine::from_rules(rules))
    }

    /// Create engine from a list of rules
    pub fn from_rules(mut rules: Vec<ClassificationRule>) -> Self {
        // Stable sort: equal priorities keep file order
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        RuleEngine { rules }
    }

    /// Built-in rules for the common exchange/wallet memos
    #[rustfmt::skip]
    pub fn with_default_rules() -> Self {
        let rule = |id: &str, pattern: &str, label: &str, tx_type, confidence, priority| {
            ClassificationRule {
                id: id.to_string(),
                pattern: pattern.to_string(),
                label: label.to_string(),
                tx_type,
                confidence,
                priority,
            }
        };

        RuleEngine::from_rules(vec![
            rule("staking", "staking reward", "Staking Income",
                 Some(TransactionType::StakingReward), 95, 50),
            rule("airdrop", "airdrop", "Airdrop Income", Some(TransactionType::Airdrop), 92, 50),
            rule("swap", "* swap *", "Crypto-to-Crypto Trade", Some(TransactionType::Trade), 88, 40),
            rule("gas", "gas fee", "Network Fee", Some(TransactionType::Fee), 85, 40),
            rule("hw-wallet", "withdrawal to *", "Self Transfer",
                 Some(TransactionType::Transfer), 75, 30),
            rule("market-buy", "*buy*", "Purchase", Some(TransactionType::Buy), 90, 20),
            rule("market-sell", "*sell*", "Disposal", Some(TransactionType::Sell), 90, 20),
            rule("invoice", "invoice", "Business Income", Some(TransactionType::Income), 60, 10),
        ])
    }

    /// Add a single rule
    pub fn add_rule(&mut self, rule: ClassificationRule) {
        self.rules.push(rule);
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Apply rules to classify a memo/description
    pub fn classify(&self, text: &str) -> ClassificationResult {
        // Already sorted by priority
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| ClassificationResult {
                label: Some(rule.label.clone()),
                tx_type: rule.tx_type,
                confidence: rule.confidence,
                rule_id: Some(rule.id.clone()),
            })
            .unwrap_or_default()
    }

    /// Re-classify transactions, leaving reviewed rows untouched
    ///
    /// Unmatched rows and low-confidence matches land in NeedsReview. Flagged
    /// rows get the new label but stay flagged until someone resolves them.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .map(|tx| {
                if tx.status == TransactionStatus::Reviewed {
                    return tx.clone();
                }

                let result = self.classify(&tx.classification_text());
                let mut next = tx.clone();

                if let Some(label) = result.label.clone() {
                    next.ai_label = label;
                }
                if let Some(tx_type) = result.tx_type {
                    next.tx_type = tx_type;
                }
                next.confidence = result.confidence;
                next.status = if tx.status == TransactionStatus::Flagged {
                    TransactionStatus::Flagged
                } else if result.needs_review() {
                    TransactionStatus::NeedsReview
                } else {
                    TransactionStatus::Classified
                };
                next
            })
            .collect()
    }

    /// Get number of rules loaded
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Write;

    fn rule(
        id: &str,
        pattern: &str,
        label: &str,
        confidence: u8,
        priority: i32,
    ) -> ClassificationRule {
        ClassificationRule {
            id: id.to_string(),
            pattern: pattern.to_string(),
            label: label.to_string(),
            tx_type: None,
            confidence,
            priority,
        }
    }

    #[test]
    fn test_exact_pattern_match() {
        let rule = rule("kraken", "KRAKEN", "Exchange", 95, 0);

        assert!(rule.matches("Kraken staking reward"));
        assert!(rule.matches("kraken"));
        assert!(!rule.matches("Coinbase"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let rule = rule("cb", "COINBASE*", "Exchange", 90, 0);

        assert!(rule.matches("Coinbase market buy"));
        assert!(rule.matches("coinbase pro"));
        assert!(!rule.matches("Withdrawal from Coinbase"));
    }

    #[test]
    fn test_wildcard_middle_parts_in_order() {
        let rule = rule("swap", "* swap * -> *", "Trade", 90, 0);

        assert!(rule.matches("Uniswap swap USDC -> ETH"));
        assert!(!rule.matches("ETH -> USDC swap"));
    }

    #[test]
    fn test_wildcard_prefix_and_suffix_do_not_overlap() {
        let rule = rule("ab", "ab*ba", "x", 90, 0);

        assert!(rule.matches("abba"));
        assert!(!rule.matches("aba"));
    }

    #[test]
    fn test_rule_priority() {
        let mut engine = RuleEngine::new();
        engine.add_rule(rule("general", "*reward*", "Reward", 80, 1));
        engine.add_rule(rule("specific", "staking reward", "Staking Income", 98, 100));

        let result = engine.classify("Kraken staking reward ETH2.S");
        assert_eq!(result.label, Some("Staking Income".to_string()));
        assert_eq!(result.confidence, 98);
        assert_eq!(result.rule_id, Some("specific".to_string()));
    }

    #[test]
    fn test_no_match() {
        let engine = RuleEngine::new();
        let result = engine.classify("Unknown memo");

        assert_eq!(result, ClassificationResult::default());
        assert!(result.needs_review());
    }

    #[test]
    fn test_default_rules_classify_fixtures() {
        let engine = RuleEngine::with_default_rules();

        let staking = engine.classify("Marinade staking reward mSOL");
        assert_eq!(staking.tx_type, Some(TransactionType::StakingReward));

        let swap = engine.classify("Jupiter swap ETH -> SOL Trade SOL");
        assert_eq!(swap.label, Some("Crypto-to-Crypto Trade".to_string()));
    }

    #[test]
    fn test_apply_marks_low_confidence_for_review() {
        let engine = RuleEngine::with_default_rules();
        let txs = fixtures::transactions();
        let applied = engine.apply(&txs);

        assert_eq!(applied.len(), txs.len());

        // Sell rule matches "Coinbase market sell" well above the threshold
        let sell = applied.iter().find(|t| t.id == "TX-1005").unwrap();
        assert_eq!(sell.status, TransactionStatus::Classified);

        let gas = applied.iter().find(|t| t.id == "TX-1007").unwrap();
        assert_eq!(gas.confidence, 85);
        assert_eq!(gas.status, TransactionStatus::Classified);
    }

    #[test]
    fn test_apply_keeps_reviewed_rows() {
        let engine = RuleEngine::with_default_rules();
        let txs = fixtures::transactions();
        let applied = engine.apply(&txs);

        let reviewed = txs.iter().filter(|t| t.status == TransactionStatus::Reviewed);
        for original in reviewed {
            let after = applied.iter().find(|t| t.id == original.id).unwrap();
            assert_eq!(after, original);
        }
    }

    #[test]
    fn test_apply_unmatched_row_needs_review() {
        let engine = RuleEngine::with_default_rules();
        let mut tx = fixtures::transactions().remove(0);
        tx.memo = "Mystery deposit".to_string();
        tx.tx_type = TransactionType::Transfer;
        tx.asset = "XYZ".to_string();

        let applied = engine.apply(&[tx]);
        assert_eq!(applied[0].confidence, 0);
        assert_eq!(applied[0].status, TransactionStatus::NeedsReview);
    }

    #[test]
    fn test_apply_keeps_flagged_rows_flagged() {
        let mut engine = RuleEngine::new();
        engine.add_rule(rule("consulting", "*consulting*", "Consulting Income", 96, 10));

        let txs = fixtures::transactions();
        let flagged = txs.iter().find(|t| t.id == "TX-1009").unwrap();
        assert_eq!(flagged.status, TransactionStatus::Flagged);

        let applied = engine.apply(std::slice::from_ref(flagged));
        assert_eq!(applied[0].ai_label, "Consulting Income");
        assert_eq!(applied[0].confidence, 96);
        assert_eq!(applied[0].status, TransactionStatus::Flagged);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "low", "pattern": "lido", "label": "Staking Income", "confidence": 80}},
                {{"id": "high", "pattern": "lido*", "label": "Liquid Staking",
                  "tx_type": "staking_reward", "confidence": 93, "priority": 5}}
            ]"#
        )
        .unwrap();
        file.flush().unwrap();

        let engine = RuleEngine::from_file(file.path()).unwrap();
        assert_eq!(engine.rule_count(), 2);
        assert_eq!(engine.rules()[0].id, "high");

        let result = engine.classify("Lido stETH rebase");
        assert_eq!(result.label, Some("Liquid Staking".to_string()));
        assert_eq!(result.tx_type, Some(TransactionType::StakingReward));
    }

    #[test]
    fn test_from_file_rejects_confidence_over_100() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "loud", "pattern": "lido", "label": "Staking Income", "confidence": 250}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let err = RuleEngine::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("loud"), "{}", err);
    }

    #[test]
    fn test_from_file_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();

        assert!(RuleEngine::from_file(file.path()).is_err());
    }
}
