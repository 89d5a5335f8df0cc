// 🔗 Connection Entity - linked exchanges and wallets
//
// "Coinbase", "Coinbase Pro", "CB" → one connection entity
//
// Names and aliases are values, the UUID is identity. Sync state is tracked per
// connection so the connections page can show what needs re-authorizing.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::model::Tone;

// ============================================================================
// CONNECTION KIND + STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Centralized exchange account (API key or OAuth)
    Exchange,

    /// Self-custody wallet (browser extension or hardware)
    Wallet,

    /// Public address tracked directly on-chain
    Blockchain,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Exchange => "Exchange",
            ConnectionKind::Wallet => "Wallet",
            ConnectionKind::Blockchain => "Blockchain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Connected,
    Syncing,
    Error,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Syncing => "Syncing",
            ConnectionStatus::Error => "Error",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ConnectionStatus::Connected => Tone::Green,
            ConnectionStatus::Syncing => Tone::Blue,
            ConnectionStatus::Error => Tone::Red,
            ConnectionStatus::Disconnected => Tone::Gray,
        }
    }

    /// Whether the user has to act before data flows again
    pub fn needs_attention(&self) -> bool {
        matches!(self, ConnectionStatus::Error | ConnectionStatus::Disconnected)
    }
}

// ============================================================================
// CONNECTION ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Stable identity (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Alternative names seen in imports ("CB Pro", "GDAX")
    pub aliases: Vec<String>,

    pub kind: ConnectionKind,
    pub status: ConnectionStatus,
    pub last_synced: Option<DateTime<Utc>>,
    pub transaction_count: usize,
}

impl Connection {
    pub fn new(name: &str, kind: ConnectionKind) -> Self {
        Connection {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            aliases: Vec::new(),
            kind,
            status: ConnectionStatus::Disconnected,
            last_synced: None,
            transaction_count: 0,
        }
    }

    /// Add an alias to this connection
    pub fn add_alias(&mut self, alias: &str) {
        if !self.aliases.iter().any(|a| a == alias) && alias != self.name {
            self.aliases.push(alias.to_string());
        }
    }

    /// Case-insensitive match against the name or any alias
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return false;
        }

        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|name| name.to_lowercase() == lower)
    }
}

// ============================================================================
// CONNECTION REGISTRY
// ============================================================================

/// Registry of every linked exchange and wallet
pub struct ConnectionRegistry {
    connections: Arc<RwLock<Vec<Connection>>>,
}

impl ConnectionRegistry {
    /// Empty registry
    pub fn new() -> Self {
        ConnectionRegistry {
            connections: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Registry seeded with the dashboard's sample connections
    pub fn with_default_connections() -> Self {
        let registry = Self::new();
        let synced = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 2, d, h, 0, 0).single();

        let mut coinbase = Connection::new("Coinbase", ConnectionKind::Exchange);
        coinbase.add_alias("Coinbase Pro");
        coinbase.add_alias("CB");
        coinbase.status = ConnectionStatus::Connected;
        coinbase.last_synced = synced(14, 9);
        coinbase.transaction_count = 412;
        registry.register(coinbase);

        let mut kraken = Connection::new("Kraken", ConnectionKind::Exchange);
        kraken.add_alias("Payward");
        kraken.status = ConnectionStatus::Syncing;
        kraken.last_synced = synced(13, 22);
        kraken.transaction_count = 187;
        registry.register(kraken);

        let mut metamask = Connection::new("MetaMask", ConnectionKind::Wallet);
        metamask.status = ConnectionStatus::Error;
        metamask.last_synced = synced(10, 15);
        metamask.transaction_count = 96;
        registry.register(metamask);

        let mut ledger = Connection::new("Ledger Nano X", ConnectionKind::Wallet);
        ledger.add_alias("Ledger");
        ledger.status = ConnectionStatus::Connected;
        ledger.last_synced = synced(14, 8);
        ledger.transaction_count = 23;
        registry.register(ledger);

        let mut solana = Connection::new("Solana Address", ConnectionKind::Blockchain);
        solana.add_alias("SOL Wallet");
        registry.register(solana);

        registry
    }

    pub fn register(&self, connection: Connection) {
        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(connection);
    }

    /// All connections in registration order
    pub fn all(&self) -> Vec<Connection> {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Connection> {
        self.all().into_iter().find(|c| c.id == id)
    }

    /// Find connection by name or alias
    pub fn find_by_string(&self, text: &str) -> Option<Connection> {
        self.all().into_iter().find(|c| c.matches(text))
    }

    pub fn by_kind(&self, kind: ConnectionKind) -> Vec<Connection> {
        self.all().into_iter().filter(|c| c.kind == kind).collect()
    }

    pub fn by_status(&self, status: ConnectionStatus) -> Vec<Connection> {
        self.all().into_iter().filter(|c| c.status == status).collect()
    }

    pub fn needing_attention(&self) -> Vec<Connection> {
        self.all()
            .into_iter()
            .filter(|c| c.status.needs_attention())
            .collect()
    }

    /// Record a finished sync; returns false for unknown ids
    pub fn mark_synced(&self, id: &str, at: DateTime<Utc>, new_transactions: usize) -> bool {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match connections.iter_mut().find(|c| c.id == id) {
            Some(connection) => {
                connection.status = ConnectionStatus::Connected;
                connection.last_synced = Some(at);
                connection.transaction_count += new_transactions;
                true
            }
            None => false,
        }
    }

    pub fn set_status(&self, id: &str, status: ConnectionStatus) -> bool {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match connections.iter_mut().find(|c| c.id == id) {
            Some(connection) => {
                connection.status = status;
                true
            }
            None => false,
        }
    }

    /// Total transactions imported across all connections
    pub fn total_transactions(&self) -> usize {
        self.all().iter().map(|c| c.transaction_count).sum()
    }
}

impl Default for ConnectionRegistry {
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

    #[test]
    fn test_connection_creation() {
        let connection = Connection::new("Gemini", ConnectionKind::Exchange);

        assert_eq!(connection.name, "Gemini");
        assert_eq!(connection.status, ConnectionStatus::Disconnected);
        assert!(connection.last_synced.is_none());
        assert_eq!(connection.id.len(), 36);
    }

    #[test]
    fn test_add_alias_skips_duplicates() {
        let mut connection = Connection::new("Coinbase", ConnectionKind::Exchange);
        connection.add_alias("CB");
        connection.add_alias("CB");
        connection.add_alias("Coinbase");

        assert_eq!(connection.aliases, vec!["CB".to_string()]);
    }

    #[test]
    fn test_matches_name_and_alias() {
        let mut connection = Connection::new("Coinbase", ConnectionKind::Exchange);
        connection.add_alias("Coinbase Pro");

        assert!(connection.matches("coinbase"));
        assert!(connection.matches("COINBASE PRO"));
        assert!(!connection.matches("Kraken"));
        assert!(!connection.matches("  "));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ConnectionRegistry::with_default_connections();

        assert_eq!(registry.count(), 5);
        assert_eq!(registry.by_kind(ConnectionKind::Exchange).len(), 2);
        assert_eq!(registry.by_kind(ConnectionKind::Wallet).len(), 2);
        assert_eq!(registry.total_transactions(), 412 + 187 + 96 + 23);
    }

    #[test]
    fn test_registry_find_by_string() {
        let registry = ConnectionRegistry::with_default_connections();

        assert_eq!(registry.find_by_string("CB").unwrap().name, "Coinbase");
        assert_eq!(registry.find_by_string("ledger").unwrap().name, "Ledger Nano X");
        assert!(registry.find_by_string("Binance").is_none());
    }

    #[test]
    fn test_needing_attention() {
        let registry = ConnectionRegistry::with_default_connections();
        let names: Vec<String> = registry
            .needing_attention()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["MetaMask", "Solana Address"]);
    }

    #[test]
    fn test_mark_synced() {
        let registry = ConnectionRegistry::with_default_connections();
        let metamask = registry.find_by_string("MetaMask").unwrap();
        let at = Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap();

        assert!(registry.mark_synced(&metamask.id, at, 4));

        let updated = registry.find_by_id(&metamask.id).unwrap();
        assert_eq!(updated.status, ConnectionStatus::Connected);
        assert_eq!(updated.last_synced, Some(at));
        assert_eq!(updated.transaction_count, 100);
        assert!(!registry.mark_synced("missing", at, 1));
    }

    #[test]
    fn test_set_status() {
        let registry = ConnectionRegistry::with_default_connections();
        let kraken = registry.find_by_string("kraken").unwrap();

        assert!(registry.set_status(&kraken.id, ConnectionStatus::Error));
        assert_eq!(registry.by_status(ConnectionStatus::Error).len(), 2);
        assert!(!registry.set_status("missing", ConnectionStatus::Connected));
    }
}
