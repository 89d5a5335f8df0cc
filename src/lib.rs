// Crypto Tax Dashboard - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod utils;          // Class merging, breakpoints, accessibility
pub mod model;          // View models + closed tag enums
pub mod fixtures;       // Mock datasets
pub mod chart;          // Pie/donut geometry
pub mod filter;         // List filtering
pub mod rules;          // Rule-based classification
pub mod reports;        // Gain/loss + allocation
pub mod export;         // IRS Form 8949
pub mod entities;       // Wallet/exchange connections
pub mod view_state;     // Page reducers
pub mod config;         // CLI/server settings + logging

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use model::{
    Anomaly, AnomalyKind, AuditEntry, AuditIcon, Client, ClientStatus, NotificationItem,
    NotificationKind, Severity, Tone, Transaction, TransactionStatus, TransactionType,
};
pub use chart::{LegendEntry, PieChart, PieSegment, Slice};
pub use filter::{AnomalyFilter, ClientFilter, Searchable, TransactionFilter};
pub use rules::{ClassificationResult, ClassificationRule, RuleEngine};
pub use reports::{DashboardOverview, Disposal, GainLossSummary, Holding, HoldingTerm};
pub use export::{export_form_8949, ExportRecord, Form8949Part, Form8949Row};
pub use entities::{Connection, ConnectionKind, ConnectionRegistry, ConnectionStatus};
pub use view_state::{
    AnomaliesView, ExportJob, NotificationsView, Reducer, SidebarState, TransactionsView,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
