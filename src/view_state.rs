// 🧭 Page View State - reducer-style transitions
//
// Each page owns one serializable state struct. State changes only through
// `reduce(action)`, which consumes the old state and returns the next one:
//
//   state' = reduce(state, action)
//
// Nothing here persists across a reload; overlays such as "reviewed" live in
// the state, never in the underlying rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::filter::{AnomalyFilter, TransactionFilter};
use crate::model::{
    Anomaly, AnomalyKind, NotificationItem, Severity, Transaction, TransactionStatus,
    TransactionType,
};
use crate::utils::Breakpoint;

/// Pure state transition
pub trait Reducer: Sized {
    type Action;

    fn reduce(self, action: Self::Action) -> Self;

    /// Fold a batch of actions in order
    fn reduce_all(self, actions: impl IntoIterator<Item = Self::Action>) -> Self {
        actions.into_iter().fold(self, Self::reduce)
    }
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsView {
    pub items: Vec<NotificationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationAction {
    MarkRead(u32),
    MarkAllRead,
    Dismiss(u32),
}

impl NotificationsView {
    pub fn new(items: Vec<NotificationItem>) -> Self {
        NotificationsView { items }
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }
}

impl Reducer for NotificationsView {
    type Action = NotificationAction;

    fn reduce(mut self, action: NotificationAction) -> Self {
        match action {
            NotificationAction::MarkRead(id) => {
                if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
                    item.read = true;
                }
            }
            NotificationAction::MarkAllRead => {
                self.items.iter_mut().for_each(|n| n.read = true);
            }
            NotificationAction::Dismiss(id) => {
                self.items.retain(|n| n.id != id);
            }
        }
        self
    }
}

// ============================================================================
// TRANSACTIONS PAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsView {
    rows: Vec<Transaction>,
    pub filter: TransactionFilter,
    /// Ids the user marked reviewed this session
    pub reviewed: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionAction {
    Search(String),
    SetType(Option<TransactionType>),
    SetStatus(Option<TransactionStatus>),
    SetDateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    ClearFilters,
    MarkReviewed(String),
}

impl TransactionsView {
    pub fn new(rows: Vec<Transaction>) -> Self {
        TransactionsView {
            rows,
            filter: TransactionFilter::default(),
            reviewed: BTreeSet::new(),
        }
    }

    /// Rows with the reviewed overlay applied, unfiltered
    pub fn rows(&self) -> Vec<Transaction> {
        self.rows
            .iter()
            .map(|tx| {
                let mut tx = tx.clone();
                if self.reviewed.contains(&tx.id) {
                    tx.status = TransactionStatus::Reviewed;
                }
                tx
            })
            .collect()
    }

    /// What the table shows right now
    pub fn visible(&self) -> Vec<Transaction> {
        self.filter.apply(&self.rows())
    }

    pub fn pending_review(&self) -> usize {
        self.rows().iter().filter(|tx| tx.needs_review()).count()
    }
}

impl Reducer for TransactionsView {
    type Action = TransactionAction;

    fn reduce(mut self, action: TransactionAction) -> Self {
        match action {
            TransactionAction::Search(term) => self.filter.search = term,
            TransactionAction::SetType(tx_type) => self.filter.tx_type = tx_type,
            TransactionAction::SetStatus(status) => self.filter.status = status,
            TransactionAction::SetDateRange { from, to } => {
                self.filter.date_from = from;
                self.filter.date_to = to;
            }
            TransactionAction::ClearFilters => self.filter = TransactionFilter::default(),
            TransactionAction::MarkReviewed(id) => {
                if self.rows.iter().any(|tx| tx.id == id) {
                    self.reviewed.insert(id);
                }
            }
        }
        self
    }
}

// ============================================================================
// ANOMALIES PAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomaliesView {
    rows: Vec<Anomaly>,
    pub filter: AnomalyFilter,
    pub resolved: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnomalyAction {
    Search(String),
    SetKind(Option<AnomalyKind>),
    SetSeverity(Option<Severity>),
    Resolve(String),
}

impl AnomaliesView {
    pub fn new(rows: Vec<Anomaly>) -> Self {
        AnomaliesView {
            rows,
            filter: AnomalyFilter::default(),
            resolved: BTreeSet::new(),
        }
    }

    /// Open anomalies matching the current filter
    pub fn visible(&self) -> Vec<Anomaly> {
        self.filter
            .apply(&self.rows)
            .into_iter()
            .filter(|a| !self.resolved.contains(&a.id))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|a| !self.resolved.contains(&a.id))
            .count()
    }
}

impl Reducer for AnomaliesView {
    type Action = AnomalyAction;

    fn reduce(mut self, action: AnomalyAction) -> Self {
        match action {
            AnomalyAction::Search(term) => self.filter.search = term,
            AnomalyAction::SetKind(kind) => self.filter.kind = kind,
            AnomalyAction::SetSeverity(severity) => self.filter.severity = severity,
            AnomalyAction::Resolve(id) => {
                if self.rows.iter().any(|a| a.id == id) {
                    self.resolved.insert(id);
                }
            }
        }
        self
    }
}

// ============================================================================
// SIDEBAR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub collapsed: bool,
    pub breakpoint: Breakpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidebarAction {
    Toggle,
    /// Viewport width in CSS pixels
    Resize(u32),
}

impl SidebarState {
    /// Expanded from `lg` up, collapsed below
    pub fn for_viewport(width: u32) -> Self {
        SidebarState {
            collapsed: !Breakpoint::is_at_least(width, Breakpoint::Lg),
            breakpoint: Breakpoint::from_width(width),
        }
    }
}

impl Reducer for SidebarState {
    type Action = SidebarAction;

    fn reduce(self, action: SidebarAction) -> Self {
        match action {
            SidebarAction::Toggle => SidebarState {
                collapsed: !self.collapsed,
                ..self
            },
            SidebarAction::Resize(width) => {
                let next = SidebarState::for_viewport(width);
                // A manual toggle survives resizes within the same breakpoint
                if next.breakpoint == self.breakpoint {
                    self
                } else {
                    next
                }
            }
        }
    }
}

// ============================================================================
// EXPORT JOB (simulated progress)
// ============================================================================

/// Percent added per tick
pub const EXPORT_PROGRESS_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStatus {
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub label: String,
    pub status: ExportStatus,
    /// 0-100
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportAction {
    Start,
    Tick,
    Reset,
}

impl ExportJob {
    pub fn new(label: &str) -> Self {
        ExportJob {
            label: label.to_string(),
            status: ExportStatus::Idle,
            progress: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ExportStatus::Completed
    }

    /// Ticks from Start until Completed
    pub fn ticks_to_complete() -> usize {
        (100 + EXPORT_PROGRESS_STEP as usize - 1) / EXPORT_PROGRESS_STEP as usize
    }
}

impl Reducer for ExportJob {
    type Action = ExportAction;

    fn reduce(mut self, action: ExportAction) -> Self {
        match (action, self.status) {
            (ExportAction::Start, ExportStatus::Running) => {}
            (ExportAction::Start, _) => {
                self.status = ExportStatus::Running;
                self.progress = 0;
            }
            (ExportAction::Tick, ExportStatus::Running) => {
                self.progress = self.progress.saturating_add(EXPORT_PROGRESS_STEP).min(100);
                if self.progress == 100 {
                    self.status = ExportStatus::Completed;
                }
            }
            (ExportAction::Tick, _) => {}
            (ExportAction::Reset, _) => {
                self.status = ExportStatus::Idle;
                self.progress = 0;
            }
        }
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
