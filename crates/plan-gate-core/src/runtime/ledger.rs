// crates/plan-gate-core/src/runtime/ledger.rs
// ============================================================================
// Module: Plan Gate In-Memory Ledger
// Description: Append-only, queryable record of plan gate decisions.
// Purpose: Back ledger views and tests with a process-local audit trail.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`InMemoryLedger`] keeps every recorded [`AuditEvent`] in arrival order.
//! Entries are never mutated or removed; [`InMemoryLedger::query`] returns
//! filtered copies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::AuditEvent;
use crate::core::LedgerAction;
use crate::interfaces::AuditSink;

// ============================================================================
// SECTION: Query
// ============================================================================

/// Result ordering for ledger queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LedgerOrder {
    /// Most recent entry first.
    #[default]
    Newest,
    /// Oldest entry first.
    Oldest,
    /// Alphabetical by action label, oldest first within a label.
    Action,
}

/// Ledger filter; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Exact action match.
    pub action: Option<LedgerAction>,
    /// Exact actor match.
    pub actor: Option<String>,
    /// Exact subject match.
    pub subject: Option<String>,
    /// Case-insensitive search over actor, subject, action label and details.
    pub search: Option<String>,
    /// Result ordering.
    pub order: LedgerOrder,
}

impl LedgerQuery {
    /// Restricts results to `action`.
    #[must_use]
    pub fn with_action(mut self, action: LedgerAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Restricts results to `subject`.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Restricts results to entries containing `text`.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub fn ordered(mut self, order: LedgerOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns true when `event` satisfies every set filter.
    fn matches(&self, event: &AuditEvent) -> bool {
        if self.action.is_some_and(|action| action != event.action) {
            return false;
        }
        if self.actor.as_ref().is_some_and(|actor| *actor != event.actor) {
            return false;
        }
        if self.subject.as_ref().is_some_and(|subject| event.subject.as_ref() != Some(subject)) {
            return false;
        }
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.to_lowercase();
        [
            event.actor.as_str(),
            event.subject.as_deref().unwrap_or_default(),
            event.action.label(),
            event.details.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Append-only in-memory audit ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Recorded events in arrival order.
    entries: Mutex<Vec<AuditEvent>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEvent> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entries matching `query`.
    #[must_use]
    pub fn query(&self, query: &LedgerQuery) -> Vec<AuditEvent> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let matched = entries.iter().filter(|event| query.matches(event)).cloned();
        let mut out: Vec<AuditEvent> = matched.collect();
        match query.order {
            LedgerOrder::Oldest => {}
            LedgerOrder::Newest => out.reverse(),
            LedgerOrder::Action => out.sort_by(|a, b| a.action.label().cmp(b.action.label())),
        }
        out
    }
}

impl AuditSink for InMemoryLedger {
    fn record(&self, event: &AuditEvent) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}
