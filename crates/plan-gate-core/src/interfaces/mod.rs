// crates/plan-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Plan Gate Interfaces
// Description: Extension points for recording plan gate decisions.
// Purpose: Keep audit storage pluggable without coupling it to the engine.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The plan gate writes every decision to an [`AuditSink`]. Deployments pick
//! the sink (in-memory ledger, JSON lines on stderr or a file, or nothing);
//! the engine itself never performs I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::AuditEvent;

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Destination for plan gate audit events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &AuditEvent);
}

impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn record(&self, event: &AuditEvent) {
        (**self).record(event);
    }
}

impl<T: AuditSink + ?Sized> AuditSink for Box<T> {
    fn record(&self, event: &AuditEvent) {
        (**self).record(event);
    }
}
