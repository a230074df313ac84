// src/robots/mod.rs
// =============================================================================
// This module is the crawler's "policy gate".
//
// It wraps robots.txt handling behind a single yes/no question:
//   gate.allowed(url) -> bool
//
// Currently implements:
// - Loading robots.txt once per run through the shared transport
// - Permissive fallback when robots.txt is missing or broken
// =============================================================================

mod policy;

pub use policy::PolicyGate;
