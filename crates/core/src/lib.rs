//! Occupancy and ledger core for Clubhouse.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, state machines, and calculations live
//! here; persistence, routing, and scheduling are collaborators specified
//! only at their boundary.
//!
//! # Modules
//!
//! - `ledger` - Derived credit balances from purchase/occupancy history
//! - `pricing` - Package price table with tier discount
//! - `occupancy` - Check-in/check-out/void/expire state machine
//! - `purchase` - Credit purchase recording and voiding
//! - `drawer` - Daily cash drawer and reconciliation
//! - `sweeper` - Force-checkout of records past the time limit
//! - `audit` - Best-effort audit event emission
//! - `storage` - Storage boundary traits and the in-memory reference adapter
//! - `clock` - Injectable time source

pub mod audit;
pub mod clock;
pub mod drawer;
pub mod ledger;
pub mod member;
pub mod occupancy;
pub mod pricing;
pub mod purchase;
pub mod storage;
pub mod sweeper;
