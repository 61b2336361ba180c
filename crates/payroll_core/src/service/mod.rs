//! Payroll use-case services.
//!
//! # Responsibility
//! - Layer business rules (availability, payment, joins) over the repository.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Services never write around the repository's `save` primitive.
//! - Rejected operations leave every collection untouched.

pub mod container_service;
pub mod payroll;
pub mod roster;
pub mod team_service;
pub mod worker_service;
