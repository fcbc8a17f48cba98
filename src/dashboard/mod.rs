//! Operator Dashboard
//!
//! Client-side read model over the registry API: periodic snapshots, local
//! filtering, status changes and CSV export.

pub mod client;
pub mod export;
pub mod filter;
pub mod state;

pub use client::{DashboardApi, DashboardError, HttpDashboardApi};
pub use export::{write_bank_connections_csv, write_leads_csv};
pub use filter::{LeadFilter, StatusCounts};
pub use state::{Dashboard, DashboardSnapshot, RefreshOutcome};
