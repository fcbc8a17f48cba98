//! Dashboard State
//!
//! In-memory copy of both lead lists. Every refresh re-fetches everything and
//! replaces the snapshot wholesale; a failed fetch leaves the previous
//! snapshot in place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

use super::client::{DashboardApi, DashboardError};
use super::filter::{LeadFilter, StatusCounts};
use crate::domain::models::application::ApplicationStatus;
use crate::domain::models::pagination::MAX_LIMIT;
use crate::infrastructure::driving_adapters::api_rest::dto::{
    ApplicationResponseDto, ApplicationStatsDto, BankConnectionResponseDto, UpdateStatusResponseDto,
};

#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub applications: Vec<ApplicationResponseDto>,
    pub bank_connections: Vec<BankConnectionResponseDto>,
    /// `None` until the first successful refresh
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Fresh,
    /// Fetch failed; the previous snapshot is still being served
    Stale { error: String },
}

pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    snapshot: RwLock<DashboardSnapshot>,
}

impl Dashboard {
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            api,
            snapshot: RwLock::new(DashboardSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Re-fetch both lists and swap in the new snapshot
    pub async fn refresh(&self) -> RefreshOutcome {
        match tokio::try_join!(self.fetch_applications(), self.fetch_bank_connections()) {
            Ok((applications, bank_connections)) => {
                tracing::debug!(
                    applications = applications.len(),
                    bank_connections = bank_connections.len(),
                    "Dashboard refreshed"
                );
                *self.snapshot.write().await = DashboardSnapshot {
                    applications,
                    bank_connections,
                    refreshed_at: Some(Utc::now()),
                };
                RefreshOutcome::Fresh
            }
            Err(err) => {
                tracing::warn!(error = %err, "Dashboard refresh failed; serving stale data");
                RefreshOutcome::Stale { error: err.to_string() }
            }
        }
    }

    /// Refresh every `period` until `shutdown` resolves. The first refresh is immediate.
    pub async fn poll<F>(&self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    if self.refresh().await == RefreshOutcome::Fresh {
                        let counts = self.status_counts().await;
                        tracing::info!(
                            total = counts.total,
                            new = counts.new,
                            pending = counts.pending,
                            approved = counts.approved,
                            rejected = counts.rejected,
                            "Leads refreshed"
                        );
                    }
                }
            }
        }
        tracing::debug!("Dashboard polling stopped");
    }

    pub async fn leads(&self, filter: &LeadFilter) -> Vec<ApplicationResponseDto> {
        filter.apply(&self.snapshot.read().await.applications)
    }

    pub async fn bank_connections(&self) -> Vec<BankConnectionResponseDto> {
        self.snapshot.read().await.bank_connections.clone()
    }

    pub async fn status_counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.snapshot.read().await.applications)
    }

    /// Server-side aggregates, independent of the snapshot
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the request fails.
    pub async fn stats(&self) -> Result<ApplicationStatsDto, DashboardError> {
        self.api.fetch_stats().await
    }

    /// Apply a status using a dashboard label, then refresh.
    ///
    /// The server runs the approval follow-up; "contacted" is stored as `pending`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::InvalidStatus` for unknown labels, or the API error.
    pub async fn set_status(&self, id: &str, label: &str) -> Result<UpdateStatusResponseDto, DashboardError> {
        let status = ApplicationStatus::from_dashboard_label(label)
            .map_err(|_| DashboardError::InvalidStatus(label.to_string()))?;

        let response = self.api.update_status(id, status).await?;
        self.refresh().await;
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns the API error; the snapshot is refreshed only on success.
    pub async fn delete_application(&self, id: &str) -> Result<(), DashboardError> {
        self.api.delete_application(id).await?;
        self.refresh().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the API error; the snapshot is refreshed only on success.
    pub async fn delete_bank_connection(&self, id: &str) -> Result<(), DashboardError> {
        self.api.delete_bank_connection(id).await?;
        self.refresh().await;
        Ok(())
    }

    async fn fetch_applications(&self) -> Result<Vec<ApplicationResponseDto>, DashboardError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let response = self.api.fetch_applications(page, MAX_LIMIT).await?;
            let last = response.applications.is_empty() || u64::from(page) >= response.total_pages;
            items.extend(response.applications);
            if last {
                return Ok(items);
            }
            page += 1;
        }
    }

    async fn fetch_bank_connections(&self) -> Result<Vec<BankConnectionResponseDto>, DashboardError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let response = self.api.fetch_bank_connections(page, MAX_LIMIT).await?;
            let last = response.connections.is_empty() || u64::from(page) >= response.total_pages;
            items.extend(response.connections);
            if last {
                return Ok(items);
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::client::MockDashboardApi;
    use crate::dashboard::filter::fixtures::lead;
    use crate::infrastructure::driving_adapters::api_rest::dto::{
        ApplicationListResponseDto, BankConnectionListResponseDto,
    };
    use mockall::predicate::{always, eq};
    use reqwest::StatusCode;

    fn applications_page(leads: Vec<ApplicationResponseDto>, page: u32, total_pages: u64) -> ApplicationListResponseDto {
        ApplicationListResponseDto {
            total: leads.len() as u64,
            applications: leads,
            page,
            total_pages,
        }
    }

    fn no_connections() -> BankConnectionListResponseDto {
        BankConnectionListResponseDto {
            connections: vec![],
            total: 0,
            page: 1,
            total_pages: 0,
        }
    }

    fn unavailable() -> DashboardError {
        DashboardError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Record store is unavailable".to_string(),
        }
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_and_walks_every_page() {
        let mut api = MockDashboardApi::new();
        api.expect_fetch_applications()
            .with(eq(1), eq(MAX_LIMIT))
            .returning(|page, _| Ok(applications_page(vec![lead("Ann", "Lee", "5551234567", ApplicationStatus::New)], page, 2)));
        api.expect_fetch_applications()
            .with(eq(2), always())
            .returning(|page, _| {
                Ok(applications_page(
                    vec![lead("Bob", "Stone", "5559876543", ApplicationStatus::Approved)],
                    page,
                    2,
                ))
            });
        api.expect_fetch_bank_connections().returning(|_, _| Ok(no_connections()));

        let dashboard = Dashboard::new(Arc::new(api));
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Fresh);

        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.applications.len(), 2);
        assert!(snapshot.refreshed_at.is_some());

        let counts = dashboard.status_counts().await;
        assert_eq!(counts.new, 1);
        assert_eq!(counts.approved, 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_snapshot() {
        let mut api = MockDashboardApi::new();
        let mut calls = 0;
        api.expect_fetch_applications().returning(move |page, _| {
            calls += 1;
            if calls == 1 {
                Ok(applications_page(vec![lead("Ann", "Lee", "5551234567", ApplicationStatus::New)], page, 1))
            } else {
                Err(unavailable())
            }
        });
        api.expect_fetch_bank_connections().returning(|_, _| Ok(no_connections()));

        let dashboard = Dashboard::new(Arc::new(api));
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Fresh);
        let first = dashboard.snapshot().await;

        assert!(matches!(dashboard.refresh().await, RefreshOutcome::Stale { .. }));
        let second = dashboard.snapshot().await;
        assert_eq!(second.applications, first.applications);
        assert_eq!(second.refreshed_at, first.refreshed_at);
    }

    #[tokio::test]
    async fn contacted_label_is_sent_as_pending() {
        let mut api = MockDashboardApi::new();
        api.expect_update_status()
            .with(eq("abc"), eq(ApplicationStatus::Pending))
            .times(1)
            .returning(|_, status| {
                Ok(UpdateStatusResponseDto {
                    success: true,
                    message: "Application status updated".to_string(),
                    status: status.to_string(),
                    changed: true,
                    bank_connection_id: None,
                })
            });
        api.expect_fetch_applications()
            .returning(|page, _| Ok(applications_page(vec![], page, 0)));
        api.expect_fetch_bank_connections().returning(|_, _| Ok(no_connections()));

        let dashboard = Dashboard::new(Arc::new(api));
        let response = dashboard.set_status("abc", "Contacted").await.unwrap();
        assert_eq!(response.status, "pending");
    }

    #[tokio::test]
    async fn unknown_label_is_rejected_locally() {
        let mut api = MockDashboardApi::new();
        api.expect_update_status().never();

        let dashboard = Dashboard::new(Arc::new(api));
        let err = dashboard.set_status("abc", "archived").await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn poll_stops_on_shutdown() {
        let mut api = MockDashboardApi::new();
        api.expect_fetch_applications()
            .times(1..)
            .returning(|page, _| Ok(applications_page(vec![], page, 0)));
        api.expect_fetch_bank_connections().returning(|_, _| Ok(no_connections()));

        let dashboard = Dashboard::new(Arc::new(api));
        dashboard
            .poll(Duration::from_millis(10), tokio::time::sleep(Duration::from_millis(45)))
            .await;

        assert!(dashboard.snapshot().await.refreshed_at.is_some());
    }
}
