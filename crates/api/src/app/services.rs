use std::sync::Arc;

use chrono::{DateTime, Utc};

use graindash_core::{Clock, DomainResult, SystemClock};
use graindash_ledger::{seed, InMemoryLedgerStore, LedgerStore};
use graindash_metrics::{DashboardMetrics, MonthlyFlow};
use graindash_reporting::{ExportOutcome, ReportError, ReportExporter, ReportFormat, ReportRange};

use crate::config::ApiConfig;

/// Shared state behind every handler.
///
/// Handlers only see the store through `LedgerStore`, so a persistent
/// implementation can be dropped in without touching routes.
pub struct AppServices {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    exporter: ReportExporter,
}

impl AppServices {
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>, exporter: ReportExporter) -> Self {
        Self {
            store,
            clock,
            exporter,
        }
    }

    /// In-memory wiring (the only backend today), seeded if configured.
    pub fn from_config(config: &ApiConfig) -> DomainResult<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    pub fn from_config_with_clock(config: &ApiConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let store = Arc::new(InMemoryLedgerStore::with_clock(clock.clone()));
        if config.seed_demo_data {
            seed::seed_demo(store.as_ref(), clock.now())?;
        }

        Ok(Self::new(
            store,
            clock,
            ReportExporter::new(config.report_title.clone()),
        ))
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Metrics over a fresh snapshot of the ledger.
    pub fn dashboard_metrics(&self) -> DashboardMetrics {
        graindash_metrics::compute(&self.store.list(), self.now())
    }

    /// Purchased vs sold tonnage per calendar month, oldest first.
    pub fn monthly_flow(&self, months: u32) -> Vec<MonthlyFlow> {
        graindash_metrics::monthly_series(&self.store.list(), self.now(), months)
    }

    pub fn export_report(
        &self,
        range: &ReportRange,
        format: ReportFormat,
    ) -> Result<ExportOutcome, ReportError> {
        let renderer = format.renderer();
        self.exporter
            .export(self.store(), range, renderer.as_ref(), self.now())
    }
}
