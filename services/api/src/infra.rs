use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use opshub::config::AppConfig;
use opshub::ops::store::InMemoryStore;
use opshub::ops::{AdapterRegistry, OpsState};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the adapter registry and shared store from configuration. `anchor` pins mock data
/// to a reference instant; the server passes `None` and follows the wall clock.
pub(crate) fn ops_state(
    config: &AppConfig,
    store: Arc<InMemoryStore>,
    anchor: Option<DateTime<Utc>>,
) -> OpsState {
    let mut registry = AdapterRegistry::new(
        config.sources.adapters.iter(),
        config.sources.inventory_csv.clone(),
        store,
    );
    if let Some(now) = anchor {
        registry = registry.anchored(now);
    }
    OpsState::from_registry(&registry, config.sources.brief_window)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Reference instant for a brief day: now for today, otherwise late afternoon before service.
pub(crate) fn reference_time(today: Option<NaiveDate>) -> DateTime<Utc> {
    let now = Utc::now();
    match today {
        Some(date) if date != now.date_naive() => date
            .and_hms_opt(16, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or(now),
        _ => now,
    }
}
