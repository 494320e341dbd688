pub mod projections;

use crate::{
    api::{ApiClient, CycleInfo, DashboardData, VehicleStats},
    state::BusyGuard,
};
use leptos::*;
use projections::{ChartPoint, ContractInfo, PlateRevenue};

pub use projections::format_cycle_date;

pub const DASHBOARD_ERROR_FALLBACK: &str = "Erro ao carregar dashboard";

/// Investor dashboard snapshot. Kept in memory only and refetched on
/// every visit.
#[derive(Clone)]
pub struct DashboardStore {
    api: ApiClient,
    snapshot: RwSignal<Option<DashboardData>>,
    is_loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl DashboardStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: create_rw_signal(None),
            is_loading: create_rw_signal(false),
            error: create_rw_signal(None),
        }
    }

    pub fn snapshot(&self) -> ReadSignal<Option<DashboardData>> {
        self.snapshot.read_only()
    }

    pub fn is_loading(&self) -> ReadSignal<bool> {
        self.is_loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    pub async fn fetch_dashboard(&self) -> Result<(), String> {
        let _busy = BusyGuard::hold(self.is_loading);
        self.error.set(None);

        match self.api.get_dashboard().await {
            Ok(data) => {
                self.snapshot.set(Some(data));
                Ok(())
            }
            Err(err) => {
                log::warn!("dashboard fetch failed (status {:?}): {err}", err.status());
                let message = err.user_message(DASHBOARD_ERROR_FALLBACK);
                self.error.set(Some(message.clone()));
                Err(message)
            }
        }
    }

    pub fn clear_dashboard(&self) {
        self.snapshot.set(None);
    }

    #[cfg(test)]
    pub(crate) fn overwrite_snapshot_for_test(&self, data: Option<DashboardData>) {
        self.snapshot.set(data);
    }

    fn project<T: 'static>(&self, f: fn(Option<&DashboardData>) -> T) -> Signal<T> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|data| f(data.as_ref())))
    }

    pub fn vehicle_stats(&self) -> Signal<VehicleStats> {
        self.project(projections::vehicle_stats)
    }

    pub fn cycle_info(&self) -> Signal<CycleInfo> {
        self.project(projections::cycle_info)
    }

    pub fn contract_info(&self) -> Signal<ContractInfo> {
        self.project(projections::contract_info)
    }

    pub fn daily_data(&self) -> Signal<Vec<ChartPoint>> {
        self.project(projections::daily_data)
    }

    pub fn weekly_data(&self) -> Signal<Vec<ChartPoint>> {
        self.project(projections::weekly_data)
    }

    pub fn total_revenue(&self) -> Signal<f64> {
        self.project(projections::total_revenue)
    }

    pub fn comparative_revenue(&self) -> Signal<f64> {
        self.project(projections::comparative_revenue)
    }

    pub fn comparative_percentage(&self) -> Signal<i64> {
        self.project(projections::comparative_percentage)
    }

    pub fn formatted_total_revenue(&self) -> Signal<String> {
        self.project(projections::formatted_total_revenue)
    }

    pub fn revenue_by_plate(&self) -> Signal<Vec<PlateRevenue>> {
        self.project(projections::revenue_by_plate)
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        test_support::dashboard_json,
        utils::storage::{KeyValueStore, MemoryStorage, SharedStore, ACCESS_TOKEN_KEY},
    };
    use httpmock::prelude::*;
    use serde_json::json;
    use std::rc::Rc;

    #[tokio::test]
    async fn fetch_stores_snapshot_every_time() {
        let server = MockServer::start_async().await;
        let dashboard_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/investors/dashboard")
                .header("Authorization", "Bearer tok-abc");
            then.status(200).json_body(json!({
                "status": "success",
                "message": "ok",
                "data": dashboard_json()
            }));
        });

        let runtime = create_runtime();
        let durable = Rc::new(MemoryStorage::new());
        durable.set_item(ACCESS_TOKEN_KEY, "tok-abc").unwrap();
        let durable: SharedStore = durable;
        let store = DashboardStore::new(
            ApiClient::new_with_base_url(server.url("/api")).with_durable_storage(Some(durable)),
        );

        store.fetch_dashboard().await.unwrap();
        store.fetch_dashboard().await.unwrap();
        assert_eq!(dashboard_mock.hits_async().await, 2);

        assert!(!store.is_loading().get());
        assert!(store.error().get().is_none());
        assert_eq!(store.contract_info().get().months, 3);
        assert_eq!(store.cycle_info().get().number, 2);
        assert_eq!(store.comparative_revenue().get(), 4000.0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn plate_rows_follow_backend_key_order() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/investors/dashboard");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"status":"success","data":{"financials":{"by_plate":
                        {"XYZ-9876":1400.0,"ABC-1234":1250.0,"KLP-4455":980.0}}}}"#,
                );
        });

        let runtime = create_runtime();
        let store = DashboardStore::new(
            ApiClient::new_with_base_url(server.url("/api")).with_durable_storage(None),
        );
        store.fetch_dashboard().await.unwrap();

        let plates: Vec<String> = store
            .revenue_by_plate()
            .get()
            .into_iter()
            .map(|row| row.plate)
            .collect();
        assert_eq!(plates, ["XYZ-9876", "ABC-1234", "KLP-4455"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_state_and_reports() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/investors/dashboard");
            then.status(503).body("unavailable");
        });

        let runtime = create_runtime();
        let store = DashboardStore::new(
            ApiClient::new_with_base_url(server.url("/api")).with_durable_storage(None),
        );

        let result = store.fetch_dashboard().await;
        assert_eq!(result, Err(DASHBOARD_ERROR_FALLBACK.to_string()));
        assert_eq!(store.error().get().as_deref(), Some(DASHBOARD_ERROR_FALLBACK));
        assert!(!store.is_loading().get());
        assert!(store.snapshot().get().is_none());
        assert_eq!(store.vehicle_stats().get(), VehicleStats::default());
        runtime.dispose();
    }

    #[tokio::test]
    async fn backend_message_wins_over_fallback() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/investors/dashboard");
            then.status(403).json_body(json!({ "status": "error", "message": "Investidor inativo" }));
        });

        let runtime = create_runtime();
        let store = DashboardStore::new(
            ApiClient::new_with_base_url(server.url("/api")).with_durable_storage(None),
        );

        assert_eq!(
            store.fetch_dashboard().await,
            Err("Investidor inativo".to_string())
        );
        runtime.dispose();
    }
}
