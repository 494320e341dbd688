use crate::{
    api::{ApiClient, Vehicle, VehicleStatus},
    state::BusyGuard,
    utils::{
        format::calculate_percentage,
        storage::{SharedStore, FLEET_CACHE_KEY},
    },
};
use leptos::*;

pub const FLEET_ERROR_FALLBACK: &str = "Erro ao carregar frota";

/// pt-BR label for a status code; unknown codes come back unchanged.
pub fn translate_status(status: &str) -> String {
    VehicleStatus::from(status).label().to_string()
}

/// Share of the expected amount a vehicle has already paid.
pub fn collection_rate(vehicle: &Vehicle) -> i64 {
    calculate_percentage(vehicle.paid_amount, vehicle.expected_amount)
}

/// Vehicle list, read through the tab's session storage.
#[derive(Clone)]
pub struct FleetStore {
    api: ApiClient,
    session: Option<SharedStore>,
    vehicles: RwSignal<Vec<Vehicle>>,
    is_loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl FleetStore {
    pub fn new(api: ApiClient, session: Option<SharedStore>) -> Self {
        Self {
            api,
            session,
            vehicles: create_rw_signal(Vec::new()),
            is_loading: create_rw_signal(false),
            error: create_rw_signal(None),
        }
    }

    pub fn vehicles(&self) -> ReadSignal<Vec<Vehicle>> {
        self.vehicles.read_only()
    }

    pub fn is_loading(&self) -> ReadSignal<bool> {
        self.is_loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    fn read_cache(&self) -> Option<Vec<Vehicle>> {
        let session = self.session.as_ref()?;
        let raw = session.get_item(FLEET_CACHE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(vehicles) => Some(vehicles),
            Err(err) => {
                log::warn!("discarding unreadable fleet cache: {err}");
                session.remove_item(FLEET_CACHE_KEY);
                None
            }
        }
    }

    fn write_cache(&self, vehicles: &[Vehicle]) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let stored = serde_json::to_string(vehicles)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                session
                    .set_item(FLEET_CACHE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(err) = stored {
            log::warn!("fleet cache not written: {err}");
        }
    }

    fn invalidate_cache(&self) {
        if let Some(session) = self.session.as_ref() {
            session.remove_item(FLEET_CACHE_KEY);
        }
    }

    /// Serves the cached snapshot when there is one, otherwise fetches the
    /// whole list and replaces both the state and the cache entry.
    pub async fn fetch_fleet(&self) -> Result<(), String> {
        if let Some(cached) = self.read_cache() {
            log::debug!("fleet served from session cache ({} vehicles)", cached.len());
            self.vehicles.set(cached);
            return Ok(());
        }

        let _busy = BusyGuard::hold(self.is_loading);
        self.error.set(None);

        match self.api.get_fleet().await {
            Ok(vehicles) => {
                log::debug!("fleet fetched ({} vehicles)", vehicles.len());
                self.write_cache(&vehicles);
                self.vehicles.set(vehicles);
                Ok(())
            }
            Err(err) => {
                log::warn!("fleet fetch failed (status {:?}): {err}", err.status());
                let message = err.user_message(FLEET_ERROR_FALLBACK);
                self.error.set(Some(message.clone()));
                Err(message)
            }
        }
    }

    /// Drops the cache entry first, so the list always comes from the network.
    pub async fn refresh_fleet(&self) -> Result<(), String> {
        self.invalidate_cache();
        self.fetch_fleet().await
    }

    pub fn get_vehicle_by_id(&self, id: i64) -> Option<Vehicle> {
        self.vehicles
            .with(|vehicles| vehicles.iter().find(|v| v.vehicle_id == id).cloned())
    }

    pub fn get_vehicles_by_status(&self, status: impl Into<VehicleStatus>) -> Vec<Vehicle> {
        let status = status.into();
        self.vehicles.with(|vehicles| {
            vehicles
                .iter()
                .filter(|v| v.status == status)
                .cloned()
                .collect()
        })
    }

    pub fn clear_fleet(&self) {
        self.vehicles.set(Vec::new());
        self.invalidate_cache();
    }
}
