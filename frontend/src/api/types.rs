use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;
use thiserror::Error;

use crate::utils::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Application { status: u16, message: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The backend's own `message` when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// `{status, message, data}` wrapper used by every investor endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Error bodies only matter for their `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleStatus {
    Rented,
    Available,
    Unavailable,
    Maintenance,
    Other(String),
}

impl VehicleStatus {
    pub fn code(&self) -> &str {
        match self {
            VehicleStatus::Rented => "rented",
            VehicleStatus::Available => "available",
            VehicleStatus::Unavailable => "unavailable",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Other(raw) => raw,
        }
    }

    /// pt-BR label; unknown codes are shown as received.
    pub fn label(&self) -> &str {
        match self {
            VehicleStatus::Rented => "Alugada",
            VehicleStatus::Available => "Disponível",
            VehicleStatus::Unavailable => "Indisponível",
            VehicleStatus::Maintenance => "Manutenção",
            VehicleStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for VehicleStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "rented" => VehicleStatus::Rented,
            "available" => VehicleStatus::Available,
            "unavailable" => VehicleStatus::Unavailable,
            "maintenance" => VehicleStatus::Maintenance,
            other => VehicleStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for VehicleStatus {
    fn from(raw: String) -> Self {
        match VehicleStatus::from(raw.as_str()) {
            VehicleStatus::Other(_) => VehicleStatus::Other(raw),
            known => known,
        }
    }
}

impl From<VehicleStatus> for String {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::Other(raw) => raw,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub license_plate: String,
    pub model: String,
    pub brand: String,
    pub year: i32,
    pub status: VehicleStatus,
    #[serde(default)]
    pub color: Option<String>,
    pub renavam: String,
    pub chassi: String,
    #[serde(default)]
    pub image: Option<String>,
    pub expected_amount: f64,
    pub paid_amount: f64,
}

/// The fleet endpoint answers either with a bare list or with an envelope.
/// Items stay raw until [`FleetResponse::into_vehicles`] so a bad record is
/// reported instead of being mistaken for an unknown payload shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FleetResponse {
    Bare(Vec<Value>),
    Envelope {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        data: Option<Value>,
    },
    Unrecognized(Value),
}

impl FleetResponse {
    /// Normalizes both shapes to a plain list. Unknown shapes give an empty
    /// list; a list holding an undecodable vehicle is an [`ApiError::Decode`].
    pub fn into_vehicles(self) -> Result<Vec<Vehicle>, ApiError> {
        match self {
            FleetResponse::Bare(items) => decode_vehicles(items),
            FleetResponse::Envelope { data, .. } => match data {
                None => Ok(Vec::new()),
                Some(Value::Array(items)) => decode_vehicles(items),
                Some(other) => {
                    log::warn!("unrecognized fleet data shape: {}", shape_of(&other));
                    Ok(Vec::new())
                }
            },
            FleetResponse::Unrecognized(value) => {
                log::warn!("unrecognized fleet payload shape: {}", shape_of(&value));
                Ok(Vec::new())
            }
        }
    }
}

fn decode_vehicles(items: Vec<Value>) -> Result<Vec<Vehicle>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::Decode(format!("fleet item {idx}: {e}")))
        })
        .collect()
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleStats {
    #[serde(default)]
    pub rented: u32,
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub unavailable: u32,
    #[serde(default)]
    pub maintenance: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    pub number: u32,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub day_number: u32,
    #[serde(default)]
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRevenue {
    #[serde(default)]
    pub week_1: f64,
    #[serde(default)]
    pub week_2: f64,
    #[serde(default)]
    pub week_3: f64,
    #[serde(default)]
    pub week_4: f64,
}

/// Plate → amount received, in the order the backend listed the plates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateAmounts(Vec<(String, f64)>);

impl PlateAmounts {
    pub fn get(&self, plate: &str) -> Option<&f64> {
        self.0
            .iter()
            .find(|(key, _)| key == plate)
            .map(|(_, amount)| amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(plate, amount)| (plate.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for PlateAmounts {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut amounts = PlateAmounts::default();
        for (plate, amount) in iter {
            match amounts.0.iter_mut().find(|(key, _)| *key == plate) {
                Some(entry) => entry.1 = amount,
                None => amounts.0.push((plate, amount)),
            }
        }
        amounts
    }
}

impl Serialize for PlateAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (plate, amount) in &self.0 {
            map.serialize_entry(plate, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlateAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlateAmountsVisitor;

        impl<'de> Visitor<'de> for PlateAmountsVisitor {
            type Value = PlateAmounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of plate to amount")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, f64>()? {
                    entries.push(entry);
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(PlateAmountsVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub by_plate: PlateAmounts,
    #[serde(default)]
    pub weekly_revenue: WeeklyRevenue,
    #[serde(default)]
    pub daily_revenue: Vec<DailyRevenue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparative {
    #[serde(default)]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub vehicle_stats: VehicleStats,
    #[serde(default)]
    pub contract_start_date: String,
    #[serde(default)]
    pub contract_end_date: String,
    #[serde(default)]
    pub cycle_info: CycleInfo,
    #[serde(default)]
    pub financials: Financials,
    #[serde(default)]
    pub comparative: Comparative,
}
