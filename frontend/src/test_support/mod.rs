use crate::api::{AuthenticatedUser, DashboardData, Vehicle};
use serde_json::{json, Value};

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub fn investor_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: 7,
        name: "Carlos Eduardo Silva".into(),
        email: "carlos@example.com".into(),
    }
}

pub fn vehicle_json(id: i64, plate: &str, status: &str) -> Value {
    json!({
        "vehicle_id": id,
        "license_plate": plate,
        "model": "CG 160 Start",
        "brand": "Honda",
        "year": 2023,
        "status": status,
        "color": "Vermelha",
        "renavam": format!("0012345678{id}"),
        "chassi": format!("9C2KC1670PR00{id}"),
        "image": null,
        "expected_amount": 1500.0,
        "paid_amount": 1250.0
    })
}

pub fn vehicle(id: i64, plate: &str, status: &str) -> Vehicle {
    serde_json::from_value(vehicle_json(id, plate, status)).expect("vehicle fixture")
}

pub fn sample_fleet() -> Vec<Vehicle> {
    vec![
        vehicle(1, "ABC-1234", "rented"),
        vehicle(2, "XYZ-9876", "rented"),
        vehicle(3, "KLP-4455", "maintenance"),
        vehicle(5, "QWE-1122", "available"),
        vehicle(6, "RTY-3344", "unavailable"),
    ]
}

pub fn dashboard_json() -> Value {
    json!({
        "vehicle_stats": { "rented": 4, "available": 1, "maintenance": 1 },
        "contract_start_date": "2024-01-01",
        "contract_end_date": "2024-04-01",
        "cycle_info": { "number": 2, "start": "2024-02-01", "end": "2024-02-29" },
        "financials": {
            "total_revenue": 5000.0,
            "by_plate": { "XYZ-9876": 1400.0, "ABC-1234": 1250.0 },
            "weekly_revenue": { "week_1": 1000.0, "week_2": 1500.0, "week_3": 1200.0, "week_4": 1300.0 },
            "daily_revenue": [
                { "day_number": 1, "date": "2024-02-01", "value": 300.0 },
                { "day_number": 2, "date": "2024-02-02", "value": 450.0 }
            ]
        },
        "comparative": { "total_revenue": 4000.0 }
    })
}

pub fn dashboard_data() -> DashboardData {
    serde_json::from_value(dashboard_json()).expect("dashboard fixture")
}
