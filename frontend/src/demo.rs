//! Static showcase data for the landing page and offline previews. Nothing
//! here touches the network or storage.

use serde::{Deserialize, Serialize};

use crate::state::dashboard::projections::ChartPoint;

pub use crate::utils::format::{calculate_percentage, format_currency};

pub const STATUS_RENTED: &str = "Alugada";
pub const STATUS_MAINTENANCE: &str = "Manutenção";
pub const STATUS_AVAILABLE: &str = "Disponível";
pub const STATUS_UNAVAILABLE: &str = "Indisponível";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moto {
    pub id: u32,
    pub plate: String,
    pub received: f64,
    pub target: f64,
    pub status: String,
    pub model: String,
    pub year: i32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u32,
    pub title: String,
    /// `dd/mm`
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoUser {
    pub name: String,
    pub initials: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetStatus {
    pub alugadas: usize,
    pub manutencao: usize,
    pub disponiveis: usize,
}

const DAILY_VALUES: [u32; 30] = [
    412, 655, 318, 730, 521, 489, 800, 367, 598, 644, 455, 713, 302, 566, 689, 431, 777, 512,
    390, 625, 548, 701, 336, 467, 592, 759, 418, 683, 505, 624,
];

const WEEKLY_VALUES: [f64; 4] = [3850.0, 4200.0, 4900.0, 5500.0];

#[derive(Debug, Clone, PartialEq)]
pub struct DemoData {
    motos: Vec<Moto>,
}

impl Default for DemoData {
    fn default() -> Self {
        Self::new()
    }
}

fn moto(
    id: u32,
    plate: &str,
    received: f64,
    status: &str,
    model: &str,
    year: i32,
    color: &str,
) -> Moto {
    Moto {
        id,
        plate: plate.into(),
        received,
        target: 1500.0,
        status: status.into(),
        model: model.into(),
        year,
        color: color.into(),
    }
}

impl DemoData {
    pub fn new() -> Self {
        Self {
            motos: vec![
                moto(1, "ABC-1234", 1250.0, STATUS_RENTED, "Honda CG 160 Start", 2023, "Vermelha"),
                moto(2, "XYZ-9876", 1400.0, STATUS_RENTED, "Yamaha Fazer 250", 2022, "Azul"),
                moto(3, "KLP-4455", 980.0, STATUS_MAINTENANCE, "Honda Biz 125", 2024, "Branca"),
                moto(4, "MOT-0084", 1500.0, STATUS_RENTED, "Honda CG 160 Titan", 2023, "Preta"),
                moto(5, "QWE-1122", 0.0, STATUS_AVAILABLE, "Yamaha Factor 150", 2022, "Vermelha"),
                moto(6, "RTY-3344", 1100.0, STATUS_RENTED, "Honda CG 160 Fan", 2023, "Prata"),
            ],
        }
    }

    pub fn motos(&self) -> &[Moto] {
        &self.motos
    }

    /// One point per day of the month, labelled `1..=30`.
    pub fn daily_data(&self) -> Vec<ChartPoint> {
        DAILY_VALUES
            .iter()
            .enumerate()
            .map(|(idx, value)| ChartPoint {
                label: (idx + 1).to_string(),
                value: f64::from(*value),
            })
            .collect()
    }

    pub fn weekly_data(&self) -> Vec<ChartPoint> {
        WEEKLY_VALUES
            .iter()
            .enumerate()
            .map(|(idx, value)| ChartPoint {
                label: format!("Sem {}", idx + 1),
                value: *value,
            })
            .collect()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        [
            (1, "Manutenção Preventiva", "20/05", 1200.0),
            (2, "Seguro Frota", "15/05", 3400.0),
            (3, "Taxas Administrativas", "10/05", 450.0),
        ]
        .into_iter()
        .map(|(id, title, date, amount)| Expense {
            id,
            title: title.into(),
            date: date.into(),
            amount,
        })
        .collect()
    }

    pub fn user(&self) -> DemoUser {
        DemoUser {
            name: "Carlos Eduardo Silva".into(),
            initials: "CS".into(),
            role: "Investidor Ativo".into(),
        }
    }

    pub fn fleet_status(&self) -> FleetStatus {
        let count = |status: &str| self.motos.iter().filter(|m| m.status == status).count();
        FleetStatus {
            alugadas: count(STATUS_RENTED),
            manutencao: count(STATUS_MAINTENANCE),
            disponiveis: count(STATUS_AVAILABLE),
        }
    }

    pub fn top_motos(&self) -> &[Moto] {
        &self.motos[..self.motos.len().min(4)]
    }

    pub fn get_moto_by_id(&self, id: u32) -> Option<&Moto> {
        self.motos.iter().find(|m| m.id == id)
    }
}
