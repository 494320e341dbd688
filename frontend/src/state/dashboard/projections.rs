//! View-model values derived from the last dashboard snapshot.
//!
//! Every function takes the snapshot by reference and returns a fresh value;
//! a missing snapshot yields the documented default instead of an error.

use serde::{Deserialize, Serialize};

use crate::{
    api::{CycleInfo, DashboardData, VehicleStats},
    utils::format::{calculate_percentage, format_currency, format_date_br, js_round, parse_date_like},
};

const SECONDS_PER_MONTH: f64 = 60.0 * 60.0 * 24.0 * 30.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub start_date: String,
    pub end_date: String,
    pub months: i64,
}

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateRevenue {
    pub plate: String,
    pub received: f64,
}

pub fn vehicle_stats(snapshot: Option<&DashboardData>) -> VehicleStats {
    snapshot.map(|data| data.vehicle_stats).unwrap_or_default()
}

pub fn cycle_info(snapshot: Option<&DashboardData>) -> CycleInfo {
    snapshot
        .map(|data| data.cycle_info.clone())
        .unwrap_or_default()
}

/// Contract window with its length in whole 30-day months.
pub fn contract_info(snapshot: Option<&DashboardData>) -> ContractInfo {
    let Some(data) = snapshot else {
        return ContractInfo::default();
    };
    let start = parse_date_like(&data.contract_start_date);
    let end = parse_date_like(&data.contract_end_date);

    let months = match (start, end) {
        (Some(start), Some(end)) => {
            let seconds = (end - start).num_seconds() as f64;
            js_round(seconds / SECONDS_PER_MONTH) as i64
        }
        _ => 0,
    };

    ContractInfo {
        start_date: start.map(|s| format_date_br(s.date())).unwrap_or_default(),
        end_date: end.map(|e| format_date_br(e.date())).unwrap_or_default(),
        months,
    }
}

pub fn daily_data(snapshot: Option<&DashboardData>) -> Vec<ChartPoint> {
    let Some(data) = snapshot else {
        return Vec::new();
    };
    data.financials
        .daily_revenue
        .iter()
        .map(|day| ChartPoint {
            label: day.day_number.to_string(),
            value: day.value,
        })
        .collect()
}

pub fn weekly_data(snapshot: Option<&DashboardData>) -> Vec<ChartPoint> {
    let Some(data) = snapshot else {
        return Vec::new();
    };
    let weekly = &data.financials.weekly_revenue;
    [weekly.week_1, weekly.week_2, weekly.week_3, weekly.week_4]
        .into_iter()
        .enumerate()
        .map(|(idx, value)| ChartPoint {
            label: format!("Sem {}", idx + 1),
            value,
        })
        .collect()
}

pub fn total_revenue(snapshot: Option<&DashboardData>) -> f64 {
    snapshot.map_or(0.0, |data| data.financials.total_revenue)
}

pub fn comparative_revenue(snapshot: Option<&DashboardData>) -> f64 {
    snapshot.map_or(0.0, |data| data.comparative.total_revenue)
}

/// Current revenue as a percentage of the previous period's.
pub fn comparative_percentage(snapshot: Option<&DashboardData>) -> i64 {
    calculate_percentage(total_revenue(snapshot), comparative_revenue(snapshot))
}

pub fn formatted_total_revenue(snapshot: Option<&DashboardData>) -> String {
    format_currency(total_revenue(snapshot))
}

pub fn revenue_by_plate(snapshot: Option<&DashboardData>) -> Vec<PlateRevenue> {
    let Some(data) = snapshot else {
        return Vec::new();
    };
    data.financials
        .by_plate
        .iter()
        .map(|(plate, received)| PlateRevenue {
            plate: plate.to_string(),
            received,
        })
        .collect()
}

/// Renders a cycle boundary (`YYYY-MM-DD`) as `dd/mm/yyyy`; empty or
/// unparseable input gives an empty string.
pub fn format_cycle_date(date_str: &str) -> String {
    parse_date_like(date_str)
        .map(|date| format_date_br(date.date()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dashboard_data;

    #[test]
    fn absent_snapshot_yields_defaults() {
        assert_eq!(
            vehicle_stats(None),
            VehicleStats {
                rented: 0,
                available: 0,
                unavailable: 0,
                maintenance: 0
            }
        );
        assert_eq!(
            cycle_info(None),
            CycleInfo {
                number: 0,
                start: String::new(),
                end: String::new()
            }
        );
        assert_eq!(contract_info(None), ContractInfo::default());
        assert!(daily_data(None).is_empty());
        assert!(weekly_data(None).is_empty());
        assert!(revenue_by_plate(None).is_empty());
        assert_eq!(total_revenue(None), 0.0);
        assert_eq!(comparative_revenue(None), 0.0);
        assert_eq!(comparative_percentage(None), 0);
        assert_eq!(formatted_total_revenue(None), "0");
    }

    #[test]
    fn contract_of_ninety_days_is_three_months() {
        let mut data = dashboard_data();
        data.contract_start_date = "2024-01-01".into();
        data.contract_end_date = "2024-04-01".into();

        let info = contract_info(Some(&data));
        assert_eq!(info.months, 3);
        assert_eq!(info.start_date, "01/01/2024");
        assert_eq!(info.end_date, "01/04/2024");
    }

    #[test]
    fn contract_months_round_to_nearest() {
        let mut data = dashboard_data();
        data.contract_start_date = "2024-01-01".into();
        data.contract_end_date = "2025-01-01".into();
        // 366 days / 30 = 12.2
        assert_eq!(contract_info(Some(&data)).months, 12);

        data.contract_end_date = "2024-01-16".into();
        // 15 days / 30 = 0.5 rounds up
        assert_eq!(contract_info(Some(&data)).months, 1);
    }

    #[test]
    fn unparseable_contract_dates_degrade() {
        let mut data = dashboard_data();
        data.contract_start_date = "soon".into();
        let info = contract_info(Some(&data));
        assert_eq!(info.start_date, "");
        assert_eq!(info.months, 0);
        assert!(!info.end_date.is_empty());
    }

    #[test]
    fn series_are_reshaped_for_charts() {
        let data = dashboard_data();
        let weekly = weekly_data(Some(&data));
        let labels: Vec<_> = weekly.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Sem 1", "Sem 2", "Sem 3", "Sem 4"]);
        assert_eq!(weekly[1].value, 1500.0);

        let daily = daily_data(Some(&data));
        assert_eq!(daily.len(), data.financials.daily_revenue.len());
        assert_eq!(
            daily[0],
            ChartPoint {
                label: "1".into(),
                value: 300.0
            }
        );
    }

    #[test]
    fn plate_revenue_follows_mapping_order() {
        let data = dashboard_data();
        let rows = revenue_by_plate(Some(&data));
        let plates: Vec<_> = rows.iter().map(|r| r.plate.as_str()).collect();
        assert_eq!(plates, ["XYZ-9876", "ABC-1234"]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn scalars_and_percentages() {
        let data = dashboard_data();
        assert_eq!(total_revenue(Some(&data)), 5000.0);
        assert_eq!(comparative_revenue(Some(&data)), 4000.0);
        assert_eq!(comparative_percentage(Some(&data)), 125);
        assert_eq!(formatted_total_revenue(Some(&data)), "5.000");
    }

    #[test]
    fn cycle_dates_render_day_first() {
        assert_eq!(format_cycle_date("2024-02-01"), "01/02/2024");
        assert_eq!(format_cycle_date(""), "");
        assert_eq!(format_cycle_date("garbage"), "");
    }
}
