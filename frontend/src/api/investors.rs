use super::{
    client::ApiClient,
    types::{ApiEnvelope, ApiError, DashboardData, FleetResponse, Vehicle},
};

impl ApiClient {
    pub async fn get_dashboard(&self) -> Result<DashboardData, ApiError> {
        let envelope: ApiEnvelope<DashboardData> =
            self.get_authorized("/investors/dashboard").await?;
        Ok(envelope.data)
    }

    /// Always a plain list, whichever shape the backend answered with.
    pub async fn get_fleet(&self) -> Result<Vec<Vehicle>, ApiError> {
        let response: FleetResponse = self.get_authorized("/investors/fleet").await?;
        response.into_vehicles()
    }
}
