use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::communication::messages::FirstInLineQuery;
use crate::communication::traffic_light_api::TrafficLightApi;
use crate::error::ClientError;
use crate::global_variables::{
    ROUTE_FIRST_IN_LINE, ROUTE_LIGHT_STATE, ROUTE_PASS, ROUTE_QUEUE, ROUTE_UNIQUE_ID,
};
use crate::models::intersection::{LightState, PassAttemptResult};
use crate::models::vehicle::{CarDesc, CarId};

/// HTTP proxy for a remote traffic light server.
#[derive(Debug, Clone)]
pub struct TrafficLightClient {
    base_url: String,
    http: Client,
}

impl TrafficLightClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    async fn get_json<Q, T>(&self, route: &'static str, query: Option<&Q>) -> Result<T, ClientError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.get(self.url(route));
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::read_json(route, response).await
    }

    async fn post_json<B, T>(&self, route: &'static str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(route)).json(body).send().await?;
        Self::read_json(route, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        route: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { route, status });
        }
        Ok(response.json::<T>().await?)
    }
}

impl TrafficLightApi for TrafficLightClient {
    type Error = ClientError;

    async fn get_unique_id(&self) -> Result<CarId, ClientError> {
        self.get_json::<(), _>(ROUTE_UNIQUE_ID, None).await
    }

    async fn get_light_state(&self) -> Result<LightState, ClientError> {
        self.get_json::<(), _>(ROUTE_LIGHT_STATE, None).await
    }

    async fn queue(&self, car: &CarDesc) -> Result<bool, ClientError> {
        self.post_json(ROUTE_QUEUE, car).await
    }

    async fn is_first_in_line(&self, car_id: CarId) -> Result<bool, ClientError> {
        self.get_json(ROUTE_FIRST_IN_LINE, Some(&FirstInLineQuery { car_id }))
            .await
    }

    async fn pass(&self, car: &CarDesc) -> Result<PassAttemptResult, ClientError> {
        self.post_json(ROUTE_PASS, car).await
    }
}
