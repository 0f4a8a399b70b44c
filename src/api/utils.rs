use std::time::Duration;

use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::error::DashboardError;

/// Yahoo rejects requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub async fn get_json<T>(client: &Client, url: &str) -> Result<T, DashboardError>
where
    T: DeserializeOwned,
{
    let res = client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DashboardError::GatewayUnavailable(format!(
            "request failed with status {}",
            res.status()
        )));
    }

    let text = res.text().await?;
    serde_json::from_str::<T>(&text)
        .map_err(|err| DashboardError::GatewayUnavailable(format!("unexpected payload: {}", err)))
}
