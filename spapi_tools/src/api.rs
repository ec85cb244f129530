use std::sync::Arc;

use chrono::NaiveDate;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{
    amazon_order::AmazonOrder,
    config::SpApiConfig,
    data_objects::{GetOrdersResponse, LwaTokenResponse, OrdersPayload},
    DateWindow,
    Marketplace,
    SpApiError,
};

/// The Login-with-Amazon token endpoint. Region-independent.
pub const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";
const ORDERS_PATH: &str = "/orders/v0/orders";

#[derive(Clone)]
pub struct SpApi {
    config: SpApiConfig,
    marketplace: Marketplace,
    client: Arc<Client>,
}

impl SpApi {
    /// Wires up the client. No I/O happens here; the session is only authenticated when a fetch
    /// method is called.
    pub fn new(config: SpApiConfig, marketplace: Marketplace) -> Result<Self, SpApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent(concat!("spapi_tools/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| SpApiError::Initialization(e.to_string()))?;
        Ok(Self { config, marketplace, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.marketplace.endpoint())
    }

    /// Exchanges the refresh token for a session access token.
    async fn request_access_token(&self) -> Result<String, SpApiError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.config.refresh_token.reveal()),
            ("client_id", self.config.lwa_app_id.as_str()),
            ("client_secret", self.config.lwa_client_secret.reveal()),
        ];
        trace!("Requesting LWA access token");
        let response = self
            .client
            .post(LWA_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpApiError::Authentication(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
            return Err(SpApiError::Authentication(format!("Token exchange failed with status {status}. {message}")));
        }
        let token = response.json::<LwaTokenResponse>().await.map_err(|e| SpApiError::JsonError(e.to_string()))?;
        debug!("Obtained LWA access token. Expires in {}s", token.expires_in);
        Ok(token.access_token)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        access_token: &str,
    ) -> Result<T, SpApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.get(url).header("x-amz-access-token", access_token);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| SpApiError::JsonError(e.to_string()))
        } else if response.status().as_u16() == 429 {
            let message = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
            Err(SpApiError::Throttled(message))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
            Err(SpApiError::QueryError { status, message })
        }
    }

    /// Fetches one page of orders. The date bounds only apply to the first page; continuation
    /// pages are addressed by `next_token`.
    pub async fn get_orders_page(
        &self,
        access_token: &str,
        created_after: NaiveDate,
        created_before: NaiveDate,
        next_token: Option<&str>,
    ) -> Result<OrdersPayload, SpApiError> {
        let after = created_after.to_string();
        let before = created_before.to_string();
        let mut params = vec![("MarketplaceIds", self.marketplace.marketplace_id())];
        match next_token {
            Some(token) => params.push(("NextToken", token)),
            None => {
                params.push(("CreatedAfter", after.as_str()));
                params.push(("CreatedBefore", before.as_str()));
            },
        }
        let response = self.get_query::<GetOrdersResponse>(ORDERS_PATH, &params, access_token).await?;
        Ok(response.payload)
    }

    /// Fetches every order created in the window, following all continuation tokens, and maps the
    /// fully-assembled result into normalized records in upstream order. Any failure mid-pagination
    /// aborts the whole call; partial pages are never mapped. An empty window is `Ok(vec![])`.
    pub async fn fetch_all_orders(&self, window: &DateWindow) -> Result<Vec<AmazonOrder>, SpApiError> {
        let (created_after, created_before) = window.bounds()?;
        debug!("Fetching {} orders created between {created_after} and {created_before}", self.marketplace);
        let access_token = self.request_access_token().await?;
        let mut raw_orders = vec![];
        let mut next_token: Option<String> = None;
        loop {
            let page =
                self.get_orders_page(&access_token, created_after, created_before, next_token.as_deref()).await?;
            debug!("Fetched a page of {} orders. More pages: {}", page.orders.len(), page.next_token.is_some());
            raw_orders.extend(page.orders);
            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }
        let orders = raw_orders.iter().map(AmazonOrder::from_raw).collect::<Vec<AmazonOrder>>();
        info!("Fetched {} orders from {}", orders.len(), self.marketplace);
        Ok(orders)
    }
}
