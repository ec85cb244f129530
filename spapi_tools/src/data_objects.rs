use serde::Deserialize;
use serde_json::Value;

/// The envelope the orders API wraps every response in.
#[derive(Debug, Clone, Deserialize)]
pub struct GetOrdersResponse {
    pub payload: OrdersPayload,
}

/// One page of the orders query. The raw order objects stay untyped; normalization happens in
/// [crate::orders_from_payload] once all pages have been assembled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersPayload {
    #[serde(rename = "Orders", default)]
    pub orders: Vec<Value>,
    #[serde(rename = "NextToken", default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LwaTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
