use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_objects::OrdersPayload;

/// Column header for order sinks. Sinks are positional, so the order here is a contract:
/// [AmazonOrder::as_row] yields values in exactly this order.
pub const ORDER_COLUMNS: [&str; 8] = [
    "AmazonOrderId",
    "PurchaseDate",
    "OrderStatus",
    "OrderTotal",
    "PaymentMethod",
    "MarketplaceId",
    "ShipmentServiceLevelCategory",
    "OrderType",
];

/// A normalized order record. Every field is a string and defaults to the empty string; a record
/// never omits a field, no matter how sparse the upstream order object was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmazonOrder {
    pub order_id: String,
    pub purchase_date: String,
    pub order_status: String,
    pub order_total: String,
    pub payment_method: String,
    pub marketplace_id: String,
    pub shipment_service_level_category: String,
    pub order_type: String,
}

impl AmazonOrder {
    /// Maps a raw upstream order object into a normalized record. Missing keys become empty
    /// strings. `OrderTotal` is a nested extraction: anything other than a mapping with a string
    /// `Amount` yields an empty total. The purchase date is passed through verbatim.
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            order_id: str_field(raw, "AmazonOrderId"),
            purchase_date: str_field(raw, "PurchaseDate"),
            order_status: str_field(raw, "OrderStatus"),
            order_total: str_field(&raw["OrderTotal"], "Amount"),
            payment_method: str_field(raw, "PaymentMethod"),
            marketplace_id: str_field(raw, "MarketplaceId"),
            shipment_service_level_category: str_field(raw, "ShipmentServiceLevelCategory"),
            order_type: str_field(raw, "OrderType"),
        }
    }

    /// The record as sink cells, in [ORDER_COLUMNS] order.
    pub fn as_row(&self) -> [&str; 8] {
        [
            self.order_id.as_str(),
            self.purchase_date.as_str(),
            self.order_status.as_str(),
            self.order_total.as_str(),
            self.payment_method.as_str(),
            self.marketplace_id.as_str(),
            self.shipment_service_level_category.as_str(),
            self.order_type.as_str(),
        ]
    }
}

/// Converts every raw order in the payload, preserving upstream order.
pub fn orders_from_payload(payload: &OrdersPayload) -> Vec<AmazonOrder> {
    payload.orders.iter().map(AmazonOrder::from_raw).collect()
}

// Indexing a non-object `Value` yields `Null`, so this tolerates wrongly-typed parents as well as
// missing keys.
fn str_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}
