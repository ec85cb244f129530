mod amazon_order;
mod api;
mod config;
mod error;
mod marketplace;
mod secret;
mod window;

mod data_objects;

pub use amazon_order::{orders_from_payload, AmazonOrder, ORDER_COLUMNS};
pub use api::{SpApi, LWA_TOKEN_URL};
pub use config::SpApiConfig;
pub use data_objects::{GetOrdersResponse, LwaTokenResponse, OrdersPayload};
pub use error::{ConfigurationError, SpApiError};
pub use marketplace::Marketplace;
pub use secret::Secret;
pub use window::DateWindow;
