use log::*;
use spapi_tools::{AmazonOrder, ConfigurationError, DateWindow, Marketplace, SpApi, SpApiConfig, SpApiError};
use thiserror::Error;

use crate::sinks::{OutputSink, SinkError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Anything that can produce the normalized orders for a date window. [SpApi] is the production
/// implementation; tests substitute a mock.
#[allow(async_fn_in_trait)]
pub trait OrderSource {
    async fn fetch_orders(&self, window: &DateWindow) -> Result<Vec<AmazonOrder>, SpApiError>;
}

impl OrderSource for SpApi {
    async fn fetch_orders(&self, window: &DateWindow) -> Result<Vec<AmazonOrder>, SpApiError> {
        self.fetch_all_orders(window).await
    }
}

/// Runs one fetch-and-emit cycle. An upstream failure is reported once, the sink is left
/// untouched and zero records are emitted; the run itself still completes, so a scheduled
/// invocation survives a flaky API. An empty result is written out normally.
pub async fn run_export<S: OrderSource>(
    source: &S,
    window: &DateWindow,
    sink: &mut dyn OutputSink,
) -> Result<usize, ExportError> {
    let orders = match source.fetch_orders(window).await {
        Ok(orders) => orders,
        Err(e) => {
            eprintln!("Error fetching orders: {e}");
            return Ok(0);
        },
    };
    debug!("Writing {} orders to the sink", orders.len());
    sink.write(&orders)?;
    Ok(orders.len())
}

/// Loads credentials through `lookup`, wires the API client and delegates to [run_export].
/// Credential loading fails fast, before the client exists, so no network call can precede it.
pub async fn load_and_run<L>(
    lookup: L,
    marketplace: Marketplace,
    window: DateWindow,
    sink: &mut dyn OutputSink,
) -> Result<usize, ExportError>
where
    L: Fn(&str) -> Option<String>,
{
    let config = SpApiConfig::try_from_lookup(lookup)?;
    let api = match SpApi::new(config, marketplace) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error creating SP-API client: {e}");
            return Ok(0);
        },
    };
    run_export(&api, &window, sink).await
}

#[cfg(test)]
mod test {
    use mockall::mock;

    use super::*;

    mock! {
        pub Source {}
        impl OrderSource for Source {
            async fn fetch_orders(&self, window: &DateWindow) -> Result<Vec<AmazonOrder>, SpApiError>;
        }
    }

    mock! {
        pub Sink {}
        impl OutputSink for Sink {
            fn write(&mut self, orders: &[AmazonOrder]) -> Result<(), SinkError>;
        }
    }

    fn window() -> DateWindow {
        DateWindow::new("2024-01-01".parse().unwrap(), Some("2024-02-01".parse().unwrap()))
    }

    fn order(id: &str) -> AmazonOrder {
        AmazonOrder { order_id: id.to_string(), ..Default::default() }
    }

    #[tokio::test]
    async fn successful_fetch_writes_every_record_to_the_sink() {
        let mut source = MockSource::new();
        source.expect_fetch_orders().times(1).returning(|_| Ok(vec![order("X1"), order("X2")]));
        let mut sink = MockSink::new();
        sink.expect_write()
            .times(1)
            .withf(|orders| orders.len() == 2 && orders[0].order_id == "X1" && orders[1].order_id == "X2")
            .returning(|_| Ok(()));
        let count = run_export(&source, &window(), &mut sink).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn an_empty_window_is_written_not_treated_as_an_error() {
        let mut source = MockSource::new();
        source.expect_fetch_orders().times(1).returning(|_| Ok(vec![]));
        let mut sink = MockSink::new();
        sink.expect_write().times(1).withf(|orders| orders.is_empty()).returning(|_| Ok(()));
        let count = run_export(&source, &window(), &mut sink).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_once_and_skips_the_sink() {
        let mut source = MockSource::new();
        source
            .expect_fetch_orders()
            .times(1)
            .returning(|_| Err(SpApiError::QueryError { status: 503, message: "ServiceUnavailable".to_string() }));
        // No expectations: any write would panic the test.
        let mut sink = MockSink::new();
        let count = run_export(&source, &window(), &mut sink).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn sink_failures_are_fatal() {
        let mut source = MockSource::new();
        source.expect_fetch_orders().times(1).returning(|_| Ok(vec![order("X1")]));
        let mut sink = MockSink::new();
        sink.expect_write().times(1).returning(|_| Err(SinkError("disk full".to_string())));
        let err = run_export(&source, &window(), &mut sink).await.unwrap_err();
        assert!(matches!(err, ExportError::Sink(_)));
    }

    #[tokio::test]
    async fn missing_credentials_abort_before_any_collaborator_is_invoked() {
        let mut sink = MockSink::new();
        let lookup = |key: &str| (key != "AWS_SECRET_KEY").then(|| format!("value-for-{key}"));
        let err = load_and_run(lookup, Marketplace::Us, window(), &mut sink).await.unwrap_err();
        assert!(matches!(err, ExportError::Configuration(_)));
        assert!(err.to_string().contains("AWS_SECRET_KEY"));
        // The sink had no expectations, so reaching it would have panicked; checkpoint for good
        // measure.
        sink.checkpoint();
    }
}
