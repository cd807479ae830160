use super::model::OrderItemAppend;
use crate::error::ReporterError;
use uuid::Uuid;

/// The host's side-effect collaborators for the upsell flow.
///
/// Both calls are fire-and-forget from the flow's point of view: their
/// failures are logged and dropped.
#[async_trait::async_trait]
pub trait UpsellReporter: Send + Sync {
    /// Records that an upsell was shown.
    async fn report_impression(&self, upsell_id: Uuid) -> Result<(), ReporterError>;

    /// Appends an accepted upsell to an already-placed order.
    async fn append_order_item(
        &self,
        order_id: Uuid,
        item: OrderItemAppend,
    ) -> Result<(), ReporterError>;
}

/// Reporter that only logs. Useful for previews and the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter;

#[async_trait::async_trait]
impl UpsellReporter for LoggingReporter {
    async fn report_impression(&self, upsell_id: Uuid) -> Result<(), ReporterError> {
        tracing::info!(%upsell_id, "impression");
        Ok(())
    }

    async fn append_order_item(
        &self,
        order_id: Uuid,
        item: OrderItemAppend,
    ) -> Result<(), ReporterError> {
        tracing::info!(
            %order_id,
            product_id = %item.product_id,
            quantity = item.quantity,
            upsell_id = %item.upsell_id,
            "append order item"
        );
        Ok(())
    }
}
