use super::machine::{FlowEffect, FlowState, UpsellFlow};
use super::model::{AcceptedItem, UpsellDefinition};
use super::reporter::UpsellReporter;
use crate::error::FlowError;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Called once with the accepted items when the flow completes.
pub type CompletionCallback = Box<dyn FnOnce(Vec<AcceptedItem>) + Send>;

pub struct UpsellSessionBuilder {
    flow: UpsellFlow,
    reporter: Arc<dyn UpsellReporter>,
    runtime: Option<Handle>,
    on_complete: Option<CompletionCallback>,
}

impl UpsellSessionBuilder {
    pub fn new(flow: UpsellFlow, reporter: Arc<dyn UpsellReporter>) -> Self {
        Self {
            flow,
            reporter,
            runtime: None,
            on_complete: None,
        }
    }

    /// Runtime to spawn effect tasks on. Defaults to the current one.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Vec<AcceptedItem>) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<UpsellSession, FlowError> {
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| FlowError::NoRuntime)?,
        };
        Ok(UpsellSession {
            flow: self.flow,
            reporter: self.reporter,
            runtime,
            on_complete: self.on_complete,
            in_flight: Vec::new(),
        })
    }
}

/// Drives an [`UpsellFlow`] and performs its effects.
///
/// Impressions and order appends run as detached tasks on the runtime;
/// transitions never wait for them. Their failures are logged at `warn`
/// and otherwise ignored.
pub struct UpsellSession {
    flow: UpsellFlow,
    reporter: Arc<dyn UpsellReporter>,
    runtime: Handle,
    on_complete: Option<CompletionCallback>,
    in_flight: Vec<JoinHandle<()>>,
}

impl UpsellSession {
    pub fn builder(flow: UpsellFlow, reporter: Arc<dyn UpsellReporter>) -> UpsellSessionBuilder {
        UpsellSessionBuilder::new(flow, reporter)
    }

    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn current(&self) -> Option<&UpsellDefinition> {
        self.flow.current()
    }

    pub fn flow(&self) -> &UpsellFlow {
        &self.flow
    }

    pub fn start(&mut self) -> Result<FlowState, FlowError> {
        let effects = self.flow.start()?;
        self.dispatch(effects);
        Ok(self.flow.state())
    }

    pub fn accept(&mut self, item: AcceptedItem) -> Result<FlowState, FlowError> {
        let effects = self.flow.accept(item)?;
        self.dispatch(effects);
        Ok(self.flow.state())
    }

    /// Accepts the current upsell with its default variant.
    pub fn accept_current(&mut self, quantity: i64) -> Result<FlowState, FlowError> {
        let index = self.flow.showing_index("accept")?;
        match self.flow.queue()[index].accept_item(None, quantity) {
            Some(item) => self.accept(item),
            // Showing states always carry a product.
            None => self.decline(),
        }
    }

    pub fn decline(&mut self) -> Result<FlowState, FlowError> {
        let effects = self.flow.decline()?;
        self.dispatch(effects);
        Ok(self.flow.state())
    }

    /// Waits for every effect task spawned so far. Tasks are never
    /// cancelled; a panicked task is logged.
    pub async fn settle(&mut self) {
        for handle in self.in_flight.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "upsell effect task failed");
            }
        }
    }

    fn dispatch(&mut self, effects: Vec<FlowEffect>) {
        self.in_flight.retain(|h| !h.is_finished());

        for effect in effects {
            match effect {
                FlowEffect::ReportImpression { index, upsell_id } => {
                    let reporter = Arc::clone(&self.reporter);
                    self.in_flight.push(self.runtime.spawn(async move {
                        if let Err(e) = reporter.report_impression(upsell_id).await {
                            tracing::warn!(index, %upsell_id, error = %e, "impression report failed");
                        }
                    }));
                }
                FlowEffect::AppendOrderItem { order_id, item } => {
                    let reporter = Arc::clone(&self.reporter);
                    self.in_flight.push(self.runtime.spawn(async move {
                        let upsell_id = item.upsell_id;
                        if let Err(e) = reporter.append_order_item(order_id, item).await {
                            tracing::warn!(%order_id, %upsell_id, error = %e, "order append failed");
                        }
                    }));
                }
                FlowEffect::Show { index, upsell_id } => {
                    tracing::debug!(index, %upsell_id, "showing upsell");
                }
                FlowEffect::Complete { accepted } => {
                    if let Some(callback) = self.on_complete.take() {
                        callback(accepted);
                    }
                }
            }
        }
    }
}
