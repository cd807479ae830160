use super::model::{AcceptedItem, OrderItemAppend, UpsellDefinition, UpsellMode};
use crate::error::FlowError;
use uuid::Uuid;

/// Where the flow is in its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Showing(usize),
    Completed,
}

/// Side effects a transition asks the host to perform, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEffect {
    /// Fire-and-forget impression tracking for the upsell about to be shown.
    ReportImpression { index: usize, upsell_id: Uuid },
    /// Render the upsell at `index`.
    Show { index: usize, upsell_id: Uuid },
    /// Fire-and-forget mutation of the placed order.
    AppendOrderItem { order_id: Uuid, item: OrderItemAppend },
    /// The flow ended; hand the accepted items to the completion callback.
    Complete { accepted: Vec<AcceptedItem> },
}

pub struct UpsellFlowBuilder {
    queue: Vec<UpsellDefinition>,
    mode: UpsellMode,
    order_id: Option<Uuid>,
}

impl UpsellFlowBuilder {
    pub fn new(queue: Vec<UpsellDefinition>) -> Self {
        Self {
            queue,
            mode: UpsellMode::default(),
            order_id: None,
        }
    }

    pub fn mode(mut self, mode: UpsellMode) -> Self {
        self.mode = mode;
        self
    }

    /// Binds the placed order that accepted upsells are appended to.
    pub fn order_id(mut self, order_id: Uuid) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn build(self) -> UpsellFlow {
        let impressed = vec![false; self.queue.len()];
        UpsellFlow {
            queue: self.queue,
            mode: self.mode,
            order_id: self.order_id,
            state: FlowState::Idle,
            accepted: Vec::new(),
            impressed,
        }
    }
}

/// The sequential upsell state machine.
///
/// Transitions are synchronous and return the effects to perform. Upsells
/// without a product are skipped inside the transition that reaches them,
/// so they never produce a `Show` or an impression.
#[derive(Debug, Clone)]
pub struct UpsellFlow {
    queue: Vec<UpsellDefinition>,
    mode: UpsellMode,
    order_id: Option<Uuid>,
    state: FlowState,
    accepted: Vec<AcceptedItem>,
    impressed: Vec<bool>,
}

impl UpsellFlow {
    pub fn builder(queue: Vec<UpsellDefinition>) -> UpsellFlowBuilder {
        UpsellFlowBuilder::new(queue)
    }

    pub fn new(queue: Vec<UpsellDefinition>) -> Self {
        UpsellFlowBuilder::new(queue).build()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn mode(&self) -> UpsellMode {
        self.mode
    }

    pub fn queue(&self) -> &[UpsellDefinition] {
        &self.queue
    }

    pub fn accepted_items(&self) -> &[AcceptedItem] {
        &self.accepted
    }

    pub fn is_completed(&self) -> bool {
        self.state == FlowState::Completed
    }

    /// The upsell currently on screen.
    pub fn current(&self) -> Option<&UpsellDefinition> {
        match self.state {
            FlowState::Showing(i) => self.queue.get(i),
            _ => None,
        }
    }

    pub fn start(&mut self) -> Result<Vec<FlowEffect>, FlowError> {
        if self.state != FlowState::Idle {
            return Err(FlowError::AlreadyStarted);
        }
        tracing::debug!(queued = self.queue.len(), mode = ?self.mode, "starting upsell flow");
        let mut effects = Vec::new();
        self.enter(0, &mut effects);
        Ok(effects)
    }

    /// Records `item` for the current upsell and moves on.
    ///
    /// `item` must come from the upsell on screen; anything else is
    /// rejected without changing state.
    pub fn accept(&mut self, item: AcceptedItem) -> Result<Vec<FlowEffect>, FlowError> {
        let index = self.showing_index("accept")?;
        let expected = self.queue[index].id;
        if item.upsell_id != expected {
            return Err(FlowError::UpsellMismatch {
                expected,
                got: item.upsell_id,
            });
        }
        let mut effects = Vec::new();

        if self.mode == UpsellMode::PostPurchase {
            if let Some(order_id) = self.order_id {
                effects.push(FlowEffect::AppendOrderItem {
                    order_id,
                    item: OrderItemAppend::from(&item),
                });
            }
        }
        tracing::info!(index, upsell_id = %item.upsell_id, "upsell accepted");
        self.accepted.push(item);

        self.enter(index + 1, &mut effects);
        Ok(effects)
    }

    pub fn decline(&mut self) -> Result<Vec<FlowEffect>, FlowError> {
        let index = self.showing_index("decline")?;
        tracing::debug!(index, "upsell declined");
        let mut effects = Vec::new();
        self.enter(index + 1, &mut effects);
        Ok(effects)
    }

    pub(super) fn showing_index(&self, action: &'static str) -> Result<usize, FlowError> {
        match self.state {
            FlowState::Showing(i) => Ok(i),
            FlowState::Idle => Err(FlowError::NotStarted { action }),
            FlowState::Completed => Err(FlowError::AlreadyCompleted { action }),
        }
    }

    /// Moves to the first showable upsell at or after `from`, or completes.
    fn enter(&mut self, from: usize, effects: &mut Vec<FlowEffect>) {
        let next = (from..self.queue.len()).find(|&i| {
            let showable = self.queue[i].is_showable();
            if !showable {
                tracing::debug!(index = i, upsell_id = %self.queue[i].id, "skipping upsell without product");
            }
            showable
        });

        match next {
            Some(index) => {
                self.state = FlowState::Showing(index);
                let upsell_id = self.queue[index].id;
                if !self.impressed[index] {
                    self.impressed[index] = true;
                    effects.push(FlowEffect::ReportImpression { index, upsell_id });
                }
                effects.push(FlowEffect::Show { index, upsell_id });
            }
            None => {
                self.state = FlowState::Completed;
                tracing::info!(accepted = self.accepted.len(), "upsell flow completed");
                effects.push(FlowEffect::Complete {
                    accepted: self.accepted.clone(),
                });
            }
        }
    }
}
