//! The post-checkout upsell flow.
//!
//! [`resolve_queue`] picks the upsells for a purchase, [`UpsellFlow`] is the
//! pure state machine that walks them one at a time, and [`UpsellSession`]
//! performs the flow's effects on a Tokio runtime through an
//! [`UpsellReporter`].

pub mod machine;
pub mod model;
pub mod queue;
pub mod reporter;
pub mod session;

pub use machine::{FlowEffect, FlowState, UpsellFlow, UpsellFlowBuilder};
pub use model::{
    AcceptedItem, AddButtonStyle, Countdown, DeclineButtonStyle, OrderItemAppend, ProductVariant,
    TriggerType, UpsellDefinition, UpsellMode, UpsellProduct, UpsellSettings,
};
pub use queue::resolve_queue;
pub use reporter::{LoggingReporter, UpsellReporter};
pub use session::{CompletionCallback, UpsellSession, UpsellSessionBuilder};
