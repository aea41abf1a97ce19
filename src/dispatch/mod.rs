//! Action dispatch layer
//!
//! A user trigger becomes one request to the generation service and one
//! write into the triggering platform's output area:
//!
//! trigger → [`ActionRegistry`] lookup → request build (fields read fresh)
//! → transport send → render (response field or fixed error text)

mod fields;
mod platform;
mod registry;
mod render;
mod request;
mod table;
mod transport;

pub use fields::{FieldSource, FieldValues};
pub use platform::{FieldKind, InputField, Platform};
pub use registry::ActionRegistry;
pub use render::{ChannelSink, MemorySink, OutputSink, RenderStatus, RenderedOutput};
pub use table::{ActionId, ActionTable};
pub use transport::HttpTransport;
