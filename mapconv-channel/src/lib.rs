//! Method channel adapter for `mapconv`.
//!
//! A platform plugin receives method calls such as `camera#move` or `symbol#add` from the application layer and
//! passes them to a [`MapChannel`]. The channel decodes the arguments with `mapconv` and drives a [`MapHost`]: the
//! engine integration that owns the real map.
//!
//! ```no_run
//! # fn run<H: mapconv_channel::MapHost>(host: H) -> anyhow::Result<()> {
//! use mapconv_channel::{init_logger, LoggingConfig, MapChannel, MethodCall};
//!
//! init_logger(&LoggingConfig::default())?;
//! let channel = MapChannel::new(0, host);
//! let reply = channel.handle(&MethodCall::new(
//!     "camera#animate",
//!     serde_json::json!({"cameraUpdate": ["zoomIn"]}),
//! ))?;
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

mod annotations;
mod channel;
mod controller;
mod host;
mod logging;

pub use annotations::{Annotation, AnnotationKind, AnnotationOptions, AnnotationRegistry};
pub use channel::MapChannel;
pub use controller::{ChannelError, MapController, MethodCall, OutgoingEvent};
pub use host::MapHost;
pub use logging::{init_logger, LoggingConfig};
