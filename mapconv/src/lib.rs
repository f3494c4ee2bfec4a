//! Mapconv turns the declarative map description of a cross-platform application layer into typed calls against a
//! map engine.
//!
//! The application layer describes what it wants with loosely typed payloads: option dictionaries for the map and
//! for annotations, and tagged command arrays for camera moves. This crate decodes those payloads and forwards them
//! to capability traits implemented by the engine integration.
//!
//! # Main components
//!
//! * [`options`] decode option dictionaries into patch structs and apply them to sink traits
//!   ([`MapOptionsSink`](options::MapOptionsSink), [`SymbolOptionsSink`](options::SymbolOptionsSink),
//!   [`LineOptionsSink`](options::LineOptionsSink), [`CircleOptionsSink`](options::CircleOptionsSink)). A key that is
//!   absent or has a value of unexpected type is skipped.
//! * [`camera`] decodes camera commands into [`CameraUpdate`] and computes the resulting [`MapCamera`] using the
//!   engine's zoom/altitude relation.
//! * [`MapSurface`] is the only thing the camera interpreter needs from the engine: the current camera, viewport
//!   size and projection. [`MercatorSurface`] implements it without an engine.
//!
//! ```no_run
//! use mapconv::{interpret_camera_update, LatLng, MercatorSurface, ViewportSize};
//!
//! let surface = MercatorSurface::new(ViewportSize::new(300.0, 300.0)).with_zoom(LatLng::new(37.7, -122.4), 5.0);
//! let command = serde_json::json!(["zoomBy", 2.0]);
//! if let Some(camera) = interpret_camera_update(&command, &surface) {
//!     println!("new zoom: {}", camera.zoom(ViewportSize::new(300.0, 300.0)));
//! }
//! ```

pub mod camera;
pub mod geo;
pub mod options;
mod surface;

pub use camera::{
    interpret_camera_update, CameraPosition, CameraUpdate, CameraUpdateError, MapCamera, MAX_ZOOM, MIN_ZOOM,
};
pub use geo::{EdgePadding, LatLng, LatLngBounds, ScreenPoint, ViewportSize};
pub use surface::{MapSurface, MercatorSurface};
