//! Camera state and camera update commands.
//!
//! [`MapCamera`] is the engine-side description of the camera (altitude based), [`CameraPosition`] is the zoom based
//! form the application layer sends and receives. [`CameraUpdate`] is a single camera move command and
//! [`interpret_camera_update`] applies it to the camera of a [`MapSurface`](crate::MapSurface).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::{LatLng, ViewportSize};

mod altitude;
mod interpreter;
mod update;

pub use altitude::{
    altitude_for_zoom, meters_per_pixel_at_latitude, zoom_for_altitude, ANGULAR_FIELD_OF_VIEW,
    EARTH_RADIUS_M, LATITUDE_MAX, MAX_ZOOM, MIN_ZOOM, TILE_SIZE,
};
pub use interpreter::{apply_camera_update, interpret_camera_update};
pub use update::{CameraUpdate, CameraUpdateError};

/// Camera looking at the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    /// Point on the ground the camera looks at.
    pub center: LatLng,
    /// Distance from the camera to the ground, in meters.
    pub altitude: f64,
    /// Tilt from nadir, in degrees.
    pub pitch: f64,
    /// Rotation clockwise from north, in degrees.
    pub heading: f64,
}

impl MapCamera {
    /// Creates a camera looking straight down at `center`.
    pub const fn new(center: LatLng, altitude: f64) -> Self {
        Self {
            center,
            altitude,
            pitch: 0.0,
            heading: 0.0,
        }
    }

    /// Sets the pitch.
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    /// Sets the heading.
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Builds a camera from its zoom based description.
    pub fn from_position(position: &CameraPosition, size: ViewportSize) -> Self {
        Self {
            center: position.target,
            altitude: altitude_for_zoom(position.zoom, position.tilt, position.target.latitude, size),
            pitch: position.tilt,
            heading: position.bearing,
        }
    }

    /// Zoom level currently shown by the camera.
    pub fn zoom(&self, size: ViewportSize) -> f64 {
        zoom_for_altitude(self.altitude, self.pitch, self.center.latitude, size)
    }

    /// Zoom based description of the camera.
    pub fn to_position(&self, size: ViewportSize) -> CameraPosition {
        CameraPosition {
            target: self.center,
            zoom: self.zoom(size),
            tilt: self.pitch,
            bearing: self.heading,
        }
    }
}

/// Camera description exchanged with the application layer.
///
/// Encoded as `{"target": [lat, lon], "zoom": z, "tilt": t, "bearing": b}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    /// Point the camera looks at.
    pub target: LatLng,
    /// Zoom level.
    pub zoom: f64,
    /// Tilt in degrees.
    pub tilt: f64,
    /// Bearing in degrees clockwise from north.
    pub bearing: f64,
}

impl CameraPosition {
    /// Decodes a camera position dictionary. All four keys are required.
    pub fn from_json(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        Self::deserialize(value).ok()
    }

    /// Encodes the position as a dictionary.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
