use serde_json::Value;
use thiserror::Error;

use crate::camera::CameraPosition;
use crate::geo::{LatLng, LatLngBounds, ScreenPoint};

/// Error decoding a camera update command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraUpdateError {
    /// The command is not an array or the array is empty.
    #[error("camera update must be a non-empty array")]
    NotAnArray,

    /// The first element of the command is not a string.
    #[error("camera update name must be a string")]
    InvalidName,

    /// The command name is not one of the known commands.
    #[error("{0} not implemented")]
    UnknownCommand(String),

    /// A positional argument is missing or has a wrong type.
    #[error("argument {index} of {command} is missing or malformed")]
    InvalidArgument {
        /// Name of the command.
        command: &'static str,
        /// Position of the argument in the command array.
        index: usize,
    },
}

/// A single camera move command.
///
/// Decoded from a command array whose first element is the command name and the rest are positional
/// arguments, e.g. `["newLatLngZoom", [37.7, -122.4], 10.0]`.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraUpdate {
    /// Replace the whole camera.
    NewCameraPosition(CameraPosition),
    /// Move the center, keep everything else.
    NewLatLng(LatLng),
    /// Frame the bounds with uniform padding on every side.
    NewLatLngBounds {
        /// Area to frame.
        bounds: LatLngBounds,
        /// Padding in logical pixels.
        padding: f64,
    },
    /// Move the center and set the zoom level.
    NewLatLngZoom {
        /// New center.
        target: LatLng,
        /// New zoom level.
        zoom: f64,
    },
    /// Pan the map by a screen offset.
    ScrollBy {
        /// Horizontal offset in logical pixels.
        dx: f64,
        /// Vertical offset in logical pixels.
        dy: f64,
    },
    /// Change the zoom level by a delta, optionally recentering on a screen point.
    ZoomBy {
        /// Zoom level delta.
        delta: f64,
        /// Screen point the map is recentered on.
        focus: Option<ScreenPoint>,
    },
    /// Zoom in by one level.
    ZoomIn,
    /// Zoom out by one level.
    ZoomOut,
    /// Set the zoom level.
    ZoomTo(f64),
    /// Set the bearing in degrees.
    BearingTo(f64),
    /// Set the tilt in degrees.
    TiltTo(f64),
}

impl CameraUpdate {
    /// Decodes a command array.
    pub fn from_json(value: &Value) -> Result<Self, CameraUpdateError> {
        let items = value
            .as_array()
            .filter(|items| !items.is_empty())
            .ok_or(CameraUpdateError::NotAnArray)?;
        let name = items[0].as_str().ok_or(CameraUpdateError::InvalidName)?;
        let args = Args { items };

        let update = match name {
            "newCameraPosition" => {
                Self::NewCameraPosition(args.decode(name_of::NEW_CAMERA_POSITION, 1, CameraPosition::from_json)?)
            }
            "newLatLng" => Self::NewLatLng(args.decode(name_of::NEW_LAT_LNG, 1, LatLng::from_json)?),
            "newLatLngBounds" => Self::NewLatLngBounds {
                bounds: args.decode(name_of::NEW_LAT_LNG_BOUNDS, 1, LatLngBounds::from_json)?,
                padding: args.number(name_of::NEW_LAT_LNG_BOUNDS, 2)?,
            },
            "newLatLngZoom" => Self::NewLatLngZoom {
                target: args.decode(name_of::NEW_LAT_LNG_ZOOM, 1, LatLng::from_json)?,
                zoom: args.number(name_of::NEW_LAT_LNG_ZOOM, 2)?,
            },
            "scrollBy" => Self::ScrollBy {
                dx: args.number(name_of::SCROLL_BY, 1)?,
                dy: args.number(name_of::SCROLL_BY, 2)?,
            },
            "zoomBy" => Self::ZoomBy {
                delta: args.number(name_of::ZOOM_BY, 1)?,
                focus: match items.get(2) {
                    None | Some(Value::Null) => None,
                    Some(_) => Some(args.decode(name_of::ZOOM_BY, 2, ScreenPoint::from_json)?),
                },
            },
            "zoomIn" => Self::ZoomIn,
            "zoomOut" => Self::ZoomOut,
            "zoomTo" => Self::ZoomTo(args.number(name_of::ZOOM_TO, 1)?),
            "bearingTo" => Self::BearingTo(args.number(name_of::BEARING_TO, 1)?),
            "tiltTo" => Self::TiltTo(args.number(name_of::TILT_TO, 1)?),
            other => return Err(CameraUpdateError::UnknownCommand(other.to_string())),
        };

        Ok(update)
    }

    /// Name of the command as it appears in the command array.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewCameraPosition(_) => name_of::NEW_CAMERA_POSITION,
            Self::NewLatLng(_) => name_of::NEW_LAT_LNG,
            Self::NewLatLngBounds { .. } => name_of::NEW_LAT_LNG_BOUNDS,
            Self::NewLatLngZoom { .. } => name_of::NEW_LAT_LNG_ZOOM,
            Self::ScrollBy { .. } => name_of::SCROLL_BY,
            Self::ZoomBy { .. } => name_of::ZOOM_BY,
            Self::ZoomIn => name_of::ZOOM_IN,
            Self::ZoomOut => name_of::ZOOM_OUT,
            Self::ZoomTo(_) => name_of::ZOOM_TO,
            Self::BearingTo(_) => name_of::BEARING_TO,
            Self::TiltTo(_) => name_of::TILT_TO,
        }
    }
}

mod name_of {
    pub(super) const NEW_CAMERA_POSITION: &str = "newCameraPosition";
    pub(super) const NEW_LAT_LNG: &str = "newLatLng";
    pub(super) const NEW_LAT_LNG_BOUNDS: &str = "newLatLngBounds";
    pub(super) const NEW_LAT_LNG_ZOOM: &str = "newLatLngZoom";
    pub(super) const SCROLL_BY: &str = "scrollBy";
    pub(super) const ZOOM_BY: &str = "zoomBy";
    pub(super) const ZOOM_IN: &str = "zoomIn";
    pub(super) const ZOOM_OUT: &str = "zoomOut";
    pub(super) const ZOOM_TO: &str = "zoomTo";
    pub(super) const BEARING_TO: &str = "bearingTo";
    pub(super) const TILT_TO: &str = "tiltTo";
}

struct Args<'a> {
    items: &'a [Value],
}

impl Args<'_> {
    fn decode<T>(
        &self,
        command: &'static str,
        index: usize,
        decode: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, CameraUpdateError> {
        self.items
            .get(index)
            .and_then(decode)
            .ok_or(CameraUpdateError::InvalidArgument { command, index })
    }

    fn number(&self, command: &'static str, index: usize) -> Result<f64, CameraUpdateError> {
        self.decode(command, index, Value::as_f64)
    }
}
