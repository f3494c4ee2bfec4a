use serde_json::Value;

use super::value::{boolean, nullable_number, string};
use super::{field, OptionsMap};
use crate::geo::LatLngBounds;

/// How the camera follows the user location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingMode {
    /// The camera does not follow the user.
    None = 0,
    /// The camera follows the user location.
    Follow = 1,
    /// The camera follows the user location and rotates with the device heading.
    FollowWithHeading = 2,
    /// The camera follows the user location and rotates with the course of movement.
    FollowWithCourse = 3,
}

impl TryFrom<u64> for TrackingMode {
    type Error = u64;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Follow),
            2 => Ok(Self::FollowWithHeading),
            3 => Ok(Self::FollowWithCourse),
            other => Err(other),
        }
    }
}

/// Receiver of map-level options.
pub trait MapOptionsSink {
    /// Restricts the camera target to the bounds.
    fn set_camera_target_bounds(&mut self, bounds: LatLngBounds);
    /// Shows or hides the compass.
    fn set_compass_enabled(&mut self, compass_enabled: bool);
    /// Sets zoom limits. `None` keeps the engine default for that side.
    fn set_min_max_zoom_preference(&mut self, min: Option<f64>, max: Option<f64>);
    /// Sets the style URL or JSON.
    fn set_style_string(&mut self, style_string: &str);
    /// Enables the rotate gesture.
    fn set_rotate_gestures_enabled(&mut self, rotate_gestures_enabled: bool);
    /// Enables the scroll gesture.
    fn set_scroll_gestures_enabled(&mut self, scroll_gestures_enabled: bool);
    /// Enables the tilt gesture.
    fn set_tilt_gestures_enabled(&mut self, tilt_gestures_enabled: bool);
    /// Enables reporting of camera moves to the application layer.
    fn set_track_camera_position(&mut self, track_camera_position: bool);
    /// Enables the zoom gesture.
    fn set_zoom_gestures_enabled(&mut self, zoom_gestures_enabled: bool);
    /// Shows or hides the user location.
    fn set_my_location_enabled(&mut self, my_location_enabled: bool);
    /// Sets how the camera follows the user location.
    fn set_my_location_tracking_mode(&mut self, my_location_tracking_mode: TrackingMode);
}

/// Decoded map options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapOptions {
    /// `cameraTargetBounds`
    pub camera_target_bounds: Option<LatLngBounds>,
    /// `compassEnabled`
    pub compass_enabled: Option<bool>,
    /// `minMaxZoomPreference`
    pub min_max_zoom_preference: Option<(Option<f64>, Option<f64>)>,
    /// `styleString`
    pub style_string: Option<String>,
    /// `rotateGesturesEnabled`
    pub rotate_gestures_enabled: Option<bool>,
    /// `scrollGesturesEnabled`
    pub scroll_gestures_enabled: Option<bool>,
    /// `tiltGesturesEnabled`
    pub tilt_gestures_enabled: Option<bool>,
    /// `trackCameraPosition`
    pub track_camera_position: Option<bool>,
    /// `zoomGesturesEnabled`
    pub zoom_gestures_enabled: Option<bool>,
    /// `myLocationEnabled`
    pub my_location_enabled: Option<bool>,
    /// `myLocationTrackingMode`
    pub my_location_tracking_mode: Option<TrackingMode>,
}

impl MapOptions {
    /// Decodes an option dictionary. Anything but a dictionary decodes to empty options.
    pub fn from_json(value: &Value) -> Self {
        value.as_object().map(Self::from_map).unwrap_or_default()
    }

    /// Decodes recognized keys of the dictionary.
    pub fn from_map(options: &OptionsMap) -> Self {
        Self {
            camera_target_bounds: field(options, "cameraTargetBounds", LatLngBounds::from_json),
            compass_enabled: field(options, "compassEnabled", boolean),
            min_max_zoom_preference: field(options, "minMaxZoomPreference", zoom_preference),
            style_string: field(options, "styleString", string),
            rotate_gestures_enabled: field(options, "rotateGesturesEnabled", boolean),
            scroll_gestures_enabled: field(options, "scrollGesturesEnabled", boolean),
            tilt_gestures_enabled: field(options, "tiltGesturesEnabled", boolean),
            track_camera_position: field(options, "trackCameraPosition", boolean),
            zoom_gestures_enabled: field(options, "zoomGesturesEnabled", boolean),
            my_location_enabled: field(options, "myLocationEnabled", boolean),
            my_location_tracking_mode: field(options, "myLocationTrackingMode", |v| {
                TrackingMode::try_from(v.as_u64()?).ok()
            }),
        }
    }

    /// Calls the sink setter of every present option.
    pub fn apply<S: MapOptionsSink + ?Sized>(&self, sink: &mut S) {
        if let Some(bounds) = self.camera_target_bounds {
            sink.set_camera_target_bounds(bounds);
        }
        if let Some(enabled) = self.compass_enabled {
            sink.set_compass_enabled(enabled);
        }
        if let Some((min, max)) = self.min_max_zoom_preference {
            sink.set_min_max_zoom_preference(min, max);
        }
        if let Some(style) = &self.style_string {
            sink.set_style_string(style);
        }
        if let Some(enabled) = self.rotate_gestures_enabled {
            sink.set_rotate_gestures_enabled(enabled);
        }
        if let Some(enabled) = self.scroll_gestures_enabled {
            sink.set_scroll_gestures_enabled(enabled);
        }
        if let Some(enabled) = self.tilt_gestures_enabled {
            sink.set_tilt_gestures_enabled(enabled);
        }
        if let Some(track) = self.track_camera_position {
            sink.set_track_camera_position(track);
        }
        if let Some(enabled) = self.zoom_gestures_enabled {
            sink.set_zoom_gestures_enabled(enabled);
        }
        if let Some(enabled) = self.my_location_enabled {
            sink.set_my_location_enabled(enabled);
        }
        if let Some(mode) = self.my_location_tracking_mode {
            sink.set_my_location_tracking_mode(mode);
        }
    }
}

/// Decodes map options and applies them to the sink.
pub fn interpret_map_options<S: MapOptionsSink + ?Sized>(options: &Value, sink: &mut S) {
    MapOptions::from_json(options).apply(sink);
}

fn zoom_preference(value: &Value) -> Option<(Option<f64>, Option<f64>)> {
    match value.as_array()?.as_slice() {
        [min, max] => Some((nullable_number(min)?, nullable_number(max)?)),
        _ => None,
    }
}
