//! Translation of option dictionaries into sink calls.
//!
//! Every option dictionary is first decoded into a patch struct with one `Option` field per recognized key. A field
//! is `None` when the key is absent or its value has an unexpected type; such keys are skipped without error.
//! Applying a patch to a sink calls the setter of every present field exactly once.
//!
//! ```
//! use mapconv::options::{interpret_map_options, MapOptionsSink};
//! # use mapconv::options::TrackingMode;
//! # use mapconv::LatLngBounds;
//! # struct Ui { compass: bool }
//! # impl MapOptionsSink for Ui {
//! #     fn set_camera_target_bounds(&mut self, _: LatLngBounds) {}
//! #     fn set_compass_enabled(&mut self, enabled: bool) { self.compass = enabled }
//! #     fn set_min_max_zoom_preference(&mut self, _: Option<f64>, _: Option<f64>) {}
//! #     fn set_style_string(&mut self, _: &str) {}
//! #     fn set_rotate_gestures_enabled(&mut self, _: bool) {}
//! #     fn set_scroll_gestures_enabled(&mut self, _: bool) {}
//! #     fn set_tilt_gestures_enabled(&mut self, _: bool) {}
//! #     fn set_track_camera_position(&mut self, _: bool) {}
//! #     fn set_zoom_gestures_enabled(&mut self, _: bool) {}
//! #     fn set_my_location_enabled(&mut self, _: bool) {}
//! #     fn set_my_location_tracking_mode(&mut self, _: TrackingMode) {}
//! # }
//! let mut ui = Ui { compass: false };
//! interpret_map_options(&serde_json::json!({"compassEnabled": true}), &mut ui);
//! assert!(ui.compass);
//! ```

use log::trace;
use serde_json::Value;

mod circle;
mod line;
mod map;
mod symbol;
mod value;

pub use circle::{interpret_circle_options, CircleOptions, CircleOptionsSink};
pub use line::{interpret_line_options, LineOptions, LineOptionsSink};
pub use map::{interpret_map_options, MapOptions, MapOptionsSink, TrackingMode};
pub use symbol::{interpret_symbol_options, SymbolOptions, SymbolOptionsSink};

/// Untyped option dictionary as received from the application layer.
pub type OptionsMap = serde_json::Map<String, Value>;

/// Extracts the option dictionary of an annotation call.
///
/// Annotation options arrive either as a dictionary or as a one-element array wrapping the dictionary.
pub fn annotation_options(value: &Value) -> Option<&OptionsMap> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first()?.as_object(),
        _ => None,
    }
}

fn field<T>(options: &OptionsMap, key: &str, decode: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
    let value = options.get(key)?;
    let decoded = decode(value);
    if decoded.is_none() {
        trace!("Ignoring option {key}: unexpected value {value}");
    }

    decoded
}
