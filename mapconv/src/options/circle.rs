use serde_json::Value;

use super::value::{boolean, float, string};
use super::{annotation_options, field, OptionsMap};
use crate::geo::LatLng;

/// Receiver of circle annotation options.
pub trait CircleOptionsSink {
    /// Sets the circle center.
    fn set_geometry(&mut self, geometry: LatLng);
    /// Sets the radius in pixels.
    fn set_circle_radius(&mut self, circle_radius: f32);
    /// Sets the fill color.
    fn set_circle_color(&mut self, circle_color: &str);
    /// Sets the fill blur.
    fn set_circle_blur(&mut self, circle_blur: f32);
    /// Sets the fill opacity.
    fn set_circle_opacity(&mut self, circle_opacity: f32);
    /// Sets the stroke width in pixels.
    fn set_circle_stroke_width(&mut self, circle_stroke_width: f32);
    /// Sets the stroke color.
    fn set_circle_stroke_color(&mut self, circle_stroke_color: &str);
    /// Sets the stroke opacity.
    fn set_circle_stroke_opacity(&mut self, circle_stroke_opacity: f32);
    /// Allows dragging the circle.
    fn set_draggable(&mut self, draggable: bool);
}

/// Decoded circle options.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct CircleOptions {
    pub geometry: Option<LatLng>,
    pub circle_radius: Option<f32>,
    pub circle_color: Option<String>,
    pub circle_blur: Option<f32>,
    pub circle_opacity: Option<f32>,
    pub circle_stroke_width: Option<f32>,
    pub circle_stroke_color: Option<String>,
    pub circle_stroke_opacity: Option<f32>,
    pub draggable: Option<bool>,
}

impl CircleOptions {
    /// Decodes annotation options, either a dictionary or a dictionary wrapped in a one-element array.
    pub fn from_json(value: &Value) -> Self {
        annotation_options(value).map(Self::from_map).unwrap_or_default()
    }

    /// Decodes recognized keys of the dictionary.
    pub fn from_map(options: &OptionsMap) -> Self {
        Self {
            geometry: field(options, "geometry", LatLng::from_json),
            circle_radius: field(options, "circleRadius", float),
            circle_color: field(options, "circleColor", string),
            circle_blur: field(options, "circleBlur", float),
            circle_opacity: field(options, "circleOpacity", float),
            circle_stroke_width: field(options, "circleStrokeWidth", float),
            circle_stroke_color: field(options, "circleStrokeColor", string),
            circle_stroke_opacity: field(options, "circleStrokeOpacity", float),
            draggable: field(options, "draggable", boolean),
        }
    }

    /// Calls the sink setter of every present option.
    pub fn apply<S: CircleOptionsSink + ?Sized>(&self, sink: &mut S) {
        if let Some(v) = self.geometry {
            sink.set_geometry(v);
        }
        if let Some(v) = self.circle_radius {
            sink.set_circle_radius(v);
        }
        if let Some(v) = &self.circle_color {
            sink.set_circle_color(v);
        }
        if let Some(v) = self.circle_blur {
            sink.set_circle_blur(v);
        }
        if let Some(v) = self.circle_opacity {
            sink.set_circle_opacity(v);
        }
        if let Some(v) = self.circle_stroke_width {
            sink.set_circle_stroke_width(v);
        }
        if let Some(v) = &self.circle_stroke_color {
            sink.set_circle_stroke_color(v);
        }
        if let Some(v) = self.circle_stroke_opacity {
            sink.set_circle_stroke_opacity(v);
        }
        if let Some(v) = self.draggable {
            sink.set_draggable(v);
        }
    }
}

/// Stored options act as a sink themselves: every call overwrites the stored value.
impl CircleOptionsSink for CircleOptions {
    fn set_geometry(&mut self, geometry: LatLng) {
        self.geometry = Some(geometry);
    }
    fn set_circle_radius(&mut self, circle_radius: f32) {
        self.circle_radius = Some(circle_radius);
    }
    fn set_circle_color(&mut self, circle_color: &str) {
        self.circle_color = Some(circle_color.to_owned());
    }
    fn set_circle_blur(&mut self, circle_blur: f32) {
        self.circle_blur = Some(circle_blur);
    }
    fn set_circle_opacity(&mut self, circle_opacity: f32) {
        self.circle_opacity = Some(circle_opacity);
    }
    fn set_circle_stroke_width(&mut self, circle_stroke_width: f32) {
        self.circle_stroke_width = Some(circle_stroke_width);
    }
    fn set_circle_stroke_color(&mut self, circle_stroke_color: &str) {
        self.circle_stroke_color = Some(circle_stroke_color.to_owned());
    }
    fn set_circle_stroke_opacity(&mut self, circle_stroke_opacity: f32) {
        self.circle_stroke_opacity = Some(circle_stroke_opacity);
    }
    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = Some(draggable);
    }
}

/// Decodes circle options and applies them to the sink.
pub fn interpret_circle_options<S: CircleOptionsSink + ?Sized>(options: &Value, sink: &mut S) {
    CircleOptions::from_json(options).apply(sink);
}
