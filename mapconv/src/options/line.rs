use serde::Deserialize;
use serde_json::Value;

use super::value::{boolean, float, string};
use super::{annotation_options, field, OptionsMap};
use crate::geo::LatLng;

/// Receiver of line annotation options.
pub trait LineOptionsSink {
    /// Sets the line vertices.
    fn set_geometry(&mut self, geometry: Vec<LatLng>);
    /// Sets how segments are joined.
    fn set_line_join(&mut self, line_join: &str);
    /// Sets the line opacity.
    fn set_line_opacity(&mut self, line_opacity: f32);
    /// Sets the line color.
    fn set_line_color(&mut self, line_color: &str);
    /// Sets the line width in pixels.
    fn set_line_width(&mut self, line_width: f32);
    /// Sets the width of the inner gap for casings.
    fn set_line_gap_width(&mut self, line_gap_width: f32);
    /// Sets the perpendicular offset of the line.
    fn set_line_offset(&mut self, line_offset: f32);
    /// Sets the line blur.
    fn set_line_blur(&mut self, line_blur: f32);
    /// Sets the name of the pattern image.
    fn set_line_pattern(&mut self, line_pattern: &str);
    /// Allows dragging the line.
    fn set_draggable(&mut self, draggable: bool);
}

/// Decoded line options.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct LineOptions {
    pub geometry: Option<Vec<LatLng>>,
    pub line_join: Option<String>,
    pub line_opacity: Option<f32>,
    pub line_color: Option<String>,
    pub line_width: Option<f32>,
    pub line_gap_width: Option<f32>,
    pub line_offset: Option<f32>,
    pub line_blur: Option<f32>,
    pub line_pattern: Option<String>,
    pub draggable: Option<bool>,
}

impl LineOptions {
    /// Decodes annotation options, either a dictionary or a dictionary wrapped in a one-element array.
    pub fn from_json(value: &Value) -> Self {
        annotation_options(value).map(Self::from_map).unwrap_or_default()
    }

    /// Decodes recognized keys of the dictionary.
    pub fn from_map(options: &OptionsMap) -> Self {
        Self {
            geometry: field(options, "geometry", path),
            line_join: field(options, "lineJoin", string),
            line_opacity: field(options, "lineOpacity", float),
            line_color: field(options, "lineColor", string),
            line_width: field(options, "lineWidth", float),
            line_gap_width: field(options, "lineGapWidth", float),
            line_offset: field(options, "lineOffset", float),
            line_blur: field(options, "lineBlur", float),
            line_pattern: field(options, "linePattern", string),
            draggable: field(options, "draggable", boolean),
        }
    }

    /// Calls the sink setter of every present option.
    pub fn apply<S: LineOptionsSink + ?Sized>(&self, sink: &mut S) {
        if let Some(v) = &self.geometry {
            sink.set_geometry(v.clone());
        }
        if let Some(v) = &self.line_join {
            sink.set_line_join(v);
        }
        if let Some(v) = self.line_opacity {
            sink.set_line_opacity(v);
        }
        if let Some(v) = &self.line_color {
            sink.set_line_color(v);
        }
        if let Some(v) = self.line_width {
            sink.set_line_width(v);
        }
        if let Some(v) = self.line_gap_width {
            sink.set_line_gap_width(v);
        }
        if let Some(v) = self.line_offset {
            sink.set_line_offset(v);
        }
        if let Some(v) = self.line_blur {
            sink.set_line_blur(v);
        }
        if let Some(v) = &self.line_pattern {
            sink.set_line_pattern(v);
        }
        if let Some(v) = self.draggable {
            sink.set_draggable(v);
        }
    }
}

/// Stored options act as a sink themselves: every call overwrites the stored value.
impl LineOptionsSink for LineOptions {
    fn set_geometry(&mut self, geometry: Vec<LatLng>) {
        self.geometry = Some(geometry);
    }
    fn set_line_join(&mut self, line_join: &str) {
        self.line_join = Some(line_join.to_owned());
    }
    fn set_line_opacity(&mut self, line_opacity: f32) {
        self.line_opacity = Some(line_opacity);
    }
    fn set_line_color(&mut self, line_color: &str) {
        self.line_color = Some(line_color.to_owned());
    }
    fn set_line_width(&mut self, line_width: f32) {
        self.line_width = Some(line_width);
    }
    fn set_line_gap_width(&mut self, line_gap_width: f32) {
        self.line_gap_width = Some(line_gap_width);
    }
    fn set_line_offset(&mut self, line_offset: f32) {
        self.line_offset = Some(line_offset);
    }
    fn set_line_blur(&mut self, line_blur: f32) {
        self.line_blur = Some(line_blur);
    }
    fn set_line_pattern(&mut self, line_pattern: &str) {
        self.line_pattern = Some(line_pattern.to_owned());
    }
    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = Some(draggable);
    }
}

/// Decodes line options and applies them to the sink.
pub fn interpret_line_options<S: LineOptionsSink + ?Sized>(options: &Value, sink: &mut S) {
    LineOptions::from_json(options).apply(sink);
}

fn path(value: &Value) -> Option<Vec<LatLng>> {
    Vec::deserialize(value).ok()
}
