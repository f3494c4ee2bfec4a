use serde_json::Value;

use super::value::{boolean, float, float_pair, integer, string};
use super::{annotation_options, field, OptionsMap};
use crate::geo::LatLng;

/// Receiver of symbol annotation options.
pub trait SymbolOptionsSink {
    /// Sets the drawing order among symbols.
    fn set_z_index(&mut self, z_index: i64);
    /// Sets the icon scale factor.
    fn set_icon_size(&mut self, icon_size: f32);
    /// Sets the name of the icon image.
    fn set_icon_image(&mut self, icon_image: &str);
    /// Sets the icon rotation in degrees.
    fn set_icon_rotate(&mut self, icon_rotate: f32);
    /// Sets the icon offset.
    fn set_icon_offset(&mut self, icon_offset: [f32; 2]);
    /// Sets the icon anchor.
    fn set_icon_anchor(&mut self, icon_anchor: &str);
    /// Sets the label text.
    fn set_text_field(&mut self, text_field: &str);
    /// Sets the font size.
    fn set_text_size(&mut self, text_size: f32);
    /// Sets the maximum label width in ems.
    fn set_text_max_width(&mut self, text_max_width: f32);
    /// Sets the letter spacing in ems.
    fn set_text_letter_spacing(&mut self, text_letter_spacing: f32);
    /// Sets the text justification.
    fn set_text_justify(&mut self, text_justify: &str);
    /// Sets the text anchor.
    fn set_text_anchor(&mut self, text_anchor: &str);
    /// Sets the text rotation in degrees.
    fn set_text_rotate(&mut self, text_rotate: f32);
    /// Sets the text transform.
    fn set_text_transform(&mut self, text_transform: &str);
    /// Sets the text offset in ems.
    fn set_text_offset(&mut self, text_offset: [f32; 2]);
    /// Sets the icon opacity.
    fn set_icon_opacity(&mut self, icon_opacity: f32);
    /// Sets the icon color.
    fn set_icon_color(&mut self, icon_color: &str);
    /// Sets the icon halo color.
    fn set_icon_halo_color(&mut self, icon_halo_color: &str);
    /// Sets the icon halo width.
    fn set_icon_halo_width(&mut self, icon_halo_width: f32);
    /// Sets the icon halo blur.
    fn set_icon_halo_blur(&mut self, icon_halo_blur: f32);
    /// Sets the text opacity.
    fn set_text_opacity(&mut self, text_opacity: f32);
    /// Sets the text color.
    fn set_text_color(&mut self, text_color: &str);
    /// Sets the text halo color.
    fn set_text_halo_color(&mut self, text_halo_color: &str);
    /// Sets the text halo width.
    fn set_text_halo_width(&mut self, text_halo_width: f32);
    /// Sets the text halo blur.
    fn set_text_halo_blur(&mut self, text_halo_blur: f32);
    /// Sets the symbol position.
    fn set_geometry(&mut self, geometry: LatLng);
    /// Allows dragging the symbol.
    fn set_draggable(&mut self, draggable: bool);
}

/// Decoded symbol options.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct SymbolOptions {
    pub z_index: Option<i64>,
    pub icon_size: Option<f32>,
    pub icon_image: Option<String>,
    pub icon_rotate: Option<f32>,
    pub icon_offset: Option<[f32; 2]>,
    pub icon_anchor: Option<String>,
    pub text_field: Option<String>,
    pub text_size: Option<f32>,
    pub text_max_width: Option<f32>,
    pub text_letter_spacing: Option<f32>,
    pub text_justify: Option<String>,
    pub text_anchor: Option<String>,
    pub text_rotate: Option<f32>,
    pub text_transform: Option<String>,
    pub text_offset: Option<[f32; 2]>,
    pub icon_opacity: Option<f32>,
    pub icon_color: Option<String>,
    pub icon_halo_color: Option<String>,
    pub icon_halo_width: Option<f32>,
    pub icon_halo_blur: Option<f32>,
    pub text_opacity: Option<f32>,
    pub text_color: Option<String>,
    pub text_halo_color: Option<String>,
    pub text_halo_width: Option<f32>,
    pub text_halo_blur: Option<f32>,
    pub geometry: Option<LatLng>,
    pub draggable: Option<bool>,
}

impl SymbolOptions {
    /// Decodes annotation options, either a dictionary or a dictionary wrapped in a one-element array.
    pub fn from_json(value: &Value) -> Self {
        annotation_options(value).map(Self::from_map).unwrap_or_default()
    }

    /// Decodes recognized keys of the dictionary.
    pub fn from_map(options: &OptionsMap) -> Self {
        Self {
            z_index: field(options, "zIndex", integer),
            icon_size: field(options, "iconSize", float),
            icon_image: field(options, "iconImage", string),
            icon_rotate: field(options, "iconRotate", float),
            icon_offset: field(options, "iconOffset", float_pair),
            icon_anchor: field(options, "iconAnchor", string),
            text_field: field(options, "textField", string),
            text_size: field(options, "textSize", float),
            text_max_width: field(options, "textMaxWidth", float),
            text_letter_spacing: field(options, "textLetterSpacing", float),
            text_justify: field(options, "textJustify", string),
            text_anchor: field(options, "textAnchor", string),
            text_rotate: field(options, "textRotate", float),
            text_transform: field(options, "textTransform", string),
            text_offset: field(options, "textOffset", float_pair),
            icon_opacity: field(options, "iconOpacity", float),
            icon_color: field(options, "iconColor", string),
            icon_halo_color: field(options, "iconHaloColor", string),
            icon_halo_width: field(options, "iconHaloWidth", float),
            icon_halo_blur: field(options, "iconHaloBlur", float),
            text_opacity: field(options, "textOpacity", float),
            text_color: field(options, "textColor", string),
            text_halo_color: field(options, "textHaloColor", string),
            text_halo_width: field(options, "textHaloWidth", float),
            text_halo_blur: field(options, "textHaloBlur", float),
            geometry: field(options, "geometry", LatLng::from_json),
            draggable: field(options, "draggable", boolean),
        }
    }

    /// Calls the sink setter of every present option.
    pub fn apply<S: SymbolOptionsSink + ?Sized>(&self, sink: &mut S) {
        if let Some(v) = self.z_index {
            sink.set_z_index(v);
        }
        if let Some(v) = self.icon_size {
            sink.set_icon_size(v);
        }
        if let Some(v) = &self.icon_image {
            sink.set_icon_image(v);
        }
        if let Some(v) = self.icon_rotate {
            sink.set_icon_rotate(v);
        }
        if let Some(v) = self.icon_offset {
            sink.set_icon_offset(v);
        }
        if let Some(v) = &self.icon_anchor {
            sink.set_icon_anchor(v);
        }
        if let Some(v) = &self.text_field {
            sink.set_text_field(v);
        }
        if let Some(v) = self.text_size {
            sink.set_text_size(v);
        }
        if let Some(v) = self.text_max_width {
            sink.set_text_max_width(v);
        }
        if let Some(v) = self.text_letter_spacing {
            sink.set_text_letter_spacing(v);
        }
        if let Some(v) = &self.text_justify {
            sink.set_text_justify(v);
        }
        if let Some(v) = &self.text_anchor {
            sink.set_text_anchor(v);
        }
        if let Some(v) = self.text_rotate {
            sink.set_text_rotate(v);
        }
        if let Some(v) = &self.text_transform {
            sink.set_text_transform(v);
        }
        if let Some(v) = self.text_offset {
            sink.set_text_offset(v);
        }
        if let Some(v) = self.icon_opacity {
            sink.set_icon_opacity(v);
        }
        if let Some(v) = &self.icon_color {
            sink.set_icon_color(v);
        }
        if let Some(v) = &self.icon_halo_color {
            sink.set_icon_halo_color(v);
        }
        if let Some(v) = self.icon_halo_width {
            sink.set_icon_halo_width(v);
        }
        if let Some(v) = self.icon_halo_blur {
            sink.set_icon_halo_blur(v);
        }
        if let Some(v) = self.text_opacity {
            sink.set_text_opacity(v);
        }
        if let Some(v) = &self.text_color {
            sink.set_text_color(v);
        }
        if let Some(v) = &self.text_halo_color {
            sink.set_text_halo_color(v);
        }
        if let Some(v) = self.text_halo_width {
            sink.set_text_halo_width(v);
        }
        if let Some(v) = self.text_halo_blur {
            sink.set_text_halo_blur(v);
        }
        if let Some(v) = self.geometry {
            sink.set_geometry(v);
        }
        if let Some(v) = self.draggable {
            sink.set_draggable(v);
        }
    }
}

/// Stored options act as a sink themselves: every call overwrites the stored value.
impl SymbolOptionsSink for SymbolOptions {
    fn set_z_index(&mut self, z_index: i64) {
        self.z_index = Some(z_index);
    }
    fn set_icon_size(&mut self, icon_size: f32) {
        self.icon_size = Some(icon_size);
    }
    fn set_icon_image(&mut self, icon_image: &str) {
        self.icon_image = Some(icon_image.to_owned());
    }
    fn set_icon_rotate(&mut self, icon_rotate: f32) {
        self.icon_rotate = Some(icon_rotate);
    }
    fn set_icon_offset(&mut self, icon_offset: [f32; 2]) {
        self.icon_offset = Some(icon_offset);
    }
    fn set_icon_anchor(&mut self, icon_anchor: &str) {
        self.icon_anchor = Some(icon_anchor.to_owned());
    }
    fn set_text_field(&mut self, text_field: &str) {
        self.text_field = Some(text_field.to_owned());
    }
    fn set_text_size(&mut self, text_size: f32) {
        self.text_size = Some(text_size);
    }
    fn set_text_max_width(&mut self, text_max_width: f32) {
        self.text_max_width = Some(text_max_width);
    }
    fn set_text_letter_spacing(&mut self, text_letter_spacing: f32) {
        self.text_letter_spacing = Some(text_letter_spacing);
    }
    fn set_text_justify(&mut self, text_justify: &str) {
        self.text_justify = Some(text_justify.to_owned());
    }
    fn set_text_anchor(&mut self, text_anchor: &str) {
        self.text_anchor = Some(text_anchor.to_owned());
    }
    fn set_text_rotate(&mut self, text_rotate: f32) {
        self.text_rotate = Some(text_rotate);
    }
    fn set_text_transform(&mut self, text_transform: &str) {
        self.text_transform = Some(text_transform.to_owned());
    }
    fn set_text_offset(&mut self, text_offset: [f32; 2]) {
        self.text_offset = Some(text_offset);
    }
    fn set_icon_opacity(&mut self, icon_opacity: f32) {
        self.icon_opacity = Some(icon_opacity);
    }
    fn set_icon_color(&mut self, icon_color: &str) {
        self.icon_color = Some(icon_color.to_owned());
    }
    fn set_icon_halo_color(&mut self, icon_halo_color: &str) {
        self.icon_halo_color = Some(icon_halo_color.to_owned());
    }
    fn set_icon_halo_width(&mut self, icon_halo_width: f32) {
        self.icon_halo_width = Some(icon_halo_width);
    }
    fn set_icon_halo_blur(&mut self, icon_halo_blur: f32) {
        self.icon_halo_blur = Some(icon_halo_blur);
    }
    fn set_text_opacity(&mut self, text_opacity: f32) {
        self.text_opacity = Some(text_opacity);
    }
    fn set_text_color(&mut self, text_color: &str) {
        self.text_color = Some(text_color.to_owned());
    }
    fn set_text_halo_color(&mut self, text_halo_color: &str) {
        self.text_halo_color = Some(text_halo_color.to_owned());
    }
    fn set_text_halo_width(&mut self, text_halo_width: f32) {
        self.text_halo_width = Some(text_halo_width);
    }
    fn set_text_halo_blur(&mut self, text_halo_blur: f32) {
        self.text_halo_blur = Some(text_halo_blur);
    }
    fn set_geometry(&mut self, geometry: LatLng) {
        self.geometry = Some(geometry);
    }
    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = Some(draggable);
    }
}

/// Decodes symbol options and applies them to the sink.
pub fn interpret_symbol_options<S: SymbolOptionsSink + ?Sized>(options: &Value, sink: &mut S) {
    SymbolOptions::from_json(options).apply(sink);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn halo_colors_stay_separate() {
        let options = SymbolOptions::from_json(&json!({
            "iconHaloColor": "#ff0000",
            "textHaloColor": "#00ff00",
        }));
        assert_eq!(options.icon_halo_color.as_deref(), Some("#ff0000"));
        assert_eq!(options.text_halo_color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn decodes_geometry_and_offsets() {
        let options = SymbolOptions::from_json(&json!([{
            "geometry": [48.85, 2.35],
            "iconOffset": [0.0, -12.0],
            "textOffset": [1, 2],
            "zIndex": 7,
        }]));
        assert_eq!(options.geometry, Some(LatLng::new(48.85, 2.35)));
        assert_eq!(options.icon_offset, Some([0.0, -12.0]));
        assert_eq!(options.text_offset, Some([1.0, 2.0]));
        assert_eq!(options.z_index, Some(7));
    }

    #[test]
    fn wrong_types_are_skipped() {
        let options = SymbolOptions::from_json(&json!({
            "iconSize": "big",
            "iconImage": 12,
            "zIndex": 1.5,
            "draggable": "true",
            "geometry": [1.0],
        }));
        assert_eq!(options, SymbolOptions::default());
    }
}
