//! Geographic and screen-space value types exchanged with the map engine.

use galileo_types::cartesian::{CartesianPoint2d, Point2, Size};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic position in degrees. Encoded as a `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct LatLng {
    /// Latitude in degrees, positive to the north.
    pub latitude: f64,
    /// Longitude in degrees, positive to the east.
    pub longitude: f64,
}

impl LatLng {
    /// Creates a new position.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Decodes a `[latitude, longitude]` pair.
    ///
    /// Returns `None` unless the value is an array of exactly two numbers.
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Encodes the position as a `[latitude, longitude]` pair.
    pub fn to_json(&self) -> Value {
        Value::from(vec![self.latitude, self.longitude])
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<LatLng> for (f64, f64) {
    fn from(position: LatLng) -> Self {
        (position.latitude, position.longitude)
    }
}

impl From<GeoPoint2d> for LatLng {
    fn from(point: GeoPoint2d) -> Self {
        Self::new(point.lat(), point.lon())
    }
}

impl From<LatLng> for GeoPoint2d {
    fn from(position: LatLng) -> Self {
        GeoPoint2d::latlon(position.latitude, position.longitude)
    }
}

/// Rectangular geographic area given by its south-west and north-east corners.
///
/// Encoded as `[[lat, lon], [lat, lon]]`, south-west corner first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(LatLng, LatLng)", into = "(LatLng, LatLng)")]
pub struct LatLngBounds {
    /// South-west corner.
    pub southwest: LatLng,
    /// North-east corner.
    pub northeast: LatLng,
}

impl LatLngBounds {
    /// Creates new bounds from the two corners.
    pub const fn new(southwest: LatLng, northeast: LatLng) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    /// Smallest bounds containing both positions.
    pub fn including(a: LatLng, b: LatLng) -> Self {
        Self::new(
            LatLng::new(a.latitude.min(b.latitude), a.longitude.min(b.longitude)),
            LatLng::new(a.latitude.max(b.latitude), a.longitude.max(b.longitude)),
        )
    }

    /// Decodes `[[lat, lon], [lat, lon]]` with the south-west corner first.
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Geographic center of the bounds.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.southwest.latitude + self.northeast.latitude) / 2.0,
            (self.southwest.longitude + self.northeast.longitude) / 2.0,
        )
    }
}

impl From<(LatLng, LatLng)> for LatLngBounds {
    fn from((southwest, northeast): (LatLng, LatLng)) -> Self {
        Self::new(southwest, northeast)
    }
}

impl From<LatLngBounds> for (LatLng, LatLng) {
    fn from(bounds: LatLngBounds) -> Self {
        (bounds.southwest, bounds.northeast)
    }
}

/// Point on the map widget in logical pixels, origin at the top-left corner. Encoded as an `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ScreenPoint {
    /// Horizontal offset, growing to the right.
    pub x: f64,
    /// Vertical offset, growing downwards.
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Decodes an `[x, y]` pair.
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Returns the point moved by the given offsets.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for ScreenPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<ScreenPoint> for (f64, f64) {
    fn from(point: ScreenPoint) -> Self {
        (point.x, point.y)
    }
}

impl From<Point2> for ScreenPoint {
    fn from(point: Point2) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl From<ScreenPoint> for Point2 {
    fn from(point: ScreenPoint) -> Self {
        Point2::new(point.x, point.y)
    }
}

/// Size of the map viewport in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    /// Width of the viewport.
    pub width: f64,
    /// Height of the viewport.
    pub height: f64,
}

impl ViewportSize {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point of the viewport.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl From<Size<f64>> for ViewportSize {
    fn from(size: Size<f64>) -> Self {
        Self::new(size.width(), size.height())
    }
}

impl From<ViewportSize> for Size<f64> {
    fn from(size: ViewportSize) -> Self {
        Size::new(size.width, size.height)
    }
}

/// Insets from the viewport edges, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgePadding {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl EdgePadding {
    /// Same inset on every edge.
    pub const fn uniform(padding: f64) -> Self {
        Self {
            top: padding,
            left: padding,
            bottom: padding,
            right: padding,
        }
    }
}
