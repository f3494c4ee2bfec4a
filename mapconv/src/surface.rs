//! Map surface capability used by the camera interpreter.

use std::f64::consts::PI;

use galileo_types::cartesian::{CartesianPoint2d, Point2};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, Projection};
use log::debug;

use crate::camera::{self, MapCamera, MAX_ZOOM, MIN_ZOOM};
use crate::geo::{EdgePadding, LatLng, LatLngBounds, ScreenPoint, ViewportSize};

/// Half of the width of the Web Mercator plane, in meters.
const HALF_EXTENT: f64 = PI * camera::EARTH_RADIUS_M;

/// Rendering surface showing the map.
///
/// The surface owns the live camera. Camera updates read it through this trait, compute a new camera and hand it
/// back to the caller, who decides how (and whether) to apply it.
pub trait MapSurface {
    /// Current camera.
    fn camera(&self) -> MapCamera;

    /// Size of the viewport in logical pixels.
    fn viewport_size(&self) -> ViewportSize;

    /// Screen point showing the given position with the current camera.
    fn project_to_screen(&self, position: LatLng) -> ScreenPoint;

    /// Position shown at the given screen point with the current camera.
    fn unproject_from_screen(&self, point: ScreenPoint) -> LatLng;

    /// Camera that shows the whole `bounds` inside the viewport shrunk by `padding`.
    fn camera_fitting_bounds(&self, bounds: LatLngBounds, padding: EdgePadding) -> MapCamera;

    /// Zoom level for a camera altitude.
    fn zoom_for_altitude(&self, altitude: f64, pitch: f64, latitude: f64, size: ViewportSize) -> f64 {
        camera::zoom_for_altitude(altitude, pitch, latitude, size)
    }

    /// Camera altitude for a zoom level.
    fn altitude_for_zoom(&self, zoom: f64, pitch: f64, latitude: f64, size: ViewportSize) -> f64 {
        camera::altitude_for_zoom(zoom, pitch, latitude, size)
    }
}

/// Headless Web Mercator surface.
///
/// Projects positions with the EPSG:3857 projection onto a flat world of `512 * 2^zoom` pixels centered on the
/// camera. Heading rotates the world around the viewport center, pitch only affects the altitude. Useful for hosts
/// without an engine-side projection and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorSurface {
    camera: MapCamera,
    size: ViewportSize,
}

impl MercatorSurface {
    /// Creates a surface of the given size showing the whole world at zoom 0.
    pub fn new(size: ViewportSize) -> Self {
        let center = LatLng::default();
        Self {
            camera: MapCamera::new(center, camera::altitude_for_zoom(0.0, 0.0, 0.0, size)),
            size,
        }
    }

    /// Sets the camera.
    pub fn with_camera(mut self, camera: MapCamera) -> Self {
        self.camera = camera;
        self
    }

    /// Sets a top-down camera at the given center and zoom level.
    pub fn with_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.camera = MapCamera::new(
            center,
            camera::altitude_for_zoom(zoom, 0.0, center.latitude, self.size),
        );
        self
    }

    /// Replaces the camera.
    pub fn set_camera(&mut self, camera: MapCamera) {
        self.camera = camera;
    }

    /// Changes the viewport size. The camera altitude is kept.
    pub fn set_viewport_size(&mut self, size: ViewportSize) {
        self.size = size;
    }

    fn world_size(&self) -> f64 {
        camera::TILE_SIZE * self.camera.zoom(self.size).exp2()
    }
}

impl MapSurface for MercatorSurface {
    fn camera(&self) -> MapCamera {
        self.camera
    }

    fn viewport_size(&self) -> ViewportSize {
        self.size
    }

    fn project_to_screen(&self, position: LatLng) -> ScreenPoint {
        let world_size = self.world_size();
        let (Some((x, y)), Some((cx, cy))) = (
            to_world(position, world_size),
            to_world(self.camera.center, world_size),
        ) else {
            debug!("Cannot project {position:?}");
            return self.size.center();
        };
        let (dx, dy) = rotate(x - cx, y - cy, -self.camera.heading);

        self.size.center().offset(dx, dy)
    }

    fn unproject_from_screen(&self, point: ScreenPoint) -> LatLng {
        let world_size = self.world_size();
        let screen_center = self.size.center();
        let (dx, dy) = rotate(
            point.x - screen_center.x,
            point.y - screen_center.y,
            self.camera.heading,
        );

        to_world(self.camera.center, world_size)
            .and_then(|(cx, cy)| from_world(cx + dx, cy + dy, world_size))
            .unwrap_or_else(|| {
                debug!("Cannot unproject {point:?}");
                self.camera.center
            })
    }

    fn camera_fitting_bounds(&self, bounds: LatLngBounds, padding: EdgePadding) -> MapCamera {
        let (Some((sw_x, sw_y)), Some((ne_x, ne_y))) = (
            to_world(bounds.southwest, camera::TILE_SIZE),
            to_world(bounds.northeast, camera::TILE_SIZE),
        ) else {
            debug!("Cannot project {bounds:?}");
            return self.camera;
        };

        let span_x = (ne_x - sw_x).abs();
        let span_y = (sw_y - ne_y).abs();
        let available_x = (self.size.width - padding.left - padding.right).max(1.0);
        let available_y = (self.size.height - padding.top - padding.bottom).max(1.0);

        let scale = (available_x / span_x).min(available_y / span_y);
        let zoom = if scale.is_finite() {
            scale.log2().clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MAX_ZOOM
        };

        // Padding shifts the framed area off the viewport center.
        let shift_x = (padding.left - padding.right) / 2.0 / zoom.exp2();
        let shift_y = (padding.top - padding.bottom) / 2.0 / zoom.exp2();
        let Some(center) = from_world(
            (sw_x + ne_x) / 2.0 - shift_x,
            (sw_y + ne_y) / 2.0 - shift_y,
            camera::TILE_SIZE,
        ) else {
            return self.camera;
        };

        MapCamera::new(
            center,
            camera::altitude_for_zoom(zoom, self.camera.pitch, center.latitude, self.size),
        )
        .with_pitch(self.camera.pitch)
    }
}

fn web_mercator() -> Option<Box<dyn Projection<InPoint = GeoPoint2d, OutPoint = Point2>>> {
    Crs::EPSG3857.get_projection()
}

/// World pixel coordinates of a position, origin at the north-west corner of the world.
fn to_world(position: LatLng, world_size: f64) -> Option<(f64, f64)> {
    let clamped = LatLng::new(
        position.latitude.clamp(-camera::LATITUDE_MAX, camera::LATITUDE_MAX),
        position.longitude,
    );
    let projected = web_mercator()?.project(&<GeoPoint2d as From<LatLng>>::from(clamped))?;
    let scale = world_size / (2.0 * HALF_EXTENT);

    Some((
        (projected.x() + HALF_EXTENT) * scale,
        (HALF_EXTENT - projected.y()) * scale,
    ))
}

fn from_world(x: f64, y: f64, world_size: f64) -> Option<LatLng> {
    let scale = 2.0 * HALF_EXTENT / world_size;
    let projected = Point2::new(
        x * scale - HALF_EXTENT,
        (HALF_EXTENT - y * scale).clamp(-HALF_EXTENT, HALF_EXTENT),
    );

    web_mercator()?.unproject(&projected).map(LatLng::from)
}

fn rotate(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
