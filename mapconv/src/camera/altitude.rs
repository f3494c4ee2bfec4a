//! Conversion between camera altitude and zoom level.
//!
//! The engine positions its camera by altitude above the ground while the application layer speaks in zoom levels.
//! Both functions below follow the engine's own formula so that a zoom level sent by the application lands on
//! exactly the same image the engine would produce for it.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geo::ViewportSize;

/// Equatorial radius of the WGS84 ellipsoid, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Size of a map tile in pixels at integer zoom levels.
pub const TILE_SIZE: f64 = 512.0;

/// Vertical angular field of view of the camera, in degrees.
pub const ANGULAR_FIELD_OF_VIEW: f64 = 30.0;

/// Largest latitude representable in Web Mercator.
pub const LATITUDE_MAX: f64 = 85.051_128_779_806_604;

/// Smallest zoom level the engine renders.
pub const MIN_ZOOM: f64 = 0.0;

/// Largest zoom level the engine renders.
pub const MAX_ZOOM: f64 = 25.5;

/// Ground resolution in meters per pixel at the given latitude and zoom level.
///
/// Latitude is clamped to the Web Mercator range and zoom to `MIN_ZOOM..=MAX_ZOOM`.
pub fn meters_per_pixel_at_latitude(latitude: f64, zoom: f64) -> f64 {
    let latitude = latitude.clamp(-LATITUDE_MAX, LATITUDE_MAX);
    let world_size = TILE_SIZE * zoom.clamp(MIN_ZOOM, MAX_ZOOM).exp2();
    latitude.to_radians().cos() * 2.0 * PI * EARTH_RADIUS_M / world_size
}

/// Camera altitude in meters that shows the map at `zoom`.
///
/// `pitch` is in degrees from nadir, `latitude` is the latitude of the camera center.
pub fn altitude_for_zoom(zoom: f64, pitch: f64, latitude: f64, size: ViewportSize) -> f64 {
    let meters_tall = meters_per_pixel_at_latitude(latitude, zoom) * size.height;
    let altitude = meters_tall / 2.0 / (ANGULAR_FIELD_OF_VIEW.to_radians() / 2.0).tan();
    altitude * (FRAC_PI_2 - pitch.to_radians()).sin() / FRAC_PI_2.sin()
}

/// Zoom level shown by a camera at `altitude` meters.
///
/// Inverse of [`altitude_for_zoom`] for latitudes inside the Web Mercator range.
pub fn zoom_for_altitude(altitude: f64, pitch: f64, latitude: f64, size: ViewportSize) -> f64 {
    let eye_altitude = altitude / (FRAC_PI_2 - pitch.to_radians()).sin() * FRAC_PI_2.sin();
    let meters_tall = eye_altitude * 2.0 * (ANGULAR_FIELD_OF_VIEW.to_radians() / 2.0).tan();
    let meters_per_pixel = meters_tall / size.height;
    let map_pixel_width = latitude.to_radians().cos() * 2.0 * PI * EARTH_RADIUS_M / meters_per_pixel;
    (map_pixel_width / TILE_SIZE).log2()
}
