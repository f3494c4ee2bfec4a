use log::{debug, warn};
use serde_json::Value;

use crate::camera::{CameraUpdate, CameraUpdateError, MapCamera};
use crate::geo::EdgePadding;
use crate::surface::MapSurface;

/// Decodes a camera update command and computes the camera it leads to.
///
/// Returns `None` and leaves the surface untouched if the command is unknown or its arguments are malformed.
/// Unknown commands are reported with a warning.
pub fn interpret_camera_update<S>(command: &Value, surface: &S) -> Option<MapCamera>
where
    S: MapSurface + ?Sized,
{
    match CameraUpdate::from_json(command) {
        Ok(update) => Some(apply_camera_update(&update, surface)),
        Err(CameraUpdateError::UnknownCommand(name)) => {
            warn!("{name} not implemented!");
            None
        }
        Err(err) => {
            debug!("Ignoring camera update {command}: {err}");
            None
        }
    }
}

/// Computes the camera a decoded update leads to, starting from the current camera of the surface.
pub fn apply_camera_update<S>(update: &CameraUpdate, surface: &S) -> MapCamera
where
    S: MapSurface + ?Sized,
{
    let size = surface.viewport_size();
    let mut camera = surface.camera();

    let zoom_by = |camera: &MapCamera, delta: f64| {
        let zoom = surface.zoom_for_altitude(camera.altitude, camera.pitch, camera.center.latitude, size);
        surface.altitude_for_zoom(zoom + delta, camera.pitch, camera.center.latitude, size)
    };

    match *update {
        CameraUpdate::NewCameraPosition(position) => {
            camera = MapCamera {
                center: position.target,
                altitude: surface.altitude_for_zoom(position.zoom, position.tilt, position.target.latitude, size),
                pitch: position.tilt,
                heading: position.bearing,
            };
        }
        CameraUpdate::NewLatLng(target) => camera.center = target,
        CameraUpdate::NewLatLngBounds { bounds, padding } => {
            camera = surface.camera_fitting_bounds(bounds, EdgePadding::uniform(padding));
        }
        CameraUpdate::NewLatLngZoom { target, zoom } => {
            camera.center = target;
            camera.altitude = surface.altitude_for_zoom(zoom, camera.pitch, target.latitude, size);
        }
        CameraUpdate::ScrollBy { dx, dy } => {
            let moved = surface.project_to_screen(camera.center).offset(dx, dy);
            camera.center = surface.unproject_from_screen(moved);
        }
        CameraUpdate::ZoomBy { delta, focus } => {
            camera.altitude = zoom_by(&camera, delta);
            if let Some(focus) = focus {
                camera.center = surface.unproject_from_screen(focus);
            }
        }
        CameraUpdate::ZoomIn => camera.altitude = zoom_by(&camera, 1.0),
        CameraUpdate::ZoomOut => camera.altitude = zoom_by(&camera, -1.0),
        CameraUpdate::ZoomTo(zoom) => {
            camera.altitude = surface.altitude_for_zoom(zoom, camera.pitch, camera.center.latitude, size);
        }
        CameraUpdate::BearingTo(bearing) => camera.heading = bearing,
        CameraUpdate::TiltTo(tilt) => camera.pitch = tilt,
    }

    camera
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::camera::altitude_for_zoom;
    use crate::geo::{LatLng, ScreenPoint, ViewportSize};
    use crate::surface::MercatorSurface;

    const SIZE: ViewportSize = ViewportSize::new(300.0, 300.0);

    fn surface() -> MercatorSurface {
        MercatorSurface::new(SIZE).with_zoom(LatLng::new(10.0, 20.0), 5.0)
    }

    #[test]
    fn new_lat_lng_zoom_uses_target_latitude() {
        let surface = surface();
        let camera = interpret_camera_update(&json!(["newLatLngZoom", [37.7, -122.4], 10.0]), &surface).unwrap();
        assert_eq!(camera.center, LatLng::new(37.7, -122.4));
        assert_eq!(camera.altitude, altitude_for_zoom(10.0, 0.0, 37.7, SIZE));
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.heading, 0.0);
    }

    #[test]
    fn zoom_by_keeps_center() {
        let surface = surface();
        let camera = interpret_camera_update(&json!(["zoomBy", 2.0]), &surface).unwrap();
        assert_relative_eq!(camera.zoom(SIZE), 7.0, epsilon = 1e-9);
        assert_eq!(camera.center, surface.camera().center);
    }

    #[test]
    fn zoom_by_with_focus_recenters() {
        let surface = surface();
        let focus = ScreenPoint::new(200.0, 100.0);
        let camera = interpret_camera_update(&json!(["zoomBy", 1.0, [200.0, 100.0]]), &surface).unwrap();
        assert_eq!(camera.center, surface.unproject_from_screen(focus));
        assert_relative_eq!(
            camera.altitude,
            altitude_for_zoom(6.0, 0.0, 10.0, SIZE),
            max_relative = 1e-9
        );
    }

    #[test]
    fn bearing_changes_only_heading() {
        let surface = surface();
        let before = surface.camera();
        let camera = interpret_camera_update(&json!(["bearingTo", 90.0]), &surface).unwrap();
        assert_eq!(camera, before.with_heading(90.0));
    }

    #[test]
    fn tilt_changes_only_pitch() {
        let surface = surface();
        let camera = interpret_camera_update(&json!(["tiltTo", 45.0]), &surface).unwrap();
        assert_eq!(camera, surface.camera().with_pitch(45.0));
    }

    #[test]
    fn scroll_moves_center_by_screen_offset() {
        let surface = surface();
        let camera = interpret_camera_update(&json!(["scrollBy", 50.0, 0.0]), &surface).unwrap();
        assert_eq!(camera.altitude, surface.camera().altitude);
        assert!(camera.center.longitude > 20.0);
        assert_relative_eq!(camera.center.latitude, 10.0, epsilon = 1e-9);

        let moved = surface.clone().with_camera(camera);
        let old_center = moved.project_to_screen(LatLng::new(10.0, 20.0));
        assert_relative_eq!(old_center.x, 100.0, epsilon = 1e-6);
        assert_relative_eq!(old_center.y, 150.0, epsilon = 1e-6);
    }

    #[test]
    fn new_camera_position_replaces_camera() {
        let surface = surface();
        let camera = interpret_camera_update(
            &json!(["newCameraPosition", {"target": [1.0, 2.0], "zoom": 8.0, "tilt": 20.0, "bearing": 180.0}]),
            &surface,
        )
        .unwrap();
        assert_eq!(camera.center, LatLng::new(1.0, 2.0));
        assert_eq!(camera.pitch, 20.0);
        assert_eq!(camera.heading, 180.0);
        assert_eq!(camera.altitude, altitude_for_zoom(8.0, 20.0, 1.0, SIZE));
    }

    #[test]
    fn unknown_and_malformed_commands_are_ignored() {
        let surface = surface();
        assert_eq!(interpret_camera_update(&json!(["flyTo", [1.0, 2.0]]), &surface), None);
        assert_eq!(interpret_camera_update(&json!(["zoomTo", "far"]), &surface), None);
        assert_eq!(interpret_camera_update(&json!([]), &surface), None);
        assert_eq!(interpret_camera_update(&json!(null), &surface), None);
    }
}
