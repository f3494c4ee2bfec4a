use std::time::Duration;

use approx::assert_relative_eq;
use mapconv::options::{MapOptionsSink, TrackingMode};
use mapconv::{
    EdgePadding, LatLng, LatLngBounds, MapCamera, MapSurface, MercatorSurface, ScreenPoint, ViewportSize,
};
use mapconv_channel::{Annotation, AnnotationKind, ChannelError, MapController, MapHost, MethodCall};
use serde_json::{json, Value};

const SIZE: ViewportSize = ViewportSize::new(300.0, 300.0);

/// Host on top of a headless surface that records what it was told.
struct TestHost {
    surface: MercatorSurface,
    moves: Vec<(MapCamera, bool)>,
    eased: Vec<(MapCamera, Duration)>,
    options: Vec<String>,
    updated: Vec<(AnnotationKind, String)>,
    removed: Vec<(AnnotationKind, String)>,
}

impl TestHost {
    fn new() -> Self {
        Self {
            surface: MercatorSurface::new(SIZE).with_zoom(LatLng::new(37.7, -122.4), 5.0),
            moves: Vec::new(),
            eased: Vec::new(),
            options: Vec::new(),
            updated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl MapSurface for TestHost {
    fn camera(&self) -> MapCamera {
        self.surface.camera()
    }

    fn viewport_size(&self) -> ViewportSize {
        self.surface.viewport_size()
    }

    fn project_to_screen(&self, position: LatLng) -> ScreenPoint {
        self.surface.project_to_screen(position)
    }

    fn unproject_from_screen(&self, point: ScreenPoint) -> LatLng {
        self.surface.unproject_from_screen(point)
    }

    fn camera_fitting_bounds(&self, bounds: LatLngBounds, padding: EdgePadding) -> MapCamera {
        self.surface.camera_fitting_bounds(bounds, padding)
    }
}

impl MapOptionsSink for TestHost {
    fn set_camera_target_bounds(&mut self, _: LatLngBounds) {
        self.options.push("cameraTargetBounds".into());
    }
    fn set_compass_enabled(&mut self, value: bool) {
        self.options.push(format!("compassEnabled={value}"));
    }
    fn set_min_max_zoom_preference(&mut self, _: Option<f64>, _: Option<f64>) {
        self.options.push("minMaxZoomPreference".into());
    }
    fn set_style_string(&mut self, value: &str) {
        self.options.push(format!("styleString={value}"));
    }
    fn set_rotate_gestures_enabled(&mut self, _: bool) {
        self.options.push("rotateGesturesEnabled".into());
    }
    fn set_scroll_gestures_enabled(&mut self, _: bool) {
        self.options.push("scrollGesturesEnabled".into());
    }
    fn set_tilt_gestures_enabled(&mut self, _: bool) {
        self.options.push("tiltGesturesEnabled".into());
    }
    fn set_track_camera_position(&mut self, value: bool) {
        self.options.push(format!("trackCameraPosition={value}"));
    }
    fn set_zoom_gestures_enabled(&mut self, _: bool) {
        self.options.push("zoomGesturesEnabled".into());
    }
    fn set_my_location_enabled(&mut self, _: bool) {
        self.options.push("myLocationEnabled".into());
    }
    fn set_my_location_tracking_mode(&mut self, mode: TrackingMode) {
        self.options.push(format!("myLocationTrackingMode={mode:?}"));
    }
}

impl MapHost for TestHost {
    fn move_camera(&mut self, camera: MapCamera, animated: bool) {
        self.surface.set_camera(camera);
        self.moves.push((camera, animated));
    }

    fn ease_camera(&mut self, camera: MapCamera, duration: Duration) {
        self.surface.set_camera(camera);
        self.eased.push((camera, duration));
    }

    fn annotation_updated(&mut self, id: &str, annotation: Annotation<'_>) {
        let kind = match annotation {
            Annotation::Symbol(_) => AnnotationKind::Symbol,
            Annotation::Line(_) => AnnotationKind::Line,
            Annotation::Circle(_) => AnnotationKind::Circle,
        };
        self.updated.push((kind, id.to_string()));
    }

    fn annotation_removed(&mut self, kind: AnnotationKind, id: &str) {
        self.removed.push((kind, id.to_string()));
    }
}

fn controller() -> MapController<TestHost> {
    MapController::new(7, TestHost::new())
}

fn call(controller: &mut MapController<TestHost>, method: &str, arguments: Value) -> Result<Value, ChannelError> {
    controller.handle(&MethodCall::new(method, arguments))
}

#[test]
fn wait_for_map_replies_null() {
    let mut controller = controller();
    assert_eq!(call(&mut controller, "map#waitForMap", Value::Null), Ok(Value::Null));
}

#[test]
fn map_update_forwards_options_and_returns_position() {
    let mut controller = controller();
    let reply = call(
        &mut controller,
        "map#update",
        json!({"options": {"compassEnabled": false, "styleString": "mapbox://styles/dark", "trackCameraPosition": true, "unknown": 1}}),
    )
    .unwrap();

    let mut options = controller.host().options.clone();
    options.sort();
    assert_eq!(
        options,
        ["compassEnabled=false", "styleString=mapbox://styles/dark", "trackCameraPosition=true"]
    );
    assert!(controller.track_camera_position());

    let target = reply["target"].as_array().unwrap();
    assert_relative_eq!(target[0].as_f64().unwrap(), 37.7, epsilon = 1e-9);
    assert_relative_eq!(target[1].as_f64().unwrap(), -122.4, epsilon = 1e-9);
    assert_relative_eq!(reply["zoom"].as_f64().unwrap(), 5.0, epsilon = 1e-9);
    assert_eq!(reply["tilt"], json!(0.0));
    assert_eq!(reply["bearing"], json!(0.0));
}

#[test]
fn camera_move_and_animate_reach_host() {
    let mut controller = controller();
    call(&mut controller, "camera#move", json!({"cameraUpdate": ["zoomTo", 8.0]})).unwrap();
    call(&mut controller, "camera#animate", json!({"cameraUpdate": ["bearingTo", 45.0]})).unwrap();

    let moves = &controller.host().moves;
    assert_eq!(moves.len(), 2);
    assert!(!moves[0].1);
    assert!(moves[1].1);
    assert_relative_eq!(moves[0].0.zoom(SIZE), 8.0, epsilon = 1e-9);
    assert_eq!(moves[1].0.heading, 45.0);
    assert_relative_eq!(controller.camera_position().zoom, 8.0, epsilon = 1e-9);
}

#[test]
fn unknown_camera_command_does_not_move() {
    let mut controller = controller();
    let reply = call(&mut controller, "camera#move", json!({"cameraUpdate": ["flyTo", [0.0, 0.0]]}));

    assert_eq!(reply, Ok(Value::Null));
    assert!(controller.host().moves.is_empty());
    assert_eq!(
        call(&mut controller, "camera#move", json!({})),
        Err(ChannelError::MissingArgument("cameraUpdate"))
    );
}

#[test]
fn symbol_lifecycle() {
    let mut controller = controller();
    let id = call(
        &mut controller,
        "symbol#add",
        json!({"options": [{"geometry": [10.0, 20.0], "iconImage": "pin", "iconSize": 2.0}]}),
    )
    .unwrap();
    let id = id.as_str().unwrap().to_string();

    let symbol = controller.symbols().get(&id).unwrap();
    assert_eq!(symbol.geometry, Some(LatLng::new(10.0, 20.0)));
    assert_eq!(symbol.icon_image.as_deref(), Some("pin"));

    call(
        &mut controller,
        "symbol#update",
        json!({"symbol": id, "options": {"iconImage": "flag"}}),
    )
    .unwrap();
    let symbol = controller.symbols().get(&id).unwrap();
    assert_eq!(symbol.icon_image.as_deref(), Some("flag"));
    assert_eq!(symbol.icon_size, Some(2.0));

    call(&mut controller, "symbol#remove", json!({"symbol": id})).unwrap();
    assert!(controller.symbols().is_empty());

    let host = controller.host();
    assert_eq!(host.updated, [(AnnotationKind::Symbol, id.clone()), (AnnotationKind::Symbol, id.clone())]);
    assert_eq!(host.removed, [(AnnotationKind::Symbol, id)]);
}

#[test]
fn line_and_circle_get_separate_ids() {
    let mut controller = controller();
    let line = call(
        &mut controller,
        "line#add",
        json!({"options": {"geometry": [[0.0, 0.0], [1.0, 1.0]], "lineWidth": 3.0}}),
    )
    .unwrap();
    let circle = call(&mut controller, "circle#add", json!({"options": {"geometry": [5.0, 6.0]}})).unwrap();

    assert!(line.is_string());
    assert!(circle.is_string());
    assert_eq!(controller.lines().len(), 1);
    assert_eq!(controller.circles().len(), 1);

    let line = line.as_str().unwrap();
    call(&mut controller, "line#update", json!({"line": line, "options": {"lineColor": "#ff0000"}})).unwrap();
    let stored = controller.lines().get(line).unwrap();
    assert_eq!(stored.line_color.as_deref(), Some("#ff0000"));
    assert_eq!(stored.line_width, Some(3.0));
    assert_eq!(stored.geometry.as_ref().map(Vec::len), Some(2));
}

#[test]
fn circle_geometry_is_reported() {
    let mut controller = controller();
    let id = call(&mut controller, "circle#add", json!({"options": {"geometry": [5.0, 6.0]}})).unwrap();

    let geometry = call(&mut controller, "circle#getGeometry", json!({"circle": id})).unwrap();
    assert_eq!(geometry, json!({"latitude": 5.0, "longitude": 6.0}));

    let empty = call(&mut controller, "circle#add", json!({"options": {}})).unwrap();
    assert_eq!(
        call(&mut controller, "circle#getGeometry", json!({"circle": empty})),
        Ok(Value::Null)
    );
}

#[test]
fn unknown_annotations_are_reported() {
    let mut controller = controller();
    assert_eq!(
        call(&mut controller, "circle#update", json!({"circle": "99", "options": {}})),
        Err(ChannelError::UnknownAnnotation {
            kind: AnnotationKind::Circle,
            id: "99".to_string()
        })
    );
    assert!(matches!(
        call(&mut controller, "circle#getGeometry", json!({"circle": "99"})),
        Err(ChannelError::UnknownAnnotation { .. })
    ));
    assert_eq!(call(&mut controller, "line#remove", json!({"line": "99"})), Ok(Value::Null));
    assert!(controller.host().removed.is_empty());
    assert_eq!(
        call(&mut controller, "symbol#update", json!({"options": {}})),
        Err(ChannelError::MissingArgument("symbol"))
    );
}

#[test]
fn unsupported_methods_are_not_implemented() {
    let mut controller = controller();
    let error = call(&mut controller, "map#queryRenderedFeatures", json!({})).unwrap_err();

    assert_eq!(error, ChannelError::NotImplemented("map#queryRenderedFeatures".to_string()));
    assert_eq!(error.to_string(), "method map#queryRenderedFeatures is not implemented");
}

#[test]
fn camera_events() {
    let mut controller = controller();

    let started = controller.on_camera_move_started(true);
    assert_eq!(started.method(), "camera#onMoveStarted");
    assert_eq!(started.arguments(), json!({"isGesture": true}));

    assert_eq!(controller.on_camera_move(), None);
    call(&mut controller, "map#update", json!({"options": {"trackCameraPosition": true}})).unwrap();
    let moved = controller.on_camera_move().unwrap();
    assert_eq!(moved.method(), "camera#onMove");
    assert_eq!(moved.arguments()["position"], controller.camera_position().to_json());

    let idle = controller.on_camera_idle().to_method_call();
    assert_eq!(idle, MethodCall::new("camera#onIdle", json!({"map": 7})));
}

#[test]
fn camera_ease_frames_both_points_then_settles() {
    let mut controller = controller();
    let reply = call(
        &mut controller,
        "camera#ease",
        json!({"lat1": 40.0, "lng1": -74.0, "lat2": 34.0, "lng2": -118.0, "durationMs": 1500, "zoom": 9}),
    );
    assert_eq!(reply, Ok(Value::Null));

    let host = controller.host();
    let bounds = LatLngBounds::new(LatLng::new(34.0, -118.0), LatLng::new(40.0, -74.0));
    let padding = EdgePadding {
        top: 10.0,
        left: 50.0,
        bottom: 400.0,
        right: 50.0,
    };
    let framing = MercatorSurface::new(SIZE)
        .with_zoom(LatLng::new(37.7, -122.4), 5.0)
        .camera_fitting_bounds(bounds, padding);
    assert_eq!(host.moves, [(framing, true)]);

    let (settled, duration) = host.eased[0];
    assert_eq!(host.eased.len(), 1);
    assert_eq!(duration, Duration::from_millis(1500));
    assert_eq!(settled.center, LatLng::new(34.0, -118.0));
    assert_eq!(settled.heading, 0.0);
    assert_relative_eq!(settled.zoom(SIZE), 9.0, epsilon = 1e-9);
    assert_relative_eq!(controller.camera_position().zoom, 9.0, epsilon = 1e-9);
}

#[test]
fn camera_ease_needs_every_argument() {
    let mut controller = controller();
    assert_eq!(
        call(
            &mut controller,
            "camera#ease",
            json!({"lat1": 40.0, "lng1": -74.0, "lat2": 34.0, "durationMs": 1500, "zoom": 9}),
        ),
        Err(ChannelError::MissingArgument("lng2"))
    );
    assert_eq!(
        call(
            &mut controller,
            "camera#ease",
            json!({"lat1": 40.0, "lng1": -74.0, "lat2": 34.0, "lng2": -118.0, "durationMs": "slow", "zoom": 9}),
        ),
        Err(ChannelError::MissingArgument("durationMs"))
    );
    assert!(controller.host().moves.is_empty());
    assert!(controller.host().eased.is_empty());
}

#[test]
fn annotation_taps_name_the_annotation() {
    let mut controller = controller();
    let symbol = call(&mut controller, "symbol#add", json!({"options": {}})).unwrap();
    let line = call(&mut controller, "line#add", json!({"options": {}})).unwrap();
    let circle = call(&mut controller, "circle#add", json!({"options": {}})).unwrap();

    for (kind, id, method) in [
        (AnnotationKind::Symbol, &symbol, "symbol#onTap"),
        (AnnotationKind::Line, &line, "line#onTap"),
        (AnnotationKind::Circle, &circle, "circle#onTap"),
    ] {
        let id = id.as_str().unwrap();
        let tap = controller.on_annotation_tap(kind, id).unwrap();
        assert_eq!(tap.method(), method);
        assert_eq!(tap.arguments(), json!({ (kind.name()): id }));
    }

    assert_eq!(controller.on_annotation_tap(AnnotationKind::Line, "42"), None);
}

#[test]
fn circle_drag_moves_the_circle() {
    let mut controller = controller();
    let id = call(&mut controller, "circle#add", json!({"options": {"geometry": [5.0, 6.0]}})).unwrap();
    let id = id.as_str().unwrap();

    let events = [
        controller.on_circle_drag_start(id, LatLng::new(5.0, 6.0)).unwrap(),
        controller.on_circle_drag(id, LatLng::new(5.5, 6.5)).unwrap(),
        controller.on_circle_drag_end(id, LatLng::new(6.0, 7.0)).unwrap(),
    ];
    let methods: Vec<_> = events.iter().map(|event| event.method()).collect();
    assert_eq!(methods, ["circle#onDragStart", "circle#onDrag", "circle#onDragEnd"]);
    for event in &events {
        assert_eq!(event.arguments(), json!({"circle": id}));
    }

    let geometry = call(&mut controller, "circle#getGeometry", json!({"circle": id})).unwrap();
    assert_eq!(geometry, json!({"latitude": 6.0, "longitude": 7.0}));
    assert_eq!(controller.on_circle_drag_start("42", LatLng::new(0.0, 0.0)), None);
}

#[test]
fn map_click_reports_screen_point_and_position() {
    let controller = controller();
    let position = LatLng::new(38.0, -122.0);
    let click = controller.on_map_click(position);
    let point = controller.host().project_to_screen(position);

    assert_eq!(click.method(), "map#onMapClick");
    assert_eq!(
        click.arguments(),
        json!({"x": point.x, "y": point.y, "lat": 38.0, "lng": -122.0})
    );

    let center = controller.on_map_click(LatLng::new(37.7, -122.4)).arguments();
    assert_relative_eq!(center["x"].as_f64().unwrap(), 150.0, epsilon = 1e-6);
    assert_relative_eq!(center["y"].as_f64().unwrap(), 150.0, epsilon = 1e-6);
}

#[test]
fn tracking_dismissal_has_no_arguments() {
    let controller = controller();
    let dismissed = controller.on_camera_tracking_dismissed().to_method_call();
    assert_eq!(dismissed, MethodCall::new("map#onCameraTrackingDismissed", json!({})));
}
