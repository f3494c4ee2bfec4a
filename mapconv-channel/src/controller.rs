//! Method call dispatch for a single map.

use std::time::Duration;

use log::{debug, warn};
use mapconv::options::{
    interpret_map_options, CircleOptions, LineOptions, MapOptionsSink, SymbolOptions, TrackingMode,
};
use mapconv::camera::apply_camera_update;
use mapconv::{
    interpret_camera_update, CameraPosition, CameraUpdate, EdgePadding, LatLng, LatLngBounds, ScreenPoint,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::annotations::{AnnotationKind, AnnotationOptions, AnnotationRegistry};
use crate::host::MapHost;

/// Method call received from the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `camera#move`.
    pub method: String,
    /// Argument dictionary. `null` when the method takes no arguments.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    /// Creates a new method call.
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Returns the argument with the given name, if present and not `null`.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key).filter(|value| !value.is_null())
    }

    fn required(&self, key: &'static str) -> Result<&Value, ChannelError> {
        self.argument(key).ok_or(ChannelError::MissingArgument(key))
    }

    fn number(&self, key: &'static str) -> Result<f64, ChannelError> {
        self.required(key)?
            .as_f64()
            .ok_or(ChannelError::MissingArgument(key))
    }

    fn annotation_id(&self, kind: AnnotationKind) -> Result<&str, ChannelError> {
        self.required(kind.name())?
            .as_str()
            .ok_or(ChannelError::MissingArgument(kind.name()))
    }

    fn options(&self) -> &Value {
        self.argument("options").unwrap_or(&Value::Null)
    }
}

/// Error returned for a method call that could not be handled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The method is not supported.
    #[error("method {0} is not implemented")]
    NotImplemented(String),
    /// A required argument is absent or has an unexpected type.
    #[error("missing argument {0}")]
    MissingArgument(&'static str),
    /// No annotation with the given id exists.
    #[error("unknown {kind} {id}")]
    UnknownAnnotation {
        /// Annotation kind.
        kind: AnnotationKind,
        /// Requested id.
        id: String,
    },
}

/// Notification sent back to the application layer.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingEvent {
    /// The camera started moving.
    CameraMoveStarted {
        /// True if the move was started by a user gesture.
        is_gesture: bool,
    },
    /// The camera moved.
    CameraMove {
        /// New camera position.
        position: CameraPosition,
    },
    /// The camera stopped moving.
    CameraIdle {
        /// Id of the map.
        map: i64,
    },
    /// The user panned the map while the camera followed the user location.
    CameraTrackingDismissed,
    /// The user tapped the map outside of any annotation.
    MapClick {
        /// Tapped point on the widget.
        point: ScreenPoint,
        /// Position shown at the tapped point.
        position: LatLng,
    },
    /// The user tapped an annotation.
    AnnotationTap {
        /// Annotation kind.
        kind: AnnotationKind,
        /// Annotation id.
        id: String,
    },
    /// The user started dragging a circle.
    CircleDragStart {
        /// Circle id.
        id: String,
    },
    /// A dragged circle moved.
    CircleDrag {
        /// Circle id.
        id: String,
    },
    /// The user released a dragged circle.
    CircleDragEnd {
        /// Circle id.
        id: String,
    },
}

impl OutgoingEvent {
    /// Method name of the event.
    pub fn method(&self) -> &'static str {
        match self {
            Self::CameraMoveStarted { .. } => "camera#onMoveStarted",
            Self::CameraMove { .. } => "camera#onMove",
            Self::CameraIdle { .. } => "camera#onIdle",
            Self::CameraTrackingDismissed => "map#onCameraTrackingDismissed",
            Self::MapClick { .. } => "map#onMapClick",
            Self::AnnotationTap { kind, .. } => match kind {
                AnnotationKind::Symbol => "symbol#onTap",
                AnnotationKind::Line => "line#onTap",
                AnnotationKind::Circle => "circle#onTap",
            },
            Self::CircleDragStart { .. } => "circle#onDragStart",
            Self::CircleDrag { .. } => "circle#onDrag",
            Self::CircleDragEnd { .. } => "circle#onDragEnd",
        }
    }

    /// Argument dictionary of the event.
    pub fn arguments(&self) -> Value {
        match self {
            Self::CameraMoveStarted { is_gesture } => json!({ "isGesture": is_gesture }),
            Self::CameraMove { position } => json!({ "position": position.to_json() }),
            Self::CameraIdle { map } => json!({ "map": map }),
            Self::CameraTrackingDismissed => json!({}),
            Self::MapClick { point, position } => json!({
                "x": point.x,
                "y": point.y,
                "lat": position.latitude,
                "lng": position.longitude,
            }),
            Self::AnnotationTap { kind, id } => json!({ (kind.name()): id }),
            Self::CircleDragStart { id } | Self::CircleDrag { id } | Self::CircleDragEnd { id } => {
                json!({ "circle": id })
            }
        }
    }

    /// The event as a method call.
    pub fn to_method_call(&self) -> MethodCall {
        MethodCall::new(self.method(), self.arguments())
    }
}

/// Insets framing both ends of a `camera#ease` flight before it settles on the destination.
const EASE_PADDING: EdgePadding = EdgePadding {
    top: 10.0,
    left: 50.0,
    bottom: 400.0,
    right: 50.0,
};

/// Routes method calls of one map to its host and keeps the annotations created on it.
#[derive(Debug)]
pub struct MapController<H> {
    id: i64,
    host: H,
    track_camera_position: bool,
    symbols: AnnotationRegistry<SymbolOptions>,
    lines: AnnotationRegistry<LineOptions>,
    circles: AnnotationRegistry<CircleOptions>,
}

impl<H: MapHost> MapController<H> {
    /// Creates a controller for the map with the given id.
    pub fn new(id: i64, host: H) -> Self {
        Self {
            id,
            host,
            track_camera_position: false,
            symbols: AnnotationRegistry::default(),
            lines: AnnotationRegistry::default(),
            circles: AnnotationRegistry::default(),
        }
    }

    /// Id of the map.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Map host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable map host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns true if camera move events are reported.
    pub fn track_camera_position(&self) -> bool {
        self.track_camera_position
    }

    /// Symbols created on the map.
    pub fn symbols(&self) -> &AnnotationRegistry<SymbolOptions> {
        &self.symbols
    }

    /// Lines created on the map.
    pub fn lines(&self) -> &AnnotationRegistry<LineOptions> {
        &self.lines
    }

    /// Circles created on the map.
    pub fn circles(&self) -> &AnnotationRegistry<CircleOptions> {
        &self.circles
    }

    /// Current camera position of the host.
    pub fn camera_position(&self) -> CameraPosition {
        self.host.camera().to_position(self.host.viewport_size())
    }

    /// Handles a method call and returns the reply value.
    pub fn handle(&mut self, call: &MethodCall) -> Result<Value, ChannelError> {
        debug!("Map {} received {}", self.id, call.method);

        match call.method.as_str() {
            "map#waitForMap" => Ok(Value::Null),
            "map#update" => {
                interpret_map_options(call.options(), self);
                Ok(self.camera_position().to_json())
            }
            "camera#move" => self.move_camera(call, false),
            "camera#animate" => self.move_camera(call, true),
            "camera#ease" => self.ease_camera(call),
            "symbol#add" => Ok(add(&mut self.symbols, &mut self.host, call).into()),
            "symbol#update" => update(&mut self.symbols, &mut self.host, call),
            "symbol#remove" => remove(&mut self.symbols, &mut self.host, call),
            "line#add" => Ok(add(&mut self.lines, &mut self.host, call).into()),
            "line#update" => update(&mut self.lines, &mut self.host, call),
            "line#remove" => remove(&mut self.lines, &mut self.host, call),
            "circle#add" => Ok(add(&mut self.circles, &mut self.host, call).into()),
            "circle#update" => update(&mut self.circles, &mut self.host, call),
            "circle#remove" => remove(&mut self.circles, &mut self.host, call),
            "circle#getGeometry" => {
                let id = call.annotation_id(AnnotationKind::Circle)?;
                let circle = self.circles.get(id).ok_or_else(|| unknown(AnnotationKind::Circle, id))?;
                Ok(circle.geometry.map_or(Value::Null, |geometry| {
                    json!({ "latitude": geometry.latitude, "longitude": geometry.longitude })
                }))
            }
            other => {
                warn!("Method {other} is not implemented");
                Err(ChannelError::NotImplemented(other.to_string()))
            }
        }
    }

    /// Event for the start of a camera move.
    pub fn on_camera_move_started(&self, is_gesture: bool) -> OutgoingEvent {
        OutgoingEvent::CameraMoveStarted { is_gesture }
    }

    /// Event for a camera move. `None` unless camera tracking is enabled.
    pub fn on_camera_move(&self) -> Option<OutgoingEvent> {
        self.track_camera_position.then(|| OutgoingEvent::CameraMove {
            position: self.camera_position(),
        })
    }

    /// Event for the end of a camera move.
    pub fn on_camera_idle(&self) -> OutgoingEvent {
        OutgoingEvent::CameraIdle { map: self.id }
    }

    /// Event for the user panning away from the tracked location.
    pub fn on_camera_tracking_dismissed(&self) -> OutgoingEvent {
        OutgoingEvent::CameraTrackingDismissed
    }

    /// Event for a tap on the map at the given position.
    pub fn on_map_click(&self, position: LatLng) -> OutgoingEvent {
        OutgoingEvent::MapClick {
            point: self.host.project_to_screen(position),
            position,
        }
    }

    /// Event for a tap on an annotation. `None` if no annotation with the id exists.
    pub fn on_annotation_tap(&self, kind: AnnotationKind, id: &str) -> Option<OutgoingEvent> {
        let exists = match kind {
            AnnotationKind::Symbol => self.symbols.get(id).is_some(),
            AnnotationKind::Line => self.lines.get(id).is_some(),
            AnnotationKind::Circle => self.circles.get(id).is_some(),
        };

        exists.then(|| OutgoingEvent::AnnotationTap {
            kind,
            id: id.to_string(),
        })
    }

    /// Event for the start of a circle drag. The circle geometry follows `position`.
    pub fn on_circle_drag_start(&mut self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.drag_circle(id, position)
            .then(|| OutgoingEvent::CircleDragStart { id: id.to_string() })
    }

    /// Event for a dragged circle moving to `position`.
    pub fn on_circle_drag(&mut self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.drag_circle(id, position)
            .then(|| OutgoingEvent::CircleDrag { id: id.to_string() })
    }

    /// Event for a circle dropped at `position`.
    pub fn on_circle_drag_end(&mut self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.drag_circle(id, position)
            .then(|| OutgoingEvent::CircleDragEnd { id: id.to_string() })
    }

    fn drag_circle(&mut self, id: &str, position: LatLng) -> bool {
        match self.circles.get_mut(id) {
            Some(circle) => {
                circle.geometry = Some(position);
                true
            }
            None => {
                debug!("Drag of unknown circle {id}");
                false
            }
        }
    }

    fn move_camera(&mut self, call: &MethodCall, animated: bool) -> Result<Value, ChannelError> {
        let update = call.required("cameraUpdate")?;
        if let Some(camera) = interpret_camera_update(update, &self.host) {
            self.host.move_camera(camera, animated);
        }

        Ok(Value::Null)
    }

    /// Frames both positions, then eases onto the second one at the requested zoom.
    fn ease_camera(&mut self, call: &MethodCall) -> Result<Value, ChannelError> {
        let from = LatLng::new(call.number("lat1")?, call.number("lng1")?);
        let to = LatLng::new(call.number("lat2")?, call.number("lng2")?);
        let zoom = call.number("zoom")?;
        let duration = call
            .required("durationMs")?
            .as_u64()
            .ok_or(ChannelError::MissingArgument("durationMs"))?;

        let framing = self
            .host
            .camera_fitting_bounds(LatLngBounds::including(from, to), EASE_PADDING);
        self.host.move_camera(framing, true);

        let destination = CameraPosition {
            target: to,
            zoom,
            tilt: framing.pitch,
            bearing: framing.heading,
        };
        let camera = apply_camera_update(&CameraUpdate::NewCameraPosition(destination), &self.host);
        self.host.ease_camera(camera, Duration::from_millis(duration));

        Ok(Value::Null)
    }
}

impl<H: MapHost> MapOptionsSink for MapController<H> {
    fn set_camera_target_bounds(&mut self, bounds: LatLngBounds) {
        self.host.set_camera_target_bounds(bounds);
    }

    fn set_compass_enabled(&mut self, compass_enabled: bool) {
        self.host.set_compass_enabled(compass_enabled);
    }

    fn set_min_max_zoom_preference(&mut self, min: Option<f64>, max: Option<f64>) {
        self.host.set_min_max_zoom_preference(min, max);
    }

    fn set_style_string(&mut self, style_string: &str) {
        self.host.set_style_string(style_string);
    }

    fn set_rotate_gestures_enabled(&mut self, rotate_gestures_enabled: bool) {
        self.host.set_rotate_gestures_enabled(rotate_gestures_enabled);
    }

    fn set_scroll_gestures_enabled(&mut self, scroll_gestures_enabled: bool) {
        self.host.set_scroll_gestures_enabled(scroll_gestures_enabled);
    }

    fn set_tilt_gestures_enabled(&mut self, tilt_gestures_enabled: bool) {
        self.host.set_tilt_gestures_enabled(tilt_gestures_enabled);
    }

    fn set_track_camera_position(&mut self, track_camera_position: bool) {
        self.track_camera_position = track_camera_position;
        self.host.set_track_camera_position(track_camera_position);
    }

    fn set_zoom_gestures_enabled(&mut self, zoom_gestures_enabled: bool) {
        self.host.set_zoom_gestures_enabled(zoom_gestures_enabled);
    }

    fn set_my_location_enabled(&mut self, my_location_enabled: bool) {
        self.host.set_my_location_enabled(my_location_enabled);
    }

    fn set_my_location_tracking_mode(&mut self, my_location_tracking_mode: TrackingMode) {
        self.host.set_my_location_tracking_mode(my_location_tracking_mode);
    }
}

fn unknown(kind: AnnotationKind, id: &str) -> ChannelError {
    ChannelError::UnknownAnnotation {
        kind,
        id: id.to_string(),
    }
}

fn add<T: AnnotationOptions, H: MapHost>(
    registry: &mut AnnotationRegistry<T>,
    host: &mut H,
    call: &MethodCall,
) -> String {
    let mut annotation = T::default();
    annotation.patch(call.options());

    let id = registry.insert(annotation);
    if let Some(annotation) = registry.get(&id) {
        host.annotation_updated(&id, annotation.as_annotation());
    }

    debug!("Added {} {id}", T::KIND);
    id
}

fn update<T: AnnotationOptions, H: MapHost>(
    registry: &mut AnnotationRegistry<T>,
    host: &mut H,
    call: &MethodCall,
) -> Result<Value, ChannelError> {
    let id = call.annotation_id(T::KIND)?;
    let annotation = registry.get_mut(id).ok_or_else(|| unknown(T::KIND, id))?;
    annotation.patch(call.options());
    host.annotation_updated(id, annotation.as_annotation());

    Ok(Value::Null)
}

fn remove<T: AnnotationOptions, H: MapHost>(
    registry: &mut AnnotationRegistry<T>,
    host: &mut H,
    call: &MethodCall,
) -> Result<Value, ChannelError> {
    let id = call.annotation_id(T::KIND)?;
    if registry.remove(id).is_some() {
        host.annotation_removed(T::KIND, id);
    }

    Ok(Value::Null)
}
