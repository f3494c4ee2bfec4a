use std::sync::Arc;

use mapconv::LatLng;
use parking_lot::Mutex;
use serde_json::Value;

use crate::annotations::AnnotationKind;
use crate::controller::{ChannelError, MapController, MethodCall, OutgoingEvent};
use crate::host::MapHost;

/// Shared handle to a [`MapController`].
///
/// Platform callbacks may arrive on different threads. All of them go through one lock, so calls to the same map
/// are handled one at a time.
#[derive(Debug)]
pub struct MapChannel<H> {
    controller: Arc<Mutex<MapController<H>>>,
}

impl<H> Clone for MapChannel<H> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

impl<H: MapHost> MapChannel<H> {
    /// Creates a channel for the map with the given id.
    pub fn new(id: i64, host: H) -> Self {
        Self {
            controller: Arc::new(Mutex::new(MapController::new(id, host))),
        }
    }

    /// Handles a method call.
    pub fn handle(&self, call: &MethodCall) -> Result<Value, ChannelError> {
        self.controller.lock().handle(call)
    }

    /// Decodes a method call from its JSON form and handles it.
    pub fn handle_json(&self, call: &str) -> anyhow::Result<Value> {
        let call: MethodCall = serde_json::from_str(call)?;
        Ok(self.handle(&call)?)
    }

    /// Event for the start of a camera move.
    pub fn on_camera_move_started(&self, is_gesture: bool) -> OutgoingEvent {
        self.controller.lock().on_camera_move_started(is_gesture)
    }

    /// Event for a camera move, if camera tracking is enabled.
    pub fn on_camera_move(&self) -> Option<OutgoingEvent> {
        self.controller.lock().on_camera_move()
    }

    /// Event for the end of a camera move.
    pub fn on_camera_idle(&self) -> OutgoingEvent {
        self.controller.lock().on_camera_idle()
    }

    /// Event for the user panning away from the tracked location.
    pub fn on_camera_tracking_dismissed(&self) -> OutgoingEvent {
        self.controller.lock().on_camera_tracking_dismissed()
    }

    /// Event for a tap on the map.
    pub fn on_map_click(&self, position: LatLng) -> OutgoingEvent {
        self.controller.lock().on_map_click(position)
    }

    /// Event for a tap on an annotation, if it exists.
    pub fn on_annotation_tap(&self, kind: AnnotationKind, id: &str) -> Option<OutgoingEvent> {
        self.controller.lock().on_annotation_tap(kind, id)
    }

    /// Event for the start of a circle drag, if the circle exists.
    pub fn on_circle_drag_start(&self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.controller.lock().on_circle_drag_start(id, position)
    }

    /// Event for a dragged circle moving, if the circle exists.
    pub fn on_circle_drag(&self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.controller.lock().on_circle_drag(id, position)
    }

    /// Event for the end of a circle drag, if the circle exists.
    pub fn on_circle_drag_end(&self, id: &str, position: LatLng) -> Option<OutgoingEvent> {
        self.controller.lock().on_circle_drag_end(id, position)
    }

    /// Runs `f` with exclusive access to the controller.
    pub fn with_controller<T>(&self, f: impl FnOnce(&mut MapController<H>) -> T) -> T {
        f(&mut *self.controller.lock())
    }
}
