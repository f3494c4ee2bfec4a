use std::time::Duration;

use mapconv::options::MapOptionsSink;
use mapconv::{MapCamera, MapSurface};

use crate::annotations::{Annotation, AnnotationKind};

/// Map engine integration driven by a [`MapController`](crate::MapController).
///
/// The host provides the projection the camera interpreter works with and receives map options. Annotation callbacks
/// are optional: a host that does not draw annotations can ignore them.
pub trait MapHost: MapSurface + MapOptionsSink {
    /// Moves the map camera. With `animated` the host may interpolate from the current camera.
    fn move_camera(&mut self, camera: MapCamera, animated: bool);

    /// Animates the camera over the given duration. Hosts without timed animations fall back to an animated move.
    fn ease_camera(&mut self, camera: MapCamera, duration: Duration) {
        let _ = duration;
        self.move_camera(camera, true);
    }

    /// Called after an annotation has been added or its options changed.
    fn annotation_updated(&mut self, id: &str, annotation: Annotation<'_>) {
        let _ = (id, annotation);
    }

    /// Called after an annotation has been removed.
    fn annotation_removed(&mut self, kind: AnnotationKind, id: &str) {
        let _ = (kind, id);
    }
}
