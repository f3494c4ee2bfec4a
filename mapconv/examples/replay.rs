//! Replays camera commands against a headless map surface and prints the resulting camera positions.
//! Run with: cargo run --example replay -- commands.json
//!
//! The input file holds a JSON array of camera commands, e.g.
//! `[["newLatLngZoom", [37.7, -122.4], 10.0], ["zoomBy", 2.0], ["bearingTo", 90.0]]`.
//! Without a file a short built-in script is used.

use mapconv::{interpret_camera_update, LatLng, MapSurface, MercatorSurface, ViewportSize};
use serde_json::json;

fn main() {
    env_logger::init();

    let commands = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).expect("failed to read commands file");
            serde_json::from_str(&text).expect("invalid commands json")
        }
        None => json!([
            ["newLatLngZoom", [37.7, -122.4], 10.0],
            ["zoomBy", 2.0],
            ["scrollBy", 100.0, -50.0],
            ["bearingTo", 90.0],
            ["tiltTo", 30.0],
            ["flyTo", [0.0, 0.0]],
        ]),
    };

    let size = ViewportSize::new(300.0, 300.0);
    let mut surface = MercatorSurface::new(size).with_zoom(LatLng::new(0.0, 0.0), 1.0);

    for command in commands.as_array().map(Vec::as_slice).unwrap_or_default() {
        match interpret_camera_update(command, &surface) {
            Some(camera) => {
                surface.set_camera(camera);
                println!("{command} -> {}", camera.to_position(size).to_json());
            }
            None => println!("{command} -> unchanged"),
        }
    }

    println!("final: {}", surface.camera().to_position(size).to_json());
}
