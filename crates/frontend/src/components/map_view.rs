use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

use citymap_shared::geo::LatLng;
use citymap_shared::mercator::{screen_position, visible_tiles, zoom_about, pan_center};
use citymap_shared::models::PointOfInterest;

use crate::components::popup::PoiPopup;
use crate::view_state::{Camera, ViewController, Viewport, MAX_ZOOM, MIN_ZOOM};

const MAP_CONTAINER_ID: &str = "city-map-container";

/// Drag threshold in pixels; movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold, larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Zoom change per wheel notch and per zoom-button press.
const WHEEL_ZOOM_STEP: f64 = 0.5;
const BUTTON_ZOOM_STEP: f64 = 1.0;

/// Markers this far off-screen are not rendered.
const MARKER_CULL_MARGIN: f64 = 80.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

// ---------------------------------------------------------------------------
// Pure helpers (easily testable)
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Distance between two client-coordinate points (for touch threshold checks).
fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Raster tile URL on the OpenStreetMap endpoint.
fn tile_url(z: u8, x: u32, y: u32) -> String {
    format!("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
}

/// Whether a projected marker position is close enough to the viewport to
/// be worth rendering.
fn marker_on_screen(sx: f64, sy: f64, vw: f64, vh: f64) -> bool {
    sx > -MARKER_CULL_MARGIN
        && sx < vw + MARKER_CULL_MARGIN
        && sy > -MARKER_CULL_MARGIN
        && sy < vh + MARKER_CULL_MARGIN
}

/// Apply a camera produced by a manual gesture. A gesture supersedes any
/// running fly, so the animation generation is bumped (the stale task stops)
/// and the controller abandons its pending continuation.
fn apply_gesture(
    mut controller: Signal<ViewController>,
    mut anim_gen: Signal<u64>,
    camera: Camera,
) {
    let gen = *anim_gen.read() + 1;
    anim_gen.set(gen);
    let mut ctl = controller.write();
    ctl.fly_interrupted();
    ctl.set_camera(camera);
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    catalog: Vec<PointOfInterest>,
    controller: Signal<ViewController>,
    anim_gen: Signal<u64>,
    on_marker_tap: EventHandler<usize>,
    on_overview: EventHandler<()>,
    on_popup_close: EventHandler<()>,
    on_viewport: EventHandler<Viewport>,
) -> Element {
    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start_x = use_signal(|| 0.0_f64);
    let mut drag_start_y = use_signal(|| 0.0_f64);
    let mut drag_start_center = use_signal(|| None::<LatLng>);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_center = use_signal(|| None::<LatLng>);
    let mut is_pinching = use_signal(|| false);
    let mut pinch_start_distance = use_signal(|| 0.0_f64);
    let mut pinch_start_zoom = use_signal(|| 0.0_f64);
    let mut pinch_midpoint = use_signal(|| (0.0_f64, 0.0_f64));
    let mut pinch_start_center = use_signal(|| None::<LatLng>);

    let camera = controller.read().camera();
    let viewport = controller.read().viewport();
    let selected = controller.read().selected();
    let popup_index = controller.read().popup();

    let tiles = visible_tiles(camera.center, camera.zoom, viewport.width, viewport.height);

    // Marker screen positions, culled to the viewport.
    let markers: Vec<(usize, f64, f64)> = catalog
        .iter()
        .enumerate()
        .map(|(i, poi)| {
            let (sx, sy) = screen_position(
                poi.position(),
                camera.center,
                camera.zoom,
                viewport.width,
                viewport.height,
            );
            (i, sx, sy)
        })
        .filter(|&(_, sx, sy)| marker_on_screen(sx, sy, viewport.width, viewport.height))
        .collect();

    let popup = popup_index.and_then(|i| {
        let poi = catalog.get(i)?;
        let (sx, sy) = screen_position(
            poi.position(),
            camera.center,
            camera.zoom,
            viewport.width,
            viewport.height,
        );
        Some((poi.clone(), sx, sy))
    });

    // Zoom step shared by the wheel handler, double click and the buttons.
    let zoom_step_at = move |step: f64, ox: f64, oy: f64| {
        let cam = controller.read().camera();
        let new_zoom = (cam.zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - cam.zoom).abs() < 1e-9 {
            return;
        }
        let center = zoom_about(cam.center, cam.zoom, new_zoom, ox, oy);
        apply_gesture(controller, anim_gen, Camera::new(center, new_zoom));
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: if *is_dragging.read() { "map-container dragging" } else { "map-container" },

            onmounted: move |_| {
                if let Some(rect) = container_rect() {
                    on_viewport.call(Viewport::new(rect.width(), rect.height()));
                }
            },

            onresize: move |evt| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    on_viewport.call(Viewport::new(size.width, size.height));
                }
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                if delta_y == 0.0 {
                    return;
                }
                let step = if delta_y < 0.0 { WHEEL_ZOOM_STEP } else { -WHEEL_ZOOM_STEP };

                let Some(rect) = container_rect() else { return };
                let client = evt.data().client_coordinates();
                let ox = client.x - rect.left() - rect.width() / 2.0;
                let oy = client.y - rect.top() - rect.height() / 2.0;
                zoom_step_at(step, ox, oy);
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only track drag for the left mouse button
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start_x.set(client.x);
                drag_start_y.set(client.y);
                drag_start_center.set(Some(controller.read().camera().center));
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let dx = client.x - *drag_start_x.read();
                let dy = client.y - *drag_start_y.read();

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let Some(start) = *drag_start_center.read() else { return };
                    let zoom = controller.read().camera().zoom;
                    let center = pan_center(start, zoom, dx, dy);
                    apply_gesture(controller, anim_gen, Camera::new(center, zoom));
                }
            },

            onmouseup: move |_| {
                is_dragging.set(false);
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let Some(rect) = container_rect() else { return };
                let client = evt.client_coordinates();
                let ox = client.x - rect.left() - rect.width() / 2.0;
                let oy = client.y - rect.top() - rect.height() / 2.0;
                zoom_step_at(BUTTON_ZOOM_STEP, ox, oy);
            },

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    // Single finger: record start position for panning
                    let t = &touches[0];
                    touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                    touch_did_pan.set(false);
                    touch_start_center.set(Some(controller.read().camera().center));
                } else if touches.len() >= 2 {
                    // Two fingers: start pinch-to-zoom
                    let t0 = &touches[0];
                    let t1 = &touches[1];
                    let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                    let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                    is_pinching.set(true);
                    pinch_start_distance.set(point_distance(p0, p1));
                    pinch_start_zoom.set(controller.read().camera().zoom);
                    pinch_midpoint.set(((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0));
                    pinch_start_center.set(Some(controller.read().camera().center));
                    // Cancel any pan tracking
                    touch_start_pos.set(None);
                    touch_did_pan.set(true);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();

                if *is_pinching.read() && touches.len() >= 2 {
                    let t0 = &touches[0];
                    let t1 = &touches[1];
                    let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                    let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                    let d = point_distance(p0, p1);
                    let start_d = *pinch_start_distance.read();
                    if start_d < 1.0 {
                        return;
                    }

                    let start_zoom = *pinch_start_zoom.read();
                    let new_zoom = (start_zoom + (d / start_d).log2()).clamp(MIN_ZOOM, MAX_ZOOM);

                    // Zoom anchored at the pinch midpoint
                    let Some(rect) = container_rect() else { return };
                    let Some(start_center) = *pinch_start_center.read() else { return };
                    let mid = *pinch_midpoint.read();
                    let ox = mid.0 - rect.left() - rect.width() / 2.0;
                    let oy = mid.1 - rect.top() - rect.height() / 2.0;
                    let center = zoom_about(start_center, start_zoom, new_zoom, ox, oy);
                    apply_gesture(controller, anim_gen, Camera::new(center, new_zoom));
                } else if touches.len() == 1 {
                    // Single finger pan
                    let t = &touches[0];
                    let cur = (t.client_coordinates().x, t.client_coordinates().y);
                    if let Some(start) = *touch_start_pos.read() {
                        let dx = cur.0 - start.0;
                        let dy = cur.1 - start.1;
                        if !*touch_did_pan.read() && point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                            touch_did_pan.set(true);
                        }
                        if *touch_did_pan.read() {
                            let Some(start_center) = *touch_start_center.read() else { return };
                            let zoom = controller.read().camera().zoom;
                            let center = pan_center(start_center, zoom, dx, dy);
                            apply_gesture(controller, anim_gen, Camera::new(center, zoom));
                        }
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                let remaining = evt.data().touches().len();
                if remaining == 0 {
                    is_pinching.set(false);
                    touch_start_pos.set(None);
                }
            },

            ontouchcancel: move |_| {
                touch_start_pos.set(None);
                touch_did_pan.set(false);
                is_pinching.set(false);
            },

            // --- Tile layer ---

            for t in tiles {
                img {
                    key: "{t.z}/{t.x}/{t.y}",
                    class: "map-tile",
                    src: tile_url(t.z, t.x, t.y),
                    style: "left: {t.left}px; top: {t.top}px; width: {t.size}px; height: {t.size}px;",
                    alt: "",
                    draggable: "false",
                }
            }

            // --- Markers ---

            for (i, sx, sy) in markers {
                button {
                    key: "{catalog[i].slug()}",
                    class: if selected == Some(i) { "poi-marker active" } else { "poi-marker" },
                    style: "left: {sx}px; top: {sy}px;",
                    title: "{catalog[i].name}",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        // A click that ended a drag is not a tap.
                        if *did_drag.read() {
                            return;
                        }
                        on_marker_tap.call(i);
                    },
                    span { class: "poi-marker-icon", "{catalog[i].icon}" }
                }
            }

            // --- Popup ---

            if let Some((poi, px, py)) = popup {
                div {
                    class: "popup-anchor",
                    style: "left: {px}px; top: {py}px;",
                    PoiPopup {
                        poi,
                        on_close: move |_| on_popup_close.call(()),
                    }
                }
            }

            // --- Controls ---

            div { class: "map-controls",
                button {
                    class: "map-control",
                    "aria-label": "Zoom in",
                    onclick: move |_| zoom_step_at(BUTTON_ZOOM_STEP, 0.0, 0.0),
                    "+"
                }
                button {
                    class: "map-control",
                    "aria-label": "Zoom out",
                    onclick: move |_| zoom_step_at(-BUTTON_ZOOM_STEP, 0.0, 0.0),
                    "\u{2212}"
                }
                button {
                    class: "map-control overview",
                    "aria-label": "Show all locations",
                    onclick: move |_| on_overview.call(()),
                    "Show all"
                }
            }

            div { class: "map-attribution",
                "\u{00a9} "
                a {
                    href: "https://www.openstreetmap.org/copyright",
                    target: "_blank",
                    rel: "noopener",
                    "OpenStreetMap"
                }
                " contributors"
            }
        }
    }
}
