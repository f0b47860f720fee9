//! View-state controller: decides what region of the map is visible,
//! reacting to selection and layout changes without fighting the user's own
//! pans and zooms.
//!
//! The controller is plain Rust with no web dependencies. Each handler
//! returns at most one [`CameraCommand`]; the hosting UI layer subscribes
//! the handlers to its event sources and executes the commands (jumps set
//! the camera directly, flys run as eased animations whose completion calls
//! back into [`ViewController::fly_completed`]).

use citymap_shared::geo::{centroid, LatLng, LatLngBounds, DEFAULT_CENTER, DEFAULT_ZOOM};
use citymap_shared::mercator::{fit_bounds, FitOptions};

pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Zoom level used when centering on a single selected point.
pub const FOCUSED_ZOOM: f64 = 16.0;

/// Viewport widths at or below this are classified as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

const DESKTOP_FLY_MS: u32 = 900;
const MOBILE_FLY_MS: u32 = 550;

const DESKTOP_PADDING_FRAC: f64 = 0.08;
const MOBILE_PADDING_FRAC: f64 = 0.18;

/// Title bar height the mobile layout overlays onto the map.
const MOBILE_TOP_INSET_PX: f64 = 56.0;

/// Animation frame step for camera flys.
pub const FRAME_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn classify(viewport_width: f64, has_touch: bool) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT_PX || has_touch {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn fly_duration_ms(self) -> u32 {
        match self {
            DeviceClass::Mobile => MOBILE_FLY_MS,
            DeviceClass::Desktop => DESKTOP_FLY_MS,
        }
    }

    pub fn fit_options(self) -> FitOptions {
        match self {
            DeviceClass::Mobile => FitOptions {
                padding_frac: MOBILE_PADDING_FRAC,
                top_inset_px: MOBILE_TOP_INSET_PX,
                min_zoom: MIN_ZOOM,
                max_zoom: FOCUSED_ZOOM,
            },
            DeviceClass::Desktop => FitOptions {
                padding_frac: DESKTOP_PADDING_FRAC,
                top_inset_px: 0.0,
                min_zoom: MIN_ZOOM,
                max_zoom: FOCUSED_ZOOM,
            },
        }
    }
}

/// Map container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// What the map currently displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

impl Camera {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

/// Camera motion requested by a controller transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Set the camera immediately (layout corrections).
    Jump(Camera),
    /// Animate to the camera over the given duration.
    Fly { to: Camera, duration_ms: u32 },
}

impl CameraCommand {
    pub fn target(&self) -> Camera {
        match self {
            CameraCommand::Jump(c) => *c,
            CameraCommand::Fly { to, .. } => *to,
        }
    }
}

pub struct ViewController {
    points: Vec<LatLng>,
    camera: Camera,
    viewport: Viewport,
    device: DeviceClass,
    selected: Option<usize>,
    popup: Option<usize>,
    /// Index whose selection fly is pending; blocks further selections and
    /// keys the popup-open continuation.
    in_flight: Option<usize>,
}

impl ViewController {
    pub fn new(points: Vec<LatLng>, viewport: Viewport, device: DeviceClass) -> Self {
        let mut controller = Self {
            points,
            camera: Camera::new(DEFAULT_CENTER, DEFAULT_ZOOM),
            viewport,
            device,
            selected: None,
            popup: None,
            in_flight: None,
        };
        controller.camera = if viewport.is_measured() {
            controller.overview_camera()
        } else {
            // Container not measured yet: seed on the catalog centroid and
            // let the first resize event run the real fit.
            Camera::new(
                centroid(&controller.points).unwrap_or(DEFAULT_CENTER),
                DEFAULT_ZOOM,
            )
        };
        controller
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn popup(&self) -> Option<usize> {
        self.popup
    }

    pub fn selection_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The bounding-box fit over all points for the current viewport and
    /// device, or the fixed default for an empty catalog.
    pub fn overview_camera(&self) -> Camera {
        match LatLngBounds::of(&self.points) {
            Some(bounds) => {
                let opts = self.device.fit_options();
                let (center, zoom) =
                    fit_bounds(&bounds, self.viewport.width, self.viewport.height, &opts);
                Camera::new(center, zoom)
            }
            None => Camera::new(DEFAULT_CENTER, DEFAULT_ZOOM),
        }
    }

    /// Panel row clicked. Closes the popup, marks the item active and flys
    /// to it; the popup reopens from [`Self::fly_completed`]. Dropped while
    /// any selection fly is pending (re-clicking the in-flight item is a
    /// no-op, other items are not queued).
    pub fn select_from_panel(&mut self, index: usize) -> Option<CameraCommand> {
        if self.in_flight.is_some() {
            return None;
        }
        let point = *self.points.get(index)?;
        self.popup = None;
        self.selected = Some(index);
        self.in_flight = Some(index);
        Some(CameraCommand::Fly {
            to: Camera::new(point, FOCUSED_ZOOM),
            duration_ms: self.device.fly_duration_ms(),
        })
    }

    /// Marker tapped directly. The popup opens immediately; the camera flys
    /// to the point: at the focused zoom when still below it, at the
    /// current zoom (pure pan) otherwise. Suppressed while a selection fly
    /// is pending. Re-tapping the open marker closes its popup.
    pub fn marker_tapped(&mut self, index: usize) -> Option<CameraCommand> {
        if self.in_flight.is_some() {
            return None;
        }
        if self.popup == Some(index) {
            self.popup = None;
            return None;
        }
        let point = *self.points.get(index)?;
        self.selected = Some(index);
        self.popup = Some(index);
        let zoom = if self.camera.zoom < FOCUSED_ZOOM {
            FOCUSED_ZOOM
        } else {
            self.camera.zoom
        };
        Some(CameraCommand::Fly {
            to: Camera::new(point, zoom),
            duration_ms: self.device.fly_duration_ms(),
        })
    }

    /// A fly animation ran to completion. Opens the pending popup if a
    /// selection was in flight; a completed overview or marker-tap fly has
    /// nothing left to do.
    pub fn fly_completed(&mut self) {
        if let Some(index) = self.in_flight.take() {
            self.popup = Some(index);
        }
    }

    /// A manual gesture superseded the running fly. The pending popup
    /// continuation is abandoned so it cannot open at a wrong camera.
    pub fn fly_interrupted(&mut self) {
        self.in_flight = None;
    }

    /// Popup dismissed. Never moves the camera: a zoom-out here would fight
    /// the camera move of a panel selection that follows.
    pub fn popup_closed(&mut self) {
        self.popup = None;
    }

    /// Return-to-overview control. Clears the selection, closes the popup,
    /// abandons any pending continuation and flys to the bounds fit.
    pub fn return_to_overview(&mut self) -> CameraCommand {
        self.selected = None;
        self.popup = None;
        self.in_flight = None;
        CameraCommand::Fly {
            to: self.overview_camera(),
            duration_ms: self.device.fly_duration_ms(),
        }
    }

    /// Viewport resized or orientation changed. Layout corrections are not
    /// user navigation, so the camera jumps without animation: back onto
    /// the selected point, or onto the refreshed bounds fit. While a
    /// selection fly is pending the camera is left alone.
    pub fn resized(&mut self, viewport: Viewport, device: DeviceClass) -> Option<CameraCommand> {
        self.viewport = viewport;
        self.device = device;
        if self.in_flight.is_some() {
            return None;
        }
        match self.selected.and_then(|i| self.points.get(i).copied()) {
            Some(point) => Some(CameraCommand::Jump(Camera::new(point, FOCUSED_ZOOM))),
            None => Some(CameraCommand::Jump(self.overview_camera())),
        }
    }

    /// Camera write-back from animation frames and manual gestures. Zoom is
    /// clamped to the configured range.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Camera::new(camera.center, camera.zoom.clamp(MIN_ZOOM, MAX_ZOOM));
    }
}

/// Symmetric acceleration/deceleration easing for camera flys.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear camera interpolation; pair with an easing curve for `t`.
pub fn lerp_camera(from: Camera, to: Camera, t: f64) -> Camera {
    let t = t.clamp(0.0, 1.0);
    Camera::new(
        LatLng::new(
            from.center.lat + (to.center.lat - from.center.lat) * t,
            from.center.lon + (to.center.lon - from.center.lon) * t,
        ),
        from.zoom + (to.zoom - from.zoom) * t,
    )
}

/// Number of animation frames for a fly of the given duration.
pub fn frame_count(duration_ms: u32) -> u32 {
    (duration_ms / FRAME_MS).max(1)
}
