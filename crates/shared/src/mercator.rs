//! Web Mercator projection and slippy-tile math.
//!
//! All functions are pure: pixel coordinates are in the "world pixel" space
//! of a given (possibly fractional) zoom level, where the world is
//! `TILE_SIZE * 2^zoom` pixels wide. Screen positions are relative to a
//! viewport whose center shows the camera center.

use crate::geo::{LatLng, LatLngBounds};

pub const TILE_SIZE: f64 = 256.0;

/// Latitude limits of the Web Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// Highest tile zoom level served by the raster tile endpoint.
pub const MAX_TILE_ZOOM: f64 = 19.0;

/// Width of the world in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Project a geographic point into world pixel coordinates at `zoom`.
pub fn project(p: LatLng, zoom: f64) -> (f64, f64) {
    let world = world_size(zoom);
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let lat_rad = lat.to_radians();
    let x = (p.lon + 180.0) / 360.0 * world;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let world = world_size(zoom);
    let lon = x / world * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / world);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lon)
}

/// Screen position of `p` in a `vw` x `vh` viewport centered on `center`.
pub fn screen_position(p: LatLng, center: LatLng, zoom: f64, vw: f64, vh: f64) -> (f64, f64) {
    let (px, py) = project(p, zoom);
    let (cx, cy) = project(center, zoom);
    (vw / 2.0 + px - cx, vh / 2.0 + py - cy)
}

/// New camera center after dragging the map content by `(dx, dy)` screen
/// pixels. Dragging content right moves the center west.
pub fn pan_center(center: LatLng, zoom: f64, dx: f64, dy: f64) -> LatLng {
    let (cx, cy) = project(center, zoom);
    unproject(cx - dx, cy - dy, zoom)
}

/// New camera center for a zoom change anchored at a cursor, so that the
/// geographic point under the cursor stays put. `(ox, oy)` is the cursor
/// offset from the viewport center.
pub fn zoom_about(center: LatLng, old_zoom: f64, new_zoom: f64, ox: f64, oy: f64) -> LatLng {
    let (cx, cy) = project(center, old_zoom);
    let anchor = unproject(cx + ox, cy + oy, old_zoom);
    let (ax, ay) = project(anchor, new_zoom);
    unproject(ax - ox, ay - oy, new_zoom)
}

/// A raster tile and where to draw it on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    pub left: f64,
    pub top: f64,
    /// On-screen edge length; differs from `TILE_SIZE` at fractional zoom.
    pub size: f64,
}

/// Tiles covering a `vw` x `vh` viewport centered on `center` at `zoom`.
///
/// Tiles come from the nearest integer zoom level and are scaled for the
/// fractional remainder. Longitude wraps; latitude rows are clamped.
pub fn visible_tiles(center: LatLng, zoom: f64, vw: f64, vh: f64) -> Vec<TilePlacement> {
    if vw <= 0.0 || vh <= 0.0 {
        return Vec::new();
    }

    let zi = zoom.round().clamp(0.0, MAX_TILE_ZOOM);
    let z = zi as u8;
    let n = 1i64 << z;
    let tile_px = TILE_SIZE * 2f64.powf(zoom - zi);
    let (cx, cy) = project(center, zoom);

    let min_tx = ((cx - vw / 2.0) / tile_px).floor() as i64;
    let max_tx = ((cx + vw / 2.0) / tile_px).ceil() as i64 - 1;
    let min_ty = (((cy - vh / 2.0) / tile_px).floor() as i64).max(0);
    let max_ty = (((cy + vh / 2.0) / tile_px).ceil() as i64 - 1).min(n - 1);

    let mut tiles = Vec::new();
    for ty in min_ty..=max_ty {
        for tx in min_tx..=max_tx {
            tiles.push(TilePlacement {
                z,
                x: tx.rem_euclid(n) as u32,
                y: ty as u32,
                left: vw / 2.0 - cx + tx as f64 * tile_px,
                top: vh / 2.0 - cy + ty as f64 * tile_px,
                size: tile_px,
            });
        }
    }
    tiles
}

/// Parameters for fitting a bounding box into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Fraction of each viewport dimension kept clear on every side.
    pub padding_frac: f64,
    /// Extra pixels reserved at the top (title bar overlap on mobile).
    pub top_inset_px: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

/// Center and zoom showing all of `bounds` inside the padded viewport.
///
/// The zoom snaps down to an integer level, like a conventional bounds fit,
/// and is clamped to `[min_zoom, max_zoom]`. A degenerate box (single point)
/// lands at `max_zoom`.
pub fn fit_bounds(bounds: &LatLngBounds, vw: f64, vh: f64, opts: &FitOptions) -> (LatLng, f64) {
    let usable_w = vw * (1.0 - 2.0 * opts.padding_frac);
    let usable_h = (vh - opts.top_inset_px) * (1.0 - 2.0 * opts.padding_frac);
    if usable_w <= 0.0 || usable_h <= 0.0 {
        return (bounds.center(), opts.min_zoom);
    }

    // Projected spans at zoom 0 scale by 2^zoom, so the fitting zoom per
    // axis is a plain log2 ratio.
    let (min_x, max_y) = project(LatLng::new(bounds.min_lat, bounds.min_lon), 0.0);
    let (max_x, min_y) = project(LatLng::new(bounds.max_lat, bounds.max_lon), 0.0);
    let span_x = max_x - min_x;
    let span_y = max_y - min_y;

    let zx = if span_x > 0.0 {
        (usable_w / span_x).log2()
    } else {
        f64::INFINITY
    };
    let zy = if span_y > 0.0 {
        (usable_h / span_y).log2()
    } else {
        f64::INFINITY
    };
    let zoom = zx
        .min(zy)
        .floor()
        .clamp(opts.min_zoom, opts.max_zoom);

    // Shift the center north by half the inset so the box sits centered in
    // the viewport area below the title bar.
    let (bx, by) = project(bounds.center(), zoom);
    let center = unproject(bx, by - opts.top_inset_px / 2.0, zoom);
    (center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VW: f64 = 1024.0;
    const VH: f64 = 768.0;

    fn aarhus() -> LatLng {
        LatLng::new(56.1629, 10.2039)
    }

    fn desktop_fit() -> FitOptions {
        FitOptions {
            padding_frac: 0.08,
            top_inset_px: 0.0,
            min_zoom: 3.0,
            max_zoom: 16.0,
        }
    }

    #[test]
    fn test_project_world_center() {
        let (x, y) = project(LatLng::new(0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let p = aarhus();
        for zoom in [0.0, 7.5, 13.0, 19.0] {
            let (x, y) = project(p, zoom);
            let back = unproject(x, y, zoom);
            assert!((back.lat - p.lat).abs() < 1e-6, "zoom {zoom}");
            assert!((back.lon - p.lon).abs() < 1e-6, "zoom {zoom}");
        }
    }

    #[test]
    fn test_project_clamps_polar_latitudes() {
        let (_, y_pole) = project(LatLng::new(90.0, 0.0), 4.0);
        let (_, y_limit) = project(LatLng::new(MAX_MERCATOR_LAT, 0.0), 4.0);
        assert!((y_pole - y_limit).abs() < 1e-9);
    }

    #[test]
    fn test_screen_position_of_center_is_viewport_middle() {
        let (x, y) = screen_position(aarhus(), aarhus(), 13.0, VW, VH);
        assert!((x - VW / 2.0).abs() < 1e-9);
        assert!((y - VH / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_position_east_is_right_north_is_up() {
        let east = LatLng::new(56.1629, 10.2139);
        let north = LatLng::new(56.1729, 10.2039);
        let (ex, _) = screen_position(east, aarhus(), 13.0, VW, VH);
        let (_, ny) = screen_position(north, aarhus(), 13.0, VW, VH);
        assert!(ex > VW / 2.0);
        assert!(ny < VH / 2.0);
    }

    #[test]
    fn test_pan_center_roundtrip() {
        let moved = pan_center(aarhus(), 13.0, 120.0, -45.0);
        let back = pan_center(moved, 13.0, -120.0, 45.0);
        assert!((back.lat - aarhus().lat).abs() < 1e-9);
        assert!((back.lon - aarhus().lon).abs() < 1e-9);
    }

    #[test]
    fn test_pan_right_moves_center_west() {
        let moved = pan_center(aarhus(), 13.0, 100.0, 0.0);
        assert!(moved.lon < aarhus().lon);
    }

    #[test]
    fn test_zoom_about_keeps_cursor_point_fixed() {
        let (ox, oy) = (100.0, -50.0);
        let old_zoom = 12.0;
        let new_zoom = 13.0;
        let (cx, cy) = project(aarhus(), old_zoom);
        let under_cursor = unproject(cx + ox, cy + oy, old_zoom);

        let new_center = zoom_about(aarhus(), old_zoom, new_zoom, ox, oy);
        let (sx, sy) = screen_position(under_cursor, new_center, new_zoom, VW, VH);
        assert!((sx - (VW / 2.0 + ox)).abs() < 1e-6);
        assert!((sy - (VH / 2.0 + oy)).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_about_center_is_identity_for_center() {
        let new_center = zoom_about(aarhus(), 12.0, 14.0, 0.0, 0.0);
        assert!((new_center.lat - aarhus().lat).abs() < 1e-9);
        assert!((new_center.lon - aarhus().lon).abs() < 1e-9);
    }

    #[test]
    fn test_visible_tiles_cover_small_world() {
        // Zoom 1: the world is 512px, exactly the viewport, so all 4 tiles show.
        let tiles = visible_tiles(LatLng::new(0.0, 0.0), 1.0, 512.0, 512.0);
        assert_eq!(tiles.len(), 4);
        for t in &tiles {
            assert_eq!(t.z, 1);
            assert!(t.x < 2 && t.y < 2);
            assert!((t.size - TILE_SIZE).abs() < 1e-9);
            assert!(t.left == 0.0 || t.left == 256.0);
            assert!(t.top == 0.0 || t.top == 256.0);
        }
    }

    #[test]
    fn test_visible_tiles_fractional_zoom_scales_size() {
        let tiles = visible_tiles(aarhus(), 12.5, VW, VH);
        assert!(!tiles.is_empty());
        let expected = TILE_SIZE * 2f64.powf(-0.5);
        for t in &tiles {
            assert_eq!(t.z, 13, "rounds to the nearest tile level");
            assert!((t.size - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_visible_tiles_fill_viewport() {
        let tiles = visible_tiles(aarhus(), 13.0, VW, VH);
        let min_left = tiles.iter().map(|t| t.left).fold(f64::INFINITY, f64::min);
        let max_right = tiles
            .iter()
            .map(|t| t.left + t.size)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_top = tiles.iter().map(|t| t.top).fold(f64::INFINITY, f64::min);
        let max_bottom = tiles
            .iter()
            .map(|t| t.top + t.size)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(min_left <= 0.0 && max_right >= VW);
        assert!(min_top <= 0.0 && max_bottom >= VH);
    }

    #[test]
    fn test_visible_tiles_empty_viewport() {
        assert!(visible_tiles(aarhus(), 13.0, 0.0, 600.0).is_empty());
    }

    fn city_bounds() -> LatLngBounds {
        LatLngBounds::of(&[
            LatLng::new(56.1366, 10.1994),
            LatLng::new(56.1701, 10.2133),
        ])
        .unwrap()
    }

    #[test]
    fn test_fit_bounds_keeps_corners_in_padded_viewport() {
        let bounds = city_bounds();
        let opts = desktop_fit();
        let (center, zoom) = fit_bounds(&bounds, VW, VH, &opts);
        for corner in [
            LatLng::new(bounds.min_lat, bounds.min_lon),
            LatLng::new(bounds.max_lat, bounds.max_lon),
        ] {
            let (sx, sy) = screen_position(corner, center, zoom, VW, VH);
            assert!(sx >= 0.0 && sx <= VW, "corner x on screen: {sx}");
            assert!(sy >= 0.0 && sy <= VH, "corner y on screen: {sy}");
        }
    }

    #[test]
    fn test_fit_bounds_snaps_to_integer_zoom() {
        let (_, zoom) = fit_bounds(&city_bounds(), VW, VH, &desktop_fit());
        assert!((zoom - zoom.round()).abs() < 1e-9);
        assert!(zoom >= 3.0 && zoom <= 16.0);
    }

    #[test]
    fn test_fit_bounds_larger_padding_zooms_out() {
        let tight = fit_bounds(&city_bounds(), VW, VH, &desktop_fit());
        let loose = fit_bounds(
            &city_bounds(),
            VW,
            VH,
            &FitOptions {
                padding_frac: 0.35,
                ..desktop_fit()
            },
        );
        assert!(loose.1 <= tight.1);
    }

    #[test]
    fn test_fit_bounds_top_inset_shifts_center_north() {
        let plain = fit_bounds(&city_bounds(), VW, VH, &desktop_fit());
        let inset = fit_bounds(
            &city_bounds(),
            VW,
            VH,
            &FitOptions {
                top_inset_px: 56.0,
                ..desktop_fit()
            },
        );
        assert!(inset.0.lat > plain.0.lat);
    }

    #[test]
    fn test_fit_bounds_degenerate_box_uses_max_zoom() {
        let b = LatLngBounds::of(&[aarhus()]).unwrap();
        let (center, zoom) = fit_bounds(&b, VW, VH, &desktop_fit());
        assert!((zoom - 16.0).abs() < 1e-9);
        assert!((center.lat - aarhus().lat).abs() < 1e-6);
    }

    #[test]
    fn test_fit_bounds_degenerate_viewport_falls_back() {
        let (center, zoom) = fit_bounds(&city_bounds(), 0.0, VH, &desktop_fit());
        assert!((zoom - 3.0).abs() < 1e-9);
        assert!((center.lat - city_bounds().center().lat).abs() < 1e-9);
    }
}
