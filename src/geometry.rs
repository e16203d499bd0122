//! Graph-space geometry shared by the layouts and the viewport cull
//!
//! Screen coordinates relate to graph coordinates through a zoom factor
//! and a pan offset: `screen = graph * zoom + pan`.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in graph space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Bounding box of a point set, `None` when empty
    pub fn bounding<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Rect { min_x: x, min_y: y, max_x: x, max_y: y },
                Some(r) => Rect {
                    min_x: r.min_x.min(x),
                    min_y: r.min_y.min(y),
                    max_x: r.max_x.max(x),
                    max_y: r.max_y.max(y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Inclusive containment
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grow by `margin` on every side
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Zoom and pan of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

impl Viewport {
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Zoom used for coordinate math; non-positive zoom is treated as the
    /// smallest positive value.
    fn effective_zoom(&self) -> f64 {
        if self.zoom > 0.0 {
            self.zoom
        } else {
            f64::EPSILON
        }
    }

    pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
        let k = self.effective_zoom();
        ((sx - self.pan_x) / k, (sy - self.pan_y) / k)
    }

    pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
        let k = self.effective_zoom();
        (gx * k + self.pan_x, gy * k + self.pan_y)
    }

    /// Graph-space rectangle shown in a `width` x `height` container,
    /// grown by `padding` graph units on every side.
    pub fn visible_rect(&self, width: f64, height: f64, padding: f64) -> Rect {
        let (min_x, min_y) = self.screen_to_graph(0.0, 0.0);
        let (max_x, max_y) = self.screen_to_graph(width, height);
        Rect { min_x, min_y, max_x, max_y }.expand(padding)
    }

    /// Zoom/pan that centres `bounds` in the container, with the zoom
    /// clamped to `[min_zoom, max_zoom]`.
    pub fn fit(bounds: &Rect, width: f64, height: f64, min_zoom: f64, max_zoom: f64) -> Viewport {
        let zoom_x = if bounds.width() > 0.0 {
            width / bounds.width()
        } else {
            max_zoom
        };
        let zoom_y = if bounds.height() > 0.0 {
            height / bounds.height()
        } else {
            max_zoom
        };
        let zoom = clamp_between(zoom_x.min(zoom_y), min_zoom, max_zoom);
        let (cx, cy) = bounds.center();
        Viewport {
            zoom,
            pan_x: width / 2.0 - cx * zoom,
            pan_y: height / 2.0 - cy * zoom,
        }
    }
}

/// `value` limited to the range spanned by `a` and `b`, in either order.
/// Unlike `f64::clamp` this never panics: a NaN bound leaves that side open.
pub(crate) fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    let (lo, hi) = if a.is_nan() || b.is_nan() {
        (a, b)
    } else {
        (a.min(b), a.max(b))
    };
    value.max(lo).min(hi)
}
