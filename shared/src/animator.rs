use rand::Rng;

use crate::{
    geometry::{Point, Viewport, bezier_point, clamp, random_in_range},
    model::{Budget, Pace, Style, TripForm, parse_leading_int},
    theme::{Rgb, Theme},
};

/// Samples per full curve when drawing the travelled part of a route.
pub const CURVE_SEGMENTS: usize = 36;
const DEFAULT_SCENE_DAYS: i64 = 4;
const MIN_ROUTES: i64 = 8;
const MAX_ROUTES: i64 = 22;
const FIRST_FRAME_MS: f64 = 16.0;
const MAX_FRAME_MS: f64 = 50.0;
const MIN_STEP: f64 = 0.00015;
const MAX_STEP: f64 = 0.0012;
const LINE_WIDTH: f64 = 1.6;
const LINE_BLUR: f64 = 18.0;
const DOT_BLUR: f64 = 22.0;
const DOT_RADIUS: f64 = 2.2;

/// Inputs that shape the scene. A change to any of them rebuilds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub style: Style,
    pub budget: Budget,
    pub pace: Pace,
    pub days: i64,
}

impl SceneParams {
    pub fn from_form(form: &TripForm) -> Self {
        Self {
            style: Style::from_form(&form.style),
            budget: Budget::from_form(&form.budget),
            pace: Pace::from_form(&form.pace),
            days: parse_leading_int(&form.days)
                .filter(|&d| d != 0)
                .unwrap_or(DEFAULT_SCENE_DAYS),
        }
    }

    pub fn route_count(&self) -> usize {
        let base = self.days.clamp(1, 14);
        (base * 3).clamp(MIN_ROUTES, MAX_ROUTES) as usize
    }

    fn curvature<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.style {
            Style::Adventure => random_in_range(rng, 0.35, 0.9),
            Style::Cultural => random_in_range(rng, 0.25, 0.7),
            Style::Luxury => random_in_range(rng, 0.18, 0.55),
            _ => random_in_range(rng, 0.2, 0.6),
        }
    }
}

impl Default for SceneParams {
    fn default() -> Self {
        Self::from_form(&TripForm::default())
    }
}

/// A decorative curved route: a cubic Bézier with a dot travelling along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    /// Position along the curve, in `[0, 1]` between frames.
    pub t: f64,
    /// `1.0` travels towards `p3`, `-1.0` towards `p0`.
    pub direction: f64,
    pub speed: f64,
}

impl Route {
    pub fn point_at(&self, t: f64) -> Point {
        bezier_point(self.p0, self.p1, self.p2, self.p3, t)
    }

    fn spawn<R: Rng + ?Sized>(scene: &SceneParams, viewport: Viewport, rng: &mut R) -> Self {
        let edge_bias = rng.gen_bool(0.55);
        let p0 = random_point(viewport, edge_bias, rng);
        let p3 = random_point(viewport, edge_bias, rng);
        let curvature = scene.curvature(rng);
        let p1 = Point {
            x: p0.x + (p3.x - p0.x) * curvature + random_in_range(rng, -120.0, 120.0),
            y: p0.y + random_in_range(rng, -180.0, 180.0),
        };
        let p2 = Point {
            x: p3.x - (p3.x - p0.x) * curvature + random_in_range(rng, -120.0, 120.0),
            y: p3.y + random_in_range(rng, -180.0, 180.0),
        };
        Self {
            p0,
            p1,
            p2,
            p3,
            t: random_in_range(rng, 0.0, 1.0),
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            speed: random_in_range(rng, 0.4, 1.2),
        }
    }

    /// Advances by `dt` milliseconds, respawning on a fresh curve when the
    /// dot runs off either end.
    fn advance<R: Rng + ?Sized>(&mut self, base_speed: f64, dt: f64, viewport: Viewport, rng: &mut R) {
        let step = clamp(base_speed * self.speed, MIN_STEP, MAX_STEP);
        self.t += step * self.direction * dt;
        if self.t > 1.0 || self.t < 0.0 {
            self.t = if self.direction > 0.0 { 0.0 } else { 1.0 };
            self.respawn(viewport, rng);
        }
    }

    fn respawn<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let (w, h) = (viewport.width, viewport.height);
        self.p0 = Point::new(random_in_range(rng, 0.0, w), random_in_range(rng, 0.0, h));
        self.p3 = Point::new(random_in_range(rng, 0.0, w), random_in_range(rng, 0.0, h));
        self.p1 = Point::new(
            self.p0.x + random_in_range(rng, -200.0, 200.0),
            self.p0.y + random_in_range(rng, -220.0, 220.0),
        );
        self.p2 = Point::new(
            self.p3.x + random_in_range(rng, -200.0, 200.0),
            self.p3.y + random_in_range(rng, -220.0, 220.0),
        );
    }

    /// Curve samples from the start up to the current position.
    pub fn travelled_path(&self) -> Vec<Point> {
        let reached = (CURVE_SEGMENTS as f64 * clamp(self.t, 0.0, 1.0)).floor() as usize;
        (0..=reached)
            .map(|s| self.point_at(s as f64 / CURVE_SEGMENTS as f64))
            .collect()
    }
}

fn random_point<R: Rng + ?Sized>(viewport: Viewport, edge_bias: bool, rng: &mut R) -> Point {
    let (w, h) = (viewport.width, viewport.height);
    if edge_bias {
        let x = if rng.gen_bool(0.5) {
            random_in_range(rng, 0.0, 0.15 * w)
        } else {
            random_in_range(rng, 0.85 * w, w)
        };
        let y = if rng.gen_bool(0.5) {
            random_in_range(rng, 0.0, 0.2 * h)
        } else {
            random_in_range(rng, 0.8 * h, h)
        };
        Point::new(x, y)
    } else {
        Point::new(
            random_in_range(rng, 0.05 * w, 0.95 * w),
            random_in_range(rng, 0.1 * h, 0.9 * h),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgb,
    pub alpha: f64,
    pub width: f64,
    pub glow: Rgb,
    pub blur: f64,
}

/// Drawing surface for the route scene.
pub trait Canvas {
    /// Wipes the previous frame and switches to additive blending.
    fn clear(&mut self);
    fn stroke_path(&mut self, points: &[Point], pen: &Pen);
    fn fill_circle(&mut self, center: Point, radius: f64, pen: &Pen);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Per-frame callback scheduling (`requestAnimationFrame` in a browser).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Owns the decorative route scene and its frame loop.
///
/// With reduced motion requested the animator is inert: it never builds a
/// scene, never draws and never asks for a frame.
#[derive(Debug)]
pub struct RouteAnimator {
    reduced_motion: bool,
    viewport: Viewport,
    theme: Option<Theme>,
    routes: Vec<Route>,
    last_timestamp: Option<f64>,
    pending: Option<FrameHandle>,
}

impl RouteAnimator {
    pub fn new(viewport: Viewport, reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            viewport,
            theme: None,
            routes: Vec::new(),
            last_timestamp: None,
            pending: None,
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Rebuilds theme and routes for `scene` and restarts the frame loop,
    /// cancelling any frame already scheduled.
    pub fn update<R, S>(&mut self, scene: &SceneParams, rng: &mut R, scheduler: &mut S)
    where
        R: Rng + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.reduced_motion {
            return;
        }
        self.theme = Some(Theme::for_trip(scene.style, scene.budget, scene.pace));
        self.routes = (0..scene.route_count())
            .map(|_| Route::spawn(scene, self.viewport, rng))
            .collect();
        self.last_timestamp = None;
        self.stop(scheduler);
        self.pending = scheduler.request_frame();
        tracing::debug!(routes = self.routes.len(), "route scene rebuilt");
    }

    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Runs one frame at `timestamp_ms`: advance every route, redraw the
    /// scene and schedule the next frame.
    pub fn frame<R, C, S>(&mut self, timestamp_ms: f64, rng: &mut R, canvas: &mut C, scheduler: &mut S)
    where
        R: Rng + ?Sized,
        C: Canvas + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.pending = None;
        if self.reduced_motion || self.routes.is_empty() {
            return;
        }
        let Some(theme) = self.theme else {
            return;
        };

        let dt = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).min(MAX_FRAME_MS),
            None => FIRST_FRAME_MS,
        };
        self.last_timestamp = Some(timestamp_ms);

        let line = Pen {
            color: theme.line,
            alpha: theme.line_alpha,
            width: LINE_WIDTH,
            glow: theme.glow,
            blur: LINE_BLUR,
        };
        let dot = Pen {
            color: theme.dot,
            alpha: theme.glow_alpha,
            width: LINE_WIDTH,
            glow: theme.glow,
            blur: DOT_BLUR,
        };

        canvas.clear();
        for route in &mut self.routes {
            route.advance(theme.speed, dt, self.viewport, rng);
            canvas.stroke_path(&route.travelled_path(), &line);
            canvas.fill_circle(route.point_at(clamp(route.t, 0.0, 1.0)), DOT_RADIUS, &dot);
        }

        self.pending = scheduler.request_frame();
    }
}
