//! 2D drawing primitives
//!
//! Aliased and antialiased lines and circles, active-edge-table polygon fill
//! and Liang-Barsky segment clipping. Everything draws straight into a
//! [`Framebuffer`]; out-of-range pixels are dropped by the framebuffer.

use super::framebuffer::Framebuffer;
use super::types::{Color, Texture};

/// Fill source for [`Framebuffer::fill_polygon`]
#[derive(Debug, Clone, Copy)]
pub enum FillStyle<'a> {
    Solid(Color),
    /// Tiled image, sampled at (x mod width, y mod height)
    Pattern(&'a Texture),
}

impl FillStyle<'_> {
    fn color_at(&self, x: i32, y: i32) -> Color {
        match self {
            FillStyle::Solid(c) => *c,
            FillStyle::Pattern(tex) => tex.tiled(x, y),
        }
    }
}

/// Axis-aligned clip rectangle (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl ClipRect {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    /// Rectangle spanned by two arbitrary corners
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self {
            xmin: a.0.min(b.0),
            ymin: a.1.min(b.1),
            xmax: a.0.max(b.0),
            ymax: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

/// Clip segment `p0 -> p1` against `rect` (Liang-Barsky).
///
/// Returns the clipped endpoints, or `None` when no part of the segment lies
/// inside the rectangle.
pub fn liang_barsky_clip(
    rect: &ClipRect,
    p0: (f32, f32),
    p1: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;

    let p = [-dx, dx, -dy, dy];
    let q = [
        p0.0 - rect.xmin,
        rect.xmax - p0.0,
        p0.1 - rect.ymin,
        rect.ymax - p0.1,
    ];

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (&pk, &qk) in p.iter().zip(q.iter()) {
        if pk == 0.0 {
            // Parallel to this boundary: either fully outside or irrelevant
            if qk < 0.0 {
                return None;
            }
            continue;
        }

        let t = qk / pk;
        if pk < 0.0 {
            // Entering
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            // Leaving
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Step indices `i` for which `start + i * inc` lies within one pixel of
/// `0..len`. Empty (lo > hi) when the coordinate never gets there.
fn visible_steps(start: f64, inc: f64, len: usize) -> (i64, i64) {
    let (lo, hi) = (-1.0, len as f64);
    if inc == 0.0 {
        return if (lo..=hi).contains(&start) {
            (i64::MIN, i64::MAX)
        } else {
            (1, 0)
        };
    }
    let a = (lo - start) / inc;
    let b = (hi - start) / inc;
    (a.min(b).floor() as i64, a.max(b).ceil() as i64)
}

/// The 8 octant reflections of (x, y)
#[inline]
fn octants(x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (x, y),
        (-x, y),
        (x, -y),
        (-x, -y),
        (y, x),
        (-y, x),
        (y, -x),
        (-y, -x),
    ]
}

/// Active edge table entry. Kept in 64 bits so vertices anywhere in the
/// `i32` range cannot overflow.
#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    y_min: i64,
    y_max: i64,
    /// x at `y_min` until the edge joins the sweep, then x on the current row
    x: f64,
    inv_slope: f64,
}

impl Framebuffer {
    /// Aliased line (DDA): `max(|dx|, |dy|) + 1` samples rounded to nearest.
    ///
    /// Only samples that can land on the buffer are visited.
    pub fn draw_line_dda(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = x1 as i64 - x0 as i64;
        let dy = y1 as i64 - y0 as i64;
        let steps = dx.abs().max(dy.abs());

        if steps == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let x_inc = dx as f64 / steps as f64;
        let y_inc = dy as f64 / steps as f64;

        let (lo_x, hi_x) = visible_steps(x0 as f64, x_inc, self.width);
        let (lo_y, hi_y) = visible_steps(y0 as f64, y_inc, self.height);
        let first = lo_x.max(lo_y).max(0);
        let last = hi_x.min(hi_y).min(steps);

        for i in first..=last {
            let x = x0 as f64 + i as f64 * x_inc;
            let y = y0 as f64 + i as f64 * y_inc;
            self.set_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    #[inline]
    fn plot_wu(&mut self, steep: bool, x: i64, y: i64, coverage: f64, color: Color) {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        if steep {
            self.blend_pixel(y, x, coverage as f32, color);
        } else {
            self.blend_pixel(x, y, coverage as f32, color);
        }
    }

    /// Antialiased line (Xiaolin Wu)
    pub fn draw_line_wu(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let gradient = if dx == 0.0 { 0.0 } else { dy / dx };

        // First endpoint
        let xend = x0.round();
        let yend1 = y0 + gradient * (xend - x0);
        let xgap = rfpart(x0 + 0.5);
        let xpx1 = xend as i64;
        let ypx1 = yend1.floor() as i64;
        self.plot_wu(steep, xpx1, ypx1, rfpart(yend1) * xgap, color);
        self.plot_wu(steep, xpx1, ypx1 + 1, fpart(yend1) * xgap, color);

        // Second endpoint
        let xend = x1.round();
        let yend = y1 + gradient * (xend - x1);
        let xgap = fpart(x1 + 0.5);
        let xpx2 = xend as i64;
        let ypx2 = yend.floor() as i64;
        self.plot_wu(steep, xpx2, ypx2, rfpart(yend) * xgap, color);
        self.plot_wu(steep, xpx2, ypx2 + 1, fpart(yend) * xgap, color);

        // Interior, limited to the columns (rows when steep) on the buffer
        let major_len = (if steep { self.height } else { self.width }) as i64;
        for x in (xpx1 + 1).max(0)..xpx2.min(major_len) {
            let intery = yend1 + gradient * (x - xpx1) as f64;
            let y = intery.floor() as i64;
            self.plot_wu(steep, x, y, rfpart(intery), color);
            self.plot_wu(steep, x, y + 1, fpart(intery), color);
        }
    }

    /// Aliased circle outline (integer midpoint algorithm)
    pub fn draw_circle_midpoint(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }

        let mut x = 0;
        let mut y = radius;
        let mut d = 1 - radius;

        while x <= y {
            for (dx, dy) in octants(x, y) {
                self.set_pixel(cx.saturating_add(dx), cy.saturating_add(dy), color);
            }

            if d < 0 {
                d += 2 * x + 3;
            } else {
                d += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Antialiased circle outline
    pub fn draw_circle_wu(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        self.wu_circle(cx, cy, radius, None, color);
    }

    /// Antialiased half circle: only the side where `(p - c) . normal >= 0`
    pub fn draw_half_circle_wu(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        normal: (f32, f32),
        color: Color,
    ) {
        self.wu_circle(cx, cy, radius, Some(normal), color);
    }

    fn wu_circle(&mut self, cx: i32, cy: i32, radius: i32, half: Option<(f32, f32)>, color: Color) {
        if radius < 0 {
            return;
        }
        let r2 = (radius as f32) * (radius as f32);

        // First octant only (x >= y); the reflections cover the rest
        for y in 0..=radius {
            let x_real = (r2 - (y * y) as f32).max(0.0).sqrt();
            if (y as f32) > x_real {
                break;
            }
            let xi = x_real.floor() as i32;
            let frac = x_real - xi as f32;

            for (x, coverage) in [(xi, 1.0 - frac), (xi + 1, frac)] {
                let points = octants(x, y);
                for (k, &(dx, dy)) in points.iter().enumerate() {
                    // On the diagonal and the axes some reflections coincide
                    if points[..k].contains(&(dx, dy)) {
                        continue;
                    }
                    if let Some((nx, ny)) = half {
                        if dx as f32 * nx + dy as f32 * ny < 0.0 {
                            continue;
                        }
                    }
                    self.blend_pixel(cx.saturating_add(dx), cy.saturating_add(dy), coverage, color);
                }
            }
        }
    }

    /// Scanline polygon fill using an active edge table.
    ///
    /// Rows run from the top vertex down to (not including) the bottom one;
    /// in each row a span covers the pixels from `ceil(x_left)` up to the last
    /// pixel strictly left of `x_right`. Only rows on the buffer are swept, so
    /// the cost does not depend on how far the polygon extends off screen.
    pub fn fill_polygon(&mut self, vertices: &[(i32, i32)], style: FillStyle) {
        if vertices.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        // Edge table sorted by starting row; horizontal edges cover no rows
        let n = vertices.len();
        let mut edges: Vec<ActiveEdge> = (0..n)
            .filter_map(|i| {
                let (ax, ay) = (vertices[i].0 as i64, vertices[i].1 as i64);
                let (bx, by) = (vertices[(i + 1) % n].0 as i64, vertices[(i + 1) % n].1 as i64);
                if ay == by {
                    return None;
                }
                let ((lx, ly), (hx, hy)) = if ay < by {
                    ((ax, ay), (bx, by))
                } else {
                    ((bx, by), (ax, ay))
                };
                Some(ActiveEdge {
                    y_min: ly,
                    y_max: hy,
                    x: lx as f64,
                    inv_slope: (hx - lx) as f64 / (hy - ly) as f64,
                })
            })
            .collect();
        edges.sort_by_key(|e| e.y_min);

        let Some(y_lo) = edges.first().map(|e| e.y_min) else {
            return;
        };
        let y_hi = edges.iter().map(|e| e.y_max).max().unwrap_or(y_lo);
        let first_row = y_lo.max(0);
        let last_row = (y_hi - 1).min(self.height as i64 - 1);
        let last_col = self.width as i64 - 1;

        let mut pending = edges.into_iter().peekable();
        let mut active: Vec<ActiveEdge> = Vec::new();
        for y in first_row..=last_row {
            while let Some(edge) = pending.next_if(|e| e.y_min <= y) {
                // Edges that started above the buffer join at their x on this row
                active.push(ActiveEdge {
                    x: edge.x + edge.inv_slope * (y - edge.y_min) as f64,
                    ..edge
                });
            }
            active.retain(|e| e.y_max > y);
            active.sort_by(|a, b| a.x.total_cmp(&b.x));

            for pair in active.chunks_exact(2) {
                let start = (pair[0].x.ceil() as i64).max(0);
                let end = (pair[1].x.ceil() as i64).saturating_sub(1).min(last_col);
                for x in start..=end {
                    let (x, y) = (x as i32, y as i32);
                    self.set_pixel(x, y, style.color_at(x, y));
                }
            }

            for edge in &mut active {
                edge.x += edge.inv_slope;
            }
        }
    }

    /// Freehand stroke: consecutive points joined with DDA lines
    pub fn draw_polyline(&mut self, points: &[(i32, i32)], color: Color) {
        match points {
            [] => {}
            [(x, y)] => self.set_pixel(*x, *y, color),
            _ => {
                for seg in points.windows(2) {
                    let (a, b) = (seg[0], seg[1]);
                    self.draw_line_dda(a.0, a.1, b.0, b.1, color);
                }
            }
        }
    }

    /// Thick line as vertically offset copies of a thin one
    pub fn draw_thick_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        thickness: i32,
        antialias: bool,
        color: Color,
    ) {
        let half = thickness.max(1) / 2;
        for i in -half..=half {
            if antialias {
                self.draw_line_wu(x0, y0.saturating_add(i), x1, y1.saturating_add(i), color);
            } else {
                self.draw_line_dda(x0, y0.saturating_add(i), x1, y1.saturating_add(i), color);
            }
        }
    }

    /// Thick circle as concentric midpoint circles
    pub fn draw_thick_circle(&mut self, cx: i32, cy: i32, radius: i32, thickness: i32, color: Color) {
        let half = thickness.max(1) / 2;
        for i in -half..=half {
            let r = radius + i;
            if r > 0 {
                self.draw_circle_midpoint(cx, cy, r, color);
            }
        }
    }

    /// Closed polygon outline
    pub fn draw_polygon_outline(
        &mut self,
        vertices: &[(i32, i32)],
        thickness: i32,
        antialias: bool,
        color: Color,
    ) {
        let n = vertices.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            self.draw_thick_line(a.0, a.1, b.0, b.1, thickness, antialias, color);
        }
    }

    /// Antialiased capsule outline around the axis `p0 -> p1`
    pub fn draw_pill_wu(&mut self, p0: (i32, i32), p1: (i32, i32), radius: i32, color: Color) {
        let dx = (p1.0 - p0.0) as f32;
        let dy = (p1.1 - p0.1) as f32;
        let len = (dx * dx + dy * dy).sqrt();

        if len < 1e-6 {
            self.draw_circle_wu(p0.0, p0.1, radius, color);
            return;
        }

        let (ux, uy) = (dx / len, dy / len);
        let (ox, oy) = (-uy * radius as f32, ux * radius as f32);

        for side in [1.0f32, -1.0] {
            let ax = (p0.0 as f32 + side * ox).round() as i32;
            let ay = (p0.1 as f32 + side * oy).round() as i32;
            let bx = (p1.0 as f32 + side * ox).round() as i32;
            let by = (p1.1 as f32 + side * oy).round() as i32;
            self.draw_line_wu(ax, ay, bx, by, color);
        }

        self.draw_half_circle_wu(p0.0, p0.1, radius, (-ux, -uy), color);
        self.draw_half_circle_wu(p1.0, p1.1, radius, (ux, uy), color);
    }

    /// Wu line restricted to each rectangle in `clips`
    pub fn draw_line_clipped(
        &mut self,
        clips: &[ClipRect],
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) {
        let p0 = (x0 as f32, y0 as f32);
        let p1 = (x1 as f32, y1 as f32);
        for rect in clips {
            if let Some((a, b)) = liang_barsky_clip(rect, p0, p1) {
                self.draw_line_wu(
                    a.0.round() as i32,
                    a.1.round() as i32,
                    b.0.round() as i32,
                    b.1.round() as i32,
                    color,
                );
            }
        }
    }
}
