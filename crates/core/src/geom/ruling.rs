//! Rulings: normalized line segments and their batch algorithms.
//!
//! A ruling wraps a raw segment from the content decoder and adds
//! normalization of nearly-axis-aligned segments, direction-agnostic
//! accessors, tolerant intersection tests, clipping, directional collapse of
//! broken fragments, and the sweep that finds every horizontal-vertical
//! crossing on a page.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use tracing::trace;

use super::{feq, sort::stable_sort_by, within, KeyF64, Point, PointKey, Rect};
use crate::config::TableParams;

/// A line segment between two endpoints, in y-down page coordinates.
///
/// After [`normalize`](Ruling::normalize), exactly one of
/// [`horizontal`](Ruling::horizontal), [`vertical`](Ruling::vertical) or
/// [`oblique`](Ruling::oblique) holds. Only non-oblique rulings take part in
/// cell finding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ruling {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A matched (horizontal, vertical) pair at an intersection point, both
/// already expanded by the perpendicular amount used to detect the crossing.
pub type RulingPair = (Ruling, Ruling);

/// Intersection points in row-major order, each mapping to the expanded
/// rulings that cross there.
pub type IntersectionMap = BTreeMap<PointKey, RulingPair>;

impl Ruling {
    /// Build a ruling from its top-left corner and extent, then normalize
    /// with the default angle tolerance.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self::from_points((left, top), (left + width, top + height))
    }

    /// Build a ruling between two endpoints, then normalize with the default
    /// angle tolerance.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let mut r = Self {
            x1: p1.0,
            y1: p1.1,
            x2: p2.0,
            y2: p2.1,
        };
        r.normalize(TableParams::default().normalize_angle_tolerance);
        r
    }

    /// Snap a nearly horizontal segment to `y2 = y1`, and a nearly vertical
    /// one to `x2 = x1`. Anything else is left oblique.
    pub fn normalize(&mut self, angle_tolerance: f64) {
        let angle = self.angle();
        let near = |target: f64| within(angle, target, angle_tolerance);
        if near(0.0) || near(180.0) || near(360.0) {
            self.y2 = self.y1;
        } else if near(90.0) || near(270.0) {
            self.x2 = self.x1;
        }
    }

    /// Angle of the p1-to-p2 vector against the x axis, in degrees [0, 360).
    pub fn angle(&self) -> f64 {
        let mut angle = (self.y2 - self.y1).atan2(self.x2 - self.x1).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        angle
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        ((self.x1 - self.x2).powi(2) + (self.y1 - self.y2).powi(2)).sqrt()
    }

    /// Strictly vertical: `x1 == x2` (fuzzily) and non-zero length.
    pub fn vertical(&self) -> bool {
        self.length() > 0.0 && feq(self.x1, self.x2)
    }

    /// Strictly horizontal: `y1 == y2` (fuzzily) and non-zero length.
    pub fn horizontal(&self) -> bool {
        self.length() > 0.0 && feq(self.y1, self.y2)
    }

    /// Neither horizontal nor vertical.
    pub fn oblique(&self) -> bool {
        !(self.vertical() || self.horizontal())
    }

    pub fn top(&self) -> f64 {
        self.y1
    }

    pub fn left(&self) -> f64 {
        self.x1
    }

    pub fn bottom(&self) -> f64 {
        self.y2
    }

    pub fn right(&self) -> f64 {
        self.x2
    }

    fn set_top(&mut self, v: f64) {
        self.y1 = v;
    }

    fn set_left(&mut self, v: f64) {
        self.x1 = v;
    }

    fn set_bottom(&mut self, v: f64) {
        self.y2 = v;
    }

    fn set_right(&mut self, v: f64) {
        self.x2 = v;
    }

    /// The fixed coordinate: x for a vertical ruling, y for a horizontal one.
    ///
    /// # Panics
    /// Panics when called on an oblique ruling.
    pub fn position(&self) -> f64 {
        assert!(!self.oblique(), "oblique rulings have no position");
        if self.vertical() {
            self.left()
        } else {
            self.top()
        }
    }

    /// The varying coordinate at the segment's first endpoint.
    ///
    /// # Panics
    /// Panics when called on an oblique ruling.
    pub fn start(&self) -> f64 {
        assert!(!self.oblique(), "oblique rulings have no start");
        if self.vertical() {
            self.top()
        } else {
            self.left()
        }
    }

    /// The varying coordinate at the segment's second endpoint.
    ///
    /// # Panics
    /// Panics when called on an oblique ruling.
    pub fn end(&self) -> f64 {
        assert!(!self.oblique(), "oblique rulings have no end");
        if self.vertical() {
            self.bottom()
        } else {
            self.right()
        }
    }

    fn set_start(&mut self, v: f64) {
        if self.vertical() {
            self.set_top(v);
        } else {
            self.set_left(v);
        }
    }

    fn set_end(&mut self, v: f64) {
        if self.vertical() {
            self.set_bottom(v);
        } else {
            self.set_right(v);
        }
    }

    fn set_start_end(&mut self, start: f64, end: f64) {
        if self.vertical() {
            self.set_top(start);
            self.set_bottom(end);
        } else {
            self.set_left(start);
            self.set_right(end);
        }
    }

    /// Whether the two rulings are orthogonal (one vertical, one horizontal).
    pub fn perpendicular_to(&self, other: &Ruling) -> bool {
        self.vertical() == other.horizontal()
    }

    /// A copy grown by `amount` at both ends along its own direction.
    ///
    /// # Panics
    /// Panics when called on an oblique ruling.
    pub fn expand(&self, amount: f64) -> Ruling {
        let mut r = *self;
        r.set_start(self.start() - amount);
        r.set_end(self.end() + amount);
        r
    }

    /// Tolerant intersection test.
    ///
    /// Strict segment intersection passes directly. A perpendicular pair is
    /// retried with this ruling expanded by `perpendicular_expand`; a
    /// colinear or parallel pair is retried with both sides expanded by
    /// `colinear_expand`.
    pub fn nearly_intersects(
        &self,
        other: &Ruling,
        colinear_expand: f64,
        perpendicular_expand: f64,
    ) -> bool {
        if self.intersects_line(other) {
            return true;
        }
        if self.perpendicular_to(other) {
            self.expand(perpendicular_expand).intersects_line(other)
        } else {
            self.expand(colinear_expand)
                .intersects_line(&other.expand(colinear_expand))
        }
    }

    /// Exact segment-segment intersection, endpoints included.
    pub fn intersects_line(&self, other: &Ruling) -> bool {
        segments_intersect(
            (self.x1, self.y1),
            (self.x2, self.y2),
            (other.x1, other.y1),
            (other.x2, other.y2),
        )
    }

    /// Intersection point of a perpendicular pair, with both rulings
    /// expanded by `perpendicular_expand` first. `None` when the expanded
    /// segments still do not cross.
    ///
    /// # Panics
    /// Panics when the expanded rulings intersect but are not one
    /// horizontal and one vertical.
    pub fn intersection_point(&self, other: &Ruling, perpendicular_expand: f64) -> Option<Point> {
        let a = self.expand(perpendicular_expand);
        let b = other.expand(perpendicular_expand);

        if !a.intersects_line(&b) {
            return None;
        }

        let (horizontal, vertical) = if a.horizontal() && b.vertical() {
            (a, b)
        } else if a.vertical() && b.horizontal() {
            (b, a)
        } else {
            panic!("rulings must be orthogonal: one horizontal and one vertical");
        };
        Some((vertical.left(), horizontal.top()))
    }

    /// Whether any part of the segment lies within `area`.
    pub fn intersects_rect(&self, area: &Rect) -> bool {
        self.clip_to(area).is_some()
    }

    /// Clip to a rectangle with Cohen–Sutherland. `None` when the segment
    /// lies entirely outside.
    pub fn clip_to(&self, area: &Rect) -> Option<Ruling> {
        const INSIDE: u8 = 0;
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const ABOVE: u8 = 4;
        const BELOW: u8 = 8;

        let outcode = |x: f64, y: f64| -> u8 {
            let mut code = INSIDE;
            if x < area.left {
                code |= LEFT;
            } else if x > area.right() {
                code |= RIGHT;
            }
            if y < area.top {
                code |= ABOVE;
            } else if y > area.bottom() {
                code |= BELOW;
            }
            code
        };

        let (mut x1, mut y1, mut x2, mut y2) = (self.x1, self.y1, self.x2, self.y2);
        let mut code1 = outcode(x1, y1);
        let mut code2 = outcode(x2, y2);

        loop {
            if code1 | code2 == INSIDE {
                return Some(Ruling {
                    x1,
                    y1,
                    x2,
                    y2,
                });
            }
            if code1 & code2 != INSIDE {
                return None;
            }

            let code = if code1 != INSIDE { code1 } else { code2 };
            let (x, y);
            if code & BELOW != INSIDE {
                x = x1 + (x2 - x1) * (area.bottom() - y1) / (y2 - y1);
                y = area.bottom();
            } else if code & ABOVE != INSIDE {
                x = x1 + (x2 - x1) * (area.top - y1) / (y2 - y1);
                y = area.top;
            } else if code & RIGHT != INSIDE {
                y = y1 + (y2 - y1) * (area.right() - x1) / (x2 - x1);
                x = area.right();
            } else {
                y = y1 + (y2 - y1) * (area.left - x1) / (x2 - x1);
                x = area.left;
            }

            if code == code1 {
                x1 = x;
                y1 = y;
                code1 = outcode(x1, y1);
            } else {
                x2 = x;
                y2 = y;
                code2 = outcode(x2, y2);
            }
        }
    }
}

/// Clip every ruling to `area`, dropping the ones entirely outside.
pub fn crop_rulings_to_area(rulings: &[Ruling], area: &Rect) -> Vec<Ruling> {
    rulings
        .iter()
        .filter_map(|r| r.clip_to(area))
        .collect()
}

/// Fuse a same-orientation list of rulings into clean, maximal segments.
///
/// The list is sorted by (position, start); each ruling at the same fuzzy
/// position as the previously kept one, close enough along its length to
/// nearly intersect it, extends that ruling instead of being kept itself.
/// Zero-length leftovers are dropped. PDF producers routinely draw one line
/// as many short strokes; this undoes that.
///
/// # Panics
/// Panics if the list contains an oblique ruling.
pub fn collapse_oriented_rulings(lines: Vec<Ruling>, params: &TableParams) -> Vec<Ruling> {
    let mut lines = lines;
    stable_sort_by(&mut lines, |a, b| {
        let diff = a.position() - b.position();
        let key = if diff == 0.0 {
            a.start() - b.start()
        } else {
            diff
        };
        key.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    });

    let mut collapsed: Vec<Ruling> = Vec::new();
    for next in lines {
        if let Some(last) = collapsed.last_mut() {
            if feq(next.position(), last.position())
                && last.nearly_intersects(&next, params.colinear_expand, params.perpendicular_expand)
            {
                let last_start = last.start();
                let last_end = last.end();
                let last_flipped = last_start > last_end;
                let next_flipped = next.start() > next.end();

                // A fragment drawn in the opposite direction contributes its
                // endpoints swapped.
                let (next_s, next_e) = if next_flipped != last_flipped {
                    (next.end(), next.start())
                } else {
                    (next.start(), next.end())
                };

                let new_start = if last_flipped {
                    next_s.max(last_start)
                } else {
                    next_s.min(last_start)
                };
                let new_end = if last_flipped {
                    next_e.min(last_end)
                } else {
                    next_e.max(last_end)
                };
                last.set_start_end(new_start, new_end);
                debug_assert!(!last.oblique());
                continue;
            }
        }
        if next.length() == 0.0 {
            continue;
        }
        collapsed.push(next);
    }
    collapsed
}

/// Find every crossing between the horizontal and vertical rulings with an
/// event sweep along the x axis.
///
/// Each horizontal contributes an enter event at `left - expand` and a leave
/// event at `right + expand`; each vertical contributes one event at its x.
/// At equal positions a vertical sorts after an entering horizontal and
/// before a leaving one, so a vertical sitting exactly on a horizontal's
/// endpoint still sees it as active. The returned map is ordered by (y, x)
/// and holds the expanded copies whose identity cell discovery matches on.
pub fn find_intersections(
    horizontals: &[Ruling],
    verticals: &[Ruling],
    params: &TableParams,
) -> IntersectionMap {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum EventKind {
        HorizontalEnter,
        HorizontalLeave,
        Vertical,
    }

    #[derive(Clone, Copy)]
    struct Event {
        kind: EventKind,
        position: f64,
        ruling: Ruling,
    }

    let expand = params.perpendicular_expand;
    let mut events = Vec::with_capacity(horizontals.len() * 2 + verticals.len());
    for h in horizontals {
        events.push(Event {
            kind: EventKind::HorizontalEnter,
            position: h.left() - expand,
            ruling: *h,
        });
        events.push(Event {
            kind: EventKind::HorizontalLeave,
            position: h.right() + expand,
            ruling: *h,
        });
    }
    for v in verticals {
        events.push(Event {
            kind: EventKind::Vertical,
            position: v.left(),
            ruling: *v,
        });
    }

    stable_sort_by(&mut events, |a, b| {
        if feq(a.position, b.position) {
            use EventKind::*;
            match (a.kind, b.kind) {
                (Vertical, HorizontalEnter) => Ordering::Greater,
                (Vertical, HorizontalLeave) => Ordering::Less,
                (HorizontalEnter, Vertical) => Ordering::Less,
                (HorizontalLeave, Vertical) => Ordering::Greater,
                _ => a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal),
            }
        } else {
            a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal)
        }
    });

    // Active horizontals keyed by their top coordinate.
    let mut active: BTreeMap<KeyF64, Ruling> = BTreeMap::new();
    let mut intersections: IntersectionMap = BTreeMap::new();

    for event in events {
        match event.kind {
            EventKind::HorizontalEnter => {
                active.insert(OrderedFloat(event.ruling.top()), event.ruling);
            }
            EventKind::HorizontalLeave => {
                active.remove(&OrderedFloat(event.ruling.top()));
            }
            EventKind::Vertical => {
                for h in active.values() {
                    if let Some((x, y)) = h.intersection_point(&event.ruling, expand) {
                        intersections.insert(
                            PointKey::of(x, y),
                            (h.expand(expand), event.ruling.expand(expand)),
                        );
                    }
                }
            }
        }
    }

    trace!(
        horizontals = horizontals.len(),
        verticals = verticals.len(),
        intersections = intersections.len(),
        "swept ruling crossings"
    );
    intersections
}

fn orientation(p: Point, q: Point, r: Point) -> f64 {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
}

fn on_segment(p: Point, q: Point, r: Point) -> bool {
    r.0 >= p.0.min(q.0) && r.0 <= p.0.max(q.0) && r.1 >= p.1.min(q.1) && r.1 <= p.1.max(q.1)
}

fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(p3, p4, p1))
        || (d2 == 0.0 && on_segment(p3, p4, p2))
        || (d3 == 0.0 && on_segment(p1, p2, p3))
        || (d4 == 0.0 && on_segment(p1, p2, p4))
}
