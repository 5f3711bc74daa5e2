//! Pixel geometry for each chart kind, in plot-local coordinates, together
//! with the hit-tests that map a plot-space point back to a data element.
//!
//! Geometry is always rebuilt from the current extent; nothing here is
//! cached across resizes.

use super::scale::{
    ArcSlot, Band, DONUT_START_DEG, ValueDomain, arc_slots, band, band_index_at, nearest_point_index,
    point_position, polar_point,
};
use super::entities::ChartData;
use super::value_objects::{DataPoint, Dimensions, Orientation, ScreenPoint, Series};

/// Extra outer radius of the hovered donut segment
pub const DONUT_HOVER_GROW: f64 = 6.0;
/// Inner radius reduction of the hovered donut segment
pub const DONUT_HOVER_SHRINK: f64 = 4.0;
/// Inner/outer radius ratio of the ring
pub const DONUT_INNER_RATIO: f64 = 0.6;

/// Which kind of element a hit resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitElement {
    Bar,
    Series(usize),
    Segment,
}

/// A resolved data element plus the stable anchor its tooltip attaches to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub element: HitElement,
    /// Plot-space anchor (bar top, line point or arc centroid)
    pub anchor: ScreenPoint,
}

impl Hit {
    /// Same logical element, regardless of anchor drift.
    pub fn same_target(&self, other: &Hit) -> bool {
        self.index == other.index && self.element == other.element
    }

    pub fn series(&self) -> Option<usize> {
        match self.element {
            HitElement::Series(s) => Some(s),
            _ => None,
        }
    }
}

fn inside(extent: Dimensions, p: ScreenPoint) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x <= extent.width && p.y <= extent.height
}

/// Axis-aligned rectangle in plot space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarShape {
    pub band: Band,
    /// Full bar length at progress 1
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub orientation: Orientation,
    pub extent: Dimensions,
    pub domain: ValueDomain,
    pub bars: Vec<BarShape>,
}

impl BarGeometry {
    pub fn compute(points: &[DataPoint], orientation: Orientation, extent: Dimensions) -> Option<Self> {
        if points.is_empty() || !extent.is_drawable() {
            return None;
        }
        let domain = ValueDomain::for_bars(points.iter().map(|p| p.value));
        let (category_extent, value_extent) = match orientation {
            Orientation::Vertical => (extent.width, extent.height),
            Orientation::Horizontal => (extent.height, extent.width),
        };
        let bars = points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let band = band(i, points.len(), category_extent)?;
                Some(BarShape { band, length: domain.to_pixel(p.value.max(0.0), value_extent) })
            })
            .collect();
        Some(Self { orientation, extent, domain, bars })
    }

    pub fn value_extent(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.extent.height,
            Orientation::Horizontal => self.extent.width,
        }
    }

    /// Bar rectangle with its length scaled by `progress`.
    pub fn rect(&self, index: usize, progress: f64) -> Option<Rect> {
        let bar = self.bars.get(index)?;
        let len = bar.length * progress.clamp(0.0, 1.0);
        Some(match self.orientation {
            Orientation::Vertical => Rect {
                x: bar.band.start(),
                y: self.extent.height - len,
                width: bar.band.width,
                height: len,
            },
            Orientation::Horizontal => Rect { x: 0.0, y: bar.band.start(), width: len, height: bar.band.width },
        })
    }

    /// Top of the bar (or its far end when horizontal).
    pub fn anchor(&self, index: usize) -> Option<ScreenPoint> {
        let bar = self.bars.get(index)?;
        Some(match self.orientation {
            Orientation::Vertical => ScreenPoint::new(bar.band.center, self.extent.height - bar.length),
            Orientation::Horizontal => ScreenPoint::new(bar.length, bar.band.center),
        })
    }

    /// Category column under the point, clamped to a valid index.
    pub fn hit_test(&self, point: ScreenPoint) -> Option<Hit> {
        if !inside(self.extent, point) {
            return None;
        }
        let index = match self.orientation {
            Orientation::Vertical => band_index_at(point.x, self.bars.len(), self.extent.width),
            Orientation::Horizontal => band_index_at(point.y, self.bars.len(), self.extent.height),
        }?;
        Some(Hit { index, element: HitElement::Bar, anchor: self.anchor(index)? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub extent: Dimensions,
    pub domain: ValueDomain,
    /// Shared index space: length of the longest series
    pub count: usize,
    pub points: Vec<Vec<ScreenPoint>>,
}

impl LineGeometry {
    pub fn compute(series: &[Series], extent: Dimensions) -> Option<Self> {
        let count = series.iter().map(|s| s.data.len()).max().unwrap_or(0);
        if count == 0 || !extent.is_drawable() {
            return None;
        }
        let domain = ValueDomain::for_lines(series.iter().flat_map(|s| s.data.iter().copied()));
        let points = series
            .iter()
            .map(|s| {
                s.data
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        ScreenPoint::new(
                            point_position(i, count, extent.width),
                            extent.height - domain.to_pixel(*v, extent.height),
                        )
                    })
                    .collect()
            })
            .collect();
        Some(Self { extent, domain, count, points })
    }

    pub fn point(&self, series: usize, index: usize) -> Option<ScreenPoint> {
        self.points.get(series)?.get(index).copied()
    }

    /// Point position blended up from the baseline by `progress`.
    pub fn animated_point(&self, series: usize, index: usize, progress: f64) -> Option<ScreenPoint> {
        let target = self.point(series, index)?;
        let t = progress.clamp(0.0, 1.0);
        Some(ScreenPoint::new(target.x, target.y * t + self.extent.height * (1.0 - t)))
    }

    /// Nearest index along x, then the series whose point at that index is
    /// vertically closest to the pointer.
    pub fn hit_test(&self, point: ScreenPoint) -> Option<Hit> {
        if !inside(self.extent, point) {
            return None;
        }
        let index = nearest_point_index(point.x, self.count, self.extent.width)?;
        let (series, anchor) = self
            .points
            .iter()
            .enumerate()
            .filter_map(|(s, pts)| pts.get(index).map(|p| (s, *p)))
            .min_by(|(_, a), (_, b)| (a.y - point.y).abs().total_cmp(&(b.y - point.y).abs()))?;
        Some(Hit { index, element: HitElement::Series(series), anchor })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutGeometry {
    pub center: ScreenPoint,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub slots: Vec<ArcSlot>,
    pub total: f64,
}

impl DonutGeometry {
    pub fn compute(values: &[f64], extent: Dimensions) -> Option<Self> {
        if values.is_empty() || !extent.is_drawable() {
            return None;
        }
        let outer_radius = extent.width.min(extent.height) / 2.0 - DONUT_HOVER_GROW;
        if outer_radius <= 0.0 {
            return None;
        }
        Some(Self {
            center: ScreenPoint::new(extent.width / 2.0, extent.height / 2.0),
            outer_radius,
            inner_radius: outer_radius * DONUT_INNER_RATIO,
            slots: arc_slots(values),
            total: values.iter().filter(|v| v.is_finite() && **v > 0.0).sum(),
        })
    }

    /// `(inner, outer)` radii, grown for the active segment.
    pub fn radii(&self, index: usize, active: Option<usize>) -> (f64, f64) {
        if active == Some(index) {
            ((self.inner_radius - DONUT_HOVER_SHRINK).max(0.0), self.outer_radius + DONUT_HOVER_GROW)
        } else {
            (self.inner_radius, self.outer_radius)
        }
    }

    /// Middle of the ring at the segment's mid angle.
    pub fn centroid(&self, index: usize) -> Option<ScreenPoint> {
        let slot = self.slots.get(index)?;
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let (x, y) = polar_point(self.center.x, self.center.y, r, slot.mid_deg());
        Some(ScreenPoint::new(x, y))
    }

    /// Containment test against the fully drawn annular sectors. Slivers
    /// that are not drawn cannot be hit.
    pub fn hit_test(&self, point: ScreenPoint, active: Option<usize>) -> Option<Hit> {
        self.hit_test_swept(point, active, 1.0)
    }

    /// Hit-test while the mount sweep has only drawn `progress` of the ring.
    /// The drawn ring is the full layout compressed toward the start angle,
    /// so the pointer angle is stretched back before matching slots.
    pub fn hit_test_swept(&self, point: ScreenPoint, active: Option<usize>, progress: f64) -> Option<Hit> {
        let progress = progress.clamp(0.0, 1.0);
        if progress <= 0.0 {
            return None;
        }
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let r = dx.hypot(dy);
        let swept = (dy.atan2(dx).to_degrees() - DONUT_START_DEG).rem_euclid(360.0);
        if progress < 1.0 && swept >= 360.0 * progress {
            return None;
        }
        let deg = DONUT_START_DEG + swept / progress;
        self.slots.iter().filter(|slot| slot.is_drawn()).find_map(|slot| {
            let (inner, outer) = self.radii(slot.index, active);
            if r < inner || r > outer {
                return None;
            }
            let rel = (deg - slot.start_deg).rem_euclid(360.0);
            if rel < slot.sweep_deg || slot.sweep_deg >= 360.0 {
                Some(Hit { index: slot.index, element: HitElement::Segment, anchor: self.centroid(slot.index)? })
            } else {
                None
            }
        })
    }
}

/// Geometry of whichever chart kind is mounted.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Bar(BarGeometry),
    Line(LineGeometry),
    Donut(DonutGeometry),
}

impl ChartGeometry {
    /// `None` while the data is empty or the extent has no area.
    pub fn compute(data: &ChartData, orientation: Orientation, extent: Dimensions) -> Option<Self> {
        match data {
            ChartData::Bar(points) => BarGeometry::compute(points, orientation, extent).map(Self::Bar),
            ChartData::Line { series, .. } => LineGeometry::compute(series, extent).map(Self::Line),
            ChartData::Donut(points) => {
                let values: Vec<f64> = points.iter().map(|p| p.value).collect();
                DonutGeometry::compute(&values, extent).map(Self::Donut)
            }
        }
    }

    /// `active` is the currently highlighted index; only donuts grow it.
    /// `sweep` is the donut's mount progress and is ignored by other kinds.
    pub fn hit_test(&self, point: ScreenPoint, active: Option<usize>, sweep: f64) -> Option<Hit> {
        match self {
            Self::Bar(g) => g.hit_test(point),
            Self::Line(g) => g.hit_test(point),
            Self::Donut(g) => g.hit_test_swept(point, active, sweep),
        }
    }

    /// Anchor of an already resolved element, re-read from this geometry.
    pub fn anchor(&self, index: usize, series: Option<usize>) -> Option<ScreenPoint> {
        match self {
            Self::Bar(g) => g.anchor(index),
            Self::Line(g) => g.point(series?, index),
            Self::Donut(g) => g.centroid(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<DataPoint> {
        vec![DataPoint::new("A", 10.0), DataPoint::new("B", 20.0), DataPoint::new("C", 5.0)]
    }

    #[test]
    fn bar_lengths_follow_value_ratio() {
        let geo = BarGeometry::compute(&bars(), Orientation::Vertical, Dimensions::new(300.0, 220.0)).unwrap();
        let lens: Vec<f64> = geo.bars.iter().map(|b| b.length).collect();
        assert!((lens[0] - 100.0).abs() < 1e-9);
        assert!((lens[1] - 200.0).abs() < 1e-9);
        assert!((lens[2] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_bars_swap_axes() {
        let geo =
            BarGeometry::compute(&bars(), Orientation::Horizontal, Dimensions::new(220.0, 300.0)).unwrap();
        let rect = geo.rect(1, 1.0).unwrap();
        assert_eq!(rect.x, 0.0);
        assert!((rect.width - 200.0).abs() < 1e-9);
        assert!((rect.height - 70.0).abs() < 1e-9);
        assert_eq!(geo.hit_test(ScreenPoint::new(5.0, 150.0)).unwrap().index, 1);
    }

    #[test]
    fn zero_progress_collapses_bars() {
        let geo = BarGeometry::compute(&bars(), Orientation::Vertical, Dimensions::new(300.0, 220.0)).unwrap();
        let rect = geo.rect(1, 0.0).unwrap();
        assert_eq!(rect.height, 0.0);
        assert_eq!(rect.y, 220.0);
    }

    #[test]
    fn all_zero_bars_have_zero_length() {
        let zeros = vec![DataPoint::new("A", 0.0), DataPoint::new("B", 0.0)];
        let geo = BarGeometry::compute(&zeros, Orientation::Vertical, Dimensions::new(200.0, 100.0)).unwrap();
        assert!(geo.bars.iter().all(|b| b.length == 0.0 && !b.length.is_nan()));
    }

    #[test]
    fn zero_width_suppresses_geometry() {
        assert!(BarGeometry::compute(&bars(), Orientation::Vertical, Dimensions::new(0.0, 220.0)).is_none());
        assert!(DonutGeometry::compute(&[1.0], Dimensions::new(0.0, 200.0)).is_none());
    }

    #[test]
    fn line_hit_picks_vertically_nearest_series() {
        let series = vec![
            Series::new("low", vec![0.0, 1.0, 2.0, 3.0, 4.0]),
            Series::new("high", vec![10.0, 9.0, 8.0, 7.0, 6.0]),
        ];
        let geo = LineGeometry::compute(&series, Dimensions::new(400.0, 200.0)).unwrap();
        let high_point = geo.point(1, 2).unwrap();
        let hit = geo.hit_test(ScreenPoint::new(200.0, high_point.y + 3.0)).unwrap();
        assert_eq!(hit.index, 2);
        assert_eq!(hit.element, HitElement::Series(1));
        assert_eq!(hit.anchor, high_point);
    }

    #[test]
    fn donut_hit_resolves_drawn_arc() {
        let geo = DonutGeometry::compute(&[30.0, 30.0, 40.0], Dimensions::new(200.0, 200.0)).unwrap();
        // 40-value segment spans 126°..270°, i.e. the left side of the ring
        let ring = (geo.inner_radius + geo.outer_radius) / 2.0;
        let left = ScreenPoint::new(geo.center.x - ring, geo.center.y);
        assert_eq!(geo.hit_test(left, None).unwrap().index, 2);
        assert!(geo.hit_test(geo.center, None).is_none());
    }

    #[test]
    fn undrawn_part_of_the_sweep_cannot_be_hit() {
        let geo = DonutGeometry::compute(&[30.0, 30.0, 40.0], Dimensions::new(200.0, 200.0)).unwrap();
        let ring = (geo.inner_radius + geo.outer_radius) / 2.0;
        let left = ScreenPoint::new(geo.center.x - ring, geo.center.y);
        // At half sweep the ring only reaches 90°, the bottom of the circle
        assert!(geo.hit_test_swept(left, None, 0.5).is_none());
        // Segment 1 is compressed into -36°..18° and covers 3 o'clock
        let right = ScreenPoint::new(geo.center.x + ring, geo.center.y);
        assert_eq!(geo.hit_test_swept(right, None, 0.5).unwrap().index, 1);
        assert!(geo.hit_test_swept(right, None, 0.0).is_none());
        assert_eq!(geo.hit_test_swept(left, None, 1.0).unwrap().index, 2);
    }

    #[test]
    fn line_points_rise_from_the_baseline() {
        let series = vec![Series::new("crew", vec![0.0, 10.0])];
        let geo = LineGeometry::compute(&series, Dimensions::new(200.0, 100.0)).unwrap();
        let target = geo.point(0, 1).unwrap();
        let start = geo.animated_point(0, 1, 0.0).unwrap();
        let half = geo.animated_point(0, 1, 0.5).unwrap();
        let end = geo.animated_point(0, 1, 1.0).unwrap();
        assert_eq!(start, ScreenPoint::new(target.x, 100.0));
        assert!((half.y - (100.0 + target.y) / 2.0).abs() < 1e-9);
        assert_eq!(half.x, target.x);
        assert_eq!(end, target);
    }

    #[test]
    fn anchors_follow_the_geometry_they_are_read_from() {
        let data = ChartData::Bar(bars());
        let narrow = ChartGeometry::compute(&data, Orientation::Vertical, Dimensions::new(300.0, 220.0)).unwrap();
        let wide = ChartGeometry::compute(&data, Orientation::Vertical, Dimensions::new(600.0, 220.0)).unwrap();
        assert_eq!(narrow.anchor(1, None).unwrap().x, 150.0);
        assert_eq!(wide.anchor(1, None).unwrap().x, 300.0);

        let lines = ChartData::Line { series: vec![Series::new("a", vec![1.0, 2.0])], labels: vec![] };
        let geo = ChartGeometry::compute(&lines, Orientation::Vertical, Dimensions::new(300.0, 220.0)).unwrap();
        assert!(geo.anchor(1, None).is_none());
        assert!(geo.anchor(1, Some(0)).is_some());
    }

    #[test]
    fn hovered_segment_grows() {
        let geo = DonutGeometry::compute(&[1.0, 1.0], Dimensions::new(200.0, 200.0)).unwrap();
        let (inner, outer) = geo.radii(0, Some(0));
        assert!(outer > geo.outer_radius);
        assert!(inner < geo.inner_radius);
        assert_eq!(geo.radii(1, Some(0)), (geo.inner_radius, geo.outer_radius));
    }

    #[test]
    fn chart_geometry_dispatches_by_kind() {
        let data = ChartData::Bar(bars());
        let geo = ChartGeometry::compute(&data, Orientation::Vertical, Dimensions::new(300.0, 220.0)).unwrap();
        let hit = geo.hit_test(ScreenPoint::new(150.0, 200.0), None, 1.0).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.element, HitElement::Bar);

        let empty = ChartData::Donut(vec![]);
        assert!(ChartGeometry::compute(&empty, Orientation::Vertical, Dimensions::new(300.0, 220.0)).is_none());
    }
}
