//! Stateless mapping between domain values and pixel offsets.
//!
//! Every function here is total: degenerate domains and empty extents map
//! to zero instead of producing `NaN` or infinities, so renderers can draw
//! zero-size shapes rather than bail out.

/// Fraction of each category band left empty between bars
pub const BAR_SPACING_FRACTION: f64 = 0.3;
/// Headroom multiplier applied to the largest bar value
pub const BAR_HEADROOM: f64 = 1.1;
/// Padding added to each end of a line chart's value range
pub const LINE_DOMAIN_PAD: f64 = 0.1;
/// Half-span used when every line value is identical
pub const FLAT_DOMAIN_PAD: f64 = 1.0;
/// Donut segments sweeping less than this are skipped when drawing
pub const MIN_DRAWN_SWEEP_DEG: f64 = 0.5;
/// 12 o'clock, in degrees, with y growing downward
pub const DONUT_START_DEG: f64 = -90.0;

/// Map `value` in `[domain_min, domain_max]` onto `[0, extent]`.
pub fn to_pixel(value: f64, domain_min: f64, domain_max: f64, extent: f64) -> f64 {
    let span = domain_max - domain_min;
    if !(span.is_finite() && span > 0.0) || !(extent.is_finite() && extent > 0.0) {
        return 0.0;
    }
    (value - domain_min) / span * extent
}

/// Inverse of [`to_pixel`].
pub fn to_value(pixel: f64, domain_min: f64, domain_max: f64, extent: f64) -> f64 {
    if !(extent.is_finite() && extent > 0.0) {
        return domain_min;
    }
    domain_min + pixel / extent * (domain_max - domain_min)
}

/// Value range a chart axis maps onto its pixel extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bars grow from zero up to `max(values) * 1.1`. All-zero data gives
    /// the empty domain `[0, 0]`.
    pub fn for_bars(values: impl IntoIterator<Item = f64>) -> Self {
        let peak = values.into_iter().filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
        Self::new(0.0, peak * BAR_HEADROOM)
    }

    /// Line charts pad 10% of the range on both ends; a flat series pads by
    /// one unit each way so the line sits mid-plot.
    pub fn for_lines(values: impl IntoIterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo > hi {
            return Self::new(0.0, FLAT_DOMAIN_PAD);
        }
        let range = hi - lo;
        if range <= 0.0 {
            return Self::new(lo - FLAT_DOMAIN_PAD, hi + FLAT_DOMAIN_PAD);
        }
        let pad = range * LINE_DOMAIN_PAD;
        Self::new(lo - pad, hi + pad)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.span().is_finite() && self.span() > 0.0)
    }

    /// Pixels per domain unit; zero for a degenerate domain.
    pub fn scale_factor(&self, extent: f64) -> f64 {
        if self.is_degenerate() || extent <= 0.0 { 0.0 } else { extent / self.span() }
    }

    pub fn to_pixel(&self, value: f64, extent: f64) -> f64 {
        to_pixel(value, self.min, self.max, extent)
    }

    pub fn to_value(&self, pixel: f64, extent: f64) -> f64 {
        to_value(pixel, self.min, self.max, extent)
    }

    /// Evenly spaced tick values from `min` to `max` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.max],
            _ if self.is_degenerate() => vec![self.min],
            _ => {
                let step = self.span() / (count - 1) as f64;
                (0..count).map(|i| self.min + step * i as f64).collect()
            }
        }
    }
}

/// One category band on an index axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub center: f64,
    pub width: f64,
    pub step: f64,
}

impl Band {
    pub fn start(&self) -> f64 {
        self.center - self.width / 2.0
    }
}

/// Center-anchored band for `index` of `count` over `extent`.
pub fn band(index: usize, count: usize, extent: f64) -> Option<Band> {
    if count == 0 || index >= count || extent <= 0.0 {
        return None;
    }
    let step = extent / count as f64;
    Some(Band {
        center: (index as f64 + 0.5) / count as f64 * extent,
        width: step * (1.0 - BAR_SPACING_FRACTION),
        step,
    })
}

/// Band under `pixel`, clamped into `0..count`.
pub fn band_index_at(pixel: f64, count: usize, extent: f64) -> Option<usize> {
    if count == 0 || extent <= 0.0 || !pixel.is_finite() {
        return None;
    }
    let step = extent / count as f64;
    let raw = (pixel / step).floor();
    Some(raw.clamp(0.0, (count - 1) as f64) as usize)
}

/// X offset of point `index` when `count` points span `extent`.
pub fn point_position(index: usize, count: usize, extent: f64) -> f64 {
    if count <= 1 {
        return extent / 2.0;
    }
    index as f64 / (count - 1) as f64 * extent
}

/// Nearest point index for an x offset, clamped into `0..count`.
pub fn nearest_point_index(pixel: f64, count: usize, extent: f64) -> Option<usize> {
    if count == 0 || !pixel.is_finite() {
        return None;
    }
    if count == 1 || extent <= 0.0 {
        return Some(0);
    }
    let raw = (pixel / extent * (count - 1) as f64).round();
    Some(raw.clamp(0.0, (count - 1) as f64) as usize)
}

/// Angular slot of one donut segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSlot {
    pub index: usize,
    pub start_deg: f64,
    pub sweep_deg: f64,
    /// Share of the total, in `[0, 1]`
    pub share: f64,
}

impl ArcSlot {
    pub fn end_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg
    }

    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }

    /// Slivers still count toward totals but are never turned into paths.
    pub fn is_drawn(&self) -> bool {
        self.sweep_deg >= MIN_DRAWN_SWEEP_DEG
    }

    pub fn percentage(&self) -> f64 {
        self.share * 100.0
    }
}

/// Lay segments clockwise from 12 o'clock proportional to their share.
pub fn arc_slots(values: &[f64]) -> Vec<ArcSlot> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    let mut start = DONUT_START_DEG;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let share = if total > 0.0 && value.is_finite() && value > 0.0 {
                value / total
            } else {
                0.0
            };
            let slot = ArcSlot { index, start_deg: start, sweep_deg: share * 360.0, share };
            start += slot.sweep_deg;
            slot
        })
        .collect()
}

/// Point on a circle at `deg` (screen coordinates, clockwise).
pub fn polar_point(cx: f64, cy: f64, radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (radius.mul_add(rad.cos(), cx), radius.mul_add(rad.sin(), cy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn to_pixel_and_back() {
        let px = to_pixel(25.0, 0.0, 100.0, 400.0);
        assert!((px - 100.0).abs() < EPS);
        assert!((to_value(px, 0.0, 100.0, 400.0) - 25.0).abs() < EPS);
    }

    #[test]
    fn degenerate_domain_maps_to_zero() {
        assert_eq!(to_pixel(5.0, 0.0, 0.0, 300.0), 0.0);
        assert_eq!(to_pixel(5.0, 0.0, 10.0, 0.0), 0.0);
        assert_eq!(ValueDomain::for_bars([0.0, 0.0]).scale_factor(300.0), 0.0);
    }

    #[test]
    fn bar_domain_has_headroom() {
        let domain = ValueDomain::for_bars([10.0, 20.0, 5.0]);
        assert_eq!(domain.min, 0.0);
        assert!((domain.max - 22.0).abs() < 1e-9);
    }

    #[test]
    fn line_domain_pads_both_ends() {
        let domain = ValueDomain::for_lines([0.0, 100.0]);
        assert!((domain.min + 10.0).abs() < EPS);
        assert!((domain.max - 110.0).abs() < EPS);

        let flat = ValueDomain::for_lines([7.0, 7.0, 7.0]);
        assert_eq!(flat, ValueDomain::new(6.0, 8.0));
    }

    #[test]
    fn bands_are_center_anchored() {
        let b = band(1, 4, 400.0).unwrap();
        assert!((b.center - 150.0).abs() < EPS);
        assert!((b.width - 70.0).abs() < EPS);
        assert!(band(4, 4, 400.0).is_none());
    }

    #[test]
    fn band_index_clamps_out_of_range() {
        assert_eq!(band_index_at(-5.0, 3, 300.0), Some(0));
        assert_eq!(band_index_at(300.0, 3, 300.0), Some(2));
        assert_eq!(band_index_at(150.0, 3, 300.0), Some(1));
        assert_eq!(band_index_at(10.0, 0, 300.0), None);
    }

    #[test]
    fn point_index_rounds_to_nearest() {
        assert_eq!(nearest_point_index(200.0, 5, 400.0), Some(2));
        assert_eq!(nearest_point_index(49.0, 5, 400.0), Some(0));
        assert_eq!(nearest_point_index(51.0, 5, 400.0), Some(1));
        assert_eq!(nearest_point_index(999.0, 5, 400.0), Some(4));
    }

    #[test]
    fn donut_slots_follow_shares() {
        let slots = arc_slots(&[30.0, 30.0, 40.0]);
        let sweeps: Vec<f64> = slots.iter().map(|s| s.sweep_deg).collect();
        assert!((sweeps[0] - 108.0).abs() < EPS);
        assert!((sweeps[1] - 108.0).abs() < EPS);
        assert!((sweeps[2] - 144.0).abs() < EPS);
        assert_eq!(slots[0].start_deg, DONUT_START_DEG);
        assert!((slots[2].end_deg() - 270.0).abs() < EPS);
    }

    #[test]
    fn donut_slivers_are_skipped_but_counted() {
        let slots = arc_slots(&[1000.0, 1.0]);
        assert!(!slots[1].is_drawn());
        let total: f64 = slots.iter().map(|s| s.sweep_deg).sum();
        assert!((total - 360.0).abs() < EPS);
    }

    #[test]
    fn ticks_reach_the_extremum() {
        let ticks = ValueDomain::for_bars([10.0, 20.0, 5.0]).ticks(5);
        assert_eq!(ticks.len(), 5);
        assert!((ticks[4] - 22.0).abs() < 1e-9);
        assert!((ticks[2] - 11.0).abs() < 1e-9);
    }
}
