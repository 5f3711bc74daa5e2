use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use space_chart_wasm::domain::chart::{
    BarGeometry, DataPoint, Dimensions, DonutGeometry, HitElement, LineGeometry, Orientation, ScreenPoint, Series,
};

fn bars(values: &[u8]) -> Vec<DataPoint> {
    values.iter().enumerate().map(|(i, v)| DataPoint::new(format!("#{}", i), *v as f64)).collect()
}

#[quickcheck]
fn bar_hit_is_idempotent(values: Vec<u8>, x: u16, y: u16) -> TestResult {
    if values.is_empty() {
        return TestResult::discard();
    }
    let geo = BarGeometry::compute(&bars(&values), Orientation::Vertical, Dimensions::new(336.0, 252.0)).unwrap();
    let p = ScreenPoint::new((x % 336) as f64, (y % 252) as f64);
    let first = geo.hit_test(p);
    TestResult::from_bool(first.is_some() && first == geo.hit_test(p))
}

#[quickcheck]
fn bar_anchor_resolves_to_its_own_bar(values: Vec<u8>, x: u16) -> TestResult {
    if values.is_empty() {
        return TestResult::discard();
    }
    let geo = BarGeometry::compute(&bars(&values), Orientation::Vertical, Dimensions::new(336.0, 252.0)).unwrap();
    let hit = geo.hit_test(ScreenPoint::new((x % 336) as f64, 100.0)).unwrap();
    let again = geo.hit_test(hit.anchor).unwrap();
    TestResult::from_bool(again.same_target(&hit))
}

#[quickcheck]
fn line_hit_index_is_always_in_range(a: Vec<i16>, b: Vec<i16>, x: i32, y: i32) -> TestResult {
    if a.is_empty() && b.is_empty() {
        return TestResult::discard();
    }
    let to_f = |v: &[i16]| v.iter().map(|n| *n as f64).collect::<Vec<_>>();
    let series = vec![Series::new("a", to_f(&a)), Series::new("b", to_f(&b))];
    let geo = LineGeometry::compute(&series, Dimensions::new(400.0, 200.0)).unwrap();
    let p = ScreenPoint::new(x.rem_euclid(401) as f64, y.rem_euclid(201) as f64);
    match geo.hit_test(p) {
        Some(hit) => {
            let series = hit.series().unwrap();
            let ok = hit.index < geo.count && geo.point(series, hit.index) == Some(hit.anchor);
            TestResult::from_bool(ok && geo.hit_test(p) == Some(hit))
        }
        None => TestResult::failed(),
    }
}

#[test]
fn points_outside_the_plot_miss() {
    let geo = BarGeometry::compute(&bars(&[1, 2, 3]), Orientation::Vertical, Dimensions::new(300.0, 200.0)).unwrap();
    assert!(geo.hit_test(ScreenPoint::new(-1.0, 50.0)).is_none());
    assert!(geo.hit_test(ScreenPoint::new(50.0, 201.0)).is_none());
}

#[test]
fn donut_centroid_hits_its_segment_even_when_grown() {
    let geo = DonutGeometry::compute(&[30.0, 30.0, 40.0], Dimensions::new(384.0, 284.0)).unwrap();
    for index in 0..3 {
        let centroid = geo.centroid(index).unwrap();
        let hit = geo.hit_test(centroid, None).unwrap();
        assert_eq!(hit.index, index);
        assert_eq!(hit.element, HitElement::Segment);
        assert_eq!(geo.hit_test(centroid, Some(index)).unwrap().index, index);
    }
}
