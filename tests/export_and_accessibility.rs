use insta::assert_json_snapshot;
use space_chart_wasm::application::{ChartConfig, ChartController};
use space_chart_wasm::domain::chart::{
    ChartData, ChartKind, Color, DataPoint, FormatSpec, Series, Theme, ValueFormatter,
};
use space_chart_wasm::infrastructure::rendering::SvgWriter;

fn payloads() -> ChartData {
    ChartData::Bar(vec![
        DataPoint::new("Falcon 9", 10.0),
        DataPoint::new("Electron", 20.0),
        DataPoint::new("Soyuz", 5.0),
    ])
}

#[test]
fn accessibility_lines_mirror_the_bars() {
    let c = ChartController::new(payloads(), ChartConfig::default(), Theme::default());
    assert_json_snapshot!(c.accessibility_lines(), @r#"
    [
      "Falcon 9: 10",
      "Electron: 20",
      "Soyuz: 5"
    ]
    "#);
}

#[test]
fn configured_format_applies_everywhere() {
    let mut config = ChartConfig::default().with_animation(false).with_values(true);
    config.format = FormatSpec { decimals: Some(1), prefix: "$".into(), suffix: "M".into() };
    let mut c = ChartController::new(payloads(), config, Theme::default());
    c.resize(800.0, true, 0.0);

    assert_eq!(c.accessibility_lines()[0], "Falcon 9: $10.0M");
    let texts: Vec<String> = c.scene().texts().map(|t| t.content.clone()).collect();
    assert!(texts.contains(&"$20.0M".to_string()));
    assert!(texts.contains(&"$22.0M".to_string()));
}

#[test]
fn custom_formatter_overrides_config() {
    let mut c = ChartController::new(payloads(), ChartConfig::default(), Theme::default());
    c.set_formatter(ValueFormatter::new(|v| format!("{} launches", v)));
    assert_eq!(c.accessibility_lines()[2], "Soyuz: 5 launches");
}

#[test]
fn line_export_projects_one_column_per_series() {
    let json = r#"{"series":[{"name":"Crew","data":[2,3]},{"name":"Cargo","data":[5]}],"labels":["2023","2024"]}"#;
    let data = ChartData::from_json(ChartKind::Line, json).unwrap();
    let c = ChartController::new(data, ChartConfig::default(), Theme::default());
    assert_eq!(
        c.export_table().to_json(),
        r#"[{"label":"2023","Crew":2.0,"Cargo":5.0},{"label":"2024","Crew":3.0,"Cargo":null}]"#
    );
}

#[test]
fn line_accessibility_names_series_and_label() {
    let data = ChartData::Line {
        series: vec![Series::new("Crew", vec![2.0, 3.0])],
        labels: vec!["2023".into(), "2024".into()],
    };
    let c = ChartController::new(data, ChartConfig::default(), Theme::default());
    assert_eq!(c.accessibility_lines(), vec!["Crew (2023): 2", "Crew (2024): 3"]);
}

#[test]
fn svg_output_is_labelled_and_escaped() {
    let config = ChartConfig::default().with_animation(false).with_title("R&D <budget>");
    let mut c = ChartController::new(payloads(), config, Theme::default());
    c.resize(400.0, true, 0.0);
    let svg = SvgWriter::new("export").write(&c.scene());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("aria-label=\"R&amp;D &lt;budget&gt;\""));
    assert_eq!(svg.matches("<rect x=").count(), 3 + 1);
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn tooltip_takes_its_colors_from_the_injected_theme() {
    let theme = Theme { tooltip_background: Color::from_hex(0x102030), text: Color::from_hex(0xfafafa), ..Theme::default() };
    let mut c = ChartController::new(payloads(), ChartConfig::default().with_animation(false), theme);
    c.resize(400.0, true, 0.0);
    let origin = c.layout().plot_origin();
    assert!(c.tap(origin.offset(168.0, 240.0)));

    let scene = c.scene();
    let tooltip = scene.tooltip.clone().unwrap();
    assert_eq!(tooltip.background, Color::from_hex(0x102030));
    assert_eq!(tooltip.text_color, Color::from_hex(0xfafafa));
    let svg = SvgWriter::new("themed").with_tooltip().write(&scene);
    assert!(svg.contains("fill=\"#fafafa\" stroke=\"#102030\""));
}
