use sheet_charts::{ChartEvent, ChartOrchestrator, DashboardError};
use sheet_charts::core::{DecimationAlgorithm, Viewport, build_series};
use sheet_charts::ingest::{DEFAULT_DATE_FORMAT, read_records, validate_rows};
use sheet_charts::render::{
    ChartBackend, Color, DecimationOptions, FrameChartBackend, NullRenderer, TextHAlign,
    ToolbarButton,
};

fn minute_export(rows: u32, gap_every: Option<u32>) -> String {
    let mut text = String::from("A,H\n");
    for row in 0..rows {
        let value = match gap_every {
            Some(every) if row % every == every - 1 => String::new(),
            _ => ((row as f64 * 0.37).sin() * 100.0).to_string(),
        };
        text.push_str(&format!(
            "{value},2024-03-{:02} {:02}:{:02}:00\n",
            1 + row / 1440,
            (row / 60) % 24,
            row % 60
        ));
    }
    text
}

fn series_from(text: &str) -> sheet_charts::core::Series {
    let records = validate_rows(read_records(text).expect("csv"), "H", DEFAULT_DATE_FORMAT);
    build_series(&records, &["A"]).remove(0)
}

/// Toolbar highlight flags in drawing order: reset, pan, zoom.
fn highlighted_buttons(frame: &sheet_charts::render::RenderFrame, fill: Color) -> Vec<bool> {
    frame.rects.iter().map(|rect| rect.fill_color == fill).collect()
}

fn series_segments(frame: &sheet_charts::render::RenderFrame, color: Color, width: f64) -> usize {
    frame
        .lines
        .iter()
        .filter(|line| line.color == color && (line.stroke_width - width).abs() <= f64::EPSILON)
        .count()
}

#[test]
fn initial_frame_has_series_ticks_title_and_toolbar() {
    let color = Color::rgb(0.2, 0.6, 0.9);
    let mut backend = FrameChartBackend::<NullRenderer>::new();
    let chart = ChartOrchestrator::new(Viewport::new(600, 300))
        .build_chart(&series_from(&minute_export(20, None)), color, &mut backend)
        .expect("chart");

    let frame = chart.chart().last_frame().expect("initial frame");
    assert_eq!(series_segments(frame, color, 1.0), 19);
    assert_eq!(frame.rects.len(), ToolbarButton::ALL.len());
    assert!(frame.texts.iter().any(|text| text.text == "A Over Time"));

    let value_labels = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Left && text.text != "A Over Time")
        .count();
    assert!((1..=5).contains(&value_labels));

    let time_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(time_labels, vec!["Mar 1"]);
}

#[test]
fn null_cells_break_the_line() {
    let color = Color::rgb(0.2, 0.6, 0.9);
    let mut backend = FrameChartBackend::<NullRenderer>::new();
    // Rows 4, 9, 14, 19 are blank: four runs of four samples each.
    let chart = ChartOrchestrator::new(Viewport::new(600, 300))
        .build_chart(&series_from(&minute_export(20, Some(5))), color, &mut backend)
        .expect("chart");

    let frame = chart.chart().last_frame().expect("initial frame");
    assert_eq!(series_segments(frame, color, 1.0), 4 * 3);
}

#[test]
fn long_series_are_decimated_to_the_plot_width() {
    let color = Color::rgb(0.2, 0.6, 0.9);
    let series = series_from(&minute_export(5_000, None));
    assert_eq!(series.len(), 5_000);

    let mut backend = FrameChartBackend::<NullRenderer>::new();
    let decimated = ChartOrchestrator::new(Viewport::new(400, 200))
        .build_chart(&series, color, &mut backend)
        .expect("decimated chart");
    let segments = series_segments(decimated.chart().last_frame().expect("frame"), color, 1.0);
    assert!(segments <= 400);

    let full = ChartOrchestrator::new(Viewport::new(400, 200))
        .with_decimation(DecimationOptions {
            enabled: false,
            algorithm: DecimationAlgorithm::Lttb,
            samples: None,
        })
        .build_chart(&series, color, &mut backend)
        .expect("full chart");
    assert_eq!(series_segments(full.chart().last_frame().expect("frame"), color, 1.0), 4_999);
}

#[test]
fn backend_rejects_invalid_viewports_as_construction_errors() {
    let series = series_from(&minute_export(5, None));
    let config = ChartOrchestrator::new(Viewport::new(0, 300)).chart_config(&series, Color::rgb(0.0, 0.0, 0.0));
    let mut backend = FrameChartBackend::<NullRenderer>::new();

    let result = backend.create_chart(config);
    assert!(matches!(result, Err(DashboardError::RenderConstruction(_))));
}

#[test]
fn tooltip_title_uses_short_month_and_day() {
    let series = series_from(&minute_export(5, None));
    let config = ChartOrchestrator::new(Viewport::new(600, 300)).chart_config(&series, Color::rgb(0.0, 0.0, 0.0));
    assert_eq!(config.tooltip_title(config.x_axis.min), "Mar 1");
}

#[test]
fn toolbar_highlight_follows_mode_changes() {
    let color = Color::rgb(0.2, 0.6, 0.9);
    let mut backend = FrameChartBackend::<NullRenderer>::new();
    let mut chart = ChartOrchestrator::new(Viewport::new(600, 300))
        .build_chart(&series_from(&minute_export(20, None)), color, &mut backend)
        .expect("chart");
    let fill = chart.chart().config().line.fill_color;

    let frame = chart.chart().last_frame().expect("initial frame");
    assert_eq!(highlighted_buttons(frame, fill), vec![false, false, true]);

    chart.handle(ChartEvent::Toolbar(ToolbarButton::Pan)).expect("pan");
    let frame = chart.chart().last_frame().expect("pan frame");
    assert_eq!(highlighted_buttons(frame, fill), vec![false, true, false]);

    chart.handle(ChartEvent::Toolbar(ToolbarButton::Zoom)).expect("zoom");
    let frame = chart.chart().last_frame().expect("zoom frame");
    assert_eq!(highlighted_buttons(frame, fill), vec![false, false, true]);
}
