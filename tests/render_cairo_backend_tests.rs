#![cfg(feature = "cairo-backend")]

use sheet_charts::core::{Viewport, build_series};
use sheet_charts::ingest::{DEFAULT_DATE_FORMAT, read_records, validate_rows};
use sheet_charts::render::{
    CairoRenderer, Color, FrameChartBackend, LinePrimitive, RenderFrame, Renderer,
};
use sheet_charts::{ChartEvent, ChartOrchestrator, DashboardError};

#[test]
fn cairo_renderer_rejects_empty_surface() {
    let err = CairoRenderer::new(Viewport::new(0, 480)).expect_err("invalid width must fail");
    assert!(matches!(err, DashboardError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_counts_drawn_primitives() {
    let mut renderer = CairoRenderer::new(Viewport::new(200, 100)).expect("renderer");
    let mut frame = RenderFrame::new(Viewport::new(200, 100));
    frame.push_line(LinePrimitive::new(0.0, 0.0, 200.0, 100.0, 1.0, Color::rgb(1.0, 0.0, 0.0)));
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.last_stats().lines_drawn, 1);
    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn charts_render_through_cairo_and_follow_resize() {
    let text = "A,H\n1,2024-03-01 00:00:00\n3,2024-03-02 00:00:00\n2,2024-03-03 00:00:00\n";
    let records = validate_rows(read_records(text).expect("csv"), "H", DEFAULT_DATE_FORMAT);
    let series = build_series(&records, &["A"]).remove(0);

    let mut backend = FrameChartBackend::with_factory(CairoRenderer::new);
    let mut chart = ChartOrchestrator::new(Viewport::new(320, 160))
        .build_chart(&series, Color::rgb(0.21, 0.64, 0.92), &mut backend)
        .expect("chart");
    let drawn = chart.chart().renderer().last_stats().lines_drawn;
    let expected = chart.chart().last_frame().map_or(0, |frame| frame.lines.len());
    assert_eq!(drawn, expected);

    chart.resize(640, 320).expect("resize");
    assert_eq!(chart.chart().renderer().surface().width(), 640);
    assert!(chart.handle(ChartEvent::PointerUp).is_ok());
}
