use proptest::prelude::*;
use sheet_charts::core::{PointerPosition, Series, Viewport, build_series};
use sheet_charts::ingest::{DEFAULT_DATE_FORMAT, read_records, validate_rows};
use sheet_charts::interaction::ViewportMode;
use sheet_charts::render::{Color, FrameChart, FrameChartBackend, NullRenderer, ToolbarButton};
use sheet_charts::{ChartEvent, ChartOrchestrator, InteractiveChart};

fn sample_series() -> Series {
    let mut text = String::from("A,H\n");
    for hour in 0..48 {
        text.push_str(&format!("{},2024-03-{:02} {:02}:00:00\n", (hour * 7) % 13, 1 + hour / 24, hour % 24));
    }
    let records = validate_rows(read_records(&text).expect("csv"), "H", DEFAULT_DATE_FORMAT);
    build_series(&records, &["A"]).remove(0)
}

fn build_chart() -> InteractiveChart<FrameChart<NullRenderer>> {
    let mut backend = FrameChartBackend::<NullRenderer>::new();
    ChartOrchestrator::new(Viewport::new(640, 320))
        .build_chart(&sample_series(), Color::rgb(1.0, 0.39, 0.52), &mut backend)
        .expect("chart")
}

fn position_strategy() -> impl Strategy<Value = PointerPosition> {
    (0.0f64..640.0, 0.0f64..320.0).prop_map(|(x, y)| PointerPosition::new(x, y))
}

fn event_strategy() -> impl Strategy<Value = ChartEvent> {
    prop_oneof![
        Just(ChartEvent::Toolbar(ToolbarButton::Zoom)),
        Just(ChartEvent::Toolbar(ToolbarButton::Pan)),
        Just(ChartEvent::Toolbar(ToolbarButton::Reset)),
        position_strategy().prop_map(ChartEvent::PointerDown),
        position_strategy().prop_map(ChartEvent::PointerMove),
        Just(ChartEvent::PointerUp),
        Just(ChartEvent::PointerLeave),
        (-3.0f64..3.0, position_strategy())
            .prop_map(|(delta_y, position)| ChartEvent::Wheel { delta_y, position }),
        (0.5f64..2.0, position_strategy())
            .prop_map(|(scale, center)| ChartEvent::Pinch { scale, center }),
    ]
}

proptest! {
    #[test]
    fn exactly_one_gesture_family_is_enabled(
        events in prop::collection::vec(event_strategy(), 1..60)
    ) {
        let mut chart = build_chart();
        let mut expected_mode = ViewportMode::Zoom;

        for event in events {
            match event {
                ChartEvent::Toolbar(ToolbarButton::Zoom) => expected_mode = ViewportMode::Zoom,
                ChartEvent::Toolbar(ToolbarButton::Pan) => expected_mode = ViewportMode::Pan,
                _ => {}
            }
            let before = chart.controller().state();
            chart.handle(event).expect("event handled");
            let after = chart.controller().state();

            let gates = chart.controller().gates();
            prop_assert_ne!(gates.zoom_enabled(), gates.drag_pan);
            prop_assert_eq!(after.mode, expected_mode);
            prop_assert_eq!(chart.chart().active_tool(), Some(match expected_mode {
                ViewportMode::Zoom => ToolbarButton::Zoom,
                ViewportMode::Pan => ToolbarButton::Pan,
            }));

            let zoom_event = matches!(event, ChartEvent::Wheel { .. } | ChartEvent::Pinch { .. });
            let drag_event = matches!(event, ChartEvent::PointerMove(_));
            if (zoom_event && before.mode == ViewportMode::Pan)
                || (drag_event && before.mode == ViewportMode::Zoom)
            {
                prop_assert_eq!(after.x_extent(), before.x_extent());
                prop_assert_eq!(after.y_extent(), before.y_extent());
            }
            if after.is_dragging {
                prop_assert_eq!(after.mode, ViewportMode::Pan);
            }
        }
    }

    #[test]
    fn pan_preserves_visible_width(
        moves in prop::collection::vec(position_strategy(), 1..20)
    ) {
        let mut chart = build_chart();
        chart.handle(ChartEvent::Toolbar(ToolbarButton::Pan)).expect("pan mode");
        let start = chart.controller().state();
        chart.handle(ChartEvent::PointerDown(PointerPosition::new(320.0, 160.0))).expect("down");

        let mut last = PointerPosition::new(320.0, 160.0);
        for position in moves {
            let before = chart.controller().state();
            chart.handle(ChartEvent::PointerMove(position)).expect("move");
            let after = chart.controller().state();

            let x_span = before.x_max - before.x_min;
            let expected_shift = (position.x - last.x) / 640.0 * x_span;
            prop_assert!((before.x_min - after.x_min - expected_shift).abs() <= 1e-6 * x_span.abs());
            last = position;
        }

        let end = chart.controller().state();
        let start_width = start.x_max - start.x_min;
        let end_width = end.x_max - end.x_min;
        prop_assert!((start_width - end_width).abs() <= 1e-6 * start_width);
        let start_height = start.y_max - start.y_min;
        let end_height = end.y_max - end.y_min;
        prop_assert!((start_height - end_height).abs() <= 1e-9 * start_height.max(1.0));
    }
}
