use plot_layout::core::{AxisPosition, Rect};
use plot_layout::layout::{
    AxisLayoutHint, LayoutHints, LayoutOptions, ParasiteLayout, PlotLayout, PlotLayoutConfig,
};

fn host_hints() -> LayoutHints {
    let mut hints = LayoutHints::default();
    hints.axes[AxisPosition::Left] = AxisLayoutHint::visible(40);
    hints.axes[AxisPosition::Bottom] = AxisLayoutHint::visible(30);
    hints
}

fn parasite_hints() -> LayoutHints {
    let mut hints = LayoutHints::default();
    hints.axes[AxisPosition::Right] = AxisLayoutHint::visible(50);
    hints
}

fn activated_host() -> PlotLayout {
    let mut host = PlotLayout::new();
    host.set_spacing(9);
    host.set_canvas_margin(3, Some(AxisPosition::Left));
    host.activate(
        &host_hints(),
        Rect::new(0.0, 0.0, 500.0, 400.0),
        LayoutOptions::default(),
    );
    host
}

#[test]
fn parasite_copies_the_host_rectangles() {
    let host = activated_host();
    let mut parasite = ParasiteLayout::new();

    parasite.activate(
        Some(&host),
        &parasite_hints(),
        Rect::new(0.0, 0.0, 500.0, 400.0),
        LayoutOptions::default(),
    );

    assert_eq!(parasite.rects(), host.rects());
    assert_eq!(parasite.layout().canvas_rect(), host.canvas_rect());
    assert_eq!(parasite.layout().spacing(), 9);
    assert_eq!(parasite.layout().canvas_margin(AxisPosition::Left), 3);
    assert!(parasite.parasite_scale_rect(AxisPosition::Right).is_empty());
}

#[test]
fn wide_host_spacing_is_copied_unchanged() {
    let host = PlotLayout::from_config(&PlotLayoutConfig {
        spacing: u32::MAX,
        ..PlotLayoutConfig::default()
    })
    .expect("valid config");
    let mut parasite = ParasiteLayout::new();

    parasite.activate(
        Some(&host),
        &parasite_hints(),
        Rect::new(0.0, 0.0, 500.0, 400.0),
        LayoutOptions::default(),
    );

    assert_eq!(parasite.layout().spacing(), u32::MAX);
}

#[test]
fn own_scale_rects_report_where_parasite_axes_belong() {
    let host = activated_host();
    let mut parasite = ParasiteLayout::new().with_own_scale_rects(true);

    parasite.activate(
        Some(&host),
        &parasite_hints(),
        Rect::new(0.0, 0.0, 500.0, 400.0),
        LayoutOptions::default(),
    );

    let own = parasite.parasite_scale_rect(AxisPosition::Right);
    assert_eq!(own.width, 50.0);
    assert_eq!(own.right(), 500.0);
    assert_eq!(parasite.rects(), host.rects());
}

#[test]
fn without_a_host_the_parasite_lays_itself_out() {
    let rect = Rect::new(0.0, 0.0, 500.0, 400.0);
    let mut parasite = ParasiteLayout::new();
    parasite.activate(None, &parasite_hints(), rect, LayoutOptions::default());

    let mut standalone = PlotLayout::new();
    standalone.activate(&parasite_hints(), rect, LayoutOptions::default());

    assert_eq!(parasite.rects(), standalone.rects());
    assert_eq!(parasite.layout().canvas_rect().width, 450.0);
}

#[test]
fn minimum_size_defers_to_the_host() {
    let host = activated_host();
    let parasite = ParasiteLayout::new();

    let with_host = parasite.minimum_size_hint(Some((&host, &host_hints())), &parasite_hints());
    assert_eq!(with_host, host.minimum_size_hint(&host_hints()));

    let alone = parasite.minimum_size_hint(None, &parasite_hints());
    assert_eq!(alone, PlotLayout::new().minimum_size_hint(&parasite_hints()));
}
