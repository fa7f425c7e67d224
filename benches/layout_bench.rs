use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use plot_layout::core::{AxisPosition, LinearScaleEngine, LogScaleEngine, Rect, ScaleEngine};
use plot_layout::layout::{
    AxisLayoutHint, EstimatedText, LabelHint, LayoutHints, LayoutOptions, LegendHint, PlotLayout,
};
use plot_layout::{Figure, PlotId};
use std::hint::black_box;

fn full_hints() -> LayoutHints {
    let mut hints = LayoutHints::default();
    hints.title = LabelHint::new(Arc::new(EstimatedText::new(
        "Throughput per worker over the last hour",
        16.0,
    )));
    hints.legend = LegendHint::new(Arc::new(EstimatedText::new(
        "worker-1 worker-2 worker-3",
        12.0,
    )));
    for axis in AxisPosition::ALL {
        hints.axes[axis] = AxisLayoutHint::visible(36)
            .with_border_dist(6, 6)
            .with_tick_offset(4.0)
            .with_title(Arc::new(EstimatedText::new("requests / s", 12.0)));
    }
    hints
}

fn bench_plot_layout_pass(c: &mut Criterion) {
    let hints = full_hints();
    let mut layout = PlotLayout::new();
    let rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

    c.bench_function("plot_layout_activate_four_axes", |b| {
        b.iter(|| {
            layout.activate(black_box(&hints), black_box(rect), LayoutOptions::default());
            black_box(layout.canvas_rect());
        })
    });
}

fn bench_divide_scale(c: &mut Criterion) {
    let linear = LinearScaleEngine::new();
    let log = LogScaleEngine::new();

    c.bench_function("linear_auto_scale_and_divide", |b| {
        b.iter(|| {
            let fitted = linear.auto_scale(black_box(10), black_box(-3.7), black_box(9_842.1));
            let _ = linear.divide_scale(fitted.x1, fitted.x2, 10, 5, fitted.step_size);
        })
    });

    c.bench_function("log_divide_twelve_decades", |b| {
        b.iter(|| {
            let _ = log.divide_scale(black_box(1e-6), black_box(1e6), 12, 9, 0.0);
        })
    });
}

fn bench_figure_grid(c: &mut Criterion) {
    let mut figure = Figure::new();
    let ids: Vec<PlotId> = (0..16)
        .map(|index| {
            let spec = figure.grid_spec(4, 4, index / 4, index % 4);
            figure.add_plot_grid(spec).expect("valid grid cell")
        })
        .collect();
    for id in &ids {
        figure
            .set_layout_hints(*id, full_hints())
            .expect("known plot");
    }

    c.bench_function("figure_grid_4x4_set_geometry", |b| {
        b.iter(|| {
            figure.set_geometry(black_box(Rect::new(0.0, 0.0, 1920.0, 1080.0)));
        })
    });
}

criterion_group!(
    benches,
    bench_plot_layout_pass,
    bench_divide_scale,
    bench_figure_grid
);
criterion_main!(benches);
