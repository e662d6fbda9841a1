use eframe::egui::{Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Line, Plot, PlotBounds, PlotPoints,
    Points, Polygon,
};

use crate::color;
use crate::geo::{self, DEFAULT_ZOOM};
use crate::series;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
const ARC_SEGMENTS: usize = 48;
const GRATICULE_STEP_DEG: f64 = 15.0;

// ---------------------------------------------------------------------------
// Globe map (central panel)
// ---------------------------------------------------------------------------

/// Render the orthographic transfer map for the selected season.
pub fn transfer_map(ui: &mut Ui, state: &AppState) {
    let projection = &state.projection;
    let view = state.controller.view();
    let max_fee = view.map.max_fee();
    let reset = state.take_map_reset();

    Plot::new("transfer_map")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, _| name.to_string())
        .show(ui, |plot_ui| {
            if reset {
                let half = 1.0 / DEFAULT_ZOOM;
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([-half, -half], [half, half]));
            }

            plot_ui.polygon(
                Polygon::new(PlotPoints::from(geo::outline(180)))
                    .fill_color(color::OCEAN)
                    .stroke(Stroke::new(1.0, color::GLOBE_BACKGROUND)),
            );
            for line in projection.graticule(GRATICULE_STEP_DEG) {
                plot_ui.line(Line::new(PlotPoints::from(line)).color(color::GRATICULE).width(0.5));
            }
            for coast in &state.coastlines {
                for piece in projection.project_ring(&coast.ring) {
                    plot_ui.line(Line::new(PlotPoints::from(piece)).color(color::COASTLINE).width(1.0));
                }
            }

            for arc in &view.map.arcs {
                let stroke_color = if state.shade_by_fee {
                    color::fee_shade(arc.fee, max_fee)
                } else {
                    color::arc_color()
                };
                let path = geo::great_circle(arc.from, arc.to, ARC_SEGMENTS);
                for piece in projection.project_path(&path) {
                    plot_ui.line(Line::new(PlotPoints::from(piece)).color(stroke_color).width(2.0));
                }
            }

            for marker in &view.map.markers {
                let Some(xy) = projection.project(marker.lat, marker.lon) else {
                    continue;
                };
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![xy]))
                        .name(&marker.tooltip)
                        .color(color::endpoint_color(marker.endpoint))
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Season charts (side panel)
// ---------------------------------------------------------------------------

/// Season labels on an index axis: tick `i` shows `seasons[i]`.
fn season_formatter(seasons: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        seasons.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// Line chart of summed fees per season, over the full dataset.
pub fn fee_chart(ui: &mut Ui, state: &AppState) {
    let series = state.controller.fee_chart();
    ui.strong(series::FEE_CHART_TITLE);

    let points: Vec<[f64; 2]> = series
        .y
        .iter()
        .enumerate()
        .map(|(i, &fee)| [i as f64, fee])
        .collect();
    let labels = series.x.clone();

    Plot::new("fee_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(series::SEASON_AXIS_LABEL)
        .y_axis_label(series::FEE_AXIS_LABEL)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(season_formatter(series.x.clone()))
        .y_axis_formatter(|mark, _range| series::format_eur(mark.value))
        .label_formatter(move |_, value| {
            let idx = value.x.round();
            let season = if idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            };
            format!("{season}\n{}", series::format_eur(value.y))
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(color::FEE_LINE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(color::FEE_LINE)
                    .filled(true)
                    .radius(4.0),
            );
        });
}

/// Grouped bars of incoming / outgoing counts per season.
pub fn direction_chart(ui: &mut Ui, state: &AppState) {
    let [incoming, outgoing] = state.controller.direction_chart();
    ui.strong(series::DIRECTION_CHART_TITLE);

    const BAR_WIDTH: f64 = 0.38;
    let bars = |s: &series::BarSeries, offset: f64| {
        let items: Vec<Bar> = s
            .y
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(i as f64 + offset, f64::from(count))
                    .width(BAR_WIDTH)
                    .name(format!("{} {}", s.x[i], s.direction.label()))
            })
            .collect();
        BarChart::new(items)
            .name(s.direction.label())
            .color(color::direction_color(s.direction))
    };
    let grouped = [
        bars(incoming, -BAR_WIDTH / 2.0),
        bars(outgoing, BAR_WIDTH / 2.0),
    ];

    Plot::new("direction_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(series::SEASON_AXIS_LABEL)
        .y_axis_label(series::COUNT_AXIS_LABEL)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(season_formatter(incoming.x.clone()))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in grouped {
                plot_ui.bar_chart(chart);
            }
        });
}
