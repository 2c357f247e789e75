//! Minimal bar chart over a [`ChartSeries`].
//!
//! DESIGN
//! ======
//! Bars are plain divs sized as a percentage of the series maximum, so the
//! chart needs no canvas or JS charting library.

#[cfg(test)]
#[path = "series_chart_test.rs"]
mod series_chart_test;

use leptos::prelude::*;

use crate::state::progress::ChartSeries;

/// Bar height as a percentage of `max`, clamped to `0..=100`.
#[must_use]
pub fn bar_height_pct(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

fn bar_style(value: f64, max: f64) -> String {
    format!("height: {:.1}%;", bar_height_pct(value, max))
}

#[component]
pub fn SeriesChart(#[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    view! {
        <figure class="series-chart">
            <figcaption class="series-chart__title">{move || series.get().title}</figcaption>
            <div class="series-chart__legend">
                {move || {
                    series
                        .get()
                        .datasets
                        .into_iter()
                        .enumerate()
                        .map(|(i, d)| {
                            view! { <span class=format!("series-chart__key series-chart__key--{i}")>{d.label}</span> }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
            <div class="series-chart__plot">
                {move || {
                    let s = series.get();
                    let max = s.max_value();
                    s.labels
                        .iter()
                        .enumerate()
                        .map(|(col, label)| {
                            let bars = s
                                .datasets
                                .iter()
                                .enumerate()
                                .filter_map(|(i, d)| d.data.get(col).map(|v| (i, *v)))
                                .map(|(i, v)| {
                                    view! {
                                        <div
                                            class=format!("series-chart__bar series-chart__bar--{i}")
                                            style=bar_style(v, max)
                                            title=format!("{v}")
                                        ></div>
                                    }
                                })
                                .collect::<Vec<_>>();
                            view! {
                                <div class="series-chart__column">
                                    <div class="series-chart__bars">{bars}</div>
                                    <span class="series-chart__label">{label.clone()}</span>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </figure>
    }
}
