use super::super::{Model, Msg};
use shared::{ChartSeries, PredictionView, ResultTab, TableView};
use strum::IntoEnumIterator;
use yew::prelude::*;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(outcome) = &model.outcome else {
        return html! {
            <p class="no-results-message">{"Submit a context to see predictions."}</p>
        };
    };
    let view = &outcome.view;

    html! {
        <section class="results-container">
            <div class="result-header">
                <h2 title={format!("Context {}", outcome.context_id)}>
                    <i class="fa-solid fa-chart-area"></i>{" Prediction"}
                </h2>
                if let Some(confidence) = &view.confidence_label {
                    <div class="meter-value">{ format!("Confidence: {}", confidence) }</div>
                }
            </div>
            <div class="result-tabs">
                { for ResultTab::iter().map(|tab| {
                    let active = tab == model.tab;
                    html! {
                        <button
                            class={classes!("tab-button", active.then_some("active"))}
                            onclick={ctx.link().callback(move |_| Msg::SelectTab(tab))}
                        >
                            { tab.label() }
                        </button>
                    }
                })}
            </div>
            <div class="tab-content">
                { render_tab(model.tab, view) }
            </div>
        </section>
    }
}

fn render_tab(tab: ResultTab, view: &PredictionView) -> Html {
    match tab {
        ResultTab::Chart => match &view.chart {
            Some(chart) => render_chart(chart),
            None => html! { <p class="empty-state">{"No chart data available"}</p> },
        },
        ResultTab::Table => match &view.table {
            Some(table) => render_table(table),
            None => html! { <p class="empty-state">{"No table data available"}</p> },
        },
        ResultTab::Json => html! { <pre class="raw-json">{ view.raw_json.clone() }</pre> },
    }
}

fn render_chart(chart: &ChartSeries) -> Html {
    let (low, high) = chart.y_bounds();
    let values = chart.polyline(&chart.values, CHART_WIDTH, CHART_HEIGHT);
    let band = chart.band.as_ref().map(|band| {
        (
            chart.polyline(&band.max, CHART_WIDTH, CHART_HEIGHT),
            chart.polyline(&band.min, CHART_WIDTH, CHART_HEIGHT),
        )
    });

    html! {
        <div class="chart">
            <svg
                class="chart-canvas"
                viewBox={format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)}
                preserveAspectRatio="none"
            >
                if let Some((max, min)) = band {
                    <polyline class="band-line" points={max} fill="none" stroke="#e07a5f"
                        stroke-width="1.5" stroke-dasharray="6 4" />
                    <polyline class="band-line" points={min} fill="none" stroke="#3d85c6"
                        stroke-width="1.5" stroke-dasharray="6 4" />
                }
                <polyline class="value-line" points={values} fill="none" stroke="#2a9d8f"
                    stroke-width="2" />
                { for (0..chart.len()).map(|i| html! {
                    <circle
                        cx={format!("{:.2}", chart.x_at(i, CHART_WIDTH))}
                        cy={format!("{:.2}", chart.y_at(chart.values[i], CHART_HEIGHT))}
                        r="3"
                        fill="#2a9d8f"
                    >
                        <title>{ format!("{}: {:.2}", chart.labels[i], chart.values[i]) }</title>
                    </circle>
                })}
            </svg>
            <div class="chart-axis">
                <span>{ format!("{:.2}", low) }</span>
                <span>{ format!("{:.2}", high) }</span>
            </div>
            <div class="chart-labels">
                { for chart.labels.iter().map(|label| html! { <span>{ label.clone() }</span> }) }
            </div>
            if chart.band.is_some() {
                <div class="chart-legend">
                    <span class="legend-value">{"value"}</span>
                    <span class="legend-max">{"max"}</span>
                    <span class="legend-min">{"min"}</span>
                </div>
            }
        </div>
    }
}

fn render_table(table: &TableView) -> Html {
    html! {
        <table class="prediction-table">
            <thead>
                <tr>
                    <th>{"Time"}</th>
                    <th>{"Value"}</th>
                    if table.show_band {
                        <th>{"Max"}</th>
                        <th>{"Min"}</th>
                    }
                </tr>
            </thead>
            <tbody>
                { for table.rows.iter().map(|row| html! {
                    <tr>
                        <td>{ row.time_label.clone() }</td>
                        <td>{ row.value.clone() }</td>
                        if table.show_band {
                            <td>{ row.max.clone().unwrap_or_else(|| "-".to_string()) }</td>
                            <td>{ row.min.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        }
                    </tr>
                })}
            </tbody>
        </table>
    }
}
