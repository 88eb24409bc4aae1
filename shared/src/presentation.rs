use crate::error::MalformedResponseError;
use crate::models::PredictionResponse;
use crate::normalize::{NormalizedSeries, normalize};
use serde_json::to_string_pretty;
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum ResultTab {
    #[default]
    Chart,
    Table,
    Json,
}

impl ResultTab {
    pub fn label(&self) -> &'static str {
        match self {
            ResultTab::Chart => "Chart",
            ResultTab::Table => "Table",
            ResultTab::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandLines {
    pub max: Vec<f64>,
    pub min: Vec<f64>,
}

/// Chart-ready projection. A series without max/min is drawn as a single
/// line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub band: Option<BandLines>,
    y_bounds: (f64, f64),
}

impl ChartSeries {
    fn from_series(series: &NormalizedSeries) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let band = series.has_band().then(|| BandLines {
            max: series.iter().filter_map(|p| p.max()).collect(),
            min: series.iter().filter_map(|p| p.min()).collect(),
        });
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let y_bounds = bounds_of(&values, band.as_ref());
        Some(Self {
            labels: series.iter().map(|p| p.time_label.clone()).collect(),
            values,
            band,
            y_bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lowest and highest y across every drawn line, widened when flat so the
    /// scale never collapses.
    pub fn y_bounds(&self) -> (f64, f64) {
        self.y_bounds
    }

    pub fn x_at(&self, index: usize, width: f64) -> f64 {
        if self.len() <= 1 {
            width / 2.0
        } else {
            width * index as f64 / (self.len() - 1) as f64
        }
    }

    pub fn y_at(&self, value: f64, height: f64) -> f64 {
        let (lo, hi) = self.y_bounds;
        height - (value - lo) / (hi - lo) * height
    }

    /// SVG `points` attribute for one line of this chart.
    pub fn polyline(&self, line: &[f64], width: f64, height: f64) -> String {
        line.iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.2},{:.2}", self.x_at(i, width), self.y_at(v, height)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn bounds_of(values: &[f64], band: Option<&BandLines>) -> (f64, f64) {
    let lines = std::iter::once(values)
        .chain(band.into_iter().flat_map(|b| [b.max.as_slice(), b.min.as_slice()]));
    let (lo, hi) = lines
        .flat_map(|line| line.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub time_label: String,
    pub value: String,
    pub max: Option<String>,
    pub min: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub show_band: bool,
    pub rows: Vec<TableRow>,
}

impl TableView {
    fn from_series(series: &NormalizedSeries) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let rows = series
            .iter()
            .map(|p| TableRow {
                time_label: p.time_label.clone(),
                value: format!("{:.2}", p.value),
                max: p.max().map(|v| format!("{:.2}", v)),
                min: p.min().map(|v| format!("{:.2}", v)),
            })
            .collect();
        Some(Self {
            show_band: series.has_band(),
            rows,
        })
    }
}

/// Everything the result panel renders for one prediction. `chart` and
/// `table` are `None` when there is nothing to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub series: NormalizedSeries,
    pub chart: Option<ChartSeries>,
    pub table: Option<TableView>,
    pub raw_json: String,
    pub confidence_label: Option<String>,
    pub anomaly: Option<MalformedResponseError>,
}

impl PredictionView {
    pub fn from_response(response: &PredictionResponse) -> Self {
        let result = &response.result;
        let (series, anomaly) = match normalize(result.predictions.as_ref()) {
            Ok(series) => (series, None),
            Err(err) => (NormalizedSeries::default(), Some(err)),
        };

        Self {
            chart: ChartSeries::from_series(&series),
            table: TableView::from_series(&series),
            raw_json: to_string_pretty(&response.raw).unwrap_or_default(),
            confidence_label: result.confidence.map(|c| format!("{:.2}%", c * 100.0)),
            anomaly,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
