use crate::error::MalformedResponseError;
use serde::Serialize;
use serde_json::Value;

/// Spread of the samples behind one point. Always both bounds or none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub time_label: String,
    pub value: f64,
    #[serde(flatten)]
    pub band: Option<Band>,
}

impl NormalizedPoint {
    pub fn max(&self) -> Option<f64> {
        self.band.map(|b| b.max)
    }

    pub fn min(&self) -> Option<f64> {
        self.band.map(|b| b.min)
    }
}

/// Canonical plottable series; position `i` is the `i`-th prediction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, derive_more::Deref)]
pub struct NormalizedSeries(Vec<NormalizedPoint>);

impl NormalizedSeries {
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.0
    }

    /// Whether the points carry max/min. Every point shares the shape of the
    /// payload, so the first one decides.
    pub fn has_band(&self) -> bool {
        self.0.first().is_some_and(|p| p.band.is_some())
    }
}

/// The two payload shapes the service may return, resolved once.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionShape {
    Empty,
    Flat(Vec<f64>),
    /// Several samples per time step.
    Nested(Vec<Vec<f64>>),
}

impl PredictionShape {
    pub fn classify(predictions: Option<&Value>) -> Result<Self, MalformedResponseError> {
        let items = match predictions {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Ok(PredictionShape::Empty),
        };

        if items[0].is_array() {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Array(row) if row.is_empty() => {
                        Err(MalformedResponseError::EmptyRow { index })
                    }
                    Value::Array(row) => row
                        .iter()
                        .map(|v| v.as_f64().ok_or(MalformedResponseError::NonNumeric { index }))
                        .collect::<Result<Vec<f64>, _>>(),
                    _ => Err(MalformedResponseError::MixedShape { index }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PredictionShape::Nested)
        } else {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Array(_) => Err(MalformedResponseError::MixedShape { index }),
                    other => other
                        .as_f64()
                        .ok_or(MalformedResponseError::NonNumeric { index }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PredictionShape::Flat)
        }
    }

    pub fn into_series(self) -> NormalizedSeries {
        let points = match self {
            PredictionShape::Empty => Vec::new(),
            PredictionShape::Flat(values) => values
                .into_iter()
                .enumerate()
                .map(|(i, value)| NormalizedPoint {
                    time_label: time_label(i),
                    value,
                    band: None,
                })
                .collect(),
            PredictionShape::Nested(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| summarize(i, row))
                .collect(),
        };
        NormalizedSeries(points)
    }
}

/// Classifies the raw `predictions` payload and produces the canonical
/// series. Absent, non-sequence and empty payloads give an empty series.
pub fn normalize(predictions: Option<&Value>) -> Result<NormalizedSeries, MalformedResponseError> {
    PredictionShape::classify(predictions)
        .map(PredictionShape::into_series)
        .inspect_err(|err| log::warn!("Malformed prediction payload: {}", err))
}

fn time_label(index: usize) -> String {
    format!("T{}", index + 1)
}

// rows are non-empty once classified
fn summarize(index: usize, row: &[f64]) -> NormalizedPoint {
    let sum: f64 = row.iter().sum();
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = row.iter().copied().fold(f64::INFINITY, f64::min);
    // rounding in the sum can push the mean of equal samples past them
    let mean = (sum / row.len() as f64).clamp(min, max);
    NormalizedPoint {
        time_label: time_label(index),
        value: mean,
        band: Some(Band { max, min }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: Value) -> Result<NormalizedSeries, MalformedResponseError> {
        normalize(Some(&value))
    }

    #[test]
    fn flat_series_keeps_values_and_positions() {
        let series = run(json!([1, 2, 3])).unwrap();
        let expected: Vec<_> = [1.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &value)| NormalizedPoint {
                time_label: format!("T{}", i + 1),
                value,
                band: None,
            })
            .collect();
        assert_eq!(series.points(), expected.as_slice());
        assert!(!series.has_band());
    }

    #[test]
    fn nested_series_averages_each_row() {
        let series = run(json!([[1, 2, 3], [4, 5, 6]])).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].time_label, "T1");
        assert_eq!(series[0].value, 2.0);
        assert_eq!(series[0].max(), Some(3.0));
        assert_eq!(series[0].min(), Some(1.0));
        assert_eq!(series[1].time_label, "T2");
        assert_eq!(series[1].value, 5.0);
        assert_eq!(series[1].max(), Some(6.0));
        assert_eq!(series[1].min(), Some(4.0));
        assert!(series.has_band());
    }

    #[test]
    fn band_always_brackets_the_mean() {
        let rows = json!([
            [0.3, -2.5, 7.25],
            [1e-9],
            [5, 5, 5, 5],
            [0.1, 0.1, 0.1],
            [-1, -9.75, 3.5, 0.1]
        ]);
        let series = run(rows).unwrap();
        assert_eq!(series.len(), 5);
        for point in series.iter() {
            let band = point.band.unwrap();
            assert!(band.min <= point.value && point.value <= band.max, "{:?}", point);
        }
    }

    #[test]
    fn empty_and_absent_payloads_give_empty_series() {
        assert!(normalize(None).unwrap().is_empty());
        assert!(run(json!([])).unwrap().is_empty());
        assert!(run(json!(null)).unwrap().is_empty());
        assert!(run(json!({"a": 1})).unwrap().is_empty());
        assert!(run(json!("1,2,3")).unwrap().is_empty());
    }

    #[test]
    fn empty_inner_row_is_malformed() {
        assert_eq!(
            run(json!([[1, 2], []])).unwrap_err(),
            MalformedResponseError::EmptyRow { index: 1 }
        );
    }

    #[test]
    fn mixed_and_non_numeric_payloads_are_malformed() {
        assert_eq!(
            run(json!([[1], 2])).unwrap_err(),
            MalformedResponseError::MixedShape { index: 1 }
        );
        assert_eq!(
            run(json!([1, [2]])).unwrap_err(),
            MalformedResponseError::MixedShape { index: 1 }
        );
        assert_eq!(
            run(json!([1, "two"])).unwrap_err(),
            MalformedResponseError::NonNumeric { index: 1 }
        );
        assert_eq!(
            run(json!([[1, null]])).unwrap_err(),
            MalformedResponseError::NonNumeric { index: 0 }
        );
    }

    #[test]
    fn point_serializes_band_inline() {
        let series = run(json!([[1, 3]])).unwrap();
        assert_eq!(
            serde_json::to_value(&series[0]).unwrap(),
            json!({"time_label": "T1", "value": 2.0, "max": 3.0, "min": 1.0})
        );
        let series = run(json!([4])).unwrap();
        assert_eq!(
            serde_json::to_value(&series[0]).unwrap(),
            json!({"time_label": "T1", "value": 4.0})
        );
    }
}
