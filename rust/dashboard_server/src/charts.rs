// src/charts.rs
//
// Figures are plain data in the shape plotly.js expects for
// `Plotly.react(element, figure.data, figure.layout)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stock_data::{PredictionPoint, TickerHistory};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn empty() -> Self {
        Figure::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Candlestick(CandlestickTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Axis {
    Dates(Vec<NaiveDate>),
    Values(Vec<Option<f64>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub x: Axis,
    pub y: Vec<Option<f64>>,
    /// Unset lets plotly.js choose: lines+markers under 20 points, lines otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub dash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickTrace {
    pub x: Vec<NaiveDate>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub title: Title,
}

impl Layout {
    fn titled(title: &str) -> Self {
        Layout {
            title: Some(Title {
                text: title.to_string(),
            }),
            ..Layout::default()
        }
    }

    fn with_xaxis(mut self, title: &str) -> Self {
        self.xaxis = Some(AxisLayout {
            title: Title {
                text: title.to_string(),
            },
        });
        self
    }

    fn with_yaxis(mut self, title: &str) -> Self {
        self.yaxis = Some(AxisLayout {
            title: Title {
                text: title.to_string(),
            },
        });
        self
    }
}

fn dates(history: &TickerHistory) -> Vec<NaiveDate> {
    history.records.iter().map(|r| r.date).collect()
}

fn closes(history: &TickerHistory) -> Vec<Option<f64>> {
    history.records.iter().map(|r| r.close).collect()
}

/// Volume over date, lines and markers. Empty without a volume column.
pub fn volume_figure(history: &TickerHistory) -> Figure {
    if !history.columns.volume || history.is_empty() {
        return Figure::empty();
    }

    let trace = ScatterTrace {
        x: Axis::Dates(dates(history)),
        y: history
            .records
            .iter()
            .map(|r| r.volume.map(|v| v as f64))
            .collect(),
        mode: Some("lines+markers".to_string()),
        name: None,
        line: None,
    };

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout: Layout::titled("Historical Volume").with_yaxis("Volume"),
    }
}

/// Low on x against high on y, markers only.
pub fn high_low_figure(history: &TickerHistory) -> Figure {
    if !(history.columns.low && history.columns.high) || history.is_empty() {
        return Figure::empty();
    }

    let trace = ScatterTrace {
        x: Axis::Values(history.records.iter().map(|r| r.low).collect()),
        y: history.records.iter().map(|r| r.high).collect(),
        mode: Some("markers".to_string()),
        name: None,
        line: None,
    };

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout: Layout::titled("High and Low Comparison")
            .with_xaxis("Low")
            .with_yaxis("High"),
    }
}

pub fn candlestick_figure(history: &TickerHistory) -> Figure {
    if !history.columns.has_ohlc() || history.is_empty() {
        return Figure::empty();
    }

    let records = &history.records;
    let trace = CandlestickTrace {
        x: dates(history),
        open: records.iter().map(|r| r.open).collect(),
        high: records.iter().map(|r| r.high).collect(),
        low: records.iter().map(|r| r.low).collect(),
        close: closes(history),
    };

    Figure {
        data: vec![Trace::Candlestick(trace)],
        layout: Layout::titled("Historical Candlestick Chart"),
    }
}

/// Historical close followed by the projected points as a dashed line.
pub fn prediction_figure(history: &TickerHistory, predictions: &[PredictionPoint]) -> Figure {
    if history.is_empty() {
        return Figure::empty();
    }

    let mut data = vec![Trace::Scatter(ScatterTrace {
        x: Axis::Dates(dates(history)),
        y: closes(history),
        mode: None,
        name: Some("Historical Close".to_string()),
        line: None,
    })];

    if !predictions.is_empty() {
        data.push(Trace::Scatter(ScatterTrace {
            x: Axis::Dates(predictions.iter().map(|p| p.date).collect()),
            y: predictions.iter().map(|p| Some(p.predicted_close)).collect(),
            mode: None,
            name: Some("Predicted Close".to_string()),
            line: Some(LineStyle {
                dash: "dash".to_string(),
            }),
        }));
    }

    Figure {
        data,
        layout: Layout::titled("Future Close Price Predictions"),
    }
}
