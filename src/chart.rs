// src/chart.rs

//! Declarative chart descriptions. A `Chart` holds the data and encodings
//! of one figure; `to_plotly` turns it into a plotly.js `{data, layout}`
//! object for the browser to draw.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// An x-axis value or a pie slice name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Int(i64),
    Text(String),
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int(v as i64)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Text(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Text(v)
    }
}

/// A continuous colour channel, one value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    /// Axis title for `x` (slice-name label for pies).
    pub x_label: String,
    /// Axis title for `y` (value label for pies).
    pub y_label: String,
    pub x: Vec<Datum>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorScale>,
}

impl Chart {
    fn new(kind: ChartKind, title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x: Vec::new(),
            y: Vec::new(),
            color: None,
        }
    }

    pub fn line(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self::new(ChartKind::Line, title, x_label, y_label)
    }

    pub fn bar(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self::new(ChartKind::Bar, title, x_label, y_label)
    }

    pub fn pie(title: impl Into<String>, names_label: &str, values_label: &str) -> Self {
        Self::new(ChartKind::Pie, title, names_label, values_label)
    }

    pub fn with_points<I, X>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (X, f64)>,
        X: Into<Datum>,
    {
        for (x, y) in points {
            self.x.push(x.into());
            self.y.push(y);
        }
        self
    }

    /// Colour each point by `values`; must be as long as the points.
    pub fn with_color(mut self, label: &str, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.y.len());
        self.color = Some(ColorScale {
            label: label.to_string(),
            values,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// plotly.js figure JSON.
    pub fn to_plotly(&self) -> Value {
        let trace = match self.kind {
            ChartKind::Line => json!({
                "type": "scatter",
                "mode": "lines",
                "x": self.x,
                "y": self.y,
            }),
            ChartKind::Bar => {
                let mut trace = json!({
                    "type": "bar",
                    "x": self.x,
                    "y": self.y,
                });
                if let Some(color) = &self.color {
                    trace["marker"] = json!({
                        "color": color.values,
                        "colorscale": "Plasma",
                        "showscale": true,
                        "colorbar": { "title": { "text": color.label } },
                    });
                }
                trace
            }
            ChartKind::Pie => json!({
                "type": "pie",
                "labels": self.x,
                "values": self.y,
            }),
        };

        let mut layout = json!({
            "title": { "text": self.title },
            "margin": { "t": 60 },
        });
        if self.kind != ChartKind::Pie {
            layout["xaxis"] = json!({ "title": { "text": self.x_label } });
            layout["yaxis"] = json!({ "title": { "text": self.y_label } });
        }
        // one coloured trace with repeated categories: stack, don't overlap
        if self.kind == ChartKind::Bar && self.color.is_some() {
            layout["barmode"] = json!("relative");
        }

        json!({ "data": [trace], "layout": layout })
    }
}
