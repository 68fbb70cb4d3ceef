// src/callbacks.rs

//! Input-change dispatch. Each `Callback` names the component property it
//! writes, the controls it reads, and a plain function from the table and
//! current control values to the new property value. Nothing here needs a
//! running server.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::data::SalesTable;
use crate::report::{self, Panel, ReportState};
use crate::selector::{self, Display, REPORT_TYPE_ID, YEAR_CONTAINER_ID, YEAR_ID};

pub const OUTPUT_CONTAINER_ID: &str = "output-container";

/// Current values of both controls; `None` means the placeholder is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(rename = "dropdown-statistics", default)]
    pub statistics: Option<String>,
    #[serde(rename = "select-year", default)]
    pub year: Option<String>,
}

impl Inputs {
    pub fn new(statistics: Option<&str>, year: Option<&str>) -> Self {
        Self {
            statistics: statistics.map(str::to_string),
            year: year.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prop {
    pub id: &'static str,
    pub property: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Style(Display),
    Children(Vec<Panel>),
}

impl OutputValue {
    /// JSON the page script applies: a style object or a list of panels,
    /// each panel carrying plotly figures.
    pub fn to_wire(&self) -> Value {
        match self {
            OutputValue::Style(display) => json!({ "display": display.as_css() }),
            OutputValue::Children(panels) => Value::Array(
                panels
                    .iter()
                    .map(|p| {
                        json!({
                            "className": "chart-item",
                            "style": { "flex": "50%" },
                            "figures": p.charts.iter().map(|c| c.to_plotly()).collect::<Vec<_>>(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

pub type Handler = fn(&SalesTable, &Inputs) -> OutputValue;

pub struct Callback {
    pub output: Prop,
    pub inputs: &'static [&'static str],
    pub handler: Handler,
}

/// One entry of `/_dependencies`.
#[derive(Debug, Clone, Serialize)]
pub struct Dependency {
    pub output: Prop,
    pub inputs: Vec<Prop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputUpdate {
    pub output: Prop,
    pub value: OutputValue,
}

impl OutputUpdate {
    pub fn to_wire(&self) -> Value {
        json!({
            "id": self.output.id,
            "property": self.output.property,
            "value": self.value.to_wire(),
        })
    }
}

fn year_container_style(_table: &SalesTable, inputs: &Inputs) -> OutputValue {
    OutputValue::Style(selector::year_container_display(inputs.statistics.as_deref()))
}

fn output_container_children(table: &SalesTable, inputs: &Inputs) -> OutputValue {
    let state = ReportState::from_inputs(inputs.statistics.as_deref(), inputs.year.as_deref());
    OutputValue::Children(report::generate(table, state))
}

pub struct Dispatcher {
    callbacks: Vec<Callback>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            callbacks: vec![
                Callback {
                    output: Prop {
                        id: YEAR_CONTAINER_ID,
                        property: "style",
                    },
                    inputs: &[REPORT_TYPE_ID],
                    handler: year_container_style,
                },
                Callback {
                    output: Prop {
                        id: OUTPUT_CONTAINER_ID,
                        property: "children",
                    },
                    inputs: &[REPORT_TYPE_ID, YEAR_ID],
                    handler: output_container_children,
                },
            ],
        }
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        self.callbacks
            .iter()
            .map(|cb| Dependency {
                output: cb.output,
                inputs: cb
                    .inputs
                    .iter()
                    .map(|id| Prop {
                        id: *id,
                        property: "value",
                    })
                    .collect(),
            })
            .collect()
    }

    /// Run every callback reading one of `changed`, or all of them when
    /// `changed` is empty (first render).
    pub fn dispatch(
        &self,
        table: &SalesTable,
        changed: &[String],
        inputs: &Inputs,
    ) -> Vec<OutputUpdate> {
        self.callbacks
            .iter()
            .filter(|cb| {
                changed.is_empty()
                    || cb
                        .inputs
                        .iter()
                        .any(|id| changed.iter().any(|c| c.as_str() == *id))
            })
            .map(|cb| {
                debug!(output = cb.output.id, ?inputs, "running callback");
                OutputUpdate {
                    output: cb.output,
                    value: (cb.handler)(table, inputs),
                }
            })
            .collect()
    }
}
