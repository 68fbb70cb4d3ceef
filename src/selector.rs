// src/selector.rs

use serde::Serialize;

use crate::data::YEAR_RANGE;
use crate::report::ReportType;

pub const REPORT_TYPE_ID: &str = "dropdown-statistics";
pub const YEAR_ID: &str = "select-year";
pub const YEAR_CONTAINER_ID: &str = "select-year-container";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

pub fn report_type_options() -> Vec<DropdownOption> {
    ReportType::ALL
        .iter()
        .map(|rt| DropdownOption {
            label: rt.label().to_string(),
            value: rt.as_str().to_string(),
        })
        .collect()
}

/// "1980" through "2023", label = value.
pub fn year_options() -> Vec<DropdownOption> {
    YEAR_RANGE
        .map(|y| DropdownOption {
            label: y.to_string(),
            value: y.to_string(),
        })
        .collect()
}

/// The year control is shown only for the yearly report.
pub fn year_container_display(statistics: Option<&str>) -> Display {
    match statistics.and_then(ReportType::from_str) {
        Some(ReportType::Yearly) => Display::Block,
        _ => Display::None,
    }
}
