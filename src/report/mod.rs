// src/report/mod.rs

pub mod recession;
pub mod yearly;

use serde::Serialize;

use crate::chart::Chart;
use crate::data::SalesTable;

pub use recession::recession_report;
pub use yearly::yearly_report;

/// The two mutually exclusive dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportType {
    Yearly,
    Recession,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Yearly, ReportType::Recession];

    /// Value the report-type control sends.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly",
            ReportType::Recession => "Recession",
        }
    }

    /// Text the report-type control shows.
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly Statistics",
            ReportType::Recession => "Recession Period Statistics",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Yearly" => Some(ReportType::Yearly),
            "Recession" => Some(ReportType::Recession),
            _ => None,
        }
    }
}

/// One `chart-item` column of the output container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub charts: Vec<Chart>,
}

impl Panel {
    pub fn pair(left: Chart, right: Chart) -> Self {
        Self {
            charts: vec![left, right],
        }
    }
}

/// Where the two controls currently stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Unselected,
    YearlyUnselected,
    YearlySelected(i32),
    Recession,
}

impl ReportState {
    /// An unknown report type counts as unselected, and so does a year
    /// that is empty or not an integer.
    pub fn from_inputs(statistics: Option<&str>, year: Option<&str>) -> Self {
        match statistics.and_then(ReportType::from_str) {
            Some(ReportType::Recession) => ReportState::Recession,
            Some(ReportType::Yearly) => match year.and_then(|y| y.trim().parse().ok()) {
                Some(y) => ReportState::YearlySelected(y),
                None => ReportState::YearlyUnselected,
            },
            None => ReportState::Unselected,
        }
    }
}

/// Panels for the output container; empty when nothing is selected.
pub fn generate(table: &SalesTable, state: ReportState) -> Vec<Panel> {
    match state {
        ReportState::YearlySelected(year) => yearly_report(table, year),
        ReportState::Recession => recession_report(table),
        ReportState::Unselected | ReportState::YearlyUnselected => Vec::new(),
    }
}

#[cfg(test)]
pub(crate) fn chart_count(panels: &[Panel]) -> usize {
    panels.iter().map(|p| p.charts.len()).sum()
}
