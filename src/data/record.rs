// src/data/record.rs

use serde::{de, Deserialize, Deserializer, Serialize};

/// Columns the loader refuses to run without.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Year",
    "Month",
    "Vehicle_Type",
    "Automobile_Sales",
    "Advertising_Expenditure",
    "Recession",
    "unemployment_rate",
];

/// One (year, month, vehicle type) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: String,
    #[serde(rename = "Automobile_Sales")]
    pub automobile_sales: f64,
    #[serde(rename = "Advertising_Expenditure")]
    pub advertising_expenditure: f64,
    #[serde(rename = "Recession", deserialize_with = "recession_flag")]
    pub recession: bool,
    #[serde(rename = "unemployment_rate")]
    pub unemployment_rate: f64,
}

/// Accepts `0`/`1` (also `0.0`/`1.0`, as dataframe exports sometimes write)
/// and rejects anything else.
fn recession_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "1.0" => Ok(true),
        "0" | "0.0" => Ok(false),
        other => Err(de::Error::custom(format!(
            "recession flag must be 0 or 1, got {:?}",
            other
        ))),
    }
}
