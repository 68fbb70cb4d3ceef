// src/report/recession.rs

use tracing::debug;

use super::Panel;
use crate::chart::{Chart, Datum};
use crate::data::SalesTable;

/// Four charts over recession rows only.
pub fn recession_report(table: &SalesTable) -> Vec<Panel> {
    let recession = table.in_recession();
    debug!(rows = recession.len(), "building recession report");

    let trend = Chart::line(
        "Automobile Sales During Recession Period",
        "Year",
        "Automobile_Sales",
    )
    .with_points(
        recession
            .mean_sales_by_year()
            .into_iter()
            .map(|g| (g.key, g.value)),
    );

    let avg_by_type = Chart::bar(
        "Average Vehicles Sold by Vehicle Type During Recession",
        "Vehicle_Type",
        "Automobile_Sales",
    )
    .with_points(
        recession
            .mean_sales_by_vehicle_type()
            .into_iter()
            .map(|g| (g.key, g.value)),
    );

    let ad_share = Chart::pie(
        "Total Advertising Expenditure Share by Vehicle Type During Recession",
        "Vehicle_Type",
        "Advertising_Expenditure",
    )
    .with_points(
        recession
            .total_ad_spend_by_vehicle_type()
            .into_iter()
            .map(|g| (g.key, g.value)),
    );

    let by_rate = recession.mean_sales_by_vehicle_type_and_rate();
    let rates: Vec<f64> = by_rate.iter().map(|g| g.key.1 .0).collect();
    let unemployment = Chart::bar(
        "Effect of Unemployment Rate on Vehicle Type and Sales During Recession",
        "Vehicle_Type",
        "Average Automobile Sales",
    )
    .with_points(
        by_rate
            .into_iter()
            .map(|g| (Datum::Text(g.key.0), g.value)),
    )
    .with_color("Unemployment Rate", rates);

    vec![
        Panel::pair(trend, avg_by_type),
        Panel::pair(ad_share, unemployment),
    ]
}
