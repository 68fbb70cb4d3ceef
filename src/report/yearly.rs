// src/report/yearly.rs

use tracing::debug;

use super::Panel;
use crate::chart::Chart;
use crate::data::SalesTable;

/// Four charts for one year: sales against year, sales by month, mean
/// sales per vehicle type, and advertising share per vehicle type.
pub fn yearly_report(table: &SalesTable, year: i32) -> Vec<Panel> {
    let yearly = table.for_year(year);
    debug!(year, rows = yearly.len(), "building yearly report");

    // single-year subset against Year, so this is one x value
    let sales_over_year = Chart::line("Yearly Automobile Sales", "Year", "Automobile_Sales")
        .with_points(yearly.rows().iter().map(|r| (r.year, r.automobile_sales)));

    let sales_by_month = Chart::line(
        "Total Monthly Automobile Sales",
        "Month",
        "Automobile_Sales",
    )
    .with_points(
        yearly
            .rows()
            .iter()
            .map(|r| (r.month.as_str(), r.automobile_sales)),
    );

    let avg_by_type = Chart::bar(
        format!("Average Vehicles Sold by Vehicle Type in {}", year),
        "Vehicle_Type",
        "Automobile_Sales",
    )
    .with_points(
        yearly
            .mean_sales_by_vehicle_type()
            .into_iter()
            .map(|g| (g.key, g.value)),
    );

    let ad_share = Chart::pie(
        "Total Advertisement Expenditure for Each Vehicle",
        "Vehicle_Type",
        "Advertising_Expenditure",
    )
    .with_points(
        yearly
            .total_ad_spend_by_vehicle_type()
            .into_iter()
            .map(|g| (g.key, g.value)),
    );

    vec![
        Panel::pair(sales_over_year, sales_by_month),
        Panel::pair(avg_by_type, ad_share),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, Datum};
    use crate::data::table::tests::sample_table;

    #[test]
    fn four_charts_in_two_panels() {
        let panels = yearly_report(&sample_table(), 2000);
        let kinds: Vec<Vec<ChartKind>> = panels
            .iter()
            .map(|p| p.charts.iter().map(|c| c.kind).collect())
            .collect();
        assert_eq!(
            kinds,
            vec![
                vec![ChartKind::Line, ChartKind::Line],
                vec![ChartKind::Bar, ChartKind::Pie],
            ]
        );
    }

    #[test]
    fn bar_categories_and_title_follow_the_year() {
        let panels = yearly_report(&sample_table(), 2000);
        let bar = &panels[1].charts[0];

        assert!(bar.title.contains("2000"));
        assert_eq!(bar.x, vec![Datum::from("Car"), Datum::from("Truck")]);
        assert_eq!(bar.y, vec![450.0, 620.0]);
    }

    #[test]
    fn row_level_lines_follow_table_order() {
        let panels = yearly_report(&sample_table(), 2000);
        let over_year = &panels[0].charts[0];
        let by_month = &panels[0].charts[1];

        assert_eq!(over_year.x, vec![Datum::Int(2000); 3]);
        assert_eq!(by_month.x, vec![Datum::from("Jan"), Datum::from("Feb"), Datum::from("Mar")]);
        assert_eq!(by_month.y, vec![456.0, 620.0, 444.0]);
    }

    #[test]
    fn pie_sums_ad_spend() {
        let panels = yearly_report(&sample_table(), 2000);
        let pie = &panels[1].charts[1];
        assert_eq!(pie.y, vec![1558.0 + 3137.0, 3048.0]);
    }

    #[test]
    fn year_without_rows_still_yields_four_empty_charts() {
        let panels = yearly_report(&sample_table(), 1985);
        assert_eq!(panels.len(), 2);
        assert!(panels.iter().flat_map(|p| &p.charts).all(|c| c.is_empty()));
    }
}
