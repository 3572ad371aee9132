//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for a month of transactions:
//! - **Price Range Chart**: Number of items in each price range
//! - **Category Chart**: Share of items per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with its HTML container and the JavaScript that draws it.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::analytics::{BarChartRow, CategoryCount};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart containers followed by the script that draws them.
///
/// The script sits next to the containers rather than in the page head so
/// that it runs again whenever htmx swaps in new dashboard content.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }

            script { (charts_script(charts)) }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    new ResizeObserver(() => chart.resize()).observe(chartDom);
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

/// Stop text from a chart label closing the surrounding script element.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/")
}

pub(super) fn price_range_chart(rows: &[BarChartRow]) -> Chart {
    let labels: Vec<String> = rows.iter().map(|row| row.range.clone()).collect();
    let counts: Vec<f64> = rows.iter().map(|row| f64::from(row.count)).collect();

    Chart::new()
        .title(Title::new().text("Price Range").subtext("Number of items"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name("Number of items").data(counts))
}

pub(super) fn category_chart(rows: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, String)> = rows
        .iter()
        .map(|row| (f64::from(row.count), row.category.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text("Categories").subtext("Items per category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Items")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
