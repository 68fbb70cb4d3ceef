// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::data::SalesTable;

/// GET `url` and return the body; any non-2xx status is an error.
async fn get_text_core(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    Ok(client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?)
}

/// Download the sales CSV once and parse it into the shared table.
/// No retries: a bad response is returned to the caller as-is.
#[instrument(level = "info", skip(client))]
pub async fn load_sales_table(client: &Client, url: &str) -> Result<SalesTable> {
    let url = Url::parse(url).with_context(|| format!("parsing data URL {}", url))?;
    let body = get_text_core(client, &url).await?;

    let table = SalesTable::from_csv_str(&body)
        .with_context(|| format!("parsing sales CSV from {}", url))?;
    let out_of_range = table.check_schema();
    if out_of_range > 0 {
        warn!(out_of_range, "rows with years outside the dashboard range");
    }

    info!(rows = table.len(), out_of_range, "sales data downloaded and read into a table");
    Ok(table)
}
