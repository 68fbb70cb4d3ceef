// src/data/table.rs

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Trim};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    io::Read,
    ops::RangeInclusive,
};
use tracing::{debug, warn};

use super::record::{SalesRecord, REQUIRED_COLUMNS};

/// Years the dataset is expected to cover.
pub const YEAR_RANGE: RangeInclusive<i32> = 1980..=2023;

/// The full dataset, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

/// A row subset borrowed from a `SalesTable`, in table order.
#[derive(Debug, Clone)]
pub struct SalesView<'a> {
    rows: Vec<&'a SalesRecord>,
}

/// Mean or sum of one column for one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<K> {
    pub key: K,
    pub value: f64,
}

/// Unemployment rate usable as an ordered group key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate(pub f64);

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Default)]
struct Acc {
    sum: f64,
    count: usize,
}

enum Agg {
    Mean,
    Sum,
}

impl SalesTable {
    /// Parse a headered CSV into records. Unknown columns are ignored; a
    /// missing required column fails before any row is read.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().context("reading CSV header row")?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(anyhow!("CSV is missing required columns: {}", missing.join(", ")));
        }

        let mut records = Vec::new();
        for (idx, result) in rdr.deserialize::<SalesRecord>().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
            records.push(record);
        }
        debug!(rows = records.len(), "parsed sales CSV");

        Ok(Self { records })
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Warn about every record whose year falls outside `YEAR_RANGE` and
    /// return how many there were. The recession flag is already
    /// restricted to 0/1 by the parser.
    pub fn check_schema(&self) -> usize {
        let mut bad = 0;
        for r in self.records.iter().filter(|r| !YEAR_RANGE.contains(&r.year)) {
            warn!(year = r.year, month = %r.month, vehicle_type = %r.vehicle_type, "year out of range");
            bad += 1;
        }
        bad
    }

    pub fn filter<F>(&self, pred: F) -> SalesView<'_>
    where
        F: Fn(&SalesRecord) -> bool,
    {
        SalesView {
            rows: self.records.iter().filter(|r| pred(r)).collect(),
        }
    }

    pub fn for_year(&self, year: i32) -> SalesView<'_> {
        self.filter(|r| r.year == year)
    }

    pub fn in_recession(&self) -> SalesView<'_> {
        self.filter(|r| r.recession)
    }
}

impl<'a> SalesView<'a> {
    pub fn rows(&self) -> &[&'a SalesRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn mean_sales_by_year(&self) -> Vec<Group<i32>> {
        self.grouped(|r| r.year, |r| r.automobile_sales, Agg::Mean)
    }

    pub fn mean_sales_by_vehicle_type(&self) -> Vec<Group<String>> {
        self.grouped(|r| r.vehicle_type.clone(), |r| r.automobile_sales, Agg::Mean)
    }

    pub fn total_ad_spend_by_vehicle_type(&self) -> Vec<Group<String>> {
        self.grouped(
            |r| r.vehicle_type.clone(),
            |r| r.advertising_expenditure,
            Agg::Sum,
        )
    }

    pub fn mean_sales_by_vehicle_type_and_rate(&self) -> Vec<Group<(String, Rate)>> {
        self.grouped(
            |r| (r.vehicle_type.clone(), Rate(r.unemployment_rate)),
            |r| r.automobile_sales,
            Agg::Mean,
        )
    }

    /// Keys come back in ascending order.
    fn grouped<K, KF, VF>(&self, key: KF, value: VF, agg: Agg) -> Vec<Group<K>>
    where
        K: Ord,
        KF: Fn(&SalesRecord) -> K,
        VF: Fn(&SalesRecord) -> f64,
    {
        let mut groups: BTreeMap<K, Acc> = BTreeMap::new();
        for r in &self.rows {
            let acc = groups.entry(key(r)).or_default();
            acc.sum += value(r);
            acc.count += 1;
        }

        groups
            .into_iter()
            .map(|(key, acc)| Group {
                key,
                value: match agg {
                    Agg::Sum => acc.sum,
                    Agg::Mean => acc.sum / acc.count as f64,
                },
            })
            .collect()
    }
}
