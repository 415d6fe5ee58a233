//! Run summaries over a finished (or partial) time series.
//!
//! - [`describe`]: count / mean / std / min / quartiles / max per column.
//! - [`correlation`]: pairwise Pearson coefficients between columns.
//! - [`rows_where`]: rows whose boolean column is set.
//!
//! Booleans count as 0/1; empty cells are skipped pairwise.

use std::fmt;

use ips_core::Field;
use ips_sensor::Record;

use crate::{Row, TimeSeriesStore};

/// Descriptive statistics of one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSummary {
    pub name:   &'static str,
    pub count:  usize,
    pub mean:   f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std:    Option<f64>,
    pub min:    f64,
    pub q25:    f64,
    pub median: f64,
    pub q75:    f64,
    pub max:    f64,
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self.std.map_or_else(|| "-".to_string(), |s| format!("{s:.3}"));
        write!(
            f,
            "{:<20} {:>6} {:>10.3} {:>10} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            self.name, self.count, self.mean, std, self.min, self.q25, self.median, self.q75, self.max
        )
    }
}

/// Summaries for every column holding at least one value, in schema order.
pub fn describe<R: Record>(store: &TimeSeriesStore<R>) -> Vec<ColumnSummary> {
    let table = field_table(store);
    R::COLUMNS
        .iter()
        .enumerate()
        .filter_map(|(idx, col)| {
            let mut values: Vec<f64> = table.iter().filter_map(|row| row[idx].as_f64()).collect();
            summarize(col.name, &mut values)
        })
        .collect()
}

fn summarize(name: &'static str, values: &mut [f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });
    Some(ColumnSummary {
        name,
        count: n,
        mean,
        std,
        min: values[0],
        q25: quantile(values, 0.25),
        median: quantile(values, 0.5),
        q75: quantile(values, 0.75),
        max: values[n - 1],
    })
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ── Correlation ───────────────────────────────────────────────────────────────

/// Square matrix of Pearson coefficients, indexed by column.
///
/// A cell is `None` when fewer than two rows have both values or either
/// column is constant over those rows.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<&'static str>,
    values:  Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient by position.
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.columns.len();
        if i >= n || j >= n {
            return None;
        }
        self.values[i * n + j]
    }

    /// Coefficient by column name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.at(i, j)
    }
}

pub fn correlation<R: Record>(store: &TimeSeriesStore<R>) -> CorrelationMatrix {
    let table = field_table(store);
    let columns: Vec<&'static str> = R::COLUMNS.iter().map(|c| c.name).collect();
    let n = columns.len();
    let mut values = vec![None; n * n];
    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = table
                .iter()
                .filter_map(|row| Some((row[i].as_f64()?, row[j].as_f64()?)))
                .collect();
            let r = pearson(&pairs);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }
    CorrelationMatrix { columns, values }
}

fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Rows whose boolean `column` is `true`.  Empty for unknown or non-boolean
/// columns.
pub fn rows_where<'a, R: Record>(store: &'a TimeSeriesStore<R>, column: &str) -> Vec<&'a Row<R>> {
    let Some(idx) = R::COLUMNS.iter().position(|c| c.name == column) else {
        return Vec::new();
    };
    store
        .iter()
        .filter(|row| row.record.fields()[idx] == Field::Boolean(true))
        .collect()
}

fn field_table<R: Record>(store: &TimeSeriesStore<R>) -> Vec<Vec<Field>> {
    store.iter().map(|row| row.record.fields()).collect()
}
