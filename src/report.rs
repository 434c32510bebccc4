//! Markdown rendering of history results.
//!
//! A report is a title, a metadata block, a pipe table of every record and
//! the data-source line. Rendering is pure: the same inputs always produce
//! the same bytes.

use std::fmt;

use crate::constants::DATA_SOURCE;
use crate::market::MarketConfig;
use crate::types::history::{HistoryRecord, HistoryRequest};

/// Rendered, immutable history report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryReport {
    text: String,
    record_count: usize,
}

impl HistoryReport {
    /// Render `records` for `req` using the market's labels.
    pub fn render(config: &MarketConfig, req: &HistoryRequest, records: &[HistoryRecord]) -> Self {
        let table = render_table(config, records);
        let text = format!(
            "# {title}\n\n\
             **股票代码**: {symbol}  \n\
             **数据周期**: {period}  \n\
             **日期范围**: {start} ~ {end}  \n\
             **复权方式**: {adjust}  \n\
             **数据条数**: {count} 条  \n\
             **货币单位**: {currency}\n\n\
             {table}\n\n\
             {DATA_SOURCE}\n",
            title = config.title(),
            symbol = req.symbol,
            period = req.period,
            start = req.start_date.format("%Y%m%d"),
            end = req.end_date.format("%Y%m%d"),
            adjust = req.adjust.label(),
            count = records.len(),
            currency = config.currency,
        );

        Self {
            text,
            record_count: records.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }
}

impl fmt::Display for HistoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const PRICE_COLUMNS: [&str; 10] = [
    "开盘", "收盘", "最高", "最低", "成交量", "成交额", "振幅", "涨跌幅", "涨跌额", "换手率",
];

/// Render records as a pipe table. Text columns are left-aligned, numeric
/// columns right-aligned, floats with two decimals.
fn render_table(config: &MarketConfig, records: &[HistoryRecord]) -> String {
    let with_code = records.iter().any(|r| r.code.is_some());

    let mut headers: Vec<&str> = vec![config.date_column];
    let mut aligns = vec![Align::Left];
    if with_code {
        headers.push("股票代码");
        aligns.push(Align::Left);
    }
    headers.extend(PRICE_COLUMNS);
    aligns.extend([Align::Right; PRICE_COLUMNS.len()]);

    let rows: Vec<Vec<String>> = records.iter().map(|r| record_cells(r, with_code)).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|row| display_width(&row[i]))
                .chain(std::iter::once(display_width(h)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().copied(), &widths, &aligns));
    lines.push(render_rule(&widths, &aligns));
    for row in &rows {
        lines.push(render_row(row.iter().map(String::as_str), &widths, &aligns));
    }
    lines.join("\n")
}

fn record_cells(r: &HistoryRecord, with_code: bool) -> Vec<String> {
    let mut cells = vec![r.date.format("%Y-%m-%d").to_string()];
    if with_code {
        cells.push(r.code.clone().unwrap_or_default());
    }
    cells.extend([
        fmt_float(r.open),
        fmt_float(r.close),
        fmt_float(r.high),
        fmt_float(r.low),
        r.volume.to_string(),
        fmt_float(r.amount),
        fmt_float(r.amplitude),
        fmt_float(r.change_pct),
        fmt_float(r.change),
        fmt_float(r.turnover_rate),
    ]);
    cells
}

fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.2}")
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], aligns: &[Align]) -> String {
    let mut line = String::from("|");
    for ((cell, &width), &align) in cells.zip(widths).zip(aligns) {
        let pad = " ".repeat(width.saturating_sub(display_width(cell)));
        line.push(' ');
        match align {
            Align::Left => {
                line.push_str(cell);
                line.push_str(&pad);
            }
            Align::Right => {
                line.push_str(&pad);
                line.push_str(cell);
            }
        }
        line.push_str(" |");
    }
    line
}

fn render_rule(widths: &[usize], aligns: &[Align]) -> String {
    let mut line = String::from("|");
    for (&width, &align) in widths.iter().zip(aligns) {
        let dashes = "-".repeat(width + 1);
        match align {
            Align::Left => {
                line.push(':');
                line.push_str(&dashes);
            }
            Align::Right => {
                line.push_str(&dashes);
                line.push(':');
            }
        }
        line.push('|');
    }
    line
}

/// Terminal column width; CJK ideographs and fullwidth forms count double.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD
    )
}
