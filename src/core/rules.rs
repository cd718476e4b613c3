//! Row-level accounting rules: mask reconstruction, group detection, amount
//! parsing, the per-group value rule and the creditor filter.

use crate::domain::model::{Group, LedgerEntry, LedgerRow, ReadStats, ValidationRules};
use regex::Regex;
use std::sync::LazyLock;

/// A CPF (11 digits) or CNPJ (14 digits) somewhere in the description.
static TAX_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{11,14}").unwrap());

/// Parses a Brazilian formatted amount (`1.234,56`). Anything unreadable or
/// non-finite (`NaN`, `inf`) counts as zero.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }

    let normalized = raw.replace('.', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Formats a value as `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, fraction)
}

/// Drops the group segment and keeps at most `levels` segments after it.
pub fn normalize_mask(full_mask: &str, levels: usize) -> String {
    full_mask
        .split('.')
        .skip(1)
        .take(levels)
        .collect::<Vec<_>>()
        .join(".")
}

/// Whether the description identifies a creditor by CPF/CNPJ.
pub fn is_creditor(description: &str) -> bool {
    TAX_ID.is_match(description)
}

/// Value a row contributes to its group: the balance when the balance side
/// matches the group (D for 7, C for 8), zero otherwise.
pub fn group_value(group: Group, balance_type: Option<&str>, balance: f64) -> f64 {
    let Some(balance_type) = balance_type else {
        return 0.0;
    };

    let side = balance_type.trim().to_uppercase();
    if side.starts_with(group.counted_balance_side()) {
        balance
    } else {
        0.0
    }
}

/// Turns raw rows into creditor entries of groups 7 and 8.
///
/// Blank masks inherit the last mask seen above them, so detail lines under a
/// synthetic account header are attributed to that account. Rows outside
/// groups 7/8 or without a CPF/CNPJ in the description are dropped.
pub fn classify(rows: &[LedgerRow], rules: &ValidationRules) -> (Vec<LedgerEntry>, ReadStats) {
    let mut stats = ReadStats {
        rows_read: rows.len(),
        ..ReadStats::default()
    };
    let mut entries = Vec::new();
    let mut current_mask: Option<&str> = None;

    for row in rows {
        if let Some(mask) = row.mask.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            current_mask = Some(mask);
        }

        let Some(full_mask) = current_mask else {
            tracing::trace!(line = row.line, "Skipping row before the first mask");
            continue;
        };
        let Some(group) = Group::from_mask(full_mask) else {
            continue;
        };
        stats.rows_in_groups += 1;

        let Some(description) = row.description.as_deref().filter(|d| is_creditor(d)) else {
            continue;
        };
        stats.creditor_rows += 1;

        let balance = parse_amount(row.balance.as_deref());
        entries.push(LedgerEntry {
            group,
            mask: normalize_mask(full_mask, rules.mask_levels),
            creditor: description.to_string(),
            value: group_value(group, row.balance_type.as_deref(), balance),
        });
    }

    tracing::debug!(
        rows = stats.rows_read,
        in_groups = stats.rows_in_groups,
        creditors = stats.creditor_rows,
        "Classified ledger rows"
    );

    (entries, stats)
}
