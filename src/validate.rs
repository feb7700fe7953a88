// ABOUTME: Validation engine for catalog rows
// ABOUTME: Ordered list of pure rules, all evaluated, violations collected

use crate::model::{parse_numeric, CsvRow};

/// A single validation failure: the field it concerns and a human-readable
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: &'static str,
    pub message: &'static str,
}

impl Violation {
    fn new(path: &'static str, message: &'static str) -> Self {
        Self { path, message }
    }
}

type Rule = fn(&CsvRow) -> Option<Violation>;

/// The rule set in its fixed evaluation order.
///
/// Field-level rules first, the cross-field price comparison last. Dependent
/// rules (numeric form, sign, price comparison) ignore blank or non-numeric
/// input so each defect is reported exactly once, by the rule that owns it.
const RULES: [Rule; 8] = [
    sku_not_blank,
    description_not_blank,
    normal_price_not_blank,
    normal_price_is_numeric,
    normal_price_not_negative,
    special_price_is_numeric,
    special_price_not_negative,
    special_price_below_normal,
];

/// Run every rule against the row and collect the violations in rule order.
/// An empty result means the row is valid.
pub fn validate(row: &CsvRow) -> Vec<Violation> {
    RULES.iter().filter_map(|rule| rule(row)).collect()
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn sku_not_blank(row: &CsvRow) -> Option<Violation> {
    if is_blank(&row.sku()) {
        return Some(Violation::new("sku", "the SKU is empty"));
    }
    None
}

fn description_not_blank(row: &CsvRow) -> Option<Violation> {
    if is_blank(&row.description()) {
        return Some(Violation::new("description", "the description is empty"));
    }
    None
}

fn normal_price_not_blank(row: &CsvRow) -> Option<Violation> {
    if is_blank(row.normal_price_text()) {
        return Some(Violation::new("normalPrice", "the normal price is empty"));
    }
    None
}

fn normal_price_is_numeric(row: &CsvRow) -> Option<Violation> {
    let text = row.normal_price_text();
    if is_blank(text) {
        return None;
    }
    if parse_numeric(text).is_none() {
        return Some(Violation::new(
            "normalPrice",
            "the normal price is not a number",
        ));
    }
    None
}

fn normal_price_not_negative(row: &CsvRow) -> Option<Violation> {
    match parse_numeric(row.normal_price_text()) {
        Some(value) if value < 0.0 => {
            Some(Violation::new("normalPrice", "the normal price is negative"))
        }
        _ => None,
    }
}

fn special_price_is_numeric(row: &CsvRow) -> Option<Violation> {
    let text = row.special_price_text()?;
    if is_blank(text) {
        return None;
    }
    if parse_numeric(text).is_none() {
        return Some(Violation::new(
            "specialPrice",
            "the special price is not a number",
        ));
    }
    None
}

fn special_price_not_negative(row: &CsvRow) -> Option<Violation> {
    match row.special_price_text().and_then(parse_numeric) {
        Some(value) if value < 0.0 => Some(Violation::new(
            "specialPrice",
            "the special price is negative",
        )),
        _ => None,
    }
}

/// Compare the two prices only when both are present and numeric. Blank,
/// absent or non-numeric prices are the concern of the rules above; this
/// rule stays silent for them.
fn special_price_below_normal(row: &CsvRow) -> Option<Violation> {
    let special = row.special_price_text().and_then(parse_numeric)?;
    let normal = parse_numeric(row.normal_price_text())?;
    if special >= normal {
        return Some(Violation::new(
            "specialPrice",
            "the special price is greater than or equal to normal price",
        ));
    }
    None
}
