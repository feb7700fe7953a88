// ABOUTME: Row model for one line of the product catalog file
// ABOUTME: Sanitizes text fields on read and defers price typing to validation

use crate::escape::escape_html;

/// One row of the catalog file, positionally mapped to
/// sku / description / normalPrice / specialPrice.
///
/// Text fields are HTML-escaped by their accessors so embedded markup never
/// reaches the store or the logs in raw form. Price fields stay as the
/// untyped text read from the file; numeric conversion is meaningful only
/// once validation has confirmed numeric form.
#[derive(Debug, Clone)]
pub struct CsvRow {
    sku: String,
    description: String,
    normal_price: String,
    special_price: Option<String>,
}

impl CsvRow {
    pub fn new(
        sku: String,
        description: String,
        normal_price: String,
        special_price: Option<String>,
    ) -> Self {
        Self {
            sku,
            description,
            normal_price,
            special_price,
        }
    }

    /// Build a row from the raw decoded fields of one line.
    ///
    /// Missing trailing fields default to empty (specialPrice to absent).
    /// Extra fields beyond the fourth are ignored.
    pub fn from_fields(fields: &[&str]) -> Self {
        Self {
            sku: fields.first().unwrap_or(&"").to_string(),
            description: fields.get(1).unwrap_or(&"").to_string(),
            normal_price: fields.get(2).unwrap_or(&"").to_string(),
            special_price: fields.get(3).map(|f| f.to_string()),
        }
    }

    /// The sku with markup escaped. This is the store key.
    pub fn sku(&self) -> String {
        escape_html(&self.sku)
    }

    /// The description with markup escaped.
    pub fn description(&self) -> String {
        escape_html(&self.description)
    }

    /// The normal price exactly as read from the file.
    pub fn normal_price_text(&self) -> &str {
        &self.normal_price
    }

    /// The special price exactly as read from the file, if the field was
    /// present at all.
    pub fn special_price_text(&self) -> Option<&str> {
        self.special_price.as_deref()
    }

    /// Numeric normal price. Falls back to 0.0 for non-numeric text, so
    /// callers must validate the row first.
    pub fn normal_price(&self) -> f64 {
        parse_numeric(&self.normal_price).unwrap_or(0.0)
    }

    /// Numeric special price, or `None` when the field was absent or blank.
    pub fn special_price(&self) -> Option<f64> {
        self.special_price
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(|text| parse_numeric(text).unwrap_or(0.0))
    }
}

/// Parse numeric text into a finite f64.
///
/// Leading and trailing whitespace is tolerated; infinities and NaN are
/// rejected. Plain float syntax only, no currency symbols or locales.
pub(crate) fn parse_numeric(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
