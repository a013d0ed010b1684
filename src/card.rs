// src/card.rs
//
// Row record → card view-model. One fallback chain for every sheet layout;
// a missing or empty column always resolves to "" (or the stated default).

use crate::config::consts::{DEFAULT_TITLE, PRICE_DURATION_SEP};
use crate::config::options::ColumnMap;
use crate::sheet::RowRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Card {
    pub category: String,
    pub title: String,
    pub promo_type: String,
    pub speed: String,
    pub price_duration: String,
    pub bonus: String,
    pub code: String,
}

impl Card {
    pub fn from_row(row: &RowRecord, cols: &ColumnMap) -> Self {
        let promo_type = s!(row.lookup(&cols.promo_type));

        let title = first_non_empty!(
            s!(row.lookup(&cols.heading)),
            promo_type.clone();
            else DEFAULT_TITLE
        );

        Self {
            category: s!(row.lookup(&cols.category)),
            title,
            promo_type,
            speed: s!(row.lookup(&cols.speed)),
            price_duration: price_duration(row, cols),
            bonus: s!(row.lookup(&cols.bonus)),
            code: s!(row.lookup(&cols.code)),
        }
    }

    pub fn has_code(&self) -> bool { !self.code.trim().is_empty() }
}

/// Combined column if present; otherwise "price / duration" from the
/// separate columns, or "" when both of those are empty too.
fn price_duration(row: &RowRecord, cols: &ColumnMap) -> String {
    let combined = row.lookup(&cols.price_duration);
    if !combined.is_empty() {
        return s!(combined);
    }
    let price = row.lookup(&cols.price);
    let duration = row.lookup(&cols.duration);
    if price.is_empty() && duration.is_empty() {
        return s!();
    }
    join!(price, PRICE_DURATION_SEP, duration)
}

pub fn normalize_rows(rows: &[RowRecord], cols: &ColumnMap) -> Vec<Card> {
    rows.iter().map(|r| Card::from_row(r, cols)).collect()
}
