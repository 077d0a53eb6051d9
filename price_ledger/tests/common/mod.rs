#![allow(dead_code)]

use chrono::NaiveDate;
use price_ledger::models::record::{HOURS_PER_DAY, ReadingSet};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 24 readings whose hour-0 price is `first`; the rest are fixed filler.
pub fn readings(first: f64) -> ReadingSet {
    let mut values = vec![first];
    values.resize(HOURS_PER_DAY, 0.12365);
    ReadingSet::new(values).unwrap()
}

/// A page shaped like the upstream one: title marker, then one row per price.
pub fn price_page(prices: &[f64]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><body>\n<div class=\"template-tlh__colors\">\n\
         <p class=\"template-tlh__colors--hours-title\">Precio de la luz por horas</p>\n",
    );
    for (hour, price) in prices.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"row\">\n  <div class=\"col\">\n    <span>\u{a0}</span>\n    \
             <span>{hour:02}:00 - {:02}:00</span>\n  </div>\n  \
             <div class=\"col\"><span>{price} €/kWh</span></div>\n</div>\n",
            (hour + 1) % 24
        ));
    }
    html.push_str("</div>\n</body></html>");
    html
}

/// Prices for hours 00..23 taken from a real page.
pub const SAMPLE_PRICES: [f64; 24] = [
    0.12292, 0.12365, 0.12054, 0.12062, 0.11965, 0.12019, 0.12507, 0.14266, 0.17136, 0.16331,
    0.18959, 0.1809, 0.17387, 0.17374, 0.13624, 0.13989, 0.15446, 0.16969, 0.22807, 0.26614,
    0.29447, 0.24068, 0.17277, 0.16741,
];
