mod common;

use common::{day, readings};
use price_ledger::{
    ledger::{
        Ledger,
        merge::{MergeOutcome, merge_reading},
    },
    models::record::{HOURS_PER_DAY, ReadingSet, Record, leading_date},
};
use proptest::prelude::*;

fn line(date: &str, first: f64) -> String {
    Record::new(leading_date(date).unwrap(), readings(first)).to_string()
}

#[test]
fn append_reading_to_data_middle() {
    let mut body = vec![line("2022-01-01", 12.3), line("2022-01-03", 14.5)];
    let outcome = merge_reading(&mut body, "2022-01-02", &readings(13.4)).unwrap();

    assert_eq!(outcome, MergeOutcome::Inserted { index: 1 });
    assert_eq!(
        body,
        vec![
            line("2022-01-01", 12.3),
            line("2022-01-02", 13.4),
            line("2022-01-03", 14.5)
        ]
    );
}

#[test]
fn append_reading_to_data_existing() {
    let mut body = vec![line("2022-01-01", 12.3), line("2022-01-02", 14.5)];
    let outcome = merge_reading(&mut body, "2022-01-02", &readings(13.4)).unwrap();

    assert_eq!(outcome, MergeOutcome::Overwritten { index: 1 });
    assert_eq!(body, vec![line("2022-01-01", 12.3), line("2022-01-02", 13.4)]);
}

#[test]
fn append_reading_to_data_end() {
    let mut body = vec![line("2022-01-01", 12.3), line("2022-01-02", 14.5)];
    let outcome = merge_reading(&mut body, "2022-01-03", &readings(13.4)).unwrap();

    assert_eq!(outcome, MergeOutcome::Inserted { index: 2 });
    assert_eq!(body.last().unwrap(), &line("2022-01-03", 13.4));
    assert_eq!(body.len(), 3);
}

#[test]
fn append_reading_to_data_start() {
    let mut body = vec![line("2022-01-02", 12.3), line("2022-01-03", 14.5)];
    let outcome = merge_reading(&mut body, "2022-01-01", &readings(13.4)).unwrap();

    assert_eq!(outcome, MergeOutcome::Inserted { index: 0 });
    assert_eq!(
        body,
        vec![
            line("2022-01-01", 13.4),
            line("2022-01-02", 12.3),
            line("2022-01-03", 14.5)
        ]
    );
}

#[test]
fn untouched_rows_keep_their_original_text() {
    // Rows written by other tools may use a different number rendering.
    let legacy = format!("2021-12-31, {}", vec!["0.10000"; HOURS_PER_DAY].join(", "));
    let mut body = vec![legacy.clone()];
    merge_reading(&mut body, "2022-01-01", &readings(1.0)).unwrap();
    assert_eq!(body[0], legacy);
}

#[test]
fn overwrite_replaces_all_hours() {
    let mut ledger = Ledger::new();
    ledger.merge("2022-06-01", &ReadingSet::new(vec![1.0; 24]).unwrap()).unwrap();
    ledger.merge("2022-06-01", &ReadingSet::new(vec![2.0; 24]).unwrap()).unwrap();

    let record = ledger.get("2022-06-01").unwrap().unwrap();
    assert!(record.readings.values().iter().all(|v| *v == 2.0));
    assert_eq!(ledger.len(), 1);
}

fn dates_strictly_ascending(body: &[String]) -> bool {
    body.windows(2)
        .all(|w| leading_date(&w[0]).unwrap() < leading_date(&w[1]).unwrap())
}

proptest! {
    #[test]
    fn merges_keep_order_without_duplicates(
        offsets in proptest::collection::vec(0i64..400, 0..60),
        prices in proptest::collection::vec(0.0f64..1.0, 60),
    ) {
        let start = day(2021, 1, 1);
        let mut ledger = Ledger::new();

        for (i, offset) in offsets.iter().enumerate() {
            let date = start + chrono::Duration::days(*offset);
            ledger
                .merge(&date.format("%Y-%m-%d").to_string(), &readings(prices[i]))
                .unwrap();
            prop_assert!(dates_strictly_ascending(ledger.body()));
        }

        let mut distinct = offsets.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(ledger.len(), distinct.len());
        prop_assert!(ledger.validate_order().is_ok());
    }

    #[test]
    fn merging_twice_equals_merging_once(
        existing in proptest::collection::btree_set(0i64..200, 0..30),
        target in 0i64..200,
        price in 0.0f64..1.0,
    ) {
        let start = day(2022, 1, 1);
        let mut ledger = Ledger::new();
        for offset in &existing {
            ledger.merge_record(&Record::new(start + chrono::Duration::days(*offset), readings(0.5))).unwrap();
        }

        let date = (start + chrono::Duration::days(target)).format("%Y-%m-%d").to_string();
        let mut once = ledger.clone();
        once.merge(&date, &readings(price)).unwrap();
        let mut twice = once.clone();
        let second = twice.merge(&date, &readings(price)).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert!(matches!(second, MergeOutcome::Overwritten { .. }), "second merge must overwrite");
    }
}
