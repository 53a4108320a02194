//! Sales reporting.
//!
//! Pure aggregation over the transaction log. Repositories fetch the
//! rows; everything in here is deterministic given the records and a
//! reference instant, which keeps it directly testable.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use minimart_core::Money;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TransactionRecord;

/// Days covered by the daily revenue buckets.
const DAILY_WINDOW: u64 = 7;

/// Number of top-selling items reported.
const TOP_ITEMS: usize = 5;

/// Revenue and order count for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub revenue: Money,
    pub orders: usize,
}

/// Sales volume for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    pub name: String,
    pub quantity: u64,
    pub revenue: Money,
}

/// The full sales report staff see on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    /// One bucket per day for the trailing week, oldest first. Days with
    /// no sales appear with zero revenue.
    pub daily: Vec<DailySales>,
    /// Up to five best-selling items by quantity over the trailing week.
    pub top_items: Vec<ItemSales>,
    /// Revenue over the current calendar year.
    pub yearly_revenue: Money,
    /// Mean order total over the current calendar year.
    pub average_order_value: Money,
    /// Mean revenue per day over the trailing week.
    pub average_daily_revenue: Money,
    /// Orders placed over the trailing week.
    pub weekly_orders: usize,
}

/// Build the sales report from transaction records.
///
/// `records` should cover at least the current calendar year; older
/// records are ignored rather than rejected.
#[must_use]
pub fn compute_report(records: &[TransactionRecord], now: DateTime<Utc>) -> SalesReport {
    use chrono::Datelike;

    let yearly: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| r.created_at.year() == now.year() && r.created_at <= now)
        .collect();

    #[allow(clippy::cast_possible_wrap)]
    let week_start = now - chrono::Duration::days(DAILY_WINDOW as i64 - 1);
    let weekly: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| r.created_at.date_naive() >= week_start.date_naive() && r.created_at <= now)
        .collect();

    let daily = daily_buckets(&weekly, now);
    let top_items = top_items(&weekly);

    let yearly_revenue = yearly
        .iter()
        .fold(Money::ZERO, |acc, r| acc.add(r.total));
    let average_order_value = mean(yearly_revenue, yearly.len());
    let week_revenue = daily.iter().fold(Money::ZERO, |acc, d| acc.add(d.revenue));
    #[allow(clippy::cast_possible_truncation)]
    let average_daily_revenue = mean(week_revenue, DAILY_WINDOW as usize);

    let weekly_orders = weekly.len();

    SalesReport {
        daily,
        top_items,
        yearly_revenue,
        average_order_value,
        average_daily_revenue,
        weekly_orders,
    }
}

/// Bucket revenue by UTC day for the trailing week, zero-filling quiet
/// days so the dashboard always charts a full week.
fn daily_buckets(records: &[&TransactionRecord], now: DateTime<Utc>) -> Vec<DailySales> {
    let today = now.date_naive();
    let mut buckets: Vec<DailySales> = (0..DAILY_WINDOW)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailySales {
            date,
            revenue: Money::ZERO,
            orders: 0,
        })
        .collect();

    for record in records {
        let date = record.created_at.date_naive();
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
            bucket.revenue = bucket.revenue.add(record.total);
            bucket.orders += 1;
        }
    }

    buckets
}

/// Decode a stored sale line for ranking. A name and quantity are
/// enough; auction settlement lines carry no product id, and a missing
/// price only zeroes that line's revenue share.
fn decode_sale_line(value: &serde_json::Value) -> Option<(String, u64, Money)> {
    let name = value.get("name")?.as_str()?.to_string();
    let quantity = value.get("quantity")?.as_u64()?;
    let unit_price = value
        .get("unit_price")
        .and_then(serde_json::Value::as_str)
        .and_then(|s| Money::parse(s).ok())
        .unwrap_or(Money::ZERO);
    Some((name, quantity, unit_price))
}

/// Rank items by quantity sold. Lines that cannot be decoded are
/// skipped, matching how carts tolerate malformed stored lines.
fn top_items(records: &[&TransactionRecord]) -> Vec<ItemSales> {
    let mut by_name: HashMap<String, ItemSales> = HashMap::new();

    for record in records {
        let Some(lines) = record.products.as_array() else {
            continue;
        };
        for (name, quantity, unit_price) in lines.iter().filter_map(decode_sale_line) {
            let line_total = Money::new(unit_price.amount() * Decimal::from(quantity))
                .unwrap_or(Money::ZERO);
            let entry = by_name.entry(name.clone()).or_insert_with(|| ItemSales {
                name,
                quantity: 0,
                revenue: Money::ZERO,
            });
            entry.quantity += quantity;
            entry.revenue = entry.revenue.add(line_total);
        }
    }

    let mut items: Vec<ItemSales> = by_name.into_values().collect();
    items.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
    items.truncate(TOP_ITEMS);
    items
}

/// Mean of a total over a count, rounded to cents. Zero when the count
/// is zero.
fn mean(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::ZERO;
    }
    let mean = (total.amount() / Decimal::from(count)).round_dp(2);
    Money::new(mean).unwrap_or(Money::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use minimart_core::TransactionId;
    use serde_json::json;

    use super::*;

    fn record(total: &str, created_at: DateTime<Utc>, products: serde_json::Value) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(1),
            transaction_uuid: uuid::Uuid::new_v4(),
            email: "dina@example.com".to_string(),
            products,
            total: Money::parse(total).unwrap(),
            created_at,
        }
    }

    fn line(name: &str, price: &str, qty: u32) -> serde_json::Value {
        json!({"product_id": 1, "name": name, "unit_price": price, "quantity": qty})
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_buckets_zero_fill_full_week() {
        let report = compute_report(&[], now());
        assert_eq!(report.daily.len(), 7);
        assert!(report.daily.iter().all(|d| d.revenue.is_zero()));
        assert_eq!(
            report.daily.first().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
        assert_eq!(
            report.daily.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_daily_buckets_group_same_day() {
        let day = Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap();
        let records = vec![
            record("4.00", day, json!([])),
            record("6.00", day + chrono::Duration::hours(3), json!([])),
        ];

        let report = compute_report(&records, now());
        let bucket = report
            .daily
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2025, 6, 14).unwrap())
            .unwrap();
        assert_eq!(bucket.revenue, Money::parse("10.00").unwrap());
        assert_eq!(bucket.orders, 2);
    }

    #[test]
    fn test_old_records_excluded_from_yearly_revenue() {
        let records = vec![
            record("5.00", now() - chrono::Duration::days(10), json!([])),
            record("7.00", now() - chrono::Duration::days(400), json!([])),
        ];

        let report = compute_report(&records, now());
        assert_eq!(report.yearly_revenue, Money::parse("5.00").unwrap());
    }

    #[test]
    fn test_top_items_ranked_by_quantity() {
        let day = now() - chrono::Duration::days(1);
        let records = vec![
            record(
                "10.00",
                day,
                json!([line("Apple", "2.50", 3), line("Milk", "1.80", 1)]),
            ),
            record("5.00", day, json!([line("Apple", "2.50", 2)])),
        ];

        let report = compute_report(&records, now());
        assert_eq!(report.top_items.first().unwrap().name, "Apple");
        assert_eq!(report.top_items.first().unwrap().quantity, 5);
        assert_eq!(
            report.top_items.first().unwrap().revenue,
            Money::parse("12.50").unwrap()
        );
        assert_eq!(report.top_items.len(), 2);
    }

    #[test]
    fn test_top_items_include_settled_auction_sales() {
        // Settlement lines carry no product_id; they still rank by name.
        let day = now() - chrono::Duration::days(1);
        let records = vec![
            record(
                "25.00",
                day,
                json!([{"name": "Vintage Clock", "unit_price": "25.00", "quantity": 1, "auction": true}]),
            ),
            record("2.50", day, json!([line("Apple", "2.50", 1)])),
        ];

        let report = compute_report(&records, now());
        let clock = report
            .top_items
            .iter()
            .find(|i| i.name == "Vintage Clock")
            .unwrap();
        assert_eq!(clock.quantity, 1);
        assert_eq!(clock.revenue, Money::parse("25.00").unwrap());
    }

    #[test]
    fn test_top_items_skip_nameless_lines() {
        let day = now() - chrono::Duration::days(1);
        let records = vec![record(
            "5.00",
            day,
            json!([{"unit_price": "5.00", "quantity": 1}, line("Apple", "2.50", 1)]),
        )];

        let report = compute_report(&records, now());
        assert_eq!(report.top_items.len(), 1);
        assert_eq!(report.top_items.first().unwrap().name, "Apple");
    }

    #[test]
    fn test_top_items_caps_at_five() {
        let day = now() - chrono::Duration::days(1);
        let lines: Vec<serde_json::Value> = (0..8)
            .map(|i| line(&format!("Item {i}"), "1.00", 1))
            .collect();
        let records = vec![record("8.00", day, serde_json::Value::Array(lines))];

        let report = compute_report(&records, now());
        assert_eq!(report.top_items.len(), 5);
    }

    #[test]
    fn test_top_items_scoped_to_trailing_week() {
        let records = vec![
            record(
                "2.50",
                now() - chrono::Duration::days(1),
                json!([line("Apple", "2.50", 1)]),
            ),
            record(
                "18.00",
                now() - chrono::Duration::days(30),
                json!([line("Milk", "1.80", 10)]),
            ),
        ];

        let report = compute_report(&records, now());
        assert_eq!(report.top_items.len(), 1);
        assert_eq!(report.top_items.first().unwrap().name, "Apple");
    }

    #[test]
    fn test_yearly_revenue_is_calendar_year() {
        let records = vec![
            record("5.00", Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(), json!([])),
            record("7.00", Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap(), json!([])),
        ];

        let report = compute_report(&records, now());
        assert_eq!(report.yearly_revenue, Money::parse("5.00").unwrap());
    }

    #[test]
    fn test_top_items_skips_malformed_lines() {
        let day = now() - chrono::Duration::days(1);
        let records = vec![record(
            "2.50",
            day,
            json!([line("Apple", "2.50", 1), {"name": "broken"}]),
        )];

        let report = compute_report(&records, now());
        assert_eq!(report.top_items.len(), 1);
    }

    #[test]
    fn test_averages() {
        let day = now() - chrono::Duration::days(1);
        let records = vec![
            record("4.00", day, json!([])),
            record("6.00", day, json!([])),
        ];

        let report = compute_report(&records, now());
        assert_eq!(report.average_order_value, Money::parse("5.00").unwrap());
        // 10.00 across a 7 day window
        assert_eq!(report.average_daily_revenue, Money::parse("1.43").unwrap());
        assert_eq!(report.weekly_orders, 2);
    }

    #[test]
    fn test_averages_empty_input() {
        let report = compute_report(&[], now());
        assert!(report.average_order_value.is_zero());
        assert!(report.average_daily_revenue.is_zero());
    }
}
