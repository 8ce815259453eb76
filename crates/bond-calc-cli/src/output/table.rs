use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Valuation fields rendered as currency in the summary table.
const MONEY_FIELDS: &[&str] = &[
    "bond_price",
    "periodic_coupon",
    "total_coupon",
    "total_cash_flow",
];

/// Format output as tables: a summary of the valuation, then the cash-flow
/// schedule with one row per coupon period and a totals row.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        // Summary: every scalar field, money fields in currency format
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            if key == "cash_flows" {
                continue;
            }
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);

        if let Some(Value::Array(rows)) = res_map.get("cash_flows") {
            if !rows.is_empty() {
                println!("\nCash-flow schedule:");
                print_schedule(rows);
            }
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// One row per coupon period plus a totals row, currency in 2-decimal format.
fn print_schedule(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record([
        "Period",
        "Year",
        "Coupon",
        "Principal",
        "Total",
        "Present value",
    ]);

    let mut coupon_total = Decimal::ZERO;
    let mut principal_total = Decimal::ZERO;
    let mut cash_total = Decimal::ZERO;
    let mut pv_total = Decimal::ZERO;

    for row in rows {
        let Value::Object(map) = row else { continue };

        let coupon = decimal_field(map, "coupon_payment");
        let principal = decimal_field(map, "principal_payment");
        let total = decimal_field(map, "total_cash_flow");
        let pv = decimal_field(map, "present_value");

        coupon_total += coupon;
        principal_total += principal;
        cash_total += total;
        pv_total += pv;

        builder.push_record([
            plain_field(map, "period"),
            plain_field(map, "year_label"),
            format_currency(coupon),
            format_currency(principal),
            format_currency(total),
            format_currency(pv),
        ]);
    }

    builder.push_record([
        "Total".to_string(),
        String::new(),
        format_currency(coupon_total),
        format_currency(principal_total),
        format_currency(cash_total),
        format_currency(pv_total),
    ]);

    let table = Table::from(builder);
    println!("{}", table);
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn format_field(key: &str, value: &Value) -> String {
    if MONEY_FIELDS.contains(&key) {
        if let Some(d) = parse_decimal(value) {
            return format_currency(d);
        }
    }
    format_value(value)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Currency display: 2 decimal places, negatives in parentheses.
pub(crate) fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("({:.2})", rounded.abs())
    } else {
        // abs() also strips a negative zero left over from rounding
        format!("{:.2}", rounded.abs())
    }
}

fn decimal_field(map: &serde_json::Map<String, Value>, key: &str) -> Decimal {
    map.get(key).and_then(parse_decimal).unwrap_or_default()
}

fn plain_field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    map.get(key).map(format_value).unwrap_or_default()
}

/// Decimal values serialize as JSON strings to preserve precision; plain
/// numbers also appear for integer fields.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_has_two_decimals() {
        assert_eq!(format_currency(dec!(3)), "3.00");
        assert_eq!(format_currency(dec!(91.4697)), "91.47");
        assert_eq!(format_currency(dec!(0.005)), "0.01");
    }

    #[test]
    fn test_negative_currency_parenthesized() {
        assert_eq!(format_currency(dec!(-3)), "(3.00)");
        assert_eq!(format_currency(dec!(-91.465)), "(91.47)");
    }

    #[test]
    fn test_parse_decimal_from_string_and_number() {
        assert_eq!(
            parse_decimal(&Value::String("12.5".into())),
            Some(dec!(12.5))
        );
        assert_eq!(parse_decimal(&serde_json::json!(10)), Some(dec!(10)));
        assert_eq!(parse_decimal(&Value::Bool(true)), None);
    }
}
