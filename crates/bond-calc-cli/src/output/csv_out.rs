use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// A valuation exports its cash-flow schedule as rows; anything without a
/// schedule falls back to two-column field/value records. Values go out
/// unformatted so spreadsheets receive full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("cash_flows") {
                write_schedule_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

const SCHEDULE_COLUMNS: &[&str] = &[
    "period",
    "year_label",
    "coupon_payment",
    "principal_payment",
    "total_cash_flow",
    "present_value",
];

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let _ = wtr.write_record(SCHEDULE_COLUMNS);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = SCHEDULE_COLUMNS
                .iter()
                .map(|col| {
                    map.get(*col)
                        .map(format_csv_value)
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
