//! Terminal output utilities.

use crate::models::SubscriptionRecord;
use colored::Colorize;
use std::io::{self, Write};

/// Format a value as a quoted, left-aligned field of at least `width` chars.
///
/// # Examples
/// ```
/// use azure_subscriptions::output::format_field;
/// assert_eq!(format_field("test", 8), "\"test\"  ");
/// ```
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:<width$}")
}

/// Write one row per subscription, name column sized to the longest name.
pub fn write_subscription_table<W: Write>(
    out: &mut W,
    subscriptions: &[SubscriptionRecord],
) -> io::Result<()> {
    let name_width = subscriptions
        .iter()
        .map(|s| s.subscription_name.len() + 2)
        .max()
        .unwrap_or(0)
        .max("\"subscription_name\"".len());

    writeln!(
        out,
        "{} {} {}",
        format_field("cnt", 6),
        format_field("subscription_name", name_width),
        format_field("subscription_id", 38)
    )?;
    for (i, s) in subscriptions.iter().enumerate() {
        writeln!(
            out,
            "{} {} {}",
            format_field(i + 1, 6),
            format_field(&s.subscription_name, name_width),
            format_field(&s.subscription_id, 38).blue()
        )?;
    }
    writeln!(
        out,
        "#{}# {} subscription(s)",
        "NOTE".on_blue(),
        subscriptions.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "\"test\"    ");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "\"42\"  ");
    }

    #[test]
    fn test_write_subscription_table() {
        colored::control::set_override(false);
        let subscriptions = vec![
            SubscriptionRecord::new("sub-aaa", "Alpha"),
            SubscriptionRecord::new("sub-bbb", ""),
        ];
        let mut out = Vec::new();
        write_subscription_table(&mut out, &subscriptions).expect("write table");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("\"1\""));
        assert!(lines[1].contains("\"Alpha\""));
        assert!(lines[1].contains("\"sub-aaa\""));
        assert!(lines[2].contains("\"\""));
        assert_eq!(lines[3], "#NOTE# 2 subscription(s)");
    }
}
