//! Shared utility functions for TWD crates.

/// Number formatting for reports
pub mod format {
    /// Format with thousands separators and a fixed number of decimals.
    /// e.g., 1234567.891 with 2 decimals -> "1,234,567.89"
    pub fn with_separators(value: f64, decimals: usize) -> String {
        let rendered = format!("{:.*}", decimals, value);
        let (sign, unsigned) = match rendered.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", rendered.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };
        // "-0" and "-0.00" are just zero
        let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if is_zero { "" } else { sign };
        match frac_part {
            Some(f) => format!("{sign}{grouped}.{f}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Whole units with thousands separators.
    pub fn thousands(value: f64) -> String {
        with_separators(value, 0)
    }

    /// Whole currency units prefixed by a symbol, e.g. "Rp 1,800,000".
    pub fn currency(value: f64, symbol: &str) -> String {
        if symbol.is_empty() {
            thousands(value)
        } else {
            format!("{} {}", symbol, thousands(value))
        }
    }

    /// A percentage with one decimal, or "N/A" when there is none.
    pub fn share(percent: Option<f64>) -> String {
        match percent {
            Some(p) => format!("{:.1}%", p),
            None => "N/A".to_string(),
        }
    }

    /// Horizontal bar scaled so that `max` fills `width` cells.
    pub fn bar(value: f64, max: f64, width: usize) -> String {
        if max <= 0.0 || value <= 0.0 {
            return String::new();
        }
        let cells = ((value / max) * width as f64).round() as usize;
        "#".repeat(cells.clamp(1, width))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_thousands() {
            assert_eq!(thousands(0.0), "0");
            assert_eq!(thousands(-0.0), "0");
            assert_eq!(thousands(999.0), "999");
            assert_eq!(thousands(1000.0), "1,000");
            assert_eq!(thousands(1234567.4), "1,234,567");
            assert_eq!(thousands(54_000_000.0), "54,000,000");
            assert_eq!(thousands(-12345.0), "-12,345");
        }

        #[test]
        fn test_with_separators() {
            assert_eq!(with_separators(1234567.891, 2), "1,234,567.89");
            assert_eq!(with_separators(120.0, 2), "120.00");
            assert_eq!(with_separators(-0.001, 2), "0.00");
        }

        #[test]
        fn test_currency() {
            assert_eq!(currency(1_800_000.0, "Rp"), "Rp 1,800,000");
            assert_eq!(currency(7500.0, ""), "7,500");
        }

        #[test]
        fn test_share() {
            assert_eq!(share(Some(12.345)), "12.3%");
            assert_eq!(share(Some(100.0)), "100.0%");
            assert_eq!(share(None), "N/A");
        }

        #[test]
        fn test_bar() {
            assert_eq!(bar(50.0, 100.0, 10), "#####");
            assert_eq!(bar(100.0, 100.0, 10), "##########");
            // tiny but non-zero values still get one cell
            assert_eq!(bar(0.1, 100.0, 10), "#");
            assert_eq!(bar(0.0, 100.0, 10), "");
            assert_eq!(bar(5.0, 0.0, 10), "");
        }
    }
}
