use crate::config::Settings;

/// Render an evaluation result for display.
///
/// Below `settings.plain_limit`, integral values have no fractional part and
/// other values are rounded to `settings.precision` decimal places with the
/// trailing zeros removed. Larger magnitudes use scientific notation.
pub fn format_value(value: f64, settings: &Settings) -> String {
    if value.abs() >= settings.plain_limit {
        return format!("{:e}", value);
    }
    if value.fract() == 0.0 {
        // adding zero folds -0 into 0
        return format!("{:.0}", value + 0.0);
    }
    let rounded = format!("{:.*}", settings.precision, value);
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_value;
    use crate::config::Settings;
    use test_case::test_case;

    #[test_case(13.0 => "13")]
    #[test_case(-4.0 => "-4")]
    #[test_case(-0.0 => "0" ; "negative zero")]
    #[test_case(2.5 => "2.5")]
    #[test_case(1.0 / 3.0 => "0.3333333333" ; "rounded to ten places")]
    #[test_case(0.1 + 0.2 => "0.3" ; "float noise is rounded away")]
    #[test_case(-1e-12 => "0" ; "tiny negative rounds to zero")]
    #[test_case(123_456_789_012_345.0 => "123456789012345" ; "just below the limit")]
    #[test_case(1e20 => "1e20" ; "scientific above the limit")]
    #[test_case(-2.5e16 => "-2.5e16")]
    fn default_settings(value: f64) -> String {
        format_value(value, &Settings::default())
    }

    #[test]
    fn custom_precision() {
        let settings = Settings {
            precision: 2,
            plain_limit: 1e3,
            ..Settings::default()
        };
        assert_eq!(format_value(3.14159, &settings), "3.14");
        assert_eq!(format_value(1999.0, &settings), "1.999e3");
    }

    #[test]
    fn integers_past_i64() {
        let settings = Settings {
            plain_limit: 1e30,
            ..Settings::default()
        };
        assert_eq!(format_value(1e20, &settings), "100000000000000000000");
        assert_eq!(format_value(-1e19, &settings), "-10000000000000000000");
    }

    #[test]
    fn zero_precision() {
        let settings = Settings {
            precision: 0,
            ..Settings::default()
        };
        assert_eq!(format_value(2.5, &settings), "2");
        assert_eq!(format_value(2.7, &settings), "3");
    }
}
