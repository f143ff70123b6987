use std::fmt;

/// Numeric display format for a reported value.
///
/// [`Format::General`] follows the C `%g` conversion: the shorter of fixed and
/// exponent notation for the given number of significant digits, with
/// trailing zeros removed.
///
/// ```
/// use thermostate::report::Format;
///
/// assert_eq!(Format::general(5).render(300.0), "  300");
/// assert_eq!(Format::general(6).render(-0.0246172), "-0.0246172");
/// assert_eq!(Format::Fixed { precision: 2 }.render(29.0), "29.00");
/// assert_eq!(Format::Scientific { precision: 3 }.render(1.5e-5), "1.500e-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `%g`-style output right-aligned to `width`.
    ///
    /// When `space` is set, non-negative values get a leading space so that
    /// columns of mixed sign line up.
    General {
        width: usize,
        precision: usize,
        space: bool,
    },

    /// Fixed-point with `precision` decimals.
    Fixed { precision: usize },

    /// Exponent notation with `precision` mantissa decimals and a signed,
    /// at least two-digit exponent.
    Scientific { precision: usize },
}

impl Format {
    /// Returns the `% {width}g` format used for state variables.
    #[must_use]
    pub const fn general(width: usize) -> Self {
        Self::General {
            width,
            precision: 6,
            space: true,
        }
    }

    /// Renders `value` with this format.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        match *self {
            Self::General {
                width,
                precision,
                space,
            } => {
                let mut text = general(value, precision);
                if space && !text.starts_with('-') {
                    text.insert(0, ' ');
                }
                format!("{text:>width$}")
            }
            Self::Fixed { precision } => format!("{value:.precision$}"),
            Self::Scientific { precision } => {
                let text = format!("{value:.precision$e}");
                match text.split_once('e') {
                    Some((mantissa, exponent)) => join_exponent(mantissa, exponent),
                    None => text,
                }
            }
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::General {
            width: 0,
            precision: 6,
            space: false,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General {
                width,
                precision,
                space,
            } => {
                let flag = if *space { " " } else { "" };
                write!(f, "%{flag}{width}.{precision}g")
            }
            Self::Fixed { precision } => write!(f, "%.{precision}f"),
            Self::Scientific { precision } => write!(f, "%.{precision}e"),
        }
    }
}

/// Formats `value` with `%g` semantics and no padding.
pub(crate) fn general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let digits = precision.max(1);
    let decimals = digits - 1;

    // Rounding to the requested significant digits can bump the exponent,
    // so the notation is chosen from the already-rounded form.
    let rounded = format!("{value:.decimals$e}");
    let Some((mantissa, exponent)) = rounded.split_once('e') else {
        return rounded;
    };
    let Ok(exp) = exponent.parse::<i32>() else {
        return rounded;
    };

    let max_exp = i32::try_from(digits).unwrap_or(i32::MAX);
    if exp < -4 || exp >= max_exp {
        join_exponent(trim_fraction(mantissa), exponent)
    } else {
        let fixed_decimals = usize::try_from(max_exp - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{value:.fixed_decimals$}")).to_owned()
    }
}

/// Drops trailing zeros (and a dangling point) from a decimal string.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn join_exponent(mantissa: &str, exponent: &str) -> String {
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent.trim_start_matches('+')),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_matches_percent_g() {
        assert_eq!(general(300.0, 6), "300");
        assert_eq!(general(101_325.0, 6), "101325");
        assert_eq!(general(0.000_123_4, 6), "0.0001234");
        assert_eq!(general(0.000_012_34, 6), "1.234e-05");
        assert_eq!(general(1_234_567.0, 6), "1.23457e+06");
        assert_eq!(general(999_999.5, 6), "1e+06");
        assert_eq!(general(8.314_462_618, 6), "8.31446");
        assert_eq!(general(-2.5, 6), "-2.5");
        assert_eq!(general(0.0, 6), "0");
    }

    #[test]
    fn general_pads_and_flags() {
        assert_eq!(Format::general(5).render(300.0), "  300");
        assert_eq!(Format::general(5).render(-300.0), " -300");
        assert_eq!(Format::general(6).render(101_325.0), " 101325");
        assert_eq!(Format::default().render(0.5), "0.5");
    }

    #[test]
    fn scientific_uses_two_digit_exponent() {
        let f = Format::Scientific { precision: 3 };
        assert_eq!(f.render(1.5e-5), "1.500e-05");
        assert_eq!(f.render(-2.0e12), "-2.000e+12");
        assert_eq!(f.render(4.2e123), "4.200e+123");
    }

    #[test]
    fn display_shows_printf_directive() {
        assert_eq!(Format::general(5).to_string(), "% 5.6g");
        assert_eq!(Format::Fixed { precision: 2 }.to_string(), "%.2f");
    }
}
