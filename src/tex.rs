//! LaTeX formatting for numbers, heat capacities and tables.

use thiserror::Error;
use tracing::debug;

use crate::{report::format::general, thermals::HeatCapacity};

/// Formats `x` to `sig` significant digits with thousands separators.
///
/// When `use_tex` is set, exponent notation becomes `m\times 10^{e}`.
///
/// ```
/// use thermostate::tex::format_sig;
///
/// assert_eq!(format_sig(12_345.678, 7, false), "12,345.68");
/// assert_eq!(format_sig(1_234_567.0, 5, true), r"1.2346\times 10^{6}");
/// ```
#[must_use]
pub fn format_sig(x: f64, sig: usize, use_tex: bool) -> String {
    let text = group_thousands(&general(x, sig));
    match text.split_once('e') {
        Some((mantissa, exponent)) if use_tex => match exponent.parse::<i32>() {
            Ok(exponent) => format!("{mantissa}\\times 10^{{{exponent}}}"),
            Err(_) => text,
        },
        _ => text,
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (digits, tail) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(tail);
    grouped
}

/// Formats a heat capacity as `$C_p^{decoration}$ = a ± b $T$ ± c $T^2$ ± d $T^3$`.
#[must_use]
pub fn cp_as_tex(cp: &HeatCapacity, decoration: &str, sig: usize) -> String {
    let [a, b, c, d] = cp.coefficients();
    let sign = |x: f64| if x < 0.0 { '-' } else { '+' };
    let term = |x: f64| format_sig(x.abs(), sig, true);
    format!(
        "$C_p^{decoration}$ = {a:.3} {} {} $T$ {} {} $T^2$ {} {} $T^3$",
        sign(b),
        term(b),
        sign(c),
        term(c),
        sign(d),
        term(d),
    )
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A headed table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new<C: Into<Cell>>(header: impl Into<String>, cells: impl IntoIterator<Item = C>) -> Self {
        Self {
            header: header.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    fn is_numeric(&self) -> bool {
        self.cells.iter().all(|c| matches!(c, Cell::Number(_)))
    }
}

/// Options for [`table_as_tex`].
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Renders numeric cells.
    pub float_format: fn(f64) -> String,

    /// Per column, whether rows holding zero in that column are dropped.
    pub drop_zeros: Vec<bool>,

    /// Cells of a row added after a rule below the body; empty for none.
    pub total_row: Vec<String>,

    /// Whether to prefix each row with its original row number.
    pub index: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            float_format: math_fixed,
            drop_zeros: Vec::new(),
            total_row: Vec::new(),
            index: false,
        }
    }
}

/// Default cell format: four decimals in inline math mode.
#[must_use]
pub fn math_fixed(x: f64) -> String {
    format!("\\({x:.4}\\)")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column {header} has {found} cells, expected {expected}")]
    Ragged {
        header: String,
        expected: usize,
        found: usize,
    },
}

/// Renders columns as a booktabs `tabular`.
///
/// # Errors
///
/// Returns [`TableError::Ragged`] if the columns differ in length.
pub fn table_as_tex(columns: &[Column], options: &TableOptions) -> Result<String, TableError> {
    let rows = columns.first().map_or(0, |c| c.cells.len());
    if let Some(column) = columns.iter().find(|c| c.cells.len() != rows) {
        return Err(TableError::Ragged {
            header: column.header.clone(),
            expected: rows,
            found: column.cells.len(),
        });
    }

    let kept: Vec<usize> = (0..rows)
        .filter(|&row| {
            columns
                .iter()
                .zip(&options.drop_zeros)
                .all(|(column, drop)| !(*drop && column.cells[row] == Cell::Number(0.0)))
        })
        .collect();

    let mut alignment = String::new();
    let mut header = Vec::with_capacity(columns.len() + 1);
    if options.index {
        alignment.push('l');
        header.push(String::new());
    }
    for column in columns {
        alignment.push(if column.is_numeric() { 'r' } else { 'l' });
        header.push(column.header.clone());
    }

    let mut lines = vec![
        format!("\\begin{{tabular}}{{{alignment}}}"),
        "\\toprule".to_owned(),
        format!("{} \\\\", header.join(" & ")),
        "\\midrule".to_owned(),
    ];
    for &row in &kept {
        let mut cells = Vec::with_capacity(header.len());
        if options.index {
            cells.push(row.to_string());
        }
        for column in columns {
            cells.push(match &column.cells[row] {
                Cell::Number(x) => (options.float_format)(*x),
                Cell::Text(text) => text.clone(),
            });
        }
        lines.push(format!("{} \\\\", cells.join(" & ")));
    }
    if !options.total_row.is_empty() {
        if let Some(last) = lines.last_mut() {
            last.push_str("\\hline");
        }
        lines.push(format!("{}\\\\", options.total_row.join("&")));
    }
    lines.push("\\bottomrule".to_owned());
    lines.push("\\end{tabular}".to_owned());

    let mut table = lines.join("\n");
    table.push('\n');
    debug!(rows = kept.len(), columns = columns.len(), "generated table");
    Ok(table)
}
