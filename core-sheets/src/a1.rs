//! A1-notation helpers for building Google Sheets range strings.
//!
//! All coordinates here are 1-based, matching how ranges are written in the
//! Sheets UI and API (`A1`, `B3:D4`). Column numbers map onto letters in
//! bijective base 26: 1 = `A`, 26 = `Z`, 27 = `AA`, 703 = `AAA`.

/// Convert a 1-based column number to its letter form.
///
/// # Examples
///
/// ```
/// use core_sheets::a1::column_letters;
///
/// assert_eq!(column_letters(1), "A");
/// assert_eq!(column_letters(27), "AA");
/// ```
pub fn column_letters(column: u32) -> String {
    let mut result = String::new();
    let mut n = column;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Format a single cell address, e.g. `(3, 2)` becomes `B3`.
pub fn cell_address(row: u32, column: u32) -> String {
    format!("{}{}", column_letters(column), row)
}

/// Format a rectangular range between two corners, e.g. `A2:C5`.
pub fn range_address(start_row: u32, start_column: u32, end_row: u32, end_column: u32) -> String {
    format!(
        "{}:{}",
        cell_address(start_row, start_column),
        cell_address(end_row, end_column)
    )
}

/// Quote a worksheet title for use in a range string.
///
/// Titles are always single-quoted so names containing spaces, digits or
/// punctuation stay unambiguous. Embedded single quotes are doubled, which is
/// the escaping rule the Sheets API expects (`It's Data` becomes
/// `'It''s Data'`).
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Build a full range reference scoped to a worksheet, e.g. `'Data'!A2:C5`.
pub fn worksheet_range(title: &str, range: &str) -> String {
    format!("{}!{}", quote_title(title), range)
}

/// Reference an entire worksheet by its quoted title, e.g. `'Data'`.
///
/// The Sheets API treats a bare sheet reference as "all cells in the sheet",
/// which is what full-grid reads use.
pub fn worksheet_all(title: &str) -> String {
    quote_title(title)
}
