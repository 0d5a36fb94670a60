//! Line-oriented input helpers shared by the shell and subcommands.

use std::io::{self, BufRead, Write};

use crate::domain::BookStatus;

use super::messages;

/// Longest accepted year, in digits
pub const MAX_YEAR_DIGITS: usize = 4;

/// Print `message` and read one trimmed line.
///
/// Returns `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

/// Parse a book id made only of ASCII digits
pub fn parse_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Parse a year of one to four ASCII digits
pub fn parse_year(raw: &str) -> Result<i32, String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_YEAR_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(messages::INVALID_YEAR.to_string());
    }
    raw.parse().map_err(|_| messages::INVALID_YEAR.to_string())
}

/// Map a numbered menu key ("1", "2") to a status
pub fn status_for_key(raw: &str) -> Option<BookStatus> {
    let index: usize = raw.parse().ok()?;
    BookStatus::ALL.get(index.checked_sub(1)?).copied()
}

/// Offer the numbered status choices until a valid key is entered.
///
/// Returns `None` at end of input.
pub fn prompt_status<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<BookStatus>> {
    loop {
        writeln!(output, "{}", messages::CHOOSE_STATUS)?;
        for (i, status) in BookStatus::ALL.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, status)?;
        }

        let Some(raw) = prompt(input, output, "> ")? else {
            return Ok(None);
        };

        match status_for_key(&raw) {
            Some(status) => return Ok(Some(status)),
            None => writeln!(output, "{}", messages::INVALID_INPUT)?,
        }
    }
}
