//! Fixed-width table rendering for book listings.

use crate::domain::Book;

pub const ID_WIDTH: usize = 10;
pub const TITLE_WIDTH: usize = 50;
pub const AUTHOR_WIDTH: usize = 30;
pub const YEAR_WIDTH: usize = 10;
pub const STATUS_WIDTH: usize = 10;

/// Shown instead of a table when there is nothing to list
pub const EMPTY_LIBRARY: &str = "The library is empty...";

/// Render books as a left-justified columnar table.
///
/// Returns [`EMPTY_LIBRARY`] when `books` yields nothing, so a header is
/// never printed on its own.
pub fn render<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut books = books.into_iter().peekable();
    if books.peek().is_none() {
        return EMPTY_LIBRARY.to_string();
    }

    let mut lines = vec![
        row("ID", "TITLE", "AUTHOR", "YEAR", "STATUS"),
        "=".repeat(ID_WIDTH + TITLE_WIDTH + AUTHOR_WIDTH + YEAR_WIDTH + STATUS_WIDTH),
    ];

    for book in books {
        lines.push(row(
            &book.id().to_string(),
            book.title(),
            book.author(),
            &book.year().to_string(),
            book.status().as_str(),
        ));
    }

    lines.join("\n")
}

fn row(id: &str, title: &str, author: &str, year: &str, status: &str) -> String {
    format!(
        "{:<id_w$}{:<title_w$}{:<author_w$}{:<year_w$}{:<status_w$}",
        id,
        title,
        author,
        year,
        status,
        id_w = ID_WIDTH,
        title_w = TITLE_WIDTH,
        author_w = AUTHOR_WIDTH,
        year_w = YEAR_WIDTH,
        status_w = STATUS_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(std::iter::empty::<&Book>()), EMPTY_LIBRARY);
    }

    #[test]
    fn test_render_layout() {
        let books = vec![Book::new(1, "Dune".to_string(), "Herbert".to_string(), 1965)];
        let table = render(&books);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID        TITLE"));
        assert_eq!(lines[1], "=".repeat(110));
        assert_eq!(lines[2].chars().count(), 110);
        assert_eq!(&lines[2][..10], "1         ");
        assert_eq!(&lines[2][10..14], "Dune");
        assert_eq!(&lines[2][60..67], "Herbert");
        assert_eq!(&lines[2][90..94], "1965");
        assert_eq!(lines[2][100..].trim_end(), "available");
    }

    #[test]
    fn test_render_pads_by_characters() {
        let books = vec![Book::new(2, "Война и мир".to_string(), "Толстой".to_string(), 1869)];
        let table = render(&books);
        let row = table.lines().nth(2).unwrap();

        assert_eq!(row.chars().count(), 110);
    }

    #[test]
    fn test_render_keeps_order() {
        let books = vec![
            Book::new(3, "B".to_string(), "x".to_string(), 2001),
            Book::new(1, "A".to_string(), "y".to_string(), 2002),
        ];
        let table = render(&books);
        let ids: Vec<&str> = table
            .lines()
            .skip(2)
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();

        assert_eq!(ids, ["3", "1"]);
    }
}
