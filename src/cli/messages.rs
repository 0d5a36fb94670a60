//! User-facing messages.

use crate::domain::Book;

pub const WELCOME: &str = "Welcome to the library catalog!";
pub const MENU: &str = "\nAvailable commands:\n\
1. Show all books\n\
2. Add a book\n\
3. Remove a book\n\
4. Search books\n\
5. Change book status\n\
6. Exit";
pub const EXITING: &str = "Exiting...";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
pub const INVALID_INPUT: &str = "Invalid input";
pub const INVALID_YEAR: &str = "Year must be a number of at most 4 digits.";
pub const ID_NOT_NUMBER: &str = "ID must be a number.";
pub const CHOOSE_STATUS: &str = "Choose a new status:";
pub const NO_BOOKS_FOUND: &str = "No books found.";
pub const CORRUPTED: &str = "Failed to load data, the file is corrupted.";

pub fn added(book: &Book) -> String {
    format!("Book '{}' added to the library.", book.title())
}

pub fn removed(id: u64) -> String {
    format!("Book with ID '{}' removed.", id)
}

pub fn not_found(id: u64) -> String {
    format!("Book with ID '{}' not found.", id)
}

pub fn status_changed(book: &Book) -> String {
    format!(
        "Status of book '{}' with ID '{}' changed to '{}'.",
        book.title(),
        book.id(),
        book.status()
    )
}
