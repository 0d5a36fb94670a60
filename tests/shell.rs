//! Interactive Shell Integration Tests
//!
//! Drives the menu loop with scripted input and checks the output and the
//! data file.

use std::path::Path;

use shelf::cli::{messages, Shell};
use shelf::{BookStatus, Catalog};
use tempfile::TempDir;

async fn run_script(path: &Path, script: &str) -> (String, Catalog) {
    let (catalog, _) = Catalog::open(path).await.unwrap();
    let mut output = Vec::new();

    let mut shell = Shell::new(catalog, script.as_bytes(), &mut output);
    shell.run().await.unwrap();
    let catalog = shell.into_catalog();

    (String::from_utf8(output).unwrap(), catalog)
}

#[tokio::test]
async fn test_add_list_and_exit() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, catalog) = run_script(&path, "2\nDune\nFrank Herbert\n1965\n1\n6\n").await;

    assert!(out.contains(messages::WELCOME));
    assert!(out.contains("Book 'Dune' added to the library."));
    assert!(out.contains("Frank Herbert"));
    assert!(out.contains(messages::EXITING));
    assert_eq!(catalog.len(), 1);
    assert!(path.exists());
}

#[tokio::test]
async fn test_add_reprompts_invalid_year() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, catalog) = run_script(&path, "2\nDune\nHerbert\n19650\nabc\n1965\n6\n").await;

    assert_eq!(out.matches(messages::INVALID_YEAR).count(), 2);
    assert_eq!(catalog.books()[0].year(), 1965);
}

#[tokio::test]
async fn test_list_empty_library() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, _) = run_script(&path, "1\n6\n").await;

    assert!(out.contains("The library is empty..."));
    assert!(!out.contains("TITLE"));
}

#[tokio::test]
async fn test_remove_flows() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let script = "2\nA\nX\n2001\n3\nabc\n3\n7\n3\n1\n6\n";
    let (out, catalog) = run_script(&path, script).await;

    assert!(out.contains(messages::ID_NOT_NUMBER));
    assert!(out.contains("Book with ID '7' not found."));
    assert!(out.contains("Book with ID '1' removed."));
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_search_results_and_none() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let script = "2\nThe Hobbit\nTolkien\n1937\n4\nhobbit\n4\nzzz\n6\n";
    let (out, _) = run_script(&path, script).await;

    assert!(out.contains("The Hobbit"));
    assert!(out.contains(messages::NO_BOOKS_FOUND));
}

#[tokio::test]
async fn test_change_status_with_retries() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let script = "2\nDune\nHerbert\n1965\n5\nx\n1\n3\n2\n6\n";
    let (out, catalog) = run_script(&path, script).await;

    assert!(out.contains(messages::ID_NOT_NUMBER));
    assert!(out.contains(messages::INVALID_INPUT));
    assert!(out.contains("Status of book 'Dune' with ID '1' changed to 'loaned'."));
    assert_eq!(catalog.books()[0].status(), BookStatus::Loaned);

    let (reloaded, _) = Catalog::open(&path).await.unwrap();
    assert_eq!(reloaded.books()[0].status(), BookStatus::Loaned);
}

#[tokio::test]
async fn test_change_status_missing_book() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, _) = run_script(&path, "5\n4\n6\n").await;

    assert!(out.contains("Book with ID '4' not found."));
    assert!(!out.contains(messages::CHOOSE_STATUS));
}

#[tokio::test]
async fn test_invalid_choice_and_end_of_input() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, _) = run_script(&path, "9\n").await;

    assert!(out.contains(messages::INVALID_CHOICE));
    assert!(!out.contains(messages::EXITING));
}

#[tokio::test]
async fn test_empty_title_reports_error_and_continues() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let (out, catalog) = run_script(&path, "2\n\nHerbert\n1965\n1\n6\n").await;

    assert!(out.contains("Error: Invalid title: must not be empty"));
    assert!(out.contains("The library is empty..."));
    assert!(catalog.is_empty());
}
