//! Interactive numbered-menu shell.
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so the
//! same loop serves stdin/stdout and scripted input.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::library::Catalog;

use super::input::{parse_id, parse_year, prompt, prompt_status};
use super::messages;

/// What the menu loop does after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive session over a catalog
pub struct Shell<R, W> {
    catalog: Catalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(catalog: Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Hand back the catalog after the session
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run until the exit command or end of input.
    ///
    /// Catalog failures are printed and the menu is shown again.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", messages::WELCOME)?;

        loop {
            writeln!(self.output, "{}", messages::MENU)?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            match self.dispatch(&choice).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => writeln!(self.output, "Error: {:#}", e)?,
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.list(),
            "2" => self.add().await,
            "3" => self.remove().await,
            "4" => self.search(),
            "5" => self.change_status().await,
            "6" => {
                writeln!(self.output, "{}", messages::EXITING)?;
                Ok(Flow::Exit)
            }
            _ => {
                writeln!(self.output, "{}", messages::INVALID_CHOICE)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        Ok(prompt(&mut self.input, &mut self.output, message)?)
    }

    fn list(&mut self) -> Result<Flow> {
        writeln!(self.output, "{}", self.catalog.display())?;
        Ok(Flow::Continue)
    }

    async fn add(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter the book title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter the book author: ")? else {
            return Ok(Flow::Exit);
        };

        let year = loop {
            let Some(raw) = self.prompt("Enter the publication year: ")? else {
                return Ok(Flow::Exit);
            };
            match parse_year(&raw) {
                Ok(year) => break year,
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        };

        let book = self.catalog.add(title, author, year).await?;
        writeln!(self.output, "{}", messages::added(book))?;
        Ok(Flow::Continue)
    }

    async fn remove(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter the ID of the book to remove: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(id) = parse_id(&raw) else {
            writeln!(self.output, "{}", messages::ID_NOT_NUMBER)?;
            return Ok(Flow::Continue);
        };

        let message = match self.catalog.remove(id).await? {
            Some(_) => messages::removed(id),
            None => messages::not_found(id),
        };
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(keyword) = self.prompt("Enter a search keyword: ")? else {
            return Ok(Flow::Exit);
        };

        let results = self.catalog.search(&keyword);
        if results.is_empty() {
            writeln!(self.output, "{}", messages::NO_BOOKS_FOUND)?;
        } else {
            writeln!(self.output, "{}", self.catalog.display_books(Some(results.as_slice())))?;
        }
        Ok(Flow::Continue)
    }

    async fn change_status(&mut self) -> Result<Flow> {
        let id = loop {
            let Some(raw) = self.prompt("Enter the book ID: ")? else {
                return Ok(Flow::Exit);
            };
            match parse_id(&raw) {
                Some(id) => break id,
                None => writeln!(self.output, "{}", messages::ID_NOT_NUMBER)?,
            }
        };

        if self.catalog.find_by_id(id).is_none() {
            writeln!(self.output, "{}", messages::not_found(id))?;
            return Ok(Flow::Continue);
        }

        let Some(status) = prompt_status(&mut self.input, &mut self.output)? else {
            return Ok(Flow::Exit);
        };

        if let Some(book) = self.catalog.update_status(id, status).await? {
            writeln!(self.output, "{}", messages::status_changed(book))?;
        }
        Ok(Flow::Continue)
    }
}
