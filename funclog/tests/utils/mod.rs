#![allow(dead_code)]
use funclog::backend::InMemoryBackend;
use funclog::prelude::*;
use std::sync::Arc;

#[derive(LogFields)]
pub struct Book {
    pub title: String,
    pub authors: Vec<Vec<String>>,
    pub published_year: i32,
}

impl Book {
    pub fn new(title: &str, authors: &[&[&str]], published_year: i32) -> Self {
        Self {
            title: title.to_owned(),
            authors: authors
                .iter()
                .map(|name| name.iter().map(|part| (*part).to_owned()).collect())
                .collect(),
            published_year,
        }
    }

    /// Expensive rendering that logging must never trigger.
    pub fn formatted_authors(&self) -> String {
        self.authors
            .iter()
            .map(|name| name.join(" "))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Loggable for Book {
    fn log_format(&self) -> Option<Builder> {
        Some(
            Builder::new()
                .with("title", &self.title)
                .with("year", self.published_year),
        )
    }
}

pub fn sample_books() -> (Book, Book, Book) {
    let alice: &[&str] = &["Alice", "Alicers"];
    let bob: &[&str] = &["Bob", "Bobberts"];
    (
        Book::new("one", &[alice, bob], 1999),
        Book::new("two", &[alice], 2000),
        Book::new("three", &[bob], 2001),
    )
}

pub fn make_logger(max_level: LevelFilter) -> (Arc<InMemoryBackend>, Logger) {
    let backend = Arc::new(InMemoryBackend::new(max_level));
    let logger = Logger::new("funclog::tests", backend.clone());
    (backend, logger)
}

pub fn assert_book(field: &StructuredArgument, title: &str, year: i64) {
    assert_eq!(field.len(), 2);
    assert_eq!(field.get("title"), Some(&Value::from(title)));
    assert_eq!(field.get("year"), Some(&Value::I64(year)));
    assert!(!field.to_string().contains("author"));
}
