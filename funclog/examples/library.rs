use funclog::backend::InMemoryBackend;
use funclog::prelude::*;
use funclog::registry::LoggerFactoryBuilder;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(LogFields)]
struct Book {
    title: String,
    authors: Vec<String>,
    published_year: u16,
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

fn main() -> anyhow::Result<()> {
    let backend = Arc::new(InMemoryBackend::default());
    LoggerFactoryBuilder::default()
        .add_backend(LevelFilter::Info, backend.clone())
        .build()?;

    let logger = get_logger("library");
    let dune = Book {
        title: String::from("Dune"),
        authors: vec![String::from("Frank Herbert")],
        published_year: 1965,
    };

    logger.info().loggable("Checked out {}", &dune);
    logger
        .debug()
        .with("Catalog {}", "authors", || dune.authors.join("; "));
    let mut shelves = BTreeMap::new();
    shelves.insert("fiction", 412);
    shelves.insert("poetry", 37);
    logger.warn().map("Shelves nearly full: {} {}", &shelves);
    logger.error().pairs(
        "Overdue",
        vec![
            kvp("days", 3),
            kfp1("fine", |days: u32| f64::from(days) * 0.25, 3),
            kvp("ignored", &dune),
        ],
    );

    for record in backend.records() {
        println!("{} {}", record.level, record.formatted_message());
        println!("  {}", serde_json::to_string(&record.args)?);
    }
    Ok(())
}
