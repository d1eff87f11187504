//! Pass-through proxy
//!
//! Serves the library API under `/api/v1`.
//!
//! ```text
//! cargo run --example proxy                 # forward to backend.base_url
//! cargo run --example proxy -- --in-memory  # serve a seeded local catalog
//! ```
//!
//! An optional first argument that is not a flag is read as the config file
//! (default `demos/library.yaml`).

use library_web::core::model::User;
use library_web::prelude::*;
use library_web::{config::AppConfig, logging};

fn seed(backend: &InMemoryBackend) -> anyhow::Result<()> {
    let books = [
        ("b-1", "The Hobbit", "J.R.R. Tolkien", "978-0261102217", "1937-09-21", "Fantasy", 3),
        ("b-2", "Dune", "Frank Herbert", "978-0441172719", "1965-08-01", "Science Fiction", 0),
        ("b-3", "Neuromancer", "William Gibson", "978-0441569595", "1984-07-01", "Science Fiction", 2),
        ("b-4", "Émile", "Jean-Jacques Rousseau", "978-0465019311", "1762-05-01", "Philosophy", 1),
    ];
    backend.seed_books(books.into_iter().map(
        |(id, title, author, isbn, date, category, copies)| Book {
            book_id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            published_date: Some(date.to_string()),
            category: Some(category.to_string()),
            copies_available: copies,
            description: None,
        },
    ))?;
    backend.seed_users([User {
        user_id: "u-1".to_string(),
        username: "reader".to_string(),
        email: "reader@example.org".to_string(),
        full_name: "Demo Reader".to_string(),
        ..User::default()
    }])?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let in_memory = args.iter().any(|a| a == "--in-memory");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("demos/library.yaml");

    let config = AppConfig::from_yaml_file(path)?.with_env_overrides();
    logging::init(&config.logging)?;

    let bind = config.server.bind.clone();
    let builder = ServerBuilder::new().with_config(config.clone());

    let builder = if in_memory {
        let backend = InMemoryBackend::from_config(&config);
        seed(&backend)?;
        tracing::info!("serving the seeded in-memory catalog");
        builder.with_backend(backend)
    } else {
        tracing::info!(backend = %config.backend_url(), "forwarding to backend");
        builder.with_backend(HttpBackend::from_config(&config)?)
    };

    builder.serve(&bind).await
}
