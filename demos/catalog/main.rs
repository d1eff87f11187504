//! Catalog walkthrough
//!
//! Drives the hosting pages against a seeded in-memory backend:
//! - browsing the catalog with keyword, category, sort and paging
//! - borrowing, extending and returning a book
//! - reserving a book with no copies left
//! - admin mutations and the dashboard

use chrono::Local;
use library_web::core::model::User;
use library_web::prelude::*;

fn book(id: &str, title: &str, author: &str, date: &str, category: &str, copies: i32) -> Book {
    Book {
        book_id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        isbn: format!("978-{:010}", id.trim_start_matches("b-").parse::<u64>().unwrap_or(0)),
        published_date: Some(date.to_string()),
        category: Some(category.to_string()),
        copies_available: copies,
        description: None,
    }
}

fn print_page(title: &str, view: &DerivedView<Book>) {
    println!(
        "\n{} (page {} of {}, {} matching)",
        title,
        view.page_index + 1,
        view.total_pages.max(1),
        view.total_matching
    );
    for b in &view.items {
        println!(
            "   - {:<28} {:<24} {}",
            b.title,
            b.author,
            b.published_date.as_deref().unwrap_or("-")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("library-web catalog walkthrough");
    println!("===============================");

    let backend = InMemoryBackend::new();
    backend.seed_books([
        book("b-1", "The Hobbit", "J.R.R. Tolkien", "1937-09-21", "Fantasy", 3),
        book("b-2", "Dune", "Frank Herbert", "1965-08-01", "Science Fiction", 0),
        book("b-3", "Neuromancer", "William Gibson", "1984-07-01", "Science Fiction", 2),
        book("b-4", "Émile", "Jean-Jacques Rousseau", "1762-05-01", "Philosophy", 1),
        book("b-5", "Earthsea", "Ursula K. Le Guin", "1968-01-01", "Fantasy", 1),
        book("b-6", "Zazie dans le métro", "Raymond Queneau", "1959-01-01", "Fiction", 2),
    ])?;
    backend.seed_users([User {
        user_id: "u-1".to_string(),
        username: "reader".to_string(),
        email: "reader@example.org".to_string(),
        full_name: "Demo Reader".to_string(),
        ..User::default()
    }])?;

    let backend: Arc<dyn Backend> = Arc::new(backend);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let page_size = PageSize::try_from(4)?;

    // Catalog
    let mut catalog = CatalogPage::new(backend.clone(), notifier.clone(), page_size);
    catalog.load().await;
    print_page("All books by title", catalog.view());

    catalog.next_page();
    print_page("Second page", catalog.view());

    catalog.set_category("Science Fiction");
    catalog.set_sort(SortField::PublishedDate, SortDirection::Desc);
    print_page("Science fiction, newest first", catalog.view());

    catalog.set_category(CategoryFilter::All);
    catalog.set_keyword("EMILE");
    print_page("Keyword 'EMILE'", catalog.view());

    println!("\nCategories: {:?}", catalog.categories().count_by_category);

    // Loans
    let today = Local::now().date_naive();
    let mut loans = LoanDesk::new(backend.clone(), notifier.clone(), Default::default());
    let loan = loans.borrow("u-1", "b-1", today).await?;
    println!("\nBorrowed '{}' until {}", loan.book_title, loan.due_date);

    let extended = loans.extend(&loan.loan_id, None).await?;
    println!("Extended until {}", extended.due_date);

    loans.lookup("u-1").await?;
    println!("Active loans: {}", loans.active().len());
    loans.return_book(&loan.loan_id, today).await?;
    println!("Returned loans: {}", loans.returned().len());

    // Reservations
    let mut reservations = ReservationDesk::new(backend.clone(), notifier.clone(), page_size);
    reservations.load(Some("u-1")).await;
    println!(
        "\nReservable books: {}",
        reservations.available().view().total_matching
    );
    let reservation = reservations
        .reserve("u-1", "b-2", Local::now().naive_local())
        .await?;
    println!("Reserved '{}'", reservation.book_title);
    reservations.cancel(&reservation.reservation_id).await?;
    let open = reservations
        .reservations()
        .iter()
        .filter(|r| r.status.is_open())
        .count();
    println!("Open reservations after cancel: {}", open);

    // Admin
    let mut admin = AdminBooksPage::new(backend, notifier, page_size);
    admin.load().await;
    let created = admin
        .create_book(BookCreateRequest {
            title: "Solaris".to_string(),
            author: "Stanisław Lem".to_string(),
            isbn: "978-0156027601".to_string(),
            published_date: "1961-01-01".to_string(),
            category: "Science Fiction".to_string(),
            copies_available: 2,
            description: None,
        })
        .await?;
    println!("\nCreated '{}' ({})", created.title, created.book_id);
    admin.delete_book(&created.book_id).await?;

    let dashboard = admin.dashboard().await;
    if let Some(stats) = dashboard.stats {
        println!(
            "Dashboard: {} books, {} loans, {} reservations",
            stats.total_books, stats.total_loans, stats.total_reservations
        );
    }

    Ok(())
}
