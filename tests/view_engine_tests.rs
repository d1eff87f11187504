//! Properties and scenarios of the collection view engine
//!
//! These tests verify that:
//! - Filtering is the conjunction of keyword and category predicates
//! - Sorting is stable and treats missing dates as the epoch
//! - Pages cover the filtered sequence exactly once
//! - Filter and sort changes reset the page, stale pages are empty

use library_web::prelude::*;
use library_web::view::{matches_category, matches_keyword, paginate};

// =============================================================================
// Helpers
// =============================================================================

fn book(id: usize, title: &str, author: &str, category: &str, date: &str) -> Book {
    Book {
        book_id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        isbn: format!("isbn-{}", id),
        published_date: (!date.is_empty()).then(|| date.to_string()),
        category: (!category.is_empty()).then(|| category.to_string()),
        copies_available: 1,
        description: None,
    }
}

fn size(n: usize) -> PageSize {
    PageSize::try_from(n).unwrap()
}

/// A mixed catalog with repeated titles, authors and dates
fn catalog() -> Vec<Book> {
    let titles = ["Dune", "dune2", "Émile", "Zazie", "apple", "Apple", "Ulysses"];
    let authors = ["Herbert", "Rousseau", "Queneau", "Joyce"];
    let categories = ["Fiction", "Science", "", "Fiction", "History"];
    let dates = ["1965-08-01", "", "1762-05-01", "2001-01-01T10:00:00", "1965-08-01"];

    (0..40)
        .map(|i| {
            book(
                i,
                titles[i % titles.len()],
                authors[i % authors.len()],
                categories[i % categories.len()],
                dates[i % dates.len()],
            )
        })
        .collect()
}

fn controller_with(books: Vec<Book>, page_size: usize) -> ViewController<Book> {
    let mut controller = ViewController::new(size(page_size));
    controller.replace_source_collection(books);
    controller
}

fn ids(books: &[Book]) -> Vec<String> {
    books.iter().map(|b| b.book_id.clone()).collect()
}

// =============================================================================
// Properties
// =============================================================================

mod property_tests {
    use super::*;

    #[test]
    fn test_recompute_is_idempotent() {
        let mut controller = controller_with(catalog(), 7);
        controller.set_keyword("e");
        controller.set_sort(SortField::Author, SortDirection::Desc);
        let first = controller.view().clone();

        controller.set_page_index(0);
        assert_eq!(controller.view(), &first);
    }

    #[test]
    fn test_filter_is_keyword_and_category_conjunction() {
        let source = catalog();
        for keyword in ["", "dune", "HERBERT", "zz"] {
            for category in ["ALL", "Fiction", "Science", "Nope"] {
                let mut controller = controller_with(source.clone(), 100);
                controller.set_keyword(keyword);
                controller.set_category(category);

                let filter = CategoryFilter::from(category);
                let expected: Vec<&str> = source
                    .iter()
                    .filter(|b| matches_keyword(*b, keyword) && matches_category(*b, &filter))
                    .map(|b| b.book_id.as_str())
                    .collect();
                let mut actual: Vec<&str> = controller
                    .ordered()
                    .into_iter()
                    .map(|b| b.book_id.as_str())
                    .collect();
                let mut expected = expected;
                actual.sort_unstable();
                expected.sort_unstable();
                assert_eq!(actual, expected, "keyword={:?} category={:?}", keyword, category);
            }
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let controller = {
            let mut c = controller_with(catalog(), 100);
            c.set_sort(SortField::Author, SortDirection::Asc);
            c
        };
        let ordered = controller.ordered();

        for pair in ordered.windows(2) {
            if pair[0].author == pair[1].author {
                let a: usize = pair[0].book_id.parse().unwrap();
                let b: usize = pair[1].book_id.parse().unwrap();
                assert!(a < b, "equal authors out of source order: {} before {}", a, b);
            }
        }
    }

    #[test]
    fn test_descending_keeps_ties_in_source_order() {
        let mut controller = controller_with(catalog(), 100);
        controller.set_sort(SortField::PublishedDate, SortDirection::Desc);
        let ordered = controller.ordered();

        for pair in ordered.windows(2) {
            if pair[0].published_date == pair[1].published_date {
                let a: usize = pair[0].book_id.parse().unwrap();
                let b: usize = pair[1].book_id.parse().unwrap();
                assert!(a < b);
            }
        }
    }

    #[test]
    fn test_pages_cover_the_ordered_sequence_exactly() {
        for page_size in [1, 3, 7, 10, 40, 41] {
            let mut controller = controller_with(catalog(), page_size);
            controller.set_keyword("e");
            controller.set_sort(SortField::Title, SortDirection::Asc);

            let expected: Vec<String> =
                controller.ordered().iter().map(|b| b.book_id.clone()).collect();
            let total_pages = controller.view().total_pages;

            let mut concatenated = Vec::new();
            for page in 0..total_pages {
                controller.set_page_index(page);
                concatenated.extend(ids(&controller.view().items));
            }
            assert_eq!(concatenated, expected, "page size {}", page_size);
        }
    }

    #[test]
    fn test_filter_and_sort_changes_reset_the_page() {
        let mut controller = controller_with(catalog(), 5);

        controller.set_page_index(3);
        controller.set_keyword("a");
        assert_eq!(controller.view().page_index, 0);

        controller.set_page_index(3);
        controller.set_category("Fiction");
        assert_eq!(controller.view().page_index, 0);

        controller.set_page_index(1);
        controller.set_sort(SortField::PublishedDate, SortDirection::Desc);
        assert_eq!(controller.view().page_index, 0);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let mut controller = controller_with(catalog(), 10);
        controller.set_page_index(99);
        assert!(controller.view().items.is_empty());
        assert!(!controller.view().has_next);
        assert_eq!(controller.view().total_pages, 4);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_twenty_five_books_in_pages_of_ten() {
        let books: Vec<Book> = (0..25)
            .map(|i| book(i, &format!("Title {:02}", i), "A", "", ""))
            .collect();
        let mut controller = controller_with(books, 10);

        assert_eq!(controller.view().items.len(), 10);
        assert_eq!(controller.view().total_pages, 3);
        assert!(controller.view().has_next);

        controller.set_page_index(2);
        assert_eq!(controller.view().items.len(), 5);
        assert!(!controller.view().has_next);
    }

    #[test]
    fn test_lowercase_keyword_matches_case_insensitively() {
        let mut controller = controller_with(
            vec![
                book(1, "Dune", "Herbert", "", ""),
                book(2, "dune2", "Anonymous", "", ""),
                book(3, "Foundation", "Asimov", "", ""),
            ],
            10,
        );
        controller.set_keyword("dune");
        assert_eq!(ids(&controller.view().items), vec!["1", "2"]);
    }

    #[test]
    fn test_category_filters_regardless_of_keyword() {
        let mut controller = controller_with(
            vec![
                book(1, "Dune", "Herbert", "Fiction", ""),
                book(2, "Dune Atlas", "Herbert", "Reference", ""),
                book(3, "Emma", "Austen", "Fiction", ""),
            ],
            10,
        );
        controller.set_category("Fiction");
        assert_eq!(ids(&controller.view().items), vec!["1", "3"]);

        controller.set_keyword("dune");
        assert_eq!(ids(&controller.view().items), vec!["1"]);
    }

    #[test]
    fn test_missing_published_date_sorts_first_ascending() {
        let mut controller = controller_with(
            vec![
                book(1, "B", "x", "", "1990-01-01"),
                book(2, "A", "x", "", ""),
                book(3, "C", "x", "", "2005-06-01"),
            ],
            10,
        );
        controller.set_sort(SortField::PublishedDate, SortDirection::Asc);
        assert_eq!(ids(&controller.view().items), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_shrinking_source_under_a_deep_page() {
        let many: Vec<Book> = (0..60).map(|i| book(i, "T", "A", "", "")).collect();
        let mut controller = controller_with(many, 10);
        controller.set_page_index(4);
        assert_eq!(controller.view().items.len(), 10);

        controller.replace_source_collection((0..8).map(|i| book(i, "T", "A", "", "")).collect());
        assert_eq!(controller.criteria().page_index, 0);
        assert_eq!(controller.view().items.len(), 8);

        controller.set_page_index(4);
        assert!(controller.view().items.is_empty());
        assert!(!controller.view().has_next);
    }

    #[test]
    fn test_accented_titles_sort_next_to_their_base_letter() {
        let mut controller = controller_with(
            vec![
                book(1, "Zazie", "x", "", ""),
                book(2, "Émile", "x", "", ""),
                book(3, "apple", "x", "", ""),
                book(4, "Eve", "x", "", ""),
            ],
            10,
        );
        controller.set_sort(SortField::Title, SortDirection::Asc);
        let titles: Vec<&str> = controller
            .view()
            .items
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["apple", "Émile", "Eve", "Zazie"]);
    }

    #[test]
    fn test_paginate_standalone_on_plain_values() {
        let values: Vec<u8> = (0..7).collect();
        let view = paginate(&values, 1, size(3));
        assert_eq!(view.items, vec![3, 4, 5]);
        assert!(view.has_next);
    }

    #[test]
    fn test_lowercase_all_is_a_real_category() {
        let mut controller = controller_with(
            vec![
                book(1, "Omnibus", "Various", "all", "2001-01-01"),
                book(2, "Dune", "Herbert", "Fiction", "1965-08-01"),
            ],
            10,
        );

        controller.set_category("all");
        assert_eq!(controller.view().total_matching, 1);
        assert_eq!(ids(&controller.view().items), vec!["1"]);

        controller.set_category("ALL");
        assert_eq!(controller.view().total_matching, 2);
    }
}
