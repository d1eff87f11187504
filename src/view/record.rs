//! The read-only record surface the view engine works against

/// An item of the source collection, as seen by the engine
///
/// Only the fields the engine filters and sorts on are exposed. Implementors
/// are never mutated by the engine.
pub trait Record {
    /// Unique, stable identifier
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn author(&self) -> &str;

    /// Categorical field; `None` when absent or empty
    fn category(&self) -> Option<&str>;

    /// ISO-8601 date string, if present
    fn published_date(&self) -> Option<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn author(&self) -> &str {
        (**self).author()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }

    fn published_date(&self) -> Option<&str> {
        (**self).published_date()
    }
}
