//! Defines the [`Entry`] type, one book or other piece of media shown as a
//! card in the section grid. Entries are produced by [`crate::parser`] and
//! are read-only from then on.

use chrono::NaiveDate;
use std::cmp::Ordering;
use url::Url;

/// A single displayable reference: a book, talk, album, etc.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// A slug derived from the source file name. Used for element ids in the
    /// rendered output.
    pub id: String,

    /// The entry's title.
    pub title: String,

    /// The author, if any.
    pub author: Option<String>,

    /// A link to the entry elsewhere on the web, if any. The card only shows
    /// its external-link affordance when this is present.
    pub external: Option<Url>,

    /// Tags in source order.
    pub tags: Vec<String>,

    /// Favorites sort ahead of everything else.
    pub fav: bool,

    /// The date the entry was added. Entries without a date sort last within
    /// their `fav` group.
    pub date: Option<NaiveDate>,

    /// The rendered HTML of the entry's markdown body. This is injected into
    /// the page verbatim.
    pub body: String,
}

impl Entry {
    /// Orders entries for display: favorites first, then most recent first.
    /// Ties keep their existing relative order when used with a stable sort.
    pub fn display_order(a: &Entry, b: &Entry) -> Ordering {
        b.fav.cmp(&a.fav).then_with(|| b.date.cmp(&a.date))
    }
}

#[cfg(test)]
pub(crate) fn fixture(title: &str) -> Entry {
    Entry {
        id: slug::slugify(title),
        title: title.to_owned(),
        author: None,
        external: None,
        tags: Vec::new(),
        fav: false,
        date: None,
        body: String::new(),
    }
}
