//! Conversions from section and entry data into template [`Value`]s. The
//! template engine does no escaping of its own, so every piece of text that
//! came from a source file is HTML-escaped here. The only exception is the
//! entry body, which is already rendered HTML.

use crate::config::{Photo, SectionConfig};
use crate::entry::Entry;
use crate::icon::Icon;
use crate::reveal::RevealConfig;
use crate::view::CardTiming;
use gtmpl_value::Value;
use pulldown_cmark::escape::{escape_href, escape_html};
use std::collections::HashMap;
use url::Url;

/// Glyph names for the card icon and the external-link icon.
const CARD_ICON: &str = "Book";
const EXTERNAL_ICON: &str = "External";

fn escaped(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_html(&mut out, s);
    out
}

pub(crate) fn html(s: &str) -> Value {
    Value::String(escaped(s))
}

pub(crate) fn href(url: &Url) -> Value {
    let mut out = String::new();
    let _ = escape_href(&mut out, url.as_str());
    Value::String(out)
}

/// Renders a reveal config as `data-reveal-*` attributes for the client-side
/// animation library.
pub(crate) fn reveal_attributes(config: Option<&RevealConfig>) -> Value {
    Value::String(match config {
        None => String::new(),
        Some(c) => format!(
            concat!(
                r#"data-reveal data-reveal-origin="{}" data-reveal-distance="{}" "#,
                r#"data-reveal-duration="{}" data-reveal-delay="{}" "#,
                r#"data-reveal-opacity="{}" data-reveal-scale="{}" "#,
                r#"data-reveal-easing="{}" data-reveal-mobile="{}" "#,
                r#"data-reveal-reset="{}" data-reveal-view-factor="{}""#,
            ),
            escaped(&c.origin),
            escaped(&c.distance),
            c.duration,
            c.delay,
            c.opacity,
            c.scale,
            escaped(&c.easing),
            c.mobile,
            c.reset,
            c.view_factor,
        ),
    })
}

/// A single card in the grid: the entry, its position and its reveal
/// config (if it has one pending).
pub(crate) struct Card<'a> {
    pub entry: &'a Entry,
    pub timing: CardTiming,
    pub reveal: Option<RevealConfig>,
}

impl From<&Card<'_>> for Value {
    /// Converts a [`Card`] into a [`Value::Object`]. Optional fields are
    /// paired with a `has_*` flag so templates never have to test a missing
    /// value.
    fn from(card: &Card) -> Value {
        let entry = card.entry;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), html(&entry.id));
        m.insert(
            "icon".to_owned(),
            Value::String(Icon::resolve(Some(CARD_ICON)).svg().to_owned()),
        );
        m.insert("title".to_owned(), html(&entry.title));
        m.insert("has_author".to_owned(), Value::Bool(entry.author.is_some()));
        m.insert(
            "author".to_owned(),
            html(entry.author.as_deref().unwrap_or_default()),
        );
        m.insert(
            "has_external".to_owned(),
            Value::Bool(entry.external.is_some()),
        );
        m.insert(
            "external".to_owned(),
            match &entry.external {
                Some(url) => href(url),
                None => Value::String(String::new()),
            },
        );
        m.insert(
            "external_icon".to_owned(),
            Value::String(Icon::resolve(Some(EXTERNAL_ICON)).svg().to_owned()),
        );
        m.insert("body".to_owned(), Value::String(entry.body.clone()));
        m.insert("has_tags".to_owned(), Value::Bool(!entry.tags.is_empty()));
        m.insert(
            "tags".to_owned(),
            Value::Array(entry.tags.iter().map(|t| html(t)).collect()),
        );
        m.insert(
            "timeout".to_owned(),
            Value::String(card.timing.timeout_ms.to_string()),
        );
        m.insert(
            "transition_delay".to_owned(),
            Value::String(format!("{}ms", card.timing.transition_delay_ms)),
        );
        m.insert("reveal".to_owned(), reveal_attributes(card.reveal.as_ref()));
        Value::Object(m)
    }
}

impl From<&Photo> for Value {
    /// Converts a [`Photo`] into a [`Value::Object`] with fields `src`, `alt`,
    /// `has_link` and `link`.
    fn from(photo: &Photo) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("src".to_owned(), href(&photo.src));
        m.insert("alt".to_owned(), html(&photo.alt));
        m.insert("has_link".to_owned(), Value::Bool(photo.link.is_some()));
        m.insert(
            "link".to_owned(),
            match &photo.link {
                Some(link) => href(link),
                None => Value::String(String::new()),
            },
        );
        Value::Object(m)
    }
}

impl SectionConfig {
    /// Inserts the static parts of the section into a template object.
    pub(crate) fn insert_values(&self, m: &mut HashMap<String, Value>) {
        m.insert("heading".to_owned(), html(&self.heading));
        m.insert("blurb".to_owned(), html(&self.blurb));
        m.insert("archive_url".to_owned(), href(&self.archive_url));
        m.insert("has_photo".to_owned(), Value::Bool(self.photo.is_some()));
        // an empty object keeps `.photo.*` lookups valid without a photo
        m.insert(
            "photo".to_owned(),
            match &self.photo {
                Some(photo) => Value::from(photo),
                None => Value::Object(HashMap::new()),
            },
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entry::fixture;

    fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
        match value {
            Value::Object(m) => &m[key],
            _ => panic!("not an object"),
        }
    }

    fn string(value: &Value) -> &str {
        match value {
            Value::String(s) => s,
            _ => panic!("not a string"),
        }
    }

    #[test]
    fn test_card_escapes_text_but_not_body() {
        let mut entry = fixture("Cats & <Dogs>");
        entry.body = String::from("<p>Raw</p>");
        let value = Value::from(&Card {
            entry: &entry,
            timing: CardTiming::for_index(0, 6),
            reveal: None,
        });
        assert_eq!("Cats &amp; &lt;Dogs&gt;", string(field(&value, "title")));
        assert_eq!("<p>Raw</p>", string(field(&value, "body")));
        assert_eq!("", string(field(&value, "reveal")));
    }

    #[test]
    fn test_card_optional_flags() {
        let mut entry = fixture("Dune");
        entry.tags = vec![String::from("sci-fi")];
        entry.external = Some(Url::parse("https://example.org/dune").unwrap());
        let value = Value::from(&Card {
            entry: &entry,
            timing: CardTiming::for_index(7, 6),
            reveal: Some(RevealConfig::default()),
        });
        assert!(matches!(field(&value, "has_tags"), Value::Bool(true)));
        assert!(matches!(field(&value, "has_external"), Value::Bool(true)));
        assert!(matches!(field(&value, "has_author"), Value::Bool(false)));
        assert_eq!("100ms", string(field(&value, "transition_delay")));
        assert_eq!("300", string(field(&value, "timeout")));
        assert!(string(field(&value, "reveal")).contains(r#"data-reveal-delay="200""#));
    }

    #[test]
    fn test_card_icons() {
        let entry = fixture("Dune");
        let value = Value::from(&Card {
            entry: &entry,
            timing: CardTiming::for_index(0, 6),
            reveal: None,
        });
        assert_eq!(Icon::Book.svg(), string(field(&value, "icon")));
        assert_eq!(Icon::External.svg(), string(field(&value, "external_icon")));
    }

    #[test]
    fn test_reveal_attributes_escape_strings() {
        let mut config = RevealConfig::default();
        config.origin = String::from(r#"left" onload="x"#);
        config.distance = String::from("<20px>");
        config.easing = String::from(r#"cubic-bezier(0.5, 0, 0, 1)" x=""#);
        let value = reveal_attributes(Some(&config));
        let attributes = string(&value);
        assert!(attributes.contains(r#"data-reveal-origin="left&quot; onload=&quot;x""#));
        assert!(attributes.contains(r#"data-reveal-distance="&lt;20px&gt;""#));
        assert!(attributes.contains(r#"1)&quot; x=&quot;" data-reveal-mobile"#));
        // every attribute value is still delimited by exactly two quotes
        assert_eq!(20, attributes.matches('"').count());
    }
}
