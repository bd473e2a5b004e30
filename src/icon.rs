//! Defines the [`Icon`] type, the fixed set of glyphs the site renders inline,
//! and [`Icon::resolve`] which maps a symbolic name onto a glyph. Resolution
//! is total: names outside the set resolve to [`Icon::default`].

use std::fmt;

/// A single inline SVG glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    AppStore,
    Book,
    Codepen,
    External,
    Facebook,
    Folder,
    Fork,
    GitHub,
    Instagram,
    Linkedin,
    Loader,
    Logo,
    PlayStore,
    Star,
    Twitter,
    Zap,
}

/// The name-to-glyph table. Names are matched exactly (case-sensitive).
const GLYPHS: [(&str, Icon); 16] = [
    ("AppStore", Icon::AppStore),
    ("Book", Icon::Book),
    ("Codepen", Icon::Codepen),
    ("External", Icon::External),
    ("Facebook", Icon::Facebook),
    ("Folder", Icon::Folder),
    ("Fork", Icon::Fork),
    ("GitHub", Icon::GitHub),
    ("Instagram", Icon::Instagram),
    ("Linkedin", Icon::Linkedin),
    ("Loader", Icon::Loader),
    ("Logo", Icon::Logo),
    ("PlayStore", Icon::PlayStore),
    ("Star", Icon::Star),
    ("Twitter", Icon::Twitter),
    ("Zap", Icon::Zap),
];

impl Default for Icon {
    /// The glyph used for any name not in the table.
    fn default() -> Self {
        Icon::External
    }
}

impl Icon {
    /// Every glyph, in table order.
    pub fn all() -> impl Iterator<Item = Icon> {
        GLYPHS.iter().map(|(_, icon)| *icon)
    }

    /// Looks up `name` in the glyph table. Missing or unknown names resolve to
    /// the default glyph rather than failing.
    pub fn resolve(name: Option<&str>) -> Icon {
        name.and_then(|name| {
            GLYPHS
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, icon)| *icon)
        })
        .unwrap_or_default()
    }

    /// The symbolic name of the glyph; `Icon::resolve(Some(icon.name()))`
    /// always returns `icon`.
    pub fn name(self) -> &'static str {
        GLYPHS
            .iter()
            .find(|(_, icon)| *icon == self)
            .map(|(name, _)| *name)
            .unwrap_or("External")
    }

    /// The inline `<svg>` markup for the glyph.
    pub fn svg(self) -> &'static str {
        match self {
            Icon::AppStore => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>App Store</title>"#,
                r#"<path d="M8 16l4-8 4 8M6.5 13h11M4 20h4M16 20h4"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Book => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Book</title>"#,
                r#"<path d="M4 19.5A2.5 2.5 0 0 1 6.5 17H20"></path>"#,
                r#"<path d="M6.5 2H20v20H6.5A2.5 2.5 0 0 1 4 19.5v-15A2.5 2.5 0 0 1 6.5 2z"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Codepen => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>CodePen</title>"#,
                r#"<polygon points="12 2 22 8.5 22 15.5 12 22 2 15.5 2 8.5 12 2"></polygon>"#,
                r#"<line x1="12" y1="22" x2="12" y2="15.5"></line>"#,
                r#"<polyline points="22 8.5 12 15.5 2 8.5"></polyline>"#,
                r#"<polyline points="2 15.5 12 8.5 22 15.5"></polyline>"#,
                r#"<line x1="12" y1="2" x2="12" y2="8.5"></line>"#,
                r#"</svg>"#,
            ),
            Icon::External => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>External Link</title>"#,
                r#"<path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"></path>"#,
                r#"<polyline points="15 3 21 3 21 9"></polyline>"#,
                r#"<line x1="10" y1="14" x2="21" y2="3"></line>"#,
                r#"</svg>"#,
            ),
            Icon::Facebook => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Facebook</title>"#,
                r#"<path d="M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Folder => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Folder</title>"#,
                r#"<path d="M22 19a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h5l2 3h9a2 2 0 0 1 2 2z"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Fork => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Fork</title>"#,
                r#"<circle cx="6" cy="3" r="2"></circle><circle cx="18" cy="3" r="2"></circle><circle cx="12" cy="21" r="2"></circle>"#,
                r#"<path d="M6 5v3a4 4 0 0 0 4 4h4a4 4 0 0 0 4-4V5M12 12v7"></path>"#,
                r#"</svg>"#,
            ),
            Icon::GitHub => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>GitHub</title>"#,
                r#"<path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Instagram => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Instagram</title>"#,
                r#"<rect x="2" y="2" width="20" height="20" rx="5" ry="5"></rect>"#,
                r#"<path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"></path>"#,
                r#"<line x1="17.5" y1="6.5" x2="17.51" y2="6.5"></line>"#,
                r#"</svg>"#,
            ),
            Icon::Linkedin => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>LinkedIn</title>"#,
                r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"></path>"#,
                r#"<rect x="2" y="9" width="4" height="12"></rect>"#,
                r#"<circle cx="4" cy="4" r="2"></circle>"#,
                r#"</svg>"#,
            ),
            Icon::Loader => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 100 100">"#,
                r#"<title>Loader</title>"#,
                r#"<g><path d="M 50 5 L 11 27 L 11 72 L 50 95 L 89 73 L 89 28 z" fill="none" stroke="currentColor" stroke-width="5" stroke-linecap="round" stroke-linejoin="round"></path></g>"#,
                r#"</svg>"#,
            ),
            Icon::Logo => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 84 96">"#,
                r#"<title>Logo</title>"#,
                r#"<g transform="translate(-8.000000, -2.000000)"><g transform="translate(11.000000, 5.000000)">"#,
                r#"<polygon stroke="currentColor" stroke-width="5" stroke-linecap="round" stroke-linejoin="round" points="39 0 0 22 0 67 39 90 78 68 78 23"></polygon>"#,
                r#"</g></g>"#,
                r#"</svg>"#,
            ),
            Icon::PlayStore => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Play Store</title>"#,
                r#"<path d="M5 3l14 9-14 9z"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Star => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Star</title>"#,
                r#"<polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"></polygon>"#,
                r#"</svg>"#,
            ),
            Icon::Twitter => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Twitter</title>"#,
                r#"<path d="M23 3a10.9 10.9 0 0 1-3.14 1.53 4.48 4.48 0 0 0-7.86 3v1A10.66 10.66 0 0 1 3 4s-4 9 5 13a11.64 11.64 0 0 1-7 2c9 5 20 0 20-11.5a4.5 4.5 0 0 0-.08-.83A7.72 7.72 0 0 0 23 3z"></path>"#,
                r#"</svg>"#,
            ),
            Icon::Zap => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" role="img" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                r#"<title>Zap</title>"#,
                r#"<polygon points="13 2 3 14 12 14 11 22 21 10 12 10 13 2"></polygon>"#,
                r#"</svg>"#,
            ),
        }
    }
}

impl fmt::Display for Icon {
    /// Displays an [`Icon`] as its inline SVG markup.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.svg())
    }
}
