//! Locale negotiation
//!
//! The site serves two locales, Spanish (default) and English. A request's
//! locale is taken from the URL path prefix when present, then the
//! `folio_locale` cookie, then the `Accept-Language` header. Anything
//! invalid or absent falls back to the default.

/// Cookie used to pin a visitor's locale choice.
pub const LOCALE_COOKIE: &str = "folio_locale";

/// Supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// The locale code used in URLs and CMS queries.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// URL prefix for this locale. The default locale lives at the root.
    pub fn path_prefix(self) -> &'static str {
        match self {
            Locale::Es => "",
            Locale::En => "/en",
        }
    }
}

/// Negotiate the locale for one request.
///
/// `explicit` is a locale code captured from the URL path, `cookie_header`
/// the raw `Cookie` header, `accept_language` the raw `Accept-Language`
/// header.
pub fn negotiate(
    explicit: Option<&str>,
    cookie_header: Option<&str>,
    accept_language: Option<&str>,
) -> Locale {
    if let Some(locale) = explicit.and_then(Locale::from_code) {
        return locale;
    }

    if let Some(locale) = cookie_header.and_then(cookie_locale) {
        return locale;
    }

    if let Some(locale) = accept_language.and_then(accept_language_locale) {
        return locale;
    }

    Locale::default()
}

/// Extract the locale cookie from a raw `Cookie` header.
fn cookie_locale(header: &str) -> Option<Locale> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == LOCALE_COOKIE {
            Locale::from_code(value.trim())
        } else {
            None
        }
    })
}

/// Pick the first supported primary subtag from an `Accept-Language` header.
/// Quality weights are ignored beyond the client's own ordering.
fn accept_language_locale(header: &str) -> Option<Locale> {
    header.split(',').find_map(|item| {
        let tag = item.split(';').next()?.trim();
        let primary = tag.split('-').next()?;
        Locale::from_code(&primary.to_ascii_lowercase())
    })
}
