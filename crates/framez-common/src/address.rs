//! Frame addresses and fragment handling.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//! [§ 7.2 APIs related to navigation and session history](https://html.spec.whatwg.org/multipage/nav-history-apis.html)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error raised when a string cannot be interpreted as a frame address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The string has no scheme, so it is neither an absolute URL nor the
    /// blank sentinel.
    ///
    /// [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
    /// "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
    /// followed by a scheme-specific part."
    #[error("address '{0}' has no scheme")]
    MissingScheme(String),

    /// The string is empty (after trimming).
    #[error("address is empty")]
    Empty,
}

/// The address a navigable embedded context has committed.
///
/// [§ 7.3 Infrastructure for sequences of documents](https://html.spec.whatwg.org/multipage/document-sequences.html)
///
/// An address is an absolute URL string with an optional fragment. The
/// fragment doubles as the swap-target selector: `http://x/page#target`
/// means "swap the loaded body into the element matching `#target`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    raw: String,
}

impl Address {
    /// The blank sentinel address of an uninitialized or reset context.
    ///
    /// [§ 7.3.1](https://html.spec.whatwg.org/multipage/document-sequences.html#creating-browsing-contexts)
    /// "...a new top-level browsing context... whose active document's URL
    /// is about:blank."
    pub const BLANK: &'static str = "about:blank";

    /// Create the blank sentinel address.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            raw: Self::BLANK.to_string(),
        }
    }

    /// Parse an address from an absolute URL string.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the string is empty or has no scheme.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        // A scheme is an ASCII alpha followed by alphanumerics/+/-/., then ':'.
        // [URL Standard § 4.1](https://url.spec.whatwg.org/#url-representation)
        let has_scheme = trimmed.split_once(':').is_some_and(|(scheme, _)| {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        });
        if !has_scheme {
            return Err(AddressError::MissingScheme(trimmed.to_string()));
        }
        Ok(Self {
            raw: trimmed.to_string(),
        })
    }

    /// Whether this address is the blank sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw == Self::BLANK
    }

    /// The raw address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The fragment of this address, including the leading `#`.
    ///
    /// [§ 7.2.2 The Location interface](https://html.spec.whatwg.org/multipage/nav-history-apis.html#dom-location-hash)
    /// "Returns this Location object's url's fragment (including leading
    /// "#" if non-empty)."
    ///
    /// Returns `None` when the address has no fragment or the fragment is
    /// empty (`http://x/page` and `http://x/page#` both yield `None`),
    /// mirroring `location.hash` returning the empty string for both.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self.raw.split_once('#') {
            Some((_, frag)) if !frag.is_empty() => {
                // Hand back the '#' too: the fragment is used verbatim as a
                // selector string, so "#target" reads as an ID selector.
                Some(&self.raw[self.raw.len() - frag.len() - 1..])
            }
            _ => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative URL against a base address.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified implementation covering the shapes frame
/// markup actually uses (absolute, protocol-relative, absolute-path,
/// relative-path). Full URL resolution requires the URL Standard's parsing
/// algorithm.
#[must_use]
pub fn resolve(href: &str, base: &Address) -> String {
    if Address::parse(href).is_ok() {
        return href.to_string();
    }

    let base = base.as_str();
    if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative URL - prepend scheme from base
        let scheme = base.split_once(':').map_or("http", |(s, _)| s);
        format!("{scheme}://{rest}")
    } else if href.starts_with('/') {
        // Absolute path - join with the base's origin
        base.find("://").map_or_else(
            || href.to_string(),
            |scheme_end| {
                let after_scheme = &base[scheme_end + 3..];
                after_scheme.find('/').map_or_else(
                    || format!("{base}{href}"),
                    |path_start| {
                        let origin = &base[..scheme_end + 3 + path_start];
                        format!("{origin}{href}")
                    },
                )
            },
        )
    } else {
        // Relative path - join with the base directory
        let base_dir = base.rsplit_once('/').map_or(base, |(dir, _)| dir);
        format!("{base_dir}/{href}")
    }
}
