//! Ordered header collections shared by messages and parts.
//!
//! Headers accumulate in insertion order, except for the names in
//! [`SINGLE_USE_HEADERS`], which are replaced when set again.

use crate::contracts::MimePart;
use crate::error::Result;
use crate::header::Header;

/// Header names that may appear at most once on a message or part.
pub const SINGLE_USE_HEADERS: &[&str] = &[
    "content-type",
    "content-transfer-encoding",
    "mime-version",
    "subject",
    "from",
];

/// Reports whether setting `name` replaces rather than appends.
pub fn is_single_use_header(name: &str) -> bool {
    SINGLE_USE_HEADERS
        .iter()
        .any(|single| single.eq_ignore_ascii_case(name))
}

/// Selects headers for lookup or removal.
#[derive(Debug, Clone, Copy)]
pub enum HeaderSelector<'a> {
    /// Every header with this name, ignoring ASCII case.
    Named(&'a str),
    /// Only headers equal to this one: name, value and all parameters.
    Exact(&'a Header),
}

impl HeaderSelector<'_> {
    /// Reports whether `header` is selected.
    pub fn matches(&self, header: &Header) -> bool {
        match self {
            HeaderSelector::Named(name) => header.is_named(name),
            HeaderSelector::Exact(wanted) => header == *wanted,
        }
    }
}

impl<'a> From<&'a str> for HeaderSelector<'a> {
    fn from(name: &'a str) -> Self {
        HeaderSelector::Named(name)
    }
}

impl<'a> From<&'a Header> for HeaderSelector<'a> {
    fn from(header: &'a Header) -> Self {
        HeaderSelector::Exact(header)
    }
}

/// Header management for messages and parts.
///
/// Every `with*` method returns a modified copy; the receiver is left as
/// it was.
pub trait HasHeaders: MimePart + Clone {
    /// Mutable access to the underlying header list.
    #[doc(hidden)]
    fn headers_mut(&mut self) -> &mut Vec<Header>;

    /// The first header with the given name, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&Header> {
        self.headers().iter().find(|header| header.is_named(name))
    }

    /// Every header with the given name, in insertion order.
    fn headers_named(&self, name: &str) -> Vec<&Header> {
        self.headers()
            .iter()
            .filter(|header| header.is_named(name))
            .collect()
    }

    /// The values of every header with the given name.
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers_named(name)
            .into_iter()
            .map(Header::value)
            .collect()
    }

    /// Reports whether at least one header has the given name.
    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Returns a copy with `header` added.
    ///
    /// A single-use header takes the place of the first existing header
    /// with the same name and drops any others.
    #[must_use]
    fn with_header(&self, header: Header) -> Self {
        let mut next = self.clone();
        set_header(next.headers_mut(), header);
        next
    }

    /// Returns a copy with a `name: value` header added.
    fn with_header_value(&self, name: &str, value: &str) -> Result<Self> {
        Ok(self.with_header(Header::new(name, value)?))
    }

    /// Returns a copy with a `name: value; k=v...` header added.
    fn with_header_fields<I, K, V>(&self, name: &str, value: &str, parameters: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(self.with_header(Header::with_parameters(name, value, parameters)?))
    }

    /// Returns a copy without the selected headers.
    ///
    /// Passing a name removes every header with that name. Passing a
    /// header removes only exact matches, so one of several same-named
    /// headers can be dropped.
    #[must_use]
    fn without_header<'a>(&self, selector: impl Into<HeaderSelector<'a>>) -> Self {
        let selector = selector.into();
        let mut next = self.clone();
        next.headers_mut().retain(|header| !selector.matches(header));
        next
    }
}

pub(crate) fn set_header(headers: &mut Vec<Header>, header: Header) {
    if !is_single_use_header(header.name()) {
        headers.push(header);
        return;
    }

    match headers.iter().position(|h| h.is_named(header.name())) {
        Some(index) => {
            let name = header.name().to_string();
            headers[index] = header;
            let mut seen = 0;
            headers.retain(|h| {
                if h.is_named(&name) {
                    seen += 1;
                    seen == 1
                } else {
                    true
                }
            });
        }
        None => headers.push(header),
    }
}
