//! Immutable MIME/RFC 822 header values.

use crate::error::{Error, Result};
use crate::grammar::is_header_name;
use crate::media_type::split_parameters;
use std::fmt;

/// An ordered map of header parameters.
///
/// Keys are unique and keep their insertion order, which is the order they
/// are rendered in. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Reports whether the named parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Sets a parameter. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Removes a parameter, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Parameters {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// A single header: name, value and ordered parameters.
///
/// Headers are values. Every `with*` method returns a new header and
/// leaves the receiver untouched.
///
/// # Examples
///
/// ```
/// use bead_mail::Header;
///
/// let header = Header::new("content-type", "multipart/mixed")
///     .unwrap()
///     .with_parameter("boundary", "xyz");
/// assert_eq!(header.line(), "content-type: multipart/mixed; boundary=xyz");
/// ```
#[derive(Debug, Clone)]
pub struct Header {
    name: String,
    value: String,
    parameters: Parameters,
}

impl Header {
    /// Creates a header with no parameters.
    ///
    /// Fails with [`Error::InvalidArgument`] if the name is not a valid
    /// header name.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            name,
            value: value.into(),
            parameters: Parameters::new(),
        })
    }

    /// Creates a header with the given parameters.
    pub fn with_parameters<I, K, V>(
        name: impl Into<String>,
        value: impl Into<String>,
        parameters: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut header = Self::new(name, value)?;
        header.parameters = parameters.into_iter().collect();
        Ok(header)
    }

    /// Creates a header whose name is a known-good constant.
    pub(crate) fn trusted(name: &str, value: impl Into<String>) -> Self {
        debug_assert!(is_header_name(name));
        Self {
            name: name.to_string(),
            value: value.into(),
            parameters: Parameters::new(),
        }
    }

    /// Parses a single unfolded header line such as
    /// `content-disposition: attachment; filename="a.txt"`.
    ///
    /// Parameter values are kept exactly as written.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some((name, rest)) = line.split_once(':') else {
            return Err(Error::invalid_argument(format!(
                "Expected \"name: value\" header line, found \"{}\"",
                line
            )));
        };

        let (value, params) = rest.split_once(';').unwrap_or((rest, ""));
        Self::with_parameters(name.trim(), value.trim(), split_parameters(params)?)
    }

    /// The header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header value, without parameters.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The header parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the named parameter's value.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    /// Reports whether the header carries the named parameter.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains(name)
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Reports whether the header has the given name, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns a copy with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    /// Returns a copy with a different value.
    #[must_use]
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with the parameter added or replaced.
    #[must_use]
    pub fn with_parameter(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut header = self.clone();
        header.parameters.insert(name, value);
        header
    }

    /// Returns a copy without the parameter. Removing an absent parameter
    /// still returns a copy.
    #[must_use]
    pub fn without_parameter(&self, name: &str) -> Self {
        let mut header = self.clone();
        header.parameters.remove(name);
        header
    }

    /// Renders `name: value; param=value...` with no line terminator.
    pub fn line(&self) -> String {
        let mut line = format!("{}: {}", self.name, self.value);
        for (key, value) in self.parameters.iter() {
            line.push_str("; ");
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        line
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.is_named(&other.name)
            && self.value == other.value
            && self.parameters == other.parameters
    }
}

impl Eq for Header {}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}

fn check_name(name: &str) -> Result<()> {
    if is_header_name(name) {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "Invalid header name \"{}\"",
            name
        )))
    }
}
