//! The body of a message or part.

use crate::part::Part;

/// What a message or part carries below its headers.
///
/// A scalar body and a list of sub-parts are mutually exclusive: setting
/// one replaces the other.
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// Nothing yet.
    #[default]
    Empty,
    /// A pre-encoded scalar body, rendered verbatim.
    Body(String),
    /// Nested parts, rendered as a multipart body.
    Parts(Vec<Part>),
}

impl Content {
    /// The scalar body, if that is what this content holds.
    pub fn body(&self) -> Option<&str> {
        match self {
            Content::Body(body) => Some(body),
            _ => None,
        }
    }

    /// The sub-parts. Empty unless this content holds parts.
    pub fn parts(&self) -> &[Part] {
        match self {
            Content::Parts(parts) => parts,
            _ => &[],
        }
    }

    /// Reports whether there is neither a body nor any parts.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Empty => true,
            Content::Body(_) => false,
            Content::Parts(parts) => parts.is_empty(),
        }
    }

    /// Appends a part, discarding any scalar body.
    pub(crate) fn push_part(&mut self, part: Part) {
        match self {
            Content::Parts(parts) => parts.push(part),
            _ => *self = Content::Parts(vec![part]),
        }
    }
}
