//! Path template segments.

use std::fmt;

/// A single component of a path template.
///
/// The kind of every component is decided once, at parse time; downstream
/// code matches on the variant and never re-inspects marker characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Literal text that a concrete path segment must equal.
    Static(String),
    /// An argument that must be present in any matching concrete path.
    Required(String),
    /// An argument that may be omitted from a matching concrete path.
    Optional(String),
}

impl Segment {
    /// Classify one non-empty path component by its leading marker:
    /// `:name` is a required argument, `:?name` an optional one, anything
    /// else static text.
    pub(crate) fn classify(component: &str) -> Segment {
        if let Some(name) = component.strip_prefix(":?") {
            Segment::Optional(name.to_owned())
        } else if let Some(name) = component.strip_prefix(':') {
            Segment::Required(name.to_owned())
        } else {
            Segment::Static(component.to_owned())
        }
    }

    /// The argument name, if this segment is an argument.
    pub fn arg_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Required(name) | Segment::Optional(name) => Some(name),
        }
    }

    /// Specificity rank used for template ordering: static segments beat
    /// required arguments, which beat optional arguments.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Required(_) => 1,
            Segment::Optional(_) => 2,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(text) => write!(f, "{text}"),
            Segment::Required(name) => write!(f, ":{name}"),
            Segment::Optional(name) => write!(f, ":?{name}"),
        }
    }
}
