//! Path templates: parsing, argument extraction, and path generation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;

use crate::template::error::Error;
use crate::template::segment::Segment;

/// Arguments extracted from, or assigned into, a path template.
///
/// Optional arguments that were omitted from the concrete path map to `None`.
pub type PathArgs = HashMap<String, Option<String>>;

/// Split a concrete request path into its non-empty segments, dropping any
/// query string.
pub fn split_path(path: &str) -> Vec<&str> {
    let path = path.split('?').next().unwrap_or(path);
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// An immutable, ordered sequence of path [`Segment`]s.
///
/// Templates are created once per route registration (or per reverse
/// lookup) and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a path string into a template.
    ///
    /// The input is split on `/`, empty components are dropped, and each
    /// component is classified by its leading marker (`:name` required,
    /// `:?name` optional, anything else static). Classification is total,
    /// so structural parsing cannot fail.
    pub fn parse(input: &str) -> Self {
        let segments = input
            .split('/')
            .filter(|part| !part.is_empty())
            .map(Segment::classify)
            .collect();
        Self { segments }
    }

    /// Build the template for an action from an optional explicit path.
    ///
    /// Starts from `explicit` when given, otherwise from the action's
    /// default path (`/` for `index`, `/<action>` for anything else), then
    /// appends every declared parameter not already present as a segment:
    /// required parameters first, optional ones after, each in declared
    /// order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ArgumentsOrder`] when the template's optional
    /// segments are not in the order the action declares its optional
    /// parameters.
    pub fn adapt(
        explicit: Option<&str>,
        action_name: &str,
        required: &[String],
        optional: &[String],
    ) -> Result<Self, Error> {
        let mut template = match explicit {
            Some(path) => Self::parse(path),
            None if action_name == "index" => Self::default(),
            None => Self {
                segments: vec![Segment::Static(action_name.to_owned())],
            },
        };

        for name in required {
            if !template.has_arg(name) {
                template.segments.push(Segment::Required(name.clone()));
            }
        }
        for name in optional {
            if !template.has_arg(name) {
                template.segments.push(Segment::Optional(name.clone()));
            }
        }

        template.check_optional_order(optional)?;
        Ok(template)
    }

    /// The template's segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any argument segment carries the given name.
    fn has_arg(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.arg_name() == Some(name))
    }

    /// Names of the template's required-argument segments, in order.
    pub(crate) fn required_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Required(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of the template's optional-argument segments, in order.
    pub(crate) fn optional_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Optional(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Verify that optional segments appear in the declared order.
    fn check_optional_order(&self, declared: &[String]) -> Result<(), Error> {
        let mut last_position = None;
        for name in self.optional_names() {
            let Some(position) = declared.iter().position(|d| d == name) else {
                // Unknown names are the validator's concern, not ordering's.
                continue;
            };
            if matches!(last_position, Some(last) if position < last) {
                return Err(Error::ArgumentsOrder {
                    path: self.to_string(),
                    expected: declared.to_vec(),
                });
            }
            last_position = Some(position);
        }
        Ok(())
    }

    /// Extract argument values from a concrete path already known to match
    /// this template.
    ///
    /// Walks the template's segments in lockstep with the concrete
    /// segments. An optional slot is recorded as absent (`None`), without
    /// consuming a concrete segment, when the concrete segment is really
    /// the next static template segment, or when too few concrete segments
    /// remain to fill the rest of the template. Bound values are
    /// percent-decoded, with `+` decoded as space.
    pub fn extract_arguments(&self, concrete: &[&str]) -> PathArgs {
        let mut args = PathArgs::new();
        let mut cursor = 0usize;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(_) => {
                    if cursor < concrete.len() {
                        cursor += 1;
                    }
                }
                Segment::Required(name) => {
                    if let Some(part) = concrete.get(cursor) {
                        args.insert(name.clone(), Some(decode(part)));
                        cursor += 1;
                    } else {
                        args.insert(name.clone(), None);
                    }
                }
                Segment::Optional(name) => {
                    if concrete.get(cursor).is_none() || self.optional_is_skipped(index, concrete, cursor) {
                        args.insert(name.clone(), None);
                    } else {
                        args.insert(name.clone(), Some(decode(concrete[cursor])));
                        cursor += 1;
                    }
                }
            }
        }

        args
    }

    /// Whether the optional slot at `index` is being skipped by the
    /// concrete path.
    fn optional_is_skipped(&self, index: usize, concrete: &[&str], cursor: usize) -> bool {
        // The concrete segment is really the next template segment.
        if let Some(Segment::Static(text)) = self.segments.get(index + 1) {
            if concrete[cursor] == text.as_str() {
                return true;
            }
        }
        // Not enough concrete segments left for this slot plus the
        // remaining non-optional segments.
        let remaining_fixed = self.segments[index + 1..]
            .iter()
            .filter(|segment| !matches!(segment, Segment::Optional(_)))
            .count();
        concrete.len() - cursor <= remaining_fixed
    }

    /// Render a concrete path from argument values.
    ///
    /// Static segments pass through, required arguments take their value
    /// from `values`, and optional arguments are inserted when a value is
    /// present and dropped otherwise. Values are percent-encoded. The
    /// result always starts with `/`, never contains duplicate slashes,
    /// and normalizes to `/` when every segment is dropped.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ArgumentNotAssigned`] when a required argument
    /// has no value.
    pub fn assign_arguments(&self, values: &PathArgs) -> Result<String, Error> {
        let mut parts = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(text.clone()),
                Segment::Required(name) => match values.get(name).and_then(|v| v.as_deref()) {
                    Some(value) => parts.push(urlencoding::encode(value).into_owned()),
                    None => {
                        return Err(Error::ArgumentNotAssigned {
                            argument: name.clone(),
                            template: self.to_string(),
                        })
                    }
                },
                Segment::Optional(name) => {
                    if let Some(value) = values.get(name).and_then(|v| v.as_deref()) {
                        parts.push(urlencoding::encode(value).into_owned());
                    }
                }
            }
        }

        Ok(collapse_slashes(&format!("/{}", parts.join("/"))))
    }

    /// Concatenate two templates.
    pub fn join(&self, other: &PathTemplate) -> PathTemplate {
        PathTemplate {
            segments: self
                .segments
                .iter()
                .chain(other.segments.iter())
                .cloned()
                .collect(),
        }
    }
}

/// Percent-decode one concrete path segment, treating `+` as space.
fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Drop repeated slashes, keeping the first of each run.
fn collapse_slashes(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut previous_slash = false;
    for ch in path.chars() {
        if ch == '/' && previous_slash {
            continue;
        }
        previous_slash = ch == '/';
        result.push(ch);
    }
    result
}

impl Ord for PathTemplate {
    /// Templates with more segments sort first; at equal length, the
    /// template whose first differing position holds the more specific
    /// segment kind (static, then required, then optional) sorts first.
    /// Templates of equal length and identical kinds fall back to
    /// comparing the segments themselves, so `Equal` implies structural
    /// equality.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .segments
            .len()
            .cmp(&self.segments.len())
            .then_with(|| {
                self.segments
                    .iter()
                    .map(Segment::rank)
                    .cmp(other.segments.iter().map(Segment::rank))
            })
            .then_with(|| self.segments.cmp(&other.segments))
    }
}

impl PartialOrd for PathTemplate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&PathTemplate> for &PathTemplate {
    type Output = PathTemplate;

    fn add(self, other: &PathTemplate) -> PathTemplate {
        self.join(other)
    }
}

impl From<&str> for PathTemplate {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
