//! Full-name parsing
//!
//! A full name is `category/path/name`. The last `/` separates the name from
//! its category path; a string without `/` is a bare name.

/// Result of splitting a full name.
///
/// The split is always performed; `problem` is set when the input could not
/// have been produced by joining a well-formed category path and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedFullName<'a> {
    pub category_path: &'a str,
    pub name: &'a str,
    pub problem: Option<&'static str>,
}

/// Split a full name on its last `/`.
pub fn split_full_name(full_name: &str) -> ParsedFullName<'_> {
    let (category_path, name) = match full_name.rfind('/') {
        Some(pos) => (&full_name[..pos], &full_name[pos + 1..]),
        None => ("", full_name),
    };

    let problem = if full_name.is_empty() {
        Some("empty full name")
    } else if full_name.starts_with('/') {
        Some("leading path separator")
    } else if full_name.ends_with('/') {
        Some("trailing path separator")
    } else if full_name.contains("//") {
        Some("empty path segment")
    } else {
        None
    };

    ParsedFullName {
        category_path,
        name,
        problem,
    }
}
