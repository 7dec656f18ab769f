use crate::parser::Captures;
use std::borrow::Cow;

/// Apple platforms emit `16_4` where everybody else writes `16.4`.
pub(crate) fn normalize_version(version: Cow<'_, str>) -> String {
    if version.contains('_') {
        version.replace('_', ".")
    } else {
        version.into_owned()
    }
}

pub(crate) fn capture_or_empty<'a>(captures: &Captures<'a>, group: usize) -> Cow<'a, str> {
    captures
        .get_str(group)
        .map(Cow::Borrowed)
        .unwrap_or(Cow::Borrowed(""))
}

/// First non-empty candidate, trimmed of surrounding whitespace.
pub(crate) fn first_non_empty<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}
