use aho_corasick::AhoCorasick;
use rayon::prelude::*;

use crate::error::Result;
use crate::literal::extract_literals;

/// Literals shorter than this are useless as prefilter keys.
const MIN_LITERAL_LEN: usize = 3;

/// How a pattern is compared against its haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchMode {
    /// Classification patterns: run on the lower-cased user agent.
    IgnoreCase,
    /// Version patterns: run on the original user agent as written.
    Exact,
}

/// Build the full regex string for `mode`.
pub(crate) fn full_pattern(pattern: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::IgnoreCase => format!("(?i)(?:{})", pattern),
        MatchMode::Exact => format!("(?:{})", pattern),
    }
}

// ---------------------------------------------------------------------------
// CompiledRegex / Captures: one face over regex and fancy_regex
// ---------------------------------------------------------------------------

/// A pattern compiled with the `regex` crate when possible, falling back to
/// `fancy_regex` for PCRE features (look-around).
pub(crate) enum CompiledRegex {
    Standard(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl CompiledRegex {
    pub fn new(pattern: &str, mode: MatchMode) -> Result<Self> {
        let full = full_pattern(pattern, mode);
        match regex::Regex::new(&full) {
            Ok(re) => Ok(Self::Standard(re)),
            Err(_) => Ok(Self::Fancy(fancy_regex::Regex::new(&full)?)),
        }
    }

    /// Backtracking errors from fancy_regex count as "no match".
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Standard(re) => re.is_match(haystack),
            Self::Fancy(re) => re.is_match(haystack).unwrap_or(false),
        }
    }

    pub fn captures<'h>(&self, haystack: &'h str) -> Option<Captures<'h>> {
        match self {
            Self::Standard(re) => re.captures(haystack).map(Captures::Standard),
            Self::Fancy(re) => match re.captures(haystack) {
                Ok(Some(caps)) => Some(Captures::Fancy(caps)),
                _ => None,
            },
        }
    }
}

/// Lightweight wrapper so callers (substitute, capture_or_empty) don't need
/// to know which regex engine produced the match.
pub(crate) enum Captures<'a> {
    Standard(regex::Captures<'a>),
    Fancy(fancy_regex::Captures<'a>),
}

impl<'a> Captures<'a> {
    /// Get the matched text for capture group `i`, or `None` if the group
    /// didn't participate in the match.
    pub fn get_str(&self, i: usize) -> Option<&'a str> {
        match self {
            Captures::Standard(c) => c.get(i).map(|m| m.as_str()),
            Captures::Fancy(c) => c.get(i).map(|m| m.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// CompiledParser: ordered first-match-wins list
// ---------------------------------------------------------------------------

pub(crate) struct CompiledEntry<T> {
    pub regex: CompiledRegex,
    pub data: T,
}

/// Result of a successful match.
pub(crate) struct MatchResult<'a, 'h, T> {
    pub data: &'a T,
    pub captures: Captures<'h>,
}

/// Ordered rule list: the first entry (in insertion order) whose pattern
/// matches wins.
///
/// An Aho-Corasick automaton over each entry's prefix literals narrows the
/// entries worth running; entries without a usable literal set are always
/// tried.
pub(crate) struct CompiledParser<T> {
    entries: Vec<CompiledEntry<T>>,
    prefilter: Option<AhoCorasick>,
    /// Maps automaton pattern index → entry index.
    literal_to_entry: Vec<usize>,
    /// Entries that must be tried regardless of the prefilter.
    always: Vec<bool>,
}

impl<T> CompiledParser<T> {
    /// Build a CompiledParser from an iterator of (regex_pattern, data) pairs.
    pub fn build(items: impl IntoIterator<Item = (String, T)>, mode: MatchMode) -> Result<Self>
    where
        T: Send,
    {
        let items: Vec<(String, T)> = items.into_iter().collect();

        // Literal extraction and compilation are independent per entry.
        let compiled: Vec<(Vec<String>, CompiledEntry<T>)> = items
            .into_par_iter()
            .map(|(pattern, data)| {
                let literals = extract_literals(&pattern, MIN_LITERAL_LEN);
                let regex = CompiledRegex::new(&pattern, mode)?;
                Ok((literals, CompiledEntry { regex, data }))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut entries = Vec::with_capacity(compiled.len());
        let mut literals: Vec<String> = Vec::new();
        let mut literal_to_entry: Vec<usize> = Vec::new();
        let mut always: Vec<bool> = Vec::with_capacity(compiled.len());

        for (idx, (entry_literals, entry)) in compiled.into_iter().enumerate() {
            always.push(entry_literals.is_empty());
            for lit in entry_literals {
                literals.push(lit);
                literal_to_entry.push(idx);
            }
            entries.push(entry);
        }

        let prefilter = if literals.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&literals)?,
            )
        };

        Ok(Self {
            entries,
            prefilter,
            literal_to_entry,
            always,
        })
    }

    /// An empty parser never matches.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            prefilter: None,
            literal_to_entry: Vec::new(),
            always: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.data)
    }

    /// Entries that may match `haystack`, flagged by index.
    fn candidates(&self, haystack: &str) -> Vec<bool> {
        let mut candidates = self.always.clone();
        if let Some(ac) = &self.prefilter {
            for m in ac.find_overlapping_iter(haystack) {
                candidates[self.literal_to_entry[m.pattern().as_usize()]] = true;
            }
        }
        candidates
    }

    /// Find the first matching entry (preserving original order).
    pub fn match_first<'a, 'h>(&'a self, haystack: &'h str) -> Option<MatchResult<'a, 'h, T>> {
        self.match_first_where(haystack, |_| true)
    }

    /// Find the first matching entry whose data also passes `accept`.
    /// Rejected entries do not stop the scan; later entries are still tried.
    pub fn match_first_where<'a, 'h, F>(
        &'a self,
        haystack: &'h str,
        mut accept: F,
    ) -> Option<MatchResult<'a, 'h, T>>
    where
        F: FnMut(&T) -> bool,
    {
        let candidates = self.candidates(haystack);
        self.entries
            .iter()
            .zip(candidates)
            .filter(|(_, candidate)| *candidate)
            .find_map(|(entry, _)| {
                let captures = entry.regex.captures(haystack)?;
                accept(&entry.data).then_some(MatchResult {
                    data: &entry.data,
                    captures,
                })
            })
    }
}
