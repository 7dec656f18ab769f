use std::str::FromStr;

use crate::db::LabelTableEntry;
use crate::error::{Error, Result};
use crate::helpers::{capture_or_empty, normalize_version};
use crate::parser::{CompiledParser, CompiledRegex, MatchMode};
use crate::parser_data::LabelData;
use crate::types::{BrowserLabel, OsLabel};

/// A closed label family with a catch-all member.
pub(crate) trait ClosedLabel: Copy + PartialEq + Send + FromStr<Err = Error> {
    const FALLBACK: Self;
}

impl ClosedLabel for OsLabel {
    const FALLBACK: Self = OsLabel::Other;
}

impl ClosedLabel for BrowserLabel {
    const FALLBACK: Self = BrowserLabel::Other;
}

/// One label family: ordered classification rules, each with its own
/// version patterns, plus the version patterns used under the fallback
/// label.
pub(crate) struct LabelTable<L> {
    rules: CompiledParser<LabelData<L>>,
    fallback_versions: CompiledParser<()>,
}

impl<L: ClosedLabel> LabelTable<L> {
    pub fn build(entry: LabelTableEntry) -> Result<Self> {
        let items = entry
            .rules
            .into_iter()
            .map(|rule| {
                let label = rule.name.parse::<L>()?;
                let exclude = rule
                    .exclude
                    .as_deref()
                    .map(|p| CompiledRegex::new(p, MatchMode::IgnoreCase))
                    .transpose()?;
                let versions = build_versions(rule.versions)?;
                Ok((
                    rule.regex,
                    LabelData {
                        label,
                        exclude,
                        versions,
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules: CompiledParser::build(items, MatchMode::IgnoreCase)?,
            fallback_versions: build_versions(entry.fallback.versions)?,
        })
    }

    /// Classify `lowered`, then pull the version out of `original` using the
    /// winning label's own patterns. No rule → fallback label.
    pub fn classify(&self, lowered: &str, original: &str) -> (L, String) {
        match self
            .rules
            .match_first_where(lowered, |data| !data.excluded(lowered))
        {
            Some(m) => (m.data.label, extract_version(&m.data.versions, original)),
            None => (L::FALLBACK, extract_version(&self.fallback_versions, original)),
        }
    }

    /// Version for a label decided outside the table, using that label's
    /// patterns only.
    pub fn version_for(&self, label: L, original: &str) -> String {
        self.rules
            .entries()
            .find(|data| data.label == label)
            .map(|data| extract_version(&data.versions, original))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

fn build_versions(patterns: Vec<String>) -> Result<CompiledParser<()>> {
    if patterns.is_empty() {
        return Ok(CompiledParser::empty());
    }
    CompiledParser::build(patterns.into_iter().map(|p| (p, ())), MatchMode::Exact)
}

/// First version pattern that matches wins; no match → empty string.
fn extract_version(versions: &CompiledParser<()>, original: &str) -> String {
    versions
        .match_first(original)
        .map(|m| normalize_version(capture_or_empty(&m.captures, 1)))
        .unwrap_or_default()
}
