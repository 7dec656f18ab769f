use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Label tables  (rules/oss.yml, rules/browsers.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct LabelTableEntry {
    pub rules: Vec<LabelRule>,
    #[serde(default)]
    pub fallback: FallbackRule,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelRule {
    /// Label name, parsed into the family's closed enum.
    pub name: String,
    /// Classification pattern, case-insensitive.
    pub regex: String,
    /// Vetoes the rule when it also matches.
    #[serde(default)]
    pub exclude: Option<String>,
    /// Version patterns, case-sensitive, tried in order.
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FallbackRule {
    #[serde(default)]
    pub versions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Device class  (rules/devices.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceClassEntry {
    #[serde(default)]
    pub mobile: Vec<ClassPattern>,
    #[serde(default)]
    pub tablet: Vec<ClassPattern>,
}

/// Either a bare pattern or a pattern with a veto.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassPattern {
    Plain(String),
    Guarded {
        regex: String,
        #[serde(default)]
        exclude: Option<String>,
    },
}

impl ClassPattern {
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            Self::Plain(regex) => (regex, None),
            Self::Guarded { regex, exclude } => (regex, exclude),
        }
    }
}

// ---------------------------------------------------------------------------
// Vendors  (rules/vendors.yml)
//
// Format: top-level mapping  vendor_name → VendorEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VendorEntry {
    pub regex: String,
    #[serde(default)]
    pub model: Option<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub regex: String,
    pub template: String,
}

/// Uses IndexMap to preserve YAML insertion order (first-match-wins).
pub(crate) type VendorMap = IndexMap<String, VendorEntry>;
