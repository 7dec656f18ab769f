use super::parser::{CompiledParser, CompiledRegex};

// ---------------------------------------------------------------------------
// Internal data structs carried inside CompiledParser<T>
// ---------------------------------------------------------------------------

pub(crate) struct LabelData<L> {
    pub label: L,
    pub exclude: Option<CompiledRegex>,
    pub versions: CompiledParser<()>,
}

impl<L> LabelData<L> {
    pub fn excluded(&self, lowered: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|re| re.is_match(lowered))
    }
}

/// One device-class pattern; `exclude` vetoes a match.
pub(crate) struct ClassData {
    pub exclude: Option<CompiledRegex>,
}

impl ClassData {
    pub fn excluded(&self, lowered: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|re| re.is_match(lowered))
    }
}

pub(crate) struct VendorData {
    pub vendor: String,
    pub model: Option<ModelData>,
}

pub(crate) struct ModelData {
    pub regex: CompiledRegex,
    pub template: String,
}
