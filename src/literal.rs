use regex_syntax::{hir::literal::Extractor, parse};

/// Extract prefix literals from a regex pattern for the Aho-Corasick
/// prefilter. Every match of `pattern` starts with one of the returned
/// literals (compared ASCII case-insensitively).
///
/// Returns an empty vec when no usable set exists, meaning the rule must be
/// tried on every input. That happens when the pattern cannot be parsed by
/// `regex_syntax` (look-around), when the literal set is unbounded, or when
/// any literal is shorter than `min_len`: dropping a single short literal
/// would make the prefilter skip inputs the pattern actually matches.
pub(crate) fn extract_literals(pattern: &str, min_len: usize) -> Vec<String> {
    let hir = match parse(pattern) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };

    let mut extractor = Extractor::new();
    extractor.kind(regex_syntax::hir::literal::ExtractKind::Prefix);

    let seq = extractor.extract(&hir);
    let Some(literals) = seq.literals() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        let Ok(s) = std::str::from_utf8(lit.as_bytes()) else {
            return Vec::new();
        };
        if s.len() < min_len {
            return Vec::new();
        }
        let s = s.to_ascii_lowercase();
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}
