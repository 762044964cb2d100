use std::sync::LazyLock;

use regex::Regex;

use causeway_core::constants::SYMPTOM_ANALYSIS_HEADING;

static SECTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let heading = regex::escape(SYMPTOM_ANALYSIS_HEADING);
    Regex::new(&format!(r"(?s)({heading}.*?)(?:\n###|\z)")).ok()
});

/// The symptom analysis section of an expansion analysis, heading included.
///
/// `None` when the heading is missing or the section is blank; the anomaly
/// then keeps its current analysis.
pub fn symptom_analysis(analysis: &str) -> Option<String> {
    let Some(section) = SECTION
        .as_ref()
        .and_then(|re| re.captures(analysis))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
    else {
        if !analysis.trim().is_empty() {
            tracing::warn!(
                heading = SYMPTOM_ANALYSIS_HEADING,
                "expansion analysis has no symptom section, keeping the previous analysis"
            );
        }
        return None;
    };
    if section.is_empty() {
        None
    } else {
        Some(section.to_string())
    }
}
