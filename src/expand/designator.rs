//! Expansion of a single compound reference designator.

use regex::Regex;
use std::sync::LazyLock;

/// `R12` -> prefix `R`, number `12`.
static DESIGNATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\D*)(\d+)$").ok());

/// Default cap on the number of designators a single numeric range may produce.
pub const DEFAULT_MAX_RANGE_SPAN: usize = 10_000;

/// Tuning for designator expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Ranges wider than this are kept as one literal designator
    pub max_range_span: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_range_span: DEFAULT_MAX_RANGE_SPAN,
        }
    }
}

/// True if `key` may encode more than one designator.
#[must_use]
pub fn is_compound(key: &str) -> bool {
    key.contains([',', '-'])
}

/// Expand `key` into individual designators.
///
/// `"R1,R2"` is a list, `"R1-R3"` and `"L40-41"` are numeric ranges and
/// `"R1-R5A"` is a discrete pair. Anything that cannot be interpreted is
/// kept as a literal, so the result is never empty for a non-blank key.
/// Duplicates are dropped, keeping the first occurrence.
#[must_use]
pub fn expand_designator(key: &str, options: &ExpandOptions) -> Vec<String> {
    let key = key.trim();
    if !is_compound(key) {
        return vec![key.to_string()];
    }

    let mut out: Vec<String> = Vec::new();
    for segment in key.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let expanded = if segment.contains('-') {
            expand_range(segment, options)
        } else {
            vec![segment.to_string()]
        };
        for designator in expanded {
            if !out.contains(&designator) {
                out.push(designator);
            }
        }
    }

    if out.is_empty() {
        out.push(key.to_string());
    }
    out
}

/// Expand one `base-end` segment.
///
/// A non-numeric end makes a discrete pair, unless it is the base's own
/// prefix followed by digits (`R1-R3`), which enumerates like `R1-3`.
fn expand_range(segment: &str, options: &ExpandOptions) -> Vec<String> {
    let literal = || vec![segment.to_string()];

    let parts: Vec<&str> = segment.split('-').map(str::trim).collect();
    let [base, end] = parts.as_slice() else {
        return literal();
    };
    if base.is_empty() || end.is_empty() {
        return literal();
    }

    let caps = DESIGNATOR.as_ref().and_then(|re| re.captures(base));
    let prefix = caps.as_ref().and_then(|c| c.get(1)).map_or("", |m| m.as_str());
    let base_num = caps.as_ref().and_then(|c| c.get(2)).map(|m| m.as_str());

    let end_num = if is_digits(end) {
        *end
    } else {
        match (base_num, end.strip_prefix(prefix)) {
            (Some(_), Some(rest)) if !prefix.is_empty() && is_digits(rest) => rest,
            _ => return vec![(*base).to_string(), (*end).to_string()],
        }
    };

    let Some(base_num) = base_num else {
        return literal();
    };
    let (Ok(start), Ok(stop)) = (base_num.parse::<u64>(), end_num.parse::<u64>()) else {
        return literal();
    };
    if stop < start {
        return vec![(*base).to_string(), format!("{prefix}{end_num}")];
    }

    let span = (stop - start).saturating_add(1);
    if span > options.max_range_span as u64 {
        tracing::warn!(
            segment,
            span,
            max = options.max_range_span,
            "Designator range exceeds the maximum span, keeping it as one designator"
        );
        return literal();
    }

    (start..=stop).map(|i| format!("{prefix}{i}")).collect()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
