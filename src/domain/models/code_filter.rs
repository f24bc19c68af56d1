#[cfg(test)]
#[path = "code_filter_test.rs"]
mod tests;

use super::StatusCode;

/// The shapes of filter a user can type in the search box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeFilter {
    /// `203`
    Exact(u16),
    /// `2xx`
    Hundreds(String),
    /// `20x`
    Tens(String),
}

impl CodeFilter {
    /// Anything that isn't exactly three characters of one of the known
    /// shapes is rejected. Input is not trimmed.
    pub fn parse(text: &str) -> Option<CodeFilter> {
        let chars = text.chars().collect::<Vec<char>>();
        if chars.len() != 3 {
            return None;
        }

        let is_digit = |idx: usize| return chars[idx].is_ascii_digit();
        let is_wildcard = |idx: usize| return chars[idx] == 'x';

        if is_digit(0) && is_digit(1) && is_digit(2) {
            return text.parse::<u16>().ok().map(CodeFilter::Exact);
        }

        if is_digit(0) && is_wildcard(1) && is_wildcard(2) {
            return Some(CodeFilter::Hundreds(chars[0].to_string()));
        }

        if is_digit(0) && is_digit(1) && is_wildcard(2) {
            return Some(CodeFilter::Tens(chars[..2].iter().collect()));
        }

        return None;
    }

    pub fn matches(&self, code: &StatusCode) -> bool {
        return match self {
            CodeFilter::Exact(exact) => code.0 == *exact,
            CodeFilter::Hundreds(prefix) | CodeFilter::Tens(prefix) => {
                code.to_string().starts_with(prefix.as_str())
            }
        };
    }
}

/// Resolves a filter against the reference set. Unknown shapes and codes
/// without a picture both resolve to nothing.
pub fn match_codes(filter: &str) -> Vec<StatusCode> {
    let Some(code_filter) = CodeFilter::parse(filter) else {
        return vec![];
    };

    return StatusCode::reference()
        .into_iter()
        .filter(|code| return code_filter.matches(code))
        .collect();
}
