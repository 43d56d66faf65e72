//! Keyword highlighting
//!
//! Substring-free keyword scanning over the buffer text: each pass drops
//! all previous spans and retags every exact word-boundary occurrence of a
//! keyword with its registered color. Matching is case-sensitive and does
//! not understand comments or string literals, so a keyword inside either
//! is tagged like any other occurrence. That is the contract, not a gap to
//! patch here.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use anteater_core::lang;

/// File-type bucket that selects a keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    AntSource,
    CLibrarySource,
}

impl Classification {
    /// Resolve from the file extension alone. Unrecognized extensions get
    /// no highlighting.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext == lang::SOURCE_EXTENSION => Some(Self::AntSource),
            Some(ext) if ext == lang::C_LIBRARY_EXTENSION => Some(Self::CLibrarySource),
            _ => None,
        }
    }

    fn keyword_colors(&self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            Self::AntSource => &ANT_KEYWORDS,
            Self::CLibrarySource => &C_KEYWORDS,
        }
    }

    fn keyword_pattern(&self) -> &'static Regex {
        match self {
            Self::AntSource => &ANT_PATTERN,
            Self::CLibrarySource => &C_PATTERN,
        }
    }
}

/// A colored range of buffer text, in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub color: &'static str,
}

/// Recompute the highlight set for a buffer.
///
/// Linear scan: find the next word-boundary keyword occurrence, tag its
/// exact range with the registered color, continue from the match end.
/// Running this twice on unchanged text yields the same spans.
pub fn rehighlight(text: &str, classification: Classification) -> Vec<HighlightSpan> {
    let colors = classification.keyword_colors();
    let pattern = classification.keyword_pattern();

    let mut spans = Vec::new();
    for found in pattern.find_iter(text) {
        if let Some(&color) = colors.get(found.as_str()) {
            spans.push(HighlightSpan {
                start: found.start(),
                end: found.end(),
                color,
            });
        }
    }
    spans
}

static ANT_KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("if", "#94558D"),
        ("elif", "#94558D"),
        ("else", "#94558D"),
        ("while", "#A74926"),
        ("for", "#A74926"),
        ("break", "#CC7832"),
        ("continue", "#CC7832"),
        ("return", "#688558"),
        ("void", "#688558"),
        ("true", "#6897BB"),
        ("false", "#6897BB"),
        ("is", "#8888C6"),
        ("none", "#8888C6"),
        ("class", "#C47432"),
        ("function", "#C47432"),
        ("self", "#94558D"),
        ("new", "#A74926"),
        ("pInit", "#CC7832"),
        ("init", "#688558"),
        ("global", "#6897BB"),
        ("or", "#8888C6"),
        ("and", "#C47432"),
        ("not", "#94558D"),
        ("include", "#A74926"),
        ("exception", "#CC7832"),
        ("unrecoverable", "#688558"),
        ("handle", "#6897BB"),
        ("try", "#8888C6"),
        ("raise", "#C47432"),
    ])
});

static C_KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("auto", "#CC7832"),
        ("break", "#CC7832"),
        ("case", "#CC7832"),
        ("char", "#CC7832"),
        ("const", "#CC7832"),
        ("continue", "#CC7832"),
        ("default", "#CC7832"),
        ("do", "#CC7832"),
        ("double", "#CC7832"),
        ("else", "#94558D"),
        ("enum", "#CC7832"),
        ("extern", "#CC7832"),
        ("float", "#CC7832"),
        ("for", "#A74926"),
        ("goto", "#CC7832"),
        ("if", "#94558D"),
        ("inline", "#CC7832"),
        ("int", "#CC7832"),
        ("long", "#CC7832"),
        ("register", "#CC7832"),
        ("restrict", "#CC7832"),
        ("return", "#688558"),
        ("short", "#CC7832"),
        ("signed", "#CC7832"),
        ("sizeof", "#CC7832"),
        ("static", "#CC7832"),
        ("struct", "#C47432"),
        ("switch", "#CC7832"),
        ("typedef", "#CC7832"),
        ("union", "#CC7832"),
        ("unsigned", "#CC7832"),
        ("void", "#688558"),
        ("volatile", "#CC7832"),
        ("while", "#A74926"),
        ("include", "#A74926"),
    ])
});

static ANT_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern(&ANT_KEYWORDS));
static C_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern(&C_KEYWORDS));

/// Word-boundary alternation over a keyword table, longest keyword first.
fn keyword_pattern(table: &HashMap<&'static str, &'static str>) -> Regex {
    let mut words: Vec<&str> = table.keys().copied().collect();
    words.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let pattern = format!(r"\b(?:{})\b", words.join("|"));
    Regex::new(&pattern).expect("keyword alternation is a valid pattern")
}
