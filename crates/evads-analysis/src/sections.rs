//! Extraction of `**Label:** content` sections from annotation text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Matches the opening `**Label:**` marker. The body is everything up to the
/// next `**` or end of input.
static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+):\*\*").expect("valid section label regex"));

const MARKER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: String,
    pub content: String,
}

/// Sections in first-appearance order. A repeated label overwrites the
/// earlier content in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sections(Vec<Section>);

impl Sections {
    fn insert(&mut self, label: &str, content: String) {
        match self.0.iter_mut().find(|s| s.label == label) {
            Some(existing) => existing.content = content,
            None => self.0.push(Section {
                label: label.to_string(),
                content,
            }),
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.content.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }
}

impl IntoIterator for Sections {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parses every `**Label:** content` pair in `text`.
///
/// Labels and contents are trimmed, and whitespace runs inside the content
/// collapse to single spaces. Pairs where either side ends up empty are
/// dropped, as are markers that never close with `:**`. Never fails; text
/// without markers yields an empty set.
#[must_use]
pub fn parse_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut cursor = 0;

    while let Some(caps) = LABEL_RE.captures_at(text, cursor) {
        let (Some(marker), Some(label)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let body_start = marker.end();
        let body_end = text[body_start..]
            .find(MARKER)
            .map_or(text.len(), |offset| body_start + offset);

        let label = label.as_str().trim();
        let content = collapse_whitespace(&text[body_start..body_end]);
        if !label.is_empty() && !content.is_empty() {
            sections.insert(label, content);
        }

        cursor = body_end;
    }

    sections
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
