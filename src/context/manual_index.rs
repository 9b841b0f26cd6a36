//! Paragraph index over a plain-text maintenance manual.
//!
//! The manual is split on blank lines; each paragraph is one retrievable
//! chunk. Paragraphs are ranked by how many distinct query terms they
//! contain.

use std::collections::HashSet;
use std::path::Path;

use super::knowledge_store::ManualLookup;
use super::tokenize;

struct Paragraph {
    text: String,
    terms: HashSet<String>,
}

/// Keyword index over manual paragraphs
pub struct ManualIndex {
    paragraphs: Vec<Paragraph>,
    max_results: usize,
}

impl ManualIndex {
    pub fn load(path: &Path, max_results: usize) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text, max_results))
    }

    pub fn from_text(text: &str, max_results: usize) -> Self {
        let paragraphs = split_paragraphs(text)
            .into_iter()
            .map(|text| Paragraph {
                terms: tokenize(&text).into_iter().collect(),
                text,
            })
            .collect();
        Self {
            paragraphs,
            max_results,
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Split on blank lines, trimming each chunk and dropping empty ones.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

impl ManualLookup for ManualIndex {
    fn search(&self, query: &str) -> Vec<String> {
        let query_terms: HashSet<String> = tokenize(query).into_iter().collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Paragraph)> = self
            .paragraphs
            .iter()
            .map(|p| (query_terms.intersection(&p.terms).count(), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, p)| p.text.clone())
            .collect()
    }

    fn store_name(&self) -> &'static str {
        "ManualIndex"
    }

    fn is_healthy(&self) -> bool {
        !self.paragraphs.is_empty()
    }
}
