use std::collections::HashMap;

/// Keywords of this many characters or fewer are treated as noise.
const MAX_NOISE_CHARS: usize = 3;

pub fn normalize_keywords(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| token.chars().count() > MAX_NOISE_CHARS)
}

#[derive(Debug, Default)]
pub struct KeywordCounts {
    counts: Vec<(String, usize)>,
    index_by_keyword: HashMap<String, usize>,
}

impl KeywordCounts {
    pub fn add(&mut self, keyword: String) {
        if let Some(&index) = self.index_by_keyword.get(&keyword) {
            self.counts[index].1 += 1;
            return;
        }

        self.index_by_keyword.insert(keyword.clone(), self.counts.len());
        self.counts.push((keyword, 1));
    }

    pub fn count(&self, keyword: &str) -> usize {
        self.index_by_keyword
            .get(keyword)
            .map_or(0, |&index| self.counts[index].1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `limit` most frequent keywords; ties keep first-occurrence order.
    pub fn top(&self, limit: usize) -> Vec<String> {
        let mut ranked = self.counts.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_trimmed_lowercased_and_filtered() {
        let tokens = normalize_keywords(" Microgravity ,ISS, bone,  , T-Cells").collect::<Vec<_>>();
        assert_eq!(tokens, ["microgravity", "bone", "t-cells"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let tokens = normalize_keywords("épée, ñu").collect::<Vec<_>>();
        assert_eq!(tokens, ["épée"]);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let mut counts = KeywordCounts::default();
        for keyword in ["heart", "bone", "mice", "bone", "heart", "cells"] {
            counts.add(keyword.to_owned());
        }

        assert_eq!(counts.count("heart"), 2);
        assert_eq!(counts.count("absent"), 0);
        assert_eq!(counts.top(3), ["heart", "bone", "mice"]);
        assert_eq!(counts.top(10).len(), 4);
    }
}
