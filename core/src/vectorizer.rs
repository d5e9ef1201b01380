use crate::error::{Error, Result};
use crate::index::{Index, Posting, SparseVector, TermId, TermWeight, Vocabulary};
use crate::tokenizer::{tokenize, ENGLISH_STOP_WORDS};
use std::collections::{HashMap, HashSet};

/// Document-frequency bound, either relative to the corpus size or absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocFrequency {
    Fraction(f64),
    Count(usize),
}

impl DocFrequency {
    fn resolve(self, num_docs: usize) -> f64 {
        match self {
            DocFrequency::Fraction(f) => f * num_docs as f64,
            DocFrequency::Count(c) => c as f64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VectorizerConfig {
    pub stop_words: &'static HashSet<&'static str>,
    /// Terms in more documents than this are dropped.
    pub max_df: DocFrequency,
    /// Terms in fewer documents than this are dropped.
    pub min_df: DocFrequency,
    /// Keep at most this many terms, the most frequent across the corpus first.
    pub max_features: Option<usize>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            stop_words: &*ENGLISH_STOP_WORDS,
            max_df: DocFrequency::Fraction(1.0),
            min_df: DocFrequency::Fraction(0.001),
            max_features: Some(1000),
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("max_df", self.max_df), ("min_df", self.min_df)] {
            if let DocFrequency::Fraction(f) = bound {
                if !(0.0..=1.0).contains(&f) {
                    return Err(Error::InvalidConfig(format!("{name} fraction {f} is outside [0, 1]")));
                }
            }
        }
        if self.max_features == Some(0) {
            return Err(Error::InvalidConfig("max_features must be positive".into()));
        }
        Ok(())
    }

    fn doc_count_bounds(&self, num_docs: usize) -> Result<(f64, f64)> {
        let min_count = self.min_df.resolve(num_docs);
        let max_count = self.max_df.resolve(num_docs);
        if max_count < min_count {
            return Err(Error::InvalidConfig("max_df corresponds to fewer documents than min_df".into()));
        }
        Ok((min_count, max_count))
    }
}

struct TermStats {
    df: u32,
    total: u64,
}

/// Fit the vocabulary and IDF weights on `documents` and vectorize every document.
pub fn build_index(documents: Vec<String>, config: &VectorizerConfig) -> Result<Index> {
    config.validate()?;
    if documents.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let n = documents.len();
    let (min_count, max_count) = config.doc_count_bounds(n)?;

    // Tokenize and count term frequencies per document
    let mut doc_counts: Vec<HashMap<String, u32>> = Vec::with_capacity(n);
    let mut stats: HashMap<String, TermStats> = HashMap::new();
    for doc in &documents {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in tokenize(doc, config.stop_words) {
            *counts.entry(term).or_insert(0) += 1;
        }
        for (term, tf) in counts.iter() {
            let s = stats.entry(term.clone()).or_insert(TermStats { df: 0, total: 0 });
            s.df += 1;
            s.total += *tf as u64;
        }
        doc_counts.push(counts);
    }
    if stats.is_empty() {
        return Err(Error::EmptyVocabulary("perhaps the documents only contain stop words".into()));
    }

    let seen = stats.len();
    let mut kept: Vec<(String, TermStats)> = stats
        .into_iter()
        .filter(|(_, s)| (s.df as f64) >= min_count && (s.df as f64) <= max_count)
        .collect();
    if kept.is_empty() {
        return Err(Error::EmptyVocabulary("no terms remain after pruning; try a lower min_df or a higher max_df".into()));
    }
    if let Some(limit) = config.max_features {
        if kept.len() > limit {
            kept.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(limit);
        }
    }
    kept.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::info!(num_docs = n, seen_terms = seen, num_terms = kept.len(), "vocabulary built");

    let mut vocabulary = Vocabulary::default();
    for (tid, (term, s)) in kept.into_iter().enumerate() {
        let idf = ((1.0 + n as f64) / (1.0 + s.df as f64)).ln() + 1.0;
        vocabulary.dictionary.insert(term.clone(), tid as TermId);
        vocabulary.terms.push(term);
        vocabulary.df.push(s.df);
        vocabulary.idf.push(idf);
    }

    let mut vectors = Vec::with_capacity(n);
    let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); vocabulary.len()];
    for (doc_id, counts) in doc_counts.into_iter().enumerate() {
        let raw = counts
            .into_iter()
            .filter_map(|(term, tf)| {
                let term_id = vocabulary.term_id(&term)?;
                let weight = tf as f64 * vocabulary.idf[term_id as usize];
                Some(TermWeight { term_id, weight })
            })
            .collect();
        let vector = SparseVector::normalized(raw);
        for e in &vector.entries {
            postings[e.term_id as usize].push(Posting { doc_id: doc_id as u32, weight: e.weight });
        }
        vectors.push(vector);
    }

    Ok(Index { documents, vocabulary, vectors, postings, stop_words: config.stop_words })
}
