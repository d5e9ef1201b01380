use serde::Serialize;
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f64, // normalized tf-idf weight
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermWeight {
    pub term_id: TermId,
    pub weight: f64,
}

/// Sparse tf-idf vector, entries sorted by `term_id`. Features not listed are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    pub entries: Vec<TermWeight>,
}

impl SparseVector {
    /// Builds a unit-length vector from raw `(term, weight)` pairs. If every weight is
    /// zero the result is empty.
    pub(crate) fn normalized(mut entries: Vec<TermWeight>) -> Self {
        entries.retain(|e| e.weight > 0.0);
        entries.sort_by_key(|e| e.term_id);
        let norm = entries.iter().map(|e| e.weight * e.weight).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        for e in entries.iter_mut() {
            e.weight /= norm;
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn weight(&self, term_id: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term_id, |e| e.term_id)
            .map(|i| self.entries[i].weight)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|e| e.weight * e.weight).sum::<f64>().sqrt()
    }

    /// Dot product of two sparse vectors; merges the sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0f64);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, b) = (self.entries[i], other.entries[j]);
            match a.term_id.cmp(&b.term_id) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += a.weight * b.weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// Terms kept for one corpus build. Feature ids follow lexicographic term order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Vocabulary {
    pub dictionary: HashMap<String, TermId>,
    pub terms: Vec<String>,
    pub df: Vec<u32>,
    pub idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn idf(&self, term_id: TermId) -> Option<f64> {
        self.idf.get(term_id as usize).copied()
    }

    pub fn term(&self, term_id: TermId) -> Option<&str> {
        self.terms.get(term_id as usize).map(String::as_str)
    }
}

/// Fitted vector space for one document set. Built once by
/// [`build_index`](crate::build_index) and read-only afterwards; searches borrow it.
#[derive(Debug, Clone)]
pub struct Index {
    pub(crate) documents: Vec<String>,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) vectors: Vec<SparseVector>,
    pub(crate) postings: Vec<Vec<Posting>>, // indexed by term id, sorted by doc_id
    pub(crate) stop_words: &'static std::collections::HashSet<&'static str>,
}

impl Index {
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn document(&self, doc_id: DocId) -> Option<&str> {
        self.documents.get(doc_id as usize).map(String::as_str)
    }

    pub fn document_vector(&self, doc_id: DocId) -> Option<&SparseVector> {
        self.vectors.get(doc_id as usize)
    }

    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }
}
