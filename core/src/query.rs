use crate::index::{Index, SparseVector, TermId, TermWeight};
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// A query mapped into an index's vector space. Unit length, or empty when none
/// of the query terms are in the vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryVector(pub(crate) SparseVector);

impl QueryVector {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn vector(&self) -> &SparseVector {
        &self.0
    }
}

impl Index {
    /// Project `query` using this index's vocabulary and IDF weights. Unknown terms
    /// are dropped; the vocabulary itself is never touched.
    pub fn project_query(&self, query: &str) -> QueryVector {
        let mut tf_q_raw: HashMap<TermId, u32> = HashMap::new();
        for term in tokenize(query, self.stop_words) {
            if let Some(tid) = self.vocabulary.term_id(&term) {
                *tf_q_raw.entry(tid).or_insert(0) += 1;
            }
        }
        let raw = tf_q_raw
            .into_iter()
            .map(|(term_id, tf)| TermWeight {
                term_id,
                weight: tf as f64 * self.vocabulary.idf[term_id as usize],
            })
            .collect();
        QueryVector(SparseVector::normalized(raw))
    }
}

#[cfg(test)]
mod tests {
    use crate::{build_index, VectorizerConfig};

    #[test]
    fn unknown_terms_are_dropped() {
        let index = build_index(vec!["cat sat".into(), "dog ran".into()], &VectorizerConfig::default()).unwrap();
        let q = index.project_query("cat zebra");
        assert_eq!(q.vector().len(), 1);
        assert!((q.vector().norm() - 1.0).abs() < 1e-6);
        assert_eq!(index.vocabulary().len(), 4);
        assert!(index.vocabulary().term_id("zebra").is_none());
    }

    #[test]
    fn no_known_terms_is_empty() {
        let index = build_index(vec!["cat sat".into()], &VectorizerConfig::default()).unwrap();
        assert!(index.project_query("zebra").is_empty());
        assert!(index.project_query("the of").is_empty());
    }

    #[test]
    fn repeated_terms_weigh_more() {
        let index = build_index(vec!["cat dog".into(), "cat bird".into()], &VectorizerConfig::default()).unwrap();
        let q = index.project_query("dog dog bird");
        let dog = index.vocabulary().term_id("dog").unwrap();
        let bird = index.vocabulary().term_id("bird").unwrap();
        assert!(q.vector().weight(dog) > q.vector().weight(bird));
    }
}
