use crate::error::{Error, Result};
use crate::index::{DocId, Index};
use serde::Serialize;

/// Scores are compared at a resolution of one millionth.
const SCORE_SCALE: f64 = 1e6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    pub doc_id: DocId,
    pub text: &'a str,
    /// Cosine similarity in `[0, 1]`.
    pub score: f32,
}

/// Rejects blank queries. Returns the trimmed query.
pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidQuery);
    }
    Ok(trimmed)
}

/// Rank every document of `index` against `query` by cosine similarity and return
/// the best `top_n`. Equal scores keep document order, so the result is fully
/// deterministic. Documents sharing no term with the query score 0 and still
/// fill the result when `top_n` asks for them.
pub fn search<'a>(index: &'a Index, query: &str, top_n: usize) -> Vec<ScoredResult<'a>> {
    let q = index.project_query(query);

    // Both sides are unit length, so the dot product is the cosine
    let mut scores = vec![0.0f64; index.num_docs()];
    for tw in &q.vector().entries {
        for p in index.postings(tw.term_id) {
            scores[p.doc_id as usize] += p.weight * tw.weight;
        }
    }
    tracing::debug!(query, ?scores, "cosine similarity scores");

    // Rank on scores rounded to SCORE_SCALE so rounding noise between documents
    // with equal cosine cannot reorder them
    let mut scored: Vec<(DocId, i64)> = scores
        .into_iter()
        .enumerate()
        .map(|(doc_id, s)| (doc_id as DocId, (s.clamp(0.0, 1.0) * SCORE_SCALE).round() as i64))
        .collect();
    // sort_by is stable: ties stay in doc_id order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(top_n)
        .map(|(doc_id, key)| ScoredResult {
            doc_id,
            text: &index.documents[doc_id as usize],
            score: (key as f64 / SCORE_SCALE) as f32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_index, VectorizerConfig};

    fn index(texts: &[&str]) -> Index {
        build_index(texts.iter().map(|s| s.to_string()).collect(), &VectorizerConfig::default()).unwrap()
    }

    #[test]
    fn best_match_first() {
        let idx = index(&["the cat sat on the mat", "dogs run in the park"]);
        let results = search(&idx, "cat", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, 0);
        assert!(results[0].score > 0.0);
        assert_eq!(results[0].text, "the cat sat on the mat");
    }

    #[test]
    fn identical_document_scores_one() {
        let idx = index(&["rust borrow checker", "python garbage collector"]);
        let results = search(&idx, "rust borrow checker", 2);
        assert!((results[0].score - 1.0).abs() < 1e-5);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn ties_keep_document_order() {
        let idx = index(&["alpha beta", "gamma delta", "alpha beta", "epsilon"]);
        let results = search(&idx, "alpha", 4);
        let ids: Vec<DocId> = results.iter().map(|r| r.doc_id).collect();
        assert_eq!(ids, vec![0, 2, 1, 3]);
    }

    #[test]
    fn scaled_duplicate_ties_keep_document_order() {
        let base = "alpha beta beta gamma";
        for k in [21, 23, 35] {
            let scaled = vec![base; k].join(" ");
            let idx = index(&[&scaled, base, "delta alpha"]);
            for query in ["beta", "alpha beta", "gamma"] {
                let results = search(&idx, query, 3);
                assert_eq!(results[0].doc_id, 0, "k={k} query={query}");
                assert_eq!(results[1].doc_id, 1, "k={k} query={query}");
                assert_eq!(results[0].score, results[1].score);
            }
        }
    }

    #[test]
    fn unknown_query_scores_zero_everywhere() {
        let idx = index(&["alpha", "beta"]);
        let results = search(&idx, "zebra", 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(results[0].doc_id, 0);
    }

    #[test]
    fn top_n_truncates() {
        let idx = index(&["alpha", "beta", "gamma"]);
        assert_eq!(search(&idx, "alpha", 2).len(), 2);
        assert_eq!(search(&idx, "alpha", 10).len(), 3);
        assert!(search(&idx, "alpha", 0).is_empty());
    }

    #[test]
    fn blank_query_is_invalid() {
        assert_eq!(validate_query("   "), Err(Error::InvalidQuery));
        assert_eq!(validate_query(""), Err(Error::InvalidQuery));
        assert_eq!(validate_query("  cat "), Ok("cat"));
    }
}
