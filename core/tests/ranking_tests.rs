use docsift_core::{build_index, highlight, search, DocId, Error, VectorizerConfig};
use proptest::prelude::*;

fn corpus(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn cat_query_end_to_end() {
    let index = build_index(corpus(&["the cat sat on the mat", "dogs run in the park"]), &VectorizerConfig::default()).unwrap();
    let results = search(&index, "cat", 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, 0);
    assert!(results[0].score > 0.0);
    assert_eq!(highlight("cat sat", "cat"), "**cat** sat");
}

#[test]
fn stop_word_document_fails() {
    let err = build_index(corpus(&["it is what it is"]), &VectorizerConfig::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyVocabulary(_)));
    assert!(err.to_string().starts_with("empty vocabulary"));
}

#[test]
fn shared_term_gives_positive_scores() {
    let index = build_index(corpus(&["rust compiler errors", "rust async runtime", "gardening tips"]), &VectorizerConfig::default()).unwrap();
    let results = search(&index, "rust", 3);
    assert_eq!(results.len(), 3);
    assert!(results[0].score > 0.0 && results[1].score > 0.0);
    assert_eq!(results[2].doc_id, 2);
    assert_eq!(results[2].score, 0.0);
    assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
}

#[test]
fn own_terms_rank_above_unrelated() {
    let docs = corpus(&[
        "quantum entanglement photons experiment",
        "medieval castles knights siege",
        "sourdough bread starter flour",
    ]);
    let index = build_index(docs, &VectorizerConfig::default()).unwrap();
    let results = search(&index, "castles knights siege", 3);
    assert_eq!(results[0].doc_id, 1);
    assert!(results[0].score > results[1].score);
}

#[test]
fn rarer_terms_dominate() {
    let docs = corpus(&["report budget report", "report travel", "report meeting"]);
    let index = build_index(docs, &VectorizerConfig::default()).unwrap();
    let results = search(&index, "report travel", 3);
    assert_eq!(results[0].doc_id, 1);
}

#[test]
fn results_borrow_original_text() {
    let raw = "Invoice #42: \\textbf{paid} in full.";
    let index = build_index(corpus(&[raw, "unrelated words"]), &VectorizerConfig::default()).unwrap();
    let results = search(&index, "invoice", 1);
    assert_eq!(results[0].text, raw);
}

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "apple", "banana", "cherry", "delta", "echo", "falcon", "granite", "harbor", "island", "jungle",
    ])
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..10).prop_map(|w| w.join(" "))
}

proptest! {
    /// Property: result length is min(top_n, N)
    #[test]
    fn prop_len_is_min_of_top_n_and_docs(docs in prop::collection::vec(document(), 1..8), query in document(), top_n in 1usize..=10) {
        let n = docs.len();
        let index = build_index(docs, &VectorizerConfig::default()).unwrap();
        let results = search(&index, &query, top_n);
        prop_assert_eq!(results.len(), top_n.min(n));
    }

    /// Property: scores are in [0, 1], non-increasing, ties in document order
    #[test]
    fn prop_sorted_and_stable(docs in prop::collection::vec(document(), 1..8), query in document()) {
        let index = build_index(docs, &VectorizerConfig::default()).unwrap();
        let results = search(&index, &query, 10);
        for r in &results {
            prop_assert!((0.0..=1.0).contains(&r.score));
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].doc_id < pair[1].doc_id);
            }
        }
        let mut ids: Vec<DocId> = results.iter().map(|r| r.doc_id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len());
    }

    /// Property: highlighting with an absent query leaves text untouched
    #[test]
    fn prop_highlight_absent_query_is_identity(text in "[a-z ]{0,40}") {
        prop_assert_eq!(highlight(&text, "XYZ!"), text);
    }
}
