use anyhow::{bail, Context, Result};
use docsift_core::{highlight, snippet, clean_text, ScoredResult, SNIPPET_CHARS};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Smallest and largest number of results a search may ask for.
pub const TOP_N_RANGE: (usize, usize) = (1, 10);

/// One extracted document: where it came from and its raw text.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub path: PathBuf,
    pub text: String,
}

/// Collect plain-text documents from a file or directory. Directories are walked
/// recursively and sorted by path so document indices are stable between runs.
pub fn load_documents(input: &Path) -> Result<Vec<SourceDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && is_text_file(p) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        docs.push(SourceDoc { path, text });
    }
    tracing::info!(num_docs = docs.len(), input = %input.display(), "loaded documents");
    Ok(docs)
}

fn is_text_file(p: &Path) -> bool {
    matches!(p.extension().and_then(|s| s.to_str()), Some("txt" | "md"))
}

pub fn clamp_top_n(top_n: usize) -> usize {
    top_n.clamp(TOP_N_RANGE.0, TOP_N_RANGE.1)
}

#[derive(Debug, Serialize)]
pub struct ReportHit {
    pub rank: usize,
    pub doc_id: u32,
    pub source: String,
    pub score: f32,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub query: String,
    pub top_n: usize,
    pub num_docs: usize,
    pub results: Vec<ReportHit>,
}

impl Report {
    pub fn new(query: &str, top_n: usize, docs: &[SourceDoc], results: &[ScoredResult<'_>], full: bool) -> Self {
        let results = results
            .iter()
            .enumerate()
            .map(|(i, r)| ReportHit {
                rank: i + 1,
                doc_id: r.doc_id,
                source: docs
                    .get(r.doc_id as usize)
                    .map(|d| d.path.display().to_string())
                    .unwrap_or_default(),
                score: r.score,
                snippet: highlight(&snippet(r.text, SNIPPET_CHARS), query),
                full_text: full.then(|| highlight(&clean_text(r.text), query)),
            })
            .collect();
        Self { query: query.to_string(), top_n, num_docs: docs.len(), results }
    }

    /// Markdown rendering for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "## Top {} results for your query '{}':", self.top_n, self.query);
        if self.results.is_empty() {
            let _ = writeln!(out, "\nNo relevant results found. Try adjusting your query.");
            return out;
        }
        for hit in &self.results {
            let _ = writeln!(out, "\n### Result {}", hit.rank);
            let _ = writeln!(out, "**Source:** {}", hit.source);
            let _ = writeln!(out, "**Relevance Score:** {:.4}", hit.score);
            let _ = writeln!(out, "\n{}", hit.snippet);
            if let Some(full) = &hit.full_text {
                let _ = writeln!(out, "\n#### Full Document\n\n{}", full);
            }
        }
        out
    }
}
