use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use docsift_core::{build_index, search, validate_query, DocFrequency, Error, Index, TermId, VectorizerConfig};
use docsift_cli::{clamp_top_n, load_documents, Report};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Rank a set of text documents against a query with TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct VectorizerArgs {
    /// Maximum vocabulary size
    #[arg(long, default_value_t = 1000)]
    max_features: usize,
    /// Drop terms found in fewer than this fraction of documents
    #[arg(long, default_value_t = 0.001)]
    min_df: f64,
    /// Drop terms found in more than this fraction of documents
    #[arg(long, default_value_t = 1.0)]
    max_df: f64,
}

impl VectorizerArgs {
    fn config(&self) -> VectorizerConfig {
        VectorizerConfig {
            max_features: Some(self.max_features),
            min_df: DocFrequency::Fraction(self.min_df),
            max_df: DocFrequency::Fraction(self.max_df),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the documents under a path
    Search {
        /// Input path (.txt/.md file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Search query
        #[arg(long)]
        query: String,
        /// Number of top results to display (1-10)
        #[arg(long, default_value_t = 5)]
        top_n: usize,
        /// Also print the full highlighted text of each result
        #[arg(long, default_value_t = false)]
        full: bool,
        /// Print a JSON report instead of markdown
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        vectorizer: VectorizerArgs,
    },
    /// Print the vocabulary fitted on the documents under a path
    Vocab {
        /// Input path (.txt/.md file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Number of terms to list
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[command(flatten)]
        vectorizer: VectorizerArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, top_n, full, json, vectorizer } => {
            if validate_query(&query).is_err() {
                bail!("Please enter a search query.");
            }
            let docs = load_documents(&input)?;
            let index = open_index(docs.iter().map(|d| d.text.clone()).collect(), &vectorizer.config())?;
            let top_n = clamp_top_n(top_n);
            let results = search(&index, &query, top_n);
            let report = Report::new(&query, top_n, &docs, &results, full);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
            Ok(())
        }
        Commands::Vocab { input, limit, vectorizer } => {
            let docs = load_documents(&input)?;
            let index = open_index(docs.into_iter().map(|d| d.text).collect(), &vectorizer.config())?;
            let vocab = index.vocabulary();
            println!("documents: {}  terms: {}", index.num_docs(), vocab.len());
            for tid in (0..vocab.len() as TermId).take(limit) {
                let (Some(term), Some(idf)) = (vocab.term(tid), vocab.idf(tid)) else { continue };
                println!("{:>6}  {:<24} df={:<4} idf={:.4}", tid, term, vocab.df[tid as usize], idf);
            }
            Ok(())
        }
    }
}

fn open_index(texts: Vec<String>, config: &VectorizerConfig) -> Result<Index> {
    match build_index(texts, config) {
        Ok(index) => Ok(index),
        Err(Error::EmptyCorpus) => bail!("No text extracted from the uploaded documents."),
        Err(e) => bail!("Error processing documents: {e}"),
    }
}
