use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use search_core::{paginate, DocId, Document, DocumentStatus, RequestQueue, SearchServer, MIN_IN_DAY};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search-console")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Corpus {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, env = "SEARCH_STOP_WORDS", default_value = "")]
    stop_words: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries given as arguments, or one per stdin line when none are given
    Search {
        #[command(flatten)]
        corpus: Corpus,
        /// Results printed per page
        #[arg(long, env = "SEARCH_PAGE_SIZE", default_value_t = 2)]
        page_size: usize,
        /// Number of recent requests tracked for the no-result count
        #[arg(long, env = "SEARCH_REQUEST_WINDOW", default_value_t = MIN_IN_DAY)]
        window: usize,
        /// Only return documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Print each result list as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
        queries: Vec<String>,
    },
    /// Show which query terms one document matches
    Match {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        id: DocId,
        query: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, page_size, window, status, json, queries } => {
            let server = build_server(&corpus)?;
            let queries = if queries.is_empty() { read_queries(io::stdin().lock())? } else { queries };
            run_search(&server, &queries, status.into(), page_size, window, json)
        }
        Commands::Match { corpus, id, query } => {
            let server = build_server(&corpus)?;
            let (words, status) = server.match_document(&query, id)?;
            println!("{{ document_id = {id}, status = {status:?}, words = [{}] }}", words.join(", "));
            Ok(())
        }
    }
}

fn build_server(corpus: &Corpus) -> Result<SearchServer> {
    let mut server: SearchServer = corpus.stop_words.parse().context("invalid stop words")?;
    let mut skipped = 0usize;
    for file in collect_files(&corpus.input) {
        for doc in load_documents(&file)? {
            if let Err(e) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
                tracing::warn!(document_id = doc.id, file = %file.display(), error = %e, "skipping document");
                skipped += 1;
            }
        }
    }
    tracing::info!(documents = server.document_count(), skipped, "loaded documents");
    Ok(server)
}

fn collect_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn load_documents(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), n + 1))?;
            docs.push(doc);
        }
        return Ok(docs);
    }
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

fn read_queries<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            queries.push(line);
        }
    }
    Ok(queries)
}

fn run_search(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    page_size: usize,
    window: usize,
    json: bool,
) -> Result<()> {
    let mut queue = RequestQueue::with_capacity(server, window);
    for query in queries {
        match queue.add_find_request_by_status(query, status) {
            Ok(found) if json => println!("{}", serde_json::to_string(&found)?),
            Ok(found) => print_pages(query, &found, page_size),
            Err(e) => println!("Error: {e}"),
        }
    }
    println!("No-result requests: {}", queue.no_result_request_count());
    Ok(())
}

fn print_pages(query: &str, found: &[Document], page_size: usize) {
    println!("Results for \"{query}\":");
    for (n, page) in paginate(found, page_size).pages().enumerate() {
        println!("Page {}", n + 1);
        println!("{page}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_json_array_object_and_jsonl() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id": 1, "text": "curly cat", "ratings": [1, 2]}, {"id": 2, "text": "big dog", "status": "banned"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), r#"{"id": 3, "text": "sparrow"}"#).unwrap();
        fs::write(dir.path().join("c.jsonl"), "{\"id\": 4, \"text\": \"fancy collar\"}\n\n{\"id\": 5, \"text\": \"white tail\"}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(files.len(), 3);
        let docs: Vec<InputDoc> = files.iter().flat_map(|f| load_documents(f).unwrap()).collect();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(docs[1].status, DocumentStatus::Banned);
        assert_eq!(docs[0].ratings, vec![1, 2]);
        assert!(docs[2].ratings.is_empty());
    }

    #[test]
    fn build_server_skips_rejected_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs.jsonl");
        fs::write(
            &path,
            "{\"id\": 1, \"text\": \"curly cat and tail\"}\n{\"id\": 1, \"text\": \"duplicate\"}\n{\"id\": -3, \"text\": \"negative\"}\n",
        )
        .unwrap();
        let corpus = Corpus { input: path, stop_words: "and".into() };
        let server = build_server(&corpus).unwrap();
        assert_eq!(server.document_count(), 1);
        let (words, _) = server.match_document("and curly", 1).unwrap();
        assert_eq!(words, vec!["curly"]);
    }

    #[test]
    fn invalid_stop_words_fail() {
        let dir = tempdir().unwrap();
        let corpus = Corpus { input: dir.path().to_path_buf(), stop_words: "a\tb".into() };
        assert!(build_server(&corpus).is_err());
    }

    #[test]
    fn reads_non_empty_query_lines() {
        let input = "curly cat\n\n  \n-dog big\n";
        let queries = read_queries(input.as_bytes()).unwrap();
        assert_eq!(queries, vec!["curly cat", "-dog big"]);
    }

    #[test]
    fn cli_parses_search_arguments() {
        let cli = Cli::try_parse_from([
            "search-console", "search", "--input", "docs.json", "--stop-words", "and in", "--page-size", "3", "--status",
            "banned", "cat",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { corpus, page_size, window, status, queries, .. } => {
                assert_eq!(corpus.stop_words, "and in");
                assert_eq!(page_size, 3);
                assert_eq!(window, MIN_IN_DAY);
                assert_eq!(DocumentStatus::from(status), DocumentStatus::Banned);
                assert_eq!(queries, vec!["cat"]);
            }
            Commands::Match { .. } => panic!("expected search"),
        }
    }
}
