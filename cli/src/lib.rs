use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use search_core::config::DEFAULT_PAGE_SIZE;
use search_core::duplicates::remove_duplicates;
use search_core::paginator::paginate;
use search_core::process_queries::process_queries_joined;
use search_core::{DocumentId, DocumentStatus, ExecutionPolicy, ScoredDocument, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One document as read from JSON / JSONL input.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "search-cli")]
#[command(about = "Index documents in memory and run TF-IDF queries against them", long_about = None)]
pub struct Args {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long)]
    pub input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    pub stop_words: String,
    /// Query to run; may be repeated
    #[arg(long = "query")]
    pub queries: Vec<String>,
    /// File with one query per line
    #[arg(long)]
    pub queries_file: Option<PathBuf>,
    /// Only return documents with this status
    #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
    pub status: StatusArg,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Remove documents with identical word sets before querying
    #[arg(long, default_value_t = false)]
    pub dedupe: bool,
    /// Fan out per-word work inside each query
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
    /// Run all queries as one batch over `Actual` documents and print a single flattened list
    #[arg(long, default_value_t = false, conflicts_with_all = ["status", "parallel"])]
    pub joined: bool,
    /// Print results as JSON instead of pages
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
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

pub fn read_documents(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
            docs.push(doc);
        }
        return Ok(docs);
    }
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    let docs: Vec<InputDoc> = match json {
        serde_json::Value::Array(arr) => arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<_>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        other => bail!("{}: expected a document object or an array of them, found {}", file.display(), other),
    };
    Ok(docs)
}

/// Add every document under `input`. Returns how many were indexed.
pub fn load_documents(server: &mut SearchServer, input: &Path) -> Result<usize> {
    let mut added = 0;
    for file in collect_input_files(input) {
        for doc in read_documents(&file)? {
            let text = doc.text.trim_end_matches(['\r', '\n']);
            server
                .add_document(doc.id, text, doc.status, &doc.ratings)
                .with_context(|| format!("adding document {} from {}", doc.id, file.display()))?;
            added += 1;
        }
    }
    Ok(added)
}

pub fn read_queries(args: &Args) -> Result<Vec<String>> {
    let mut queries = args.queries.clone();
    if let Some(path) = &args.queries_file {
        let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        queries.extend(content.lines().filter(|l| !l.trim().is_empty()).map(str::to_string));
    }
    Ok(queries)
}

pub fn write_pages(out: &mut impl Write, results: &[ScoredDocument], page_size: usize) -> Result<()> {
    for page in paginate(results, page_size) {
        writeln!(out, "{page}")?;
        writeln!(out, "Page break")?;
    }
    Ok(())
}

pub fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let mut server = SearchServer::with_stop_words_text(&args.stop_words)?;
    let added = load_documents(&mut server, &args.input)?;
    tracing::info!(added, input = %args.input.display(), "loaded documents");

    if args.dedupe {
        for id in remove_duplicates(&mut server) {
            writeln!(out, "Found duplicate document id {id}")?;
        }
    }

    let queries = read_queries(args)?;
    let policy = if args.parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };

    if args.joined {
        let results = process_queries_joined(&server, &queries)?;
        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
        } else {
            write_pages(out, &results, args.page_size)?;
        }
        return Ok(());
    }

    let status = DocumentStatus::from(args.status);
    for query in &queries {
        let results = server.find_top_documents_with(policy, query, |_, document_status, _| document_status == status)?;
        if args.json {
            let obj = serde_json::json!({ "query": query, "results": results });
            writeln!(out, "{}", serde_json::to_string(&obj)?)?;
        } else {
            writeln!(out, "Results for request: {query}")?;
            write_pages(out, &results, args.page_size)?;
        }
    }
    Ok(())
}
