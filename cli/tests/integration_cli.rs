use clap::Parser;
use search_cli::{collect_input_files, load_documents, run, Args};
use search_core::SearchServer;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_corpus(dir: &Path) {
    let lines = [
        r#"{"id": 1, "text": "funny pet and nasty rat", "ratings": [7, 2, 7]}"#,
        r#"{"id": 2, "text": "funny pet with curly hair", "ratings": [1, 2, 3]}"#,
        r#"{"id": 3, "text": "funny pet with curly hair\n", "ratings": [1, 2]}"#,
        r#"{"id": 4, "text": "big dog cat Vladislav", "status": "banned", "ratings": [1, 3, 2]}"#,
    ];
    fs::write(dir.join("docs.jsonl"), lines.join("\n")).unwrap();
    fs::write(dir.join("more.json"), r#"[{"id": 5, "text": "big dog hamster Borya", "ratings": [1, 1, 1]}]"#).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();
}

fn run_to_string(argv: &[&str]) -> String {
    let args = Args::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    run(&args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn loads_json_and_jsonl_from_directory() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    assert_eq!(collect_input_files(dir.path()).len(), 2);

    let mut server = SearchServer::with_stop_words_text("and with").unwrap();
    assert_eq!(load_documents(&mut server, dir.path()).unwrap(), 5);
    assert_eq!(server.document(3).unwrap().text, "funny pet with curly hair");
}

#[test]
fn prints_pages_and_duplicates() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().to_string_lossy().to_string();
    let out = run_to_string(&["search-cli", "--input", &input, "--stop-words", "and with", "--dedupe", "--query", "curly dog"]);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Found duplicate document id 3");
    assert_eq!(lines[1], "Results for request: curly dog");
    assert!(lines[2].starts_with("{ document_id = 2, relevance = "));
    assert!(lines[2].contains("{ document_id = 5, relevance = "));
    assert_eq!(lines[3], "Page break");
    assert_eq!(lines.len(), 4);
}

#[test]
fn filters_by_status_and_prints_json() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let input = dir.path().join("docs.jsonl").to_string_lossy().to_string();
    let out = run_to_string(&["search-cli", "--input", &input, "--status", "banned", "--parallel", "--json", "--query", "dog"]);
    let json: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(json["query"], "dog");
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 4);
}

#[test]
fn joined_batch_reads_queries_file() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let queries = dir.path().join("queries.txt");
    fs::write(&queries, "curly\n\nhamster\n").unwrap();
    let input = dir.path().to_string_lossy().to_string();
    let queries = queries.to_string_lossy().to_string();
    let out = run_to_string(&["search-cli", "--input", &input, "--queries-file", &queries, "--joined", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<i64> = json.as_array().unwrap().iter().map(|d| d["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3, 5]);
}

#[test]
fn reports_invalid_documents() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.jsonl"), r#"{"id": -1, "text": "cat"}"#).unwrap();
    let input = dir.path().to_string_lossy().to_string();
    let args = Args::try_parse_from(["search-cli", "--input", input.as_str()]).unwrap();
    let err = run(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("invalid document id -1"));
}

#[test]
fn joined_rejects_status_and_parallel() {
    for extra in [["--status", "banned"].as_slice(), ["--parallel"].as_slice()] {
        let mut argv = vec!["search-cli", "--input", "docs", "--joined"];
        argv.extend_from_slice(extra);
        let err = Args::try_parse_from(argv).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
    assert!(Args::try_parse_from(["search-cli", "--input", "docs", "--joined", "--json"]).is_ok());
}

#[test]
fn rejects_json_scalar_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scalar.json");
    fs::write(&path, "42").unwrap();
    let err = search_cli::read_documents(&path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("scalar.json"), "{msg}");
    assert!(msg.contains("found 42"), "{msg}");
}
