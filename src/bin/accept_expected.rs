//! Binary to generate/update .expected.html and .expected.json fixture files
//!
//! Usage:
//!   cargo run --bin accept_expected            # Update all
//!   cargo run --bin accept_expected -- style   # Update only fixtures matching "style"

use htmldata::{ContentType, Options, extract_simplified, find_urls_with, serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Base URL the fixture matches are resolved against
const FIXTURE_BASE: &str = "http://example.com/docs/index.html";

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| is_fixture(e.path()))
    {
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if let Some(ref f) = filter {
            if !path_str.contains(f) {
                skipped += 1;
                continue;
            }
        }

        process_file(path);
        updated += 1;
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn is_fixture(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    !name.contains(".expected.") && (name.ends_with(".html") || name.ends_with(".css"))
}

fn process_file(path: &Path) {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return;
        }
    };

    let content_type = ContentType::from_path(path);

    if content_type == ContentType::Html {
        let expected_html = path.with_extension("expected.html");
        let normalized = serialize(&extract_simplified(&source));
        write(&expected_html, &normalized);
    }

    let matches = match find_urls_with(&source, Some(FIXTURE_BASE), content_type, &Options::default()) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("ERROR: {:?} failed URL extraction: {}", path, e);
            return;
        }
    };
    let summary: Vec<serde_json::Value> = matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "start": m.span.start,
                "end": m.span.end,
                "raw": m.raw(&source),
                "url": m.url,
                "tag": m.tag_name(),
                "attribute": m.tag_attribute_name(),
            })
        })
        .collect();

    let expected_json = path.with_extension("expected.json");
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => write(&expected_json, &(json + "\n")),
        Err(e) => eprintln!("Failed to serialize {:?}: {}", expected_json, e),
    }
}

fn write(path: &Path, contents: &str) {
    if let Err(e) = fs::write(path, contents) {
        eprintln!("Failed to write {:?}: {}", path, e);
    } else {
        println!("  wrote {}", path.display());
    }
}
