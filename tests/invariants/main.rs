//! Properties that hold for every fixture document.
//!
//! One trial per (fixture, property), so a failure names both.
//!
//! Run with: cargo test --test invariants

use glob::glob;
use htmldata::{
    ContentType, Options, PositionedNode, RawTextElements, UrlEdits, apply_url_edits,
    extract_positioned_with, extract_simplified_with, find_urls_with, patch, serialize_with,
    tokenize_with,
};
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};

type Property = fn(&str, ContentType, &Options) -> Result<(), Failed>;

const PROPERTIES: &[(&str, Property)] = &[
    ("tokens_concatenate", tokens_concatenate),
    ("normalize_fixed_point", normalize_fixed_point),
    ("noop_patch_identity", noop_patch_identity),
    ("attribute_offsets", attribute_offsets),
];

fn main() {
    let args = Arguments::from_args();

    let configurations = [
        ("default", Options::default()),
        (
            "historical",
            Options {
                raw_text: RawTextElements::ScriptStylePre,
                decode_values: true,
            },
        ),
    ];

    let mut trials = Vec::new();
    for path in fixtures() {
        let stem = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("fixture")
            .to_string();
        let content_type = ContentType::from_path(&path);

        for &(config, options) in &configurations {
            for &(property, check) in PROPERTIES {
                let path = path.clone();
                trials.push(Trial::test(
                    format!("{}::{}::{}", stem, config, property),
                    move || {
                        let source = fs::read_to_string(&path)
                            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
                        check(&source, content_type, &options)
                    },
                ));
            }
        }
    }

    libtest_mimic::run(&args, trials).exit();
}

fn fixtures() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let mut files = Vec::new();
    for pattern in ["*.html", "*.css"] {
        let pattern = root.join(pattern);
        let Ok(paths) = glob(&pattern.to_string_lossy()) else {
            continue;
        };
        files.extend(
            paths
                .filter_map(Result::ok)
                .filter(|p| !p.to_string_lossy().contains(".expected.")),
        );
    }
    files.sort();
    files
}

fn tokens_concatenate(source: &str, _: ContentType, options: &Options) -> Result<(), Failed> {
    let tokens = tokenize_with(source, options);
    let joined: String = tokens.iter().map(|t| t.text).collect();
    if joined != source {
        return Err("tokens do not concatenate to the source".into());
    }

    let mut pos = 0;
    for token in &tokens {
        if token.span.start != pos || token.span.end < pos {
            return Err(format!("token {:?} does not continue at {}", token, pos).into());
        }
        pos = token.span.end;
    }
    Ok(())
}

fn normalize_fixed_point(source: &str, content_type: ContentType, options: &Options) -> Result<(), Failed> {
    if content_type != ContentType::Html {
        return Ok(());
    }
    let once = serialize_with(&extract_simplified_with(source, options), options);
    let twice = serialize_with(&extract_simplified_with(&once, options), options);
    if once != twice {
        return Err(format!("not a fixed point:\n{}\n---\n{}", once, twice).into());
    }
    Ok(())
}

fn noop_patch_identity(source: &str, content_type: ContentType, options: &Options) -> Result<(), Failed> {
    let empty: [&str; 0] = [];
    if patch(source, &[], &empty)? != source {
        return Err("empty patch changed the document".into());
    }

    let matches = find_urls_with(source, None, content_type, options)?;
    let unchanged = apply_url_edits(source, &matches, &UrlEdits::new())?;
    if unchanged != source {
        return Err("writing back unmodified matches changed the document".into());
    }
    Ok(())
}

fn attribute_offsets(source: &str, _: ContentType, options: &Options) -> Result<(), Failed> {
    for node in extract_positioned_with(source, options) {
        if source.get(node.span().start..node.span().end).is_none() {
            return Err(format!("node span {:?} is not a slice of the source", node.span()).into());
        }
        let PositionedNode::Tag(tag) = node else {
            continue;
        };
        for (key, value) in &tag.attributes {
            let Some(key_span) = tag.key_span(key) else {
                return Err(format!("<{}> has no span for {}", tag.name, key).into());
            };
            let key_text = source.get(key_span.start..key_span.end).unwrap_or("");
            if key_text.to_lowercase() != *key {
                return Err(format!("<{}> key span reads {:?}, not {:?}", tag.name, key_text, key).into());
            }
            if let Some(value) = value.as_str() {
                let value_span = tag.value_span(key).unwrap_or_default();
                let value_text = source.get(value_span.start..value_span.end);
                if value_text != Some(value) {
                    return Err(format!(
                        "<{}> {} value span reads {:?}, not {:?}",
                        tag.name, key, value_text, value
                    )
                    .into());
                }
            }
        }
    }
    Ok(())
}
