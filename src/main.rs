use clap::{Args, Parser, Subcommand};
use htmldata::parser::positions::char_span;
use htmldata::{
    ContentType, Node, Options, RawTextElements, extract_simplified_with, find_urls_with,
    resolve_urls, serialize_with, tokenize_with,
};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "htmldata")]
#[command(about = "htmldata - lossless HTML tokenizing and URL rewriting")]
struct Cli {
    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParseArgs {
    /// Treat <pre> bodies as raw text, like <script> and <style>
    #[arg(long, global = true)]
    raw_pre: bool,

    /// Percent-decode attribute values (and encode them when rendering)
    #[arg(long, global = true)]
    decode_values: bool,
}

impl ParseArgs {
    fn options(&self) -> Options {
        Options {
            raw_text: if self.raw_pre {
                RawTextElements::ScriptStylePre
            } else {
                RawTextElements::ScriptStyle
            },
            decode_values: self.decode_values,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token list as JSON
    Tokens { file: PathBuf },

    /// Print the tag list as JSON
    Tags { file: PathBuf },

    /// Print the document with lowercased tags and sorted, quoted attributes
    Normalize { file: PathBuf },

    /// Render a JSON tag list back to HTML
    Render {
        /// JSON file as printed by `tags`
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,

        /// Read the tag list from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// List URL references as JSON lines
    Urls {
        /// HTML/CSS file or directory
        path: PathBuf,

        /// Resolve every URL against this base
        #[arg(long)]
        base: Option<String>,

        /// Read files as CSS regardless of extension
        #[arg(long)]
        css: bool,
    },

    /// Rewrite every URL to its absolute form
    Rebase {
        file: PathBuf,

        #[arg(long)]
        base: String,

        /// Read the file as CSS regardless of extension
        #[arg(long)]
        css: bool,

        /// Overwrite the file instead of printing the result
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.parse.options();

    match cli.command {
        Commands::Tokens { file } => {
            let source = read_file(&file);
            print_json(&tokenize_with(&source, &options));
        }
        Commands::Tags { file } => {
            let source = read_file(&file);
            print_json(&extract_simplified_with(&source, &options));
        }
        Commands::Normalize { file } => {
            let source = read_file(&file);
            print!("{}", serialize_with(&extract_simplified_with(&source, &options), &options));
        }
        Commands::Render { file, stdin } => {
            let json = if stdin {
                let mut json = String::new();
                if let Err(e) = io::stdin().read_to_string(&mut json) {
                    fail(&format!("Failed to read stdin: {}", e));
                }
                json
            } else if let Some(path) = file {
                read_file(&path)
            } else {
                fail("provide a JSON file or use --stdin");
            };
            let nodes: Vec<Node> = match serde_json::from_str(&json) {
                Ok(nodes) => nodes,
                Err(e) => fail(&format!("Invalid tag list: {}", e)),
            };
            print!("{}", serialize_with(&nodes, &options));
        }
        Commands::Urls { path, base, css } => list_urls(&path, base.as_deref(), css, &options),
        Commands::Rebase { file, base, css, write } => {
            let source = read_file(&file);
            let content_type = content_type(&file, css);
            let output = match resolve_urls(&source, &base, content_type, &options) {
                Ok(output) => output,
                Err(e) => fail(&format!("{}: {}", file.display(), e)),
            };
            if write {
                if let Err(e) = fs::write(&file, &output) {
                    fail(&format!("Failed to write {}: {}", file.display(), e));
                }
                print_done(&file.display().to_string());
            } else {
                print!("{}", output);
            }
        }
    }
}

fn list_urls(path: &Path, base: Option<&str>, css: bool, options: &Options) {
    if path.is_file() {
        urls_in_file(path, base, css, options);
    } else if path.is_dir() {
        let start = Instant::now();
        let mut file_count = 0;
        for entry in WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| is_document(e.path()))
        {
            urls_in_file(entry.path(), base, css, options);
            file_count += 1;
        }
        if file_count == 0 {
            fail(&format!("No .html, .htm or .css files found in {}", path.display()));
        }
        print_summary(file_count, start.elapsed());
    } else {
        fail(&format!("{} does not exist", path.display()));
    }
}

fn urls_in_file(path: &Path, base: Option<&str>, css: bool, options: &Options) {
    let source = read_file(path);
    let matches = match find_urls_with(&source, base, content_type(path, css), options) {
        Ok(matches) => matches,
        Err(e) => fail(&format!("{}: {}", path.display(), e)),
    };
    for m in &matches {
        let line = serde_json::json!({
            "file": path.display().to_string(),
            "span": m.span,
            "char_span": char_span(&source, m.span),
            "raw": m.raw(&source),
            "url": m.url,
            "source": m.source,
        });
        println!("{}", line);
    }
}

fn content_type(path: &Path, css: bool) -> ContentType {
    if css {
        ContentType::Css
    } else {
        ContentType::from_path(path)
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "html" | "htm" | "css"))
}

fn read_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => fail(&format!("Failed to read {}: {}", path.display(), e)),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Failed to serialize: {}", e)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn print_done(path: &str) {
    if io::stderr().is_terminal() {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path);
    } else {
        eprintln!("  ✓ {}", path);
    }
}

fn print_summary(count: usize, elapsed: std::time::Duration) {
    let time_str = format_duration(elapsed);
    let files_word = if count == 1 { "file" } else { "files" };

    if io::stderr().is_terminal() {
        eprintln!("\n\x1b[1mScanned {} {} in {}\x1b[0m", count, files_word, time_str);
    } else {
        eprintln!("\nScanned {} {} in {}", count, files_word, time_str);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
