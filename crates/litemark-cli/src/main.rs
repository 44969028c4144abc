//! `litemark`: convert Markdown to HTML from the command line.
//!
//! Manual argv parsing in the style of `markdown-neuraxis-cli::main` (no
//! clap dependency — the surface here is three small modes and doesn't earn
//! one). Directory scanning follows
//! `markdown-neuraxis-engine::io::scan_markdown_files`'s recursive-walk
//! idiom, generalized to write converted output alongside (or under a
//! separate `--out` directory).

use anyhow::{Context, Result, bail};
use litemark_config::Config;
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, warn};

enum Mode {
    Convert {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    Batch {
        source_dir: PathBuf,
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let mode = parse_args(&args[1..])?;

    match mode {
        Mode::Convert { input, output } => convert_one(input.as_deref(), output.as_deref()),
        Mode::Batch {
            source_dir,
            output_dir,
        } => convert_batch(&source_dir, output_dir.as_deref()),
    }
}

fn parse_args(args: &[String]) -> Result<Mode> {
    let mut batch_dir: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut input: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--batch" => {
                i += 1;
                let dir = args
                    .get(i)
                    .context("--batch requires a directory argument")?;
                batch_dir = Some(PathBuf::from(dir));
            }
            "--out" => {
                i += 1;
                let path = args.get(i).context("--out requires a path argument")?;
                out = Some(PathBuf::from(path));
            }
            other if !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            other => bail!("unrecognized argument: {other}"),
        }
        i += 1;
    }

    if let Some(source_dir) = batch_dir {
        return Ok(Mode::Batch {
            source_dir,
            output_dir: out,
        });
    }

    if input.is_none() {
        if let Some(config) = Config::load().context("failed to load config file")? {
            debug!(source_dir = %config.source_dir.display(), "no input given, using batch defaults from config");
            return Ok(Mode::Batch {
                source_dir: config.source_dir,
                output_dir: out.or(config.output_dir),
            });
        }
    }

    Ok(Mode::Convert { input, output: out })
}

fn convert_one(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let source = match input {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            debug!("reading markdown from stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let html = litemark_core::parse_markdown(&source);

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote converted HTML");
        }
        None => {
            std::io::stdout()
                .write_all(html.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn convert_batch(source_dir: &Path, output_dir: Option<&Path>) -> Result<()> {
    let files = scan_markdown_files(source_dir)
        .with_context(|| format!("failed to scan {}", source_dir.display()))?;

    if files.is_empty() {
        warn!(dir = %source_dir.display(), "no .md files found");
    }

    for file in &files {
        let source = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let html = litemark_core::parse_markdown(&source);

        let dest = match output_dir {
            Some(out_dir) => {
                let relative = file
                    .strip_prefix(source_dir)
                    .unwrap_or(file.as_path())
                    .with_extension("html");
                out_dir.join(relative)
            }
            None => file.with_extension("html"),
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&dest, &html).with_context(|| format!("failed to write {}", dest.display()))?;
        info!(src = %file.display(), dest = %dest.display(), "converted");
    }

    Ok(())
}

/// Recursively collects every `.md` file under `dir`, sorted for
/// deterministic batch output.
fn scan_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!("directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    scan_directory_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }

    Ok(())
}
