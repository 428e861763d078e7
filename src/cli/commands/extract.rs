use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use tracing::debug;

use super::super::args::{ExtractCommand, OutputFormat};
use super::super::exit_status::ExitStatus;
use crate::{
    catalog::Catalog,
    config::{Config, load_config},
    extract::Extractor,
    issues::{Issue, ReadErrorIssue},
    keywords::{KeywordDefinition, KeywordSpec, RawKeywordSpec},
    reporter,
    scan::{ScanOptions, scan_files},
};

/// Outcome of extracting every template under a source root.
#[derive(Debug, Default)]
pub struct ExtractRun {
    /// Catalog per template, keyed by path relative to the source root.
    pub catalogs: BTreeMap<String, Catalog>,
    pub issues: Vec<Issue>,
    pub skipped_count: usize,
}

/// Resolved inputs of one extraction run.
pub struct ExtractContext {
    pub source_root: PathBuf,
    pub config: Config,
    pub keywords: KeywordSpec,
    pub verbose: bool,
}

impl ExtractContext {
    /// Load config starting from `source_root` (or the configured root) and
    /// lay the command-line keywords over the configured ones.
    pub fn new(
        source_root: Option<&Path>,
        extra_keywords: &[KeywordDefinition],
        verbose: bool,
    ) -> Result<Self> {
        let start_dir = source_root.unwrap_or(Path::new("."));
        let loaded = load_config(start_dir)?;
        let config = loaded.config;
        debug!(from_file = loaded.from_file, "configuration loaded");

        let source_root = match source_root {
            Some(root) => root.to_path_buf(),
            None => PathBuf::from(&config.source_root),
        };

        let mut keywords = config.keyword_spec()?;
        let overlay: RawKeywordSpec = extra_keywords
            .iter()
            .map(|def| (def.name.clone(), def.spec.clone()))
            .collect();
        keywords
            .overlay(&overlay)
            .context("Invalid --keyword definition")?;

        Ok(Self {
            source_root,
            config,
            keywords,
            verbose,
        })
    }

    pub fn run(&self) -> ExtractRun {
        let scan = scan_files(
            &self.source_root,
            &ScanOptions {
                includes: &self.config.includes,
                ignores: &self.config.ignores,
                extensions: &self.config.extensions,
                verbose: self.verbose,
            },
        );
        debug!(files = scan.files.len(), root = %self.source_root.display(), "templates found");

        let extractor = Extractor::from_keyword_spec(self.keywords.clone());
        let results: Vec<(String, Result<Catalog, Issue>)> = scan
            .files
            .par_iter()
            .map(|path| {
                let display = self.display_path(path);
                let result = extract_file(&extractor, path, &display);
                (display, result)
            })
            .collect();

        let mut run = ExtractRun {
            skipped_count: scan.skipped_count,
            ..ExtractRun::default()
        };
        for (path, result) in results {
            match result {
                Ok(catalog) => {
                    run.catalogs.insert(path, catalog);
                }
                Err(issue) => run.issues.push(issue),
            }
        }
        run.issues.sort();
        run
    }

    fn display_path(&self, path: &str) -> String {
        let path = Path::new(path);
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

fn extract_file(extractor: &Extractor, path: &str, display: &str) -> Result<Catalog, Issue> {
    let source = fs::read_to_string(path).map_err(|err| {
        Issue::from(ReadErrorIssue {
            file_path: display.to_string(),
            error: err.to_string(),
        })
    })?;
    extractor.parse(&source).map_err(|err| {
        let file = display;
        debug!(file, error = %err, "extraction failed");
        Issue::from_error(display, &source, &err)
    })
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let verbose = args.common.verbose;
    let ctx = ExtractContext::new(args.common.source_root.as_deref(), &args.keywords, verbose)?;
    let run = ctx.run();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&run.catalogs)
                .context("Failed to serialize catalogs")?;
            match &args.output {
                Some(path) => fs::write(path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => writeln!(io::stdout().lock(), "{json}")?,
            }
        }
        OutputFormat::Summary => reporter::print_summary_to(&run.catalogs, &mut io::stdout().lock()),
    }

    if run.catalogs.is_empty() && run.issues.is_empty() {
        eprintln!(
            "{} no templates found under {}",
            "warning:".bold().yellow(),
            ctx.source_root.display()
        );
    }
    reporter::print_skipped_warning(run.skipped_count, verbose);
    reporter::report(&run.issues);

    Ok(ExitStatus::from_problem_count(run.issues.len()))
}
