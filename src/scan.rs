//! Template discovery under a source root.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    /// File extensions without the leading dot.
    pub extensions: &'a [String],
    pub verbose: bool,
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matching template paths, sorted.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    for dir in dirs_to_scan(base_dir, options) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if options.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && has_extension(path, options.extensions) {
                files.insert(path_str.into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn dirs_to_scan(base_dir: &Path, options: &ScanOptions<'_>) -> Vec<PathBuf> {
    if options.includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in options.includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                paths.push(path);
            } else if options.verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn extensions() -> Vec<String> {
        vec!["njk".to_string(), "html".to_string()]
    }

    fn scan(dir: &Path, includes: &[String], ignores: &[String]) -> ScanResult {
        let extensions = extensions();
        scan_files(
            dir,
            &ScanOptions {
                includes,
                ignores,
                extensions: &extensions,
                verbose: false,
            },
        )
    }

    #[test]
    fn test_scan_template_files() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("page.njk")).unwrap();
        File::create(dir.path().join("layout.html")).unwrap();
        File::create(dir.path().join("style.css")).unwrap();
        File::create(dir.path().join("njk")).unwrap();

        let result = scan(dir.path(), &[], &[]);

        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().any(|f| f.ends_with("page.njk")));
        assert!(result.files.iter().any(|f| f.ends_with("layout.html")));
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_ignores_glob() {
        let dir = tempdir().unwrap();
        let node_modules = dir.path().join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("lib.njk")).unwrap();
        File::create(dir.path().join("page.njk")).unwrap();

        let result = scan(dir.path(), &[], &["**/node_modules/**".to_owned()]);

        assert_eq!(result.files.len(), 1);
        assert!(!result.files.iter().any(|f| f.contains("node_modules")));
    }

    #[test]
    fn test_scan_ignores_literal_path() {
        let dir = tempdir().unwrap();
        let vendor = dir.path().join("vendor");
        fs::create_dir(&vendor).unwrap();
        File::create(vendor.join("lib.njk")).unwrap();
        File::create(dir.path().join("page.njk")).unwrap();

        let result = scan(dir.path(), &[], &["vendor".to_owned()]);

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().all(|f| f.ends_with("page.njk")));
    }

    #[test]
    fn test_scan_includes_only_listed_dirs() {
        let dir = tempdir().unwrap();
        let views = dir.path().join("views").join("partials");
        fs::create_dir_all(&views).unwrap();
        File::create(views.join("nav.njk")).unwrap();
        File::create(dir.path().join("root.njk")).unwrap();

        let result = scan(dir.path(), &["views".to_owned()], &[]);

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().all(|f| f.ends_with("nav.njk")));
    }

    #[test]
    fn test_scan_includes_glob_dirs() {
        let dir = tempdir().unwrap();
        for name in ["admin", "shop"] {
            let sub = dir.path().join("apps").join(name);
            fs::create_dir_all(&sub).unwrap();
            File::create(sub.join("index.njk")).unwrap();
        }
        File::create(dir.path().join("root.njk")).unwrap();

        let result = scan(dir.path(), &["apps/*".to_owned()], &[]);

        assert_eq!(result.files.len(), 2);
        assert!(!result.files.iter().any(|f| f.ends_with("root.njk")));
    }

    #[test]
    fn test_missing_include_is_skipped() {
        let dir = tempdir().unwrap();
        let result = scan(dir.path(), &["missing".to_owned()], &[]);
        assert!(result.files.is_empty());
    }
}
