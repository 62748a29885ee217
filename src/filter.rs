//! Ignore-rule filter.
//!
//! Loads glob patterns from one ignore file at the repository root and answers
//! whether a path is excluded from analysis. This is a best-effort approximation
//! of gitignore semantics, not a compliant implementation:
//!
//! - globs follow shell `fnmatch` rules (`*` may cross `/`, `?`, `[...]`)
//! - a pattern matches at any depth unless it starts with `/`
//! - a trailing `/` restricts the pattern to directories
//! - every ancestor directory of a path is tested with the same rules
//! - negation (`!pattern`) and backslash escapes are not supported

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// One normalized line of the ignore file.
#[derive(Debug, Clone)]
struct IgnoreRule {
    pattern: String,
    dir_only: bool,
    anchored: bool,
    exact: GlobMatcher,
    anywhere: GlobMatcher,
}

impl IgnoreRule {
    /// Normalize one ignore-file line. Blank lines, comments, negations and
    /// invalid globs yield `None`.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if line.starts_with('!') {
            debug!(pattern = line, "negated ignore patterns are not supported, skipping");
            return None;
        }

        let (body, dir_only) = match line.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (line, false),
        };
        let (body, anchored) = match body.strip_prefix('/') {
            Some(stripped) => (stripped, true),
            None => (body, false),
        };
        if body.is_empty() {
            return None;
        }

        let exact = compile(body)?;
        let anywhere = compile(&format!("**/{body}"))?;
        Some(Self {
            pattern: body.to_string(),
            dir_only,
            anchored,
            exact,
            anywhere,
        })
    }

    fn matches(&self, rel: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.exact.is_match(rel) || (!self.anchored && self.anywhere.is_match(rel))
    }
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            warn!(pattern, error = %e, "invalid ignore pattern, skipping");
            None
        }
    }
}

/// Path predicate built once per repository root.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    root: PathBuf,
    rules: Vec<IgnoreRule>,
    exclude_dirs: Vec<String>,
}

impl IgnoreFilter {
    /// Load rules from `root/ignore_file`. A missing file yields an empty rule set.
    pub fn load(root: &Path, ignore_file: &str, exclude_dirs: &[String]) -> Self {
        let ignore_path = root.join(ignore_file);
        let contents = match std::fs::read_to_string(&ignore_path) {
            Ok(contents) => {
                info!(file = %ignore_path.display(), "loaded ignore rules");
                contents
            }
            Err(_) => {
                info!(file = %ignore_path.display(), "no ignore file found, all files will be included");
                String::new()
            }
        };
        Self::from_patterns(root, &contents, exclude_dirs)
    }

    /// Build a filter from ignore-file contents.
    pub fn from_patterns(root: &Path, contents: &str, exclude_dirs: &[String]) -> Self {
        let rules: Vec<IgnoreRule> = contents.lines().filter_map(IgnoreRule::parse).collect();
        debug!(rules = rules.len(), "ignore rules compiled");
        Self {
            root: root.to_path_buf(),
            rules,
            exclude_dirs: exclude_dirs.to_vec(),
        }
    }

    /// The patterns in load order, without their trailing or leading `/`.
    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// Whether `path` is excluded. Directory-only rules consult the filesystem
    /// to decide whether `path` itself is a directory.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let absolute = self.absolute(path);
        let is_dir = absolute.is_dir();
        self.is_ignored(&absolute, is_dir)
    }

    /// Whether `path` is excluded, with the caller stating whether it is a directory.
    ///
    /// Relative paths are taken relative to the root. Paths outside the root are
    /// never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let absolute = self.absolute(path);
        let Ok(rel) = absolute.strip_prefix(&self.root) else {
            return false;
        };
        // `..` can climb back out of the root
        if rel.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }

        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        self.segments_ignored(&segments, is_dir, true)
    }

    /// Whether a root-relative, `/`-separated path is excluded.
    pub fn is_ignored_relative(&self, rel: &str, is_dir: bool) -> bool {
        match relative_segments(rel) {
            Some(segments) => self.segments_ignored(&segments, is_dir, true),
            None => false,
        }
    }

    /// Like [`is_ignored_relative`](Self::is_ignored_relative), but consults
    /// only the ignore-file rules. The built-in directory exclusions prune the
    /// walk; they say nothing about module names such as `venv`.
    pub fn rules_match_relative(&self, rel: &str, is_dir: bool) -> bool {
        match relative_segments(rel) {
            Some(segments) => self.segments_ignored(&segments, is_dir, false),
            None => false,
        }
    }

    fn segments_ignored(&self, segments: &[String], is_dir: bool, exclude_dirs: bool) -> bool {
        // The root itself is never ignored
        if segments.is_empty() {
            return false;
        }

        let last = segments.len() - 1;
        let mut prefix = String::new();
        for (i, segment) in segments.iter().enumerate() {
            let segment_is_dir = i < last || is_dir;
            if exclude_dirs && segment_is_dir && self.exclude_dirs.iter().any(|d| d == segment) {
                return true;
            }

            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);

            if self.rules.iter().any(|r| r.matches(&prefix, segment_is_dir)) {
                return true;
            }
        }
        false
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Split a root-relative path into segments, or `None` if it leaves the root.
fn relative_segments(rel: &str) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    for segment in rel.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            other => segments.push(other.to_string()),
        }
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn filter(contents: &str) -> IgnoreFilter {
        IgnoreFilter::from_patterns(Path::new("/repo"), contents, &[])
    }

    #[test]
    fn test_missing_ignore_file_ignores_nothing() {
        let dir = tempdir().unwrap();
        let f = IgnoreFilter::load(dir.path(), ".gitignore", &[]);
        assert!(f.patterns().is_empty());
        assert!(!f.should_ignore(&dir.path().join("a.py")));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let f = filter("# comment\n\n   \n*.pyc\n# another\n");
        assert_eq!(f.patterns(), vec!["*.pyc"]);
    }

    #[test]
    fn test_trailing_separator_stripped() {
        let f = filter("build/\n");
        assert_eq!(f.patterns(), vec!["build"]);
    }

    #[test]
    fn test_exact_relative_match() {
        let f = filter("b.py\n");
        assert!(f.is_ignored_relative("b.py", false));
        assert!(!f.is_ignored_relative("a.py", false));
    }

    #[test]
    fn test_pattern_matches_at_any_depth() {
        let f = filter("b.py\n");
        assert!(f.is_ignored_relative("pkg/sub/b.py", false));
        assert!(!f.is_ignored_relative("pkg/sub/bb.py", false));
    }

    #[test]
    fn test_wildcard_crosses_separators() {
        let f = filter("*.pyc\n");
        assert!(f.is_ignored_relative("a.pyc", false));
        assert!(f.is_ignored_relative("pkg/deep/a.pyc", false));
        assert!(!f.is_ignored_relative("pkg/a.py", false));
    }

    #[test]
    fn test_directory_pattern_excludes_everything_below_at_any_depth() {
        let f = filter("build/\n");
        assert!(f.is_ignored_relative("build", true));
        assert!(f.is_ignored_relative("build/x.py", false));
        assert!(f.is_ignored_relative("src/build/deep/x.py", false));
        assert!(!f.is_ignored_relative("builder.py", false));
        assert!(!f.is_ignored_relative("src/rebuild/x.py", false));
    }

    #[test]
    fn test_directory_only_pattern_skips_plain_files() {
        let f = filter("build/\n");
        assert!(!f.is_ignored_relative("build", false));
        assert!(!f.is_ignored_relative("src/build", false));
    }

    #[test]
    fn test_anchored_pattern_only_matches_at_root() {
        let f = filter("/docs\n");
        assert!(f.is_ignored_relative("docs/conf.py", false));
        assert!(!f.is_ignored_relative("pkg/docs/conf.py", false));
    }

    #[test]
    fn test_negation_not_supported() {
        let f = filter("*.py\n!keep.py\n");
        assert_eq!(f.patterns(), vec!["*.py"]);
        assert!(f.is_ignored_relative("keep.py", false));
    }

    #[test]
    fn test_path_outside_root_never_ignored() {
        let f = filter("*\n");
        assert!(!f.is_ignored(Path::new("/elsewhere/a.py"), false));
        assert!(f.is_ignored(Path::new("/repo/a.py"), false));
    }

    #[test]
    fn test_parent_dir_escape_never_ignored() {
        let f = filter("secret.py\n");
        assert!(!f.is_ignored(Path::new("/repo/../secret.py"), false));
        assert!(!f.is_ignored(Path::new("../secret.py"), false));
        assert!(!f.should_ignore(Path::new("../secret.py")));
        assert!(!f.is_ignored_relative("../secret.py", false));
        assert!(!f.is_ignored_relative("pkg/../../secret.py", false));
        // Still ignored once it stays inside
        assert!(f.is_ignored_relative("pkg/secret.py", false));
    }

    #[test]
    fn test_rules_match_skips_builtin_excludes() {
        let f = IgnoreFilter::from_patterns(
            Path::new("/repo"),
            "build/\n",
            &["venv".to_string()],
        );
        assert!(f.is_ignored_relative("venv", true));
        assert!(!f.rules_match_relative("venv", true));
        assert!(f.rules_match_relative("build", true));
        assert!(!f.rules_match_relative("../build", true));
    }

    #[test]
    fn test_relative_path_resolved_against_root() {
        let f = filter("secret.py\n");
        assert!(f.is_ignored(Path::new("secret.py"), false));
        assert!(f.is_ignored(Path::new("/repo/pkg/secret.py"), false));
    }

    #[test]
    fn test_root_is_never_ignored() {
        let f = filter("*\n");
        assert!(!f.is_ignored(Path::new("/repo"), true));
    }

    #[test]
    fn test_exclude_dirs_prune_by_name() {
        let excludes = vec!["venv".to_string(), ".git".to_string()];
        let f = IgnoreFilter::from_patterns(Path::new("/repo"), "", &excludes);
        assert!(f.is_ignored_relative("venv/lib/site.py", false));
        assert!(f.is_ignored_relative("pkg/.git", true));
        assert!(!f.is_ignored_relative("venv.py", false));
    }

    #[test]
    fn test_should_ignore_uses_filesystem_for_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("build")).unwrap();
        std::fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();

        let f = IgnoreFilter::load(dir.path(), ".gitignore", &[]);
        assert!(f.should_ignore(&dir.path().join("build")));
        assert!(f.should_ignore(&dir.path().join("build/gen.py")));
        assert!(!f.should_ignore(&dir.path().join("main.py")));
    }
}
