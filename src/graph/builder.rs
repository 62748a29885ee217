//
//  builder.rs
//  repograph
//

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::engine::DependencyGraph;
use super::types::{NodeData, SourceFile};
use crate::config::AnalysisConfig;
use crate::error::AnalysisWarning;
use crate::parser::{
    CachedImports, ImportCache, ImportExtractor, ModuleSet, ParseError, PythonExtractor,
};
use crate::repository::RepositoryRoot;

/// A built graph plus everything that went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub graph: DependencyGraph,
    pub warnings: Vec<AnalysisWarning>,
}

/// Walks a repository and assembles its dependency graph.
pub struct GraphBuilder<'a> {
    root: &'a RepositoryRoot,
    extractor: &'a dyn ImportExtractor,
    cache: &'a ImportCache,
    include_external: bool,
    parallel: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        root: &'a RepositoryRoot,
        extractor: &'a dyn ImportExtractor,
        cache: &'a ImportCache,
    ) -> Self {
        Self {
            root,
            extractor,
            cache,
            include_external: true,
            parallel: true,
        }
    }

    /// Keep imports that resolve to no discovered file as external nodes.
    pub fn include_external(mut self, include: bool) -> Self {
        self.include_external = include;
        self
    }

    /// Parse files on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Walk, parse and assemble.
    pub fn build(&self) -> BuildOutput {
        let mut warnings = Vec::new();
        let files = self.discover(&mut warnings);
        info!(files = files.len(), root = %self.root.path().display(), "discovered source files");

        let parse = |file: &SourceFile| self.imports_for(file);
        let parsed: Vec<CachedImports> = if self.parallel {
            files.par_iter().map(parse).collect()
        } else {
            files.iter().map(parse).collect()
        };

        let mut graph = DependencyGraph::new();

        // Phase 1: every discovered file is a node, so imports can resolve to it
        for file in &files {
            graph.add_file(file.rel_path.clone(), file.size);
        }

        // Phase 2: edges, one file at a time in path order
        for (file, result) in files.iter().zip(parsed) {
            match result {
                Ok(imports) => self.ingest_imports(&mut graph, file, &imports),
                Err(e) => {
                    debug!(file = %file.rel_path, error = %e, "file contributes no imports");
                    warnings.push(AnalysisWarning::Parse(e));
                }
            }
        }

        let stats = graph.stats();
        debug!(
            nodes = stats.total_nodes,
            edges = stats.total_edges,
            external = stats.external_count,
            "dependency graph assembled"
        );

        BuildOutput { graph, warnings }
    }

    /// Enumerate analyzable files in sorted order, pruning ignored directories.
    fn discover(&self, warnings: &mut Vec<AnalysisWarning>) -> Vec<SourceFile> {
        let filter = self.root.shared_filter();
        let mut walker = WalkBuilder::new(self.root.path());
        walker
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !filter.is_ignored(entry.path(), is_dir)
            });

        let mut files = Vec::new();
        for result in walker.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "walk error");
                    warnings.push(AnalysisWarning::Walk {
                        path: walk_error_path(&e),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if !self.extractor.handles(path) {
                continue;
            }
            let Some(rel_path) = self.root.relative(path) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(SourceFile {
                rel_path,
                abs_path: path.to_path_buf(),
                size,
            });
        }

        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        files
    }

    /// Read and extract one file through the per-run cache.
    fn imports_for(&self, file: &SourceFile) -> CachedImports {
        self.cache.get_or_insert_with(&file.abs_path, || {
            let rel = Path::new(&file.rel_path);
            let source = fs::read_to_string(&file.abs_path).map_err(|e| ParseError::Read {
                path: rel.to_path_buf(),
                message: e.to_string(),
            })?;
            self.extractor.extract(rel, &source).map(Arc::new)
        })
    }

    /// Add the edges for one file's imports.
    fn ingest_imports(
        &self,
        graph: &mut DependencyGraph,
        file: &SourceFile,
        imports: &ModuleSet,
    ) {
        let Some(from) = graph.node_index(&file.rel_path) else {
            return;
        };

        for module in imports {
            if self.target_ignored(module) {
                debug!(file = %file.rel_path, module = %module, "import target ignored, dropping edge");
                continue;
            }

            let to = match resolve_module(graph, module, &file.rel_path) {
                Some(target) => graph.node_index(&target),
                None if self.include_external => Some(graph.add_external(module.clone())),
                None => None,
            };
            if let Some(to) = to {
                graph.add_edge(from, to);
            }
        }
    }

    /// Whether the module, mapped to a root-relative path, matches an
    /// ignore-file rule. Built-in directory exclusions do not apply here.
    fn target_ignored(&self, module: &str) -> bool {
        let candidate = module.replace('.', "/");
        let is_dir = self.root.path().join(&candidate).is_dir();
        self.root.filter().rules_match_relative(&candidate, is_dir)
    }
}

/// Map a module identifier to a discovered file: `a/b.py` or `a/b/__init__.py`,
/// relative to the root first and to the importing file's directory second.
fn resolve_module(graph: &DependencyGraph, module: &str, importer: &str) -> Option<String> {
    let module_path = module.replace('.', "/");
    let mut bases = vec![String::new()];
    if let Some((dir, _)) = importer.rsplit_once('/') {
        bases.push(format!("{dir}/"));
    }

    for base in &bases {
        for candidate in [
            format!("{base}{module_path}.py"),
            format!("{base}{module_path}/__init__.py"),
        ] {
            if graph.node(&candidate).is_some_and(NodeData::is_file) {
                return Some(candidate);
            }
        }
    }
    None
}

fn walk_error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

/// Build a dependency graph for `root` with the Python extractor and a fresh
/// import cache.
pub fn build_graph(root: &RepositoryRoot, config: &AnalysisConfig) -> BuildOutput {
    let extractor = PythonExtractor::new(config.granularity);
    let cache = ImportCache::new();
    GraphBuilder::new(root, &extractor, &cache)
        .include_external(config.include_external)
        .parallel(config.parallel)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Granularity;
    use crate::graph::NodeKind;
    use tempfile::{tempdir, TempDir};

    fn repo(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (path, contents) in files {
            let full = dir.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, contents).unwrap();
        }
        dir
    }

    fn build(dir: &TempDir, config: &AnalysisConfig) -> BuildOutput {
        let root = RepositoryRoot::open(dir.path(), config).unwrap();
        build_graph(&root, config)
    }

    fn edge(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_ignored_file_becomes_external_reference() {
        let dir = repo(&[
            ("a.py", "import b\n"),
            ("b.py", ""),
            (".gitignore", "b.py\n"),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        let graph = &out.graph;

        assert_eq!(graph.node_ids(), vec!["a.py", "b"]);
        assert_eq!(graph.node("a.py").unwrap().kind(), NodeKind::File);
        assert_eq!(graph.node("b").unwrap().kind(), NodeKind::External);
        assert_eq!(graph.edge_list(), vec![edge("a.py", "b")]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_ignored_file_is_never_parsed() {
        let dir = repo(&[("a.py", "import os\n"), ("b.py", "import json\n"), (".gitignore", "b.py\n")]);
        let config = AnalysisConfig::default();
        let root = RepositoryRoot::open(dir.path(), &config).unwrap();
        let extractor = PythonExtractor::default();
        let cache = ImportCache::new();
        let out = GraphBuilder::new(&root, &extractor, &cache).build();

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&root.path().join("b.py")).is_none());
        assert!(!out.graph.contains("json"));
    }

    #[test]
    fn test_broken_file_is_a_node_without_edges() {
        let dir = repo(&[
            ("x.py", "import y\n"),
            ("y.py", "import x\n"),
            ("broken.py", "import os\ndef broken(:\n    return\n"),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        let graph = &out.graph;

        assert_eq!(graph.node_ids(), vec!["broken.py", "x.py", "y.py"]);
        assert_eq!(graph.edge_list(), vec![edge("x.py", "y.py"), edge("y.py", "x.py")]);
        assert_eq!(graph.out_degree("broken.py"), Some(0));

        assert_eq!(out.warnings.len(), 1);
        match &out.warnings[0] {
            AnalysisWarning::Parse(e) => assert_eq!(e.path(), Path::new("broken.py")),
            other => panic!("unexpected warning: {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_file_reported_as_read_failure() {
        let dir = repo(&[("ok.py", "import os\n")]);
        fs::write(dir.path().join("latin.py"), [0x69, 0x6d, 0xff, 0xfe, 0x0a]).unwrap();

        let out = build(&dir, &AnalysisConfig::default());
        assert!(out.graph.node("latin.py").unwrap().is_file());
        assert_eq!(out.graph.out_degree("latin.py"), Some(0));
        assert!(matches!(
            out.warnings.as_slice(),
            [AnalysisWarning::Parse(ParseError::Read { .. })]
        ));
    }

    #[test]
    fn test_file_node_count_with_resolved_imports() {
        let dir = repo(&[
            ("main.py", "import pkg.util\nfrom pkg import core\n"),
            ("pkg/__init__.py", ""),
            ("pkg/util.py", "from pkg.core import thing\n"),
            ("pkg/core.py", ""),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        let stats = out.graph.stats();

        assert_eq!(stats.file_count, 4);
        assert_eq!(stats.external_count, 0);
        assert_eq!(
            out.graph.edge_list(),
            vec![
                edge("main.py", "pkg/__init__.py"),
                edge("main.py", "pkg/util.py"),
                edge("pkg/util.py", "pkg/core.py"),
            ]
        );
    }

    #[test]
    fn test_sibling_import_resolves_relative_to_importer() {
        let dir = repo(&[
            ("app/main.py", "from helpers import run\nfrom .models import User\n"),
            ("app/helpers.py", ""),
            ("app/models.py", ""),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(
            out.graph.edge_list(),
            vec![
                edge("app/main.py", "app/helpers.py"),
                edge("app/main.py", "app/models.py"),
            ]
        );
    }

    #[test]
    fn test_build_directory_excluded_everywhere() {
        let dir = repo(&[
            ("main.py", "import build.gen\nimport src.build.out\nimport os\n"),
            ("build/gen.py", "import json\n"),
            ("src/build/out.py", ""),
            ("src/app.py", ""),
            (".gitignore", "build/\n"),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        let ids = out.graph.node_ids();

        assert!(ids.iter().all(|id| !id.contains("build")), "unexpected nodes: {ids:?}");
        assert_eq!(ids, vec!["main.py", "os", "src/app.py"]);
        assert_eq!(out.graph.edge_list(), vec![edge("main.py", "os")]);
    }

    #[test]
    fn test_self_import_kept() {
        let dir = repo(&[("loop.py", "import loop\n")]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(out.graph.edge_list(), vec![edge("loop.py", "loop.py")]);
    }

    #[test]
    fn test_no_external_drops_unresolved_imports() {
        let dir = repo(&[("a.py", "import os\nimport b\n"), ("b.py", "import sys\n")]);
        let config = AnalysisConfig {
            include_external: false,
            ..AnalysisConfig::default()
        };
        let out = build(&dir, &config);
        assert_eq!(out.graph.node_ids(), vec!["a.py", "b.py"]);
        assert_eq!(out.graph.edge_list(), vec![edge("a.py", "b.py")]);
    }

    #[test]
    fn test_top_level_granularity_groups_submodules() {
        let dir = repo(&[("a.py", "import os.path\nimport os\nfrom xml.etree import ElementTree\n")]);
        let config = AnalysisConfig {
            granularity: Granularity::TopLevel,
            ..AnalysisConfig::default()
        };
        let out = build(&dir, &config);
        assert_eq!(out.graph.node_ids(), vec!["a.py", "os", "xml"]);
    }

    #[test]
    fn test_builtin_excludes_skip_venv_and_git() {
        let dir = repo(&[
            ("app.py", ""),
            ("venv/lib/site.py", ""),
            (".git/hooks/pre-commit.py", ""),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(out.graph.node_ids(), vec!["app.py"]);
    }

    #[test]
    fn test_stdlib_module_named_like_excluded_dir_is_kept() {
        let dir = repo(&[
            ("make_env.py", "import venv\n"),
            ("venv/lib/site.py", ""),
        ]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(out.graph.node_ids(), vec!["make_env.py", "venv"]);
        assert_eq!(out.graph.node("venv").unwrap().kind(), NodeKind::External);
        assert_eq!(out.graph.edge_list(), vec![edge("make_env.py", "venv")]);
    }

    #[test]
    fn test_non_python_files_skipped() {
        let dir = repo(&[("a.py", ""), ("README.md", "import os"), ("setup.cfg", "")]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(out.graph.node_ids(), vec!["a.py"]);
    }

    #[test]
    fn test_file_size_recorded() {
        let dir = repo(&[("a.py", "import os\n")]);
        let out = build(&dir, &AnalysisConfig::default());
        assert_eq!(out.graph.node("a.py").unwrap().size(), Some(10));
    }

    #[test]
    fn test_two_builds_are_identical() {
        let dir = repo(&[
            ("a.py", "import b\nimport os\nimport c.d\n"),
            ("b.py", "import a\nimport sys\n"),
            ("c/d.py", "from b import x\n"),
            ("c/__init__.py", ""),
        ]);
        let sequential = AnalysisConfig {
            parallel: false,
            ..AnalysisConfig::default()
        };
        let first = build(&dir, &AnalysisConfig::default());
        let second = build(&dir, &sequential);

        assert_eq!(first.graph.node_ids(), second.graph.node_ids());
        assert_eq!(first.graph.edge_list(), second.graph.edge_list());
    }
}
