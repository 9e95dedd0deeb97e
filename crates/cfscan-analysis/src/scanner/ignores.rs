//! Exclusion rules for the file catalog.
//!
//! Three independent filters; matching any one excludes the path:
//! - binary/media extensions
//! - tooling, version-control and cache directories (pruned during the walk)
//! - editor and OS artifacts
//!
//! All patterns are gitignore-style and matched case-insensitively, since
//! legacy trees are frequently copied off case-insensitive filesystems.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Name of the optional per-project ignore file at the analysis root.
pub const IGNORE_FILE: &str = ".cfscanignore";

/// Directories that are never descended into.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    // Build and dependency output
    "node_modules/",
    "target/",
    "bin/",
    "obj/",
    // Runtime output
    "logs/",
    "temp/",
    "cache/",
    // IDE metadata
    ".idea/",
    ".vscode/",
];

/// Binary and media extensions.
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    // Executables and libraries
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.class",
    // Archives
    "*.jar",
    "*.war",
    "*.ear",
    "*.zip",
    "*.rar",
    "*.7z",
    "*.gz",
    "*.tar",
    // Documents
    "*.pdf",
    "*.doc",
    "*.docx",
    "*.xls",
    "*.xlsx",
    "*.ppt",
    "*.pptx",
    // Images
    "*.jpg",
    "*.jpeg",
    "*.png",
    "*.gif",
    "*.bmp",
    "*.ico",
    "*.svg",
    // Fonts
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.eot",
    // Media
    "*.mp3",
    "*.mp4",
    "*.avi",
    "*.mov",
];

/// Editor and OS artifacts.
pub const DEFAULT_IGNORE_ARTIFACTS: &[&str] = &[
    ".ds_store",
    "thumbs.db",
    ".idea*",
    ".vscode*",
    "*.iml",
    "*.suo",
    "*.user",
    "*.tmp",
    "*.temp",
    "*.log",
    "*.bak",
    "*~",
];

/// Compiled exclusion matcher for one analysis root.
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Build the matcher from the defaults, `extra_patterns` and the
    /// root's `.cfscanignore` if present.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        // Only affects globs added after this call.
        let _ = builder.case_insensitive(true);

        for pattern in DEFAULT_IGNORE_DIRS
            .iter()
            .chain(DEFAULT_IGNORE_EXTENSIONS)
            .chain(DEFAULT_IGNORE_ARTIFACTS)
        {
            let _ = builder.add_line(None, pattern);
        }

        for pattern in extra_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid exclusion pattern");
            }
        }

        let ignore_file = root.join(IGNORE_FILE);
        if ignore_file.is_file() {
            if let Some(e) = builder.add(&ignore_file) {
                tracing::warn!(path = %ignore_file.display(), error = %e, "problem reading ignore file");
            }
        }

        let gitignore = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to compile exclusion patterns, excluding nothing");
            Gitignore::empty()
        });

        Self { gitignore }
    }

    /// Check a single path (relative to the root) without looking at its parents.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }

    /// Check a relative path and every parent directory of it.
    pub fn is_excluded_path(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn patterns() -> IgnorePatterns {
        IgnorePatterns::new(&PathBuf::from("/app"), &[])
    }

    #[test]
    fn test_ignore_tooling_dirs() {
        let p = patterns();
        assert!(p.is_ignored(Path::new(".git"), true));
        assert!(p.is_ignored(Path::new("admin/cache"), true));
        assert!(p.is_ignored(Path::new("WEB-INF/Logs"), true));
        assert!(p.is_ignored(Path::new("node_modules"), true));
    }

    #[test]
    fn test_dir_patterns_do_not_hit_files() {
        let p = patterns();
        assert!(!p.is_ignored(Path::new("cache"), false));
        assert!(!p.is_ignored(Path::new("cache.cfm"), false));
    }

    #[test]
    fn test_files_inside_excluded_dirs() {
        let p = patterns();
        assert!(p.is_excluded_path(Path::new("app/cache/page.cfm"), false));
        assert!(p.is_excluded_path(Path::new("Temp/old.cfm"), false));
        assert!(!p.is_excluded_path(Path::new("app/caches/page.cfm"), false));
    }

    #[test]
    fn test_native_separators() {
        let p = patterns();
        let nested = Path::new("app").join("cache").join("page.cfm");
        assert!(p.is_excluded_path(&nested, false));
    }

    #[cfg(windows)]
    #[test]
    fn test_backslash_separated_paths() {
        let p = patterns();
        assert!(p.is_excluded_path(Path::new(r"app\cache\page.cfm"), false));
        assert!(p.is_excluded_path(Path::new(r"WEB-INF\Temp\old.cfm"), false));
        assert!(!p.is_excluded_path(Path::new(r"app\caches\page.cfm"), false));
    }

    #[test]
    fn test_ignore_binary_extensions() {
        let p = patterns();
        assert!(p.is_ignored(Path::new("images/logo.PNG"), false));
        assert!(p.is_ignored(Path::new("lib/driver.jar"), false));
        assert!(p.is_ignored(Path::new("docs/manual.pdf"), false));
    }

    #[test]
    fn test_ignore_editor_artifacts() {
        let p = patterns();
        assert!(p.is_ignored(Path::new(".DS_Store"), false));
        assert!(p.is_ignored(Path::new("Thumbs.db"), false));
        assert!(p.is_ignored(Path::new("index.cfm~"), false));
        assert!(p.is_ignored(Path::new("index.cfm.bak"), false));
        assert!(p.is_ignored(Path::new("project.iml"), false));
    }

    #[test]
    fn test_allow_template_files() {
        let p = patterns();
        assert!(!p.is_ignored(Path::new("index.cfm"), false));
        assert!(!p.is_ignored(Path::new("components/User.cfc"), false));
        assert!(!p.is_ignored(Path::new("layout.html"), false));
    }

    #[test]
    fn test_extra_patterns() {
        let p = IgnorePatterns::new(&PathBuf::from("/app"), &["legacy/".to_string()]);
        assert!(p.is_ignored(Path::new("legacy"), true));
        assert!(!p.is_ignored(Path::new("current"), true));
    }
}
