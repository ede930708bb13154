//! Source Preprocessing
//!
//! Preprocessors turn a file the parser cannot read directly into candidate
//! sources. The loader tries candidates in order until one parses.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static ESM_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(import|export)\b").unwrap());
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(```|~~~)").unwrap());

#[async_trait]
pub trait Preprocessor: Send + Sync {
    /// `None` when this preprocessor does not handle `filename`.
    async fn preprocess(&self, filename: &Path, contents: &str) -> Option<String>;
}

/// Extracts the top-level `import`/`export` blocks of an MDX document into a
/// JavaScript module. Front matter and fenced code are skipped, blocks are
/// separated by blank lines.
#[derive(Debug, Clone)]
pub struct EsmBlockPreprocessor {
    extensions: Vec<String>,
}

impl Default for EsmBlockPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EsmBlockPreprocessor {
    pub fn new() -> Self {
        Self {
            extensions: vec!["mdx".to_string(), "md".to_string()],
        }
    }

    fn handles(&self, filename: &Path) -> bool {
        filename
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn extract(contents: &str) -> Vec<String> {
        let mut lines = contents.lines().peekable();

        if lines.peek().map(|l| l.trim_end()) == Some("---") {
            lines.next();
            for line in lines.by_ref() {
                if line.trim_end() == "---" {
                    break;
                }
            }
        }

        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut in_fence = false;

        for line in lines {
            if FENCE.is_match(line) {
                in_fence = !in_fence;
            }
            if !in_fence && line.trim().is_empty() {
                flush(&mut current, &mut blocks);
                continue;
            }
            current.push(line);
        }
        flush(&mut current, &mut blocks);
        blocks
    }
}

fn flush(current: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if current.first().is_some_and(|first| ESM_START.is_match(first)) {
        blocks.push(current.join("\n"));
    }
    current.clear();
}

#[async_trait]
impl Preprocessor for EsmBlockPreprocessor {
    async fn preprocess(&self, filename: &Path, contents: &str) -> Option<String> {
        if !self.handles(filename) {
            return None;
        }
        let blocks = Self::extract(contents);
        if blocks.is_empty() {
            None
        } else {
            Some(blocks.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "---\ntitle: export this\n---\n\nimport Chart from \"./chart\";\n\n# Hello\n\nexporting data is prose.\n\n```js\nexport const notMe = 1;\n\nimport nope from \"nope\";\n```\n\nexport const pageQuery = graphql`\n  query { mdx { id } }\n`;\n";

    #[test]
    fn should_extract_top_level_esm_blocks() {
        assert_eq!(
            EsmBlockPreprocessor::extract(DOCUMENT),
            vec![
                "import Chart from \"./chart\";".to_string(),
                "export const pageQuery = graphql`\n  query { mdx { id } }\n`;".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn should_only_handle_markdown_extensions() {
        let preprocessor = EsmBlockPreprocessor::new();
        assert!(preprocessor
            .preprocess(Path::new("/site/post.js"), DOCUMENT)
            .await
            .is_none());
        assert!(preprocessor
            .preprocess(Path::new("/site/post.MDX"), DOCUMENT)
            .await
            .is_some());
    }

    #[tokio::test]
    async fn should_skip_documents_without_esm() {
        let preprocessor = EsmBlockPreprocessor::new();
        assert!(preprocessor
            .preprocess(Path::new("/site/post.mdx"), "# Just prose\n")
            .await
            .is_none());
    }
}
