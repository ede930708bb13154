//! Loader Host
//!
//! Capabilities the loader consumes from the build environment. They are
//! injected as a [`LoaderHost`] bundle instead of being looked up globally, so
//! tests can swap every one of them for an in-memory fake.

pub mod file_system;
pub mod preprocess;

pub use file_system::{DiskFileSystem, FileSystem};
pub use preprocess::{EsmBlockPreprocessor, Preprocessor};

use crate::error::QueryError;
use crate::logging::{Logger, NullLogger};
use crate::parser::{OxcSourceParser, SourceParser};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Build-tool state for one loader invocation.
pub trait BuildContext: Send + Sync {
    /// Path of the module being loaded (the wrapper file).
    fn resource_path(&self) -> &Path;
    /// Rebuild the current module when `path` changes.
    fn add_dependency(&self, path: &Path);
}

/// Response of the query engine, shaped like a GraphQL response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl QueryResult {
    pub fn from_data(data: Value) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }
}

/// Executes page queries against the data layer.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    async fn run(&self, query: &str, context: Option<&Value>) -> Result<QueryResult, QueryError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInternal {
    #[serde(rename = "type")]
    pub node_type: String,
}

/// A node of the data layer. Page nodes carry the query context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    pub internal: NodeInternal,
    pub path: String,
    #[serde(default)]
    pub context: Option<Value>,
}

impl PageNode {
    pub fn new(node_type: impl Into<String>, path: impl Into<String>, context: Option<Value>) -> Self {
        Self {
            internal: NodeInternal {
                node_type: node_type.into(),
            },
            path: path.into(),
            context,
        }
    }
}

/// Lookup into the data layer's nodes.
pub trait PageNodeSource: Send + Sync {
    /// First node of `node_type` whose path equals `path`. Implementations
    /// hand out only the matching node, never a copy of the whole store.
    fn find_page(&self, node_type: &str, path: &str) -> Option<PageNode>;
}

/// A fixed list of nodes.
#[derive(Debug, Clone, Default)]
pub struct StaticPageNodes(pub Vec<PageNode>);

impl PageNodeSource for StaticPageNodes {
    fn find_page(&self, node_type: &str, path: &str) -> Option<PageNode> {
        self.0
            .iter()
            .find(|node| node.internal.node_type == node_type && node.path == path)
            .cloned()
    }
}

/// The capability bundle handed to [`crate::loader::MdxScopeLoader`].
#[derive(Clone)]
pub struct LoaderHost {
    pub file_system: Arc<dyn FileSystem>,
    pub preprocessors: Vec<Arc<dyn Preprocessor>>,
    pub parser: Arc<dyn SourceParser>,
    pub queries: Arc<dyn QueryRunner>,
    pub pages: Arc<dyn PageNodeSource>,
    pub logger: Arc<dyn Logger>,
}

impl LoaderHost {
    /// Disk I/O, the MDX export preprocessor, the oxc parser and no logging.
    pub fn new(queries: Arc<dyn QueryRunner>, pages: Arc<dyn PageNodeSource>) -> Self {
        Self {
            file_system: Arc::new(DiskFileSystem::new()),
            preprocessors: vec![Arc::new(EsmBlockPreprocessor::new())],
            parser: Arc::new(OxcSourceParser::new()),
            queries,
            pages,
            logger: Arc::new(NullLogger::new()),
        }
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    pub fn with_preprocessors(mut self, preprocessors: Vec<Arc<dyn Preprocessor>>) -> Self {
        self.preprocessors = preprocessors;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run every preprocessor in registration order and collect the candidates.
    pub async fn preprocess(&self, filename: &Path, contents: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        for preprocessor in &self.preprocessors {
            if let Some(candidate) = preprocessor.preprocess(filename, contents).await {
                candidates.push(candidate);
            }
        }
        candidates
    }

    pub fn find_page(&self, node_type: &str, url_path: &str) -> Option<PageNode> {
        self.pages.find_page(node_type, url_path)
    }
}
