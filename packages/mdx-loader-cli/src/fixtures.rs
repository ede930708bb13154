//! JSON fixtures for the data layer: page nodes and canned query results.

use async_trait::async_trait;
use gatsby_mdx_loader::host::{PageNode, QueryResult, QueryRunner, StaticPageNodes};
use gatsby_mdx_loader::QueryError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One canned response. An entry without `query` answers any query.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    #[serde(default)]
    pub query: Option<String>,
    pub result: QueryResult,
}

/// Query runner answering from a list of [`FixtureEntry`]s. Queries are
/// compared with whitespace collapsed.
#[derive(Debug, Clone, Default)]
pub struct FixtureQueryRunner {
    entries: Vec<FixtureEntry>,
}

impl FixtureQueryRunner {
    pub fn new(entries: Vec<FixtureEntry>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let entries: Vec<FixtureEntry> = serde_json::from_str(&content)?;
        Ok(Self::new(entries))
    }

    fn lookup(&self, query: &str) -> Option<&QueryResult> {
        let wanted = normalize(query);
        self.entries
            .iter()
            .find(|entry| match &entry.query {
                Some(q) => normalize(q) == wanted,
                None => true,
            })
            .map(|entry| &entry.result)
    }
}

#[async_trait]
impl QueryRunner for FixtureQueryRunner {
    async fn run(&self, query: &str, _context: Option<&Value>) -> Result<QueryResult, QueryError> {
        self.lookup(query).cloned().ok_or_else(|| {
            QueryError::Execution(format!("no fixture result for query: {}", normalize(query)))
        })
    }
}

fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn load_page_nodes(path: &Path) -> anyhow::Result<StaticPageNodes> {
    let content = fs::read_to_string(path)?;
    let nodes: Vec<PageNode> = serde_json::from_str(&content)?;
    Ok(StaticPageNodes(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runner() -> FixtureQueryRunner {
        serde_json::from_value::<Vec<FixtureEntry>>(json!([
            { "query": "query {\n  mdx { id }\n}", "result": { "data": { "mdx": { "id": "1" } } } },
            { "result": { "data": { "fallback": true } } }
        ]))
        .map(FixtureQueryRunner::new)
        .unwrap()
    }

    #[tokio::test]
    async fn should_match_queries_ignoring_whitespace() {
        let result = runner().run("query { mdx { id } }", None).await.unwrap();
        assert_eq!(result.data, json!({ "mdx": { "id": "1" } }));
    }

    #[tokio::test]
    async fn should_fall_back_to_catch_all_entry() {
        let result = runner().run("query { other }", None).await.unwrap();
        assert_eq!(result.data, json!({ "fallback": true }));
    }

    #[tokio::test]
    async fn should_fail_without_match() {
        let runner = FixtureQueryRunner::default();
        let err = runner.run("query { a }", None).await.unwrap_err();
        assert_eq!(err.to_string(), "no fixture result for query: query { a }");
    }
}
