use crate::constants::SITE_PAGE_TYPE;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Loader options, as passed by the host build tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderOptions {
    /// Template tag marking a page query, e.g. `graphql`.
    pub query_tag: String,
    /// Export names accepted for untagged string queries.
    pub page_query_names: Vec<String>,
    /// Result field that carries `{ id, location }` scope records.
    pub scope_field: String,
    /// `internal.type` of page nodes.
    pub page_node_type: String,
    pub provider_module: String,
    pub provider_component: String,
    /// Local name given to the original wrapper's default export.
    pub wrapper_alias: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            query_tag: "graphql".to_string(),
            page_query_names: vec!["pageQuery".to_string(), "query".to_string()],
            scope_field: "scope".to_string(),
            page_node_type: SITE_PAGE_TYPE.to_string(),
            provider_module: "gatsby-mdx/context".to_string(),
            provider_component: "MDXScopeProvider".to_string(),
            wrapper_alias: "OriginalWrapper".to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let options: LoaderOptions = serde_json::from_str(content)?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let options = LoaderOptions::from_json_str(r#"{ "scopeField": "mdxScope" }"#).unwrap();
        assert_eq!(options.scope_field, "mdxScope");
        assert_eq!(options.query_tag, "graphql");
        assert_eq!(options.page_node_type, "SitePage");
    }

    #[test]
    fn should_accept_empty_object() {
        assert_eq!(
            LoaderOptions::from_json_str("{}").unwrap(),
            LoaderOptions::default()
        );
    }

    #[test]
    fn should_reject_wrong_types() {
        assert!(LoaderOptions::from_json_str(r#"{ "pageQueryNames": "pageQuery" }"#).is_err());
    }
}
