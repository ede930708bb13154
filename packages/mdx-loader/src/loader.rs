//! MDX Scope Loader
//!
//! Runs once per wrapper module:
//!
//! 1. pass through anything that is not an MDX wrapper;
//! 2. read the original file and refresh the wrapper's digest marker;
//! 3. preprocess and parse the original file;
//! 4. locate and run the page query;
//! 5. emit a scope-providing module for the scopes found in the result.
//!
//! Parse failures, a missing query and an empty scope set fall back to the
//! original file's content. Only query and I/O failures are errors.

use crate::config::LoaderOptions;
use crate::emitter::ModuleEmitter;
use crate::error::{LoaderError, ParseError};
use crate::hash::ContentDigest;
use crate::host::{BuildContext, LoaderHost};
use crate::page_query::find_page_query;
use crate::parser::parse_candidates;
use crate::scopes::{extract_scopes, ScopeBinding};
use crate::wrapper::{stored_digest, with_digest, WrapperHeader};
use std::path::Path;

/// Which branch of the pipeline produced the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a wrapper module; the input is returned unchanged.
    NotApplicable,
    /// No candidate parsed; carries every parse error seen.
    Unparsable(Vec<ParseError>),
    NoPageQuery,
    NoScopes,
    Injected { bindings: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOutput {
    pub source: String,
    pub outcome: Outcome,
}

impl LoaderOutput {
    fn new(source: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            source: source.into(),
            outcome,
        }
    }
}

pub struct MdxScopeLoader {
    host: LoaderHost,
    options: LoaderOptions,
}

impl MdxScopeLoader {
    pub fn new(host: LoaderHost, options: LoaderOptions) -> Self {
        Self { host, options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Transform `content`, the source of the module at `ctx.resource_path()`.
    pub async fn process(
        &self,
        content: &str,
        ctx: &dyn BuildContext,
    ) -> Result<String, LoaderError> {
        self.process_detailed(content, ctx)
            .await
            .map(|output| output.source)
    }

    pub async fn process_detailed(
        &self,
        content: &str,
        ctx: &dyn BuildContext,
    ) -> Result<LoaderOutput, LoaderError> {
        let logger = &self.host.logger;
        let resource = ctx.resource_path();

        let header = match WrapperHeader::parse(content, resource) {
            None => return Ok(LoaderOutput::new(content, Outcome::NotApplicable)),
            Some(header) => header?,
        };
        let original_file = header.original_file.as_path();

        ctx.add_dependency(original_file);
        let original = self
            .host
            .file_system
            .read_to_string(original_file)
            .await
            .map_err(|source| LoaderError::ReadOriginal {
                path: original_file.to_path_buf(),
                source,
            })?;

        self.refresh_digest(content, &original, resource).await?;

        let filename = original_file.to_string_lossy();
        let candidates = self.host.preprocess(original_file, &original).await;
        let attempt = parse_candidates(
            self.host.parser.as_ref(),
            &candidates,
            &original,
            &filename,
        );
        let Some(tree) = attempt.tree else {
            logger.debug(&format!(
                "{}: no parsable source ({} candidate(s)), rendering without scopes",
                filename,
                candidates.len()
            ));
            return Ok(LoaderOutput::new(original, Outcome::Unparsable(attempt.errors)));
        };

        let Some(query) = find_page_query(&tree, &self.options) else {
            logger.debug(&format!("{}: no page query", filename));
            return Ok(LoaderOutput::new(original, Outcome::NoPageQuery));
        };

        let page = match &header.url_path {
            Some(url_path) => {
                let page = self.host.find_page(&self.options.page_node_type, url_path);
                if page.is_none() {
                    logger.debug(&format!(
                        "{}: no {} node for {}, querying without context",
                        filename, self.options.page_node_type, url_path
                    ));
                }
                page
            }
            None => {
                logger.debug(&format!(
                    "{}: wrapper has no url path, querying without context",
                    filename
                ));
                None
            }
        };
        let context = page.as_ref().and_then(|node| node.context.as_ref());

        let result = self
            .host
            .queries
            .run(&query, context)
            .await
            .map_err(|source| LoaderError::Query {
                path: original_file.to_path_buf(),
                source,
            })?;
        for error in &result.errors {
            logger.warn(&format!("{}: page query reported {}", filename, error));
        }

        let emitter = ModuleEmitter::new(&self.options);
        let bindings = self.usable_bindings(
            &emitter,
            extract_scopes(&result.data, &self.options.scope_field),
            &filename,
        );
        if bindings.is_empty() {
            logger.debug(&format!("{}: page query returned no scopes", filename));
            return Ok(LoaderOutput::new(original, Outcome::NoScopes));
        }

        let code = emitter.emit(&bindings, &filename);
        logger.debug(&format!(
            "{}: injected {} scope binding(s)",
            filename,
            bindings.len()
        ));
        Ok(LoaderOutput::new(
            code,
            Outcome::Injected {
                bindings: bindings.len(),
            },
        ))
    }

    /// Rewrite the wrapper's digest marker when the original file changed.
    async fn refresh_digest(
        &self,
        content: &str,
        original: &str,
        resource: &Path,
    ) -> Result<(), LoaderError> {
        let digest = ContentDigest::of(original);
        if digest.matches(stored_digest(content)) {
            return Ok(());
        }

        self.host
            .file_system
            .write(resource, &with_digest(content, digest.as_str()))
            .await
            .map_err(|source| LoaderError::WriteWrapper {
                path: resource.to_path_buf(),
                source,
            })?;
        self.host.logger.info(&format!(
            "updated digest of {} to {}",
            resource.display(),
            digest
        ));
        Ok(())
    }

    fn usable_bindings(
        &self,
        emitter: &ModuleEmitter<'_>,
        bindings: Vec<ScopeBinding>,
        filename: &str,
    ) -> Vec<ScopeBinding> {
        bindings
            .into_iter()
            .filter(|binding| {
                let usable = emitter.accepts(binding);
                if !usable {
                    self.host.logger.warn(&format!(
                        "{}: ignoring scope \"{}\" from {}, not an importable name",
                        filename, binding.id, binding.location
                    ));
                }
                usable
            })
            .collect()
    }
}
