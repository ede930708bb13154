use crate::fixtures::{load_page_nodes, FixtureQueryRunner};
use anyhow::Context;
use gatsby_mdx_loader::host::{BuildContext, LoaderHost, StaticPageNodes};
use gatsby_mdx_loader::logging::{ConsoleLogger, LogLevel, Logger};
use gatsby_mdx_loader::{LoaderOptions, MdxScopeLoader, Outcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub wrappers: Vec<PathBuf>,
    pub pages: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub options: Option<PathBuf>,
    /// Write modules here instead of printing them.
    pub out_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Result for one wrapper module.
#[derive(Debug)]
pub struct WrapperReport {
    pub wrapper: PathBuf,
    pub result: anyhow::Result<(String, Outcome)>,
}

/// Build context for a wrapper on disk; dependencies are only logged.
struct FileBuildContext {
    resource_path: PathBuf,
    logger: Arc<dyn Logger>,
}

impl BuildContext for FileBuildContext {
    fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    fn add_dependency(&self, path: &Path) {
        self.logger.debug(&format!(
            "{} depends on {}",
            self.resource_path.display(),
            path.display()
        ));
    }
}

fn build_loader(opts: &RunOptions, logger: Arc<dyn Logger>) -> anyhow::Result<MdxScopeLoader> {
    let options = match &opts.options {
        Some(path) => LoaderOptions::load(path)
            .with_context(|| format!("reading loader options {}", path.display()))?,
        None => LoaderOptions::default(),
    };
    let queries = match &opts.results {
        Some(path) => FixtureQueryRunner::load(path)
            .with_context(|| format!("reading query results {}", path.display()))?,
        None => FixtureQueryRunner::default(),
    };
    let pages = match &opts.pages {
        Some(path) => load_page_nodes(path)
            .with_context(|| format!("reading page nodes {}", path.display()))?,
        None => StaticPageNodes::default(),
    };

    let host = LoaderHost::new(Arc::new(queries), Arc::new(pages)).with_logger(logger);
    Ok(MdxScopeLoader::new(host, options))
}

async fn process_wrapper(
    loader: Arc<MdxScopeLoader>,
    logger: Arc<dyn Logger>,
    wrapper: PathBuf,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<(String, Outcome)> {
    let content = tokio::fs::read_to_string(&wrapper)
        .await
        .with_context(|| format!("reading {}", wrapper.display()))?;
    let ctx = FileBuildContext {
        resource_path: wrapper.clone(),
        logger,
    };
    let output = loader.process_detailed(&content, &ctx).await?;

    if let Some(dir) = out_dir {
        let name = wrapper
            .file_name()
            .with_context(|| format!("{} has no file name", wrapper.display()))?;
        let target = dir.join(name);
        tokio::fs::write(&target, &output.source)
            .await
            .with_context(|| format!("writing {}", target.display()))?;
    }
    Ok((output.source, output.outcome))
}

/// Generated modules may be printed to stdout, so every log line goes to stderr.
fn console_logger(verbose: bool) -> ConsoleLogger {
    let level = if verbose { LogLevel::Debug } else { LogLevel::Warn };
    ConsoleLogger::to_stderr(level)
}

/// Process every wrapper concurrently. Reports come back in input order.
pub async fn run(opts: RunOptions) -> anyhow::Result<Vec<WrapperReport>> {
    let logger: Arc<dyn Logger> = Arc::new(console_logger(opts.verbose));
    let loader = Arc::new(build_loader(&opts, logger.clone())?);

    if let Some(dir) = &opts.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut tasks = JoinSet::new();
    for (index, wrapper) in opts.wrappers.iter().cloned().enumerate() {
        let loader = loader.clone();
        let logger = logger.clone();
        let out_dir = opts.out_dir.clone();
        tasks.spawn(async move {
            let result = process_wrapper(loader, logger, wrapper.clone(), out_dir).await;
            (index, WrapperReport { wrapper, result })
        });
    }

    let mut reports = Vec::with_capacity(opts.wrappers.len());
    while let Some(joined) = tasks.join_next().await {
        reports.push(joined.context("wrapper task panicked")?);
    }
    reports.sort_by_key(|(index, _)| *index);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatsby_mdx_loader::logging::InfoStream;
    use gatsby_mdx_loader::wrapper::WrapperHeader;
    use serde_json::json;
    use std::fs;

    #[test]
    fn should_keep_logs_off_stdout() {
        for verbose in [false, true] {
            assert_eq!(console_logger(verbose).info_stream(), InfoStream::Stderr);
        }
        assert_eq!(console_logger(true).level(), LogLevel::Debug);
        assert_eq!(console_logger(false).level(), LogLevel::Warn);
    }

    #[tokio::test]
    async fn should_inject_scopes_from_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("post.mdx");
        fs::write(
            &post,
            "import Layout from \"./layout\";\n\nexport const pageQuery = graphql`query { mdx { code { scope { id location } } } }`;\n\n# Hello\n",
        )
        .unwrap();
        let wrapper = dir.path().join("wrapper.js");
        fs::write(&wrapper, WrapperHeader::new(&post, "/post/").render()).unwrap();

        let results = dir.path().join("results.json");
        fs::write(
            &results,
            json!([{ "result": { "data": { "mdx": { "code": {
                "scope": { "id": "Chart", "location": "./chart" }
            } } } } }])
            .to_string(),
        )
        .unwrap();

        let out_dir = dir.path().join("out");
        let reports = run(RunOptions {
            wrappers: vec![wrapper.clone()],
            results: Some(results),
            out_dir: Some(out_dir.clone()),
            ..RunOptions::default()
        })
        .await
        .unwrap();

        let (source, outcome) = reports[0].result.as_ref().unwrap();
        assert_eq!(*outcome, Outcome::Injected { bindings: 1 });
        assert!(source.contains("import Chart from \"./chart\";"));
        assert_eq!(&fs::read_to_string(out_dir.join("wrapper.js")).unwrap(), source);
        assert!(fs::read_to_string(&wrapper).unwrap().contains("\n// hash "));
    }

    #[tokio::test]
    async fn should_report_missing_fixture_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("post.mdx");
        fs::write(&post, "export const pageQuery = graphql`query { a }`;\n").unwrap();
        let wrapper = dir.path().join("wrapper.js");
        fs::write(&wrapper, WrapperHeader::new(&post, "/post/").render()).unwrap();
        let plain = dir.path().join("plain.js");
        fs::write(&plain, "export default 1;").unwrap();

        let reports = run(RunOptions {
            wrappers: vec![wrapper, plain],
            ..RunOptions::default()
        })
        .await
        .unwrap();

        assert!(reports[0].result.is_err());
        let (source, outcome) = reports[1].result.as_ref().unwrap();
        assert_eq!(source, "export default 1;");
        assert_eq!(*outcome, Outcome::NotApplicable);
    }
}
