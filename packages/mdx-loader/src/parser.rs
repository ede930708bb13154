//! Source Parsing
//!
//! The [`SourceParser`] capability turns source text into a [`SyntaxTree`].
//! [`OxcSourceParser`] is the default implementation; it parses with oxc and
//! lowers the oxc program into the closed node set of [`crate::syntax`].

use crate::error::ParseError;
use crate::syntax::{Declarator, Expr, Statement, SyntaxTree, Template, VariableDecl};
use oxc_allocator::Allocator;
use oxc_ast::ast::{self, BindingPatternKind, Declaration, Expression};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// Parses module source into a syntax tree.
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &str, filename: &str) -> Result<SyntaxTree, ParseError>;
}

/// Result of trying a list of candidate sources.
#[derive(Debug, Default)]
pub struct ParseAttempt {
    pub tree: Option<SyntaxTree>,
    /// Errors of every candidate tried before the first success.
    pub errors: Vec<ParseError>,
}

/// Parse the first candidate that succeeds, or `raw` when there are no candidates.
pub fn parse_candidates(
    parser: &dyn SourceParser,
    candidates: &[String],
    raw: &str,
    filename: &str,
) -> ParseAttempt {
    let sources: Vec<&str> = if candidates.is_empty() {
        vec![raw]
    } else {
        candidates.iter().map(String::as_str).collect()
    };

    sources
        .into_iter()
        .fold(ParseAttempt::default(), |mut attempt, source| {
            if attempt.tree.is_none() {
                match parser.parse(source, filename) {
                    Ok(tree) => attempt.tree = Some(tree),
                    Err(err) => attempt.errors.push(err),
                }
            }
            attempt
        })
}

/// oxc backed parser. JavaScript-family and unknown extensions (such as
/// `.mdx` after preprocessing) are parsed as JSX modules.
#[derive(Debug, Default, Clone, Copy)]
pub struct OxcSourceParser;

impl OxcSourceParser {
    pub fn new() -> Self {
        Self
    }

    fn source_type(filename: &str) -> SourceType {
        match SourceType::from_path(Path::new(filename)) {
            Ok(source_type) if source_type.is_typescript() => source_type,
            Ok(source_type) => source_type.with_jsx(true),
            Err(_) => SourceType::mjs().with_jsx(true),
        }
    }
}

impl SourceParser for OxcSourceParser {
    fn parse(&self, source: &str, filename: &str) -> Result<SyntaxTree, ParseError> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, Self::source_type(filename)).parse();

        if let Some(err) = ret.errors.first() {
            return Err(ParseError::new(filename, err.to_string()));
        }
        if ret.panicked {
            return Err(ParseError::new(filename, "parser aborted"));
        }

        Ok(SyntaxTree {
            body: ret.program.body.iter().map(lower_statement).collect(),
        })
    }
}

fn lower_statement(stmt: &ast::Statement<'_>) -> Statement {
    match stmt {
        ast::Statement::ImportDeclaration(decl) => Statement::Import {
            source: decl.source.value.to_string(),
        },
        ast::Statement::ExportNamedDeclaration(decl) => Statement::Export {
            declaration: match &decl.declaration {
                Some(Declaration::VariableDeclaration(v)) => Some(lower_variable(v)),
                _ => None,
            },
        },
        ast::Statement::ExportDefaultDeclaration(_) => Statement::ExportDefault,
        ast::Statement::VariableDeclaration(v) => Statement::Variable(lower_variable(v)),
        _ => Statement::Other,
    }
}

fn lower_variable(decl: &ast::VariableDeclaration<'_>) -> VariableDecl {
    VariableDecl {
        declarators: decl
            .declarations
            .iter()
            .map(|d| Declarator {
                name: match &d.id.kind {
                    BindingPatternKind::BindingIdentifier(id) => Some(id.name.to_string()),
                    _ => None,
                },
                init: d.init.as_ref().map(lower_expr),
            })
            .collect(),
    }
}

fn lower_expr(expr: &Expression<'_>) -> Expr {
    match expr {
        Expression::StringLiteral(lit) => Expr::String(lit.value.to_string()),
        Expression::TemplateLiteral(tpl) => Expr::Template(lower_template(tpl)),
        Expression::TaggedTemplateExpression(tagged) => Expr::TaggedTemplate {
            tag: match &tagged.tag {
                Expression::Identifier(ident) => Some(ident.name.to_string()),
                _ => None,
            },
            quasi: lower_template(&tagged.quasi),
        },
        Expression::ParenthesizedExpression(paren) => lower_expr(&paren.expression),
        _ => Expr::Other,
    }
}

fn lower_template(tpl: &ast::TemplateLiteral<'_>) -> Template {
    Template {
        quasis: tpl.quasis.iter().map(|q| q.value.raw.to_string()).collect(),
        expressions: tpl.expressions.len(),
    }
}
