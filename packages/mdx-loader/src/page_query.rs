//! Page Query Locator
//!
//! Finds the page query of a module: the first exported declarator (in
//! pre-order) that is either tagged with the query tag, or carries one of the
//! recognized export names and a static string initializer.

use crate::config::LoaderOptions;
use crate::syntax::{walk_tree, Declarator, Expr, SyntaxTree, Visitor};
use std::ops::ControlFlow;

pub struct PageQueryLocator<'a> {
    query_tag: &'a str,
    export_names: &'a [String],
}

impl<'a> PageQueryLocator<'a> {
    pub fn new(query_tag: &'a str, export_names: &'a [String]) -> Self {
        Self {
            query_tag,
            export_names,
        }
    }

    pub fn from_options(options: &'a LoaderOptions) -> Self {
        Self::new(&options.query_tag, &options.page_query_names)
    }

    pub fn find(&self, tree: &SyntaxTree) -> Option<String> {
        let mut visitor = QueryVisitor { locator: self };
        match walk_tree(&mut visitor, tree) {
            ControlFlow::Break(query) => Some(query),
            ControlFlow::Continue(()) => None,
        }
    }

    fn query_of(&self, decl: &Declarator) -> Option<String> {
        let recognized_name = decl
            .name
            .as_deref()
            .is_some_and(|name| self.export_names.iter().any(|n| n == name));

        match decl.init.as_ref()? {
            Expr::TaggedTemplate {
                tag: Some(tag),
                quasi,
            } if tag == self.query_tag && quasi.is_static() => Some(quasi.raw_text()),
            Expr::String(text) if recognized_name => Some(text.clone()),
            Expr::Template(tpl) if recognized_name && tpl.is_static() => Some(tpl.raw_text()),
            _ => None,
        }
    }
}

struct QueryVisitor<'l, 'a> {
    locator: &'l PageQueryLocator<'a>,
}

impl Visitor for QueryVisitor<'_, '_> {
    type Break = String;

    fn visit_declarator(&mut self, decl: &Declarator, exported: bool) -> ControlFlow<String> {
        if !exported {
            return ControlFlow::Continue(());
        }
        match self.locator.query_of(decl) {
            Some(query) => ControlFlow::Break(query),
            None => ControlFlow::Continue(()),
        }
    }
}

/// Locate the page query using the configured tag and export names.
pub fn find_page_query(tree: &SyntaxTree, options: &LoaderOptions) -> Option<String> {
    PageQueryLocator::from_options(options).find(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Statement, Template, VariableDecl};

    fn exported(name: &str, init: Expr) -> Statement {
        Statement::Export {
            declaration: Some(VariableDecl {
                declarators: vec![Declarator {
                    name: Some(name.to_string()),
                    init: Some(init),
                }],
            }),
        }
    }

    fn tagged(tag: &str, text: &str) -> Expr {
        Expr::TaggedTemplate {
            tag: Some(tag.to_string()),
            quasi: Template {
                quasis: vec![text.to_string()],
                expressions: 0,
            },
        }
    }

    #[test]
    fn should_find_graphql_tagged_export_under_any_name() {
        let tree = SyntaxTree {
            body: vec![exported("postQuery", tagged("graphql", "query { a }"))],
        };
        let options = LoaderOptions::default();
        assert_eq!(find_page_query(&tree, &options), Some("query { a }".to_string()));
    }

    #[test]
    fn should_ignore_other_tags_and_unrecognized_strings() {
        let tree = SyntaxTree {
            body: vec![
                exported("styles", tagged("css", "color: red")),
                exported("title", Expr::String("Hello".to_string())),
            ],
        };
        assert_eq!(find_page_query(&tree, &LoaderOptions::default()), None);
    }

    #[test]
    fn should_accept_plain_string_under_recognized_name() {
        let tree = SyntaxTree {
            body: vec![exported("pageQuery", Expr::String("query { b }".to_string()))],
        };
        assert_eq!(
            find_page_query(&tree, &LoaderOptions::default()),
            Some("query { b }".to_string())
        );
    }

    #[test]
    fn should_skip_non_exported_and_interpolated_queries() {
        let tree = SyntaxTree {
            body: vec![
                Statement::Variable(VariableDecl {
                    declarators: vec![Declarator {
                        name: Some("pageQuery".to_string()),
                        init: Some(tagged("graphql", "query { local }")),
                    }],
                }),
                exported(
                    "query",
                    Expr::TaggedTemplate {
                        tag: Some("graphql".to_string()),
                        quasi: Template {
                            quasis: vec!["query { ".to_string(), " }".to_string()],
                            expressions: 1,
                        },
                    },
                ),
            ],
        };
        assert_eq!(find_page_query(&tree, &LoaderOptions::default()), None);
    }

    #[test]
    fn should_return_first_query_in_pre_order() {
        let tree = SyntaxTree {
            body: vec![
                exported("first", tagged("graphql", "query { first }")),
                exported("pageQuery", tagged("graphql", "query { second }")),
            ],
        };
        assert_eq!(
            find_page_query(&tree, &LoaderOptions::default()),
            Some("query { first }".to_string())
        );
    }
}
