// Syntax Tree
//
// A closed, owned view of a parsed module. Parsers lower their own AST into
// these node kinds so the pipeline never inspects untyped node shapes.

use std::ops::ControlFlow;

/// A parsed module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxTree {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import { source: String },
    /// `export <declaration>` or `export { ... }` (then `declaration` is `None`).
    Export { declaration: Option<VariableDecl> },
    ExportDefault,
    Variable(VariableDecl),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDecl {
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// `None` for destructuring patterns.
    pub name: Option<String>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String),
    Template(Template),
    TaggedTemplate {
        /// Identifier name of the tag, `None` for member or call tags.
        tag: Option<String>,
        quasi: Template,
    },
    Other,
}

/// A template literal: raw text chunks and the number of `${}` holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub quasis: Vec<String>,
    pub expressions: usize,
}

impl Template {
    pub fn is_static(&self) -> bool {
        self.expressions == 0
    }

    pub fn raw_text(&self) -> String {
        self.quasis.concat()
    }
}

/// Tree visitor. Returning `ControlFlow::Break` stops the walk.
pub trait Visitor {
    type Break;

    fn visit_statement(&mut self, _stmt: &Statement) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// `exported` is true for declarators that sit inside an `export` statement.
    fn visit_declarator(
        &mut self,
        _decl: &Declarator,
        _exported: bool,
    ) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_expr(&mut self, _expr: &Expr) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

/// Pre-order walk: statement, then each declarator, then its initializer.
pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &SyntaxTree) -> ControlFlow<V::Break> {
    for stmt in &tree.body {
        walk_statement(visitor, stmt)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) -> ControlFlow<V::Break> {
    visitor.visit_statement(stmt)?;
    match stmt {
        Statement::Export {
            declaration: Some(decl),
        } => walk_variable(visitor, decl, true),
        Statement::Variable(decl) => walk_variable(visitor, decl, false),
        Statement::Import { .. }
        | Statement::Export { declaration: None }
        | Statement::ExportDefault
        | Statement::Other => ControlFlow::Continue(()),
    }
}

fn walk_variable<V: Visitor>(
    visitor: &mut V,
    decl: &VariableDecl,
    exported: bool,
) -> ControlFlow<V::Break> {
    for declarator in &decl.declarators {
        visitor.visit_declarator(declarator, exported)?;
        if let Some(init) = &declarator.init {
            visitor.visit_expr(init)?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        type Break = ();

        fn visit_statement(&mut self, stmt: &Statement) -> ControlFlow<()> {
            self.0.push(match stmt {
                Statement::Import { .. } => "import".to_string(),
                Statement::Export { .. } => "export".to_string(),
                Statement::ExportDefault => "export default".to_string(),
                Statement::Variable(_) => "var".to_string(),
                Statement::Other => "other".to_string(),
            });
            ControlFlow::Continue(())
        }

        fn visit_declarator(&mut self, decl: &Declarator, exported: bool) -> ControlFlow<()> {
            let name = decl.name.clone().unwrap_or_default();
            self.0.push(format!("decl {} {}", name, exported));
            if name == "stop" {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }

        fn visit_expr(&mut self, _expr: &Expr) -> ControlFlow<()> {
            self.0.push("expr".to_string());
            ControlFlow::Continue(())
        }
    }

    fn declarator(name: &str) -> Declarator {
        Declarator {
            name: Some(name.to_string()),
            init: Some(Expr::Other),
        }
    }

    #[test]
    fn should_walk_in_pre_order() {
        let tree = SyntaxTree {
            body: vec![
                Statement::Import {
                    source: "react".to_string(),
                },
                Statement::Variable(VariableDecl {
                    declarators: vec![declarator("a")],
                }),
                Statement::Export {
                    declaration: Some(VariableDecl {
                        declarators: vec![declarator("b")],
                    }),
                },
            ],
        };
        let mut recorder = Recorder(Vec::new());
        assert!(walk_tree(&mut recorder, &tree).is_continue());
        assert_eq!(
            recorder.0,
            vec!["import", "var", "decl a false", "expr", "export", "decl b true", "expr"]
        );
    }

    #[test]
    fn should_stop_at_first_break() {
        let tree = SyntaxTree {
            body: vec![
                Statement::Variable(VariableDecl {
                    declarators: vec![declarator("stop"), declarator("never")],
                }),
                Statement::Other,
            ],
        };
        let mut recorder = Recorder(Vec::new());
        assert!(walk_tree(&mut recorder, &tree).is_break());
        assert_eq!(recorder.0, vec!["var", "decl stop false"]);
    }

    #[test]
    fn should_join_static_template_chunks() {
        let template = Template {
            quasis: vec!["query {".to_string(), " site }".to_string()],
            expressions: 0,
        };
        assert!(template.is_static());
        assert_eq!(template.raw_text(), "query { site }");
    }
}
