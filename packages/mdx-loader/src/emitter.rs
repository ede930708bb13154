//! Scope Module Emitter
//!
//! Generates the module that replaces an MDX wrapper once scope bindings are
//! known:
//!
//! ```text
//! import React from "react";
//! import { MDXScopeProvider } from "gatsby-mdx/context";
//! import Chart from "./chart";
//!
//! import OriginalWrapper from "/site/src/pages/post.mdx";
//!
//! export default ({children, ...props}) => <MDXScopeProvider scopes={{Chart}}>
//!   <OriginalWrapper {...props}>
//!     {children}
//!   </OriginalWrapper>
//! </MDXScopeProvider>
//! ```

use crate::config::LoaderOptions;
use crate::scopes::ScopeBinding;

const REACT: &str = "React";

pub struct ModuleEmitter<'a> {
    options: &'a LoaderOptions,
}

impl<'a> ModuleEmitter<'a> {
    pub fn new(options: &'a LoaderOptions) -> Self {
        Self { options }
    }

    /// Names the generated module binds itself. A scope with one of these ids
    /// would either redeclare an import or be shadowed by the component's
    /// parameters.
    pub fn own_names(&self) -> [&str; 5] {
        [
            REACT,
            &self.options.provider_component,
            &self.options.wrapper_alias,
            "children",
            "props",
        ]
    }

    /// Whether `binding` can be imported into the generated module.
    pub fn accepts(&self, binding: &ScopeBinding) -> bool {
        binding.is_valid_identifier() && !self.own_names().contains(&binding.id.as_str())
    }

    /// `bindings` must be non-empty and every binding must be [`accepts`]ed.
    ///
    /// [`accepts`]: ModuleEmitter::accepts
    pub fn emit(&self, bindings: &[ScopeBinding], original_file: &str) -> String {
        debug_assert!(!bindings.is_empty());
        debug_assert!(bindings.iter().all(|b| self.accepts(b)));
        let provider = &self.options.provider_component;
        let alias = &self.options.wrapper_alias;

        let mut code = String::new();
        code.push_str(&format!("import {} from \"react\";\n", REACT));
        code.push_str(&format!(
            "import {{ {} }} from {};\n",
            provider,
            string_literal(&self.options.provider_module)
        ));
        for binding in bindings {
            code.push_str(&format!(
                "import {} from {};\n",
                binding.id,
                string_literal(&binding.location)
            ));
        }
        code.push('\n');
        code.push_str(&format!(
            "import {} from {};\n\n",
            alias,
            string_literal(original_file)
        ));

        let scopes = bindings
            .iter()
            .map(|b| b.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        code.push_str(&format!(
            "export default ({{children, ...props}}) => <{provider} scopes={{{{{scopes}}}}}>\n"
        ));
        code.push_str(&format!("  <{alias} {{...props}}>\n"));
        code.push_str("    {children}\n");
        code.push_str(&format!("  </{alias}>\n"));
        code.push_str(&format!("</{provider}>"));
        code
    }
}

/// Double-quoted JavaScript string literal. JSON string escaping is a subset
/// of JavaScript's.
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
