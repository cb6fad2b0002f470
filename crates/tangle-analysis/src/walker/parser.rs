//! Specifier extraction on top of the oxc parser.

use std::path::Path;

use indexmap::IndexSet;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression, TSImportEqualsDeclaration, TSModuleReference,
    TemplateLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::{ModuleWalker, WalkError, WalkOptions};

/// [`ModuleWalker`] for JavaScript and TypeScript sources.
///
/// Collects static imports, `export … from` re-exports, `import()` and
/// `require()` calls with a literal argument, and TypeScript
/// `import x = require("…")`. Non-literal dynamic specifiers are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcmaScriptWalker;

impl ModuleWalker for EcmaScriptWalker {
    fn walk(&self, path: &Path, content: &str, options: &WalkOptions) -> Result<Vec<String>, WalkError> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());
        let ret = Parser::new(&allocator, content, source_type).parse();

        if ret.panicked {
            let message = ret
                .errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unrecoverable syntax error".to_string());
            return Err(WalkError::Parse {
                path: path.to_path_buf(),
                message,
            });
        }
        if !ret.errors.is_empty() {
            tracing::debug!(
                path = %path.display(),
                errors = ret.errors.len(),
                "recovered from syntax errors"
            );
        }

        let mut collector = SpecifierCollector {
            track_type_only: options.track_type_only,
            specifiers: IndexSet::new(),
        };
        collector.visit_program(&ret.program);
        Ok(collector.specifiers.into_iter().collect())
    }
}

struct SpecifierCollector {
    track_type_only: bool,
    specifiers: IndexSet<String>,
}

impl SpecifierCollector {
    fn push(&mut self, specifier: &str) {
        if !specifier.is_empty() {
            self.specifiers.insert(specifier.to_string());
        }
    }

    fn push_argument(&mut self, argument: Option<&Argument<'_>>) {
        match argument {
            Some(Argument::StringLiteral(lit)) => self.push(lit.value.as_str()),
            Some(Argument::TemplateLiteral(tpl)) => {
                if let Some(text) = static_template(tpl) {
                    self.push(text);
                }
            }
            _ => {}
        }
    }
}

/// Text of a template literal without substitutions.
fn static_template<'a>(tpl: &'a TemplateLiteral<'_>) -> Option<&'a str> {
    if !tpl.expressions.is_empty() {
        return None;
    }
    let quasi = tpl.quasis.first()?;
    Some(quasi.value.cooked.as_ref().unwrap_or(&quasi.value.raw).as_str())
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        if self.track_type_only || !decl.import_kind.is_type() {
            self.push(decl.source.value.as_str());
        }
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            if self.track_type_only || !decl.export_kind.is_type() {
                self.push(source.value.as_str());
            }
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        if self.track_type_only || !decl.export_kind.is_type() {
            self.push(decl.source.value.as_str());
        }
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        match &expr.source {
            Expression::StringLiteral(lit) => self.push(lit.value.as_str()),
            Expression::TemplateLiteral(tpl) => {
                if let Some(text) = static_template(tpl) {
                    self.push(text);
                }
            }
            _ => {}
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(ident) = &call.callee {
            if ident.name.as_str() == "require" && call.arguments.len() == 1 {
                self.push_argument(call.arguments.first());
            }
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_ts_import_equals_declaration(&mut self, decl: &TSImportEqualsDeclaration<'a>) {
        if let TSModuleReference::ExternalModuleReference(reference) = &decl.module_reference {
            if self.track_type_only || !decl.import_kind.is_type() {
                self.push(reference.expression.value.as_str());
            }
        }
        walk::walk_ts_import_equals_declaration(self, decl);
    }
}
