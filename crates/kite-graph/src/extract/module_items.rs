//! Module-level statements: imports, exports and module-scoped declarations.

use oxc_ast::ast::{
    Declaration, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, Expression, FormalParameters, Function as AstFunction, FunctionBody,
    ImportDeclaration, ImportDeclarationSpecifier, Program, Statement, TSEnumDeclaration,
    TSEnumMemberName, TSTypeAliasDeclaration, TSTypeAnnotation, TSTypeParameterDeclaration,
    VariableDeclaration, VariableDeclarationKind,
};
use oxc_span::GetSpan;

use super::FileExtractor;
use super::text::{
    DEFAULT_TYPE, annotation_text, binding_type, bound_names, normalize_type_text,
    return_type_text, span_text, type_parameter_names, type_text,
};
use crate::id::{EntityKind, generate_id, keys};
use crate::model::{
    Enum, Export, Function, Import, ImportSpecifier, SourceSymbolType, SpecifierKind, TypeAlias,
    Variable, VariableKind,
};
use crate::package_json::extract_package_name;

/// Name given to anonymous default-exported declarations.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// Shape shared by function declarations and function-valued variables.
pub(super) struct CallableShape<'n, 'a> {
    pub params: &'n FormalParameters<'a>,
    pub return_type: Option<&'n TSTypeAnnotation<'a>>,
    pub type_parameters: Option<&'n TSTypeParameterDeclaration<'a>>,
    pub body: Option<&'n FunctionBody<'a>>,
    pub is_async: bool,
    pub is_generator: bool,
}

impl<'n, 'a> CallableShape<'n, 'a> {
    pub fn of_function(func: &'n AstFunction<'a>) -> Self {
        Self {
            params: &func.params,
            return_type: func.return_type.as_deref(),
            type_parameters: func.type_parameters.as_deref(),
            body: func.body.as_deref(),
            is_async: func.r#async,
            is_generator: func.generator,
        }
    }

    /// Arrow functions and function expressions.
    pub fn of_expression(expr: &'n Expression<'a>) -> Option<Self> {
        match expr.get_inner_expression() {
            Expression::ArrowFunctionExpression(arrow) => Some(Self {
                params: &arrow.params,
                return_type: arrow.return_type.as_deref(),
                type_parameters: arrow.type_parameters.as_deref(),
                body: Some(&arrow.body),
                is_async: arrow.r#async,
                is_generator: false,
            }),
            Expression::FunctionExpression(func) => Some(Self::of_function(func)),
            _ => None,
        }
    }
}

impl FileExtractor<'_> {
    pub(super) fn extract_program(&mut self, program: &Program) {
        self.collect_exported_locals(program);

        for statement in &program.body {
            match statement {
                Statement::ImportDeclaration(import) => self.extract_import(import),
                Statement::ExportNamedDeclaration(export) => self.extract_export_named(export),
                Statement::ExportDefaultDeclaration(export) => self.extract_export_default(export),
                Statement::ExportAllDeclaration(export) => self.extract_export_all(export),
                other => {
                    if let Some(declaration) = other.as_declaration() {
                        self.extract_declaration(declaration, false);
                    }
                }
            }
        }
    }

    /// Names exported by a later `export { x }` or `export default x`.
    fn collect_exported_locals(&mut self, program: &Program) {
        for statement in &program.body {
            match statement {
                Statement::ExportNamedDeclaration(export) if export.source.is_none() => {
                    for specifier in &export.specifiers {
                        self.exported_locals.insert(specifier.local.name().to_string());
                    }
                }
                Statement::ExportDefaultDeclaration(export) => {
                    if let ExportDefaultDeclarationKind::Identifier(ident) = &export.declaration {
                        self.exported_locals.insert(ident.name.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    fn is_exported(&self, inline: bool, name: &str) -> bool {
        inline || self.exported_locals.contains(name)
    }

    fn extract_declaration(&mut self, declaration: &Declaration, inline_export: bool) {
        match declaration {
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    let exported = self.is_exported(inline_export, &id.name);
                    self.extract_class(class, &id.name, exported);
                }
            }
            Declaration::TSInterfaceDeclaration(interface) => {
                let exported = self.is_exported(inline_export, &interface.id.name);
                self.extract_interface(interface, exported);
            }
            Declaration::FunctionDeclaration(func) => {
                if let Some(id) = &func.id
                    && self.is_exported(inline_export, &id.name)
                {
                    self.push_function(&id.name, CallableShape::of_function(func), false);
                }
            }
            Declaration::VariableDeclaration(decl) => self.extract_variables(decl, inline_export),
            Declaration::TSTypeAliasDeclaration(alias) => {
                if self.is_exported(inline_export, &alias.id.name) {
                    self.push_type_alias(alias);
                }
            }
            Declaration::TSEnumDeclaration(decl) => {
                if self.is_exported(inline_export, &decl.id.name) {
                    self.push_enum(decl);
                }
            }
            _ => {}
        }
    }

    fn extract_variables(&mut self, decl: &VariableDeclaration, inline_export: bool) {
        let kind = match decl.kind {
            VariableDeclarationKind::Var => VariableKind::Var,
            VariableDeclarationKind::Let => VariableKind::Let,
            VariableDeclarationKind::Const => VariableKind::Const,
            _ => VariableKind::Using,
        };

        for declarator in &decl.declarations {
            let mut names = Vec::new();
            bound_names(&declarator.id, &mut names);
            let single_binding = names.len() == 1;

            for name in names {
                if !self.is_exported(inline_export, &name) {
                    continue;
                }

                // `export const f = () => {}` is an exported function
                let callable = declarator
                    .init
                    .as_ref()
                    .filter(|_| single_binding)
                    .and_then(CallableShape::of_expression);
                if let Some(shape) = callable {
                    self.push_function(&name, shape, false);
                    continue;
                }

                if !self.first_sighting(EntityKind::Variable, &name) {
                    continue;
                }
                let annotated = if single_binding {
                    annotation_text(self.source, binding_type(&declarator.id))
                } else {
                    None
                };
                self.out.variables.push(Variable {
                    id: self.scoped_id(EntityKind::Variable, &name),
                    package_id: self.ctx.package_id,
                    module_id: self.ctx.module_id,
                    name,
                    kind,
                    type_text: annotated.unwrap_or_else(|| DEFAULT_TYPE.to_string()),
                });
            }
        }
    }

    /// Record a module-level function with its parameters and usages.
    ///
    /// Overload signatures are placeholders: the implementation that follows
    /// them replaces the recorded parameters and return type and supplies
    /// the body.
    pub(super) fn push_function(&mut self, name: &str, shape: CallableShape, is_default: bool) {
        let id = self.scoped_id(EntityKind::Function, name);
        if !self.first_sighting(EntityKind::Function, name) {
            if shape.body.is_none() || !self.signature_only.remove(name) {
                return;
            }
            self.out.functions.retain(|f| f.id != id);
            self.out.parameters.retain(|p| p.method_id != id);
        }
        if shape.body.is_none() {
            self.signature_only.insert(name.to_string());
        }

        self.out.functions.push(Function {
            id,
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            name: name.to_string(),
            return_type: return_type_text(self.source, shape.return_type, shape.is_async, false),
            type_parameters: type_parameter_names(shape.type_parameters),
            is_async: shape.is_async,
            is_generator: shape.is_generator,
            is_default,
        });

        self.push_parameters(id, shape.params);
        if let Some(body) = shape.body {
            self.push_usages(id, SourceSymbolType::Function, name, None, body);
        }
    }

    fn push_type_alias(&mut self, alias: &TSTypeAliasDeclaration) {
        let name = alias.id.name.as_str();
        if !self.first_sighting(EntityKind::TypeAlias, name) {
            return;
        }
        self.out.type_aliases.push(TypeAlias {
            id: self.scoped_id(EntityKind::TypeAlias, name),
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            name: name.to_string(),
            type_text: type_text(self.source, &alias.type_annotation),
            type_parameters: type_parameter_names(alias.type_parameters.as_deref()),
        });
    }

    fn push_enum(&mut self, decl: &TSEnumDeclaration) {
        let name = decl.id.name.as_str();
        if !self.first_sighting(EntityKind::Enum, name) {
            return;
        }
        let members = decl
            .body
            .members
            .iter()
            .map(|member| match &member.id {
                TSEnumMemberName::Identifier(ident) => ident.name.to_string(),
                TSEnumMemberName::String(lit) => lit.value.to_string(),
                other => normalize_type_text(span_text(self.source, other.span())),
            })
            .collect();

        self.out.enums.push(Enum {
            id: self.scoped_id(EntityKind::Enum, name),
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            name: name.to_string(),
            members,
            is_const: decl.r#const,
        });
    }

    fn extract_import(&mut self, import: &ImportDeclaration) {
        let source = import.source.value.to_string();
        let type_only = import.import_kind.is_type();

        let mut specifiers = Vec::new();
        for specifier in import.specifiers.iter().flatten() {
            specifiers.push(match specifier {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => ImportSpecifier {
                    name: DEFAULT_EXPORT_NAME.to_string(),
                    alias: Some(default.local.name.to_string()),
                    kind: if type_only {
                        SpecifierKind::Type
                    } else {
                        SpecifierKind::Default
                    },
                },
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    ImportSpecifier {
                        name: "*".to_string(),
                        alias: Some(namespace.local.name.to_string()),
                        kind: if type_only {
                            SpecifierKind::Type
                        } else {
                            SpecifierKind::Namespace
                        },
                    }
                }
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    let imported = named.imported.name().to_string();
                    let local = named.local.name.to_string();
                    ImportSpecifier {
                        alias: (local != imported).then_some(local),
                        name: imported,
                        kind: if type_only || named.import_kind.is_type() {
                            SpecifierKind::Type
                        } else {
                            SpecifierKind::Value
                        },
                    }
                }
            });
        }
        if specifiers.is_empty() {
            specifiers.push(ImportSpecifier {
                name: String::new(),
                alias: None,
                kind: SpecifierKind::SideEffect,
            });
        }

        // Several statements importing the same source share one record
        if let Some(existing) = self.out.imports.iter_mut().find(|i| i.source == source) {
            existing.is_type_only &= type_only;
            for specifier in specifiers {
                if !existing.specifiers.contains(&specifier) {
                    existing.specifiers.push(specifier);
                }
            }
            return;
        }

        let is_relative = source.starts_with('.') || source.starts_with('/');
        self.out.imports.push(Import {
            id: generate_id(
                EntityKind::Import,
                &keys::import(&self.ctx.package_id, &self.ctx.module_id, &source),
            ),
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            package_name: (!is_relative).then(|| extract_package_name(&source).to_string()),
            source,
            is_relative,
            target_module_id: None,
            target_package_id: None,
            is_type_only: type_only,
            specifiers,
        });
    }

    fn extract_export_named(&mut self, export: &ExportNamedDeclaration) {
        if let Some(declaration) = &export.declaration {
            for name in declared_names(declaration) {
                self.push_export(&name, None, false, None);
            }
            self.extract_declaration(declaration, true);
        }

        let source = export.source.as_ref().map(|s| s.value.to_string());
        for specifier in &export.specifiers {
            let exported = specifier.exported.name().to_string();
            let local = specifier.local.name().to_string();
            if source.is_some() {
                self.tally.reexported.insert(exported.clone());
            }
            let local_name = (local != exported).then_some(local);
            let is_default = exported == DEFAULT_EXPORT_NAME;
            self.push_export(&exported, local_name, is_default, source.clone());
        }
    }

    fn extract_export_default(&mut self, export: &ExportDefaultDeclaration) {
        let local_name = match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                let name = func
                    .id
                    .as_ref()
                    .map_or(DEFAULT_EXPORT_NAME, |id| id.name.as_str())
                    .to_string();
                self.push_function(&name, CallableShape::of_function(func), true);
                Some(name)
            }
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                let name = class
                    .id
                    .as_ref()
                    .map_or(DEFAULT_EXPORT_NAME, |id| id.name.as_str())
                    .to_string();
                self.extract_class(class, &name, true);
                Some(name)
            }
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                self.extract_interface(interface, true);
                Some(interface.id.name.to_string())
            }
            ExportDefaultDeclarationKind::Identifier(ident) => Some(ident.name.to_string()),
            other => {
                if let Some(shape) = other.as_expression().and_then(CallableShape::of_expression) {
                    self.push_function(DEFAULT_EXPORT_NAME, shape, true);
                }
                None
            }
        };

        let local_name = local_name.filter(|name| name != DEFAULT_EXPORT_NAME);
        self.push_export(DEFAULT_EXPORT_NAME, local_name, true, None);
    }

    fn extract_export_all(&mut self, export: &ExportAllDeclaration) {
        let source = export.source.value.to_string();
        match &export.exported {
            Some(namespace) => {
                let name = namespace.name().to_string();
                self.tally.reexported.insert(name.clone());
                self.push_export(&name, None, false, Some(source));
            }
            None => {
                self.tally.has_wildcard = true;
                self.push_export("*", None, false, Some(source));
            }
        }
    }

    fn push_export(
        &mut self,
        name: &str,
        local_name: Option<String>,
        is_default: bool,
        source: Option<String>,
    ) {
        // Wildcards are distinguished by source so each one gets its own id
        let key_name = match (name, &source) {
            ("*", Some(source)) => format!("*:{source}"),
            _ => name.to_string(),
        };
        if name != "*" {
            self.tally.names.insert(name.to_string());
        }
        if !self.first_sighting(EntityKind::Export, &key_name) {
            return;
        }

        self.out.exports.push(Export {
            id: self.scoped_id(EntityKind::Export, &key_name),
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            name: name.to_string(),
            local_name,
            is_default,
            source,
        });
    }
}

/// Names a declaration introduces at module scope.
fn declared_names(declaration: &Declaration) -> Vec<String> {
    match declaration {
        Declaration::VariableDeclaration(decl) => {
            let mut names = Vec::new();
            for declarator in &decl.declarations {
                bound_names(&declarator.id, &mut names);
            }
            names
        }
        Declaration::FunctionDeclaration(func) => {
            func.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::ClassDeclaration(class) => {
            class.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::TSInterfaceDeclaration(interface) => vec![interface.id.name.to_string()],
        Declaration::TSTypeAliasDeclaration(alias) => vec![alias.id.name.to_string()],
        Declaration::TSEnumDeclaration(decl) => vec![decl.id.name.to_string()],
        _ => Vec::new(),
    }
}
