//! Classes, interfaces and their members.

use oxc_ast::ast::{
    BindingPatternKind, Class as AstClass, ClassElement, FormalParameters, FunctionBody,
    MethodDefinition, MethodDefinitionKind, MethodDefinitionType, PropertyDefinition,
    TSInterfaceDeclaration, TSMethodSignatureKind, TSSignature, TSType, TSTypeAnnotation,
};
use rustc_hash::FxHashSet;

use super::FileExtractor;
use super::module_items::CallableShape;
use super::text::{
    DEFAULT_TYPE, accessibility_visibility, annotation_text, binding_name, binding_type,
    heritage_name, property_key_name, return_type_text, type_name, type_parameter_names,
    unwrap_parenthesized, visibility,
};
use super::usage::collect_usages;
use crate::id::{EntityId, EntityKind, generate_id, keys};
use crate::model::{
    Class, ClassExtendsRef, ClassImplementsRef, Interface, InterfaceExtendsRef, Method,
    MethodKind, Parameter, ParentType, Property, Qualifier, ResolutionStatus, SourceSymbolType,
    SymbolUsageRef, Visibility,
};

/// Modifiers shared by methods and properties.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    is_static: bool,
    is_async: bool,
    is_abstract: bool,
    is_optional: bool,
    is_readonly: bool,
    visibility: Visibility,
}

/// The member owner currently being extracted.
#[derive(Debug, Clone, Copy)]
struct Parent {
    id: EntityId,
    kind: ParentType,
}

impl FileExtractor<'_> {
    pub(super) fn extract_class(&mut self, class: &AstClass, name: &str, exported: bool) {
        if !self.first_sighting(EntityKind::Class, name) {
            return;
        }
        let class_id = self.scoped_id(EntityKind::Class, name);

        self.out.classes.push(Class {
            id: class_id,
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            name: name.to_string(),
            extends_id: None,
            is_exported: exported,
            is_abstract: class.r#abstract,
            type_parameters: type_parameter_names(class.type_parameters.as_deref()),
        });

        if let Some(parent_name) = class.super_class.as_ref().and_then(heritage_name) {
            self.out.class_extends.push(ClassExtendsRef {
                id: generate_id(
                    EntityKind::ClassExtends,
                    &keys::deferred("class_extends", &class_id, &parent_name),
                ),
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                class_id,
                parent_name,
                parent_id: None,
                status: ResolutionStatus::Unresolved,
            });
        }

        for implemented in &class.implements {
            let Some(interface_name) = type_name(&implemented.expression) else {
                continue;
            };
            self.out.class_implements.push(ClassImplementsRef {
                id: generate_id(
                    EntityKind::ClassImplements,
                    &keys::deferred("class_implements", &class_id, &interface_name),
                ),
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                class_id,
                interface_name,
                interface_id: None,
                status: ResolutionStatus::Unresolved,
            });
        }

        let parent = Parent {
            id: class_id,
            kind: ParentType::Class,
        };
        // Overload signatures give way to the implementation with a body
        let implemented: FxHashSet<String> = class
            .body
            .body
            .iter()
            .filter_map(|element| match element {
                ClassElement::MethodDefinition(method)
                    if method.value.body.is_some()
                        && matches!(
                            method.kind,
                            MethodDefinitionKind::Method | MethodDefinitionKind::Constructor
                        ) =>
                {
                    Some(property_key_name(self.source, &method.key))
                }
                _ => None,
            })
            .collect();

        let mut member_names = FxHashSet::default();
        for (index, element) in class.body.body.iter().enumerate() {
            match element {
                ClassElement::MethodDefinition(method) => {
                    if method.value.body.is_none()
                        && method.kind != MethodDefinitionKind::Get
                        && method.kind != MethodDefinitionKind::Set
                        && implemented.contains(&property_key_name(self.source, &method.key))
                    {
                        continue;
                    }
                    self.extract_class_method(parent, index, method, &mut member_names);
                }
                ClassElement::PropertyDefinition(field) => {
                    self.extract_class_field(parent, index, field, &mut member_names);
                }
                ClassElement::AccessorProperty(accessor) => {
                    let name = property_key_name(self.source, &accessor.key);
                    if !member_names.insert((ParentMember::Property, name.clone())) {
                        continue;
                    }
                    let modifiers = Modifiers {
                        is_static: accessor.r#static,
                        visibility: visibility(&accessor.key, accessor.accessibility),
                        ..Default::default()
                    };
                    let type_text = annotation_text(self.source, accessor.type_annotation.as_deref());
                    self.push_property(parent, index, &name, type_text, modifiers, true);
                }
                _ => {}
            }
        }
    }

    fn extract_class_method(
        &mut self,
        parent: Parent,
        index: usize,
        method: &MethodDefinition,
        member_names: &mut FxHashSet<(ParentMember, String)>,
    ) {
        let name = property_key_name(self.source, &method.key);
        let func = &method.value;
        let modifiers = Modifiers {
            is_static: method.r#static,
            is_async: func.r#async,
            is_abstract: matches!(method.r#type, MethodDefinitionType::TSAbstractMethodDefinition),
            is_optional: method.optional,
            is_readonly: false,
            visibility: visibility(&method.key, method.accessibility),
        };

        match method.kind {
            MethodDefinitionKind::Get | MethodDefinitionKind::Set => {
                // A get/set pair describes one property
                if !member_names.insert((ParentMember::Property, name.clone())) {
                    return;
                }
                let type_text = if method.kind == MethodDefinitionKind::Get {
                    annotation_text(self.source, func.return_type.as_deref())
                } else {
                    func.params
                        .items
                        .first()
                        .and_then(|p| annotation_text(self.source, binding_type(&p.pattern)))
                };
                self.push_property(parent, index, &name, type_text, modifiers, true);
            }
            MethodDefinitionKind::Constructor | MethodDefinitionKind::Method => {
                // Repeated implementations keep the first one
                if !member_names.insert((ParentMember::Method, name.clone())) {
                    return;
                }
                let kind = if method.kind == MethodDefinitionKind::Constructor {
                    MethodKind::Constructor
                } else {
                    MethodKind::Method
                };
                let shape = CallableShape::of_function(func);
                self.push_method(parent, &name, kind, modifiers, &shape);

                if kind == MethodKind::Constructor {
                    self.extract_parameter_properties(parent, index, &func.params, member_names);
                }
            }
        }
    }

    /// `constructor(private readonly repo: Repo)` declares the property `repo`.
    fn extract_parameter_properties(
        &mut self,
        parent: Parent,
        index: usize,
        params: &FormalParameters,
        member_names: &mut FxHashSet<(ParentMember, String)>,
    ) {
        for param in &params.items {
            if param.accessibility.is_none() && !param.readonly {
                continue;
            }
            let name = binding_name(self.source, &param.pattern);
            if !member_names.insert((ParentMember::Property, name.clone())) {
                continue;
            }
            let modifiers = Modifiers {
                is_readonly: param.readonly,
                is_optional: param.pattern.optional,
                visibility: accessibility_visibility(param.accessibility),
                ..Default::default()
            };
            let type_text = annotation_text(self.source, binding_type(&param.pattern));
            self.push_property(parent, index, &name, type_text, modifiers, false);
        }
    }

    fn extract_class_field(
        &mut self,
        parent: Parent,
        index: usize,
        field: &PropertyDefinition,
        member_names: &mut FxHashSet<(ParentMember, String)>,
    ) {
        let name = property_key_name(self.source, &field.key);
        let mut modifiers = Modifiers {
            is_static: field.r#static,
            is_optional: field.optional,
            is_readonly: field.readonly,
            visibility: visibility(&field.key, field.accessibility),
            ..Default::default()
        };

        // Function-valued fields are methods
        if let Some(shape) = field.value.as_ref().and_then(CallableShape::of_expression) {
            if member_names.insert((ParentMember::Method, name.clone())) {
                modifiers.is_async = shape.is_async;
                let shape = CallableShape {
                    return_type: shape.return_type.or_else(|| {
                        field.type_annotation.as_deref().and_then(function_type_return)
                    }),
                    ..shape
                };
                self.push_method(parent, &name, MethodKind::Method, modifiers, &shape);
            }
            return;
        }

        // So are fields annotated with a function type
        if let Some(annotation) = field.type_annotation.as_deref()
            && let TSType::TSFunctionType(fn_type) = unwrap_parenthesized(&annotation.type_annotation)
        {
            if member_names.insert((ParentMember::Method, name.clone())) {
                let shape = CallableShape {
                    params: &fn_type.params,
                    return_type: Some(&*fn_type.return_type),
                    type_parameters: fn_type.type_parameters.as_deref(),
                    body: None,
                    is_async: false,
                    is_generator: false,
                };
                self.push_method(parent, &name, MethodKind::Method, modifiers, &shape);
            }
            return;
        }

        if !member_names.insert((ParentMember::Property, name.clone())) {
            return;
        }
        let type_text = annotation_text(self.source, field.type_annotation.as_deref());
        self.push_property(parent, index, &name, type_text, modifiers, false);
    }

    pub(super) fn extract_interface(&mut self, interface: &TSInterfaceDeclaration, exported: bool) {
        let name = interface.id.name.as_str();
        if !self.interface_declarations.insert(interface.span.start) {
            return;
        }
        let interface_id = self.scoped_id(EntityKind::Interface, name);

        // Later declarations of the same name merge into the first record
        if self.first_sighting(EntityKind::Interface, name) {
            self.out.interfaces.push(Interface {
                id: interface_id,
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                name: name.to_string(),
                is_exported: exported,
                type_parameters: type_parameter_names(interface.type_parameters.as_deref()),
            });
        } else if exported
            && let Some(record) = self.out.interfaces.iter_mut().find(|i| i.id == interface_id)
        {
            record.is_exported = true;
        }

        for heritage in &interface.extends {
            let Some(extended_name) = heritage_name(&heritage.expression) else {
                continue;
            };
            self.out.interface_extends.push(InterfaceExtendsRef {
                id: generate_id(
                    EntityKind::InterfaceExtends,
                    &keys::deferred("interface_extends", &interface_id, &extended_name),
                ),
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                interface_id,
                extended_name,
                extended_id: None,
                status: ResolutionStatus::Unresolved,
            });
        }

        let parent = Parent {
            id: interface_id,
            kind: ParentType::Interface,
        };
        let mut member_names = self.interface_members.remove(&interface_id).unwrap_or_default();
        for (index, signature) in interface.body.body.iter().enumerate() {
            match signature {
                TSSignature::TSPropertySignature(prop) => {
                    let name = property_key_name(self.source, &prop.key);
                    let modifiers = Modifiers {
                        is_optional: prop.optional,
                        is_readonly: prop.readonly,
                        ..Default::default()
                    };

                    if let Some(annotation) = prop.type_annotation.as_deref()
                        && let TSType::TSFunctionType(fn_type) =
                            unwrap_parenthesized(&annotation.type_annotation)
                    {
                        if member_names.insert((ParentMember::Method, name.clone())) {
                            let shape = CallableShape {
                                params: &fn_type.params,
                                return_type: Some(&*fn_type.return_type),
                                type_parameters: fn_type.type_parameters.as_deref(),
                                body: None,
                                is_async: false,
                                is_generator: false,
                            };
                            self.push_method(parent, &name, MethodKind::Method, modifiers, &shape);
                        }
                        continue;
                    }

                    if member_names.insert((ParentMember::Property, name.clone())) {
                        let type_text = annotation_text(self.source, prop.type_annotation.as_deref());
                        self.push_property(parent, index, &name, type_text, modifiers, false);
                    }
                }
                TSSignature::TSMethodSignature(method) => {
                    let name = property_key_name(self.source, &method.key);
                    let modifiers = Modifiers {
                        is_optional: method.optional,
                        ..Default::default()
                    };
                    match method.kind {
                        TSMethodSignatureKind::Method => {
                            if member_names.insert((ParentMember::Method, name.clone())) {
                                let shape = CallableShape {
                                    params: &method.params,
                                    return_type: method.return_type.as_deref(),
                                    type_parameters: method.type_parameters.as_deref(),
                                    body: None,
                                    is_async: false,
                                    is_generator: false,
                                };
                                self.push_method(parent, &name, MethodKind::Method, modifiers, &shape);
                            }
                        }
                        TSMethodSignatureKind::Get | TSMethodSignatureKind::Set => {
                            if !member_names.insert((ParentMember::Property, name.clone())) {
                                continue;
                            }
                            let type_text = if method.kind == TSMethodSignatureKind::Get {
                                annotation_text(self.source, method.return_type.as_deref())
                            } else {
                                method.params.items.first().and_then(|p| {
                                    annotation_text(self.source, binding_type(&p.pattern))
                                })
                            };
                            self.push_property(parent, index, &name, type_text, modifiers, true);
                        }
                    }
                }
                _ => {}
            }
        }
        self.interface_members.insert(interface_id, member_names);
    }

    fn push_method(
        &mut self,
        parent: Parent,
        name: &str,
        kind: MethodKind,
        modifiers: Modifiers,
        shape: &CallableShape,
    ) {
        let id = generate_id(
            EntityKind::Method,
            &keys::method(
                &self.ctx.package_id,
                &self.ctx.module_id,
                &parent.id,
                parent.kind.as_str(),
                name,
            ),
        );

        self.out.methods.push(Method {
            id,
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            parent_id: parent.id,
            parent_type: parent.kind,
            name: name.to_string(),
            kind,
            return_type: return_type_text(
                self.source,
                shape.return_type,
                modifiers.is_async,
                kind == MethodKind::Constructor,
            ),
            is_static: modifiers.is_static,
            is_async: modifiers.is_async,
            is_abstract: modifiers.is_abstract,
            is_optional: modifiers.is_optional,
            visibility: modifiers.visibility,
        });

        self.push_parameters(id, shape.params);
        if let Some(body) = shape.body {
            self.push_usages(id, SourceSymbolType::Method, name, Some(parent.id), body);
        }
    }

    fn push_property(
        &mut self,
        parent: Parent,
        index: usize,
        name: &str,
        type_text: Option<String>,
        modifiers: Modifiers,
        is_accessor: bool,
    ) {
        self.out.properties.push(Property {
            id: generate_id(
                EntityKind::Property,
                &keys::property(
                    &self.ctx.package_id,
                    &self.ctx.module_id,
                    &parent.id,
                    parent.kind.as_str(),
                    name,
                    index,
                ),
            ),
            package_id: self.ctx.package_id,
            module_id: self.ctx.module_id,
            parent_id: parent.id,
            parent_type: parent.kind,
            name: name.to_string(),
            type_text: type_text.unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            is_static: modifiers.is_static,
            is_readonly: modifiers.is_readonly,
            is_optional: modifiers.is_optional,
            is_accessor,
            visibility: modifiers.visibility,
        });
    }

    /// Parameters of a method or function, rest parameter last.
    pub(super) fn push_parameters(&mut self, owner_id: EntityId, params: &FormalParameters) {
        let mut entries = Vec::with_capacity(params.items.len() + 1);
        for param in &params.items {
            let pattern = &param.pattern;
            let is_optional = pattern.optional
                || matches!(pattern.kind, BindingPatternKind::AssignmentPattern(_));
            entries.push((pattern, is_optional, false));
        }
        if let Some(rest) = &params.rest {
            entries.push((&rest.argument, true, true));
        }

        for (position, (pattern, is_optional, is_rest)) in entries.into_iter().enumerate() {
            let name = binding_name(self.source, pattern);
            let type_text = annotation_text(self.source, binding_type(pattern))
                .unwrap_or_else(|| DEFAULT_TYPE.to_string());
            self.out.parameters.push(Parameter {
                id: generate_id(
                    EntityKind::Parameter,
                    &keys::parameter(
                        &self.ctx.package_id,
                        &self.ctx.module_id,
                        &owner_id,
                        &name,
                        position,
                    ),
                ),
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                method_id: owner_id,
                name,
                type_text,
                position,
                is_optional,
                is_rest,
            });
        }
    }

    /// Raw usages of one body, attributed to the declaration owning it.
    pub(super) fn push_usages(
        &mut self,
        source_id: EntityId,
        source_type: SourceSymbolType,
        source_name: &str,
        parent_id: Option<EntityId>,
        body: &FunctionBody,
    ) {
        for usage in collect_usages(body) {
            let id = generate_id(
                EntityKind::SymbolUsage,
                &keys::symbol_usage(
                    &source_id,
                    usage.target_kind.as_str(),
                    usage.qualifier.as_ref().map(Qualifier::as_str),
                    &usage.target_name,
                ),
            );
            self.out.symbol_usages.push(SymbolUsageRef {
                id,
                package_id: self.ctx.package_id,
                module_id: self.ctx.module_id,
                source_symbol_id: source_id,
                source_symbol_type: source_type,
                source_symbol_name: source_name.to_string(),
                source_parent_id: parent_id,
                target_kind: usage.target_kind,
                target_name: usage.target_name,
                qualifier: usage.qualifier,
            });
        }
    }
}

/// Members of one parent are deduplicated per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum ParentMember {
    Method,
    Property,
}

/// Return annotation of a field typed as a function.
fn function_type_return<'t, 'a>(annotation: &'t TSTypeAnnotation<'a>) -> Option<&'t TSTypeAnnotation<'a>> {
    match unwrap_parenthesized(&annotation.type_annotation) {
        TSType::TSFunctionType(fn_type) => Some(&*fn_type.return_type),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::context;
    use super::super::{FileExtraction, extract_source};
    use crate::model::{MethodKind, ParentType, Qualifier, TargetKind, Visibility};

    fn extract(source: &str) -> FileExtraction {
        extract_source(&context("src/user.ts"), source).unwrap()
    }

    #[test]
    fn test_class_members_and_modifiers() {
        let result = extract(
            r#"
            export abstract class Repo<T, K> extends Base implements Store, ns.Closable {
                static count: number = 0;
                readonly name?: string;
                #secret = 1;
                protected items: T[] = [];
                constructor(private readonly db: Db, label: string) { super(); }
                async load(id: K): Promise<T> { return this.db.get(id); }
                abstract save(item: T): void;
                get size(): number { return this.items.length; }
                set size(value: number) {}
                onChange = (next: T) => { this.emit(next); };
                handler: (e: Event) => boolean;
                [key: string]: unknown;
                static { init(); }
            }
            "#,
        );

        let class = &result.classes[0];
        assert_eq!(class.name, "Repo");
        assert!(class.is_exported && class.is_abstract);
        assert_eq!(class.type_parameters, vec!["T", "K"]);

        assert_eq!(result.class_extends[0].parent_name, "Base");
        let implemented: Vec<_> = result
            .class_implements
            .iter()
            .map(|r| r.interface_name.as_str())
            .collect();
        assert_eq!(implemented, vec!["Store", "Closable"]);

        let methods: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["constructor", "load", "save", "onChange", "handler"]);
        let constructor = &result.methods[0];
        assert_eq!(constructor.kind, MethodKind::Constructor);
        assert_eq!(constructor.return_type, "void");
        let load = &result.methods[1];
        assert!(load.is_async);
        assert_eq!(load.return_type, "Promise<T>");
        assert!(result.methods[2].is_abstract);
        assert_eq!(result.methods[4].return_type, "boolean");

        let properties: Vec<_> = result.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(properties, vec!["count", "name", "#secret", "items", "db", "size"]);
        let by_name = |name: &str| result.properties.iter().find(|p| p.name == name).unwrap();
        assert!(by_name("count").is_static);
        assert!(by_name("name").is_readonly && by_name("name").is_optional);
        assert_eq!(by_name("#secret").visibility, Visibility::Private);
        assert_eq!(by_name("#secret").type_text, "any");
        assert_eq!(by_name("items").visibility, Visibility::Protected);
        assert_eq!(by_name("items").type_text, "T[]");
        assert_eq!(by_name("db").visibility, Visibility::Private);
        assert!(by_name("size").is_accessor);
        assert_eq!(by_name("size").type_text, "number");
        assert!(result.properties.iter().all(|p| p.parent_type == ParentType::Class));
    }

    #[test]
    fn test_parameters() {
        let result = extract(
            "class C { run(a: string, { x, y }: Point, b = 2, ...rest: number[]) {} }",
        );
        let params: Vec<_> = result
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.position, p.is_optional, p.is_rest))
            .collect();
        assert_eq!(
            params,
            vec![
                ("a", 0, false, false),
                ("{ x, y }", 1, false, false),
                ("b", 2, true, false),
                ("rest", 3, true, true),
            ]
        );
        assert_eq!(result.parameters[1].type_text, "Point");
        assert_eq!(result.parameters[2].type_text, "any");
        assert!(result.parameters.iter().all(|p| p.method_id == result.methods[0].id));
    }

    #[test]
    fn test_interface_members() {
        let result = extract(
            r#"
            interface Service<T> extends Base, Other<T> {
                readonly id: string;
                label?: string;
                fetch(id: string): Promise<T>;
                onReady: () => void;
                format: ((value: T) => string);
                get version(): number;
                (call: number): void;
                [key: string]: unknown;
            }
            "#,
        );

        let interface = &result.interfaces[0];
        assert!(!interface.is_exported);
        assert_eq!(interface.type_parameters, vec!["T"]);

        let extended: Vec<_> = result
            .interface_extends
            .iter()
            .map(|r| r.extended_name.as_str())
            .collect();
        assert_eq!(extended, vec!["Base", "Other"]);

        let methods: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["fetch", "onReady", "format"]);
        assert!(result.methods.iter().all(|m| m.parent_type == ParentType::Interface));
        assert_eq!(result.methods[1].return_type, "void");
        assert_eq!(result.methods[2].return_type, "string");

        let properties: Vec<_> = result.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(properties, vec!["id", "label", "version"]);
        assert_eq!(result.properties[2].type_text, "number");

        let params: Vec<_> = result.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["id", "value"]);
    }

    #[test]
    fn test_method_usages_are_scoped_and_deduplicated() {
        let result = extract(
            r#"
            class Counter {
                x = 0;
                bump() { this.x++; this.x += 1; return this.x; }
                reset() { this.x = 0; this.log('reset'); }
            }
            "#,
        );

        let bump_id = result.methods.iter().find(|m| m.name == "bump").unwrap().id;
        let bump_usages: Vec<_> = result
            .symbol_usages
            .iter()
            .filter(|u| u.source_symbol_id == bump_id)
            .collect();
        assert_eq!(bump_usages.len(), 1);
        assert_eq!(bump_usages[0].target_name, "x");
        assert_eq!(bump_usages[0].qualifier, Some(Qualifier::This));
        assert_eq!(bump_usages[0].target_kind, TargetKind::Property);
        assert_eq!(bump_usages[0].source_parent_id, Some(result.classes[0].id));

        // the same access from another method is a separate usage
        assert_eq!(result.symbol_usages.len(), 3);
    }

    #[test]
    fn test_same_name_properties_get_distinct_ids() {
        let a = extract("class A { value = 1; }");
        let b = extract("class A { other = 0; value = 1; }");
        assert_ne!(a.properties[0].id, b.properties[1].id);
    }

    #[test]
    fn test_overloaded_method_uses_implementation() {
        let result = extract(
            r#"
            class Parser {
                helper() {}
                parse(input: string): number;
                parse(input: any, strict?: boolean): number {
                    return this.helper();
                }
            }
            "#,
        );

        let parse: Vec<_> = result.methods.iter().filter(|m| m.name == "parse").collect();
        assert_eq!(parse.len(), 1);
        let parse = parse[0];

        let params: Vec<_> = result
            .parameters
            .iter()
            .filter(|p| p.method_id == parse.id)
            .map(|p| (p.name.as_str(), p.type_text.as_str()))
            .collect();
        assert_eq!(params, vec![("input", "any"), ("strict", "boolean")]);

        let usages: Vec<_> = result
            .symbol_usages
            .iter()
            .filter(|u| u.source_symbol_id == parse.id)
            .map(|u| (u.target_kind, u.target_name.as_str()))
            .collect();
        assert_eq!(usages, vec![(TargetKind::Method, "helper")]);
    }

    #[test]
    fn test_abstract_signature_without_implementation_is_kept() {
        let result = extract("abstract class Shape { abstract area(): number; }");
        assert_eq!(result.methods.len(), 1);
        assert!(result.methods[0].is_abstract);
    }

    #[test]
    fn test_repeated_interface_declarations_merge() {
        let result = extract(
            r#"
            interface Props extends Base { a: string; }
            export interface Props extends Extra { b: number; a: string; render(): void; }
            "#,
        );

        assert_eq!(result.interfaces.len(), 1);
        let props = &result.interfaces[0];
        assert!(props.is_exported);

        let properties: Vec<_> = result.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(properties, vec!["a", "b"]);
        assert!(result.properties.iter().all(|p| p.parent_id == props.id));

        let methods: Vec<_> = result.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["render"]);

        let extended: Vec<_> = result
            .interface_extends
            .iter()
            .map(|r| r.extended_name.as_str())
            .collect();
        assert_eq!(extended, vec!["Base", "Extra"]);
    }
}
