//! Source-text helpers shared by the extractors.

use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Expression, PropertyKey, TSAccessibility, TSType,
    TSTypeAnnotation, TSTypeName, TSTypeParameterDeclaration,
};
use oxc_span::{GetSpan, Span};

use crate::model::Visibility;

/// Type text used when no annotation is present.
pub const DEFAULT_TYPE: &str = "any";
/// Return type of constructors without annotation.
pub const CONSTRUCTOR_RETURN_TYPE: &str = "void";
/// Return type of async functions without annotation.
pub const ASYNC_RETURN_TYPE: &str = "Promise<any>";

/// Slice of the source covered by `span`.
pub fn span_text(source: &str, span: Span) -> &str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
}

/// Collapse every whitespace run to one space and trim.
pub fn normalize_type_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of a type, without the leading `:`.
pub fn type_text(source: &str, ty: &TSType) -> String {
    normalize_type_text(span_text(source, ty.span()))
}

pub fn annotation_text(source: &str, annotation: Option<&TSTypeAnnotation>) -> Option<String> {
    annotation.map(|a| type_text(source, &a.type_annotation))
}

/// Return type text, falling back to the documented defaults.
pub fn return_type_text(
    source: &str,
    annotation: Option<&TSTypeAnnotation>,
    is_async: bool,
    is_constructor: bool,
) -> String {
    annotation_text(source, annotation).unwrap_or_else(|| {
        if is_constructor {
            CONSTRUCTOR_RETURN_TYPE.to_string()
        } else if is_async {
            ASYNC_RETURN_TYPE.to_string()
        } else {
            DEFAULT_TYPE.to_string()
        }
    })
}

pub fn type_parameter_names(params: Option<&TSTypeParameterDeclaration>) -> Vec<String> {
    params
        .map(|decl| decl.params.iter().map(|p| p.name.name.to_string()).collect())
        .unwrap_or_default()
}

/// Name of a member key. Computed keys fall back to their source text.
pub fn property_key_name(source: &str, key: &PropertyKey) -> String {
    match key {
        PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
        PropertyKey::PrivateIdentifier(ident) => format!("#{}", ident.name),
        PropertyKey::StringLiteral(lit) => lit.value.to_string(),
        PropertyKey::NumericLiteral(lit) => lit.value.to_string(),
        other => normalize_type_text(span_text(source, other.span())),
    }
}

/// `#private` names are private regardless of modifiers.
pub fn visibility(key: &PropertyKey, accessibility: Option<TSAccessibility>) -> Visibility {
    if matches!(key, PropertyKey::PrivateIdentifier(_)) {
        return Visibility::Private;
    }
    accessibility_visibility(accessibility)
}

pub fn accessibility_visibility(accessibility: Option<TSAccessibility>) -> Visibility {
    match accessibility {
        Some(TSAccessibility::Private) => Visibility::Private,
        Some(TSAccessibility::Protected) => Visibility::Protected,
        Some(TSAccessibility::Public) | None => Visibility::Public,
    }
}

/// Referenced name of a heritage expression: `Base` or `ns.Base` → `Base`.
pub fn heritage_name(expr: &Expression) -> Option<String> {
    match expr.get_inner_expression() {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.to_string()),
        _ => None,
    }
}

pub fn type_name(name: &TSTypeName) -> Option<String> {
    match name {
        TSTypeName::IdentifierReference(ident) => Some(ident.name.to_string()),
        TSTypeName::QualifiedName(qualified) => Some(qualified.right.name.to_string()),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Display name of a binding: identifiers by name, patterns by source text.
pub fn binding_name(source: &str, pattern: &BindingPattern) -> String {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        BindingPatternKind::AssignmentPattern(assign) => binding_name(source, &assign.left),
        _ => normalize_type_text(span_text(source, pattern.kind.span())),
    }
}

/// Annotation of a binding, looking through default-value patterns.
pub fn binding_type<'p, 'a>(pattern: &'p BindingPattern<'a>) -> Option<&'p TSTypeAnnotation<'a>> {
    pattern.type_annotation.as_deref().or_else(|| match &pattern.kind {
        BindingPatternKind::AssignmentPattern(assign) => binding_type(&assign.left),
        _ => None,
    })
}

/// Every identifier bound by a pattern, in source order.
pub fn bound_names(pattern: &BindingPattern, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(ident.name.to_string()),
        BindingPatternKind::AssignmentPattern(assign) => bound_names(&assign.left, out),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                bound_names(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                bound_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                bound_names(element, out);
            }
            if let Some(rest) = &array.rest {
                bound_names(&rest.argument, out);
            }
        }
    }
}

/// Strip parentheses around a type.
pub fn unwrap_parenthesized<'t, 'a>(ty: &'t TSType<'a>) -> &'t TSType<'a> {
    match ty {
        TSType::TSParenthesizedType(inner) => unwrap_parenthesized(&inner.type_annotation),
        other => other,
    }
}
