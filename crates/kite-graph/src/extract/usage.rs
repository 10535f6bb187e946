//! Member-access collection inside one method or function body.

use oxc_ast::ast::{
    CallExpression, Class, Expression, FunctionBody, PrivateFieldExpression,
    StaticMemberExpression,
};
use oxc_ast_visit::{Visit, walk};
use rustc_hash::FxHashSet;

use crate::model::{Qualifier, TargetKind};

/// One distinct access: what kind, through what, to which name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawUsage {
    pub target_kind: TargetKind,
    pub qualifier: Option<Qualifier>,
    pub target_name: String,
}

/// Collect the distinct member accesses of a body, in first-seen order.
///
/// Repeated accesses with the same kind, qualifier and name collapse into
/// one entry. Nested class bodies belong to their own members and are not
/// entered.
pub fn collect_usages(body: &FunctionBody) -> Vec<RawUsage> {
    let mut collector = UsageCollector::default();
    collector.visit_function_body(body);
    collector.usages
}

#[derive(Default)]
struct UsageCollector {
    usages: Vec<RawUsage>,
    seen: FxHashSet<RawUsage>,
}

impl UsageCollector {
    fn record(&mut self, target_kind: TargetKind, object: &Expression, target_name: String) {
        let usage = RawUsage {
            target_kind,
            qualifier: qualifier_of(object),
            target_name,
        };
        if self.seen.insert(usage.clone()) {
            self.usages.push(usage);
        }
    }
}

fn qualifier_of(object: &Expression) -> Option<Qualifier> {
    match object.get_inner_expression() {
        Expression::ThisExpression(_) => Some(Qualifier::This),
        Expression::Identifier(ident) => Some(Qualifier::Identifier(ident.name.to_string())),
        _ => None,
    }
}

impl<'a> Visit<'a> for UsageCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        // The callee member is recorded as a method, not a property
        match call.callee.get_inner_expression() {
            Expression::StaticMemberExpression(member) => {
                self.record(TargetKind::Method, &member.object, member.property.name.to_string());
                self.visit_expression(&member.object);
            }
            Expression::PrivateFieldExpression(field) => {
                self.record(TargetKind::Method, &field.object, format!("#{}", field.field.name));
                self.visit_expression(&field.object);
            }
            callee => self.visit_expression(callee),
        }

        for argument in &call.arguments {
            self.visit_argument(argument);
        }
    }

    fn visit_static_member_expression(&mut self, member: &StaticMemberExpression<'a>) {
        self.record(TargetKind::Property, &member.object, member.property.name.to_string());
        walk::walk_static_member_expression(self, member);
    }

    fn visit_private_field_expression(&mut self, field: &PrivateFieldExpression<'a>) {
        self.record(TargetKind::Property, &field.object, format!("#{}", field.field.name));
        walk::walk_private_field_expression(self, field);
    }

    fn visit_class(&mut self, _class: &Class<'a>) {}
}
