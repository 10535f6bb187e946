use tracing::debug;

use super::{NameIndex, ResolutionReport};
use crate::id::EntityId;
use crate::model::{ClassExtendsRef, ClassImplementsRef, InterfaceExtendsRef, ResolutionStatus};

/// Deferred structural references of the whole package.
pub struct RelationshipRefs<'r> {
    pub class_extends: &'r mut [ClassExtendsRef],
    pub class_implements: &'r mut [ClassImplementsRef],
    pub interface_extends: &'r mut [InterfaceExtendsRef],
}

/// Resolve every deferred reference in place.
///
/// Class parents are looked up among class names, implemented and extended
/// interfaces among interface names. The returned report carries the
/// relationship counts only.
pub fn resolve_relationships(index: &NameIndex, refs: RelationshipRefs<'_>) -> ResolutionReport {
    let mut report = ResolutionReport::default();

    for r in refs.class_extends.iter_mut() {
        let (status, target) = pick(index.classes_named(&r.parent_name), r.class_id);
        r.status = status;
        r.parent_id = target;
        report.class_extends.record(status);
    }

    for r in refs.class_implements.iter_mut() {
        let (status, target) = pick(index.interfaces_named(&r.interface_name), r.class_id);
        r.status = status;
        r.interface_id = target;
        report.class_implements.record(status);
    }

    for r in refs.interface_extends.iter_mut() {
        let (status, target) = pick(index.interfaces_named(&r.extended_name), r.interface_id);
        r.status = status;
        r.extended_id = target;
        report.interface_extends.record(status);
    }

    debug!(
        "relationships: extends {:?}, implements {:?}, interface extends {:?}",
        report.class_extends, report.class_implements, report.interface_extends
    );
    report
}

/// Exactly one candidate that is not the owner itself.
fn pick(candidates: &[EntityId], owner: EntityId) -> (ResolutionStatus, Option<EntityId>) {
    match candidates {
        [] => (ResolutionStatus::Unresolved, None),
        [only] if *only == owner => (ResolutionStatus::SelfReference, None),
        [only] => (ResolutionStatus::Resolved, Some(*only)),
        _ => (ResolutionStatus::Ambiguous, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{EntityKind, generate_id};
    use crate::model::{Class, Interface};

    fn id(kind: EntityKind, key: &str) -> EntityId {
        generate_id(kind, key)
    }

    fn class(key: &str, name: &str) -> Class {
        Class {
            id: id(EntityKind::Class, key),
            package_id: id(EntityKind::Package, "p@1"),
            module_id: id(EntityKind::Module, key),
            name: name.to_string(),
            extends_id: None,
            is_exported: true,
            is_abstract: false,
            type_parameters: Vec::new(),
        }
    }

    fn interface(key: &str, name: &str) -> Interface {
        Interface {
            id: id(EntityKind::Interface, key),
            package_id: id(EntityKind::Package, "p@1"),
            module_id: id(EntityKind::Module, key),
            name: name.to_string(),
            is_exported: true,
            type_parameters: Vec::new(),
        }
    }

    fn extends(owner: &Class, parent_name: &str) -> ClassExtendsRef {
        ClassExtendsRef {
            id: id(EntityKind::ClassExtends, parent_name),
            package_id: owner.package_id,
            module_id: owner.module_id,
            class_id: owner.id,
            parent_name: parent_name.to_string(),
            parent_id: None,
            status: ResolutionStatus::Unresolved,
        }
    }

    fn resolve(
        index: &NameIndex,
        class_extends: &mut [ClassExtendsRef],
        class_implements: &mut [ClassImplementsRef],
        interface_extends: &mut [InterfaceExtendsRef],
    ) -> ResolutionReport {
        resolve_relationships(
            index,
            RelationshipRefs {
                class_extends,
                class_implements,
                interface_extends,
            },
        )
    }

    #[test]
    fn test_duplicate_names_stay_ambiguous() {
        let base_a = class("a", "Base");
        let base_b = class("b", "Base");
        let child = class("c", "Child");
        let index = NameIndex::build(&[base_a, base_b, child.clone()], &[], &[], &[]);

        let mut refs = vec![extends(&child, "Base")];
        let report = resolve(&index, &mut refs, &mut [], &mut []);

        assert_eq!(refs[0].status, ResolutionStatus::Ambiguous);
        assert_eq!(refs[0].parent_id, None);
        assert_eq!(report.class_extends.ambiguous, 1);
    }

    #[test]
    fn test_unique_names_resolve() {
        let base = class("a", "Base");
        let user = class("u", "User");
        let repo = interface("r", "Repo");
        let entity = interface("e", "Entity");
        let index = NameIndex::build(
            &[base.clone(), user.clone()],
            &[repo.clone(), entity.clone()],
            &[],
            &[],
        );

        let mut class_extends = vec![extends(&user, "Base")];
        let mut class_implements = vec![ClassImplementsRef {
            id: id(EntityKind::ClassImplements, "u:Repo"),
            package_id: user.package_id,
            module_id: user.module_id,
            class_id: user.id,
            interface_name: "Repo".to_string(),
            interface_id: None,
            status: ResolutionStatus::Unresolved,
        }];
        let mut interface_extends = vec![InterfaceExtendsRef {
            id: id(EntityKind::InterfaceExtends, "r:Entity"),
            package_id: repo.package_id,
            module_id: repo.module_id,
            interface_id: repo.id,
            extended_name: "Entity".to_string(),
            extended_id: None,
            status: ResolutionStatus::Unresolved,
        }];

        let report = resolve(
            &index,
            &mut class_extends,
            &mut class_implements,
            &mut interface_extends,
        );

        assert_eq!(class_extends[0].parent_id, Some(base.id));
        assert_eq!(class_implements[0].interface_id, Some(repo.id));
        assert_eq!(interface_extends[0].extended_id, Some(entity.id));
        assert_eq!(report.class_extends.resolved, 1);
        assert_eq!(report.class_implements.resolved, 1);
        assert_eq!(report.interface_extends.resolved, 1);
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let node = class("n", "Node");
        let index = NameIndex::build(&[node.clone()], &[], &[], &[]);

        let mut refs = vec![extends(&node, "Node")];
        let report = resolve(&index, &mut refs, &mut [], &mut []);

        assert_eq!(refs[0].status, ResolutionStatus::SelfReference);
        assert_eq!(refs[0].parent_id, None);
        assert_eq!(report.class_extends.unresolved, 1);
    }

    #[test]
    fn test_classes_do_not_satisfy_interface_lookups() {
        let user = class("u", "User");
        let shape = class("s", "Shape");
        let index = NameIndex::build(&[user.clone(), shape], &[], &[], &[]);

        let mut implements = vec![ClassImplementsRef {
            id: id(EntityKind::ClassImplements, "u:Shape"),
            package_id: user.package_id,
            module_id: user.module_id,
            class_id: user.id,
            interface_name: "Shape".to_string(),
            interface_id: None,
            status: ResolutionStatus::Unresolved,
        }];
        let report = resolve(&index, &mut [], &mut implements, &mut []);

        assert_eq!(implements[0].status, ResolutionStatus::Unresolved);
        assert_eq!(report.class_implements.unresolved, 1);
    }
}
