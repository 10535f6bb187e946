use rustc_hash::FxHashMap;

use crate::id::EntityId;
use crate::model::{Class, Interface, Method, Property, TargetKind};

/// Whole-package name lookups used by both resolver passes.
///
/// Every list keeps insertion order, which follows the aggregate: sorted
/// module path, then declaration order.
#[derive(Debug, Default)]
pub struct NameIndex {
    classes: FxHashMap<String, Vec<EntityId>>,
    interfaces: FxHashMap<String, Vec<EntityId>>,
    methods: MemberIndex,
    properties: MemberIndex,
}

#[derive(Debug, Default)]
struct MemberIndex {
    by_name: FxHashMap<String, Vec<EntityId>>,
    by_parent: FxHashMap<(EntityId, String), Vec<EntityId>>,
}

impl MemberIndex {
    fn insert(&mut self, id: EntityId, parent_id: EntityId, name: &str) {
        push_unique(self.by_name.entry(name.to_string()).or_default(), id);
        push_unique(
            self.by_parent.entry((parent_id, name.to_string())).or_default(),
            id,
        );
    }
}

fn push_unique(ids: &mut Vec<EntityId>, id: EntityId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

impl NameIndex {
    pub fn build(
        classes: &[Class],
        interfaces: &[Interface],
        methods: &[Method],
        properties: &[Property],
    ) -> Self {
        let mut index = Self::default();
        for class in classes {
            push_unique(index.classes.entry(class.name.clone()).or_default(), class.id);
        }
        for interface in interfaces {
            push_unique(
                index.interfaces.entry(interface.name.clone()).or_default(),
                interface.id,
            );
        }
        for method in methods {
            index.methods.insert(method.id, method.parent_id, &method.name);
        }
        for property in properties {
            index
                .properties
                .insert(property.id, property.parent_id, &property.name);
        }
        index
    }

    pub fn classes_named(&self, name: &str) -> &[EntityId] {
        self.classes.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn interfaces_named(&self, name: &str) -> &[EntityId] {
        self.interfaces.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Methods or properties with this name anywhere in the package.
    pub fn members_named(&self, kind: TargetKind, name: &str) -> &[EntityId] {
        self.members(kind)
            .by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Methods or properties with this name declared directly on `parent_id`.
    pub fn members_of(&self, kind: TargetKind, parent_id: EntityId, name: &str) -> &[EntityId] {
        self.members(kind)
            .by_parent
            .get(&(parent_id, name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn members(&self, kind: TargetKind) -> &MemberIndex {
        match kind {
            TargetKind::Method => &self.methods,
            TargetKind::Property => &self.properties,
        }
    }
}
