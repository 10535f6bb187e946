use rustc_hash::FxHashSet;
use tracing::debug;

use super::{NameIndex, UsageCounts};
use crate::id::{EntityId, EntityKind, generate_id, keys};
use crate::model::{Qualifier, SymbolReference, SymbolUsageRef};

/// Resolve raw member accesses to concrete methods and properties.
///
/// Usages without a findable target are dropped; they are counted, not
/// reported as errors.
pub fn resolve_symbol_usages(
    index: &NameIndex,
    usages: &[SymbolUsageRef],
) -> (Vec<SymbolReference>, UsageCounts) {
    let mut counts = UsageCounts {
        total: usages.len(),
        ..Default::default()
    };
    let mut seen = FxHashSet::default();
    let mut references = Vec::new();

    for usage in usages {
        let Some(target) = resolve_target(index, usage) else {
            counts.dropped += 1;
            continue;
        };
        counts.resolved += 1;

        let id = generate_id(
            EntityKind::SymbolReference,
            &keys::symbol_reference(&usage.source_symbol_id, &target, usage.target_kind.as_str()),
        );
        if !seen.insert(id) {
            continue;
        }
        references.push(SymbolReference {
            id,
            package_id: usage.package_id,
            module_id: usage.module_id,
            source_symbol_id: usage.source_symbol_id,
            source_symbol_type: usage.source_symbol_type,
            source_symbol_name: usage.source_symbol_name.clone(),
            target_symbol_id: target,
            target_kind: usage.target_kind,
            target_name: usage.target_name.clone(),
            qualifier: usage.qualifier.clone(),
        });
    }

    debug!(
        "symbol usages: {} resolved, {} dropped",
        counts.resolved, counts.dropped
    );
    (references, counts)
}

fn resolve_target(index: &NameIndex, usage: &SymbolUsageRef) -> Option<EntityId> {
    let kind = usage.target_kind;
    let name = usage.target_name.as_str();

    let scoped = target_parent(index, usage)
        .and_then(|parent| index.members_of(kind, parent, name).first().copied());

    scoped.or_else(|| match index.members_named(kind, name) {
        [only] => Some(*only),
        _ => None,
    })
}

/// The class or interface the access is made on, when it can be named.
fn target_parent(index: &NameIndex, usage: &SymbolUsageRef) -> Option<EntityId> {
    match usage.qualifier.as_ref()? {
        Qualifier::This => usage.source_parent_id,
        Qualifier::Identifier(name) => index
            .classes_named(name)
            .first()
            .or_else(|| index.interfaces_named(name).first())
            .copied(),
    }
}
