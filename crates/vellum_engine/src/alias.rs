//! Alias-chain resolution.
//!
//! An alias declaration points at a property of another type, optionally
//! through a nested tail, and the pointed-at property may itself be an
//! alias. Resolution chases the chain to the ultimate direct property,
//! collecting every type visited on the way so that a later change to any
//! of them re-dirties this declaration.
//!
//! A chain that loops back onto one of its own alias declarations is a
//! fatal batch error. A chain that merely cannot be completed (unresolved
//! target type, missing property name) is recoverable: the declaration is
//! stored as unresolved and the problem is reported after commit.

use std::collections::{HashSet, VecDeque};

use vellum_foundation::{Error, PropertyDeclarationId, Result, TypeId};
use vellum_storage::{PropertyBinding, Resolution, Store, TypeReference};

use crate::resolve::{ScopeCache, resolve_reference};

/// Why an alias chain could not be completed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum AliasProblem {
    /// A target type reference along the chain did not resolve.
    UnresolvedTarget(String),
    /// A named property does not exist on the reached type.
    MissingProperty(String),
}

/// The stored outcome of one alias resolution.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct AliasOutcome {
    pub resolution: Resolution,
    pub resolved_alias: Option<(TypeId, PropertyDeclarationId)>,
    pub depends_on: Vec<TypeId>,
    pub problem: Option<AliasProblem>,
}

impl AliasOutcome {
    fn incomplete(depends_on: Vec<TypeId>, problem: AliasProblem) -> Self {
        Self {
            resolution: Resolution::Unresolved,
            resolved_alias: None,
            depends_on,
            problem: Some(problem),
        }
    }
}

/// Resolves the alias declaration `property_name` on `owner`.
///
/// # Errors
///
/// Fails with an alias-cycle error when the chain revisits one of its own
/// alias declarations.
pub(crate) fn resolve_alias(
    store: &Store,
    scopes: &mut ScopeCache,
    owner: TypeId,
    property_name: &str,
) -> Result<AliasOutcome> {
    let Some(record) = store.type_record(owner) else {
        return Ok(AliasOutcome::incomplete(
            Vec::new(),
            AliasProblem::UnresolvedTarget(property_name.to_owned()),
        ));
    };
    let Some(declaration) = record.property(property_name) else {
        return Ok(AliasOutcome::incomplete(
            Vec::new(),
            AliasProblem::MissingProperty(format!("{}.{property_name}", record.name)),
        ));
    };
    let PropertyBinding::Alias {
        target,
        property,
        tail,
    } = &declaration.binding
    else {
        return Err(Error::new(vellum_foundation::ErrorKind::Internal(format!(
            "property '{}.{property_name}' is not an alias",
            record.name
        ))));
    };

    let mut visited: HashSet<PropertyDeclarationId> = HashSet::new();
    visited.insert(declaration.id);
    let mut depends_on: Vec<TypeId> = Vec::new();
    let cycle_path = format!("{}.{property_name}", record.name);

    // Resolve the initial target type from the declaring source.
    let Some(mut current_type) =
        resolve_reference(store, scopes, record.source, target).type_id()
    else {
        return Ok(AliasOutcome::incomplete(
            depends_on,
            AliasProblem::UnresolvedTarget(literal_of(target)),
        ));
    };
    push_dep(&mut depends_on, current_type);

    // The names still to be looked up, front first. An inner alias splices
    // its own names onto the front.
    let mut pending: VecDeque<String> = VecDeque::new();
    pending.push_back(property.clone());
    if let Some(tail) = tail {
        pending.push_back(tail.clone());
    }

    let mut ultimate: Option<(TypeId, PropertyDeclarationId)> = None;
    while let Some(name) = pending.pop_front() {
        let Some((property_owner, property_id)) = store.find_property(current_type, &name) else {
            let type_name = store
                .type_record(current_type)
                .map_or_else(String::new, |r| r.name.clone());
            return Ok(AliasOutcome::incomplete(
                depends_on,
                AliasProblem::MissingProperty(format!("{type_name}.{name}")),
            ));
        };
        push_dep(&mut depends_on, property_owner);
        let Some(found) = store
            .type_record(property_owner)
            .and_then(|r| r.property_by_id(property_id))
        else {
            return Ok(AliasOutcome::incomplete(
                depends_on,
                AliasProblem::MissingProperty(name),
            ));
        };

        match &found.binding {
            PropertyBinding::Type(_) => {
                if pending.is_empty() {
                    ultimate = Some((property_owner, property_id));
                } else {
                    // Descend into the property's type for the tail.
                    let Some(next_type) = found.resolved_type.type_id() else {
                        return Ok(AliasOutcome::incomplete(
                            depends_on,
                            AliasProblem::UnresolvedTarget(literal_of(
                                found.binding.type_reference(),
                            )),
                        ));
                    };
                    push_dep(&mut depends_on, next_type);
                    current_type = next_type;
                }
            }
            PropertyBinding::Alias {
                target,
                property,
                tail,
            } => {
                if !visited.insert(property_id) {
                    return Err(Error::alias_cycle(cycle_path));
                }
                let owner_source = store
                    .type_record(property_owner)
                    .map_or(record.source, |r| r.source);
                let Some(next_type) =
                    resolve_reference(store, scopes, owner_source, target).type_id()
                else {
                    return Ok(AliasOutcome::incomplete(
                        depends_on,
                        AliasProblem::UnresolvedTarget(literal_of(target)),
                    ));
                };
                push_dep(&mut depends_on, next_type);
                current_type = next_type;
                if let Some(tail) = tail {
                    pending.push_front(tail.clone());
                }
                pending.push_front(property.clone());
            }
        }
    }

    let Some((ultimate_owner, ultimate_id)) = ultimate else {
        return Err(Error::new(vellum_foundation::ErrorKind::Internal(format!(
            "alias chain '{cycle_path}' ended without a property"
        ))));
    };
    let resolution = store
        .type_record(ultimate_owner)
        .and_then(|r| r.property_by_id(ultimate_id))
        .map_or(Resolution::Unresolved, |p| p.resolved_type);
    Ok(AliasOutcome {
        resolution,
        resolved_alias: Some((ultimate_owner, ultimate_id)),
        depends_on,
        problem: None,
    })
}

fn push_dep(depends_on: &mut Vec<TypeId>, id: TypeId) {
    if !depends_on.contains(&id) {
        depends_on.push(id);
    }
}

fn literal_of(reference: &TypeReference) -> String {
    reference
        .literal_name()
        .map_or_else(|| reference.to_string(), ToOwned::to_owned)
}
