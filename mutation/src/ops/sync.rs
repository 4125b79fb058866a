//! Derivative fan-out for changed slots.

use tracing::debug;
use warren_core::{NodeId, SlotTag};
use warren_graph::Graph;
use warren_mirror::{DerivativeCache, TemplateCatalog};
use warren_oplog::{Op, UserOp};

use crate::error::MutationResult;

/// Propagate a slot change on `original` into every derivative mirroring it.
///
/// For each derivative holding an occupant at the same tag: when the new
/// child's kind has a registered template for the tag, a fresh derivative is
/// instantiated, spliced in and linked to the new child; otherwise the
/// occupant is removed. Displaced occupants are scheduled for delayed
/// deletion. Recurses down derivative chains, so a change at the top
/// propagates to arbitrary depth.
///
/// Derivatives already pending deletion are skipped, and a derivative with
/// an empty slot is a no-op at that step.
///
/// The fan-out set is resolved through the [`DerivativeCache`], so repeated
/// slot changes on the same mirrored family within one transaction reuse the
/// memoized closure instead of re-walking the derivative edges.
pub(crate) fn sync_slot(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    catalog: &dyn TemplateCatalog,
    ops: &mut UserOp,
    original: NodeId,
    slot: SlotTag,
    new_child: Option<NodeId>,
) -> MutationResult<()> {
    // The cache holds the transitive closure of the family; only the
    // direct derivatives of `original` take part at this level.
    let derivatives: Vec<NodeId> = cache
        .get(graph, original)
        .iter()
        .copied()
        .filter(|d| graph.original_of(*d) == Some(original))
        .collect();
    if derivatives.is_empty() {
        return Ok(());
    }
    let template = new_child
        .and_then(|c| graph.node(c))
        .and_then(|n| catalog.template_for(n.kind, slot));

    for derivative in derivatives {
        if graph.is_delayed(derivative) {
            continue;
        }
        let Some(occupant) = graph.child_at(derivative, slot) else {
            continue;
        };
        match (new_child, &template) {
            (Some(child), Some(template)) => {
                let fresh = graph.create_node(template.kind, template.attributes.clone());
                ops.push(Op::NodeCreated { node: fresh });
                graph.set_child(derivative, slot, Some(fresh))?;
                ops.push(Op::ChildSet {
                    parent: derivative,
                    slot,
                    prev: Some(occupant),
                });
                cache.remove(graph, occupant);
                graph.mark_delayed(occupant)?;
                graph.link_derivative(child, fresh)?;
                ops.push(Op::DerivativeLinked {
                    original: child,
                    derivative: fresh,
                });
                cache.put(graph, fresh);
                debug!(%derivative, %slot, %fresh, "derivative slot replaced");
                sync_slot(graph, cache, catalog, ops, derivative, slot, Some(fresh))?;
            }
            _ => {
                graph.set_child(derivative, slot, None)?;
                ops.push(Op::ChildSet {
                    parent: derivative,
                    slot,
                    prev: Some(occupant),
                });
                cache.remove(graph, occupant);
                graph.mark_delayed(occupant)?;
                debug!(%derivative, %slot, "derivative slot emptied");
                sync_slot(graph, cache, catalog, ops, derivative, slot, None)?;
            }
        }
    }
    Ok(())
}
