//! Constraints a stack view and its sizing rules contribute to the layout pass

use super::anchor::{Anchor, AnchorRef};
use super::solver::{
    ConstraintOrigin, ConstraintSolver, ConstraintSource, Priority, Relation, SolverError, Term,
};
use super::view::{StackAlignment, StackConfig, ViewId, ViewNode};

fn describe(lhs: AnchorRef, relation: Relation, rhs: AnchorRef) -> String {
    let op = match relation {
        Relation::Equal => "=",
        Relation::GreaterOrEqual => ">=",
        Relation::LessOrEqual => "<=",
    };
    format!(
        "{}.{:?} {} {}.{:?}",
        lhs.view, lhs.anchor, op, rhs.view, rhs.anchor
    )
}

fn arrange(
    solver: &mut ConstraintSolver,
    lhs: AnchorRef,
    relation: Relation,
    rhs: AnchorRef,
) -> Result<(), SolverError> {
    let source = ConstraintSource::new(
        ConstraintOrigin::StackArrangement,
        describe(lhs, relation, rhs),
    );
    solver.add(lhs, relation, Term::anchor(rhs), Priority::Required, source)
}

/// Chain the arranged subviews along the stack's axis and align them across it.
///
/// Fill distribution: the first child starts at the stack's leading edge,
/// each child starts where the previous one ends, and the last child ends at
/// the stack's trailing edge.
pub(crate) fn add_arrangement(
    solver: &mut ConstraintSolver,
    stack: ViewId,
    config: StackConfig,
    arranged: &[ViewId],
) -> Result<(), SolverError> {
    let axis = config.axis;
    let cross = axis.cross();
    let mut previous: Option<ViewId> = None;

    for &child in arranged {
        let start = child.anchor(Anchor::leading(axis));
        match previous {
            None => arrange(solver, start, Relation::Equal, stack.anchor(Anchor::leading(axis)))?,
            Some(prev) => arrange(solver, start, Relation::Equal, prev.anchor(Anchor::trailing(axis)))?,
        }
        previous = Some(child);

        let child_lead = child.anchor(Anchor::leading(cross));
        let child_trail = child.anchor(Anchor::trailing(cross));
        let stack_lead = stack.anchor(Anchor::leading(cross));
        let stack_trail = stack.anchor(Anchor::trailing(cross));
        match config.alignment {
            StackAlignment::Fill => {
                arrange(solver, child_lead, Relation::Equal, stack_lead)?;
                arrange(solver, child_trail, Relation::Equal, stack_trail)?;
            }
            StackAlignment::Leading => {
                arrange(solver, child_lead, Relation::Equal, stack_lead)?;
                arrange(solver, child_trail, Relation::LessOrEqual, stack_trail)?;
            }
            StackAlignment::Trailing => {
                arrange(solver, child_trail, Relation::Equal, stack_trail)?;
                arrange(solver, child_lead, Relation::GreaterOrEqual, stack_lead)?;
            }
            StackAlignment::Center => {
                arrange(
                    solver,
                    child.anchor(Anchor::center(cross)),
                    Relation::Equal,
                    stack.anchor(Anchor::center(cross)),
                )?;
                arrange(solver, child_lead, Relation::GreaterOrEqual, stack_lead)?;
            }
        }
    }

    if let Some(last) = previous {
        arrange(
            solver,
            last.anchor(Anchor::trailing(axis)),
            Relation::Equal,
            stack.anchor(Anchor::trailing(axis)),
        )?;
    }
    Ok(())
}

/// Sizes never go negative, intrinsic sizes hold at medium strength and any
/// dimension nothing else decides collapses to zero.
pub(crate) fn add_sizing(
    solver: &mut ConstraintSolver,
    view: ViewId,
    node: &ViewNode,
) -> Result<(), SolverError> {
    let dimensions = [
        (view.width(), node.spec.intrinsic_width),
        (view.height(), node.spec.intrinsic_height),
    ];
    for (anchor, intrinsic) in dimensions {
        solver.add(
            anchor,
            Relation::GreaterOrEqual,
            Term::constant(0.0),
            Priority::Required,
            ConstraintSource::new(
                ConstraintOrigin::Intrinsic,
                format!("{}.{:?} >= 0", view, anchor.anchor),
            ),
        )?;
        solver.add(
            anchor,
            Relation::Equal,
            Term::constant(0.0),
            Priority::Weak,
            ConstraintSource::new(
                ConstraintOrigin::Intrinsic,
                format!("{}.{:?} collapses", view, anchor.anchor),
            ),
        )?;
        if let Some(value) = intrinsic {
            solver.add(
                anchor,
                Relation::Equal,
                Term::constant(value),
                Priority::Medium,
                ConstraintSource::new(
                    ConstraintOrigin::Intrinsic,
                    format!("{}.{:?} = {} (intrinsic)", view, anchor.anchor, value),
                ),
            )?;
        }
    }
    Ok(())
}
