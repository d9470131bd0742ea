//! Constraint solver integration for the layout pass
//!
//! Wraps the kasuari Cassowary solver, translating anchor constraints into
//! expressions over per-view variables and extracting solved frames.

use std::collections::HashMap;

use kasuari::{
    Solver as KasuariSolver, Strength, Variable as KasuariVariable, WeightedRelation::*,
};
use thiserror::Error;

use super::anchor::{Anchor, AnchorRef};
use super::geometry::Rect;
use super::view::ViewId;

/// Base variables of a view; every anchor is an expression over these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutProperty {
    X,
    Y,
    Width,
    Height,
}

/// A variable in the constraint system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutVariable {
    pub view: ViewId,
    pub property: LayoutProperty,
}

impl LayoutVariable {
    pub fn new(view: ViewId, property: LayoutProperty) -> Self {
        Self { view, property }
    }
}

/// How strongly the solver should hold a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Required,
    /// Intrinsic content size
    Medium,
    /// Collapse-to-zero preference for otherwise free dimensions
    Weak,
}

impl Priority {
    fn strength(self) -> Strength {
        match self {
            Priority::Required => Strength::REQUIRED,
            Priority::Medium => Strength::MEDIUM,
            Priority::Weak => Strength::WEAK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

/// Origin of a constraint (for error messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOrigin {
    /// Activated on the tree by a caller
    Active,
    /// Generated from a stack view's arrangement
    StackArrangement,
    /// Generated from intrinsic content size or size floors
    Intrinsic,
    /// Generated from a frame the view keeps (translates autoresizing mask)
    Autoresizing,
}

/// Tracks where a constraint came from
#[derive(Debug, Clone)]
pub struct ConstraintSource {
    pub description: String,
    pub origin: ConstraintOrigin,
}

impl ConstraintSource {
    pub fn new(origin: ConstraintOrigin, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            origin,
        }
    }
}

/// Errors from the constraint solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("unsatisfiable constraints: {reason}")]
    Unsatisfiable {
        conflicting: Vec<ConstraintSource>,
        reason: String,
    },

    #[error("internal solver error: {0}")]
    Internal(String),
}

/// One side of a solver constraint: an anchor, or nothing (constant only)
#[derive(Debug, Clone, Copy)]
pub struct Term {
    pub anchor: Option<AnchorRef>,
    pub constant: f64,
}

impl Term {
    pub fn anchor(anchor: AnchorRef) -> Self {
        Self {
            anchor: Some(anchor),
            constant: 0.0,
        }
    }

    pub fn constant(constant: f64) -> Self {
        Self {
            anchor: None,
            constant,
        }
    }

    pub fn plus(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }
}

/// Wrapper around the kasuari solver
pub struct ConstraintSolver {
    solver: KasuariSolver,
    variables: HashMap<LayoutVariable, KasuariVariable>,
    /// Required constraints added so far, reported on conflicts
    sources: Vec<ConstraintSource>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self {
            solver: KasuariSolver::new(),
            variables: HashMap::new(),
            sources: Vec::new(),
        }
    }

    fn get_or_create_var(&mut self, view: ViewId, property: LayoutProperty) -> KasuariVariable {
        *self
            .variables
            .entry(LayoutVariable::new(view, property))
            .or_insert_with(KasuariVariable::new)
    }

    /// Create a kasuari expression for an anchor
    fn expression(&mut self, anchor: AnchorRef) -> kasuari::Expression {
        let view = anchor.view;
        match anchor.anchor {
            Anchor::Left => self.get_or_create_var(view, LayoutProperty::X).into(),
            Anchor::Top => self.get_or_create_var(view, LayoutProperty::Y).into(),
            Anchor::Width => self.get_or_create_var(view, LayoutProperty::Width).into(),
            Anchor::Height => self.get_or_create_var(view, LayoutProperty::Height).into(),
            Anchor::Right => {
                let x = self.get_or_create_var(view, LayoutProperty::X);
                let width = self.get_or_create_var(view, LayoutProperty::Width);
                x + width
            }
            Anchor::Bottom => {
                let y = self.get_or_create_var(view, LayoutProperty::Y);
                let height = self.get_or_create_var(view, LayoutProperty::Height);
                y + height
            }
            Anchor::CenterX => {
                let x = self.get_or_create_var(view, LayoutProperty::X);
                let width = self.get_or_create_var(view, LayoutProperty::Width);
                x + width * 0.5
            }
            Anchor::CenterY => {
                let y = self.get_or_create_var(view, LayoutProperty::Y);
                let height = self.get_or_create_var(view, LayoutProperty::Height);
                y + height * 0.5
            }
        }
    }

    /// Convert a kasuari error to a SolverError with context
    fn convert_kasuari_error(
        &self,
        e: kasuari::AddConstraintError,
        source: &ConstraintSource,
    ) -> SolverError {
        match e {
            kasuari::AddConstraintError::UnsatisfiableConstraint => {
                let mut conflicting = vec![source.clone()];
                conflicting.extend(self.sources.iter().cloned());
                SolverError::Unsatisfiable {
                    conflicting,
                    reason: format!(
                        "cannot satisfy {}: conflicts with existing constraints",
                        source.description
                    ),
                }
            }
            kasuari::AddConstraintError::DuplicateConstraint => {
                SolverError::Internal(format!("duplicate constraint: {}", source.description))
            }
            kasuari::AddConstraintError::InternalSolverError(msg) => SolverError::Internal(
                format!("internal solver error for {}: {}", source.description, msg),
            ),
        }
    }

    /// Add `lhs <relation> rhs` at the given priority
    pub fn add(
        &mut self,
        lhs: AnchorRef,
        relation: Relation,
        rhs: Term,
        priority: Priority,
        source: ConstraintSource,
    ) -> Result<(), SolverError> {
        let lhs = self.expression(lhs);
        let strength = priority.strength();
        let constraint = match rhs.anchor {
            Some(anchor) => {
                let rhs = self.expression(anchor) + rhs.constant;
                match relation {
                    Relation::Equal => lhs | EQ(strength) | rhs,
                    Relation::GreaterOrEqual => lhs | GE(strength) | rhs,
                    Relation::LessOrEqual => lhs | LE(strength) | rhs,
                }
            }
            None => match relation {
                Relation::Equal => lhs | EQ(strength) | rhs.constant,
                Relation::GreaterOrEqual => lhs | GE(strength) | rhs.constant,
                Relation::LessOrEqual => lhs | LE(strength) | rhs.constant,
            },
        };
        tracing::trace!(constraint = %source.description, ?priority, "adding constraint");
        self.solver
            .add_constraint(constraint)
            .map_err(|e| self.convert_kasuari_error(e, &source))?;
        if priority == Priority::Required {
            self.sources.push(source);
        }
        Ok(())
    }

    /// Solve the constraint system
    pub fn solve(&mut self) -> Solution {
        let changes = self.solver.fetch_changes();

        // Variables that never moved away from zero are not reported
        let mut values = HashMap::new();
        for (kvar, value) in changes {
            for (our_var, &k) in &self.variables {
                if k == *kvar {
                    values.insert(*our_var, *value);
                    break;
                }
            }
        }

        Solution { values }
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Solution from the constraint solver
pub struct Solution {
    pub values: HashMap<LayoutVariable, f64>,
}

impl Solution {
    pub fn get(&self, view: ViewId, property: LayoutProperty) -> f64 {
        self.values
            .get(&LayoutVariable::new(view, property))
            .copied()
            .unwrap_or(0.0)
    }

    /// Solved frame of a view in the root's coordinate space
    pub fn frame(&self, view: ViewId) -> Rect {
        Rect::new(
            self.get(view, LayoutProperty::X),
            self.get(view, LayoutProperty::Y),
            self.get(view, LayoutProperty::Width),
            self.get(view, LayoutProperty::Height),
        )
    }
}
