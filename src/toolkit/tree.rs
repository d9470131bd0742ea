//! The view tree: owns every view and active constraint, runs layout and
//! hit testing.
//!
//! All operations take `&self`; the tree is meant to be driven from a single
//! UI thread and uses a `RefCell` internally, so nested builder expressions
//! can borrow it freely while they construct views.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::anchor::{Constraint, ConstraintId};
use super::arrangement::{add_arrangement, add_sizing};
use super::error::ToolkitError;
use super::geometry::{Point, Rect, Size};
use super::solver::{
    ConstraintOrigin, ConstraintSolver, ConstraintSource, Priority, Relation, Term,
};
use super::view::{
    Axis, Distribution, StackAlignment, StackConfig, ViewId, ViewKind, ViewNode, ViewSpec,
};

#[derive(Debug, Default)]
struct TreeState {
    views: Vec<ViewNode>,
    constraints: Vec<Constraint>,
}

impl TreeState {
    fn view(&self, id: ViewId) -> Result<&ViewNode, ToolkitError> {
        self.views.get(id.0).ok_or(ToolkitError::UnknownView(id))
    }

    fn view_mut(&mut self, id: ViewId) -> Result<&mut ViewNode, ToolkitError> {
        self.views.get_mut(id.0).ok_or(ToolkitError::UnknownView(id))
    }

    fn push(&mut self, node: ViewNode) -> ViewId {
        let id = ViewId(self.views.len());
        self.views.push(node);
        id
    }

    /// Whether `ancestor` is `view` or one of its ancestors
    fn is_ancestor_or_self(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.views.get(id.0).and_then(|node| node.parent);
        }
        false
    }

    fn attach(&mut self, parent: ViewId, child: ViewId) -> Result<(), ToolkitError> {
        self.view(parent)?;
        if let Some(existing) = self.view(child)?.parent {
            return Err(ToolkitError::AlreadyHasParent {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(ToolkitError::WouldCreateCycle { parent, child });
        }
        self.view_mut(child)?.parent = Some(parent);
        self.view_mut(parent)?.subviews.push(child);
        Ok(())
    }

    /// Every view exists, has no parent and appears once
    fn check_detached(&self, children: &[ViewId]) -> Result<(), ToolkitError> {
        let mut seen = HashSet::new();
        for &child in children {
            if let Some(parent) = self.view(child)?.parent {
                return Err(ToolkitError::AlreadyHasParent { child, parent });
            }
            if !seen.insert(child) {
                return Err(ToolkitError::DuplicateChild(child));
            }
        }
        Ok(())
    }

    /// Pre-order list of a view and its descendants
    fn subtree(&self, root: ViewId) -> Vec<ViewId> {
        let mut order = Vec::new();
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            order.push(id);
            if let Some(node) = self.views.get(id.0) {
                pending.extend(node.subviews.iter().rev().copied());
            }
        }
        order
    }

    fn stack_config_mut(&mut self, id: ViewId) -> Result<&mut StackConfig, ToolkitError> {
        match &mut self.view_mut(id)?.kind {
            ViewKind::Stack(config) => Ok(config),
            ViewKind::Plain => Err(ToolkitError::NotAStack(id)),
        }
    }

    /// Standard hit test with the point in `id`'s own coordinate space,
    /// followed by the view's hook.
    fn hit_test_view(&self, id: ViewId, point: Point) -> Option<ViewId> {
        let node = self.views.get(id.0)?;
        if !node.spec.interactive || !node.frame.bounds().contains(point) {
            return None;
        }
        let standard = node
            .subviews
            .iter()
            .rev()
            .find_map(|&child| {
                let origin = self.views.get(child.0)?.frame.origin();
                self.hit_test_view(child, point.relative_to(origin))
            })
            .or(Some(id));
        match node.spec.hit_test_hook {
            Some(hook) => hook(id, standard),
            None => standard,
        }
    }
}

/// A retained hierarchy of views with anchor constraints
#[derive(Debug, Default)]
pub struct ViewTree {
    state: RefCell<TreeState>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plain view
    pub fn create_view(&self, spec: ViewSpec) -> ViewId {
        self.state
            .borrow_mut()
            .push(ViewNode::new(spec, ViewKind::Plain))
    }

    /// Create an empty stack view (horizontal, fill alignment, fill distribution)
    pub fn create_stack(&self, spec: ViewSpec) -> ViewId {
        self.state
            .borrow_mut()
            .push(ViewNode::new(spec, ViewKind::Stack(StackConfig::default())))
    }

    /// Create a top-level view that keeps the given size
    pub fn create_window(&self, size: Size) -> ViewId {
        let mut node = ViewNode::new(ViewSpec::new().named("window"), ViewKind::Plain);
        node.frame = Rect::from_size(size);
        self.state.borrow_mut().push(node)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: ViewId) -> bool {
        id.0 < self.len()
    }

    fn read<R>(&self, id: ViewId, f: impl FnOnce(&ViewNode) -> R) -> Result<R, ToolkitError> {
        let state = self.state.borrow();
        state.view(id).map(f)
    }

    fn write<R>(&self, id: ViewId, f: impl FnOnce(&mut ViewNode) -> R) -> Result<R, ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.view_mut(id).map(f)
    }

    pub fn name(&self, id: ViewId) -> Result<Option<String>, ToolkitError> {
        self.read(id, |node| node.spec.name.clone())
    }

    pub fn set_name(&self, id: ViewId, name: impl Into<String>) -> Result<(), ToolkitError> {
        let name = name.into();
        self.write(id, |node| node.spec.name = Some(name))
    }

    pub fn kind(&self, id: ViewId) -> Result<ViewKind, ToolkitError> {
        self.read(id, |node| node.kind)
    }

    pub fn stack_config(&self, id: ViewId) -> Result<Option<StackConfig>, ToolkitError> {
        self.read(id, |node| node.stack_config())
    }

    pub fn parent(&self, id: ViewId) -> Result<Option<ViewId>, ToolkitError> {
        self.read(id, |node| node.parent)
    }

    pub fn subviews(&self, id: ViewId) -> Result<Vec<ViewId>, ToolkitError> {
        self.read(id, |node| node.subviews.clone())
    }

    pub fn arranged_subviews(&self, id: ViewId) -> Result<Vec<ViewId>, ToolkitError> {
        self.read(id, |node| node.arranged_subviews.clone())
    }

    /// Ancestors from the parent up to the top-level view
    pub fn ancestors(&self, id: ViewId) -> Result<Vec<ViewId>, ToolkitError> {
        let state = self.state.borrow();
        let mut ancestors = Vec::new();
        let mut current = state.view(id)?.parent;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = state.view(parent)?.parent;
        }
        Ok(ancestors)
    }

    /// Frame in the parent's coordinate space
    pub fn frame(&self, id: ViewId) -> Result<Rect, ToolkitError> {
        self.read(id, |node| node.frame)
    }

    /// Frame in the coordinate space of the top-level ancestor
    pub fn absolute_frame(&self, id: ViewId) -> Result<Rect, ToolkitError> {
        let state = self.state.borrow();
        let node = state.view(id)?;
        if node.parent.is_none() {
            return Ok(node.frame.bounds());
        }
        let mut frame = node.frame;
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent_node = state.view(parent)?;
            if parent_node.parent.is_none() {
                break;
            }
            frame = frame.offset_by(parent_node.frame.origin());
            current = parent_node.parent;
        }
        Ok(frame)
    }

    /// Set the frame directly (kept by views that translate their autoresizing mask)
    pub fn set_frame(&self, id: ViewId, frame: Rect) -> Result<(), ToolkitError> {
        self.write(id, |node| node.frame = frame)
    }

    pub fn translates_autoresizing_mask(&self, id: ViewId) -> Result<bool, ToolkitError> {
        self.read(id, |node| node.translates_autoresizing_mask)
    }

    pub fn set_translates_autoresizing_mask(
        &self,
        id: ViewId,
        translates: bool,
    ) -> Result<(), ToolkitError> {
        self.write(id, |node| node.translates_autoresizing_mask = translates)
    }

    pub fn is_interactive(&self, id: ViewId) -> Result<bool, ToolkitError> {
        self.read(id, |node| node.spec.interactive)
    }

    pub fn set_interactive(&self, id: ViewId, interactive: bool) -> Result<(), ToolkitError> {
        self.write(id, |node| node.spec.interactive = interactive)
    }

    pub fn has_hit_test_hook(&self, id: ViewId) -> Result<bool, ToolkitError> {
        self.read(id, |node| node.spec.hit_test_hook.is_some())
    }

    pub fn text(&self, id: ViewId) -> Result<Option<String>, ToolkitError> {
        self.read(id, |node| node.spec.text.clone())
    }

    /// Replace a view's content: its text and the intrinsic size that goes with it
    pub fn set_content(
        &self,
        id: ViewId,
        text: impl Into<String>,
        intrinsic_size: Size,
    ) -> Result<(), ToolkitError> {
        let text = text.into();
        self.write(id, |node| {
            node.spec.text = Some(text);
            node.spec.intrinsic_width = Some(intrinsic_size.width);
            node.spec.intrinsic_height = Some(intrinsic_size.height);
        })
    }

    pub fn intrinsic_size(&self, id: ViewId) -> Result<(Option<f64>, Option<f64>), ToolkitError> {
        self.read(id, |node| (node.spec.intrinsic_width, node.spec.intrinsic_height))
    }

    pub fn set_stack_axis(&self, id: ViewId, axis: Axis) -> Result<(), ToolkitError> {
        self.state.borrow_mut().stack_config_mut(id)?.axis = axis;
        Ok(())
    }

    pub fn set_stack_alignment(
        &self,
        id: ViewId,
        alignment: StackAlignment,
    ) -> Result<(), ToolkitError> {
        self.state.borrow_mut().stack_config_mut(id)?.alignment = alignment;
        Ok(())
    }

    pub fn set_stack_distribution(
        &self,
        id: ViewId,
        distribution: Distribution,
    ) -> Result<(), ToolkitError> {
        self.state.borrow_mut().stack_config_mut(id)?.distribution = distribution;
        Ok(())
    }

    /// Attach `child` as the frontmost subview of `parent`
    pub fn add_subview(&self, parent: ViewId, child: ViewId) -> Result<(), ToolkitError> {
        self.state.borrow_mut().attach(parent, child)
    }

    /// Attach `child` to a stack view and append it to the arrangement.
    /// Arranged subviews are positioned by the stack, so their
    /// autoresizing-mask translation is switched off.
    pub fn add_arranged_subview(&self, stack: ViewId, child: ViewId) -> Result<(), ToolkitError> {
        self.add_arranged_subviews(stack, &[child])
    }

    /// Check that `children` could all be attached somewhere: each exists,
    /// has no parent and is listed once.
    pub fn check_detached(&self, children: &[ViewId]) -> Result<(), ToolkitError> {
        self.state.borrow().check_detached(children)
    }

    /// Attach several children to a stack view, in order. Nothing is
    /// attached unless every child can be.
    pub fn add_arranged_subviews(
        &self,
        stack: ViewId,
        children: &[ViewId],
    ) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.stack_config_mut(stack)?;
        state.check_detached(children)?;
        if let Some(&child) = children
            .iter()
            .find(|&&child| state.is_ancestor_or_self(child, stack))
        {
            return Err(ToolkitError::WouldCreateCycle {
                parent: stack,
                child,
            });
        }
        for &child in children {
            state.attach(stack, child)?;
            state.view_mut(stack)?.arranged_subviews.push(child);
            state.view_mut(child)?.translates_autoresizing_mask = false;
        }
        Ok(())
    }

    /// Activate a required constraint
    pub fn activate(&self, constraint: Constraint) -> Result<ConstraintId, ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.view(constraint.first.view)?;
        if let Some(second) = constraint.second {
            state.view(second.view)?;
        }
        tracing::trace!(%constraint, "activating constraint");
        state.constraints.push(constraint);
        Ok(ConstraintId(state.constraints.len() - 1))
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<Constraint> {
        self.state.borrow().constraints.get(id.0).copied()
    }

    /// All active constraints, in activation order
    pub fn constraints(&self) -> Vec<Constraint> {
        self.state.borrow().constraints.clone()
    }

    pub fn constraints_involving(&self, view: ViewId) -> Vec<Constraint> {
        self.state
            .borrow()
            .constraints
            .iter()
            .filter(|c| c.involves(view))
            .copied()
            .collect()
    }

    pub fn constraints_between(&self, a: ViewId, b: ViewId) -> Vec<Constraint> {
        self.state
            .borrow()
            .constraints
            .iter()
            .filter(|c| c.relates(a, b))
            .copied()
            .collect()
    }

    /// Solve the layout of `root`'s subtree and write the frames back.
    ///
    /// `root` keeps its current frame; every other view is positioned by its
    /// kept frame, its stack's arrangement and the active constraints.
    /// Constraints reaching outside the subtree are ignored.
    pub fn layout(&self, root: ViewId) -> Result<(), ToolkitError> {
        let absolute = {
            let state = self.state.borrow();
            let root_frame = state.view(root)?.frame;
            let views = state.subtree(root);
            let in_subtree: HashSet<ViewId> = views.iter().copied().collect();
            let mut solver = ConstraintSolver::new();

            for (anchor, value) in [
                (root.left(), 0.0),
                (root.top(), 0.0),
                (root.width(), root_frame.width),
                (root.height(), root_frame.height),
            ] {
                solver.add(
                    anchor,
                    Relation::Equal,
                    Term::constant(value),
                    Priority::Required,
                    ConstraintSource::new(
                        ConstraintOrigin::Autoresizing,
                        format!("{}.{:?} = {} (layout root)", root, anchor.anchor, value),
                    ),
                )?;
            }

            for &id in &views {
                let node = state.view(id)?;
                add_sizing(&mut solver, id, node)?;

                if id != root && node.translates_autoresizing_mask {
                    if let Some(parent) = node.parent {
                        let frame = node.frame;
                        for (anchor, rhs) in [
                            (id.left(), Term::anchor(parent.left()).plus(frame.x)),
                            (id.top(), Term::anchor(parent.top()).plus(frame.y)),
                            (id.width(), Term::constant(frame.width)),
                            (id.height(), Term::constant(frame.height)),
                        ] {
                            solver.add(
                                anchor,
                                Relation::Equal,
                                rhs,
                                Priority::Required,
                                ConstraintSource::new(
                                    ConstraintOrigin::Autoresizing,
                                    format!("{}.{:?} kept from frame", id, anchor.anchor),
                                ),
                            )?;
                        }
                    }
                }

                if let ViewKind::Stack(config) = node.kind {
                    add_arrangement(&mut solver, id, config, &node.arranged_subviews)?;
                }
            }

            for constraint in &state.constraints {
                let inside = in_subtree.contains(&constraint.first.view)
                    && constraint
                        .second
                        .map_or(true, |second| in_subtree.contains(&second.view));
                if !inside {
                    tracing::trace!(%constraint, "skipping constraint outside layout root");
                    continue;
                }
                let rhs = match constraint.second {
                    Some(second) => Term::anchor(second).plus(constraint.constant),
                    None => Term::constant(constraint.constant),
                };
                solver.add(
                    constraint.first,
                    Relation::Equal,
                    rhs,
                    Priority::Required,
                    ConstraintSource::new(ConstraintOrigin::Active, constraint.to_string()),
                )?;
            }

            let solution = solver.solve();
            views
                .iter()
                .map(|&id| (id, solution.frame(id)))
                .collect::<HashMap<_, _>>()
        };

        let mut state = self.state.borrow_mut();
        for (&id, frame) in &absolute {
            if id == root {
                continue;
            }
            let node = state.view_mut(id)?;
            let origin = node
                .parent
                .and_then(|parent| absolute.get(&parent))
                .map(|parent| parent.origin())
                .unwrap_or_default();
            node.frame = Rect::new(
                frame.x - origin.x,
                frame.y - origin.y,
                frame.width,
                frame.height,
            );
        }
        tracing::debug!(%root, views = absolute.len(), "layout pass complete");
        Ok(())
    }

    /// Find the view that should receive a tap at `point` (in `root`'s own
    /// coordinate space). `None` means nothing in this subtree takes it.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Result<Option<ViewId>, ToolkitError> {
        let state = self.state.borrow();
        state.view(root)?;
        let hit = state.hit_test_view(root, point);
        tracing::trace!(%root, x = point.x, y = point.y, ?hit, "hit test");
        Ok(hit)
    }

    /// Indented dump of a subtree: one line per view with its kind and frame
    pub fn dump(&self, root: ViewId) -> Result<String, ToolkitError> {
        let state = self.state.borrow();
        state.view(root)?;
        let mut out = String::new();
        dump_view(&state, root, 0, &mut out);
        Ok(out)
    }
}

fn dump_view(state: &TreeState, id: ViewId, depth: usize, out: &mut String) {
    let Some(node) = state.views.get(id.0) else {
        return;
    };
    let name = node.spec.name.as_deref().unwrap_or("<view>");
    let kind = match node.kind {
        ViewKind::Plain => String::new(),
        ViewKind::Stack(config) => format!(" {:?}/{:?}", config.axis, config.alignment),
    };
    let f = node.frame;
    out.push_str(&format!(
        "{}[{}] {}{} x={:.1} y={:.1} w={:.1} h={:.1}\n",
        "  ".repeat(depth),
        name,
        id,
        kind,
        f.x,
        f.y,
        f.width,
        f.height
    ));
    for &child in &node.subviews {
        dump_view(state, child, depth + 1, out);
    }
}
