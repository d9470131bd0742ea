//! Alignment of a stack's children across its axis

use crate::toolkit::StackAlignment;

/// Cross-axis alignment of a stack's children.
///
/// `LEFT` and `TOP` are the same case as `Leading`, `RIGHT` and `BOTTOM` the
/// same as `Trailing`, whichever axis the stack runs along. Writing `TOP` for
/// a vertical stack therefore aligns its children to the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    Leading,
    #[default]
    Center,
    Trailing,
    Fill,
}

impl Alignment {
    pub const LEFT: Alignment = Alignment::Leading;
    pub const RIGHT: Alignment = Alignment::Trailing;
    pub const TOP: Alignment = Alignment::Leading;
    pub const BOTTOM: Alignment = Alignment::Trailing;

    pub(crate) fn for_stack_view(self) -> StackAlignment {
        match self {
            Alignment::Leading => StackAlignment::Leading,
            Alignment::Center => StackAlignment::Center,
            Alignment::Trailing => StackAlignment::Trailing,
            Alignment::Fill => StackAlignment::Fill,
        }
    }
}
