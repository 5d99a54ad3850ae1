//! Range maps attached to syntax elements by a tree-builder.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::range::SourceRange;

/// Locations of an argument construct: the span of its name token, an
/// optional operator token (e.g. a default-value separator), and the span of
/// the construct as a whole.
///
/// Arguments are immutable; attaching an operator produces a new value and
/// leaves the receiver untouched.
///
/// ```
/// use srcmap::{Argument, SourceRange};
///
/// // `def f(x = 1)`: name `x` at 6..7, `=` at 8..9, expression 6..11.
/// let bare = Argument::spanning(SourceRange::new(6, 7), SourceRange::new(6, 11));
/// let with_default = bare.with_operator(SourceRange::new(8, 9));
///
/// assert_eq!(bare.operator(), None);
/// assert_eq!(with_default.operator(), Some(&SourceRange::new(8, 9)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Argument {
    name: SourceRange,
    operator: Option<SourceRange>,
    expression: SourceRange,
}

impl Argument {
    /// An argument whose expression span is just its name.
    #[must_use]
    pub fn new(name: SourceRange) -> Self {
        Self {
            name,
            operator: None,
            expression: name,
        }
    }

    /// An argument with an explicit expression span wider than its name.
    #[must_use]
    pub fn spanning(name: SourceRange, expression: SourceRange) -> Self {
        Self {
            name,
            operator: None,
            expression,
        }
    }

    /// A copy of this argument with `operator` attached; `name` and
    /// `expression` carry over unchanged.
    #[must_use]
    pub fn with_operator(&self, operator: SourceRange) -> Self {
        Self {
            operator: Some(operator),
            ..*self
        }
    }

    /// Span of the argument's name token.
    #[must_use]
    pub fn name(&self) -> &SourceRange {
        &self.name
    }

    /// Span of the associated operator token, absent until attached.
    #[must_use]
    pub fn operator(&self) -> Option<&SourceRange> {
        self.operator.as_ref()
    }

    /// Span of the argument construct as a whole.
    #[must_use]
    pub fn expression(&self) -> &SourceRange {
        &self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::Argument;
    use crate::range::SourceRange;

    #[test]
    fn expression_defaults_to_the_name_span() {
        let name = SourceRange::new(4, 7);
        let argument = Argument::new(name);
        assert_eq!(argument.expression(), &name);
        assert_eq!(argument.name(), &name);
        assert_eq!(argument.operator(), None);
    }

    #[test]
    fn with_operator_leaves_the_receiver_untouched() {
        let argument = Argument::spanning(SourceRange::new(4, 7), SourceRange::new(4, 12));
        let updated = argument.with_operator(SourceRange::new(8, 9));

        assert_eq!(argument.operator(), None);
        assert_eq!(updated.operator(), Some(&SourceRange::new(8, 9)));
        assert_eq!(updated.name(), argument.name());
        assert_eq!(updated.expression(), argument.expression());
    }
}
