/// Builds a [`sequence`](crate::rules::sequence) from a list of operands.
///
/// Operands may be parselets, string literals or fallible constructors.
///
/// ```
/// use parser_framework::{sequence, token};
///
/// let rule = sequence!["(", token("integer"), ")"];
/// assert!(rule.is_ok());
/// ```
#[macro_export]
macro_rules! sequence {
    ($($rule:expr),+ $(,)?) => {
        $crate::rules::sequence(::std::vec![$($crate::IntoParselet::into_parselet($rule)),+])
    };
}

/// Builds an unordered [`choice`](crate::rules::choice).
#[macro_export]
macro_rules! choice {
    ($($rule:expr),+ $(,)?) => {
        $crate::rules::choice(::std::vec![$($crate::IntoParselet::into_parselet($rule)),+])
    };
}

/// Builds an [`ordered_choice`](crate::rules::ordered_choice).
#[macro_export]
macro_rules! ordered_choice {
    ($($rule:expr),+ $(,)?) => {
        $crate::rules::ordered_choice(::std::vec![$($crate::IntoParselet::into_parselet($rule)),+])
    };
}
