//! Scalar-or-list fragments and conditional selection.
//!
//! Optional rules and plugins are expressed as fragments that normalize to a
//! flat list, so callers splice them into a chain without null checks.

/// A configuration fragment: nothing, a single item, or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<T> {
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Fragment<T> {
    /// Flatten into an ordered list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Fragment::None => Vec::new(),
            Fragment::One(item) => vec![item],
            Fragment::Many(items) => items,
        }
    }
}

impl<T> Default for Fragment<T> {
    fn default() -> Self {
        Fragment::None
    }
}

impl<T> From<Option<T>> for Fragment<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(item) => Fragment::One(item),
            None => Fragment::None,
        }
    }
}

impl<T> From<Vec<T>> for Fragment<T> {
    fn from(items: Vec<T>) -> Self {
        Fragment::Many(items)
    }
}

/// Normalize a fragment to a list: empty for nothing, one element for a
/// scalar, unchanged for a list.
pub fn normalize_to_list<T>(value: impl Into<Fragment<T>>) -> Vec<T> {
    value.into().into_vec()
}

/// Pick `when_true` or `when_false` by `condition`, normalized to a list.
pub fn select_branch<T>(
    condition: bool,
    when_true: impl Into<Fragment<T>>,
    when_false: impl Into<Fragment<T>>,
) -> Vec<T> {
    if condition {
        normalize_to_list(when_true)
    } else {
        normalize_to_list(when_false)
    }
}

/// Include `item` only when `condition` holds.
pub fn when<T>(condition: bool, item: T) -> Vec<T> {
    select_branch(condition, Fragment::One(item), Fragment::None)
}

/// An item paired with the predicate that decides its inclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct Gated<T> {
    pub included: bool,
    pub item: T,
}

impl<T> Gated<T> {
    pub fn always(item: T) -> Self {
        Self {
            included: true,
            item,
        }
    }

    pub fn when(included: bool, item: T) -> Self {
        Self { included, item }
    }
}

/// Evaluate gated items into a definite ordered list.
pub fn assemble<T>(items: impl IntoIterator<Item = Gated<T>>) -> Vec<T> {
    items
        .into_iter()
        .flat_map(|gated| when(gated.included, gated.item))
        .collect()
}
