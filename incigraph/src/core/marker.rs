//! Type-level markers of edge directionality.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undirected {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directed {}

pub trait EdgeType: private::Sealed + 'static {
    fn is_directed() -> bool;

    /// Human readable name used in diagnostics.
    fn name() -> &'static str;
}

impl EdgeType for Undirected {
    fn is_directed() -> bool {
        false
    }

    fn name() -> &'static str {
        "undirected"
    }
}

impl EdgeType for Directed {
    fn is_directed() -> bool {
        true
    }

    fn name() -> &'static str {
        "directed"
    }
}

mod private {
    use super::*;

    pub trait Sealed {}

    impl Sealed for Undirected {}
    impl Sealed for Directed {}
}
