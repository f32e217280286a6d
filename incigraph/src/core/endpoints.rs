use std::fmt;

use super::base::Vertex;

/// Tail and head of an edge.
///
/// Graphs such as [`SimpleIncidenceGraph`](crate::storage::SimpleIncidenceGraph)
/// use this type directly as their edge type, because it carries everything
/// needed to follow the edge without consulting the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Endpoints {
    tail: Vertex,
    head: Vertex,
}

impl Endpoints {
    pub const fn new(tail: Vertex, head: Vertex) -> Self {
        Self { tail, head }
    }

    pub const fn tail(&self) -> Vertex {
        self.tail
    }

    pub const fn head(&self) -> Vertex {
        self.head
    }

    /// Returns the same pair with tail and head swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            tail: self.head,
            head: self.tail,
        }
    }

    pub const fn is_loop(&self) -> bool {
        self.tail == self.head
    }
}

impl From<(Vertex, Vertex)> for Endpoints {
    fn from((tail, head): (Vertex, Vertex)) -> Self {
        Self::new(tail, head)
    }
}

impl From<Endpoints> for (Vertex, Vertex) {
    fn from(endpoints: Endpoints) -> Self {
        (endpoints.tail, endpoints.head)
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tail, self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed() {
        let e = Endpoints::new(3, 7);

        assert_eq!(e.reversed(), Endpoints::new(7, 3));
        assert_eq!(e.reversed().reversed(), e);
        assert!(!e.is_loop());
        assert!(Endpoints::new(2, 2).is_loop());
    }

    #[test]
    fn display() {
        assert_eq!(Endpoints::from((1, 2)).to_string(), "(1, 2)");
    }
}
