use crate::model::{Element, ElementKind};

/// How a node relates the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingState {
    /// Present on both sides
    Matched,
    /// Present only in the contract
    Removed,
    /// Present only in the implementation
    Added,
}

/// The elements a mapping node pairs.
///
/// A node with neither side cannot be expressed.
#[derive(Debug, Clone, Copy)]
pub enum Correspondence<'a> {
    Matched {
        contract: Element<'a>,
        implementation: Element<'a>,
    },
    Removed(Element<'a>),
    Added(Element<'a>),
}

impl<'a> Correspondence<'a> {
    /// `None` when both sides are absent
    pub fn from_sides(
        contract: Option<Element<'a>>,
        implementation: Option<Element<'a>>,
    ) -> Option<Self> {
        match (contract, implementation) {
            (Some(contract), Some(implementation)) => Some(Correspondence::Matched {
                contract,
                implementation,
            }),
            (Some(contract), None) => Some(Correspondence::Removed(contract)),
            (None, Some(implementation)) => Some(Correspondence::Added(implementation)),
            (None, None) => None,
        }
    }
}

/// One node of the mapping tree
///
/// Children of a matched node are themselves mapped; children of a one-sided
/// node carry the same one-sided state all the way down.
#[derive(Debug, Clone)]
pub struct MappingNode<'a> {
    correspondence: Correspondence<'a>,
    children: Vec<MappingNode<'a>>,
}

impl<'a> MappingNode<'a> {
    pub fn new(correspondence: Correspondence<'a>, children: Vec<MappingNode<'a>>) -> Self {
        Self {
            correspondence,
            children,
        }
    }

    pub fn correspondence(&self) -> Correspondence<'a> {
        self.correspondence
    }

    pub fn contract(&self) -> Option<Element<'a>> {
        match self.correspondence {
            Correspondence::Matched { contract, .. } | Correspondence::Removed(contract) => {
                Some(contract)
            }
            Correspondence::Added(_) => None,
        }
    }

    pub fn implementation(&self) -> Option<Element<'a>> {
        match self.correspondence {
            Correspondence::Matched { implementation, .. }
            | Correspondence::Added(implementation) => Some(implementation),
            Correspondence::Removed(_) => None,
        }
    }

    /// Both sides, when the node is matched
    pub fn matched(&self) -> Option<(Element<'a>, Element<'a>)> {
        match self.correspondence {
            Correspondence::Matched {
                contract,
                implementation,
            } => Some((contract, implementation)),
            _ => None,
        }
    }

    pub fn state(&self) -> MappingState {
        match self.correspondence {
            Correspondence::Matched { .. } => MappingState::Matched,
            Correspondence::Removed(_) => MappingState::Removed,
            Correspondence::Added(_) => MappingState::Added,
        }
    }

    /// The contract element when present, otherwise the implementation one
    pub fn representative(&self) -> Element<'a> {
        match self.correspondence {
            Correspondence::Matched { contract, .. } | Correspondence::Removed(contract) => contract,
            Correspondence::Added(implementation) => implementation,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.representative().kind()
    }

    pub fn path(&self) -> String {
        self.representative().path()
    }

    /// Every element present on the node
    pub fn elements(&self) -> impl Iterator<Item = Element<'a>> {
        self.contract().into_iter().chain(self.implementation())
    }

    pub fn children(&self) -> &[MappingNode<'a>] {
        &self.children
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(MappingNode::subtree_len).sum::<usize>()
    }
}
