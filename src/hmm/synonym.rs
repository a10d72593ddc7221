//!
//! Parameter tying of transitions ("synonym transitions")
//!
//! Declarations are kept by state name, because they may be made before the
//! transitions they mention exist. They are resolved against the live graph
//! into equivalence classes of edge indices with a union-find. Pooling counts
//! and forcing equal probabilities are both done per class.
//!
use crate::common::EdgeIndex;
use fnv::FnvHashMap;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;

/// `synonym.0 -> synonym.1` always carries the probability of
/// `canonical.0 -> canonical.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymDeclaration {
    pub canonical: (String, String),
    pub synonym: (String, String),
}

///
/// Equivalence classes of tied edges
///
#[derive(Debug, Clone)]
pub struct SynonymClasses {
    /// class label (representative edge id) of each edge
    labels: Vec<usize>,
    /// members of each class that has more than one edge, keyed by label
    members: FnvHashMap<usize, Vec<EdgeIndex>>,
}

impl SynonymClasses {
    ///
    /// Build classes over `n_edges` edges by merging each `(a, b)` pair.
    ///
    pub fn from_pairs<I>(n_edges: usize, pairs: I) -> SynonymClasses
    where
        I: IntoIterator<Item = (EdgeIndex, EdgeIndex)>,
    {
        let mut uf: UnionFind<usize> = UnionFind::new(n_edges);
        for (a, b) in pairs {
            uf.union(a.index(), b.index());
        }
        let labels = uf.into_labeling();
        let members: FnvHashMap<usize, Vec<EdgeIndex>> = labels
            .iter()
            .enumerate()
            .map(|(edge, &label)| (label, EdgeIndex::new(edge)))
            .into_group_map()
            .into_iter()
            .filter(|(_, edges)| edges.len() > 1)
            .collect();
        SynonymClasses { labels, members }
    }
    /// the number of edges the classes were built for
    pub fn n_edges(&self) -> usize {
        self.labels.len()
    }
    /// class label of the edge
    pub fn label(&self, edge: EdgeIndex) -> usize {
        self.labels[edge.index()]
    }
    /// all edges sharing parameters with `edge` (including itself)
    pub fn members(&self, edge: EdgeIndex) -> Vec<EdgeIndex> {
        match self.members.get(&self.label(edge)) {
            Some(edges) => edges.clone(),
            None => vec![edge],
        }
    }
    /// iterator over classes having two or more edges
    pub fn tied_classes(&self) -> impl Iterator<Item = &[EdgeIndex]> + '_ {
        self.members
            .iter()
            .sorted_by_key(|(label, _)| **label)
            .map(|(_, edges)| edges.as_slice())
    }
}

///
/// Declared synonyms and their resolved classes
///
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    declarations: Vec<SynonymDeclaration>,
    classes: Option<SynonymClasses>,
}

impl SynonymTable {
    ///
    /// Declare that `synonym` is tied to `canonical`.
    /// Re-declaring the same synonym transition replaces its canonical.
    ///
    pub fn declare(&mut self, canonical: (String, String), synonym: (String, String)) {
        self.declarations.retain(|d| d.synonym != synonym);
        self.declarations.push(SynonymDeclaration { canonical, synonym });
        self.classes = None;
    }
    pub fn declarations(&self) -> &[SynonymDeclaration] {
        &self.declarations
    }
    /// resolved classes, if they are up to date
    pub fn classes(&self) -> Option<&SynonymClasses> {
        self.classes.as_ref()
    }
    pub fn set_classes(&mut self, classes: SynonymClasses) {
        self.classes = Some(classes);
    }
    /// force re-resolution (e.g. after new edges were created)
    pub fn invalidate(&mut self) {
        self.classes = None;
    }
}
