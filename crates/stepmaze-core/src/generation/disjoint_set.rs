//! Union-find over flat cell indices.

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSet {
    /// `len` singleton sets, `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets remaining.
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Representative of the set containing `x`.
    ///
    /// Panics if `x >= len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point everything on the walked chain straight at the root.
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns false if they were
    /// already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut ds = DisjointSet::new(5);
        assert_eq!(ds.sets(), 5);
        for i in 0..5 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn test_union_and_connected() {
        let mut ds = DisjointSet::new(6);
        assert!(ds.union(0, 1));
        assert!(ds.union(2, 3));
        assert!(!ds.union(1, 0));
        assert_eq!(ds.sets(), 4);
        assert!(ds.connected(0, 1));
        assert!(!ds.connected(1, 2));
        assert!(ds.union(1, 3));
        assert!(ds.connected(0, 2));
        assert_eq!(ds.sets(), 3);
    }

    #[test]
    fn test_long_chain_compresses() {
        let n = 1000;
        let mut ds = DisjointSet::new(n);
        for i in 1..n {
            ds.union(i - 1, i);
        }
        assert_eq!(ds.sets(), 1);
        let root = ds.find(n - 1);
        for i in 0..n {
            assert_eq!(ds.find(i), root);
        }
        // After compression every node points at the root directly.
        assert!(ds.parent.iter().all(|&p| p == root));
    }

    #[test]
    fn test_rank_stays_logarithmic() {
        let n = 1 << 10;
        let mut ds = DisjointSet::new(n);
        let mut step = 1;
        while step < n {
            for i in (0..n).step_by(step * 2) {
                ds.union(i, i + step);
            }
            step *= 2;
        }
        assert_eq!(ds.sets(), 1);
        assert!(ds.rank.iter().all(|&r| r <= 10));
    }
}
