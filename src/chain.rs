//! Chains of connected stones and the registry that owns them.
//!
//! Each chain caches its liberty count. Placements adjacent to a chain adjust
//! the cache by one; any change to a chain's membership recounts it from
//! scratch so incremental drift cannot accumulate.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::constants::MAX_NEIGHBORS;
use crate::point::{Color, Point};

/// Identifier of a live chain. Ids are handed out in increasing order and
/// never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u32);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A maximal group of connected same-color stones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    id: ChainId,
    color: Color,
    /// Member indices into the board arena, in order of joining.
    points: Vec<usize>,
    liberties: usize,
}

impl Chain {
    fn new(id: ChainId, color: Color, point: usize, liberties: usize) -> Self {
        Self {
            id,
            color,
            points: vec![point],
            liberties,
        }
    }

    pub fn id(&self) -> ChainId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cached liberty count.
    pub fn liberties(&self) -> usize {
        self.liberties
    }

    /// Count distinct free points adjacent to any member.
    pub fn count_liberties(&self, grid: &[Point]) -> usize {
        let mut seen = vec![false; grid.len()];
        let mut libs = 0;
        for &p in &self.points {
            for &n in grid[p].neighbors() {
                if !seen[n] && grid[n].state().is_free() {
                    seen[n] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    fn update_liberties(&mut self, grid: &[Point]) {
        self.liberties = self.count_liberties(grid);
    }

    fn add(&mut self, point: usize, grid: &[Point]) {
        self.points.push(point);
        self.update_liberties(grid);
    }

    fn lose_liberty(&mut self) {
        debug_assert!(self.liberties > 0, "chain {} liberty underflow", self.id);
        self.liberties = self.liberties.saturating_sub(1);
    }

    fn gain_liberty(&mut self) {
        self.liberties += 1;
    }
}

/// The id -> chain table plus the id counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chains {
    chains: BTreeMap<ChainId, Chain>,
    next_id: u32,
}

impl Default for Chains {
    fn default() -> Self {
        Self::new()
    }
}

impl Chains {
    pub fn new() -> Self {
        Self {
            chains: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(&id)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn contains(&self, id: ChainId) -> bool {
        self.chains.contains_key(&id)
    }

    /// Live chains in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = &Chain> + '_ {
        self.chains.values()
    }

    /// The id the next new chain will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    fn allocate(&mut self) -> ChainId {
        let id = ChainId(self.next_id);
        self.next_id += 1;
        id
    }

    fn get_mut(&mut self, id: ChainId) -> &mut Chain {
        match self.chains.get_mut(&id) {
            Some(chain) => chain,
            None => panic!("chain {id} missing from registry"),
        }
    }

    /// Distinct chains owning the occupied neighbors of `point`.
    fn neighbor_chains(grid: &[Point], point: usize) -> Vec<ChainId> {
        let mut out = Vec::with_capacity(MAX_NEIGHBORS);
        for &n in grid[point].neighbors() {
            if let Some(id) = grid[n].chain() {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Give the freshly placed stone at `point` a chain.
    ///
    /// Every distinct neighboring chain loses the liberty `point` used to be.
    /// Without a friendly neighbor the stone starts a new chain. Otherwise it
    /// joins the friendly neighbor with the smallest id and all other friendly
    /// neighbors are merged into that one.
    pub(crate) fn assign(&mut self, grid: &mut [Point], point: usize, color: Color) -> ChainId {
        let touched = Self::neighbor_chains(grid, point);
        let mut friendly = Vec::with_capacity(touched.len());
        for &id in &touched {
            let chain = self.get_mut(id);
            chain.lose_liberty();
            if chain.color == color {
                friendly.push(id);
            }
        }

        let Some(&survivor) = friendly.iter().min() else {
            let id = self.allocate();
            let free = grid[point]
                .neighbors()
                .iter()
                .filter(|&&n| grid[n].state().is_free())
                .count();
            grid[point].set_chain(id);
            self.chains.insert(id, Chain::new(id, color, point, free));
            trace!(chain = %id, point, liberties = free, "new chain");
            return id;
        };

        grid[point].set_chain(survivor);
        self.get_mut(survivor).add(point, grid);
        for absorbed in friendly.into_iter().filter(|&id| id != survivor) {
            self.merge(grid, survivor, absorbed);
        }
        survivor
    }

    /// Fold `absorbed` into `survivor` and retire the absorbed id.
    fn merge(&mut self, grid: &mut [Point], survivor: ChainId, absorbed: ChainId) {
        let Some(other) = self.chains.remove(&absorbed) else {
            panic!("chain {absorbed} missing from registry");
        };
        for &p in &other.points {
            grid[p].set_chain(survivor);
        }
        let chain = self.get_mut(survivor);
        chain.points.extend_from_slice(&other.points);
        chain.update_liberties(grid);
        trace!(%survivor, %absorbed, liberties = chain.liberties, "merged chains");
    }

    /// Ids of chains of `color` without liberties, in increasing order.
    pub(crate) fn dead(&self, color: Color) -> Vec<ChainId> {
        self.chains
            .values()
            .filter(|c| c.color == color && c.liberties == 0)
            .map(|c| c.id)
            .collect()
    }

    /// Take `id` off the board and return how many stones it had.
    ///
    /// Every vacated point becomes a liberty again for each distinct chain
    /// still touching it.
    pub(crate) fn capture(&mut self, grid: &mut [Point], id: ChainId) -> usize {
        let Some(chain) = self.chains.remove(&id) else {
            panic!("chain {id} missing from registry");
        };
        for &p in &chain.points {
            grid[p].free();
        }
        for &p in &chain.points {
            for neighbor in Self::neighbor_chains(grid, p) {
                self.get_mut(neighbor).gain_liberty();
            }
        }
        chain.points.len()
    }
}
