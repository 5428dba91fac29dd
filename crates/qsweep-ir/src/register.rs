//! Scoped qubit registers.
//!
//! A [`QubitRegister`] is an owned handle to a fixed run of qubits. It is not
//! `Clone`: the scope that allocated it is the only one that can release it,
//! and releasing consumes the handle. The [`QubitAllocator`] is the arena
//! behind the handles. It enforces strict LIFO release order, reuses the ids
//! of released qubits, and records the high-water mark that becomes the
//! circuit width.

use std::collections::BTreeSet;
use std::ops::Index;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Owned, fixed-length sequence of qubits.
#[derive(Debug, PartialEq, Eq)]
pub struct QubitRegister {
    qubits: Vec<QubitId>,
    scope: u32,
}

impl QubitRegister {
    /// Number of qubits.
    #[inline]
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Returns true if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// All qubits, index order.
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Checked access to the qubit at `index`.
    pub fn qubit(&self, index: usize) -> IrResult<QubitId> {
        self.qubits.get(index).copied().ok_or_else(|| {
            IrError::parameter(
                "index",
                format!("{index} out of range for register of {}", self.qubits.len()),
            )
        })
    }

    /// Iterate over the qubits.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }

    /// Allocation scope of this register; scopes are released in reverse order.
    #[inline]
    pub fn scope(&self) -> u32 {
        self.scope
    }
}

impl Index<usize> for QubitRegister {
    type Output = QubitId;

    fn index(&self, index: usize) -> &QubitId {
        &self.qubits[index]
    }
}

/// Allocation statistics for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorStats {
    /// Registers allocated.
    pub allocations: u64,
    /// Registers released.
    pub releases: u64,
    /// Peak number of simultaneously live qubits.
    pub peak_live: u32,
}

/// Arena that hands out and reclaims qubit ids.
#[derive(Debug, Default)]
pub struct QubitAllocator {
    /// Released ids available for reuse, lowest first.
    free: BTreeSet<u32>,
    /// Next never-used id; equals the width so far.
    next: u32,
    live: FxHashSet<QubitId>,
    /// Scope ids and qubits of live registers, innermost last.
    scopes: Vec<(u32, Vec<QubitId>)>,
    next_scope: u32,
    stats: AllocatorStats,
}

impl QubitAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `n` qubits, all in |0⟩.
    pub fn allocate(&mut self, n: usize) -> IrResult<QubitRegister> {
        if n == 0 {
            return Err(IrError::parameter(
                "n",
                "register must hold at least one qubit",
            ));
        }

        let mut qubits = Vec::with_capacity(n);
        for _ in 0..n {
            let id = match self.free.pop_first() {
                Some(id) => id,
                None => {
                    let id = self.next;
                    self.next += 1;
                    id
                }
            };
            let qubit = QubitId(id);
            self.live.insert(qubit);
            qubits.push(qubit);
        }

        let scope = self.next_scope;
        self.next_scope += 1;
        self.scopes.push((scope, qubits.clone()));
        self.stats.allocations += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.live.len() as u32);

        debug!(scope, n, width = self.next, "allocated register");
        Ok(QubitRegister { qubits, scope })
    }

    /// Check that `register` is the innermost live register.
    pub fn check_release(&self, register: &QubitRegister) -> IrResult<()> {
        match self.scopes.last().map(|(scope, _)| *scope) {
            Some(top) if top == register.scope => Ok(()),
            Some(top) => Err(IrError::ReleaseOutOfOrder {
                expected: top,
                got: register.scope,
            }),
            None => Err(IrError::QubitNotLive {
                qubit: register.qubits.first().copied().unwrap_or(QubitId(0)),
                gate_name: None,
            }),
        }
    }

    /// Release a register, returning its qubits to the free pool.
    ///
    /// Returns the released ids so the caller can record their resets.
    pub fn release(&mut self, register: QubitRegister) -> IrResult<Vec<QubitId>> {
        self.check_release(&register)?;
        self.scopes.pop();
        self.reclaim(&register.qubits);
        debug!(scope = register.scope, n = register.len(), "released register");
        Ok(register.qubits)
    }

    /// Release every register above the innermost `depth`, innermost first.
    ///
    /// Used to reclaim registers whose handles were lost. Returns the scope
    /// and qubits of each register released.
    pub fn unwind_to(&mut self, depth: usize) -> Vec<(u32, Vec<QubitId>)> {
        let mut released = Vec::new();
        while self.scopes.len() > depth {
            let Some((scope, qubits)) = self.scopes.pop() else {
                break;
            };
            self.reclaim(&qubits);
            debug!(scope, n = qubits.len(), "unwound register");
            released.push((scope, qubits));
        }
        released
    }

    fn reclaim(&mut self, qubits: &[QubitId]) {
        for q in qubits {
            self.live.remove(q);
            self.free.insert(q.0);
        }
        self.stats.releases += 1;
    }

    /// True if `qubit` belongs to a live register.
    #[inline]
    pub fn is_live(&self, qubit: QubitId) -> bool {
        self.live.contains(&qubit)
    }

    /// Number of live registers.
    #[inline]
    pub fn live_registers(&self) -> usize {
        self.scopes.len()
    }

    /// Number of distinct qubit ids ever handed out.
    #[inline]
    pub fn width(&self) -> u32 {
        self.next
    }

    /// Allocation statistics so far.
    pub fn stats(&self) -> AllocatorStats {
        self.stats
    }
}
