use serde::Serialize;
use tracing::{trace, warn};

/// A block that could not be sent because it alone exceeds the MTU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OversizedBlock {
    pub index: usize,
    pub len: usize,
}

/// Transport writes produced by greedy packing, plus the blocks left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferPlan {
    pub writes: Vec<Vec<u8>>,
    pub oversized: Vec<OversizedBlock>,
}

impl TransferPlan {
    pub fn is_complete(&self) -> bool {
        self.oversized.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.writes.iter().map(Vec::len).sum()
    }
}

/// Greedily concatenate `blocks` into writes of at most `mtu` bytes.
///
/// Blocks are never split or reordered. A block is appended to the pending
/// write while the result still fits; otherwise the pending write is flushed
/// and the block starts the next one. Whatever is pending at the end is
/// flushed. A block longer than `mtu` is skipped and reported in
/// [`TransferPlan::oversized`].
///
/// # Examples
/// ```
/// use lightwire_core::protocols::channels::plan_transfer;
///
/// let blocks = [vec![0u8; 100], vec![0; 100], vec![0; 100], vec![0; 100], vec![0; 10]];
/// let plan = plan_transfer(&blocks, 247);
/// let lens: Vec<usize> = plan.writes.iter().map(Vec::len).collect();
/// assert_eq!(lens, [200, 210]);
/// ```
pub fn plan_transfer<B: AsRef<[u8]>>(blocks: &[B], mtu: usize) -> TransferPlan {
    let mut plan = TransferPlan::default();
    let mut pending: Vec<u8> = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let block = block.as_ref();
        if block.len() > mtu {
            warn!(index, len = block.len(), mtu, "block exceeds mtu; skipped");
            plan.oversized.push(OversizedBlock {
                index,
                len: block.len(),
            });
            continue;
        }
        if !pending.is_empty() && pending.len() + block.len() > mtu {
            trace!(len = pending.len(), "flushing write");
            plan.writes.push(std::mem::take(&mut pending));
        }
        pending.extend_from_slice(block);
    }
    if !pending.is_empty() {
        trace!(len = pending.len(), "flushing final write");
        plan.writes.push(pending);
    }
    plan
}

/// The writes of [`plan_transfer`], dropping the oversize report.
pub fn pack_for_transfer<B: AsRef<[u8]>>(blocks: &[B], mtu: usize) -> Vec<Vec<u8>> {
    plan_transfer(blocks, mtu).writes
}
