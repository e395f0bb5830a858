//! # Memory Allocation
//!
//! Plans contiguous allocations: a fixed set of memory blocks, a list of
//! process demands, and a strategy for choosing which block serves each
//! demand.
//!
//! Blocks are not split or coalesced. A block serves any number of demands
//! as long as its free space holds out, which is how the classic classroom
//! exercise is posed: the interesting part is *which* block each strategy
//! picks, and how much is left over.
//!
//! ## Example
//!
//! ```rust
//! use osmium_core::memory::{plan, Demand, FitStrategy};
//!
//! let blocks = [100, 500, 200, 300, 600];
//! let demands = [
//!     Demand::new("P1", 212),
//!     Demand::new("P2", 417),
//!     Demand::new("P3", 112),
//!     Demand::new("P4", 426),
//! ];
//!
//! let first = plan(FitStrategy::FirstFit, &blocks, &demands);
//! let best = plan(FitStrategy::BestFit, &blocks, &demands);
//!
//! // First fit strands P4; best fit places everything.
//! assert_eq!(first.unplaced(), 1);
//! assert_eq!(best.unplaced(), 0);
//! ```

use std::fmt;

use tracing::debug;

/// Block-selection strategy for [`plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitStrategy
{
    /// Lowest-numbered block with enough free space.
    FirstFit,
    /// Block whose free space is smallest while still sufficient.
    BestFit,
}

impl FitStrategy
{
    /// Every strategy, in the order reports present them.
    pub const ALL: [Self; 2] = [Self::FirstFit, Self::BestFit];

    /// Conventional display name.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            Self::FirstFit => "First Fit",
            Self::BestFit => "Best Fit",
        }
    }
}

impl fmt::Display for FitStrategy
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

/// Position of a block in the plan's block list.
///
/// Minted by [`plan`]; only meaningful for the plan that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

impl BlockId
{
    /// Index of this block in [`AllocationPlan::blocks`].
    #[must_use]
    pub const fn index(self) -> usize
    {
        self.0
    }
}

/// One allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demand
{
    /// Requesting process, a display label
    pub process: String,
    /// Units of memory wanted
    pub size: u64,
}

impl Demand
{
    /// Convenience constructor.
    pub fn new(process: impl Into<String>, size: u64) -> Self
    {
        Self {
            process: process.into(),
            size,
        }
    }
}

/// A block after all demands have been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockState
{
    /// Size the block started with
    pub capacity: u64,
    /// Units still unclaimed
    pub free: u64,
    /// Processes placed here, in placement order
    pub residents: Vec<String>,
}

/// Where one demand ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement
{
    /// Requesting process copied from the demand
    pub process: String,
    /// Requested size copied from the demand
    pub size: u64,
    /// Chosen block, `None` when nothing could hold the demand
    pub block: Option<BlockId>,
}

/// Complete result of planning one batch of demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan
{
    /// Strategy that produced this plan
    pub strategy: FitStrategy,
    /// Final state of every block, in input order
    pub blocks: Vec<BlockState>,
    /// One entry per demand, in input order
    pub placements: Vec<Placement>,
}

impl AllocationPlan
{
    /// Number of demands no block could hold.
    #[must_use]
    pub fn unplaced(&self) -> usize
    {
        self.placements.iter().filter(|p| p.block.is_none()).count()
    }

    /// Free units summed over all blocks.
    #[must_use]
    pub fn total_free(&self) -> u64
    {
        self.blocks.iter().map(|b| b.free).sum()
    }
}

/// Plans `demands` against `block_sizes` under `strategy`
///
/// Demands are processed strictly in order, each one seeing the free space
/// left behind by its predecessors. A demand that fits nowhere is recorded
/// with no block and the run continues; planning itself cannot fail. When
/// several blocks tie under best fit, the lowest-numbered one wins.
///
/// ## Example
///
/// ```rust
/// use osmium_core::memory::{plan, Demand, FitStrategy};
///
/// let result = plan(
///     FitStrategy::BestFit,
///     &[200, 100],
///     &[Demand::new("editor", 90)],
/// );
///
/// // 100 is the tighter fit.
/// assert_eq!(result.placements[0].block.map(|b| b.index()), Some(1));
/// assert_eq!(result.blocks[1].free, 10);
/// ```
#[must_use]
pub fn plan(strategy: FitStrategy, block_sizes: &[u64], demands: &[Demand]) -> AllocationPlan
{
    let mut blocks: Vec<BlockState> = block_sizes
        .iter()
        .map(|&capacity| BlockState {
            capacity,
            free: capacity,
            residents: Vec::new(),
        })
        .collect();

    let placements = demands
        .iter()
        .map(|demand| {
            let chosen = match strategy {
                FitStrategy::FirstFit => {
                    blocks.iter().position(|b| b.free >= demand.size)
                }
                FitStrategy::BestFit => blocks
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.free >= demand.size)
                    .min_by_key(|(_, b)| b.free)
                    .map(|(i, _)| i),
            };

            if let Some(i) = chosen {
                blocks[i].free -= demand.size;
                blocks[i].residents.push(demand.process.clone());
                debug!(
                    "{}: {} ({} units) placed in block {}",
                    strategy, demand.process, demand.size, i
                );
            } else {
                debug!(
                    "{}: no block fits {} ({} units)",
                    strategy, demand.process, demand.size
                );
            }

            Placement {
                process: demand.process.clone(),
                size: demand.size,
                block: chosen.map(BlockId),
            }
        })
        .collect();

    AllocationPlan {
        strategy,
        blocks,
        placements,
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn placed_blocks(plan: &AllocationPlan) -> Vec<Option<usize>>
    {
        plan.placements
            .iter()
            .map(|p| p.block.map(BlockId::index))
            .collect()
    }

    #[test]
    fn test_first_fit_takes_lowest_numbered_block()
    {
        let result = plan(
            FitStrategy::FirstFit,
            &[100, 500, 200],
            &[Demand::new("P1", 150)],
        );

        assert_eq!(placed_blocks(&result), [Some(1)]);
        assert_eq!(result.blocks[1].free, 350);
        assert_eq!(result.blocks[1].residents, ["P1"]);
    }

    #[test]
    fn test_best_fit_takes_tightest_block()
    {
        let result = plan(
            FitStrategy::BestFit,
            &[100, 500, 200],
            &[Demand::new("P1", 150)],
        );

        assert_eq!(placed_blocks(&result), [Some(2)]);
        assert_eq!(result.blocks[2].free, 50);
    }

    #[test]
    fn test_classic_batch_diverges_between_strategies()
    {
        let blocks = [100, 500, 200, 300, 600];
        let demands = [
            Demand::new("P1", 212),
            Demand::new("P2", 417),
            Demand::new("P3", 112),
            Demand::new("P4", 426),
        ];

        let first = plan(FitStrategy::FirstFit, &blocks, &demands);
        assert_eq!(
            placed_blocks(&first),
            [Some(1), Some(4), Some(1), None]
        );
        assert_eq!(first.unplaced(), 1);

        let best = plan(FitStrategy::BestFit, &blocks, &demands);
        assert_eq!(
            placed_blocks(&best),
            [Some(3), Some(1), Some(2), Some(4)]
        );
        assert_eq!(best.unplaced(), 0);
    }

    #[test]
    fn test_block_serves_multiple_demands_until_exhausted()
    {
        let result = plan(
            FitStrategy::FirstFit,
            &[100],
            &[
                Demand::new("a", 60),
                Demand::new("b", 40),
                Demand::new("c", 1),
            ],
        );

        assert_eq!(placed_blocks(&result), [Some(0), Some(0), None]);
        assert_eq!(result.blocks[0].free, 0);
        assert_eq!(result.blocks[0].residents, ["a", "b"]);
        assert_eq!(result.total_free(), 0);
    }

    #[test]
    fn test_best_fit_tie_goes_to_lowest_numbered_block()
    {
        let result = plan(
            FitStrategy::BestFit,
            &[300, 300],
            &[Demand::new("P1", 250)],
        );

        assert_eq!(placed_blocks(&result), [Some(0)]);
    }

    #[test]
    fn test_no_blocks_leaves_everything_unplaced()
    {
        let result = plan(FitStrategy::FirstFit, &[], &[Demand::new("P1", 1)]);

        assert_eq!(placed_blocks(&result), [None]);
        assert_eq!(result.unplaced(), 1);
        assert_eq!(result.total_free(), 0);
    }
}
