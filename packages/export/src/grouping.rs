//! Forward pass that groups runs of numbered list items.
//!
//! Numbered items need their position within a contiguous run to compute an
//! ordinal, so consecutive `numberedListItem` blocks collapse into one
//! [`RenderUnit::OrderedList`]. Bullet items carry no position and stay
//! individual units.

use folio_document::{Block, BlockKind};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderUnit<'a> {
    Single(&'a Block),
    OrderedList(Vec<&'a Block>),
}

pub fn group_blocks(blocks: &[Block]) -> Vec<RenderUnit<'_>> {
    let mut units = Vec::new();
    let mut run: Vec<&Block> = Vec::new();

    for block in blocks {
        if block.kind == BlockKind::NumberedListItem {
            run.push(block);
            continue;
        }
        if !run.is_empty() {
            units.push(RenderUnit::OrderedList(std::mem::take(&mut run)));
        }
        units.push(RenderUnit::Single(block));
    }

    if !run.is_empty() {
        units.push(RenderUnit::OrderedList(run));
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(units: &[RenderUnit<'_>]) -> Vec<usize> {
        units
            .iter()
            .map(|unit| match unit {
                RenderUnit::Single(_) => 0,
                RenderUnit::OrderedList(items) => items.len(),
            })
            .collect()
    }

    #[test]
    fn test_interrupted_runs_split() {
        let blocks = vec![
            Block::numbered("A"),
            Block::numbered("B"),
            Block::paragraph("C"),
            Block::numbered("D"),
        ];
        assert_eq!(shape(&group_blocks(&blocks)), vec![2, 0, 1]);
    }

    #[test]
    fn test_bullets_are_not_grouped() {
        let blocks = vec![Block::bullet("a"), Block::bullet("b"), Block::bullet("c")];
        assert_eq!(shape(&group_blocks(&blocks)), vec![0, 0, 0]);
    }

    #[test]
    fn test_bullet_interrupts_numbering() {
        let blocks = vec![Block::numbered("1"), Block::bullet("x"), Block::numbered("1 again")];
        assert_eq!(shape(&group_blocks(&blocks)), vec![1, 0, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_blocks(&[]).is_empty());
    }
}
