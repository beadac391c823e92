//! Folds runs of list items into list containers.

use crate::model::Block;

/// Wraps every maximal run of consecutive same-kind list items in a
/// container of that kind, preserving order.
///
/// Only the given sequence is grouped; children are expected to have been
/// grouped already.
pub fn group_list_items(blocks: Vec<Block>) -> Vec<Block> {
    blocks.into_iter().fold(Vec::new(), |mut grouped, block| {
        let Some(kind) = block.list_item_kind() else {
            grouped.push(block);
            return grouped;
        };

        let extends_open_run =
            grouped.last().and_then(Block::list_container_kind) == Some(kind);
        match grouped.last_mut() {
            Some(container) if extends_open_run => {
                container.common_mut().children.push(block);
                grouped
            }
            _ => {
                grouped.push(kind.container_of(block));
                grouped
            }
        }
    })
}
