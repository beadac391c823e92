// src/api/adapter.rs
//! Converts raw store blocks into the typed [`Block`] model.

use super::responses::RawBlock;
use crate::error::AppError;
use crate::model::blocks::UnsupportedContent;
use crate::model::common::{BlockCommon, BlockNode};
use crate::model::Block;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Convert a raw block into the domain model.
///
/// Type names this crate does not model become [`Block::Unsupported`]. A known
/// type whose payload does not fit its shape is an error: the store promised
/// something it did not deliver.
pub fn convert_block(raw: RawBlock) -> Result<Block, AppError> {
    let RawBlock {
        id,
        block_type,
        has_children,
        mut fields,
    } = raw;

    let payload = fields
        .remove(&block_type)
        .filter(|v| !v.is_null())
        .unwrap_or_else(|| Value::Object(Default::default()));
    let common = BlockCommon {
        id,
        has_children,
        children: Vec::new(),
    };

    let block = match block_type.as_str() {
        "paragraph" => Block::Paragraph(node(common, payload, &block_type)?),
        "heading_1" => Block::Heading1(node(common, payload, &block_type)?),
        "heading_2" => Block::Heading2(node(common, payload, &block_type)?),
        "heading_3" => Block::Heading3(node(common, payload, &block_type)?),
        "bulleted_list_item" => Block::BulletedListItem(node(common, payload, &block_type)?),
        "numbered_list_item" => Block::NumberedListItem(node(common, payload, &block_type)?),
        "quote" => Block::Quote(node(common, payload, &block_type)?),
        "toggle" => Block::Toggle(node(common, payload, &block_type)?),
        "template" => Block::Template(node(common, payload, &block_type)?),
        "to_do" => Block::ToDo(node(common, payload, &block_type)?),
        "callout" => Block::Callout(node(common, payload, &block_type)?),
        "code" => Block::Code(node(common, payload, &block_type)?),
        "equation" => Block::Equation(node(common, payload, &block_type)?),
        "divider" => Block::Divider(node(common, payload, &block_type)?),
        "breadcrumb" => Block::Breadcrumb(node(common, payload, &block_type)?),
        "table_of_contents" => Block::TableOfContents(node(common, payload, &block_type)?),
        "column_list" => Block::ColumnList(node(common, payload, &block_type)?),
        "column" => Block::Column(node(common, payload, &block_type)?),
        "image" => Block::Image(node(common, payload, &block_type)?),
        "video" => Block::Video(node(common, payload, &block_type)?),
        "pdf" => Block::Pdf(node(common, payload, &block_type)?),
        "file" => Block::File(node(common, payload, &block_type)?),
        "audio" => Block::Audio(node(common, payload, &block_type)?),
        "bookmark" => Block::Bookmark(node(common, payload, &block_type)?),
        "embed" => Block::Embed(node(common, payload, &block_type)?),
        "link_preview" => Block::LinkPreview(node(common, payload, &block_type)?),
        "child_page" => Block::ChildPage(node(common, payload, &block_type)?),
        "child_database" => Block::ChildDatabase(node(common, payload, &block_type)?),
        "link_to_page" => Block::LinkToPage(node(common, payload, &block_type)?),
        "table" => Block::Table(node(common, payload, &block_type)?),
        "table_row" => Block::TableRow(node(common, payload, &block_type)?),
        "synced_block" => Block::Synced(node(common, payload, &block_type)?),
        // Everything else, including the store's own "unsupported" type.
        _ => {
            log::debug!("Block {} has unsupported type '{}'", common.id, block_type);
            Block::Unsupported(BlockNode::new(common, UnsupportedContent { block_type }))
        }
    };

    Ok(block)
}

fn node<P: DeserializeOwned>(
    common: BlockCommon,
    payload: Value,
    block_type: &str,
) -> Result<BlockNode<P>, AppError> {
    let payload = serde_json::from_value(payload).map_err(|e| {
        AppError::MalformedResponse(format!(
            "Block {} has a malformed '{}' payload: {}",
            common.id, block_type, e
        ))
    })?;
    Ok(BlockNode::new(common, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::FileOrigin;
    use serde_json::json;

    fn raw(value: Value) -> RawBlock {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn converts_text_blocks() {
        let block = convert_block(raw(json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "bulleted_list_item",
            "has_children": true,
            "bulleted_list_item": {
                "rich_text": [{"type": "text", "plain_text": "first", "href": null}],
                "color": "default"
            }
        })))
        .unwrap();

        assert_eq!(block.block_type(), "bulleted_list_item");
        assert!(block.has_children());
        match block {
            Block::BulletedListItem(node) => {
                assert_eq!(node.payload.rich_text[0].plain_text, "first")
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn converts_hosted_images() {
        let block = convert_block(raw(json!({
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "image",
            "has_children": false,
            "image": {
                "caption": [],
                "type": "file",
                "file": {"url": "https://s3.example/a.png", "expiry_time": "2024-01-01T00:00:00.000Z"}
            }
        })))
        .unwrap();

        match block {
            Block::Image(node) => {
                assert_eq!(node.payload.source.origin, FileOrigin::File);
                assert_eq!(node.payload.source.url, "https://s3.example/a.png");
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn unknown_types_become_unsupported() {
        let block = convert_block(raw(json!({
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "ai_block",
            "has_children": true,
            "ai_block": {}
        })))
        .unwrap();

        match &block {
            Block::Unsupported(node) => assert_eq!(node.payload.block_type, "ai_block"),
            other => panic!("unexpected block {:?}", other),
        }
        assert!(!block.may_descend());
    }

    #[test]
    fn malformed_payloads_of_known_types_are_errors() {
        let err = convert_block(raw(json!({
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "image",
            "has_children": false,
            "image": {"caption": []}
        })))
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
