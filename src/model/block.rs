use super::blocks::*;
use super::common::{BlockCommon, BlockNode};
use crate::types::BlockId;
use serde::Serialize;

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Template($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
            Block::BulletedList($pattern) => $result,
            Block::NumberedList($pattern) => $result,
        }
    };
}

/// Every block kind the pipeline understands.
///
/// `BulletedList` and `NumberedList` never come from the store: they are
/// containers introduced by list grouping, holding their items as children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(BlockNode<TextContent>),
    #[serde(rename = "heading_1")]
    Heading1(BlockNode<TextContent>),
    #[serde(rename = "heading_2")]
    Heading2(BlockNode<TextContent>),
    #[serde(rename = "heading_3")]
    Heading3(BlockNode<TextContent>),
    BulletedListItem(BlockNode<TextContent>),
    NumberedListItem(BlockNode<TextContent>),
    Quote(BlockNode<TextContent>),
    Toggle(BlockNode<TextContent>),
    Template(BlockNode<TextContent>),
    ToDo(BlockNode<ToDoContent>),
    Callout(BlockNode<CalloutContent>),
    Code(BlockNode<CodeContent>),
    Equation(BlockNode<EquationContent>),
    Divider(BlockNode<Empty>),
    Breadcrumb(BlockNode<Empty>),
    TableOfContents(BlockNode<Empty>),
    ColumnList(BlockNode<Empty>),
    Column(BlockNode<Empty>),
    Image(BlockNode<ImageContent>),
    Video(BlockNode<MediaContent>),
    Pdf(BlockNode<MediaContent>),
    File(BlockNode<MediaContent>),
    Audio(BlockNode<MediaContent>),
    Bookmark(BlockNode<LinkContent>),
    Embed(BlockNode<LinkContent>),
    LinkPreview(BlockNode<LinkContent>),
    ChildPage(BlockNode<TitleContent>),
    ChildDatabase(BlockNode<TitleContent>),
    LinkToPage(BlockNode<LinkToPageContent>),
    Table(BlockNode<TableContent>),
    TableRow(BlockNode<TableRowContent>),
    #[serde(rename = "synced_block")]
    Synced(BlockNode<SyncedContent>),
    Unsupported(BlockNode<UnsupportedContent>),
    BulletedList(BlockNode<Empty>),
    NumberedList(BlockNode<Empty>),
}

/// The two list flavours that grouping folds into containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    /// A new container of this kind holding `first` as its only item.
    pub fn container_of(self, first: Block) -> Block {
        let node = BlockNode::new(BlockCommon::default().with_children(vec![first]), Empty {});
        match self {
            ListKind::Bulleted => Block::BulletedList(node),
            ListKind::Numbered => Block::NumberedList(node),
        }
    }
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn children(&self) -> &[Block] {
        &self.common().children
    }

    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// Whether the store flagged this block as having children.
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Whether the tree walk may descend into this block.
    ///
    /// Child pages are separate documents and unsupported blocks have no
    /// listable children, whatever their `has_children` flag says.
    pub fn may_descend(&self) -> bool {
        self.has_children() && !matches!(self, Block::ChildPage(_) | Block::Unsupported(_))
    }

    /// The list flavour of a list item, `None` for every other block.
    pub fn list_item_kind(&self) -> Option<ListKind> {
        match self {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// The list flavour of a grouping container, `None` for every other block.
    pub fn list_container_kind(&self) -> Option<ListKind> {
        match self {
            Block::BulletedList(_) => Some(ListKind::Bulleted),
            Block::NumberedList(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Get block type name
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::Quote(_) => "quote",
            Block::Toggle(_) => "toggle",
            Block::Template(_) => "template",
            Block::ToDo(_) => "to_do",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::TableOfContents(_) => "table_of_contents",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::Pdf(_) => "pdf",
            Block::File(_) => "file",
            Block::Audio(_) => "audio",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::LinkToPage(_) => "link_to_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(_) => "unsupported",
            Block::BulletedList(_) => "bulleted_list",
            Block::NumberedList(_) => "numbered_list",
        }
    }
}
