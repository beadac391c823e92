//! Page content: fetching block trees and shaping them for rendering.

pub mod group;
pub mod normalize;
pub mod preview;
pub mod tree;

pub use group::group_list_items;
pub use normalize::{BlockNormalizer, HttpImageFetcher, ImageFetcher};
pub use preview::{derive_preview, ImagePreview, PreviewError};
pub use tree::TreeFetcher;
