// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100, which is also the largest `limit` a caller
/// may request.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// The Notion API version pinned in every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the public Notion API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1/";

/// Page size used by the cursor-based post listing when the caller gives none.
pub const DEFAULT_CURSOR_PAGE_SIZE: u32 = 12;

// ---------------------------------------------------------------------------
// Image enrichment
// ---------------------------------------------------------------------------

/// Time budget for downloading one image while normalizing a block tree.
pub const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Size reported for images whose bytes could not be fetched or decoded.
pub const DEFAULT_IMAGE_WIDTH: u32 = 800;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 500;

/// Images must exceed this size on both axes to get a blur placeholder.
///
/// Tracking pixels and tiny icons produce meaningless previews.
pub const PLACEHOLDER_MIN_DIMENSION: u32 = 40;

/// Long edge of the thumbnail embedded as the blur placeholder.
pub const PLACEHOLDER_EDGE: u32 = 16;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
