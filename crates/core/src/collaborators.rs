//! Capabilities the search controller consumes but does not implement.
//!
//! A front end hands the controller one [`Collaborators`] set at construction;
//! nothing is looked up globally.

use crate::types::{ItemKind, MediaItem, MediaType, SearchResult};

/// Rendered form of one media item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub label: String,
    pub path: String,
    pub kind: ItemKind,
}

impl Tile {
    pub fn for_item(item: &MediaItem) -> Self {
        Self {
            label: item.name.clone(),
            path: item.path.clone(),
            kind: item.kind,
        }
    }
}

pub trait GalleryRenderer {
    fn create_gallery_item(&mut self, item: &MediaItem) -> Tile;
    fn open_lightbox(&mut self, items: &[MediaItem], index: usize);
}

pub trait Lightbox {
    fn is_open(&self) -> bool;
    fn close(&mut self);
}

pub trait HistoryManager {
    fn push_state(&mut self, tag: &str);
    fn remove_state(&mut self, tag: &str);
    fn has_state(&self, tag: &str) -> bool;
}

/// Options handed to the infinite-scroll helper when a new search starts.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollOptions {
    pub media_type: Option<MediaType>,
    pub page_size: u32,
    /// First page, already fetched by the controller.
    pub initial: SearchResult,
}

pub trait InfiniteScroll {
    fn init(&mut self);
    fn start_search(&mut self, query: &str, options: ScrollOptions);
    fn reset_state(&mut self);
}

/// Loading indicator and user-visible error surface.
pub trait StatusSurface {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_error(&mut self, message: &str);
}

pub struct Collaborators {
    pub renderer: Box<dyn GalleryRenderer>,
    pub lightbox: Option<Box<dyn Lightbox>>,
    pub history: Box<dyn HistoryManager>,
    pub infinite_scroll: Option<Box<dyn InfiniteScroll>>,
    pub status: Box<dyn StatusSurface>,
}
