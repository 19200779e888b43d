//! Test harness for search controller integration tests.
//!
//! Collaborators record every call into a shared [`Log`]; [`MockBackend`] serves
//! pages out of an in-memory catalog (no HTTP). `stub_server` is the HTTP
//! counterpart used by the `HttpBackend` tests.

#![allow(dead_code)]

pub mod stub_server;

use std::cell::RefCell;
use std::rc::Rc;

use gallery_search_core::backend::{BackendError, SearchBackend};
use gallery_search_core::collaborators::*;
use gallery_search_core::types::*;
use gallery_search_core::{SearchConfig, SearchController};

// ---------------------------------------------------------------------------
// Recording collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Log {
    /// Every collaborator call in order, e.g. `history.push(search)`.
    pub calls: Vec<String>,
    /// History stack as the history manager sees it.
    pub history: Vec<String>,
    pub lightbox_open: bool,
    pub scroll_searches: Vec<(String, ScrollOptions)>,
    pub errors: Vec<String>,
}

impl Log {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }

    pub fn called(&self, call: &str) -> bool {
        self.count(call) > 0
    }
}

pub type SharedLog = Rc<RefCell<Log>>;

struct Renderer(SharedLog);

impl GalleryRenderer for Renderer {
    fn create_gallery_item(&mut self, item: &MediaItem) -> Tile {
        self.0.borrow_mut().calls.push(format!("renderer.create({})", item.name));
        Tile::for_item(item)
    }

    fn open_lightbox(&mut self, items: &[MediaItem], index: usize) {
        let mut log = self.0.borrow_mut();
        log.calls.push(format!("renderer.open_lightbox({})", items[index].name));
        log.lightbox_open = true;
        log.history.push(LIGHTBOX_STATE.to_string());
    }
}

struct Viewer(SharedLog);

impl Lightbox for Viewer {
    fn is_open(&self) -> bool {
        self.0.borrow().lightbox_open
    }

    fn close(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("lightbox.close".into());
        log.lightbox_open = false;
    }
}

struct History(SharedLog);

impl HistoryManager for History {
    fn push_state(&mut self, tag: &str) {
        let mut log = self.0.borrow_mut();
        log.calls.push(format!("history.push({tag})"));
        log.history.push(tag.to_string());
    }

    fn remove_state(&mut self, tag: &str) {
        let mut log = self.0.borrow_mut();
        log.calls.push(format!("history.remove({tag})"));
        log.history.retain(|t| t != tag);
    }

    fn has_state(&self, tag: &str) -> bool {
        self.0.borrow().history.iter().any(|t| t == tag)
    }
}

struct Scroll(SharedLog);

impl InfiniteScroll for Scroll {
    fn init(&mut self) {
        self.0.borrow_mut().calls.push("scroll.init".into());
    }

    fn start_search(&mut self, query: &str, options: ScrollOptions) {
        let mut log = self.0.borrow_mut();
        log.calls.push(format!("scroll.start({query})"));
        log.scroll_searches.push((query.to_string(), options));
    }

    fn reset_state(&mut self) {
        self.0.borrow_mut().calls.push("scroll.reset".into());
    }
}

struct Status(SharedLog);

impl StatusSurface for Status {
    fn show_loading(&mut self) {
        self.0.borrow_mut().calls.push("status.loading".into());
    }

    fn hide_loading(&mut self) {
        self.0.borrow_mut().calls.push("status.loaded".into());
    }

    fn show_error(&mut self, message: &str) {
        let mut log = self.0.borrow_mut();
        log.calls.push("status.error".into());
        log.errors.push(message.to_string());
    }
}

#[derive(Clone, Copy, Default)]
pub struct Options {
    pub infinite_scroll: bool,
    pub lightbox_open: bool,
}

/// A full collaborator set recording into one log.
pub fn recording_collaborators(opts: Options) -> (Collaborators, SharedLog) {
    let log: SharedLog = Rc::default();
    {
        let mut l = log.borrow_mut();
        l.lightbox_open = opts.lightbox_open;
        if opts.lightbox_open {
            l.history.push(LIGHTBOX_STATE.to_string());
        }
    }
    let collab = Collaborators {
        renderer: Box::new(Renderer(log.clone())),
        lightbox: Some(Box::new(Viewer(log.clone()))),
        history: Box::new(History(log.clone())),
        infinite_scroll: if opts.infinite_scroll {
            Some(Box::new(Scroll(log.clone())))
        } else {
            None
        },
        status: Box::new(Status(log.clone())),
    };
    (collab, log)
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BackendLog {
    pub catalog: Vec<MediaItem>,
    pub suggestions: Vec<String>,
    /// Returned verbatim from `search` instead of paging the catalog.
    pub canned: Option<SearchResult>,
    pub fail: bool,
    pub suggestion_calls: Vec<String>,
    pub search_calls: Vec<SearchRequest>,
}

#[derive(Clone, Default)]
pub struct MockBackend(pub Rc<RefCell<BackendLog>>);

impl SearchBackend for MockBackend {
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, BackendError> {
        let mut state = self.0.borrow_mut();
        state.suggestion_calls.push(query.to_string());
        if state.fail {
            return Err(BackendError::Transport("connection refused".into()));
        }
        Ok(state.suggestions.clone())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, BackendError> {
        let mut state = self.0.borrow_mut();
        state.search_calls.push(request.clone());
        if state.fail {
            return Err(BackendError::Transport("connection refused".into()));
        }
        if let Some(canned) = &state.canned {
            return Ok(canned.clone());
        }

        let matching: Vec<MediaItem> = state
            .catalog
            .iter()
            .filter(|item| match request.media_type {
                Some(MediaType::Image) => item.kind == ItemKind::Image,
                Some(MediaType::Video) => item.kind == ItemKind::Video,
                None => true,
            })
            .cloned()
            .collect();
        let size = request.page_size as usize;
        let start = (request.page as usize - 1) * size;
        Ok(SearchResult {
            query: request.query.trim().to_string(),
            items: matching.iter().skip(start).take(size).cloned().collect(),
            total_items: matching.len() as u64,
            page: request.page,
            page_size: request.page_size,
        })
    }
}

pub fn item(name: &str, kind: ItemKind) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        path: format!("/gallery/{name}"),
        kind,
    }
}

/// `n` photos named `photo-0.jpg`, `photo-1.jpg`, ...
pub fn photos(n: usize) -> Vec<MediaItem> {
    (0..n).map(|i| item(&format!("photo-{i}.jpg"), ItemKind::Image)).collect()
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct TestHarness {
    pub controller: SearchController<MockBackend>,
    pub log: SharedLog,
    pub backend: Rc<RefCell<BackendLog>>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(opts: Options) -> Self {
        let config = SearchConfig {
            page_size: 10,
            ..SearchConfig::default()
        };
        let (collab, log) = recording_collaborators(opts);
        let backend = MockBackend::default();
        let state = backend.0.clone();
        let mut controller = SearchController::new(backend, collab, config);
        controller.init();
        TestHarness {
            controller,
            log,
            backend: state,
        }
    }

    pub fn with_catalog(self, catalog: Vec<MediaItem>) -> Self {
        self.backend.borrow_mut().catalog = catalog;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().calls.clone()
    }
}
