//! The search controller: input handling, suggestions, searching, rendering,
//! pagination and history bookkeeping for the gallery search feature.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, SearchBackend};
use crate::collaborators::{Collaborators, ScrollOptions};
use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::keys::{self, KeyAction, KeyContext, KeyEvent};
use crate::types::*;
use crate::view::{count_text, InputField, ResultsBody, SearchView};

/// A search attempt that failed. The user has already been shown
/// [`SEARCH_FAILED`] by the time this is returned.
#[derive(Debug, Error)]
#[error("search for '{query}' failed: {source}")]
pub struct SearchError {
    pub query: String,
    #[source]
    pub source: BackendError,
}

pub struct SearchController<B> {
    backend: B,
    collab: Collaborators,
    config: SearchConfig,
    view: SearchView,
    suggestions: Debouncer<String>,
    /// Request that produced `results`; pagination reuses its query and filter.
    active: Option<SearchRequest>,
    results: Option<SearchResult>,
    initialized: bool,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(backend: B, collab: Collaborators, config: SearchConfig) -> Self {
        let suggestions = Debouncer::new(config.debounce());
        Self {
            backend,
            collab,
            config,
            view: SearchView::default(),
            suggestions,
            active: None,
            results: None,
            initialized: false,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn results(&self) -> Option<&SearchResult> {
        self.results.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a suggestions fetch is waiting for the debounce delay.
    pub fn suggestions_pending(&self) -> bool {
        self.suggestions.is_pending()
    }

    pub fn set_type_filter(&mut self, filter: Option<MediaType>) {
        self.view.type_filter = filter;
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn init(&mut self) {
        if self.initialized {
            debug!("Search controller already initialized");
            return;
        }
        if let Some(scroll) = self.collab.infinite_scroll.as_mut() {
            scroll.init();
        }
        self.initialized = true;
        debug!(
            infinite_scroll = self.collab.infinite_scroll.is_some(),
            "Search controller initialized"
        );
    }

    // -----------------------------------------------------------------------
    // Input, clear buttons, suggestions
    // -----------------------------------------------------------------------

    /// Text changed in one of the search inputs.
    pub fn on_input(&mut self, field: InputField, text: &str) {
        self.view.input_mut(field).set(text);
        if field != InputField::Header {
            return;
        }

        self.view.dropdown.hide();
        if text.chars().count() >= self.config.min_suggestion_chars.max(1) {
            self.suggestions.push(text.to_string());
        } else {
            self.suggestions.cancel();
        }
    }

    /// Clear button clicked.
    pub fn clear(&mut self, field: InputField) {
        self.view.input_mut(field).clear();
        if field == InputField::Header {
            self.hide_suggestions();
        }
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions.cancel();
        self.view.dropdown.hide();
    }

    /// Wait out the debounce delay, then fetch suggestions for the latest text.
    ///
    /// Pending forever when no fetch is scheduled.
    pub async fn next_suggestions(&mut self) -> usize {
        let query = self.suggestions.ready().await;
        self.load_suggestions(&query).await
    }

    /// Fetch suggestions for `query` and show the dropdown if any came back.
    /// Returns how many suggestions are shown.
    pub async fn load_suggestions(&mut self, query: &str) -> usize {
        match self.backend.suggestions(query).await {
            Ok(list) => {
                if self.view.header.value != query {
                    debug!(query, "Dropping suggestions for stale input");
                    return 0;
                }
                debug!(query, count = list.len(), "Suggestions loaded");
                self.view.dropdown.show(list);
                self.view.dropdown.suggestions.len()
            }
            Err(e) => {
                warn!(query, error = %e, "Could not load suggestions");
                self.view.dropdown.hide();
                0
            }
        }
    }

    /// Search for the suggestion at `index`. Returns `Ok(false)` if there is none.
    pub async fn select_suggestion(&mut self, index: usize) -> Result<bool, SearchError> {
        let Some(text) = self.view.dropdown.suggestions.get(index).cloned() else {
            return Ok(false);
        };
        self.view.header.set(&text);
        self.search(&text).await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    pub async fn handle_key(&mut self, event: &KeyEvent) -> Result<KeyAction, SearchError> {
        let cx = KeyContext {
            panel_open: self.view.panel_open,
            dropdown_open: self.view.dropdown.visible,
        };
        let action = keys::route(event, cx);
        match &action {
            KeyAction::FocusSearch => self.focus_search(),
            KeyAction::HideSuggestions => self.hide_suggestions(),
            KeyAction::CloseResults => self.close_results(),
            KeyAction::HighlightNext => self.view.dropdown.highlight_next(),
            KeyAction::HighlightPrevious => self.view.dropdown.highlight_previous(),
            KeyAction::Submit(field) => {
                let highlighted = match field {
                    InputField::Header => {
                        self.view.dropdown.highlighted_text().map(str::to_string)
                    }
                    InputField::Panel => None,
                };
                let query = match highlighted {
                    Some(text) => {
                        self.view.header.set(&text);
                        text
                    }
                    None => self.view.input(*field).value.clone(),
                };
                self.perform_search(&query).await?;
            }
            KeyAction::Ignore => {}
        }
        Ok(action)
    }

    /// Move focus to the header search input. Opening search closes the lightbox.
    pub fn focus_search(&mut self) {
        self.close_lightbox();
        self.view.focused = Some(InputField::Header);
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Enter-key entry point; no validation, the query goes out as typed.
    pub async fn perform_search(&mut self, query: &str) -> Result<(), SearchError> {
        self.search(query).await
    }

    /// Search page 1 for `query` with the currently selected type filter.
    pub async fn search(&mut self, query: &str) -> Result<(), SearchError> {
        self.close_lightbox();
        self.hide_suggestions();

        let request =
            SearchRequest::first_page(query, self.config.page_size, self.view.type_filter);
        self.fetch_and_show(request, true).await
    }

    /// Show `page` of the current result set. Returns `Ok(false)` when there is
    /// nothing to page through, the page is out of range, or the
    /// infinite-scroll helper owns paging.
    pub async fn load_page(&mut self, page: u32) -> Result<bool, SearchError> {
        if self.collab.infinite_scroll.is_some() {
            return Ok(false);
        }
        let (Some(active), Some(current)) = (self.active.as_ref(), self.results.as_ref()) else {
            return Ok(false);
        };
        if page == 0 || page > current.page_count() || page == current.page {
            return Ok(false);
        }

        let request = SearchRequest {
            page,
            ..active.clone()
        };
        self.fetch_and_show(request, false).await?;
        Ok(true)
    }

    pub async fn next_page(&mut self) -> Result<bool, SearchError> {
        let Some(page) = self.results.as_ref().map(|r| r.page + 1) else {
            return Ok(false);
        };
        self.load_page(page).await
    }

    pub async fn previous_page(&mut self) -> Result<bool, SearchError> {
        match self.results.as_ref().map(|r| r.page) {
            Some(page) if page > 1 => self.load_page(page - 1).await,
            _ => Ok(false),
        }
    }

    async fn fetch_and_show(
        &mut self,
        request: SearchRequest,
        new_search: bool,
    ) -> Result<(), SearchError> {
        self.collab.status.show_loading();
        let fetched = self.backend.search(&request).await;
        let outcome = match fetched {
            Ok(result) => {
                self.show_result(&request, result, new_search);
                self.active = Some(request);
                Ok(())
            }
            Err(source) => {
                warn!(query = request.query.as_str(), error = %source, "Search failed");
                self.collab.status.show_error(SEARCH_FAILED);
                self.drop_results();
                Err(SearchError {
                    query: request.query,
                    source,
                })
            }
        };
        self.collab.status.hide_loading();
        outcome
    }

    fn show_result(
        &mut self,
        request: &SearchRequest,
        mut result: SearchResult,
        new_search: bool,
    ) {
        // Backends that omit pageSize served the size we asked for
        if result.page_size == 0 {
            result.page_size = request.page_size;
        }
        info!(
            query = result.query.as_str(),
            items = result.items.len(),
            total = result.total_items,
            page = result.page,
            "Search complete"
        );

        self.view.sync_inputs(&result.query);

        self.view.body = match self.collab.infinite_scroll.as_mut() {
            Some(scroll) => {
                scroll.start_search(
                    &result.query,
                    ScrollOptions {
                        media_type: request.media_type,
                        page_size: request.page_size,
                        initial: result.clone(),
                    },
                );
                ResultsBody::Delegated
            }
            None if result.items.is_empty() => ResultsBody::empty_for(&request.query),
            None => ResultsBody::Tiles(
                result
                    .items
                    .iter()
                    .map(|item| self.collab.renderer.create_gallery_item(item))
                    .collect(),
            ),
        };

        self.view.count_text = count_text(&result);
        self.view.panel_open = true;
        if new_search {
            self.collab.history.push_state(SEARCH_STATE);
        }
        self.results = Some(result);
    }

    /// Forget the current result set, including whatever the infinite-scroll
    /// helper is still showing.
    fn drop_results(&mut self) {
        if let Some(scroll) = self.collab.infinite_scroll.as_mut() {
            scroll.reset_state();
        }
        self.results = None;
        self.active = None;
        self.view.body = ResultsBody::Blank;
        self.view.count_text.clear();
    }

    // -----------------------------------------------------------------------
    // Results panel and lightbox
    // -----------------------------------------------------------------------

    /// Open the lightbox on item `index` of the current page.
    pub fn open_item(&mut self, index: usize) -> bool {
        match self.results.as_ref() {
            Some(r) if index < r.items.len() => {
                self.collab.renderer.open_lightbox(&r.items, index);
                true
            }
            _ => false,
        }
    }

    pub fn close_results(&mut self) {
        self.hide_suggestions();
        self.view.panel_open = false;
        if self.collab.history.has_state(SEARCH_STATE) {
            self.collab.history.remove_state(SEARCH_STATE);
        }
        self.drop_results();
    }

    fn close_lightbox(&mut self) {
        let Some(lightbox) = self.collab.lightbox.as_mut() else {
            return;
        };
        if !lightbox.is_open() {
            return;
        }
        lightbox.close();
        if self.collab.history.has_state(LIGHTBOX_STATE) {
            self.collab.history.remove_state(LIGHTBOX_STATE);
        }
    }
}
