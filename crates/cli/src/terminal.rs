//! Terminal stand-ins for the gallery collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use gallery_search_core::collaborators::*;
use gallery_search_core::types::{ItemKind, MediaItem, LIGHTBOX_STATE};
use tracing::debug;

/// History stack and lightbox flag shared by the terminal collaborators.
#[derive(Default)]
struct Session {
    history: Vec<String>,
    viewing: Option<String>,
}

type SharedSession = Rc<RefCell<Session>>;

struct TileRenderer {
    session: SharedSession,
}

impl GalleryRenderer for TileRenderer {
    fn create_gallery_item(&mut self, item: &MediaItem) -> Tile {
        let tag = match item.kind {
            ItemKind::Image => "img",
            ItemKind::Video => "vid",
            ItemKind::Directory => "dir",
            ItemKind::Other => "---",
        };
        Tile {
            label: format!("[{tag}] {:<40} {}", item.name, item.path),
            path: item.path.clone(),
            kind: item.kind,
        }
    }

    fn open_lightbox(&mut self, items: &[MediaItem], index: usize) {
        let item = &items[index];
        println!("Viewing {} ({}/{})", item.path, index + 1, items.len());
        let mut s = self.session.borrow_mut();
        s.viewing = Some(item.path.clone());
        s.history.push(LIGHTBOX_STATE.to_string());
    }
}

struct Viewer {
    session: SharedSession,
}

impl Lightbox for Viewer {
    fn is_open(&self) -> bool {
        self.session.borrow().viewing.is_some()
    }

    fn close(&mut self) {
        if let Some(path) = self.session.borrow_mut().viewing.take() {
            debug!(path = path.as_str(), "Closed viewer");
        }
    }
}

struct History {
    session: SharedSession,
}

impl HistoryManager for History {
    fn push_state(&mut self, tag: &str) {
        debug!(tag, "history push");
        self.session.borrow_mut().history.push(tag.to_string());
    }

    fn remove_state(&mut self, tag: &str) {
        debug!(tag, "history remove");
        self.session.borrow_mut().history.retain(|t| t != tag);
    }

    fn has_state(&self, tag: &str) -> bool {
        self.session.borrow().history.iter().any(|t| t == tag)
    }
}

struct Status {
    quiet: bool,
}

impl StatusSurface for Status {
    fn show_loading(&mut self) {
        if !self.quiet {
            eprintln!("Searching...");
        }
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Collaborators for the terminal. `quiet` suppresses the loading line (JSON mode).
pub fn collaborators(quiet: bool) -> Collaborators {
    let session: SharedSession = Rc::default();
    Collaborators {
        renderer: Box::new(TileRenderer {
            session: session.clone(),
        }),
        lightbox: Some(Box::new(Viewer {
            session: session.clone(),
        })),
        history: Box::new(History {
            session: session.clone(),
        }),
        infinite_scroll: None,
        status: Box::new(Status { quiet }),
    }
}
