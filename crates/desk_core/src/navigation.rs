use desk_logging::desk_debug;

use crate::{AppState, Effect, Page, Section};

/// Shows the page named `name`. Unknown names leave the current page in place.
pub(crate) fn navigate(state: &mut AppState, name: &str) -> Vec<Effect> {
    match Page::from_name(name) {
        Some(page) => show_page(state, page),
        None => {
            desk_debug!("Ignoring navigation to unknown page {name:?}");
            Vec::new()
        }
    }
}

/// History entries without a page name land on home.
pub(crate) fn history(state: &mut AppState, name: Option<&str>) -> Vec<Effect> {
    navigate(state, name.unwrap_or(Page::Home.name()))
}

pub(crate) fn show_page(state: &mut AppState, page: Page) -> Vec<Effect> {
    if state.page != page {
        state.page = page;
        state.mark_dirty();
    }
    vec![Effect::ScrollToTop]
}

pub(crate) fn show_section(state: &mut AppState, section: Section) {
    if state.section != section {
        state.section = section;
        state.mark_dirty();
    }
}
