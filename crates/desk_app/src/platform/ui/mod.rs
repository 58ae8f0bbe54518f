pub mod constants;
pub mod input;
pub mod render;
pub mod terminal;

use desk_core::{NavLinkView, Page, Section};

use constants::{ControlId, ListId, PanelId, TextId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Success,
    Error,
}

/// One change to apply to the visible surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    ShowPage {
        page: Page,
        nav: Vec<NavLinkView>,
    },
    ShowSection(Section),
    SetText {
        target: TextId,
        text: String,
        severity: Severity,
    },
    SetList {
        list: ListId,
        items: Vec<String>,
    },
    SetEnabled {
        control: ControlId,
        enabled: bool,
    },
    SetHighlight {
        control: ControlId,
        highlighted: bool,
    },
    SetVisible {
        panel: PanelId,
        visible: bool,
    },
    /// Blocking notice.
    Notify(String),
    /// Yes/no prompt; the answer comes back as a message.
    Confirm(String),
    ScrollToTop,
    ScrollReportIntoView,
}

pub trait Surface {
    fn apply(&mut self, command: UiCommand);

    fn apply_all(&mut self, commands: Vec<UiCommand>) {
        for command in commands {
            self.apply(command);
        }
    }
}
