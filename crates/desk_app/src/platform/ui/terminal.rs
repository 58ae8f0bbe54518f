use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::Local;
use desk_core::{NavLinkView, Page, Section};
use desk_logging::{desk_trace, desk_warn};

use super::constants::{ControlId, ListId, PanelId, TextId, PROMPT};
use super::{Severity, Surface, UiCommand};

const HELP: &[(&str, &str)] = &[
    ("go <page>", "show home, documents, about, how-it-works or features"),
    ("history [page]", "replay a history entry (defaults to home)"),
    ("research <topic>", "start a research job"),
    ("esc", "leave the progress view; the job keeps running"),
    ("focus", "jump to the topic input"),
    ("new", "start over after a finished report"),
    ("add <path>...", "pick files for upload"),
    ("drop <path>...", "drop files on the upload zone"),
    ("rm <n>", "remove pending file number n"),
    ("upload", "upload the pending files"),
    ("delete", "delete the document session"),
    ("refresh", "reload session info from the server"),
    ("ask <question>", "ask about the uploaded documents"),
    ("help", "show this list"),
    ("quit", "exit"),
];

/// Line-oriented surface. Keeps the last value of every target and prints
/// only what changed and is currently on screen.
pub struct TerminalSurface<W: Write> {
    out: W,
    page: Option<Page>,
    section: Option<Section>,
    texts: BTreeMap<TextId, String>,
    lists: BTreeMap<ListId, Vec<String>>,
    panels: BTreeMap<PanelId, bool>,
    enabled: BTreeMap<ControlId, bool>,
    highlighted: BTreeMap<ControlId, bool>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            page: None,
            section: None,
            texts: BTreeMap::new(),
            lists: BTreeMap::new(),
            panels: BTreeMap::new(),
            enabled: BTreeMap::new(),
            highlighted: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        for (usage, summary) in HELP {
            writeln!(self.out, "  {usage:<18} {summary}")?;
        }
        self.out.flush()
    }

    pub fn write_prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn try_apply(&mut self, command: UiCommand) -> io::Result<()> {
        match command {
            UiCommand::ShowPage { page, nav } => {
                if self.page == Some(page) {
                    return Ok(());
                }
                self.page = Some(page);
                writeln!(self.out)?;
                writeln!(self.out, "== {} ==", page.title())?;
                writeln!(self.out, "{}", nav_line(&nav))?;
                if page == Page::Home {
                    if let Some(section) = self.section {
                        writeln!(self.out, "-- {} --", section.name())?;
                    }
                }
                self.replay()?;
            }
            UiCommand::ShowSection(section) => {
                if self.section == Some(section) {
                    return Ok(());
                }
                self.section = Some(section);
                if self.page == Some(Page::Home) {
                    writeln!(self.out, "-- {} --", section.name())?;
                    self.replay()?;
                }
            }
            UiCommand::SetText {
                target,
                text,
                severity,
            } => {
                if self.texts.get(&target) == Some(&text) {
                    return Ok(());
                }
                self.texts.insert(target, text);
                if self.text_visible(target) {
                    self.write_text(target, severity)?;
                }
            }
            UiCommand::SetList { list, items } => {
                let previous = self.lists.insert(list, items).unwrap_or_default();
                if self.lists.get(&list) == Some(&previous) || !self.list_visible(list) {
                    return Ok(());
                }
                self.write_list_update(list, &previous)?;
            }
            UiCommand::SetEnabled { control, enabled } => {
                if self.enabled.insert(control, enabled) == Some(enabled) {
                    return Ok(());
                }
                if self.control_visible(control) {
                    let state = if enabled { "ready" } else { "unavailable" };
                    writeln!(self.out, "   ({} {state})", control_label(control))?;
                }
            }
            UiCommand::SetHighlight {
                control,
                highlighted,
            } => {
                if self.highlighted.insert(control, highlighted) == Some(highlighted) {
                    return Ok(());
                }
                if highlighted && self.control_visible(control) {
                    writeln!(self.out, "   ({} active)", control_label(control))?;
                }
            }
            UiCommand::SetVisible { panel, visible } => {
                let was_visible = self.panels.insert(panel, visible).unwrap_or(false);
                if visible && !was_visible && self.page == Some(Page::Documents) {
                    self.replay_panel(panel)?;
                }
            }
            UiCommand::Notify(message) => {
                writeln!(self.out, "[{}] {message}", Local::now().format("%H:%M:%S"))?;
            }
            UiCommand::Confirm(prompt) => {
                writeln!(self.out, "? {prompt} [y/N]")?;
            }
            UiCommand::ScrollToTop | UiCommand::ScrollReportIntoView => {
                desk_trace!("Scroll request ignored on terminal surface");
            }
        }
        self.out.flush()
    }

    fn panel_visible(&self, panel: PanelId) -> bool {
        self.panels.get(&panel).copied().unwrap_or(false)
    }

    fn on_home_section(&self, section: Section) -> bool {
        self.page == Some(Page::Home) && self.section == Some(section)
    }

    fn text_visible(&self, target: TextId) -> bool {
        let on_documents = self.page == Some(Page::Documents);
        match target {
            TextId::ResearchStatus => self.on_home_section(Section::Progress),
            TextId::Report => self.on_home_section(Section::Result),
            TextId::UploadStatus => on_documents && self.panel_visible(PanelId::UploadStatus),
            TextId::SessionSummary => on_documents && self.panel_visible(PanelId::SessionInfo),
            TextId::AskButton => on_documents && self.panel_visible(PanelId::QaSection),
        }
    }

    fn list_visible(&self, list: ListId) -> bool {
        match list {
            ListId::ProgressLog => self.on_home_section(Section::Progress),
            ListId::PendingFiles => self.page == Some(Page::Documents),
            ListId::QaResults => {
                self.page == Some(Page::Documents) && self.panel_visible(PanelId::QaSection)
            }
        }
    }

    fn control_visible(&self, control: ControlId) -> bool {
        match control {
            ControlId::UploadButton | ControlId::DropZone => self.page == Some(Page::Documents),
            ControlId::AskButton => self.list_visible(ListId::QaResults),
        }
    }

    fn write_text(&mut self, target: TextId, severity: Severity) -> io::Result<()> {
        let Some(text) = self.texts.get(&target).filter(|text| !text.is_empty()) else {
            return Ok(());
        };
        match target {
            TextId::Report => {
                writeln!(self.out, "{text}")?;
            }
            TextId::AskButton => {
                writeln!(self.out, "   (ask: {text})")?;
            }
            _ => {
                let marker = match severity {
                    Severity::Error => "!! ",
                    Severity::Success => "ok ",
                    Severity::Information => "",
                };
                writeln!(self.out, "{marker}{text}")?;
            }
        }
        Ok(())
    }

    /// Progress entries arrive newest first; when the old list is a suffix of
    /// the new one only the fresh entries are printed, oldest of them first.
    fn write_list_update(&mut self, list: ListId, previous: &[String]) -> io::Result<()> {
        let Some(items) = self.lists.get(&list) else {
            return Ok(());
        };
        let fresh = match list {
            ListId::ProgressLog if items.ends_with(previous) => items.len() - previous.len(),
            _ => {
                return write_full_list(&mut self.out, list, items);
            }
        };
        for item in items[..fresh].iter().rev() {
            writeln!(self.out, "  {item}")?;
        }
        Ok(())
    }

    fn replay(&mut self) -> io::Result<()> {
        let texts: Vec<TextId> = self.texts.keys().copied().collect();
        for target in texts {
            if self.text_visible(target) && target != TextId::AskButton {
                self.write_text(target, Severity::Information)?;
            }
        }
        let lists: Vec<ListId> = self.lists.keys().copied().collect();
        for list in lists {
            if self.list_visible(list) {
                if let Some(items) = self.lists.get(&list) {
                    write_full_list(&mut self.out, list, items)?;
                }
            }
        }
        Ok(())
    }

    fn replay_panel(&mut self, panel: PanelId) -> io::Result<()> {
        match panel {
            PanelId::UploadStatus => self.write_text(TextId::UploadStatus, Severity::Information),
            PanelId::SessionInfo => self.write_text(TextId::SessionSummary, Severity::Information),
            PanelId::QaSection => {
                writeln!(self.out, "Ask about your documents with `ask <question>`.")?;
                match self.lists.get(&ListId::QaResults) {
                    Some(items) if !items.is_empty() => {
                        write_full_list(&mut self.out, ListId::QaResults, items)
                    }
                    _ => Ok(()),
                }
            }
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, command: UiCommand) {
        if let Err(err) = self.try_apply(command) {
            desk_warn!("Terminal write failed: {err}");
        }
    }
}

fn nav_line(nav: &[NavLinkView]) -> String {
    nav.iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.label)
            } else {
                link.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn control_label(control: ControlId) -> &'static str {
    match control {
        ControlId::UploadButton => "upload",
        ControlId::AskButton => "ask",
        ControlId::DropZone => "drop zone",
    }
}

fn list_title(list: ListId) -> &'static str {
    match list {
        ListId::ProgressLog => "Progress:",
        ListId::PendingFiles => "Selected files:",
        ListId::QaResults => "Answers:",
    }
}

fn write_full_list<W: Write>(out: &mut W, list: ListId, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        if list == ListId::PendingFiles {
            writeln!(out, "(no files selected)")?;
        }
        return Ok(());
    }
    writeln!(out, "{}", list_title(list))?;
    for item in items {
        for (index, line) in item.lines().enumerate() {
            let indent = if index == 0 { "  " } else { "    " };
            writeln!(out, "{indent}{line}")?;
        }
    }
    Ok(())
}
