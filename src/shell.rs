/*!
 * Line-oriented front end for a [`Session`]
 *
 * Reads one command per line, applies it and prints the resulting view.
 */

use std::io::{self, BufRead, Write};

use crate::clipboard::Clipboard;
use crate::launcher::Launcher;
use crate::report::{ReportFormat, Reporter};
use crate::session::Session;
use crate::types::{Entry, EntryKind, Panel, PanelCommand};
use crate::utils::display_relative;

/// Rows of a list shown at once
const LIST_HEIGHT: usize = 20;

const HELP: &str = "\
commands:
  j / k          move down / up
  enter, l       enter directory / open preview
  h, esc         go back
  tab            switch between directories and files
  d / f / p      focus directories / files / preview
  s              toggle selection of the highlighted item
  a              select or deselect everything in the panel
  i              toggle include mode
  x              clear the selection
  /text          search the workspace for text
  o              export and open the bundle
  c              export and copy the bundle to the clipboard
  ?              this help
  q              quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(isize),
    Enter,
    Back,
    Panel(PanelCommand),
    Toggle,
    SelectAll,
    IncludeMode,
    Clear,
    Search(String),
    Open,
    Copy,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `None` for unknown input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(query) = line.strip_prefix('/') {
            return Some(Self::Search(query.to_string()));
        }

        let command = match line.trim() {
            "j" | "down" => Self::Move(1),
            "k" | "up" => Self::Move(-1),
            "" | "l" | "enter" => Self::Enter,
            "h" | "esc" | "back" => Self::Back,
            "tab" => Self::Panel(PanelCommand::Cycle),
            "d" => Self::Panel(PanelCommand::Jump(Panel::Directories)),
            "f" => Self::Panel(PanelCommand::Jump(Panel::Files)),
            "p" => Self::Panel(PanelCommand::Jump(Panel::Preview)),
            "s" | "space" => Self::Toggle,
            "a" => Self::SelectAll,
            "i" => Self::IncludeMode,
            "x" => Self::Clear,
            "o" => Self::Open,
            "c" => Self::Copy,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Command loop bound to a session and its external collaborators
pub struct Shell<C, L> {
    session: Session,
    clipboard: C,
    launcher: L,
    reporter: Reporter,
}

impl<C: Clipboard, L: Launcher> Shell<C, L> {
    pub fn new(session: Session, clipboard: C, launcher: L) -> Self {
        Self {
            session,
            clipboard,
            launcher,
            reporter: Reporter::new(ReportFormat::ConsoleTable),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.render(out)?;

        for line in input.lines() {
            let line = line?;
            let Some(command) = Command::parse(&line) else {
                writeln!(out, "Unknown command: {} (? for help)", line.trim())?;
                continue;
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command, out)?;
            self.render(out)?;
        }

        out.flush()
    }

    /// Apply one command, printing anything it produces besides the view
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        match command {
            Command::Move(delta) => self.session.move_cursor(delta),
            Command::Enter => self.session.enter(),
            Command::Back => self.session.back(),
            Command::Panel(panel) => self.session.switch_panel(panel),
            Command::Toggle => self.session.toggle_current(),
            Command::SelectAll => self.session.select_all(),
            Command::IncludeMode => {
                self.session.toggle_include_mode();
            }
            Command::Clear => self.session.clear_selection(),
            Command::Search(query) => {
                self.session.search_for(&query);
                if let Some(state) = self.session.search().state() {
                    if state.truncated {
                        writeln!(out, "Search stopped at the match limit")?;
                    }
                }
                self.session.commit_search();
            }
            Command::Open => {
                if let Ok(bundle) = self.session.export_and_open(&self.launcher) {
                    writeln!(out, "{}", self.reporter.generate_report(&bundle.report))?;
                }
            }
            Command::Copy => {
                if let Ok(bundle) = self.session.export_and_copy(&self.clipboard) {
                    writeln!(out, "{}", self.reporter.generate_report(&bundle.report))?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Print the current view
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.session.scroll_into_view(LIST_HEIGHT);
        let session = &self.session;
        let nav = session.navigation();
        let counts = session.counts();

        let location = display_relative(nav.current_directory(), nav.root());
        writeln!(out)?;
        writeln!(
            out,
            "[{}] {} | include: {} | selected: {} files, {} dirs",
            session.panel(),
            if location.is_empty() { "." } else { location.as_str() },
            if session.selection().include_mode() { "on" } else { "off" },
            counts.files,
            counts.directories,
        )?;

        match session.panel() {
            Panel::Directories => {
                writeln!(out, "-- directories --")?;
                let offset = nav.scroll_offset();
                self.write_list(out, session.directory_items(), nav.cursor(), offset)?;
            }
            Panel::Files => {
                writeln!(out, "-- files --")?;
                let cursor = session.file_cursor();
                let offset = cursor.saturating_sub(LIST_HEIGHT - 1);
                self.write_list(out, session.file_items(), cursor, offset)?;
            }
            Panel::Preview => {
                writeln!(out, "-- preview --")?;
                for line in session
                    .preview_lines()
                    .iter()
                    .skip(session.preview_offset())
                    .take(LIST_HEIGHT)
                {
                    writeln!(out, "  {}", line)?;
                }
            }
        }

        if let Some(status) = session.status() {
            writeln!(out, "{}", status)?;
        }
        write!(out, "> ")?;
        out.flush()
    }

    fn write_list<W: Write>(
        &self,
        out: &mut W,
        items: &[Entry],
        cursor: usize,
        offset: usize,
    ) -> io::Result<()> {
        if items.is_empty() {
            return writeln!(out, "  (empty)");
        }
        for (index, entry) in items.iter().enumerate().skip(offset).take(LIST_HEIGHT) {
            let pointer = if index == cursor { '>' } else { ' ' };
            let mark = if entry.kind == EntryKind::Parent {
                "   "
            } else if self.session.is_selected(entry) {
                "[x]"
            } else {
                "[ ]"
            };
            let suffix = if entry.is_directory() { "/" } else { "" };
            writeln!(out, "{} {} {}{}", pointer, mark, entry.name, suffix)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("j"), Some(Command::Move(1)));
        assert_eq!(Command::parse("k\n"), Some(Command::Move(-1)));
        assert_eq!(Command::parse(""), Some(Command::Enter));
        assert_eq!(
            Command::parse("tab"),
            Some(Command::Panel(PanelCommand::Cycle))
        );
        assert_eq!(
            Command::parse("/src main"),
            Some(Command::Search("src main".to_string()))
        );
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("zz"), None);
    }
}
