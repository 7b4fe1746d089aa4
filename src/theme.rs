use anstyle::{AnsiColor, Color, Effects, RgbColor, Style};

use crate::scripts::entry::ScriptEntry;
use crate::tree::{Labeler, count_label};

/// Raw RGB tuple of the accent color
pub const ACCENT_RGB: (u8, u8, u8) = (207, 106, 76);

pub const ROOT: Style = Style::new()
    .fg_color(Some(Color::Rgb(RgbColor(
        ACCENT_RGB.0,
        ACCENT_RGB.1,
        ACCENT_RGB.2,
    ))))
    .effects(Effects::BOLD);
pub const NAME: Style = Style::new().effects(Effects::BOLD);
pub const HOOK: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
pub const COMMAND: Style = Style::new().effects(Effects::DIMMED);
pub const CYCLE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Labels decorated with ANSI styles, for terminal output
pub struct StyledLabels;

impl Labeler for StyledLabels {
    fn root(&self, count: usize) -> String {
        format!("{ROOT}{}{ROOT:#}", count_label(count))
    }

    fn script(&self, entry: &ScriptEntry) -> String {
        let name = if entry.is_hook() { HOOK } else { NAME };
        format!(
            "{name}{}{name:#} {COMMAND}→ {}{COMMAND:#}",
            entry.name, entry.command
        )
    }

    fn cycle(&self, name: &str) -> String {
        format!("{NAME}{name}{NAME:#} {CYCLE}↻ (cycle){CYCLE:#}")
    }

    fn truncated(&self, name: &str) -> String {
        format!("{NAME}{name}{NAME:#} {COMMAND}…{COMMAND:#}")
    }
}
