use anstyle::{AnsiColor, Color, Style};

const HEADER: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)))
    .bold();

const LITERAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

const PLACEHOLDER: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Cyan)))
    .dimmed();

const ERROR: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)))
    .bold();

pub fn get_clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(HEADER)
        .usage(HEADER)
        .literal(LITERAL)
        .placeholder(PLACEHOLDER)
        .error(ERROR)
        .invalid(ERROR)
}
