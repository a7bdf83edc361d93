use std::fmt::Write;

use owo_colors::{OwoColorize, Style};
use zidian_config::OutputFormat;
use zidian_config::ui::UiConfig;
use zidian_core::{Body, EntryView, View};

const TITLE: &str = "汉字释义查询";
const SUBTITLE: &str = "输入汉字，查看详细释义和基本信息";

/// Draws a `View` as terminal text, an HTML fragment or JSON
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    color: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Colour only when enabled and stdout is a terminal
    pub fn from_config(config: &UiConfig) -> Self {
        let color = config.color && atty::is(atty::Stream::Stdout);
        Self::new(config.format, color)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn header(&self) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "{}\n{}\n",
                self.paint(TITLE, Style::new().bold().blue()),
                self.paint(SUBTITLE, Style::new().dimmed())
            ),
            OutputFormat::Html | OutputFormat::Json => String::new(),
        }
    }

    pub fn render(&self, view: &View) -> String {
        match self.format {
            OutputFormat::Text => self.render_text(view),
            OutputFormat::Html => render_html(view),
            OutputFormat::Json => serde_json::to_string(view).unwrap_or_else(|e| {
                tracing::error!("Failed to serialize view: {}", e);
                String::new()
            }),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn render_text(&self, view: &View) -> String {
        match &view.body {
            Body::Loading => format!("{} 查询中...", self.paint("⠋", Style::new().cyan())),
            Body::Error { message } => self.paint(message, Style::new().red()),
            Body::Welcome { message } => self.paint(message, Style::new().dimmed()),
            Body::Entry(entry) => self.render_entry(entry),
        }
    }

    fn render_entry(&self, entry: &EntryView) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.paint(&entry.reading, Style::new().bold()));
        let _ = writeln!(
            out,
            "{}",
            self.paint(&entry.glyph, Style::new().bold().blue())
        );

        let facts: Vec<String> = entry
            .facts
            .iter()
            .map(|fact| {
                format!(
                    "{} {}",
                    self.paint(&fact.label, Style::new().dimmed()),
                    fact.value
                )
            })
            .collect();
        let _ = writeln!(out, "{}", facts.join("   "));

        for section in &entry.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", self.paint(&section.title, Style::new().bold().blue()));
            for line in markup_to_text(&section.html).lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }

        out.trim_end().to_string()
    }
}

fn render_html(view: &View) -> String {
    let input = &view.input;
    let mut out = String::from("<section class=\"zidian\">\n");

    let _ = writeln!(
        out,
        "  <div class=\"search\"><input type=\"text\" maxlength=\"1\" placeholder=\"{}\" value=\"{}\"><button{}>{}</button></div>",
        ammonia::clean_text(&input.placeholder),
        ammonia::clean_text(&input.text),
        if input.submit_enabled { "" } else { " disabled" },
        if input.busy {
            "<span class=\"spinner\"></span>"
        } else {
            "搜索"
        },
    );

    match &view.body {
        Body::Loading => {}
        Body::Error { message } => {
            let _ = writeln!(out, "  <p class=\"error\">{}</p>", ammonia::clean_text(message));
        }
        Body::Welcome { message } => {
            let _ = writeln!(out, "  <p class=\"welcome\">{}</p>", ammonia::clean_text(message));
        }
        Body::Entry(entry) => {
            let _ = writeln!(out, "  <div class=\"entry\">");
            let _ = writeln!(
                out,
                "    <span class=\"reading\">{}</span>",
                ammonia::clean_text(&entry.reading)
            );
            let _ = writeln!(
                out,
                "    <div class=\"glyph\">{}</div>",
                ammonia::clean_text(&entry.glyph)
            );
            let _ = writeln!(out, "    <dl>");
            for fact in &entry.facts {
                let _ = writeln!(
                    out,
                    "      <dt>{}</dt><dd>{}</dd>",
                    ammonia::clean_text(&fact.label),
                    ammonia::clean_text(&fact.value)
                );
            }
            let _ = writeln!(out, "    </dl>");
            for section in &entry.sections {
                // section.html is already sanitized
                let _ = writeln!(
                    out,
                    "    <article><h2>{}</h2><div>{}</div></article>",
                    ammonia::clean_text(&section.title),
                    section.html
                );
            }
            let _ = writeln!(out, "  </div>");
        }
    }

    out.push_str("</section>");
    out
}

/// Flatten sanitized markup for the terminal
pub fn markup_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut chars = html.chars();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                let tag: String = chars.by_ref().take_while(|&c| c != '>').collect();
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                let closing = tag.starts_with('/');

                match (name.as_str(), closing) {
                    ("br", _) | ("p", true) | ("li", true) | ("ul", true) | ("ol", true) => {
                        text.push('\n')
                    }
                    ("li", false) => text.push_str("• "),
                    _ => {}
                }
            }
            '&' => {
                let mut entity = String::new();
                let mut terminated = false;
                for c in chars.by_ref() {
                    if c == ';' {
                        terminated = true;
                        break;
                    }
                    entity.push(c);
                    if entity.len() > 8 {
                        break;
                    }
                }

                match decode_entity(&entity).filter(|_| terminated) {
                    Some(decoded) => text.push(decoded),
                    None => {
                        text.push('&');
                        text.push_str(&entity);
                        if terminated {
                            text.push(';');
                        }
                    }
                }
            }
            _ => text.push(c),
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
