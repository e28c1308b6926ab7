//! Markdown → ratatui `Text` renderer.
//!
//! Converts `pulldown_cmark` events into styled `Line`/`Span` values:
//! headings, emphasis, inline code, fenced code blocks (syntect
//! highlighting), nested lists, blockquotes, rules and links.
//!
//! Raw HTML is never interpreted. Depending on [`RawHtml`] it is either
//! dropped or shown as dim literal text.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";
const FRAME: Color = Color::DarkGray;

/// What to do with HTML embedded in markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawHtml {
    #[default]
    Strip,
    /// Keep the markup visible as plain text.
    Literal,
}

impl RawHtml {
    pub fn from_allow(allow_raw_html: bool) -> Self {
        if allow_raw_html {
            RawHtml::Literal
        } else {
            RawHtml::Strip
        }
    }
}

/// Parse markdown into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color, html: RawHtml) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg, html);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

/// Highlight `code` as `language`, one `Line` per source line.
///
/// Unknown languages fall back to plain white text.
pub fn highlight_code(code: &str, language: &str) -> Vec<Line<'static>> {
    let Some(mut hl) = highlighter_for(language) else {
        return code
            .lines()
            .map(|l| Line::from(Span::styled(expand_tabs(l), Style::default().fg(Color::White))))
            .collect();
    };
    LinesWithEndings::from(code)
        .map(|line| Line::from(highlight_line(&mut hl, line)))
        .collect()
}

fn highlighter_for(language: &str) -> Option<HighlightLines<'static>> {
    if language.is_empty() {
        return None;
    }
    // syntect's defaults have no TSX/JSX grammar; JavaScript is close enough
    let token = match language {
        "tsx" | "jsx" | "ts" | "typescript" => "js",
        other => other,
    };
    let syntax = SYNTAX_SET.find_syntax_by_token(token)?;
    let theme = THEME_SET.themes.get(THEME)?;
    Some(HighlightLines::new(syntax, theme))
}

fn highlight_line(hl: &mut HighlightLines<'static>, line: &str) -> Vec<Span<'static>> {
    match hl.highlight_line(line, &SYNTAX_SET) {
        Ok(ranges) => ranges
            .into_iter()
            .filter_map(|(style, frag)| {
                let content = expand_tabs(frag.trim_end_matches('\n'));
                if content.is_empty() {
                    return None;
                }
                let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                Some(Span::styled(content, Style::default().fg(fg)))
            })
            .collect(),
        Err(e) => {
            log::debug!("Highlighting failed, using plain text: {}", e);
            vec![Span::raw(expand_tabs(line.trim_end_matches('\n')))]
        }
    }
}

/// Ratatui renders `\t` as zero-width.
fn expand_tabs(s: &str) -> String {
    s.replace('\t', "    ")
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    html: RawHtml,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote and code block borders).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    highlighter: Option<HighlightLines<'static>>,
    in_code_block: bool,
    link_url: Option<String>,
    needs_blank: bool,
}

impl Writer {
    fn new(base_fg: Color, html: RawHtml) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            html,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_code_block: false,
            link_url: None,
            needs_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, mut line: Line<'static>) {
        for pfx in self.line_prefixes.iter().rev() {
            line.spans.insert(0, pfx.clone());
        }
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.push_line(Line::from(span)),
        }
    }

    fn start_block(&mut self) {
        if self.needs_blank {
            self.push_line(Line::default());
            self.needs_blank = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.push_span(Span::styled(
                c.to_string(),
                Style::default().fg(Color::White).bg(FRAME),
            )),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.start_block();
                self.push_line(Line::from(Span::styled("─".repeat(40), Style::default().fg(FRAME))));
                self.needs_blank = true;
            }
            Event::TaskListMarker(checked) => {
                self.push_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            Event::Html(raw) => self.html(raw, true),
            Event::InlineHtml(raw) => self.html(raw, false),
            _ => {} // footnotes, math
        }
    }

    fn html(&mut self, raw: CowStr<'_>, block: bool) {
        if self.html == RawHtml::Strip {
            log::debug!("Dropping raw HTML ({} bytes)", raw.len());
            return;
        }
        let style = Style::default().fg(FRAME).add_modifier(Modifier::DIM);
        if block {
            for line in raw.lines() {
                self.push_line(Line::from(Span::styled(expand_tabs(line), style)));
            }
        } else {
            self.push_span(Span::styled(raw.to_string(), style));
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.start_block();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.push_line(Line::default());
                self.push_style(heading_style(self.base_fg, level));
            }
            Tag::HtmlBlock => self.start_block(),
            Tag::BlockQuote(_) => {
                self.start_block();
                self.line_prefixes.push(Span::styled("│ ", Style::default().fg(FRAME)));
                self.push_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let frame = Style::default().fg(FRAME);
                let top = if lang.is_empty() {
                    Line::from(Span::styled("╭──", frame))
                } else {
                    Line::from(vec![
                        Span::styled("╭── ", frame),
                        Span::styled(lang.clone(), frame.add_modifier(Modifier::BOLD)),
                        Span::styled(" ──", frame),
                    ])
                };
                self.push_line(top);
                self.line_prefixes.push(Span::styled("│ ", frame));
                self.highlighter = highlighter_for(&lang);
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.start_block();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                let marker = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(FRAME)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            _ => {} // tables, images, definitions
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::HtmlBlock => self.needs_blank = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_code_block = false;
                self.line_prefixes.pop();
                self.push_line(Line::from(Span::styled("╰──", Style::default().fg(FRAME))));
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                if self.list_indices.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(url, link_style()));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        if self.in_code_block {
            match self.highlighter.take() {
                Some(mut hl) => {
                    for line in LinesWithEndings::from(&*cow) {
                        let spans = highlight_line(&mut hl, line);
                        self.push_line(Line::from(spans));
                    }
                    self.highlighter = Some(hl);
                }
                None => {
                    let plain = Style::default().fg(Color::White);
                    for line in cow.lines() {
                        self.push_line(Line::from(Span::styled(expand_tabs(line), plain)));
                    }
                }
            }
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(expand_tabs(&cow), style));
    }
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    let style = Style::default().fg(base_fg).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.fg(Color::Magenta).add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style.fg(Color::Magenta),
        _ => style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn heading_text_is_bold_without_hash_prefix() {
        let text = render("## Key Concepts", Color::White, RawHtml::Strip);
        let line = &text.lines[0];
        assert_eq!(plain(&text)[0], "Key Concepts");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn nested_bold_inside_list_item() {
        let text = render("* **ML:** learns from data", Color::White, RawHtml::Strip);
        let line = &text.lines[0];
        assert_eq!(line.spans[0].content, "• ");
        let bold = line.spans.iter().find(|s| s.content == "ML:").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn nested_list_is_indented() {
        let text = render("* outer\n    * inner", Color::White, RawHtml::Strip);
        let lines = plain(&text);
        assert!(lines.iter().any(|l| l.starts_with("  • inner")), "{lines:?}");
    }

    #[test]
    fn ordered_list_counts_up() {
        let lines = plain(&render("1. one\n2. two", Color::White, RawHtml::Strip));
        assert_eq!(lines, ["1. one", "2. two"]);
    }

    #[test]
    fn code_block_has_border_structure() {
        let lines = plain(&render("```\nline1\nline2\n```", Color::White, RawHtml::Strip));
        assert!(lines[0].starts_with('╭'), "{lines:?}");
        assert_eq!(lines[1], "│ line1");
        assert_eq!(lines[2], "│ line2");
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn tsx_code_block_is_highlighted() {
        let text = render(
            "```tsx\nexport default function A() {}\n```",
            Color::White,
            RawHtml::Strip,
        );
        assert!(plain(&text)[0].contains("tsx"));
        let body = &text.lines[1];
        assert!(
            body.spans.iter().any(|s| matches!(s.style.fg, Some(Color::Rgb(..)))),
            "expected syntect colors in {body:?}"
        );
    }

    #[test]
    fn raw_html_is_stripped_by_default() {
        let lines = plain(&render(
            "before <b>inline</b> after\n\n<script>alert(1)</script>\n",
            Color::White,
            RawHtml::Strip,
        ));
        let all = lines.join("\n");
        assert!(!all.contains("<script>"));
        assert!(!all.contains("<b>"));
        assert!(all.contains("inline"));
    }

    #[test]
    fn raw_html_literal_keeps_markup_visible() {
        let text = render("<div>hi</div>\n", Color::White, RawHtml::Literal);
        let all = plain(&text).join("\n");
        assert!(all.contains("<div>hi</div>"));
        let span = &text.lines[0].spans[0];
        assert!(span.style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green, RawHtml::Strip);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn highlight_code_unknown_language_is_plain() {
        let lines = highlight_code("a\n\tb", "nope");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].content, "    b");
    }

    #[test]
    fn bundled_notes_render() {
        let doc = crate::core::content::Content::default().document;
        let lines = plain(&render(&doc.markdown, Color::White, RawHtml::Strip));
        assert!(lines[0].contains("The Future of AI"));
        assert!(lines.iter().any(|l| l.contains("Ethical Considerations")));
    }
}
