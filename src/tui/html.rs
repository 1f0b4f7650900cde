//! HTML → ratatui `Text` renderer.
//!
//! Answers arrive as HTML fragments. The fragment is parsed with `scraper`
//! and walked depth-first; a fixed set of elements gets terminal styling
//! (paragraphs, headings, lists, emphasis, code, links, quotes, rules).
//! Script and style bodies are dropped, and any other element contributes
//! only its text.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use scraper::{ElementRef, Html, Node};

/// Elements whose content is never shown.
const SKIPPED: &[&str] = &["script", "style", "head", "title", "template", "noscript"];

/// Elements that start on their own line. Whitespace next to them is layout only.
const BLOCKS: &[&str] = &[
    "p", "div", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "ul", "ol", "li", "hr", "br",
];

/// Parse an HTML answer into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let normalized = normalize(content);
    let fragment = Html::parse_fragment(&normalized);
    let mut w = Writer::new(base_fg);
    w.children(fragment.root_element());
    w.text
}

/// Strips stray Markdown code fences and wraps bare text in a paragraph.
pub fn normalize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        let mut after = &rest[idx + 3..];
        for lang in ["html", "htm"] {
            if let Some(stripped) = after.strip_prefix(lang) {
                after = stripped;
                break;
            }
        }
        rest = after.trim_start();
    }
    out.push_str(rest);

    let trimmed = out.trim();
    if trimmed.starts_with('<') {
        trimmed.to_string()
    } else {
        format!("<p>{trimmed}</p>")
    }
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`, pre `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Stored link URL, appended after the link text closes.
    link_urls: Vec<Option<String>>,
    /// Inside `<pre>`: keep whitespace and line breaks.
    in_pre: bool,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
    /// The current line holds only a list marker; the item's first block
    /// continues on it.
    pending_marker: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            link_urls: vec![],
            in_pre: false,
            needs_newline: false,
            pending_marker: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

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

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        self.pending_marker = false;
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    /// True when the current line holds nothing but prefixes.
    fn at_line_start(&self) -> bool {
        match self.text.lines.last() {
            None => true,
            Some(line) => line.spans.len() <= self.line_prefixes.len(),
        }
    }

    /// Moves to a fresh line, reusing the current one when it is still empty.
    fn ensure_line(&mut self) {
        if !self.at_line_start() || self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
    }

    /// Opens a block: a blank separator line if one is owed, then a fresh line.
    fn start_block(&mut self) {
        if self.pending_marker {
            self.pending_marker = false;
            self.needs_newline = false;
            return;
        }
        if self.needs_newline {
            self.needs_newline = false;
            if !self.at_line_start() {
                self.push_line(Line::default());
            }
            self.push_line(Line::default());
        } else {
            self.ensure_line();
        }
    }

    // ── Tree walk ───────────────────────────────────────────────────────

    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(t) => {
                    let raw: &str = t;
                    // Whitespace directly before or after a block is layout only
                    let beside_block = child
                        .prev_sibling()
                        .and_then(ElementRef::wrap)
                        .is_some_and(is_block)
                        || child
                            .next_sibling()
                            .and_then(ElementRef::wrap)
                            .is_some_and(is_block);
                    if !self.in_pre && raw.trim().is_empty() && beside_block {
                        continue;
                    }
                    self.text(raw);
                }
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.element(el);
                    }
                }
                _ => {} // comments, doctypes
            }
        }
    }

    fn element(&mut self, el: ElementRef<'_>) {
        let name = el.value().name();
        if SKIPPED.contains(&name) {
            return;
        }
        self.open(el, name);
        self.children(el);
        self.close(name);
    }

    fn open(&mut self, el: ElementRef<'_>, name: &str) {
        match name {
            // ── Block elements ──────────────────────────────────────────
            "p" | "div" | "section" | "article" => self.start_block(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.start_block();
                self.push_style(heading_style(self.base_fg, name));
            }
            "blockquote" => {
                self.start_block();
                self.line_prefixes.push(Span::styled(
                    "│ ",
                    Style::default().fg(Color::DarkGray),
                ));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            "pre" => {
                self.start_block();
                let bs = Style::default().fg(Color::DarkGray);
                self.push_span(Span::styled("╭──", bs));
                self.line_prefixes.push(Span::styled("│ ", bs));
                self.push_line(Line::default());
                self.push_style(Style::default().fg(Color::White));
                self.in_pre = true;
            }
            "ul" | "ol" => {
                if self.list_indices.is_empty() {
                    self.start_block();
                }
                let start = (name == "ol").then(|| {
                    el.value()
                        .attr("start")
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(1)
                });
                self.list_indices.push(start);
            }
            "li" => {
                self.ensure_line();
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let s = format!("{indent}{n}. ");
                        *n = n.saturating_add(1);
                        s
                    }
                    _ => format!("{indent}- "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                self.pending_marker = true;
            }
            "br" => self.push_line(Line::default()),
            "hr" => {
                self.start_block();
                self.push_span(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                ));
                self.needs_newline = true;
            }

            // ── Inline elements ─────────────────────────────────────────
            "strong" | "b" => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            "em" | "i" => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            "u" => self.push_style(Style::default().add_modifier(Modifier::UNDERLINED)),
            "s" | "del" | "strike" => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            "code" if !self.in_pre => {
                self.push_style(Style::default().fg(Color::White).bg(Color::DarkGray))
            }
            "a" => {
                self.link_urls
                    .push(el.value().attr("href").map(str::to_string));
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "p" | "div" | "section" | "article" => self.needs_newline = true,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.pop_style();
                self.needs_newline = true;
            }
            "blockquote" => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            "pre" => {
                self.in_pre = false;
                self.pop_style();
                self.line_prefixes.pop();
                // Drop the trailing empty line left by the final newline
                if self.text.lines.last().is_some_and(|l| l.spans.len() == 1) {
                    self.text.lines.pop();
                }
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(Line::from(Span::styled("╰──", bs)));
                self.needs_newline = true;
            }
            "ul" | "ol" => {
                self.list_indices.pop();
                if self.list_indices.is_empty() {
                    self.needs_newline = true;
                }
            }
            "strong" | "b" | "em" | "i" | "u" | "s" | "del" | "strike" => self.pop_style(),
            "code" if !self.in_pre => self.pop_style(),
            "a" => {
                self.pop_style();
                if let Some(Some(url)) = self.link_urls.pop() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, raw: &str) {
        if self.in_pre {
            let style = self.style();
            let expanded = raw.replace('\t', "    ");
            for (i, line) in expanded.split('\n').enumerate() {
                if i > 0 {
                    self.push_line(Line::default());
                }
                if !line.is_empty() {
                    self.push_span(Span::styled(line.to_owned(), style));
                }
            }
            return;
        }

        // Collapse whitespace runs the way a browser would
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            if !raw.is_empty() && !self.needs_newline && !self.at_content_start() {
                self.push_span(Span::styled(" ", self.style()));
            }
            return;
        }

        let mut collapsed = String::new();
        if raw.starts_with(char::is_whitespace) && !self.at_content_start() {
            collapsed.push(' ');
        }
        collapsed.push_str(&words.join(" "));
        if raw.ends_with(char::is_whitespace) {
            collapsed.push(' ');
        }

        if self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
        let style = self.style();
        self.push_span(Span::styled(collapsed, style));
        self.pending_marker = false;
    }

    /// At line start, or right after a list marker.
    fn at_content_start(&self) -> bool {
        self.pending_marker || self.at_line_start()
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn is_block(el: ElementRef<'_>) -> bool {
    BLOCKS.contains(&el.value().name())
}

fn heading_style(base_fg: Color, tag: &str) -> Style {
    match tag {
        "h1" => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        "h2" => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

/// Flattens rendered text to plain strings, one per line.
#[cfg(test)]
fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}
