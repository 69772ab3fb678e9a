// Markdown parsing and rendering for documentation bodies
//
// Uses pulldown-cmark to parse markdown and convert to styled ratatui Spans.
// Supports: headings (with HTTP method badges on endpoint headings), inline
// code, bold, italic, strikethrough, lists, block quotes (alerts), tables,
// links, rules, and code samples framed with a title/copy header and JSON
// highlighting.
//
// Code samples are numbered in document order, matching
// ContentDescriptor::code_samples(), so the pane can map a focused sample to
// the line its header was rendered on.

use crate::content::parse_fence_info;
use crate::theme::Theme;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Copy affordance shown on a sample header
pub const COPY_LABEL: &str = "⧉ copy";
/// Shown while the sample's copy state is set
pub const COPIED_LABEL: &str = "✓ copied";

const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// A segment of parsed markdown with semantic meaning
#[derive(Debug, Clone, PartialEq)]
pub enum StyledSegment {
    /// Regular text
    Text(String),
    /// Inline code: `like this`
    InlineCode(String),
    /// Fenced code block, numbered in document order
    CodeBlock {
        index: usize,
        lang: String,
        title: Option<String>,
        code: String,
    },
    /// Soft break (single newline in source)
    SoftBreak,
    /// Hard break (explicit line break)
    HardBreak,
    /// End of paragraph (adds blank line for spacing)
    ParagraphEnd,
    /// Heading with level
    Heading { level: u8, text: String },
    /// List item marker (bullet or number)
    ListItemStart {
        ordered: bool,
        number: u64,
        depth: usize,
    },
    /// End of list item
    ListItemEnd,
    /// Bold text: **like this**
    Bold(String),
    /// Italic text: *like this*
    Italic(String),
    /// Strikethrough text: ~~like this~~
    Strikethrough(String),
    /// Start of blockquote (> prefix)
    BlockQuoteStart,
    /// End of blockquote
    BlockQuoteEnd,
    /// Horizontal rule (---)
    Rule,
    /// Link: [text](url)
    Link { text: String, url: String },
    /// Whole table, rendered at once so columns line up
    Table {
        head: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Parse markdown into styled segments
pub fn parse_markdown(markdown: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut in_heading: Option<u8> = None;
    let mut heading_content = String::new();
    // Open code block: (lang, title, code)
    let mut code_block: Option<(String, Option<String>, String)> = None;
    let mut code_block_count = 0usize;
    // List tracking: stack of (ordered, current_number) for nested lists
    let mut list_stack: Vec<(bool, u64)> = Vec::new();

    // Inline formatting state (for bold, italic, strikethrough)
    let mut in_bold = false;
    let mut in_italic = false;
    let mut in_strikethrough = false;
    let mut bold_content = String::new();
    let mut italic_content = String::new();
    let mut strikethrough_content = String::new();

    // Link state
    let mut in_link = false;
    let mut link_url = String::new();
    let mut link_text = String::new();

    // Table state
    let mut in_table = false;
    let mut in_table_head = false;
    let mut table_head: Vec<String> = Vec::new();
    let mut table_rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();

    // Enable extensions: strikethrough (~~text~~) and tables (| col | col |)
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;

    for event in Parser::new_ext(markdown, options) {
        match event {
            // Inline code: `page`
            Event::Code(code) => {
                if in_heading.is_some() {
                    heading_content.push_str(&code);
                } else if in_table {
                    current_cell.push_str(&code);
                } else {
                    segments.push(StyledSegment::InlineCode(code.to_string()));
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = Some(match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                });
                heading_content.clear();
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some(level) = in_heading.take() {
                    segments.push(StyledSegment::Heading {
                        level,
                        text: std::mem::take(&mut heading_content),
                    });
                }
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                let (lang, title) = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence_info(&info),
                    CodeBlockKind::Indented => parse_fence_info(""),
                };
                code_block = Some((lang, title, String::new()));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, title, mut code)) = code_block.take() {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    segments.push(StyledSegment::CodeBlock {
                        index: code_block_count,
                        lang,
                        title,
                        code,
                    });
                    code_block_count += 1;
                }
            }

            // Text inside code block - accumulate
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, _, code)) = code_block.as_mut() {
                    code.push_str(&text);
                }
            }

            // Text in table cell
            Event::Text(text) if in_table => {
                current_cell.push_str(&text);
            }

            Event::Text(text) if in_heading.is_some() => {
                heading_content.push_str(&text);
            }

            Event::Text(text) if in_link => {
                link_text.push_str(&text);
            }

            Event::Text(text) if in_bold => {
                bold_content.push_str(&text);
            }

            Event::Text(text) if in_italic => {
                italic_content.push_str(&text);
            }

            Event::Text(text) if in_strikethrough => {
                strikethrough_content.push_str(&text);
            }

            Event::Text(text) => {
                segments.push(StyledSegment::Text(text.to_string()));
            }

            Event::End(TagEnd::Paragraph) => {
                segments.push(StyledSegment::ParagraphEnd);
            }

            Event::SoftBreak => {
                if in_heading.is_some() {
                    heading_content.push(' ');
                } else {
                    segments.push(StyledSegment::SoftBreak);
                }
            }
            Event::HardBreak => {
                segments.push(StyledSegment::HardBreak);
            }

            // List start - track if ordered and starting number
            Event::Start(Tag::List(first_number)) => {
                list_stack.push((first_number.is_some(), first_number.unwrap_or(1)));
            }

            Event::End(TagEnd::List(_)) => {
                list_stack.pop();
                // Spacing after the outermost list
                if list_stack.is_empty() {
                    segments.push(StyledSegment::ParagraphEnd);
                }
            }

            Event::Start(Tag::Item) => {
                let depth = list_stack.len();
                if let Some((ordered, number)) = list_stack.last_mut() {
                    segments.push(StyledSegment::ListItemStart {
                        ordered: *ordered,
                        number: *number,
                        depth,
                    });
                    *number += 1;
                }
            }

            Event::End(TagEnd::Item) => {
                segments.push(StyledSegment::ListItemEnd);
            }

            Event::Start(Tag::Strong) => {
                in_bold = true;
                bold_content.clear();
            }

            Event::End(TagEnd::Strong) => {
                if !bold_content.is_empty() {
                    segments.push(StyledSegment::Bold(std::mem::take(&mut bold_content)));
                }
                in_bold = false;
            }

            Event::Start(Tag::Emphasis) => {
                in_italic = true;
                italic_content.clear();
            }

            Event::End(TagEnd::Emphasis) => {
                if !italic_content.is_empty() {
                    segments.push(StyledSegment::Italic(std::mem::take(&mut italic_content)));
                }
                in_italic = false;
            }

            Event::Start(Tag::Strikethrough) => {
                in_strikethrough = true;
                strikethrough_content.clear();
            }

            Event::End(TagEnd::Strikethrough) => {
                if !strikethrough_content.is_empty() {
                    segments.push(StyledSegment::Strikethrough(std::mem::take(
                        &mut strikethrough_content,
                    )));
                }
                in_strikethrough = false;
            }

            Event::Start(Tag::BlockQuote) => {
                segments.push(StyledSegment::BlockQuoteStart);
            }

            Event::End(TagEnd::BlockQuote) => {
                segments.push(StyledSegment::BlockQuoteEnd);
            }

            Event::Rule => {
                segments.push(StyledSegment::Rule);
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                in_link = true;
                link_url = dest_url.to_string();
                link_text.clear();
            }

            Event::End(TagEnd::Link) => {
                segments.push(StyledSegment::Link {
                    text: std::mem::take(&mut link_text),
                    url: std::mem::take(&mut link_url),
                });
                in_link = false;
            }

            Event::Start(Tag::Table(_)) => {
                in_table = true;
                table_head.clear();
                table_rows.clear();
            }

            Event::End(TagEnd::Table) => {
                segments.push(StyledSegment::Table {
                    head: std::mem::take(&mut table_head),
                    rows: std::mem::take(&mut table_rows),
                });
                in_table = false;
            }

            Event::Start(Tag::TableHead) => {
                in_table_head = true;
                current_row.clear();
            }

            Event::End(TagEnd::TableHead) => {
                table_head = std::mem::take(&mut current_row);
                in_table_head = false;
            }

            Event::Start(Tag::TableRow) => {
                current_row.clear();
            }

            Event::End(TagEnd::TableRow) => {
                if !in_table_head {
                    table_rows.push(std::mem::take(&mut current_row));
                }
            }

            Event::Start(Tag::TableCell) => {
                current_cell.clear();
            }

            Event::End(TagEnd::TableCell) => {
                current_row.push(std::mem::take(&mut current_cell));
            }

            _ => {}
        }
    }

    segments
}

/// Wrap text to fit within width, breaking at word boundaries
/// Preserves leading/trailing whitespace to maintain spacing between segments
///
/// Uses unicode display width for correct handling of emojis, CJK, etc.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let leading_space = text.starts_with(char::is_whitespace);
    let trailing_space = text.ends_with(char::is_whitespace);

    let mut result = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0usize;

    if leading_space {
        current_line.push(' ');
        current_width = 1;
    }

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_line.is_empty() || (current_width == 1 && leading_space && result.is_empty()) {
            // First word (possibly after leading space)
            current_line.push_str(word);
            current_width += word_width;
        } else if current_width + 1 + word_width <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            result.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if trailing_space && !current_line.is_empty() {
        current_line.push(' ');
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    // Whitespace-only input
    if result.is_empty() && !text.is_empty() {
        result.push(text.to_string());
    }

    result
}

/// How a code sample header should look
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleBadge {
    pub focused: bool,
    pub copied: bool,
}

/// Rendered lines plus where each code sample's header landed
#[derive(Debug, Default)]
pub struct RenderedDocument {
    pub lines: Vec<Line<'static>>,
    /// Line index of each sample header, by sample index
    pub sample_lines: Vec<usize>,
}

/// Accumulates spans into lines, re-applying a prefix (block quote bar) on wrap
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    used: usize,
    prefix: Option<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, span: Span<'static>) {
        if self.spans.is_empty() {
            if let Some(prefix) = &self.prefix {
                self.used = prefix.width();
                self.spans.push(prefix.clone());
            }
        }
        self.used += span.width();
        self.spans.push(span);
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
        self.used = 0;
    }

    /// Flush, then add an empty line unless one is already there
    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn line(&mut self, line: Line<'static>) {
        self.flush();
        self.lines.push(line);
    }
}

/// Convert parsed segments to ratatui Lines for rendering
///
/// Width controls text wrapping for proper scroll calculation. `badge`
/// is asked for the header state of each code sample by index.
pub fn segments_to_lines(
    segments: &[StyledSegment],
    width: usize,
    theme: &Theme,
    badge: &dyn Fn(usize) -> SampleBadge,
) -> RenderedDocument {
    let mut out = LineBuilder::default();
    let mut sample_lines = Vec::new();
    // Text color inside a block quote, decided by its first character
    let mut quote_style: Option<Style> = None;
    let mut quote_fresh = false;

    for segment in segments {
        match segment {
            StyledSegment::Text(text) => {
                if quote_fresh {
                    quote_fresh = false;
                    let color = if text.trim_start().starts_with('⚠') {
                        theme.warning
                    } else {
                        theme.info
                    };
                    quote_style = Some(Style::default().fg(color));
                    out.prefix = Some(Span::styled("▌ ", Style::default().fg(color)));
                }
                let style = quote_style.unwrap_or_default();

                let parts: Vec<&str> = text.split('\n').collect();
                for (i, part) in parts.iter().enumerate() {
                    if !part.is_empty() {
                        for (j, wrapped_line) in wrap_text(part, width).into_iter().enumerate() {
                            let line_width = wrapped_line.width();
                            if j > 0 || (out.used > 0 && out.used + line_width > width) {
                                out.flush();
                            }
                            out.push(Span::styled(wrapped_line, style));
                        }
                    }
                    // Newline in text = new line (except for last part)
                    if i < parts.len() - 1 {
                        out.flush();
                    }
                }
            }

            StyledSegment::InlineCode(code) => {
                out.push(Span::styled(
                    code.clone(),
                    Style::default().fg(theme.code_inline),
                ));
            }

            StyledSegment::CodeBlock {
                index,
                lang,
                title,
                code,
            } => {
                out.flush();
                sample_lines.push(out.lines.len());
                let state = badge(*index);
                render_code_block(&mut out, lang, title.as_deref(), code, width, theme, state);
                out.blank();
            }

            StyledSegment::SoftBreak => {
                // Single newline in source flows as a space
                out.push(Span::raw(" "));
            }

            StyledSegment::HardBreak => {
                out.flush();
            }

            StyledSegment::ParagraphEnd => {
                if quote_style.is_some() {
                    out.flush();
                } else {
                    out.blank();
                }
            }

            StyledSegment::Heading { level, text } => {
                out.blank();
                out.line(render_heading(*level, text, theme));
                if *level == 1 {
                    let rule = "━".repeat(text.width().min(width));
                    out.line(Line::from(Span::styled(
                        rule,
                        Style::default().fg(theme.heading),
                    )));
                }
            }

            StyledSegment::ListItemStart {
                ordered,
                number,
                depth,
            } => {
                out.flush();
                // 2 spaces per nesting level, depth starts at 1
                let indent = "  ".repeat(depth.saturating_sub(1));
                let marker = if *ordered {
                    format!("{}{}. ", indent, number)
                } else {
                    format!("{}• ", indent)
                };
                out.push(Span::styled(marker, Style::default().fg(theme.muted)));
            }

            StyledSegment::ListItemEnd => {
                out.flush();
            }

            StyledSegment::Bold(text) => {
                out.push(Span::styled(
                    text.clone(),
                    quote_style.unwrap_or_default().add_modifier(Modifier::BOLD),
                ));
            }

            StyledSegment::Italic(text) => {
                out.push(Span::styled(
                    text.clone(),
                    quote_style.unwrap_or_default().add_modifier(Modifier::ITALIC),
                ));
            }

            StyledSegment::Strikethrough(text) => {
                out.push(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(theme.muted)
                        .add_modifier(Modifier::CROSSED_OUT),
                ));
            }

            StyledSegment::BlockQuoteStart => {
                out.flush();
                quote_fresh = true;
                out.prefix = Some(Span::styled("▌ ", Style::default().fg(theme.info)));
            }

            StyledSegment::BlockQuoteEnd => {
                out.flush();
                out.prefix = None;
                quote_style = None;
                quote_fresh = false;
                out.blank();
            }

            StyledSegment::Rule => {
                out.blank();
                let rule = "─".repeat(width.saturating_sub(4).max(10));
                out.line(Line::from(Span::styled(
                    rule,
                    Style::default().fg(theme.border),
                )));
                out.lines.push(Line::default());
            }

            StyledSegment::Link { text, url } => {
                let display = if text.is_empty() || text == url {
                    url.clone()
                } else {
                    format!("{} ({})", text, url)
                };
                out.push(Span::styled(
                    display,
                    Style::default()
                        .fg(theme.link)
                        .add_modifier(Modifier::UNDERLINED),
                ));
            }

            StyledSegment::Table { head, rows } => {
                out.flush();
                for line in render_table(head, rows, theme) {
                    out.lines.push(line);
                }
                out.blank();
            }
        }
    }

    out.flush();
    // Trailing blank lines only pad the scroll range
    while out.lines.last().is_some_and(|l| l.width() == 0) {
        out.lines.pop();
    }

    RenderedDocument {
        lines: out.lines,
        sample_lines,
    }
}

/// Endpoint headings (`### GET /users`) get a method badge
fn render_heading(level: u8, text: &str, theme: &Theme) -> Line<'static> {
    if level >= 3 {
        if let Some((method, path)) = text.split_once(' ') {
            if HTTP_METHODS.contains(&method) {
                let color = match method {
                    "GET" => theme.success,
                    "POST" => theme.info,
                    "DELETE" => theme.error,
                    _ => theme.warning,
                };
                return Line::from(vec![
                    Span::styled(
                        format!(" {} ", method),
                        Style::default()
                            .fg(theme.background)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        path.to_string(),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
            }
        }
    }

    let style = match level {
        1 => Style::default()
            .fg(theme.heading)
            .add_modifier(Modifier::BOLD),
        2 => Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD),
    };
    Line::from(Span::styled(text.to_string(), style))
}

/// Framed code sample:
///
/// ```text
/// ╭─ Response · json ──────────── ⧉ copy ─╮
/// │ {
/// │   "ok": true
/// │ }
/// ╰───────────────────────────────────────╯
/// ```
fn render_code_block(
    out: &mut LineBuilder,
    lang: &str,
    title: Option<&str>,
    code: &str,
    width: usize,
    theme: &Theme,
    badge: SampleBadge,
) {
    let frame = width.clamp(24, 100);
    let border = Style::default().fg(theme.panel_border(badge.focused));

    let label = match title {
        Some(title) => format!("{} · {}", title, lang),
        None => lang.to_string(),
    };
    let (badge_text, badge_style) = if badge.copied {
        (COPIED_LABEL, Style::default().fg(theme.success))
    } else if badge.focused {
        (
            COPY_LABEL,
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection),
        )
    } else {
        (COPY_LABEL, Style::default().fg(theme.muted))
    };

    // "╭─ " + label + " " + fill + " " + badge + " ─╮"
    let fixed = 3 + label.width() + 1 + 1 + badge_text.width() + 3;
    let fill = frame.saturating_sub(fixed).max(1);

    out.line(Line::from(vec![
        Span::styled("╭─ ", border),
        Span::styled(
            label,
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", "─".repeat(fill)), border),
        Span::styled(badge_text, badge_style),
        Span::styled(" ─╮", border),
    ]));

    let is_json = lang == "json";
    for line in code.lines() {
        let mut spans = vec![Span::styled("│ ", border)];
        if is_json {
            spans.extend(highlight_json_line(line, theme));
        } else {
            spans.push(Span::styled(
                line.to_string(),
                Style::default().fg(theme.code_block),
            ));
        }
        out.lines.push(Line::from(spans));
    }

    let bottom = format!("╰{}╯", "─".repeat(fixed + fill - 2));
    out.lines.push(Line::from(Span::styled(bottom, border)));
}

/// Strip control characters that can cause TUI rendering artifacts
///
/// Removes carriage returns, backspace, ANSI escape sequences and other ASCII
/// control characters (except tab and newline).
fn sanitize_for_tui(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                // ANSI sequences are: ESC [ <params> <letter>
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\r' | '\x08' | '\x7f' => {}
            c if c.is_ascii_control() && c != '\t' && c != '\n' => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Parse and render a documentation body
///
/// Sanitizes input to remove control characters that can cause TUI artifacts.
pub fn render_document(
    markdown: &str,
    width: usize,
    theme: &Theme,
    badge: &dyn Fn(usize) -> SampleBadge,
) -> RenderedDocument {
    let sanitized = sanitize_for_tui(markdown);
    let segments = parse_markdown(&sanitized);
    segments_to_lines(&segments, width, theme, badge)
}

// ============================================================================
// Table Rendering
// ============================================================================

/// Render a table with box-drawing characters and aligned columns
fn render_table(head: &[String], rows: &[Vec<String>], theme: &Theme) -> Vec<Line<'static>> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(head.len()))
        .max()
        .unwrap_or(0);

    // Minimum 3 chars for readability
    let col_widths: Vec<usize> = (0..columns)
        .map(|c| {
            std::iter::once(head)
                .chain(rows.iter().map(Vec::as_slice))
                .filter_map(|row| row.get(c))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();

    let border = Style::default().fg(theme.border);
    let row_line = |cells: &[String], style: Style| {
        let mut spans = vec![Span::styled("│ ", border)];
        for (i, &w) in col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = " ".repeat(w.saturating_sub(cell.width()));
            spans.push(Span::styled(format!("{}{}", cell, pad), style));
            spans.push(Span::styled(" │ ", border));
        }
        // Last separator shouldn't carry a trailing space
        if let Some(last) = spans.last_mut() {
            *last = Span::styled(" │", border);
        }
        Line::from(spans)
    };
    let rule = |left: &str, mid: &str, right: &str| {
        let inner: Vec<String> = col_widths.iter().map(|&w| "─".repeat(w + 2)).collect();
        Line::from(Span::styled(
            format!("{}{}{}", left, inner.join(mid), right),
            border,
        ))
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule("┌", "┬", "┐"));
    lines.push(row_line(
        head,
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(rule("├", "┼", "┤"));
    for row in rows {
        lines.push(row_line(row, Style::default().fg(theme.foreground)));
    }
    lines.push(rule("└", "┴", "┘"));
    lines
}

// ============================================================================
// JSON Syntax Highlighting
// ============================================================================

/// Token types for JSON syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq)]
enum JsonToken {
    Key,         // "field":
    String,      // "value"
    Number,      // 123, -45.67, 1e10
    Keyword,     // true, false, null
    Punctuation, // { } [ ] : ,
    Whitespace,
}

/// Highlight a line of JSON and return styled spans
fn highlight_json_line(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut chars = line.chars().peekable();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;

    let flush = |spans: &mut Vec<Span<'static>>, content: &str, token: JsonToken| {
        if content.is_empty() {
            return;
        }
        let style = match token {
            JsonToken::Key => Style::default().fg(theme.json_key),
            JsonToken::String => Style::default().fg(theme.success),
            JsonToken::Number => Style::default().fg(theme.json_number),
            JsonToken::Keyword => Style::default().fg(theme.json_keyword),
            JsonToken::Punctuation => Style::default().fg(theme.muted),
            JsonToken::Whitespace => Style::default(),
        };
        spans.push(Span::styled(content.to_string(), style));
    };

    while let Some(ch) = chars.next() {
        if in_string {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                // Key if the next non-space char is a colon
                let is_key = chars.clone().find(|c| !c.is_whitespace()) == Some(':');
                let token = if is_key {
                    JsonToken::Key
                } else {
                    JsonToken::String
                };
                flush(&mut spans, &current, token);
                current.clear();
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                flush(&mut spans, &current, classify_token(&current));
                current.clear();
                current.push(ch);
                in_string = true;
            }
            '{' | '}' | '[' | ']' | ':' | ',' => {
                flush(&mut spans, &current, classify_token(&current));
                current.clear();
                flush(&mut spans, &ch.to_string(), JsonToken::Punctuation);
            }
            ' ' | '\t' => {
                flush(&mut spans, &current, classify_token(&current));
                current.clear();
                let mut ws = String::from(ch);
                while let Some(&next) = chars.peek() {
                    if next != ' ' && next != '\t' {
                        break;
                    }
                    ws.push(next);
                    chars.next();
                }
                flush(&mut spans, &ws, JsonToken::Whitespace);
            }
            _ => current.push(ch),
        }
    }

    let token = if in_string {
        JsonToken::String // Unclosed string
    } else {
        classify_token(&current)
    };
    flush(&mut spans, &current, token);

    spans
}

/// Classify a non-string token
fn classify_token(s: &str) -> JsonToken {
    match s.trim() {
        "true" | "false" | "null" => JsonToken::Keyword,
        t if looks_like_number(t) => JsonToken::Number,
        _ => JsonToken::String,
    }
}

/// Check if string looks like a JSON number
fn looks_like_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match digits.find(['e', 'E']) {
        Some(i) => (&digits[..i], Some(&digits[i + 1..])),
        None => (digits, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    !int.is_empty()
        && all_digits(int)
        && frac.map_or(true, all_digits)
        && exponent.map_or(true, |e| {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && all_digits(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(text_of).collect()
    }

    /// Render with no sample focused or copied
    fn render_markdown(markdown: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        render_document(markdown, width, theme, &|_| SampleBadge::default()).lines
    }

    #[test]
    fn test_parse_inline_code() {
        let segments = parse_markdown("Include your key in the `Authorization` header");

        assert!(matches!(segments[0], StyledSegment::Text(_)));
        assert!(matches!(segments[1], StyledSegment::InlineCode(_)));
        assert!(matches!(segments[2], StyledSegment::Text(_)));
    }

    #[test]
    fn test_code_blocks_are_numbered() {
        let md = "```bash title=\"cURL\"\ncurl x\n```\n\ntext\n\n```json\n{}\n```";
        let blocks: Vec<_> = parse_markdown(md)
            .into_iter()
            .filter_map(|s| match s {
                StyledSegment::CodeBlock {
                    index,
                    lang,
                    title,
                    code,
                } => Some((index, lang, title, code)),
                _ => None,
            })
            .collect();

        assert_eq!(
            blocks,
            [
                (0, "bash".to_string(), Some("cURL".to_string()), "curl x".to_string()),
                (1, "json".to_string(), None, "{}".to_string()),
            ]
        );
    }

    #[test]
    fn test_sample_header_shows_title_and_badge() {
        let md = "intro\n\n```json title=\"Response\"\n{\"ok\": true}\n```";
        let theme = Theme::dark();
        let doc = render_document(md, 60, &theme, &|_| SampleBadge::default());

        assert_eq!(doc.sample_lines.len(), 1);
        let header = text_of(&doc.lines[doc.sample_lines[0]]);
        assert!(header.starts_with("╭─ Response · json"), "{}", header);
        assert!(header.contains(COPY_LABEL));

        let copied = render_document(md, 60, &theme, &|_| SampleBadge {
            focused: true,
            copied: true,
        });
        let header = text_of(&copied.lines[copied.sample_lines[0]]);
        assert!(header.contains(COPIED_LABEL));
        assert!(!header.contains(COPY_LABEL));
    }

    #[test]
    fn test_sample_header_width_matches_footer() {
        let md = "```bash\necho hi\n```";
        let doc = render_document(md, 60, &Theme::light(), &|_| SampleBadge::default());
        let lines = all_text(&doc.lines);
        assert_eq!(lines[0].width(), lines.last().unwrap().width());
    }

    #[test]
    fn test_json_highlighting() {
        let theme = Theme::dark();
        let spans = highlight_json_line(r#"  "total": 150, "ok": true, "name": "J\"D""#, &theme);

        let styled = |text: &str| {
            spans
                .iter()
                .find(|s| s.content == text)
                .map(|s| s.style.fg)
                .unwrap_or_else(|| panic!("no span {:?}", text))
        };
        assert_eq!(styled("\"total\""), Some(theme.json_key));
        assert_eq!(styled("150"), Some(theme.json_number));
        assert_eq!(styled("true"), Some(theme.json_keyword));
        assert_eq!(styled(r#""J\"D""#), Some(theme.success));
    }

    #[test]
    fn test_number_detection() {
        for n in ["0", "-1", "3.14", "1e10", "2.5E-3"] {
            assert!(looks_like_number(n), "{}", n);
        }
        for n in ["", "-", "1.2.3", "e5", "1e", "abc"] {
            assert!(!looks_like_number(n), "{}", n);
        }
    }

    #[test]
    fn test_table_columns_align() {
        let md = "| Code | Meaning |\n|------|---------|\n| 200 | OK |\n| 429 | Too Many Requests |";
        let lines = all_text(&render_markdown(md, 80, &Theme::dark()));

        let widths: Vec<usize> = lines.iter().map(|l| l.width()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{:?}", lines);
        assert!(lines.iter().any(|l| l.contains("Too Many Requests")));
    }

    #[test]
    fn test_inline_code_in_table_cell() {
        let md = "| Param | Description |\n|---|---|\n| `page` | Page number |";
        let lines = all_text(&render_markdown(md, 80, &Theme::dark()));
        assert!(lines.iter().any(|l| l.contains("page") && l.contains("Page number")));
    }

    #[test]
    fn test_endpoint_heading_badge() {
        let theme = Theme::dark();
        let line = render_heading(3, "GET /users/{id}", &theme);
        assert_eq!(line.spans[0].content, " GET ");
        assert_eq!(line.spans[0].style.bg, Some(theme.success));
        assert_eq!(line.spans[2].content, "/users/{id}");

        // Only known methods, only level 3+
        let line = render_heading(2, "GET started", &theme);
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn test_alert_quote_prefix_and_color() {
        let theme = Theme::dark();
        let lines = render_markdown("> ⚠ Keep your API keys secure", 80, &theme);
        assert!(text_of(&lines[0]).starts_with("▌ ⚠ Keep"));
        assert_eq!(lines[0].spans[0].style.fg, Some(theme.warning));
    }

    #[test]
    fn test_quote_wraps_with_prefix() {
        let md = "> ℹ one two three four five six seven eight nine ten";
        let lines = render_markdown(md, 20, &Theme::dark());
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_of(l).starts_with("▌ ")));
    }

    #[test]
    fn test_hard_break_parsing() {
        let md = "**Name:** Jane  \n**Email:** jane@example.com  \n**Role:** admin";
        let hard_breaks = parse_markdown(md)
            .iter()
            .filter(|s| matches!(s, StyledSegment::HardBreak))
            .count();
        assert_eq!(hard_breaks, 2);
    }

    #[test]
    fn test_lists() {
        let md = "1. first\n2. second\n\n- bullet";
        let lines = all_text(&render_markdown(md, 80, &Theme::dark()));
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
        assert!(lines.contains(&"• bullet".to_string()));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        for line in wrap_text("the quick brown fox jumps over the lazy dog", 10) {
            assert!(line.width() <= 10, "{:?}", line);
        }
    }

    #[test]
    fn test_sanitize_strips_escapes() {
        assert_eq!(sanitize_for_tui("a\x1b[31mred\x1b[0m\r\n"), "ared\n");
    }

    #[test]
    fn test_no_trailing_blank_lines() {
        let lines = render_markdown("# Title\n\nParagraph\n\n", 80, &Theme::dark());
        assert!(lines.last().is_some_and(|l| l.width() > 0));
    }
}
