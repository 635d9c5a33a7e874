//! README markdown to styled terminal text
//!
//! Rendering runs on the scheduler's task pool, so the output carries fixed
//! styles rather than the active theme.

use libtermfolio::SourceError;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

/// READMEs larger than this are refused rather than rendered
pub const MAX_MARKDOWN_BYTES: usize = 512 * 1024;

/// Converts markdown into displayable text
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<Text<'static>, SourceError>;
}

/// Renderer backed by `pulldown-cmark`
#[derive(Debug, Clone)]
pub struct CmarkRenderer {
    rule_width: u16,
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self { rule_width: 40 }
    }
}

impl CmarkRenderer {
    pub fn new(rule_width: u16) -> Self {
        Self { rule_width }
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> Result<Text<'static>, SourceError> {
        if markdown.len() > MAX_MARKDOWN_BYTES {
            return Err(SourceError::Decode(format!(
                "README is {} bytes, limit is {}",
                markdown.len(),
                MAX_MARKDOWN_BYTES
            )));
        }

        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
        let mut state = RenderState::new(self.rule_width);
        state.process(Parser::new_ext(markdown, options));
        Ok(state.finish())
    }
}

#[derive(Debug, Clone, Copy)]
enum StyleContext {
    Heading(HeadingLevel),
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    CodeBlock,
    Blockquote,
}

struct RenderState {
    rule_width: u16,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,
    style_stack: Vec<StyleContext>,
    /// Next number per nested list, `None` for bullets
    list_stack: Vec<Option<u64>>,
    in_code_block: bool,
    blockquote_depth: usize,
    needs_blank: bool,
    pending_list_prefix: bool,
    pending_task_marker: Option<bool>,
}

impl RenderState {
    fn new(rule_width: u16) -> Self {
        Self {
            rule_width,
            lines: Vec::new(),
            current_spans: Vec::new(),
            style_stack: Vec::new(),
            list_stack: Vec::new(),
            in_code_block: false,
            blockquote_depth: 0,
            needs_blank: false,
            pending_list_prefix: false,
            pending_task_marker: None,
        }
    }

    fn process<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => {
                    self.emit_list_prefix();
                    self.current_spans.push(Span::styled(
                        format!("`{}`", code),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Event::SoftBreak => self.current_spans.push(Span::raw(" ")),
                Event::HardBreak => self.flush_line(),
                Event::Rule => {
                    self.flush_blank();
                    self.lines.push(Line::styled(
                        "─".repeat(usize::from(self.rule_width)),
                        Style::default().fg(Color::DarkGray),
                    ));
                    self.needs_blank = true;
                }
                Event::TaskListMarker(checked) => self.pending_task_marker = Some(checked),
                Event::Html(html) | Event::InlineHtml(html) => {
                    // Raw HTML is shown dimmed rather than interpreted
                    let trimmed = html.trim();
                    if !trimmed.is_empty() {
                        self.current_spans.push(Span::styled(
                            trimmed.to_string(),
                            Style::default().add_modifier(Modifier::DIM),
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_blank();
                self.style_stack.push(StyleContext::Heading(level));
            }
            Tag::Paragraph => self.flush_blank(),
            Tag::Emphasis => self.style_stack.push(StyleContext::Emphasis),
            Tag::Strong => self.style_stack.push(StyleContext::Strong),
            Tag::Strikethrough => self.style_stack.push(StyleContext::Strikethrough),
            Tag::Link { .. } => self.style_stack.push(StyleContext::Link),
            Tag::CodeBlock(kind) => {
                self.flush_blank();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(Line::styled(
                            format!("┌─ {}", lang),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                self.style_stack.push(StyleContext::CodeBlock);
            }
            Tag::BlockQuote(_) => {
                self.flush_blank();
                self.blockquote_depth += 1;
                self.style_stack.push(StyleContext::Blockquote);
            }
            Tag::List(start) => self.list_stack.push(start),
            Tag::Item => {
                self.flush_line();
                self.pending_list_prefix = true;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.style_stack.pop();
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Paragraph => {
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.style_stack.pop();
            }
            TagEnd::CodeBlock => {
                self.style_stack.pop();
                self.in_code_block = false;
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.style_stack.pop();
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.flush_line();
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::TableHead | TagEnd::TableRow => self.flush_line(),
            TagEnd::TableCell => self.current_spans.push(Span::raw(" │ ")),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            let style = Style::default().fg(Color::Green);
            for line in text.lines() {
                self.lines.push(Line::from(vec![
                    Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(line.to_string(), style),
                ]));
            }
            return;
        }

        self.emit_list_prefix();
        if self.blockquote_depth > 0 && self.current_spans.is_empty() {
            self.current_spans.push(Span::styled(
                "│ ".repeat(self.blockquote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        self.current_spans.push(Span::styled(text.to_string(), self.current_style()));
    }

    fn emit_list_prefix(&mut self) {
        if !self.pending_list_prefix {
            return;
        }
        self.pending_list_prefix = false;

        let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
        let marker = match (self.pending_task_marker.take(), self.list_stack.last_mut()) {
            (Some(true), _) => "✓ ".to_string(),
            (Some(false), _) => "☐ ".to_string(),
            (None, Some(Some(n))) => {
                let marker = format!("{}. ", n);
                *n += 1;
                marker
            }
            (None, _) => "• ".to_string(),
        };
        self.current_spans.push(Span::styled(
            format!("{}{}", indent, marker),
            Style::default().fg(Color::Cyan),
        ));
    }

    fn current_style(&self) -> Style {
        self.style_stack.iter().fold(Style::default(), |style, ctx| match ctx {
            StyleContext::Heading(HeadingLevel::H1) => style
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            StyleContext::Heading(HeadingLevel::H2) => style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
            StyleContext::Heading(_) => style.fg(Color::Blue).add_modifier(Modifier::BOLD),
            StyleContext::Emphasis => style.add_modifier(Modifier::ITALIC),
            StyleContext::Strong => style.add_modifier(Modifier::BOLD),
            StyleContext::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
            StyleContext::Link => style.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            StyleContext::CodeBlock => style.fg(Color::Green),
            StyleContext::Blockquote => style.add_modifier(Modifier::ITALIC),
        })
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }

    fn flush_blank(&mut self) {
        self.flush_line();
        if self.needs_blank && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_blank = false;
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_line();
        Text::from(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let text = CmarkRenderer::default().render("# Title\n\nSome *body* text.").unwrap();
        assert_eq!(plain(&text), vec!["Title", "", "Some body text."]);
        assert!(text.lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_lists_get_markers() {
        let text = CmarkRenderer::default().render("- one\n- two\n\n1. first\n2. second").unwrap();
        let lines = plain(&text);
        assert!(lines.contains(&"• one".to_string()));
        assert!(lines.contains(&"• two".to_string()));
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
    }

    #[test]
    fn test_code_block_lines_are_prefixed() {
        let text = CmarkRenderer::default().render("```rust\nfn main() {}\n```").unwrap();
        let lines = plain(&text);
        assert_eq!(lines, vec!["┌─ rust", "│ fn main() {}"]);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let text = CmarkRenderer::default().render("").unwrap();
        assert!(text.lines.is_empty());
    }

    #[test]
    fn test_oversized_input_is_refused() {
        let huge = "a".repeat(MAX_MARKDOWN_BYTES + 1);
        let result = CmarkRenderer::default().render(&huge);
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }
}
