pub mod charts;
pub mod filter_bar;
pub mod form;
pub mod header;
pub mod help_overlay;
pub mod list_view;
pub mod notice;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Height of the band holding the transcript form and the charts
const TOP_BAND_HEIGHT: u16 = 9;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | form + charts | filter bar | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // title row
            Constraint::Length(TOP_BAND_HEIGHT), // form + charts
            Constraint::Length(1),               // filter/sort bar
            Constraint::Min(1),                  // action item list
            Constraint::Length(1),               // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    let band = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ])
        .split(chunks[1]);
    form::render_form(frame, app, band[0]);
    charts::render_progress(frame, app, band[1]);
    charts::render_priorities(frame, app, band[2]);

    filter_bar::render_filter_bar(frame, app, chunks[2]);
    list_view::render_list_view(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);

    // Overlays (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
    if app.notice.is_some() {
        notice::render_notice(frame, app, frame.area());
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::io::memory_store::sample_items;

    #[test]
    fn highlighted_spans_split_on_matches() {
        let re = Regex::new("(?i)bug").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Fix Bug now",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Fix ", "Bug", " now"]);
    }

    #[test]
    fn full_screen_renders_every_region() {
        let mut app = app_with(sample_items());
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &mut app);
        });
        assert!(output.contains("InsightBoard"), "{}", output);
        assert!(output.contains("Showing 2 of 2 action items"), "{}", output);
        assert!(output.contains("Transcript"), "{}", output);
        assert!(output.contains("Progress"), "{}", output);
        assert!(output.contains("Fix bug"), "{}", output);
        assert!(output.contains("Write docs"), "{}", output);
    }

    #[test]
    fn notice_overlay_drawn_on_top() {
        let mut app = app_with(sample_items());
        app.notice = Some("Please enter a transcript".into());
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &mut app);
        });
        assert!(output.contains("Please enter a transcript"), "{}", output);
    }
}
