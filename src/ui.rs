use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use crate::{
    app::{App, AppState},
    diff::{runs, CharMark, Mark},
    theme::{palette, Palette},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const INPUT_HEIGHT: u16 = 6;
const PLACEHOLDER: &str = "Start typing here...";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = palette(self.theme);

        Block::default()
            .style(Style::default().bg(colors.background).fg(colors.text))
            .render(area, buf);

        match self.state() {
            AppState::Typing => render_typing(self, &colors, area, buf),
            AppState::Results => render_results(self, &colors, area, buf),
        }
    }
}

/// One span per run of equally-marked characters
pub fn passage_spans(marks: &[CharMark], colors: &Palette) -> Vec<Span<'static>> {
    runs(marks)
        .into_iter()
        .map(|(mark, text)| {
            let style = match mark {
                Mark::Untyped => Style::default().fg(colors.text),
                Mark::Correct => Style::default().fg(colors.text).bg(colors.correct_bg),
                Mark::Incorrect => Style::default().fg(colors.text).bg(colors.incorrect_bg),
            };
            Span::styled(text, style)
        })
        .collect()
}

/// Rows an unbordered paragraph occupies once word-wrapped at `width`, at least one.
fn wrapped_rows(paragraph: &Paragraph, width: u16) -> u16 {
    paragraph.line_count(width.max(1)).clamp(1, u16::MAX as usize) as u16
}

fn bordered<'a>(colors: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.field).fg(colors.text))
}

fn render_typing(app: &App, colors: &Palette, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);

    let passage = Paragraph::new(Line::from(passage_spans(&session.marks(), colors)))
        .wrap(Wrap { trim: false });
    let passage_height = wrapped_rows(&passage, inner_width).saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),              // title
            Constraint::Length(passage_height), // passage
            Constraint::Length(INPUT_HEIGHT),   // input
            Constraint::Length(2),              // stats
            Constraint::Length(2),              // controls
            Constraint::Min(0),
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(chunks[0]);

    Paragraph::new(Span::styled(
        format!(
            "⌨ TypingSprint – Test {}/{}",
            session.passage_number(),
            session.passage_count()
        ),
        bold.fg(colors.title),
    ))
    .render(header[0], buf);

    Paragraph::new(format!("{} {}", app.theme.icon(), app.theme))
        .alignment(Alignment::Right)
        .render(header[1], buf);

    passage.block(bordered(colors)).render(chunks[1], buf);

    let input = if session.input().is_empty() {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(colors.hint)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Paragraph::new(format!("{}▏", session.input()))
    }
    .wrap(Wrap { trim: false });

    // keep the cursor row in view once the input outgrows the box
    let visible_rows = chunks[2].height.saturating_sub(2);
    let offset = wrapped_rows(&input, inner_width).saturating_sub(visible_rows);
    input
        .block(bordered(colors))
        .scroll((offset, 0))
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!(
            "⏱ Elapsed: {}s   ⚡ Speed: {} WPM   🎯 Accuracy: {}%",
            session.elapsed_secs(),
            session.wpm(),
            session.accuracy()
        ),
        bold,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let mut controls = vec![Span::styled(
        "(ctrl+r) restart",
        bold.fg(colors.restart),
    )];
    if session.can_skip() {
        controls.push(Span::raw("   "));
        controls.push(Span::styled("(ctrl+n) next", bold.fg(colors.next)));
    }
    controls.push(Span::raw("   "));
    controls.push(Span::styled("(ctrl+e) end task", bold.fg(colors.end)));

    let hints = Span::styled(
        "(ctrl+t) theme / (esc)ape",
        Style::default()
            .fg(colors.hint)
            .add_modifier(Modifier::ITALIC),
    );

    Paragraph::new(vec![Line::from(controls), Line::from(hints)])
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
}

fn render_results(app: &App, colors: &Palette, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(5), // results card
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled("🎉 TypingSprint Results", bold.fg(colors.title)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let time_taken = session.final_elapsed_secs().unwrap_or(session.elapsed_secs());
    let lines = vec![
        Line::from(vec![
            Span::raw("🕒 Time Taken: "),
            Span::styled(format!("{time_taken}s"), bold),
        ]),
        Line::from(vec![
            Span::raw("⚡ Speed: "),
            Span::styled(format!("{} WPM", session.wpm()), bold),
        ]),
        Line::from(vec![
            Span::raw("🎯 Accuracy: "),
            Span::styled(format!("{}%", session.accuracy()), bold),
        ]),
    ];

    let card_width = 40.min(chunks[1].width);
    let card = Rect {
        x: chunks[1].x + (chunks[1].width - card_width) / 2,
        width: card_width,
        ..chunks[1]
    };

    Paragraph::new(lines)
        .block(bordered(colors))
        .alignment(Alignment::Center)
        .render(card, buf);

    Paragraph::new(Span::styled(
        "(r) try again / (t) theme / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}
