//! # Landing Page Component
//!
//! Hero text, the rotating video example card, and the URL field.
//!
//! ```text
//!                         Captr
//!  Instantly transform YouTube videos into comprehensive research documents
//!
//!            ╭ Example ─────────────────────────────╮
//!            │  Quantum Physics Explained Simply     │
//!            │  Physics · 15:28                      │
//!            ╰───────────── ○ ○ ● ○ ○ ○ ○ ○ ────────╯
//!
//!            ╭ Or Enter URL! ───────────────────────╮
//!            │ https://youtube.com/watch?v=…        │
//!            ╰──────────────────────────────────────╯
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::content::VideoExample;
use crate::tui::component::Component;
use crate::tui::components::input_box::InputBox;

pub const TAGLINE: &str = "Instantly transform YouTube videos into comprehensive research documents";
pub const URL_TITLE: &str = "Or Enter URL!";
pub const URL_PLACEHOLDER: &str = "https://youtube.com/watch?v=…";

const CARD_HEIGHT: u16 = 4;
const MAX_WIDTH: u16 = 64;

pub struct LandingPage<'a> {
    pub videos: &'a [VideoExample],
    /// Carousel entry currently shown
    pub index: usize,
    pub url_input: &'a mut InputBox,
}

impl<'a> LandingPage<'a> {
    pub fn new(videos: &'a [VideoExample], index: usize, url_input: &'a mut InputBox) -> Self {
        Self {
            videos,
            index,
            url_input,
        }
    }

    /// Area the URL box occupies inside `area`, for click focus and cursor
    /// placement.
    pub fn input_area(&self, area: Rect) -> Rect {
        self.layout(area)[4]
    }

    fn layout(&self, area: Rect) -> [Rect; 5] {
        let width = area.width.min(MAX_WIDTH);
        let input_height = self.url_input.calculate_height(width);
        let [hero, gap_a, card, gap_b, input] = Layout::vertical([
            Constraint::Length(2), // name + tagline
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(input_height),
        ])
        .flex(Flex::Center)
        .areas(area);
        let column = |row: Rect| {
            let [centered] = Layout::horizontal([Constraint::Length(width)])
                .flex(Flex::Center)
                .areas(row);
            centered
        };
        [hero, gap_a, column(card), gap_b, column(input)]
    }

    fn card(&self) -> Paragraph<'static> {
        let dots: Vec<Span> = (0..self.videos.len())
            .map(|i| {
                if i == self.index {
                    Span::styled(" ●", Style::default().fg(Color::Magenta))
                } else {
                    Span::styled(" ○", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Example ")
            .title_bottom(Line::from(dots).centered())
            .padding(Padding::horizontal(1));

        let lines = match self.videos.get(self.index) {
            Some(video) => vec![
                Line::from(Span::styled(
                    video.title,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} · {}", video.category, video.duration),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => vec![Line::from(Span::styled(
                "Paste a video link below",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        Paragraph::new(lines).block(block)
    }
}

impl Component for LandingPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [hero, _, card, _, input] = self.layout(area);

        let hero_text = vec![
            Line::from(Span::styled(
                "Captr",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        ];
        frame.render_widget(Paragraph::new(hero_text).alignment(Alignment::Center), hero);
        frame.render_widget(self.card(), card);
        self.url_input.render(frame, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::VIDEO_EXAMPLES;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(index: usize) -> String {
        let mut input = InputBox::new(URL_TITLE, URL_PLACEHOLDER);
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal
            .draw(|f| LandingPage::new(VIDEO_EXAMPLES, index, &mut input).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_hero_and_url_box() {
        let text = screen(0);
        assert!(text.contains("Captr"));
        assert!(text.contains(TAGLINE));
        assert!(text.contains(URL_TITLE));
    }

    #[test]
    fn carousel_card_follows_index() {
        let first = screen(0);
        assert!(first.contains("Dynamic Programming By Abdul Bari"));
        assert!(first.contains("Computer Science · 12:34"));

        let third = screen(2);
        assert!(third.contains("Quantum Physics Explained Simply"));
        assert!(!third.contains("Dynamic Programming"));
    }

    #[test]
    fn empty_carousel_falls_back() {
        let mut input = InputBox::new(URL_TITLE, URL_PLACEHOLDER);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| LandingPage::new(&[], 0, &mut input).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Paste a video link below"));
    }
}
