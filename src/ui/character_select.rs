use dungeon_raid::character::save::SaveInfo;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct CharacterSelectScreen {
    pub selected_index: usize,
    /// Result of the last action (save failures, finished runs).
    pub status: Option<String>,
}

impl CharacterSelectScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            status: None,
        }
    }

    /// Keeps the cursor inside a list of `len` saves.
    pub fn clamp(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, saves: &[SaveInfo]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // List
                Constraint::Length(1), // Status
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Dungeon Raid - Select Your Hero")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        self.draw_save_list(f, chunks[1], saves);

        if let Some(status) = &self.status {
            let status = Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(status, chunks[2]);
        }

        let controls = Paragraph::new(
            "[Enter] Raid    [N] New    [D] Delete    [M] Meta shop    [Q] Quit",
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[3]);
    }

    fn draw_save_list(&self, f: &mut Frame, area: Rect, saves: &[SaveInfo]) {
        let block = Block::default().borders(Borders::ALL).title("Heroes");
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        if saves.is_empty() {
            let empty_message = Paragraph::new("No heroes yet.\nPress [N] to create one.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty_message, inner_area);
            return;
        }

        let lines: Vec<Line> = saves
            .iter()
            .enumerate()
            .map(|(i, save)| {
                let is_selected = i == self.selected_index;
                let marker = if is_selected { ">" } else { " " };
                let text = format!("{marker} {}  Lv{}  {}", save.hero_name, save.level, save.display());
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(text, style))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner_area);
    }
}
