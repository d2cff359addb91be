use dungeon_raid::character::save::validate_name;
use dungeon_raid::character::HeroClass;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct CharacterCreationScreen {
    pub name_input: String,
    pub class_index: usize,
    pub validation_error: Option<String>,
}

impl CharacterCreationScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            class_index: 0,
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Name field
                Constraint::Length(1), // Spacer
                Constraint::Length(6), // Class picker
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Create Your Hero")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let input_widget = Paragraph::new(format!("{}_", self.name_input))
            .block(Block::default().borders(Borders::ALL).title(" Name "))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, chunks[1]);

        let class_lines: Vec<Line> = HeroClass::all()
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let stats = class.base_stats();
                let text = format!(
                    "{:<8} STR {} DEX {} INT {} VIT {} DEF {}",
                    class.name(),
                    stats.str,
                    stats.dex,
                    stats.int,
                    stats.vit,
                    stats.def
                );
                if i == self.class_index {
                    Line::from(Span::styled(
                        format!("> {text}"),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {text}"))
                }
            })
            .collect();
        let classes = Paragraph::new(class_lines)
            .block(Block::default().borders(Borders::ALL).title(" Class "));
        f.render_widget(classes, chunks[3]);

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("x {error}"),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.trim().is_empty() {
            Line::from(Span::styled(
                "Name is valid",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[4]);

        let controls = Paragraph::new("[Enter] Create    [Tab] Next class    [Esc] Cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[6]);
    }

    pub fn handle_char_input(&mut self, c: char) {
        self.name_input.push(c);
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.name_input.pop().is_some() {
            self.validate();
        }
    }

    pub fn next_class(&mut self) {
        self.class_index = (self.class_index + 1) % HeroClass::all().len();
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_name(&self.name_input).err();
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none() && !self.name_input.trim().is_empty()
    }

    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }

    pub fn get_class(&self) -> HeroClass {
        HeroClass::all()[self.class_index]
    }
}
