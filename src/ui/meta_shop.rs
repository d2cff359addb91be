use dungeon_raid::character::{MetaProgress, StatType};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Permanent upgrades bought with banked gold. New heroes start with them.
pub struct MetaShopScreen {
    pub selected_index: usize,
    pub status: Option<String>,
}

impl MetaShopScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            status: None,
        }
    }

    pub fn selected_stat(&self) -> StatType {
        StatType::all()[self.selected_index]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < StatType::all().len() {
            self.selected_index += 1;
        }
    }

    /// Buys the highlighted stat and records the result for the status line.
    pub fn purchase(&mut self, progress: &mut MetaProgress) -> bool {
        let stat = self.selected_stat();
        let cost = progress.cost_for(stat);
        let bought = progress.purchase(stat);
        self.status = Some(if bought {
            format!("{} upgraded for {cost} gold", stat.abbrev())
        } else {
            format!("Need {cost} gold for {}", stat.abbrev())
        });
        bought
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, progress: &MetaProgress, hero_gold: Option<u32>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Bank
                Constraint::Length(7), // Upgrades
                Constraint::Length(1), // Status
                Constraint::Min(0),
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Meta Shop")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let bank = match hero_gold {
            Some(gold) => format!("Bank: {} gold    Selected hero carries: {gold}", progress.bank_gold),
            None => format!("Bank: {} gold", progress.bank_gold),
        };
        f.render_widget(Paragraph::new(bank), chunks[1]);

        let lines: Vec<Line> = StatType::all()
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                let text = format!(
                    "{} {}  +{:<3} next: {} gold",
                    if i == self.selected_index { ">" } else { " " },
                    stat.abbrev(),
                    progress.bonus.get(*stat),
                    progress.cost_for(*stat)
                );
                if i == self.selected_index {
                    Line::from(Span::styled(
                        text,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(text)
                }
            })
            .collect();
        let upgrades =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Upgrades "));
        f.render_widget(upgrades, chunks[2]);

        if let Some(status) = &self.status {
            f.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
                chunks[3],
            );
        }

        let controls = Paragraph::new("[Enter] Buy    [B] Bank hero gold    [Esc] Back")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_reports_cost() {
        let mut screen = MetaShopScreen::new();
        let mut progress = MetaProgress::default();
        assert!(!screen.purchase(&mut progress));
        assert_eq!(screen.status.as_deref(), Some("Need 20 gold for STR"));

        progress.deposit(20);
        assert!(screen.purchase(&mut progress));
        assert_eq!(progress.bonus.str, 1);
        assert_eq!(progress.bank_gold, 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut screen = MetaShopScreen::new();
        for _ in 0..10 {
            screen.move_down();
        }
        assert_eq!(screen.selected_stat(), StatType::Defense);
        screen.move_up();
        assert_eq!(screen.selected_stat(), StatType::Vitality);
    }
}
