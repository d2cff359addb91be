//! Exploration and combat screens for a run.

use dungeon_raid::character::StatType;
use dungeon_raid::combat::Combat;
use dungeon_raid::core::constants::MESSAGE_LOG_LINES;
use dungeon_raid::core::{HeroSnapshot, RunView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

pub fn draw_run(f: &mut Frame, view: &RunView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),                            // Status
            Constraint::Min(0),                               // Map or combat
            Constraint::Length(MESSAGE_LOG_LINES as u16 + 2), // Messages
            Constraint::Length(1),                            // Controls
        ])
        .split(f.size());

    draw_status(f, chunks[0], &view.hero);

    match view.combat {
        Some(combat) => draw_combat(f, chunks[1], &view.hero, combat),
        None => {
            let block = Block::default().borders(Borders::ALL).title(" Dungeon ");
            let inner = block.inner(chunks[1]);
            f.render_widget(block, chunks[1]);
            f.render_widget(DungeonMapWidget { view }, inner);
        }
    }

    let messages: Vec<Line> = view.messages.iter().map(|m| Line::from(*m)).collect();
    let log = Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(log, chunks[2]);

    let mut controls = if view.combat.is_some() {
        "[Enter] Next    [Esc] Flee".to_string()
    } else {
        "[WASD/Arrows] Move    [Esc] Leave dungeon".to_string()
    };
    if let Some(steps) = view.boss_countdown {
        controls.push_str(&format!("    |    Boss in {steps} steps"));
    }
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[3],
    );
}

fn draw_status(f: &mut Frame, area: Rect, hero: &HeroSnapshot) {
    let header = format!(
        "{}  {}  Lv {}   HP {}/{}   Gold {}   Items {}",
        hero.name,
        hero.class.name(),
        hero.level,
        hero.hp,
        hero.max_hp,
        hero.gold,
        hero.inventory_len
    );
    let stats: String = StatType::all()
        .iter()
        .map(|stat| {
            let total = hero.total.get(*stat);
            let bonus = total.saturating_sub(hero.base.get(*stat));
            let value = if bonus > 0 {
                format!("{total} (+{bonus})")
            } else {
                total.to_string()
            };
            format!("{}: {:<10}", stat.abbrev(), value)
        })
        .collect();
    let gear: Vec<String> = hero
        .equipped
        .iter()
        .map(|(slot, line)| format!("{}: {}", slot.name(), line.as_deref().unwrap_or("-")))
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(stats),
        Line::from(gear.join("   ")),
        Line::from(Span::styled(
            hp_bar(hero.hp, hero.max_hp, 30),
            Style::default().fg(Color::Red),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Status ")),
        area,
    );
}

fn draw_combat(f: &mut Frame, area: Rect, hero: &HeroSnapshot, combat: &Combat) {
    let enemy = combat.enemy();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Combat - {} ", enemy.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let sides = vec![
        Line::from(format!(
            "{:<20} HP {}/{}  {}",
            hero.name,
            hero.hp,
            hero.max_hp,
            hp_bar(hero.hp, hero.max_hp, 20)
        )),
        Line::from(Span::styled(
            format!(
                "{:<20} HP {}/{}  {}   ATK {} DEF {}",
                enemy.name,
                enemy.hp,
                enemy.max_hp,
                hp_bar(enemy.hp, enemy.max_hp, 20),
                enemy.attack,
                enemy.defense
            ),
            Style::default().fg(if enemy.is_boss {
                Color::Magenta
            } else {
                Color::Red
            }),
        )),
    ];
    f.render_widget(Paragraph::new(sides), halves[0]);

    let log: Vec<Line> = combat.log().map(Line::from).collect();
    f.render_widget(
        Paragraph::new(log).block(Block::default().borders(Borders::TOP).title(" Combat log ")),
        halves[1],
    );
}

fn hp_bar(hp: u32, max_hp: u32, width: usize) -> String {
    let filled = if max_hp == 0 {
        0
    } else {
        (hp as usize * width).div_ceil(max_hp as usize).min(width)
    };
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}

fn glyph_style(glyph: char) -> Style {
    match glyph {
        '@' => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        '#' => Style::default().fg(Color::DarkGray),
        '.' => Style::default().fg(Color::Gray),
        'C' => Style::default().fg(Color::LightYellow),
        'B' => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Red),
    }
}

/// Tile grid with the hero and enemies, centered and clipped to the area.
pub struct DungeonMapWidget<'a> {
    view: &'a RunView<'a>,
}

impl Widget for DungeonMapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let map = self.view.map;
        let shown_w = (map.width() as u16).min(area.width);
        let shown_h = (map.height() as u16).min(area.height);
        let offset_x = area.x + (area.width - shown_w) / 2;
        let offset_y = area.y + (area.height - shown_h) / 2;

        for y in 0..shown_h {
            for x in 0..shown_w {
                let glyph = self.view.glyph_at(x as usize, y as usize);
                buf.set_string(
                    offset_x + x,
                    offset_y + y,
                    glyph.to_string(),
                    glyph_style(glyph),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_bar() {
        assert_eq!(hp_bar(10, 10, 4), "[####]");
        assert_eq!(hp_bar(0, 10, 4), "[    ]");
        assert_eq!(hp_bar(1, 10, 4), "[#   ]");
        assert_eq!(hp_bar(5, 0, 4), "[    ]");
    }
}
