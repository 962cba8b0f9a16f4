//! Cup and particle widgets

use crate::effects::particles::ParticleFrame;
use crate::effects::pour::PourGradient;
use crate::models::SizeId;
use crate::util::color::CUP_BACKGROUND;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Write one glyph if `(x, y)` falls inside `area`
fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, glyph: char, fg: Color) {
    if x < i32::from(area.x) || y < i32::from(area.y) {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    if x >= area.right() || y >= area.bottom() {
        return;
    }
    buf.get_mut(x, y).set_char(glyph).set_fg(fg);
}

/// A cup scaled to its catalog size, optionally filled
pub struct CupWidget<'a> {
    pub size: SizeId,
    pub pour: Option<&'a PourGradient>,
    pub label: Option<&'a str>,
    pub blush: bool,
    pub vapor: &'a [ParticleFrame],
}

impl CupWidget<'_> {
    /// Cup rectangle centered near the bottom of `area`
    pub fn cup_rect(size: SizeId, area: Rect) -> Rect {
        let (w, h) = size.size().cells();
        let width = (w + 2).min(area.width);
        let height = (h + 1).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height - height,
            width,
            height,
        }
    }
}

impl Widget for CupWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 2 {
            return;
        }
        let cup = Self::cup_rect(self.size, area);
        let wall = Style::default().fg(Color::White);

        for y in cup.top()..cup.bottom() {
            buf.get_mut(cup.left(), y).set_symbol("│").set_style(wall);
            buf.get_mut(cup.right() - 1, y).set_symbol("│").set_style(wall);
        }
        for x in cup.left()..cup.right() {
            buf.get_mut(x, cup.bottom() - 1).set_symbol("─").set_style(wall);
        }
        buf.get_mut(cup.left(), cup.bottom() - 1).set_symbol("└");
        buf.get_mut(cup.right() - 1, cup.bottom() - 1).set_symbol("┘");

        let inner = Rect {
            x: cup.x + 1,
            y: cup.y,
            width: cup.width.saturating_sub(2),
            height: cup.height.saturating_sub(1),
        };
        if let Some(pour) = self.pour {
            for (row, color) in pour.rows(inner.height).into_iter().enumerate() {
                for x in inner.left()..inner.right() {
                    buf.get_mut(x, inner.y + row as u16)
                        .set_symbol(" ")
                        .set_bg(Color::from(color));
                }
            }
        }

        if let Some(label) = self.label {
            let text: String = label.chars().take(inner.width as usize).collect();
            let len = text.chars().count() as u16;
            let x = inner.x + inner.width.saturating_sub(len) / 2;
            let y = inner.y + inner.height / 2;
            let bg = self.pour.map(|p| p.color_at(p.height / 2)).unwrap_or(CUP_BACKGROUND);
            buf.set_string(
                x,
                y,
                text,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::from(bg))
                    .add_modifier(Modifier::BOLD),
            );
        }

        if self.blush && cup.x >= area.x + 2 {
            put(buf, area, i32::from(cup.x) - 2, i32::from(cup.y), '♥', Color::LightRed);
            put(buf, area, i32::from(cup.right()) + 1, i32::from(cup.y), '♥', Color::LightRed);
        }

        // Vapor frames are relative to the cup mouth
        for frame in self.vapor {
            put(
                buf,
                area,
                i32::from(inner.x) + frame.x.round() as i32,
                i32::from(cup.y) - 1 + frame.y.round() as i32,
                frame.glyph,
                Color::from(frame.color),
            );
        }
    }
}

/// Particles drawn directly in frame coordinates
pub struct ParticleLayer<'a> {
    pub frames: &'a [ParticleFrame],
}

impl Widget for ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for frame in self.frames {
            put(
                buf,
                area,
                i32::from(area.x) + frame.x.round() as i32,
                i32::from(area.y) + frame.y.round() as i32,
                frame.glyph,
                Color::from(frame.color),
            );
        }
    }
}
