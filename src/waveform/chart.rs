//! Vertical-bar waveform widget.
//!
//! Draws one column per bucket, rising from the bottom of the area, with
//! eighth-block resolution on the topmost cell of each bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::Widget,
};

use super::view::WaveformView;

/// Widget drawing the buckets of a [`WaveformView`].
pub struct WaveformChart<'a> {
    view: &'a WaveformView,
    style: Style,
    bar_set: symbols::bar::Set,
}

impl<'a> WaveformChart<'a> {
    pub fn new(view: &'a WaveformView) -> Self {
        Self {
            view,
            style: Style::default().fg(Color::Red),
            bar_set: symbols::bar::NINE_LEVELS,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn symbol_for(&self, eighths: u32) -> &'static str {
        match eighths {
            0 => self.bar_set.empty,
            1 => self.bar_set.one_eighth,
            2 => self.bar_set.one_quarter,
            3 => self.bar_set.three_eighths,
            4 => self.bar_set.half,
            5 => self.bar_set.five_eighths,
            6 => self.bar_set.three_quarters,
            7 => self.bar_set.seven_eighths,
            _ => self.bar_set.full,
        }
    }
}

impl Widget for WaveformChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let start = area.x + self.view.start_column(area.width);
        let canvas_height = f32::from(area.height);

        for (index, bucket) in self.view.buckets().buckets().iter().enumerate() {
            let Ok(index) = u16::try_from(index) else {
                break;
            };
            let x = start.saturating_add(index);
            if x >= area.right() {
                break;
            }

            let height = self.view.bar_height(bucket.average(), canvas_height);
            let mut eighths = (height * 8.0).round() as u32;

            for y in (area.top()..area.bottom()).rev() {
                if eighths == 0 {
                    break;
                }
                let symbol = self.symbol_for(eighths);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_style(self.style);
                }
                eighths = eighths.saturating_sub(8);
            }
        }
    }
}

/// Renders the view off-screen and returns the rows as plain text.
pub fn render_lines(view: &WaveformView, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    WaveformChart::new(view).render(area, &mut buf);

    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lines_draws_bars_from_bottom() {
        let mut view = WaveformView::new(10).unwrap();
        view.set_levels(&[-20.0, -10.0, 0.0]);

        let lines = render_lines(&view, 3, 2);
        assert_eq!(lines, vec!["  █".to_string(), " ██".to_string()]);
    }

    #[test]
    fn test_partial_cells_use_eighth_blocks() {
        let mut view = WaveformView::new(10).unwrap();
        // Offset 8 over a range of 8: heights 0, 1/4, 3/4 and 1 cell
        view.set_levels(&[-8.0, -6.0, -2.0, 0.0]);

        let lines = render_lines(&view, 4, 1);
        let expected = format!(
            " {}{}{}",
            symbols::bar::ONE_QUARTER,
            symbols::bar::THREE_QUARTERS,
            symbols::bar::FULL
        );
        assert_eq!(lines, vec![expected]);
    }

    #[test]
    fn test_bars_are_centred() {
        let mut view = WaveformView::new(10).unwrap();
        view.set_levels(&[0.0, 10.0]);

        let lines = render_lines(&view, 10, 1);
        assert_eq!(lines, vec!["     █    ".to_string()]);
    }

    #[test]
    fn test_empty_view_renders_blank_canvas() {
        let view = WaveformView::new(4).unwrap();
        let lines = render_lines(&view, 4, 2);
        assert_eq!(lines, vec!["    ".to_string(), "    ".to_string()]);
    }

    #[test]
    fn test_bars_use_chart_style() {
        let mut view = WaveformView::new(10).unwrap();
        view.set_levels(&[0.0, 10.0]);
        let area = Rect::new(0, 0, 2, 1);

        let mut buf = Buffer::empty(area);
        WaveformChart::new(&view).render(area, &mut buf);
        assert_eq!(buf.cell((1, 0)).unwrap().fg, Color::Red);

        let mut buf = Buffer::empty(area);
        WaveformChart::new(&view)
            .style(Style::default().fg(Color::Green))
            .render(area, &mut buf);
        let bar = buf.cell((1, 0)).unwrap();
        assert_eq!(bar.symbol(), symbols::bar::FULL);
        assert_eq!(bar.fg, Color::Green);
        assert_eq!(buf.cell((0, 0)).unwrap().fg, Color::Reset);
    }

    #[test]
    fn test_zero_sized_area_is_ignored() {
        let mut view = WaveformView::new(4).unwrap();
        view.set_levels(&[1.0, 2.0]);
        assert!(render_lines(&view, 4, 0).is_empty());
    }
}
