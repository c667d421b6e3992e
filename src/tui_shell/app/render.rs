use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use super::super::markdown::{RenderError, detail_markdown, render_markdown};
use super::super::theme::Theme;
use super::App;

pub fn draw(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    draw_with(frame, app, theme, render_markdown);
}

pub(crate) fn draw_with(
    frame: &mut ratatui::Frame,
    app: &App,
    theme: &Theme,
    render: impl Fn(&str) -> Result<Text<'static>, RenderError>,
) {
    let area = frame.area();
    app.list.render(frame, area, theme);

    let Some(selected) = app.selected() else {
        return;
    };
    match render(&detail_markdown(selected)) {
        Ok(text) => draw_detail(frame, area, text, theme),
        Err(err) => {
            tracing::error!(error = %err, title = %selected.title, "render detail view");
        }
    }
}

fn draw_detail(frame: &mut ratatui::Frame, area: Rect, text: Text<'static>, theme: &Theme) {
    let box_area = panel_area(area, &text, theme);
    frame.render_widget(Clear, box_area);
    let block = Block::bordered()
        .border_type(theme.modal_border_type)
        .border_style(theme.modal_border)
        .padding(theme.modal_padding);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false }),
        box_area,
    );
}

/// Centered box sized to the wrapped text, clamped to `area`.
pub(super) fn panel_area(area: Rect, text: &Text<'_>, theme: &Theme) -> Rect {
    let pad = theme.modal_padding;
    let chrome_w = 2 + pad.left + pad.right;
    let chrome_h = 2 + pad.top + pad.bottom;

    let w = theme.modal_width.min(area.width);
    let inner_w = w.saturating_sub(chrome_w).max(1) as usize;
    let wrapped: usize = text
        .lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(inner_w))
        .sum();
    let h = u16::try_from(wrapped)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome_h)
        .min(area.height);

    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}
