//! Plotters-powered Lorenz curve widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only Lorenz chart.
///
/// All series are computed outside the render call; both axes span `[0, 1]`.
pub struct LorenzChart<'a> {
    /// Lorenz curve vertices `(cumulative population, cumulative share)`.
    pub lorenz: &'a [(f64, f64)],
    /// Axis labels.
    pub x_label: &'a str,
    pub y_label: String,
}

impl<'a> Widget for LorenzChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_percent(*v))
                .y_label_formatter(&|v| fmt_percent(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let equality_color = RGBColor(128, 128, 128);
            let lorenz_color = RGBColor(0, 255, 255); // cyan
            let vertex_color = RGBColor(255, 255, 0); // yellow

            // 1) Line of perfect equality.
            chart.draw_series(LineSeries::new([(0.0, 0.0), (1.0, 1.0)], &equality_color))?;

            // 2) Lorenz curve.
            chart.draw_series(LineSeries::new(self.lorenz.iter().copied(), &lorenz_color))?;

            // 3) Bucket boundaries. `Pixel` rather than `Circle`: the ratatui
            // backend maps circle radii to canvas units and draws huge circles.
            chart.draw_series(
                self.lorenz
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), vertex_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn fmt_percent(v: f64) -> String {
    format!("{:.0}%", v * 100.0)
}
