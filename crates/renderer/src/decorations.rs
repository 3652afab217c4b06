//! Axes furniture: frame, grid lines, tick labels, colour bar and titles.

use imageproc::drawing::draw_line_segment_mut;

use crate::colormap::{Color, Colormap};
use crate::figure::Figure;
use crate::scale::{format_tick, nice_ticks, ValueScale};
use crate::text::{Align, TextStyle};
use crate::viewport::{PlotArea, Viewport};

const TICK_FONT: f32 = 12.0;
const LABEL_FONT: f32 = 14.0;
const TITLE_FONT: f32 = 16.0;
const TICK_LENGTH: f32 = 5.0;
const GRID_COLOR: Color = Color::new(176, 176, 176, 255);

/// Metadata keywords written into figure PNGs.
pub mod keywords {
    pub const TITLE: &str = "Title";
    pub const X_LABEL: &str = "XLabel";
    pub const Y_LABEL: &str = "YLabel";
    pub const COLORBAR_LABEL: &str = "ColorbarLabel";
    pub const EXTENT: &str = "Extent";
    pub const COLOR_LIMITS: &str = "ColorLimits";
    pub const COLORMAP: &str = "Colormap";
    pub const SOFTWARE: &str = "Software";
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

fn line(figure: &mut Figure, from: (f32, f32), to: (f32, f32), color: Color) {
    draw_line_segment_mut(figure.image_mut(), from, to, color.to_rgba());
}

/// Draw longitude/latitude grid lines at nice intervals, with tick labels
/// outside the plot area.
pub fn draw_gridlines(figure: &mut Figure, viewport: &Viewport) {
    let area = viewport.area;
    let (left, right) = (area.x as f32, area.right() as f32);
    let (top, bottom) = (area.y as f32, area.bottom() as f32);

    let lon_ticks = nice_ticks(viewport.extent.min_x, viewport.extent.max_x, 6);
    let lon_step = tick_step(&lon_ticks);
    for lon in &lon_ticks {
        let x = viewport.lon_to_x(*lon) as f32;
        line(figure, (x, top), (x, bottom), GRID_COLOR);
        line(figure, (x, bottom), (x, bottom + TICK_LENGTH), Color::BLACK);
        figure.draw_text(
            (x as i32, (bottom + TICK_LENGTH + 2.0) as i32),
            &format_tick(*lon, lon_step),
            TextStyle::new(TICK_FONT, Align::Center),
        );
    }

    let lat_ticks = nice_ticks(viewport.extent.min_y, viewport.extent.max_y, 6);
    let lat_step = tick_step(&lat_ticks);
    for lat in &lat_ticks {
        let y = viewport.lat_to_y(*lat) as f32;
        line(figure, (left, y), (right, y), GRID_COLOR);
        line(figure, (left - TICK_LENGTH, y), (left, y), Color::BLACK);
        figure.draw_text(
            ((left - TICK_LENGTH - 3.0) as i32, (y - TICK_FONT / 2.0) as i32),
            &format_tick(*lat, lat_step),
            TextStyle::new(TICK_FONT, Align::Right),
        );
    }
}

/// Black frame around the plot area.
pub fn draw_frame(figure: &mut Figure, area: &PlotArea) {
    figure.stroke_rect(area, Color::BLACK);
}

/// Title above the plot and axis labels below/left of it.
pub fn draw_titles(
    figure: &mut Figure,
    area: &PlotArea,
    title: &str,
    x_label: Option<&str>,
    y_label: Option<&str>,
) {
    figure.set_text(keywords::TITLE, title);
    let centre = (area.x + area.width / 2) as i32;
    figure.draw_text(
        (centre, (area.y as f32 - TITLE_FONT - 10.0) as i32),
        title,
        TextStyle::new(TITLE_FONT, Align::Center),
    );

    if let Some(label) = x_label {
        figure.set_text(keywords::X_LABEL, label);
        figure.draw_text(
            (centre, (area.bottom() as f32 + TICK_LENGTH + TICK_FONT + 8.0) as i32),
            label,
            TextStyle::new(LABEL_FONT, Align::Center),
        );
    }
    if let Some(label) = y_label {
        figure.set_text(keywords::Y_LABEL, label);
        // Horizontal, above the latitude tick labels
        figure.draw_text(
            (area.x as i32 - 8, area.y as i32 - (LABEL_FONT as i32) - 4),
            label,
            TextStyle::new(LABEL_FONT, Align::Right),
        );
    }
}

/// Vertical colour bar with ticks and a label.
pub fn draw_colorbar(
    figure: &mut Figure,
    bar: &PlotArea,
    colormap: &Colormap,
    scale: &ValueScale,
    label: &str,
) {
    figure.set_text(keywords::COLORBAR_LABEL, label);
    figure.set_text(keywords::COLORMAP, colormap.name());
    figure.set_text(
        keywords::COLOR_LIMITS,
        format!("{},{}", scale.min, scale.max),
    );

    // Bottom row is the minimum
    let height = bar.height.max(1);
    for i in 0..height {
        let t = if height == 1 {
            0.5
        } else {
            1.0 - i as f64 / (height - 1) as f64
        };
        let strip = PlotArea {
            x: bar.x,
            y: bar.y + i,
            width: bar.width,
            height: 1,
        };
        figure.fill_rect(&strip, colormap.color_at(t));
    }
    figure.stroke_rect(bar, Color::BLACK);

    let right = bar.right() as f32;
    let ticks = nice_ticks(scale.min, scale.max, 5);
    let step = tick_step(&ticks);
    for value in &ticks {
        let Some(t) = scale.normalize(*value) else { continue };
        let y = bar.bottom() as f32 - 1.0 - t as f32 * (height - 1) as f32;
        line(figure, (right, y), (right + TICK_LENGTH, y), Color::BLACK);
        figure.draw_text(
            ((right + TICK_LENGTH + 3.0) as i32, (y - TICK_FONT / 2.0) as i32),
            &format_tick(*value, step),
            TextStyle::new(TICK_FONT, Align::Left),
        );
    }

    // Label runs beside the tick labels, centred on the bar
    figure.draw_text(
        (
            (right + TICK_LENGTH + 45.0) as i32,
            (bar.y + bar.height / 2) as i32,
        ),
        label,
        TextStyle::new(LABEL_FONT, Align::Left),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorbar_runs_min_to_max_bottom_up() {
        let mut fig = Figure::new(400, 300).unwrap();
        let plot = fig.plot_area();
        let bar = fig.colorbar_area(&plot);
        let cmap = Colormap::by_name("Greens").unwrap();
        draw_colorbar(&mut fig, &bar, &cmap, &ValueScale::new(0.0, 1.0), "AREA");

        // Sample inside the border
        let x = bar.x + bar.width / 2;
        let top = fig.image().get_pixel(x, bar.y + 2).0;
        let bottom = fig.image().get_pixel(x, bar.bottom() - 3).0;
        // Greens goes light to dark: the top (max) is darker
        assert!(u32::from(top[1]) < u32::from(bottom[1]));
        assert_eq!(fig.text(keywords::COLORBAR_LABEL), Some("AREA"));
        assert_eq!(fig.text(keywords::COLORMAP), Some("Greens"));
    }

    #[test]
    fn test_titles_recorded_without_font() {
        let mut fig = Figure::new(400, 300).unwrap();
        let plot = fig.plot_area();
        draw_titles(&mut fig, &plot, "Zoomed View: AREA Mask", Some("Longitude"), Some("Latitude"));
        assert_eq!(fig.text(keywords::TITLE), Some("Zoomed View: AREA Mask"));
        assert_eq!(fig.text(keywords::X_LABEL), Some("Longitude"));
        assert_eq!(fig.text(keywords::Y_LABEL), Some("Latitude"));
    }
}
