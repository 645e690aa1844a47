use super::geometry::{ItemGeometry, WheelLayout};
use super::{CENTER_CIRCLE_RADIUS, LABEL_FONT_SIZE, MARKER_SIZE, SPOKE_COUNT, WHEEL_RADIUS};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;
use wheelkit::Wheel;
use wheelkit::items::Item;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct ItemRenderer<'a> {
    item: &'a Item,
    geometry: &'a ItemGeometry,
    active: bool,
    scale_factor: f64,
}

impl<'a> ItemRenderer<'a> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = if self.active {
            colors.active
        } else {
            colors.idle
        };
        set_color(cr, color);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            self.geometry.radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.item.title.as_str();
        if text.is_empty() {
            return Ok(());
        }

        set_color(cr, colors.text);
        let weight = if self.active {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
        cr.set_font_size(LABEL_FONT_SIZE * self.scale_factor);

        // shrink long titles to fit inside the circle
        let ext = cr.text_extents(text)?;
        let max_width = self.geometry.radius * 1.7;
        if ext.width() > max_width {
            cr.set_font_size(LABEL_FONT_SIZE * self.scale_factor * max_width / ext.width());
        }
        let ext = cr.text_extents(text)?;
        cr.move_to(
            self.geometry.center.x - ext.width() / 2.0 - ext.x_bearing(),
            self.geometry.center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)
    }
}

/// Spokes drawn in wheel space, so they turn with the wheel transform.
fn draw_spokes(
    cr: &Context,
    wheel: &Wheel,
    layout: &WheelLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let transform = wheel.transform();
    let (inner, outer) = (
        CENTER_CIRCLE_RADIUS * layout.scale_factor,
        WHEEL_RADIUS * layout.scale_factor,
    );

    cr.save()?;
    cr.translate(layout.center.x, layout.center.y);
    cr.rotate(transform.angle.to_radians());
    set_color(cr, colors.ring);
    cr.set_line_width(1.0);
    for i in 0..SPOKE_COUNT {
        let angle = 2.0 * PI * i as f64 / SPOKE_COUNT as f64;
        cr.move_to(inner * angle.cos(), inner * angle.sin());
        cr.line_to(outer * angle.cos(), outer * angle.sin());
    }
    cr.stroke()?;
    cr.restore()
}

fn draw_rings(cr: &Context, layout: &WheelLayout, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.ring);
    cr.set_line_width(2.0 * layout.scale_factor);
    for radius in [CENTER_CIRCLE_RADIUS, WHEEL_RADIUS] {
        cr.new_sub_path();
        cr.arc(
            layout.center.x,
            layout.center.y,
            radius * layout.scale_factor,
            0.0,
            2.0 * PI,
        );
    }
    cr.stroke()
}

/// Triangle just outside the active slot, pointing at it.
fn draw_marker(
    cr: &Context,
    wheel: &Wheel,
    layout: &WheelLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let target = wheel.settings().target_position;
    let size = MARKER_SIZE * layout.scale_factor;
    let reach = WHEEL_RADIUS * layout.scale_factor;
    let tip = layout.center.polar(target, reach + size * 4.0);
    let left = layout.center.polar(target - 2.0, reach + size * 5.5);
    let right = layout.center.polar(target + 2.0, reach + size * 5.5);

    set_color(cr, colors.marker);
    cr.move_to(tip.x, tip.y);
    cr.line_to(left.x, left.y);
    cr.line_to(right.x, right.y);
    cr.close_path();
    cr.fill()
}

pub fn draw(
    cr: &Context,
    wheel: &Wheel,
    layout: &WheelLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_spokes(cr, wheel, layout, colors)?;
    draw_rings(cr, layout, colors)?;

    // the active item goes last so it overlaps its neighbours
    let mut active = None;
    for (i, (item, geometry)) in zip(wheel.registry().iter(), &layout.items).enumerate() {
        let renderer = ItemRenderer {
            item,
            geometry,
            active: wheel.is_active(i),
            scale_factor: layout.scale_factor,
        };
        if renderer.active {
            active = Some(renderer);
        } else {
            renderer.draw(cr, colors)?;
        }
    }
    if let Some(renderer) = active {
        renderer.draw(cr, colors)?;
    }

    draw_marker(cr, wheel, layout, colors)
}
