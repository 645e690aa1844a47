use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub const HIDDEN_CLASS: &str = "orbit-hidden";

pub struct ThemeColors {
    pub active: Srgba<f64>,
    pub idle: Srgba<f64>,
    pub ring: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.95),
                Some(0.95),
            ),
            idle: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.85),
                Some(0.85),
            ),
            ring: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.5, 0.5, 0.5, 0.35),
                Some(0.35),
            ),
            marker: Self::lookup_color(
                context,
                "accent_color",
                Srgba::new(0.4, 0.4, 0.8, 1.0),
                None,
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Fields slide up 20px while fading in.
pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-panel {
    padding: 24px;
}
.orbit-title {
    font-size: 28px;
    font-weight: bold;
}
.orbit-description {
    font-size: 15px;
}
.orbit-field {
    opacity: 1;
    margin-top: 0px;
    transition: opacity 600ms ease, margin-top 600ms ease;
}
.orbit-field.orbit-hidden {
    opacity: 0;
    margin-top: 20px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

pub fn set_hidden(widget: &impl IsA<gtk::Widget>, hidden: bool) {
    if hidden {
        widget.add_css_class(HIDDEN_CLASS);
    } else {
        widget.remove_css_class(HIDDEN_CLASS);
    }
}
