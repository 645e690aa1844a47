use crate::config;
use crate::events::AppEvent;
use crate::gui::input;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, Point, WheelLayout};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;
use wheelkit::Wheel;
use wheelkit::arbiter::Interaction;
use wheelkit::panel::PanelField;
use wheelkit::schedule::{Command, Reaction, Timer};
use wheelkit::wheel::Direction;

pub const DEFAULT_WIDTH: i32 = 1100;
pub const DEFAULT_HEIGHT: i32 = 720;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub title: gtk::Label,
    pub description: gtk::Label,
    pub button: gtk::Button,
    tick_source: Option<glib::SourceId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    Tick,
    Timer(Timer),
    Click(Point),
    Navigate(Direction, Interaction),
    Resize(u32),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            set_default_width: DEFAULT_WIDTH,
            set_default_height: DEFAULT_HEIGHT,
            add_css_class: "orbit-window",

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match input::key_to_msg(key) {
                        Some(msg) => {
                            sender.input(msg);
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "orbit-wheel",

                    // fires on every allocation change, maximize and fullscreen included
                    connect_resize[sender] => move |area, _, _| {
                        if let Some(width) = viewport_width(area) {
                            sender.input(AppMsg::Resize(width));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Click(Point::new(x, y)));
                        }
                    }
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_valign: gtk::Align::Center,
                    set_spacing: 16,
                    set_width_request: 340,
                    add_css_class: "orbit-panel",

                    #[name = "title"]
                    gtk::Label {
                        add_css_class: "orbit-title",
                        add_css_class: "orbit-field",
                        add_css_class: theme::HIDDEN_CLASS,
                        set_xalign: 0.0,
                        set_wrap: true,
                    },

                    #[name = "description"]
                    gtk::Label {
                        add_css_class: "orbit-description",
                        add_css_class: "orbit-field",
                        add_css_class: theme::HIDDEN_CLASS,
                        set_xalign: 0.0,
                        set_wrap: true,
                        set_max_width_chars: 40,
                    },

                    #[name = "button"]
                    gtk::Button {
                        add_css_class: "orbit-field",
                        add_css_class: "suggested-action",
                        add_css_class: theme::HIDDEN_CLASS,
                        set_halign: gtk::Align::Start,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_margin_top: 24,

                        gtk::Button {
                            set_icon_name: "go-previous-symbolic",
                            set_tooltip_text: Some("Previous"),
                            connect_clicked => AppMsg::Navigate(Direction::Previous, Interaction::Button),
                        },

                        gtk::Button {
                            set_icon_name: "go-next-symbolic",
                            set_tooltip_text: Some("Next"),
                            connect_clicked => AppMsg::Navigate(Direction::Next, Interaction::Button),
                        },
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (wheel, rx) = init;

        theme::load_css();

        let model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            title: gtk::Label::default(),
            description: gtk::Label::default(),
            button: gtk::Button::default(),
            tick_source: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.title = widgets.title.clone();
        model.description = widgets.description.clone();
        model.button = widgets.button.clone();

        let wheel_draw = model.wheel.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let state = wheel_draw.borrow();
                let layout = WheelLayout::compute(&state, width as f64, height as f64);
                if let Err(e) = wheel::draw(cr, &state, &layout, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        // the width is seeded by the first allocation of the drawing area
        let reaction = model.wheel.borrow_mut().start();
        model.apply(reaction, &sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let reaction = match msg {
            AppMsg::Tick => self.wheel.borrow_mut().on_tick(),
            AppMsg::Timer(timer) => self.wheel.borrow_mut().on_timer(timer),
            AppMsg::Click(point) => self.click(point),
            AppMsg::Navigate(direction, interaction) => {
                self.wheel.borrow_mut().navigate(direction, interaction)
            }
            AppMsg::Resize(width) => self.wheel.borrow_mut().resize(width),
            AppMsg::ConfigReload => self.reload(),
            AppMsg::Close => {
                self.root.close();
                Reaction::none()
            }
        };
        self.apply(reaction, &sender);
    }
}

/// Width of the window holding `widget`, as allocated.
fn viewport_width(widget: &impl IsA<gtk::Widget>) -> Option<u32> {
    let root = widget.root()?;
    u32::try_from(root.width()).ok().filter(|w| *w > 0)
}

impl AppModel {
    fn click(&self, point: Point) -> Reaction {
        let layout = WheelLayout::compute(
            &self.wheel.borrow(),
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        );
        let Some(index) = layout.hit_test(point) else {
            return Reaction::none();
        };

        self.wheel
            .borrow_mut()
            .click_item(index)
            .unwrap_or_else(|e| {
                log::error!("Click on item {} ignored: {}", index, e);
                Reaction::none()
            })
    }

    fn reload(&self) -> Reaction {
        let loaded = match config::get_config_path() {
            Ok(path) if !path.exists() => config::bundled_config(),
            _ => config::load_config(),
        };

        match loaded {
            Ok(new_config) => {
                let reaction = self
                    .wheel
                    .borrow_mut()
                    .reload(new_config.registry(), new_config.wheel);
                log::info!("Configuration reloaded");
                reaction
            }
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                Reaction::none()
            }
        }
    }

    /// Carries out the commands of a reaction and brings the widgets in line
    /// with the wheel.
    fn apply(&mut self, reaction: Reaction, sender: &ComponentSender<Self>) {
        for command in reaction.commands {
            match command {
                Command::StartTicking(period) => {
                    self.stop_ticking();
                    let sender = sender.clone();
                    self.tick_source = Some(glib::timeout_add_local(period, move || {
                        sender.input(AppMsg::Tick);
                        glib::ControlFlow::Continue
                    }));
                }
                Command::StopTicking => self.stop_ticking(),
                Command::After(delay, timer) => {
                    let sender = sender.clone();
                    glib::timeout_add_local_once(delay, move || {
                        sender.input(AppMsg::Timer(timer));
                    });
                }
            }
        }

        if reaction.redraw {
            self.drawing_area.queue_draw();
        }
        self.sync_panel();
    }

    fn stop_ticking(&mut self) {
        if let Some(source) = self.tick_source.take() {
            source.remove();
        }
    }

    fn sync_panel(&self) {
        let wheel = self.wheel.borrow();
        let panel = wheel.panel();

        for field in PanelField::iter() {
            let view = panel.field(field);
            match field {
                PanelField::Title => {
                    if self.title.label().as_str() != view.text {
                        self.title.set_label(&view.text);
                    }
                    theme::set_hidden(&self.title, !view.visible);
                }
                PanelField::Description => {
                    if self.description.label().as_str() != view.text {
                        self.description.set_label(&view.text);
                    }
                    theme::set_hidden(&self.description, !view.visible);
                }
                PanelField::Button => {
                    if self.button.label().as_deref() != Some(view.text.as_str()) {
                        self.button.set_label(&view.text);
                    }
                    theme::set_hidden(&self.button, !view.visible);
                }
            }
        }
    }
}
