use crate::items::Item;
use crate::schedule::{Command, Generation, Timer};
use crate::settings::{ELLIPSIS, WheelSettings};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum PanelField {
    Title,
    Description,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStep {
    Swap,
    Reveal(PanelField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum PanelPhase {
    #[default]
    Idle,
    FadingOut,
    Revealing,
    Shown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    pub text: String,
    pub visible: bool,
}

/// Shortens a description for narrow viewports.
pub fn truncate_description(text: &str, viewport_width: u32, settings: &WheelSettings) -> String {
    if !settings.is_narrow(viewport_width) {
        return text.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > settings.truncate_words {
        format!("{}{}", words[..settings.truncate_words].join(" "), ELLIPSIS)
    } else {
        text.to_string()
    }
}

/// Text shown next to the wheel, faded out and back in on every selection.
#[derive(Debug, Clone)]
pub struct InfoPanel {
    generation: Generation,
    phase: PanelPhase,
    pending: Option<Item>,
    shown: Option<Item>,
    title: FieldView,
    description: FieldView,
    button: FieldView,
    viewport_width: u32,
}

impl InfoPanel {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            generation: Generation::default(),
            phase: PanelPhase::Idle,
            pending: None,
            shown: None,
            title: FieldView::default(),
            description: FieldView::default(),
            button: FieldView::default(),
            viewport_width,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn field(&self, field: PanelField) -> &FieldView {
        match field {
            PanelField::Title => &self.title,
            PanelField::Description => &self.description,
            PanelField::Button => &self.button,
        }
    }

    fn field_mut(&mut self, field: PanelField) -> &mut FieldView {
        match field {
            PanelField::Title => &mut self.title,
            PanelField::Description => &mut self.description,
            PanelField::Button => &mut self.button,
        }
    }

    /// Starts a change towards `item`, superseding any change still in flight.
    pub fn begin(&mut self, item: &Item, settings: &WheelSettings) -> Command {
        let generation = self.generation.bump();
        for field in PanelField::iter() {
            self.field_mut(field).visible = false;
        }
        self.phase = PanelPhase::FadingOut;
        self.pending = Some(item.clone());

        Command::After(
            settings.fade_out,
            Timer::Panel {
                generation,
                step: PanelStep::Swap,
            },
        )
    }

    /// Applies a fired panel timer. Returns the follow-up timers.
    pub fn advance(
        &mut self,
        generation: Generation,
        step: PanelStep,
        settings: &WheelSettings,
    ) -> Vec<Command> {
        if generation != self.generation {
            log::trace!(
                "Dropping stale panel step {:?} (generation {}, current {})",
                step,
                generation,
                self.generation
            );
            return Vec::new();
        }

        match step {
            PanelStep::Swap => self.swap(settings),
            PanelStep::Reveal(field) => {
                self.field_mut(field).visible = true;
                if PanelField::iter().all(|f| self.field(f).visible) {
                    self.phase = PanelPhase::Shown;
                }
                Vec::new()
            }
        }
    }

    fn swap(&mut self, settings: &WheelSettings) -> Vec<Command> {
        let Some(item) = self.pending.take() else {
            return Vec::new();
        };

        self.title.text = item.title.to_string();
        self.description.text =
            truncate_description(&item.description, self.viewport_width, settings);
        self.button.text = item.button_label.to_string();
        self.shown = Some(item);
        self.phase = PanelPhase::Revealing;

        let generation = self.generation;
        PanelField::iter()
            .map(|field| {
                Command::After(
                    settings.reveal_delay(field),
                    Timer::Panel {
                        generation,
                        step: PanelStep::Reveal(field),
                    },
                )
            })
            .collect()
    }

    /// Re-truncates the displayed description for a new viewport width.
    /// Returns whether the text changed.
    pub fn resize(&mut self, viewport_width: u32, settings: &WheelSettings) -> bool {
        self.viewport_width = viewport_width;
        let Some(item) = &self.shown else {
            return false;
        };
        let text = truncate_description(&item.description, viewport_width, settings);
        if text == self.description.text {
            return false;
        }
        self.description.text = text;
        true
    }

    /// Invalidates every pending step without touching what is displayed.
    pub(crate) fn invalidate(&mut self) {
        self.generation.bump();
        self.pending = None;
    }

    pub(crate) fn clear(&mut self) {
        self.invalidate();
        self.shown = None;
        self.phase = PanelPhase::Idle;
        for field in PanelField::iter() {
            *self.field_mut(field) = FieldView::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ButtonLabel, Description, Title};
    use std::time::Duration;

    fn item(index: usize, title: &str, description: &str) -> Item {
        Item {
            index,
            title: Title::new(title),
            description: Description::new(description),
            button_label: ButtonLabel::new("Discover"),
        }
    }

    fn swap_timer(command: Command) -> (Generation, PanelStep) {
        match command {
            Command::After(_, Timer::Panel { generation, step }) => (generation, step),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_truncation_law() {
        let settings = WheelSettings::default();
        let long = "one two three four five";

        assert_eq!(truncate_description(long, 768, &settings), "one two three...");
        assert_eq!(truncate_description(long, 400, &settings), "one two three...");
        assert_eq!(truncate_description(long, 769, &settings), long);
        assert_eq!(truncate_description("one two three", 320, &settings), "one two three");
        assert_eq!(truncate_description("", 320, &settings), "");
    }

    #[test]
    fn test_full_change_sequence() {
        let settings = WheelSettings::default();
        let mut panel = InfoPanel::new(1280);

        let command = panel.begin(&item(0, "Aurora", "Northern lights"), &settings);
        assert_eq!(panel.phase(), PanelPhase::FadingOut);
        assert!(matches!(command, Command::After(d, _) if d == settings.fade_out));

        let (generation, step) = swap_timer(command);
        let reveals = panel.advance(generation, step, &settings);
        assert_eq!(panel.phase(), PanelPhase::Revealing);
        assert_eq!(panel.field(PanelField::Title).text, "Aurora");
        assert_eq!(panel.field(PanelField::Description).text, "Northern lights");
        assert_eq!(panel.field(PanelField::Button).text, "Discover");
        assert!(!panel.field(PanelField::Title).visible);

        let delays: Vec<Duration> = reveals
            .iter()
            .map(|c| match c {
                Command::After(d, _) => *d,
                other => panic!("unexpected command {:?}", other),
            })
            .collect();
        assert_eq!(
            delays,
            [
                settings.reveal_title,
                settings.reveal_description,
                settings.reveal_button
            ]
        );

        for command in reveals {
            let (generation, step) = swap_timer(command);
            panel.advance(generation, step, &settings);
        }
        assert_eq!(panel.phase(), PanelPhase::Shown);
        assert!(PanelField::iter().all(|f| panel.field(f).visible));
    }

    #[test]
    fn test_stale_steps_are_ignored() {
        let settings = WheelSettings::default();
        let mut panel = InfoPanel::new(1280);

        let first = panel.begin(&item(0, "First", "a"), &settings);
        let second = panel.begin(&item(1, "Second", "b"), &settings);

        let (stale_generation, step) = swap_timer(first);
        assert!(panel.advance(stale_generation, step, &settings).is_empty());
        assert!(panel.field(PanelField::Title).text.is_empty());

        let (generation, step) = swap_timer(second);
        panel.advance(generation, step, &settings);
        assert_eq!(panel.field(PanelField::Title).text, "Second");
    }

    #[test]
    fn test_resize_retruncates_shown_description() {
        let settings = WheelSettings::default();
        let mut panel = InfoPanel::new(1280);
        let (generation, step) =
            swap_timer(panel.begin(&item(0, "t", "a long winded description"), &settings));
        panel.advance(generation, step, &settings);

        assert!(panel.resize(600, &settings));
        assert_eq!(panel.field(PanelField::Description).text, "a long winded...");
        assert!(!panel.resize(500, &settings));
        assert!(panel.resize(1024, &settings));
        assert_eq!(
            panel.field(PanelField::Description).text,
            "a long winded description"
        );
    }
}
