use crate::arbiter::{ArbiterState, AutoRotation, Interaction};
use crate::error::WheelError;
use crate::items::{Item, ItemRegistry};
use crate::panel::InfoPanel;
use crate::rotation::{RotationEngine, Transform};
use crate::schedule::{Reaction, Timer};
use crate::selection::{SelectionState, detect_active_item};
use crate::settings::WheelSettings;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Direction {
    Next,
    Previous,
}

/// One carousel instance. Owns the rotation, the selection, the info panel
/// and the auto-rotation arbiter; the host only executes the returned
/// [`Reaction`]s and feeds fired timers back through [`Wheel::on_timer`].
#[derive(Debug, Clone)]
pub struct Wheel {
    settings: WheelSettings,
    registry: ItemRegistry,
    rotation: RotationEngine,
    selection: SelectionState,
    panel: InfoPanel,
    arbiter: AutoRotation,
}

impl Wheel {
    pub fn new(registry: ItemRegistry, settings: WheelSettings, viewport_width: u32) -> Self {
        Self {
            rotation: RotationEngine::new(registry.count(), settings.target_position),
            selection: SelectionState::default(),
            panel: InfoPanel::new(viewport_width),
            arbiter: AutoRotation::default(),
            registry,
            settings,
        }
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn angle(&self) -> f64 {
        self.rotation.angle()
    }

    pub fn transform(&self) -> Transform {
        self.rotation.transform()
    }

    pub fn angle_for_index(&self, index: usize) -> f64 {
        self.rotation.angle_for_index(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.selection.current()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.selection
            .current()
            .and_then(|i| self.registry.get(i).ok())
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.selection.is_active(index)
    }

    pub fn arbiter_state(&self) -> ArbiterState {
        self.arbiter.state()
    }

    /// Shows the first item and starts turning.
    pub fn start(&mut self) -> Reaction {
        let mut reaction = Reaction::redraw();
        match self.initial_selection() {
            Ok(selected) => reaction.merge(selected),
            Err(e) => log::warn!("{}; starting without an active item", e),
        }
        reaction.push(self.arbiter.start(&self.settings));
        reaction
    }

    fn initial_selection(&mut self) -> Result<Reaction, WheelError> {
        if self.registry.is_empty() {
            return Err(WheelError::ConfigurationMissing(
                "no items configured".to_string(),
            ));
        }
        self.select(self.selection.current().unwrap_or(0))
    }

    fn check_index(&self, index: usize) -> Result<(), WheelError> {
        debug_assert!(
            index < self.registry.count(),
            "item index {} is out of range for {} items",
            index,
            self.registry.count()
        );
        self.registry.get(index).map(|_| ())
    }

    /// Marks `index` active and animates the panel towards it. Runs the
    /// animation even if `index` is already current.
    pub fn select(&mut self, index: usize) -> Result<Reaction, WheelError> {
        self.check_index(index)?;
        let item = self.registry.get(index)?;
        log::debug!("Selecting item {} ({})", index, item.title);

        let command = self.panel.begin(item, &self.settings);
        self.selection.set(index);
        Ok(Reaction {
            commands: vec![command],
            redraw: true,
        })
    }

    fn take_over(&mut self, index: usize, interaction: Interaction) -> Result<Reaction, WheelError> {
        self.check_index(index)?;

        let mut reaction = Reaction::none();
        reaction.extend(self.arbiter.suspend(interaction, &self.settings));
        reaction.merge(self.select(index)?);
        let transform = self.rotation.jump_to(index);
        log::trace!("Wheel transform: {}", transform);
        Ok(reaction)
    }

    pub fn click_item(&mut self, index: usize) -> Result<Reaction, WheelError> {
        self.take_over(index, Interaction::ItemClick)
    }

    pub fn navigate(&mut self, direction: Direction, interaction: Interaction) -> Reaction {
        let count = self.registry.count();
        let target = match direction {
            Direction::Next => self.selection.next_index(count),
            Direction::Previous => self.selection.previous_index(count),
        };
        let Some(index) = target else {
            return Reaction::none();
        };

        self.take_over(index, interaction).unwrap_or_else(|e| {
            log::error!("Failed to navigate {}: {}", direction, e);
            Reaction::none()
        })
    }

    pub fn go_to_next(&mut self, interaction: Interaction) -> Reaction {
        self.navigate(Direction::Next, interaction)
    }

    pub fn go_to_previous(&mut self, interaction: Interaction) -> Reaction {
        self.navigate(Direction::Previous, interaction)
    }

    pub fn on_tick(&mut self) -> Reaction {
        if !self.arbiter.is_running() {
            return Reaction::none();
        }

        self.rotation.tick(self.settings.speed);
        let mut reaction = Reaction::redraw();

        if let Some(index) =
            detect_active_item(self.rotation.angle(), &self.rotation, self.settings.tolerance)
            && self.selection.current() != Some(index)
        {
            match self.select(index) {
                Ok(selected) => reaction.merge(selected),
                Err(e) => log::error!("Auto-rotation selected an invalid item: {}", e),
            }
        }
        reaction
    }

    pub fn on_timer(&mut self, timer: Timer) -> Reaction {
        match timer {
            Timer::Panel { generation, step } => Reaction {
                commands: self.panel.advance(generation, step, &self.settings),
                redraw: false,
            },
            Timer::Resume { generation } => {
                let mut reaction = Reaction::none();
                reaction.push(self.arbiter.resume(generation, &self.settings));
                reaction
            }
        }
    }

    /// Only the truncation of the shown description depends on the width.
    pub fn resize(&mut self, viewport_width: u32) -> Reaction {
        if self.panel.resize(viewport_width, &self.settings) {
            log::trace!("Description re-truncated for width {}", viewport_width);
        }
        Reaction::none()
    }

    /// Swaps in a new configuration. An unchanged current item keeps its panel
    /// as is, only re-truncated; a changed one is animated in again. A pending
    /// cooldown keeps its resume timer, otherwise rotation restarts with the
    /// new settings.
    pub fn reload(&mut self, registry: ItemRegistry, settings: WheelSettings) -> Reaction {
        let previous = self.current_item().cloned();
        let cooling_down = self.arbiter.is_cooling_down();

        let mut reaction = Reaction::redraw();
        reaction.push(self.arbiter.stop());
        if !cooling_down {
            self.arbiter.invalidate_resume();
        }

        let count = registry.count();
        if count == 0 {
            self.selection.clear();
            self.panel.clear();
        } else if self.selection.current().is_some_and(|c| c >= count) {
            self.selection.set(0);
        }

        self.rotation.reconfigure(count, settings.target_position);
        self.registry = registry;
        self.settings = settings;

        if self.current_item().is_some() && self.current_item() == previous.as_ref() {
            self.panel.resize(self.panel.viewport_width(), &self.settings);
        } else {
            self.panel.invalidate();
            match self.initial_selection() {
                Ok(selected) => reaction.merge(selected),
                Err(e) => log::warn!("{}; reloaded without an active item", e),
            }
        }

        if cooling_down {
            log::debug!("Reloaded during a cooldown, auto-rotation resumes as scheduled");
        } else {
            reaction.push(self.arbiter.start(&self.settings));
        }
        reaction
    }
}
