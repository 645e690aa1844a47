use crate::schedule::{Command, Generation, Timer};
use crate::settings::WheelSettings;
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum ArbiterState {
    #[default]
    Stopped,
    Running,
}

/// What the user did to take over from auto-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Interaction {
    ItemClick,
    Button,
    Keyboard,
}

impl Interaction {
    pub fn cooldown(&self, settings: &WheelSettings) -> Duration {
        match self {
            Self::ItemClick => settings.click_cooldown,
            Self::Button | Self::Keyboard => settings.navigation_cooldown,
        }
    }
}

/// Decides whether the wheel turns by itself.
#[derive(Debug, Clone, Default)]
pub struct AutoRotation {
    state: ArbiterState,
    resume_generation: Generation,
    cooling_down: bool,
}

impl AutoRotation {
    pub fn state(&self) -> ArbiterState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ArbiterState::Running
    }

    /// Stopped by the user with a resume still pending.
    pub fn is_cooling_down(&self) -> bool {
        self.cooling_down
    }

    pub fn start(&mut self, settings: &WheelSettings) -> Option<Command> {
        if self.is_running() {
            return None;
        }
        self.state = ArbiterState::Running;
        Some(Command::StartTicking(settings.tick_period))
    }

    pub fn stop(&mut self) -> Option<Command> {
        if !self.is_running() {
            return None;
        }
        self.state = ArbiterState::Stopped;
        Some(Command::StopTicking)
    }

    /// Stops rotation for a user interaction and schedules its resume.
    /// Any resume scheduled by an earlier interaction becomes stale.
    pub fn suspend(&mut self, interaction: Interaction, settings: &WheelSettings) -> Vec<Command> {
        let mut commands: Vec<Command> = self.stop().into_iter().collect();
        let generation = self.resume_generation.bump();
        self.cooling_down = true;
        log::debug!(
            "Auto-rotation suspended by {}, resuming in {:?}",
            interaction,
            interaction.cooldown(settings)
        );
        commands.push(Command::After(
            interaction.cooldown(settings),
            Timer::Resume { generation },
        ));
        commands
    }

    pub fn resume(&mut self, generation: Generation, settings: &WheelSettings) -> Option<Command> {
        if generation != self.resume_generation {
            log::trace!("Dropping stale resume (generation {})", generation);
            return None;
        }
        self.cooling_down = false;
        self.start(settings)
    }

    pub(crate) fn invalidate_resume(&mut self) {
        self.resume_generation.bump();
        self.cooling_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_generation(commands: &[Command]) -> Generation {
        commands
            .iter()
            .find_map(|c| match c {
                Command::After(_, Timer::Resume { generation }) => Some(*generation),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let settings = WheelSettings::default();
        let mut arbiter = AutoRotation::default();

        assert_eq!(
            arbiter.start(&settings),
            Some(Command::StartTicking(settings.tick_period))
        );
        assert_eq!(arbiter.start(&settings), None);
        assert_eq!(arbiter.state(), ArbiterState::Running);

        assert_eq!(arbiter.stop(), Some(Command::StopTicking));
        assert_eq!(arbiter.stop(), None);
        assert_eq!(arbiter.state(), ArbiterState::Stopped);
    }

    #[test]
    fn test_cooldown_depends_on_interaction() {
        let settings = WheelSettings::default();
        assert_eq!(Interaction::ItemClick.cooldown(&settings), settings.click_cooldown);
        assert_eq!(Interaction::Button.cooldown(&settings), settings.navigation_cooldown);
        assert_eq!(Interaction::Keyboard.cooldown(&settings), settings.navigation_cooldown);
        assert!(settings.click_cooldown > settings.navigation_cooldown);
    }

    #[test]
    fn test_only_latest_resume_restarts() {
        let settings = WheelSettings::default();
        let mut arbiter = AutoRotation::default();
        arbiter.start(&settings);

        let first = arbiter.suspend(Interaction::ItemClick, &settings);
        assert_eq!(first[0], Command::StopTicking);
        let second = arbiter.suspend(Interaction::Keyboard, &settings);
        assert_eq!(second.len(), 1, "already stopped, only the resume timer");
        assert!(arbiter.is_cooling_down());

        assert_eq!(arbiter.resume(resume_generation(&first), &settings), None);
        assert!(!arbiter.is_running());
        assert!(arbiter.is_cooling_down());

        assert_eq!(
            arbiter.resume(resume_generation(&second), &settings),
            Some(Command::StartTicking(settings.tick_period))
        );
        assert!(arbiter.is_running());
        assert!(!arbiter.is_cooling_down());
    }

    #[test]
    fn test_invalidated_resume_ends_cooldown() {
        let settings = WheelSettings::default();
        let mut arbiter = AutoRotation::default();
        arbiter.start(&settings);

        let commands = arbiter.suspend(Interaction::Button, &settings);
        arbiter.invalidate_resume();

        assert!(!arbiter.is_cooling_down());
        assert_eq!(arbiter.resume(resume_generation(&commands), &settings), None);
    }
}
