use crate::panel::PanelStep;
use derive_more::Display;
use std::time::Duration;

/// Stamp of a change request. A timer carrying an older generation than its
/// owner's current one is stale and gets ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
pub struct Generation(u64);

impl Generation {
    pub fn bump(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Panel {
        generation: Generation,
        step: PanelStep,
    },
    Resume {
        generation: Generation,
    },
}

/// Work the host has to carry out on behalf of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartTicking(Duration),
    StopTicking,
    After(Duration, Timer),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub commands: Vec<Command>,
    pub redraw: bool,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            commands: Vec::new(),
            redraw: true,
        }
    }

    pub fn push(&mut self, command: impl Into<Option<Command>>) {
        if let Some(command) = command.into() {
            self.commands.push(command);
        }
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    pub fn merge(&mut self, other: Reaction) {
        self.commands.extend(other.commands);
        self.redraw |= other.redraw;
    }

    pub fn timers(&self) -> impl Iterator<Item = (Duration, Timer)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::After(delay, timer) => Some((*delay, *timer)),
            _ => None,
        })
    }
}
