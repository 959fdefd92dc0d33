use std::fmt;

use crate::state::Immutable;

use super::command::Command;

/// The result of one `update` call: the next snapshot and the commands to
/// run after it has been applied and rendered.
pub struct Update<S, M> {
    pub state: Immutable<S>,
    pub commands: Vec<Command<S, M>>,
}

impl<S, M> Update<S, M> {
    pub fn new(state: Immutable<S>) -> Self {
        Self {
            state,
            commands: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: Command<S, M>) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_commands<I>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = Command<S, M>>,
    {
        self.commands.extend(commands);
        self
    }

    pub fn into_parts(self) -> (Immutable<S>, Vec<Command<S, M>>) {
        (self.state, self.commands)
    }
}

impl<S, M> From<Immutable<S>> for Update<S, M> {
    fn from(state: Immutable<S>) -> Self {
        Self::new(state)
    }
}

impl<S: fmt::Debug, M> fmt::Debug for Update<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("state", &self.state)
            .field("commands", &self.commands.len())
            .finish()
    }
}
