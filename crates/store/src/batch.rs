//! Pipelined command batches.

use crate::command::Command;

/// Buffered group of commands submitted to the store in one round trip.
///
/// A batch is a pipeline, not a transaction: commands are delivered in
/// enqueue order and produce one reply each, but there is no rollback,
/// and batches from different owners are not mutually isolated.
/// `enqueue` answers the slot the command's reply will occupy in the
/// reply vector returned by [`crate::Store::execute`].
#[derive(Debug, Default)]
pub struct Batch {
    commands: Vec<Command>,
}

impl Batch {
    /// Start an empty batch.
    pub fn new() -> Self {
        Batch::default()
    }

    /// Buffer a command, returning its reply slot.
    pub fn enqueue(&mut self, command: Command) -> usize {
        self.commands.push(command);
        self.commands.len() - 1
    }

    /// Number of buffered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been enqueued.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The buffered commands, in enqueue order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consume the batch, yielding its commands for execution.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
