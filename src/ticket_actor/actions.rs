//! Custom actions for the Ticket actor.

/// Ticket-specific operations beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    /// Assigns a code if the ticket has none. Returns the ticket's code either way.
    IssueCode,
}
