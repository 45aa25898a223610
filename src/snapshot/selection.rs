//! Pending comparison selection.
//!
//! While a comparison is in flight the consumer may keep changing its mind
//! about the second country. Only the most recent request matters: earlier
//! pending targets are superseded (never queued), and results computed for a
//! superseded request are discarded when they arrive.

/// Identifies one selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    target: String,
}

impl SelectionTicket {
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// What the caller should do after `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The engine is not ready; the target is parked until `mark_ready`.
    Deferred,
    /// Start computing for this ticket now.
    Run(SelectionTicket),
}

#[derive(Debug, Clone, Default)]
pub struct PendingSelection {
    generation: u64,
    ready: bool,
    pending: Option<String>,
}

impl PendingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new target, superseding every earlier one.
    pub fn request(&mut self, target: impl Into<String>) -> Dispatch {
        self.generation += 1;
        let target = target.into();
        if self.ready {
            self.pending = None;
            Dispatch::Run(self.ticket(target))
        } else {
            self.pending = Some(target);
            Dispatch::Deferred
        }
    }

    /// The engine became ready: hand out the last parked target, if any.
    pub fn mark_ready(&mut self) -> Option<SelectionTicket> {
        self.ready = true;
        let target = self.pending.take()?;
        Some(self.ticket(target))
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Whether `ticket` is still the latest request.
    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Keep `result` only if it belongs to the latest request.
    pub fn accept<T>(&self, ticket: &SelectionTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }

    fn ticket(&self, target: String) -> SelectionTicket {
        SelectionTicket {
            generation: self.generation,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_parked_target_runs() {
        let mut sel = PendingSelection::new();
        assert_eq!(sel.request("FRA"), Dispatch::Deferred);
        assert_eq!(sel.request("DEU"), Dispatch::Deferred);
        assert_eq!(sel.pending(), Some("DEU"));

        let ticket = sel.mark_ready().unwrap();
        assert_eq!(ticket.target(), "DEU");
        assert_eq!(sel.accept(&ticket, 1), Some(1));
        assert!(sel.mark_ready().is_none());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut sel = PendingSelection::new();
        sel.mark_ready();
        let Dispatch::Run(first) = sel.request("FRA") else {
            panic!("expected run");
        };
        let Dispatch::Run(second) = sel.request("ITA") else {
            panic!("expected run");
        };
        assert_eq!(sel.accept(&first, "fra-result"), None);
        assert_eq!(sel.accept(&second, "ita-result"), Some("ita-result"));
    }
}
