//! Decision: the outcome of evaluating one command.

use campaign_ledger_core::Event;

use crate::rejection::Rejection;

/// Events to append, or rejections explaining why not.
///
/// Exactly one of the two lists is non-empty. Construct through
/// [`Decision::accept`] and [`Decision::reject`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub events: Vec<Event>,
    pub rejections: Vec<Rejection>,
}

impl Decision {
    /// An accepted decision emitting `event`.
    pub fn accept(event: Event) -> Self {
        Self {
            events: vec![event],
            rejections: Vec::new(),
        }
    }

    /// A rejected decision.
    pub fn reject(rejection: Rejection) -> Self {
        Self {
            events: Vec::new(),
            rejections: vec![rejection],
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.rejections.is_empty() && !self.events.is_empty()
    }

    /// The first rejection, if the command was rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejections.first()
    }

    /// Split into the accepted events or the first rejection.
    pub fn into_result(mut self) -> Result<Vec<Event>, Rejection> {
        if self.rejections.is_empty() {
            Ok(self.events)
        } else {
            Err(self.rejections.swap_remove(0))
        }
    }
}

impl From<Result<Event, Rejection>> for Decision {
    fn from(result: Result<Event, Rejection>) -> Self {
        match result {
            Ok(event) => Self::accept(event),
            Err(rejection) => Self::reject(rejection),
        }
    }
}
