/// State of a form's submit button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl SubmitStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmitStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Button caption for the given idle label ("Sell", "Save Market", ...).
    pub fn button_label(&self, idle: &str) -> String {
        match self {
            SubmitStatus::Idle => idle.to_string(),
            SubmitStatus::Loading => "Submitting...".to_string(),
            SubmitStatus::Success => format!("{idle} ✓"),
            SubmitStatus::Error(_) => format!("Retry {}", idle.to_lowercase()),
        }
    }
}

/// Hands out submission tickets and remembers which one is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitGate {
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl SubmitGate {
    /// Returns a ticket, or `None` when another submission is still pending.
    pub fn open(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        Some(self.next_ticket)
    }

    /// Closes the gate if `ticket` is the pending one. Stale tickets return `false`.
    pub fn close(&mut self, ticket: u64) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn is_open(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_allows_one_submission_at_a_time() {
        let mut gate = SubmitGate::default();
        let first = gate.open().expect("first ticket");
        assert_eq!(gate.open(), None);
        assert!(gate.close(first));
        let second = gate.open().expect("second ticket");
        assert_ne!(first, second);
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let mut gate = SubmitGate::default();
        let stale = gate.open().expect("ticket");
        assert!(gate.close(stale));
        let current = gate.open().expect("next ticket");
        assert!(!gate.close(stale));
        assert!(gate.is_open());
        assert!(gate.close(current));
    }

    #[test]
    fn labels_follow_status() {
        assert_eq!(SubmitStatus::Idle.button_label("Sell"), "Sell");
        assert_eq!(SubmitStatus::Loading.button_label("Sell"), "Submitting...");
        assert_eq!(
            SubmitStatus::Error("offline".into()).button_label("Sell"),
            "Retry sell"
        );
        assert_eq!(SubmitStatus::Error("offline".into()).error(), Some("offline"));
    }
}
