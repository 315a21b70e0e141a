//! Grounded tracking for rigid-body controllers.

use bevy::prelude::*;

/// Number of colliders currently touching the body.
///
/// Standing across two overlapping colliders yields a count of 2, so leaving
/// one of them keeps the body grounded.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroundContacts {
    count: u32,
}

impl GroundContacts {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_grounded(&self) -> bool {
        self.count > 0
    }

    /// A contact started.
    pub fn begin(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// A contact ended. An end with no open contact is ignored.
    pub fn end(&mut self) {
        if self.count == 0 {
            warn!("GroundContacts: contact ended with no open contacts; ignoring");
            return;
        }
        self.count -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_end_round_trip() {
        for n in 0..20 {
            let mut contacts = GroundContacts::default();
            for _ in 0..n {
                contacts.begin();
            }
            assert_eq!(contacts.is_grounded(), n > 0);
            for _ in 0..n {
                contacts.end();
            }
            assert_eq!(contacts.count(), 0);
            assert!(!contacts.is_grounded());
        }
    }

    #[test]
    fn test_interleaved_round_trip() {
        // true = begin, false = end; never more ends than begins so far.
        let events = [true, true, false, true, false, true, true, false, false, false];
        let mut contacts = GroundContacts::default();
        let mut open = 0u32;

        for begin in events {
            if begin {
                contacts.begin();
                open += 1;
            } else {
                contacts.end();
                open -= 1;
            }
            assert_eq!(contacts.count(), open);
            assert_eq!(contacts.is_grounded(), open > 0);
        }
        assert!(!contacts.is_grounded());
    }

    #[test]
    fn test_overlapping_colliders_stay_grounded() {
        let mut contacts = GroundContacts::default();
        contacts.begin();
        contacts.begin();
        contacts.end();
        assert!(contacts.is_grounded());
    }

    #[test]
    fn test_unmatched_end_never_goes_negative() {
        let mut contacts = GroundContacts::default();
        contacts.end();
        contacts.end();
        assert_eq!(contacts.count(), 0);

        contacts.begin();
        assert!(contacts.is_grounded());
    }
}
