//! Feeds rapier collision events into [`GroundContacts`].

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use motion::GroundContacts;

/// Count contacts for every body that tracks them.
///
/// Every solid contact counts, walls included. Sensors are skipped on both
/// start and stop so the counter stays paired.
pub fn track_ground_contacts(
    mut collisions: MessageReader<CollisionEvent>,
    mut bodies: Query<(&mut GroundContacts, &Name)>,
) {
    for event in collisions.read() {
        let (a, b, started) = match event {
            CollisionEvent::Started(a, b, flags) => {
                if flags.contains(CollisionEventFlags::SENSOR) {
                    continue;
                }
                (*a, *b, true)
            }
            CollisionEvent::Stopped(a, b, flags) => {
                if flags.contains(CollisionEventFlags::SENSOR) {
                    continue;
                }
                (*a, *b, false)
            }
        };

        for entity in [a, b] {
            let Ok((mut contacts, name)) = bodies.get_mut(entity) else {
                continue;
            };

            let was_grounded = contacts.is_grounded();
            if started {
                contacts.begin();
            } else {
                contacts.end();
            }

            if was_grounded != contacts.is_grounded() {
                debug!(
                    "{} {} (contacts: {})",
                    name,
                    if contacts.is_grounded() { "landed" } else { "left the ground" },
                    contacts.count()
                );
            }
        }
    }
}
