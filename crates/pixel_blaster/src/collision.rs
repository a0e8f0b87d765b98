//! Which entities can touch, and the per-tick contact query
//!
//! Only two kinds of pair matter: a projectile hitting an asteroid and the
//! ship hitting an asteroid. The layer masks keep everything else out of
//! the narrow phase.
//!
//! Contacts are resolved in arena order. A projectile that overlaps
//! several asteroids destroys the first one in that order and nothing
//! else; an asteroid consumed by one projectile cannot be hit by another
//! in the same tick.

use crate::entity::{Entity, EntityId, EntityKind};
use pixel_engine::foundation::math::Bounds2;
use pixel_engine::physics::{BoundingCircle, Collider, CollisionLayers, CollisionSystem};
use slotmap::SlotMap;
use std::collections::HashSet;

/// Layer and mask for an entity, `None` if it cannot collide right now
pub fn layers(entity: &Entity) -> Option<(CollisionLayers, CollisionLayers)> {
    if !entity.is_collidable() {
        return None;
    }
    Some(match entity.kind {
        EntityKind::Ship(_) => (CollisionLayers::PLAYER, CollisionLayers::ENEMY),
        EntityKind::Asteroid(_) => (
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER | CollisionLayers::PROJECTILE,
        ),
        EntityKind::Projectile(_) => (CollisionLayers::PROJECTILE, CollisionLayers::ENEMY),
    })
}

/// A collision the world has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A projectile hit an asteroid
    ProjectileHit {
        /// The projectile
        projectile: EntityId,
        /// The asteroid it hit
        asteroid: EntityId,
    },
    /// The ship hit an asteroid
    ShipHit {
        /// The ship
        ship: EntityId,
        /// The asteroid it hit
        asteroid: EntityId,
    },
}

/// Find this tick's contacts between live entities
pub fn find_contacts(entities: &SlotMap<EntityId, Entity>, bounds: Bounds2) -> Vec<Contact> {
    let mut system = CollisionSystem::new(bounds);
    for (id, entity) in entities {
        if let Some((layer, mask)) = layers(entity) {
            system.register(Collider {
                key: id,
                shape: BoundingCircle::new(entity.position, entity.radius),
                layer,
                mask,
            });
        }
    }

    let mut consumed = HashSet::new();
    let mut contacts = Vec::new();
    for pair in system.detect() {
        if consumed.contains(&pair.first) || consumed.contains(&pair.second) {
            continue;
        }
        let (Some(a), Some(b)) = (entities.get(pair.first), entities.get(pair.second)) else {
            continue;
        };
        let (other, asteroid) = match (a.is_asteroid(), b.is_asteroid()) {
            (true, false) => (pair.second, pair.first),
            (false, true) => (pair.first, pair.second),
            _ => continue,
        };

        let contact = match entities[other].kind {
            EntityKind::Projectile(_) => {
                consumed.insert(asteroid);
                Contact::ProjectileHit {
                    projectile: other,
                    asteroid,
                }
            }
            // The asteroid survives a ship crash
            EntityKind::Ship(_) => Contact::ShipHit { ship: other, asteroid },
            EntityKind::Asteroid(_) => continue,
        };
        consumed.insert(other);
        log::trace!("Contact: {:?}", contact);
        contacts.push(contact);
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asteroid::{Asteroid, AsteroidTier};
    use crate::config::GameplayConfig;
    use pixel_engine::foundation::math::Vec2;

    fn rock(entities: &mut SlotMap<EntityId, Entity>, x: f32, y: f32) -> EntityId {
        let asteroid = Asteroid::plain(AsteroidTier::Large);
        entities.insert(Entity::asteroid(asteroid, Vec2::new(x, y), Vec2::zeros()))
    }

    fn bounds() -> Bounds2 {
        Bounds2::new(192.0, 145.0)
    }

    #[test]
    fn test_layers_admit_only_tested_pairs() {
        let config = GameplayConfig::default();
        let ship = Entity::ship(Vec2::zeros(), &config);
        let shot = Entity::projectile(Vec2::zeros(), 0.0, &config);
        let rock =
            Entity::asteroid(Asteroid::plain(AsteroidTier::Small), Vec2::zeros(), Vec2::zeros());

        let (ship_layer, ship_mask) = layers(&ship).unwrap();
        let (shot_layer, shot_mask) = layers(&shot).unwrap();
        let (rock_layer, rock_mask) = layers(&rock).unwrap();

        assert!(CollisionLayers::should_collide(ship_layer, ship_mask, rock_layer, rock_mask));
        assert!(CollisionLayers::should_collide(shot_layer, shot_mask, rock_layer, rock_mask));
        assert!(!CollisionLayers::should_collide(ship_layer, ship_mask, shot_layer, shot_mask));
        assert!(!CollisionLayers::should_collide(rock_layer, rock_mask, rock_layer, rock_mask));
    }

    #[test]
    fn test_invulnerable_ship_has_no_layers() {
        let config = GameplayConfig::default();
        let mut ship = Entity::ship(Vec2::zeros(), &config);
        ship.as_ship_mut().unwrap().respawn(1.0);
        assert!(layers(&ship).is_none());
    }

    #[test]
    fn test_projectile_takes_first_asteroid_in_order() {
        let config = GameplayConfig::default();
        let mut entities = SlotMap::with_key();
        let first = rock(&mut entities, 50.0, 50.0);
        let shot = entities.insert(Entity::projectile(Vec2::new(52.0, 50.0), 0.0, &config));
        let _second = rock(&mut entities, 54.0, 50.0);

        let contacts = find_contacts(&entities, bounds());
        assert_eq!(
            contacts,
            vec![Contact::ProjectileHit {
                projectile: shot,
                asteroid: first
            }]
        );
    }

    #[test]
    fn test_asteroid_consumed_once() {
        let config = GameplayConfig::default();
        let mut entities = SlotMap::with_key();
        let target = rock(&mut entities, 50.0, 50.0);
        let a = entities.insert(Entity::projectile(Vec2::new(51.0, 50.0), 0.0, &config));
        let _b = entities.insert(Entity::projectile(Vec2::new(49.0, 50.0), 0.0, &config));

        let contacts = find_contacts(&entities, bounds());
        assert_eq!(
            contacts,
            vec![Contact::ProjectileHit {
                projectile: a,
                asteroid: target
            }]
        );
    }

    #[test]
    fn test_ship_and_projectile_share_asteroid() {
        let config = GameplayConfig::default();
        let mut entities = SlotMap::with_key();
        let target = rock(&mut entities, 50.0, 50.0);
        let ship = entities.insert(Entity::ship(Vec2::new(55.0, 50.0), &config));
        let shot = entities.insert(Entity::projectile(Vec2::new(45.0, 50.0), 0.0, &config));

        let contacts = find_contacts(&entities, bounds());
        assert_eq!(
            contacts,
            vec![
                Contact::ShipHit { ship, asteroid: target },
                Contact::ProjectileHit {
                    projectile: shot,
                    asteroid: target
                },
            ]
        );
    }

    #[test]
    fn test_contact_across_wrap() {
        let config = GameplayConfig::default();
        let mut entities = SlotMap::with_key();
        rock(&mut entities, 1.0, 70.0);
        entities.insert(Entity::projectile(Vec2::new(191.0, 70.0), 0.0, &config));
        assert_eq!(find_contacts(&entities, bounds()).len(), 1);
    }
}
