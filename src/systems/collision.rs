//! Player collision: speculative horizontal probes and vertical resolution.
//!
//! Two entities collide when their [`BoxCollider`] rectangles overlap (fast
//! reject) *and* their sprite masks share an opaque pixel.
//!
//! - [`probe`] answers "would the player hit something if it moved `dx`?"
//!   without moving it. The controller uses it to gate walking.
//! - [`vertical_collision`] runs after the position was integrated: landing
//!   snaps the player's feet onto the entity, a head bump snaps its head
//!   under it. Every entity hit is recorded in [`TouchedEntities`].

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::entitykind::EntityKind;
use crate::components::mapposition::MapPosition;
use crate::components::mask::Mask;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::touched::TouchedEntities;

/// What the collision test needs to know about an entity.
#[derive(Clone, Copy)]
pub struct Body<'a> {
    pub pos: Vector2,
    pub collider: &'a BoxCollider,
    pub mask: &'a Mask,
}

impl<'a> Body<'a> {
    pub fn new(pos: Vector2, collider: &'a BoxCollider, sprite: &'a Sprite) -> Self {
        Self {
            pos,
            collider,
            mask: sprite.mask(),
        }
    }

    pub fn moved(self, dx: f32, dy: f32) -> Self {
        Self {
            pos: Vector2::new(self.pos.x + dx, self.pos.y + dy),
            ..self
        }
    }
}

/// Rectangle overlap followed by per-pixel mask intersection.
pub fn collides(a: &Body, b: &Body) -> bool {
    if !a.collider.overlaps(a.pos, b.collider, b.pos) {
        return false;
    }
    let (a_min, _) = a.collider.aabb(a.pos);
    let (b_min, _) = b.collider.aabb(b.pos);
    let dx = (b_min.x - a_min.x).round() as i32;
    let dy = (b_min.y - a_min.y).round() as i32;
    a.mask.overlaps(b.mask, dx, dy)
}

/// First entity the player would hit after moving `dx` horizontally.
///
/// The player is not moved; only the displaced copy is tested.
pub fn probe<'a, I>(player: Body, dx: f32, others: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Body<'a>)>,
{
    let moved = player.moved(dx, 0.0);
    others
        .into_iter()
        .find(|(_, other)| collides(&moved, other))
        .map(|(entity, _)| entity)
}

/// Resolve vertical contacts for the player after it moved this tick.
///
/// Landing and head-bump snapping depend on the direction the player was
/// moving at the start of the pass. All colliding entities are recorded.
pub fn vertical_collision(
    mut players: Query<(&mut Player, &mut MapPosition, &BoxCollider, &Sprite)>,
    others: Query<(Entity, &MapPosition, &BoxCollider, &Sprite), (With<EntityKind>, Without<Player>)>,
    mut touched: ResMut<TouchedEntities>,
) {
    let Ok((mut player, mut position, collider, sprite)) = players.single_mut() else {
        return;
    };
    let dy = player.velocity.y;

    for (entity, other_pos, other_collider, other_sprite) in others.iter() {
        let me = Body::new(position.pos, collider, sprite);
        let other = Body::new(other_pos.pos, other_collider, other_sprite);
        if !collides(&me, &other) {
            continue;
        }
        let (other_min, other_max) = other_collider.aabb(other_pos.pos);
        let (my_min, my_max) = collider.aabb(position.pos);
        let height = my_max.y - my_min.y;
        if dy > 0.0 {
            position.pos.y = other_min.y - height;
            player.landed();
        } else if dy < 0.0 {
            position.pos.y = other_max.y;
            player.hit_head();
        }
        touched.vertical.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap_alone_is_not_enough() {
        let big = BoxCollider::new(10.0, 10.0);
        let mut ring = Mask::empty(10, 10);
        ring.set(9, 9, true);
        let solid = Mask::filled(10, 10);

        let a = Body {
            pos: Vector2::new(0.0, 0.0),
            collider: &big,
            mask: &ring,
        };
        let b = Body {
            pos: Vector2::new(-5.0, -5.0),
            collider: &big,
            mask: &solid,
        };
        // Rectangles overlap on [0,5)x[0,5) but the only opaque pixel of `a` is (9,9).
        assert!(!collides(&a, &b));
        let c = Body {
            pos: Vector2::new(5.0, 5.0),
            ..b
        };
        assert!(collides(&a, &c));
    }

    #[test]
    fn probe_does_not_need_current_overlap() {
        let mut world = World::new();
        let wall_entity = world.spawn_empty().id();
        let collider = BoxCollider::new(10.0, 10.0);
        let mask = Mask::filled(10, 10);
        let player = Body {
            pos: Vector2::new(0.0, 0.0),
            collider: &collider,
            mask: &mask,
        };
        let wall = Body {
            pos: Vector2::new(15.0, 0.0),
            collider: &collider,
            mask: &mask,
        };
        assert_eq!(probe(player, 10.0, [(wall_entity, wall)]), Some(wall_entity));
        assert_eq!(probe(player, 5.0, [(wall_entity, wall)]), None);
        assert_eq!(probe(player, -10.0, [(wall_entity, wall)]), None);
    }
}
