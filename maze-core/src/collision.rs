//! Per-axis wall clamping and contact tests.
//!
//! All functions work on the world displacement `delta`: the player never
//! moves on screen, so "the player walks right" is "every wall shifts left".

use embedded_graphics::prelude::Point;

use crate::TILE;
use crate::geometry::Hitbox;
use crate::sprite::Sprite;

/// Pixels shaved off each side of the player when testing against walls, so
/// that standing flush against a wall is not a collision.
pub const PLAYER_WALL_INSET: i32 = 1;
/// Pixels shaved off the left and right of an enemy.
pub const ENEMY_SIDE_INSET: i32 = 4;

/// Delta that leaves `wall` exactly touching the player along one axis.
///
/// `delta` must be non-zero; its sign picks which side of the player the
/// wall ends up on.
pub fn adjacent_delta(player: i32, wall: i32, delta: i32) -> i32 {
    (player - wall) - TILE * delta.signum()
}

/// Clamps `delta` against every wall, one axis at a time.
///
/// Walls are visited in order and each one sees the delta as already clamped
/// by the walls before it. The result is therefore the composition of the
/// clamps in wall order, which is not always the smallest of them.
pub fn clamp_to_walls<'a>(
    player: Point,
    walls: impl IntoIterator<Item = &'a Sprite>,
    delta: Point,
) -> Point {
    let body = Hitbox::tile(player).inset(PLAYER_WALL_INSET, PLAYER_WALL_INSET);
    let mut delta = delta;
    for wall in walls {
        let pos = wall.position();
        if delta.x != 0 && body.overlaps(&wall.hitbox().shifted(Point::new(delta.x, 0))) {
            let clamped = adjacent_delta(player.x, pos.x, delta.x);
            log::debug!("wall ({}, {}) clamps dx {} -> {}", pos.x, pos.y, delta.x, clamped);
            delta.x = clamped;
        }
        if delta.y != 0 && body.overlaps(&wall.hitbox().shifted(Point::new(0, delta.y))) {
            let clamped = adjacent_delta(player.y, pos.y, delta.y);
            log::debug!("wall ({}, {}) clamps dy {} -> {}", pos.x, pos.y, delta.y, clamped);
            delta.y = clamped;
        }
    }
    delta
}

/// True when the narrowed enemy box, shifted by `delta`, overlaps the player.
pub fn touches_enemy(player: Point, enemy: &Sprite, delta: Point) -> bool {
    let reach = enemy.hitbox().inset(ENEMY_SIDE_INSET, 0).shifted(delta);
    Hitbox::tile(player).overlaps(&reach)
}

/// True when the goal, shifted horizontally by `delta.x`, overlaps the player.
///
/// Only the horizontal part of the delta is applied.
pub fn touches_goal(player: Point, goal: &Sprite, delta: Point) -> bool {
    let reach = goal.hitbox().shifted(Point::new(delta.x, 0));
    Hitbox::tile(player).overlaps(&reach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAZE_WALL_FRAME;

    const PLAYER: Point = Point::new(72, 56);

    fn wall(x: i32, y: i32) -> Sprite {
        Sprite::new(MAZE_WALL_FRAME, x, y)
    }

    fn enemy(x: i32, y: i32) -> Sprite {
        Sprite::new(crate::ENEMY_FRAME, x, y)
    }

    #[test]
    fn flush_wall_stops_movement() {
        let walls = [wall(88, 56)];
        let delta = clamp_to_walls(PLAYER, &walls, Point::new(-6, 0));
        assert_eq!(delta, Point::new(0, 0));
    }

    #[test]
    fn nearby_wall_shortens_the_step() {
        // 4 px gap to the right, 3 px gap above
        let walls = [wall(92, 56), wall(72, 37)];
        let delta = clamp_to_walls(PLAYER, &walls, Point::new(-6, 6));
        assert_eq!(delta, Point::new(-4, 3));
    }

    #[test]
    fn wall_on_the_left_clamps_positive_dx() {
        let walls = [wall(54, 60)];
        let delta = clamp_to_walls(PLAYER, &walls, Point::new(6, 0));
        assert_eq!(delta, Point::new(2, 0));
        assert!(!Hitbox::tile(PLAYER)
            .inset(1, 1)
            .overlaps(&walls[0].hitbox().shifted(delta)));
    }

    #[test]
    fn wall_in_another_row_is_ignored() {
        let walls = [wall(88, 72)];
        let delta = clamp_to_walls(PLAYER, &walls, Point::new(-6, 0));
        assert_eq!(delta, Point::new(-6, 0));
    }

    #[test]
    fn zero_delta_is_never_clamped() {
        // overlaps the player already; a clamp would produce a non-zero delta
        let walls = [wall(80, 56)];
        assert_eq!(clamp_to_walls(PLAYER, &walls, Point::zero()), Point::zero());
        assert_eq!(clamp_to_walls(PLAYER, &walls, Point::new(-6, 0)), Point::new(8, 0));

        // a clear path on one axis leaves the other axis alone
        let walls = [wall(88, 56)];
        assert_eq!(clamp_to_walls(PLAYER, &walls, Point::new(0, -6)), Point::new(0, -6));
    }

    #[test]
    fn clamps_compose_in_wall_order() {
        let flush = wall(88, 56);
        let embedded = wall(80, 56);

        // flush first: dx drops to 0 and the second wall is never tested
        assert_eq!(
            clamp_to_walls(PLAYER, &[flush, embedded], Point::new(-6, 0)),
            Point::new(0, 0)
        );
        // embedded first: its clamp flips dx to +8, which clears the flush wall
        assert_eq!(
            clamp_to_walls(PLAYER, &[embedded, flush], Point::new(-6, 0)),
            Point::new(8, 0)
        );
    }

    #[test]
    fn later_walls_tighten_an_earlier_clamp() {
        let walls = [wall(92, 56), wall(90, 56)];
        assert_eq!(
            clamp_to_walls(PLAYER, &walls, Point::new(-6, 0)),
            Point::new(-2, 0)
        );
    }

    #[test]
    fn clamped_axis_never_overlaps() {
        for gap in 0..8 {
            for &(dir, wall_pos) in &[
                (Point::new(-6, 0), Point::new(88 + gap, 56)),
                (Point::new(6, 0), Point::new(56 - gap, 56)),
                (Point::new(0, -6), Point::new(72, 72 + gap)),
                (Point::new(0, 6), Point::new(72, 40 - gap)),
            ] {
                let w = wall(wall_pos.x, wall_pos.y);
                let delta = clamp_to_walls(PLAYER, &[w], dir);
                let body = Hitbox::tile(PLAYER).inset(1, 1);
                assert!(
                    !body.overlaps(&w.hitbox().shifted(delta)),
                    "gap {gap} dir {dir:?} delta {delta:?}"
                );
            }
        }
    }

    #[test]
    fn enemy_on_top_of_player_is_contact() {
        let player = Point::new(200, 200);
        assert!(touches_enemy(player, &enemy(200, 200), Point::zero()));
    }

    #[test]
    fn enemy_side_margin_is_harmless() {
        let player = Point::new(200, 200);
        // full boxes overlap by 3 px on either side, narrowed boxes are clear
        assert!(!touches_enemy(player, &enemy(213, 200), Point::zero()));
        assert!(!touches_enemy(player, &enemy(187, 200), Point::zero()));
    }

    #[test]
    fn narrowed_enemy_touching_an_edge_is_contact() {
        let player = Point::new(200, 200);
        assert!(touches_enemy(player, &enemy(212, 200), Point::zero()));
        assert!(touches_enemy(player, &enemy(188, 200), Point::zero()));
        assert!(touches_enemy(player, &enemy(211, 200), Point::zero()));
    }

    #[test]
    fn enemy_height_is_not_narrowed() {
        let player = Point::new(200, 200);
        assert!(touches_enemy(player, &enemy(200, 216), Point::zero()));
        assert!(!touches_enemy(player, &enemy(200, 217), Point::zero()));
        // moving down brings it into reach
        assert!(touches_enemy(player, &enemy(200, 222), Point::new(0, -6)));
        assert!(!touches_enemy(player, &enemy(200, 223), Point::new(0, -6)));
    }

    #[test]
    fn goal_ignores_vertical_delta() {
        let goal = Sprite::new(crate::GOAL_FRAME, 72, 73);
        assert!(!touches_goal(PLAYER, &goal, Point::new(0, -6)));
        let beside = Sprite::new(crate::GOAL_FRAME, 94, 56);
        assert!(touches_goal(PLAYER, &beside, Point::new(-6, 0)));
        assert!(touches_goal(PLAYER, &Sprite::new(crate::GOAL_FRAME, 72, 56), Point::zero()));
    }

    #[test]
    fn goal_touching_the_side_is_reached() {
        let beside = Sprite::new(crate::GOAL_FRAME, 88, 56);
        assert!(touches_goal(PLAYER, &beside, Point::zero()));
        let gap = Sprite::new(crate::GOAL_FRAME, 89, 56);
        assert!(!touches_goal(PLAYER, &gap, Point::zero()));
    }
}
