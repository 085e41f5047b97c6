//! Axis-separated move-and-resolve against static block rectangles.
//!
//! A mover is displaced along one axis by its full proposed delta, then every
//! obstacle it now overlaps pushes it back so its leading edge sits on the
//! obstacle's near edge. Callers run the horizontal pass and the vertical pass
//! as two separate calls, never a diagonal move, so corners never snag.
//!
//! The test is discrete: a mover fast enough to jump clean over a thin
//! obstacle in one tick passes through it.
//!
//! The resolver only moves the rectangle. What happens to velocity is up to
//! the caller: the player zeroes the blocked axis, enemies keep theirs and
//! flip direction on a horizontal hit.

use smb_core::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Side of the moving rectangle that ran into something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisContact {
    /// Indices of every obstacle overlapped after the move.
    pub hits: Vec<usize>,
    /// Set when the mover was actually pushed back.
    pub blocked: Option<Side>,
}

impl AxisContact {
    pub fn collided(&self) -> bool {
        !self.hits.is_empty()
    }

    pub fn landed(&self) -> bool {
        self.blocked == Some(Side::Bottom)
    }

    pub fn bumped_head(&self) -> bool {
        self.blocked == Some(Side::Top)
    }

    pub fn blocked_horizontally(&self) -> bool {
        matches!(self.blocked, Some(Side::Left | Side::Right))
    }
}

/// Move `rect` by `delta` along `axis`, then resolve overlaps with `obstacles`.
///
/// A zero delta still reports overlaps but pushes nothing.
pub fn move_and_collide<'a, I>(rect: &mut Rect, axis: Axis, delta: f32, obstacles: I) -> AxisContact
where
    I: IntoIterator<Item = (usize, &'a Rect)>,
{
    match axis {
        Axis::Horizontal => rect.translate(delta, 0.0),
        Axis::Vertical => rect.translate(0.0, delta),
    }

    let mut contact = AxisContact::default();
    // Nearest obstacle edge in the direction of travel.
    let mut limit: Option<f32> = None;

    for (index, obstacle) in obstacles {
        if !rect.intersects(obstacle) {
            continue;
        }
        contact.hits.push(index);

        let edge = match (axis, delta > 0.0, delta < 0.0) {
            (Axis::Horizontal, true, _) => obstacle.left(),
            (Axis::Horizontal, _, true) => obstacle.right(),
            (Axis::Vertical, true, _) => obstacle.top(),
            (Axis::Vertical, _, true) => obstacle.bottom(),
            _ => continue,
        };
        limit = Some(match limit {
            None => edge,
            Some(current) if delta > 0.0 => current.min(edge),
            Some(current) => current.max(edge),
        });
    }

    if let Some(edge) = limit {
        contact.blocked = Some(match (axis, delta > 0.0) {
            (Axis::Horizontal, true) => {
                rect.set_right(edge);
                Side::Right
            }
            (Axis::Horizontal, false) => {
                rect.set_left(edge);
                Side::Left
            }
            (Axis::Vertical, true) => {
                rect.set_bottom(edge);
                Side::Bottom
            }
            (Axis::Vertical, false) => {
                rect.set_top(edge);
                Side::Top
            }
        });
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles(rects: &[Rect]) -> impl Iterator<Item = (usize, &Rect)> {
        rects.iter().enumerate()
    }

    #[test]
    fn rightward_move_snaps_to_obstacle_left_edge() {
        let walls = [Rect::new(100.0, 0.0, 32.0, 64.0)];
        let mut mover = Rect::new(60.0, 10.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Horizontal, 12.0, obstacles(&walls));
        assert_eq!(mover.right(), walls[0].left());
        assert_eq!(contact.blocked, Some(Side::Right));
        assert_eq!(contact.hits, vec![0]);
    }

    #[test]
    fn leftward_move_snaps_to_obstacle_right_edge() {
        let walls = [Rect::new(0.0, 0.0, 32.0, 64.0)];
        let mut mover = Rect::new(36.0, 10.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Horizontal, -8.0, obstacles(&walls));
        assert_eq!(mover.left(), walls[0].right());
        assert_eq!(contact.blocked, Some(Side::Left));
    }

    #[test]
    fn downward_move_lands_on_obstacle_top() {
        let floor = [Rect::new(0.0, 412.0, 320.0, 32.0)];
        let mut mover = Rect::new(40.0, 380.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Vertical, 5.0, obstacles(&floor));
        assert_eq!(mover.bottom(), 412.0);
        assert!(contact.landed());
    }

    #[test]
    fn upward_move_stops_under_obstacle_bottom() {
        let ceiling = [Rect::new(0.0, 200.0, 64.0, 32.0)];
        let mut mover = Rect::new(10.0, 236.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Vertical, -11.0, obstacles(&ceiling));
        assert_eq!(mover.top(), 232.0);
        assert!(contact.bumped_head());
    }

    #[test]
    fn edge_adjacent_obstacle_is_left_alone() {
        let walls = [Rect::new(100.0, 0.0, 32.0, 64.0)];
        let mut mover = Rect::new(68.0, 10.0, 32.0, 32.0);
        let before = mover;
        let contact = move_and_collide(&mut mover, Axis::Horizontal, 0.0, obstacles(&walls));
        assert_eq!(mover, before);
        assert!(!contact.collided());
        assert_eq!(contact.blocked, None);
    }

    #[test]
    fn nearest_of_several_obstacles_wins() {
        let walls = [
            Rect::new(110.0, 0.0, 32.0, 32.0),
            Rect::new(104.0, 20.0, 32.0, 32.0),
        ];
        let mut mover = Rect::new(70.0, 10.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Horizontal, 20.0, obstacles(&walls));
        assert_eq!(mover.right(), 104.0);
        assert_eq!(contact.hits.len(), 2);
    }

    #[test]
    fn fast_mover_tunnels_through_thin_obstacle() {
        let wall = [Rect::new(100.0, 0.0, 4.0, 64.0)];
        let mut mover = Rect::new(60.0, 10.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Horizontal, 60.0, obstacles(&wall));
        assert!(!contact.collided());
        assert_eq!(mover.left(), 120.0);
    }

    #[test]
    fn zero_delta_reports_overlap_without_pushing() {
        let walls = [Rect::new(0.0, 0.0, 32.0, 32.0)];
        let mut mover = Rect::new(16.0, 0.0, 32.0, 32.0);
        let contact = move_and_collide(&mut mover, Axis::Horizontal, 0.0, obstacles(&walls));
        assert!(contact.collided());
        assert_eq!(contact.blocked, None);
        assert_eq!(mover.left(), 16.0);
    }
}
