//! Pointer controller: drag, click and hover on the track.
//!
//! Converts raw horizontal coordinates inside the track's bounding box into
//! seeks on a [`Player`], and tracks the hover tooltip.

use tracing::trace;

use crate::geometry::{hit_zones, zone_at, Placement, TrackBounds};
use crate::player::{Player, Transition};

/// Floating label shown while hovering the track.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Label of the hovered zone's mark.
    pub text: String,
    /// Horizontal offset of the pointer from the track's left edge.
    pub offset: f64,
}

/// Pointer interaction state for one track.
#[derive(Debug, Default)]
pub struct PointerController {
    bounds: TrackBounds,
    dragging: bool,
    show_tooltip: bool,
    tooltip: Option<Tooltip>,
}

impl PointerController {
    /// Create a controller. Hover tooltips are only tracked when enabled.
    pub fn new(show_tooltip: bool) -> Self {
        Self {
            show_tooltip,
            ..Self::default()
        }
    }

    /// Update the measured track bounds.
    pub fn set_bounds(&mut self, bounds: TrackBounds) {
        self.bounds = bounds;
    }

    /// Last measured track bounds.
    pub fn bounds(&self) -> TrackBounds {
        self.bounds
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current tooltip, if any.
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Pointer pressed on the seek handle: start dragging.
    pub fn press_handle(&mut self) {
        self.dragging = true;
    }

    /// Pointer released anywhere: stop dragging.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Pointer moved anywhere on screen.
    ///
    /// Only acts while dragging. Outside the track the handle is pinned to
    /// the nearest edge; inside, the zone's mark is selected instantly.
    /// Returns true if the player changed position.
    pub fn pointer_move(&mut self, x: f64, player: &mut Player) -> bool {
        if !self.dragging {
            return false;
        }
        match self.bounds.place(x) {
            None => {
                trace!(x, "Track not measured; drag ignored");
                false
            }
            Some(Placement::Before) => {
                player.pin_handle(0.0);
                false
            }
            Some(Placement::After) => {
                player.pin_handle(100.0);
                false
            }
            Some(Placement::Inside(percent)) => {
                let Some(target) = zone_target(percent, player) else {
                    return false;
                };
                if player.seek(target, Transition::Instant) {
                    true
                } else {
                    player.restore_handle(Transition::Instant);
                    false
                }
            }
        }
    }

    /// Single click on the track: seek to the zone's mark with the click
    /// transition. Returns true if the player changed position.
    pub fn click(&mut self, x: f64, player: &mut Player) -> bool {
        let Some(Placement::Inside(percent)) = self.bounds.place(x) else {
            return false;
        };
        zone_target(percent, player)
            .is_some_and(|target| player.seek(target, Transition::CLICK))
    }

    /// Pointer hovered at `(x, y)`: show or hide the tooltip.
    pub fn hover(&mut self, x: f64, y: f64, player: &Player) {
        if !self.show_tooltip {
            return;
        }
        self.tooltip = None;
        if !self.bounds.contains(x, y) {
            return;
        }
        let Some(Placement::Inside(percent)) = self.bounds.place(x) else {
            return;
        };
        let zones = hit_zones(player.marks());
        if let Some(mark) = zone_at(&zones, percent).and_then(|i| player.marks().get(i)) {
            self.tooltip = Some(Tooltip {
                text: mark.label.clone(),
                offset: x - self.bounds.x,
            });
        }
    }

    /// Pointer left the track: hide the tooltip.
    pub fn leave(&mut self) {
        self.tooltip = None;
    }
}

/// Percent of the mark whose zone contains `percent`.
fn zone_target(percent: f64, player: &Player) -> Option<f64> {
    let zones = hit_zones(player.marks());
    zone_at(&zones, percent)
        .and_then(|i| player.marks().get(i))
        .map(|m| m.percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::mark::Mark;
    use crate::player::PlayerEvent;

    /// Track of 100 units starting at x=10, so x - 10 is the percent.
    fn setup(show_tooltip: bool) -> (PointerController, Player) {
        let config = PlayerConfig::with_marks(vec![
            Mark::new(0.0, "zero", 1.0),
            Mark::new(20.0, "twenty", 1.0),
            Mark::new(100.0, "hundred", 1.0),
        ]);
        let mut pointer = PointerController::new(show_tooltip);
        pointer.set_bounds(TrackBounds::new(10.0, 5.0, 100.0, 2.0));
        (pointer, Player::new(&config))
    }

    fn trigger_count(player: &mut Player) -> usize {
        player
            .take_events()
            .iter()
            .filter(|e| matches!(e, PlayerEvent::Trigger(_)))
            .count()
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut pointer, mut player) = setup(false);
        assert!(!pointer.pointer_move(90.0, &mut player));
        assert_eq!(player.current_percent(), 0.0);
    }

    #[test]
    fn test_drag_selects_zone_instantly() {
        let (mut pointer, mut player) = setup(false);
        pointer.press_handle();
        assert!(pointer.pointer_move(35.0, &mut player));
        assert_eq!(player.current_percent(), 20.0);
        assert_eq!(player.handle().transition, Transition::Instant);

        // Still inside the same zone: no new trigger.
        assert!(!pointer.pointer_move(40.0, &mut player));
        assert_eq!(trigger_count(&mut player), 1);

        pointer.release();
        assert!(!pointer.is_dragging());
        assert!(!pointer.pointer_move(105.0, &mut player));
        assert_eq!(player.current_percent(), 20.0);
    }

    #[test]
    fn test_drag_midpoint_tie() {
        let (mut pointer, mut player) = setup(false);
        player.select_mark(100.0);
        pointer.press_handle();
        pointer.pointer_move(20.0, &mut player);
        assert_eq!(player.current_percent(), 0.0);
    }

    #[test]
    fn test_drag_outside_pins_handle() {
        let (mut pointer, mut player) = setup(false);
        player.select_mark(20.0);
        player.take_events();
        pointer.press_handle();

        pointer.pointer_move(500.0, &mut player);
        assert_eq!(player.handle().percent, 100.0);
        assert_eq!(player.handle().transition, Transition::Instant);
        assert_eq!(player.current_percent(), 20.0);

        pointer.pointer_move(-3.0, &mut player);
        assert_eq!(player.handle().percent, 0.0);

        // Back into the active zone restores the handle without triggering.
        pointer.pointer_move(32.0, &mut player);
        assert_eq!(player.handle().percent, 20.0);
        assert_eq!(trigger_count(&mut player), 0);
    }

    #[test]
    fn test_drag_outside_with_no_marks_keeps_handle() {
        let mut pointer = PointerController::new(false);
        pointer.set_bounds(TrackBounds::new(10.0, 5.0, 100.0, 2.0));
        let mut player = Player::new(&PlayerConfig::default());
        pointer.press_handle();

        pointer.pointer_move(500.0, &mut player);
        assert_eq!(player.handle().percent, 0.0);
        pointer.pointer_move(-3.0, &mut player);
        assert_eq!(player.handle().percent, 0.0);
        assert!(player.take_events().is_empty());
    }

    #[test]
    fn test_drag_during_playback_pauses() {
        let (mut pointer, mut player) = setup(false);
        player.play();
        player.take_events();
        pointer.press_handle();
        pointer.pointer_move(109.0, &mut player);
        assert!(!player.is_playing());
        assert_eq!(player.pending_advances(), 0);
        assert_eq!(player.take_events()[0], PlayerEvent::Pause);
    }

    #[test]
    fn test_click_uses_click_transition() {
        let (mut pointer, mut player) = setup(false);
        assert!(pointer.click(80.0, &mut player));
        assert_eq!(player.current_percent(), 100.0);
        assert_eq!(player.handle().transition, Transition::CLICK);
        assert!(!pointer.is_dragging());

        assert!(!pointer.click(2.0, &mut player));
        assert!(!pointer.click(80.0, &mut player));
    }

    #[test]
    fn test_unmeasured_bounds_skip() {
        let (_, mut player) = setup(false);
        let mut pointer = PointerController::new(true);
        pointer.press_handle();
        assert!(!pointer.pointer_move(50.0, &mut player));
        assert!(!pointer.click(50.0, &mut player));
        pointer.hover(50.0, 0.0, &player);
        assert!(pointer.tooltip().is_none());
        assert_eq!(player.handle().percent, 0.0);
    }

    #[test]
    fn test_hover_tooltip() {
        let (mut pointer, player) = setup(true);
        pointer.hover(18.0, 6.0, &player);
        assert_eq!(
            pointer.tooltip(),
            Some(&Tooltip {
                text: "zero".into(),
                offset: 8.0
            })
        );

        pointer.hover(31.0, 6.0, &player);
        assert_eq!(pointer.tooltip().map(|t| t.text.as_str()), Some("twenty"));

        // Outside the box vertically.
        pointer.hover(31.0, 20.0, &player);
        assert!(pointer.tooltip().is_none());

        pointer.hover(31.0, 6.0, &player);
        pointer.leave();
        assert!(pointer.tooltip().is_none());
    }

    #[test]
    fn test_hover_disabled() {
        let (mut pointer, player) = setup(false);
        pointer.hover(25.0, 6.0, &player);
        assert!(pointer.tooltip().is_none());
    }

    #[test]
    fn test_hover_independent_of_drag() {
        let (mut pointer, mut player) = setup(true);
        pointer.press_handle();
        pointer.pointer_move(90.0, &mut player);
        pointer.hover(90.0, 6.0, &player);
        assert_eq!(pointer.tooltip().map(|t| t.text.as_str()), Some("hundred"));
    }
}
