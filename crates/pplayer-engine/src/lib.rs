//! pplayer-engine: Headless core of the progress player
//!
//! This crate provides everything that is not drawing:
//! - Mark model and evenly spaced layout
//! - Player configuration
//! - Timeline model with play/pause/seek and the advance schedule
//! - Track geometry and pointer interaction

pub mod config;
pub mod geometry;
pub mod mark;
pub mod player;
pub mod pointer;

// Re-export commonly used types
pub use config::{ConfigError, Dimension, LabelPosition, PlayerConfig};
pub use geometry::{hit_zones, zone_at, HitZone, Placement, TrackBounds};
pub use mark::{evenly_spaced_percent, Mark, MarkSet, MarkValue};
pub use player::{
    HandleVisual, Player, PlayerEvent, ScheduledAdvance, Transition, CLICK_TRANSITION,
    SELECT_TRANSITION,
};
pub use pointer::{PointerController, Tooltip};
