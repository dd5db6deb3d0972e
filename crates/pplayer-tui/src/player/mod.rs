//! Player module: terminal rendering of a progress player.
//!
//! This module provides:
//! - [`PlayerLayout`] - Button/track/label/tooltip areas and track bounds
//! - [`HandleAnimator`] - Eases the handle along engine transitions
//! - [`ProgressPlayerWidget`] - Widget drawing the player's visual state

mod animation;
mod layout;
mod widget;

pub use animation::HandleAnimator;
pub use layout::{label_spans, percent_to_column, LabelSpan, PlayerLayout, BUTTON_WIDTH};
pub use widget::ProgressPlayerWidget;
