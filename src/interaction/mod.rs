use serde::{Deserialize, Serialize};

use crate::core::{BarHit, Orientation, ScreenPoint};

/// Pointer input in surface coordinates, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Click { x: f64, y: f64 },
}

impl PointerEvent {
    #[must_use]
    pub fn position(self) -> Option<ScreenPoint> {
        match self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Click { x, y } => {
                Some(ScreenPoint::new(x, y))
            }
            Self::Up | Self::Leave => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    Idle,
    /// Pointer over a band with no button held.
    Hovering { category: String },
    /// Button held; edits stay pinned to `category`.
    Dragging { category: String },
}

impl InteractionState {
    #[must_use]
    pub fn dragging_category(&self) -> Option<&str> {
        match self {
            Self::Dragging { category } => Some(category),
            Self::Idle | Self::Hovering { .. } => None,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    Crosshair,
    NsResize,
    EwResize,
}

/// What the highlight layer should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightChange {
    Unchanged,
    Clear,
    /// Preview `hit` at its would-be value.
    Show(BarHit),
}

/// Outcome of one pointer event on a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarReaction {
    /// Accepted edit, still unconstrained.
    pub edit: Option<BarHit>,
    pub highlight: HighlightChange,
}

impl BarReaction {
    const IGNORED: Self = Self {
        edit: None,
        highlight: HighlightChange::Unchanged,
    };
}

/// Bar-chart pointer state machine.
///
/// Pure with respect to the dataset: it decides which edit (if any) an event
/// produces, and the engine applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarInteraction {
    state: InteractionState,
    orientation: Orientation,
}

impl BarInteraction {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            state: InteractionState::Idle,
            orientation,
        }
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        match (&self.state, self.orientation) {
            (InteractionState::Dragging { .. }, Orientation::Vertical) => CursorStyle::NsResize,
            (InteractionState::Dragging { .. }, Orientation::Horizontal) => CursorStyle::EwResize,
            _ => CursorStyle::Crosshair,
        }
    }

    /// Advances the state machine. `hit` is the band resolved from the event
    /// position, or `None` when the position maps to no band.
    pub fn on_event(&mut self, event: PointerEvent, hit: Option<BarHit>) -> BarReaction {
        match event {
            PointerEvent::Down { .. } => self.on_pointer_down(hit),
            PointerEvent::Move { .. } => self.on_pointer_move(hit),
            PointerEvent::Up => self.on_pointer_up(),
            PointerEvent::Leave => self.on_pointer_leave(),
            PointerEvent::Click { .. } => BarReaction::IGNORED,
        }
    }

    pub fn on_pointer_down(&mut self, hit: Option<BarHit>) -> BarReaction {
        match hit {
            Some(hit) => {
                self.state = InteractionState::Dragging {
                    category: hit.category.clone(),
                };
                BarReaction {
                    edit: Some(hit),
                    highlight: HighlightChange::Clear,
                }
            }
            None => {
                self.state = InteractionState::Idle;
                BarReaction {
                    edit: None,
                    highlight: HighlightChange::Clear,
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, hit: Option<BarHit>) -> BarReaction {
        if let InteractionState::Dragging { category } = &self.state {
            return match hit {
                Some(hit) if hit.category == *category => BarReaction {
                    edit: Some(hit),
                    highlight: HighlightChange::Unchanged,
                },
                _ => BarReaction::IGNORED,
            };
        }

        match hit {
            Some(hit) => {
                self.state = InteractionState::Hovering {
                    category: hit.category.clone(),
                };
                BarReaction {
                    edit: None,
                    highlight: HighlightChange::Show(hit),
                }
            }
            None => {
                self.state = InteractionState::Idle;
                BarReaction {
                    edit: None,
                    highlight: HighlightChange::Clear,
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> BarReaction {
        if self.state.is_dragging() {
            self.state = InteractionState::Idle;
        }
        BarReaction::IGNORED
    }

    pub fn on_pointer_leave(&mut self) -> BarReaction {
        self.state = InteractionState::Idle;
        BarReaction {
            edit: None,
            highlight: HighlightChange::Clear,
        }
    }
}

/// Scatter charts react to clicks only; returns the position to add a point at.
#[must_use]
pub fn scatter_click_position(event: PointerEvent) -> Option<ScreenPoint> {
    match event {
        PointerEvent::Click { x, y } => Some(ScreenPoint::new(x, y)),
        PointerEvent::Down { .. }
        | PointerEvent::Move { .. }
        | PointerEvent::Up
        | PointerEvent::Leave => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{BarInteraction, CursorStyle, HighlightChange, InteractionState, PointerEvent};
    use crate::core::{BarHit, Orientation};

    fn hit(category: &str, raw_value: f64) -> Option<BarHit> {
        Some(BarHit {
            index: 0,
            category: category.to_owned(),
            raw_value,
        })
    }

    #[test]
    fn drag_is_pinned_to_its_origin() {
        let mut machine = BarInteraction::new(Orientation::Vertical);
        let down = machine.on_event(PointerEvent::Down { x: 0.0, y: 0.0 }, hit("a", 10.0));
        assert_eq!(down.edit, hit("a", 10.0));
        assert_eq!(machine.cursor(), CursorStyle::NsResize);

        let across = machine.on_event(PointerEvent::Move { x: 0.0, y: 0.0 }, hit("b", 50.0));
        assert_eq!(across.edit, None);
        assert_eq!(
            machine.state(),
            &InteractionState::Dragging {
                category: "a".to_owned()
            }
        );

        machine.on_event(PointerEvent::Up, None);
        assert_eq!(machine.state(), &InteractionState::Idle);
        assert_eq!(machine.cursor(), CursorStyle::Crosshair);
    }

    #[test]
    fn hover_shows_and_clears_highlight() {
        let mut machine = BarInteraction::new(Orientation::Horizontal);
        let hover = machine.on_event(PointerEvent::Move { x: 0.0, y: 0.0 }, hit("a", 3.0));
        assert!(matches!(hover.highlight, HighlightChange::Show(_)));
        assert_eq!(hover.edit, None);

        let leave = machine.on_event(PointerEvent::Leave, None);
        assert_eq!(leave.highlight, HighlightChange::Clear);
        assert_eq!(machine.state(), &InteractionState::Idle);
    }

    #[test]
    fn press_outside_bands_stays_idle() {
        let mut machine = BarInteraction::new(Orientation::Vertical);
        let reaction = machine.on_event(PointerEvent::Down { x: 0.0, y: 0.0 }, None);
        assert_eq!(reaction.edit, None);
        assert_eq!(reaction.highlight, HighlightChange::Clear);
        assert_eq!(machine.state(), &InteractionState::Idle);
    }
}
