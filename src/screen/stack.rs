use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Propagation, Screen, ScreenAction, attach, detach};
use crate::game::GameContext;
use crate::renderer::Surface;

/// LIFO overlay manager. Index 0 is the bottom; the last element is on top
/// and receives input first.
#[derive(Default)]
pub struct ScreenStack {
    screens: Mutex<Vec<Box<dyn Screen>>>,
}

impl ScreenStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Box<dyn Screen>>> {
        self.screens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, mut screen: Box<dyn Screen>, ctx: &mut GameContext) {
        attach(screen.as_mut(), ctx);
        self.lock().push(screen);
    }

    /// Detach and return the top screen. Popping an empty stack is a no-op.
    pub fn pop(&self, ctx: &mut GameContext) -> Option<Box<dyn Screen>> {
        let mut top = self.lock().pop()?;
        detach(top.as_mut(), ctx);
        Some(top)
    }

    /// Pop everything, top first.
    pub fn clear(&self, ctx: &mut GameContext) {
        while self.pop(ctx).is_some() {}
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Names from bottom to top.
    pub fn names(&self) -> Vec<String> {
        self.lock().iter().map(|s| s.name().to_string()).collect()
    }

    /// Draw bottom to top so later screens paint over earlier ones.
    pub fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        for screen in self.lock().iter() {
            screen.draw(ctx, surface);
        }
    }

    /// Offer input top to bottom, stopping at the first screen that consumes
    /// it. Returns `Stop` if any screen did.
    pub fn handle_input(&self, ctx: &mut GameContext) -> Propagation {
        let mut screens = self.lock();
        for screen in screens.iter_mut().rev() {
            if screen.handle_input(ctx) == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    /// Update every screen top to bottom, then apply their actions in the same
    /// order. `Push` and `Pop` act on this stack; the first action meant for
    /// an outer manager is returned and any later ones are dropped.
    pub fn update(&self, ctx: &mut GameContext) -> ScreenAction {
        let actions: Vec<ScreenAction> = {
            let mut screens = self.lock();
            screens.iter_mut().rev().map(|s| s.update(ctx)).collect()
        };

        let mut outer = ScreenAction::None;
        for action in actions {
            match action {
                ScreenAction::None => {}
                ScreenAction::Push(screen) => self.push(screen, ctx),
                ScreenAction::Pop => {
                    self.pop(ctx);
                }
                other => {
                    if outer.is_none() {
                        outer = other;
                    } else {
                        log::warn!("dropping {other:?}: {outer:?} already requested this tick");
                    }
                }
            }
        }
        outer
    }
}
