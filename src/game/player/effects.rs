// Visual effect sink for dash after-images

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

/// Receives after-image spawn requests
pub trait EffectSink {
    fn spawn_at(&mut self, position: Vec2);
}

/// Records spawn positions. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    spawned: Rc<RefCell<Vec<Vec2>>>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.spawned.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.spawned.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.spawned.borrow_mut().clear();
    }
}

impl EffectSink for EffectLog {
    fn spawn_at(&mut self, position: Vec2) {
        log::trace!("after-image at {position}");
        self.spawned.borrow_mut().push(position);
    }
}
