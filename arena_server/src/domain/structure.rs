// Static level geometry. Stored by the environment, never moved by the tick.

use crate::domain::entity::{Body, Entity, EntityKind, Nonce, Screen};

#[derive(Debug, Clone)]
pub struct Wall {
    body: Body,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height, Screen::ARENA),
        }
    }

    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.body.nonce = Some(nonce);
        self
    }
}

impl Entity for Wall {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Wall
    }
}

#[derive(Debug, Clone)]
pub struct Floor {
    body: Body,
}

impl Floor {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height, Screen::ARENA),
        }
    }

    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.body.nonce = Some(nonce);
        self
    }
}

impl Entity for Floor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Floor
    }
}
