// Cosmetic trail effects. They age out on their own and never touch gameplay state.

use crate::domain::collection::EntityMap;
use crate::domain::entity::{Body, Entity, EntityKey, EntityKind, Lifecycle, Screen};
use crate::domain::errors::SpawnError;

/// Age at which a contrail removes itself.
pub const CONTRAIL_EXPIRY: u32 = 10;

#[derive(Debug, Clone)]
pub struct Contrail {
    body: Body,
    halflife: u32,
}

impl Contrail {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height, Screen::ARENA),
            halflife: 1,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.body.namespace = Some(namespace.into());
        self
    }

    pub fn halflife(&self) -> u32 {
        self.halflife
    }

    /// Draw opacity; fades as the contrail ages.
    pub fn opacity(&self) -> f32 {
        1.0 / self.halflife as f32
    }

    /// Draw radius; the puff grows as it fades.
    pub fn radius(&self) -> f32 {
        self.body.height * self.halflife as f32 / 2.0
    }

    pub fn tick(&mut self) -> Lifecycle {
        self.halflife += 1;
        if self.halflife == CONTRAIL_EXPIRY {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }
}

impl Entity for Contrail {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Contrail
    }
}

/// Render-side holder for contrails; the environment does not track them.
#[derive(Debug, Default)]
pub struct ContrailLayer {
    contrails: EntityMap<EntityKey, Contrail>,
}

impl ContrailLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contrail: Contrail) -> Result<EntityKey, SpawnError> {
        let key = contrail.key().ok_or(SpawnError::MissingIdentity {
            kind: EntityKind::Contrail,
        })?;
        self.contrails.insert(key.clone(), contrail);
        Ok(key)
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Contrail> {
        self.contrails.get(key)
    }

    pub fn len(&self) -> usize {
        self.contrails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contrails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contrail> {
        self.contrails.values()
    }

    /// Ages every contrail once and drops those that expired.
    /// Returns how many were removed.
    pub fn tick(&mut self) -> usize {
        let before = self.contrails.len();
        self.contrails
            .retain(|_, contrail| contrail.tick() == Lifecycle::Alive);
        before - self.contrails.len()
    }
}
