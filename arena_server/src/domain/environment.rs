// Aggregate root for one session: owns every gameplay entity and runs the tick.

use crate::domain::actor::Actor;
use crate::domain::collection::EntityMap;
use crate::domain::entity::{Entity, EntityKind, Nonce, SimObject, SimulationContext};
use crate::domain::errors::SpawnError;
use crate::domain::geometry::entities_collide;
use crate::domain::projectile::Projectile;
use crate::domain::state::{ActorSnapshot, ProjectileSnapshot, StructureSnapshot};
use crate::domain::structure::{Floor, Wall};
use crate::domain::tuning::MapTuning;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A projectile that was consumed by hitting a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyedProjectile {
    /// First actor the projectile hit.
    pub player_nonce: Nonce,
    /// The projectile itself.
    pub nonce: Nonce,
}

/// Summary of one call to [`Environment::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub server_time: u64,
    pub projectiles_advanced: usize,
    pub projectiles_removed: usize,
    pub hits: usize,
    /// Actors removed because their health ran out, in the order they died.
    pub eliminated: Vec<Nonce>,
}

#[derive(Debug)]
pub struct Environment {
    nonce: Nonce,
    map: MapTuning,
    actors: EntityMap<Nonce, Actor>,
    projectiles: EntityMap<Nonce, Projectile>,
    walls: EntityMap<Nonce, Wall>,
    floors: EntityMap<Nonce, Floor>,
    // Cleared at the start of every tick.
    destroyed_projectiles: Vec<DestroyedProjectile>,
}

impl Environment {
    pub fn new(nonce: Nonce) -> Self {
        Self::with_map(nonce, MapTuning::default())
    }

    pub fn with_map(nonce: Nonce, map: MapTuning) -> Self {
        Self {
            nonce,
            map,
            actors: EntityMap::new(),
            projectiles: EntityMap::new(),
            walls: EntityMap::new(),
            floors: EntityMap::new(),
            destroyed_projectiles: Vec::new(),
        }
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn map(&self) -> &MapTuning {
        &self.map
    }

    pub fn actors(&self) -> &EntityMap<Nonce, Actor> {
        &self.actors
    }

    pub fn projectiles(&self) -> &EntityMap<Nonce, Projectile> {
        &self.projectiles
    }

    pub fn walls(&self) -> &EntityMap<Nonce, Wall> {
        &self.walls
    }

    pub fn floors(&self) -> &EntityMap<Nonce, Floor> {
        &self.floors
    }

    pub fn actor(&self, nonce: Nonce) -> Option<&Actor> {
        self.actors.get(&nonce)
    }

    /// Mutable access for steering (aim, color). Health only changes through the tick.
    pub fn actor_mut(&mut self, nonce: Nonce) -> Option<&mut Actor> {
        self.actors.get_mut(&nonce)
    }

    /// Projectile-hit-player events produced by the most recent tick.
    pub fn destroyed_projectiles(&self) -> &[DestroyedProjectile] {
        &self.destroyed_projectiles
    }

    pub fn take_destroyed_projectiles(&mut self) -> Vec<DestroyedProjectile> {
        std::mem::take(&mut self.destroyed_projectiles)
    }

    pub fn add_player(&mut self, actor: Actor) -> Result<(), SpawnError> {
        let nonce = identity_of(&actor)?;
        self.actors.insert(nonce, actor);
        Ok(())
    }

    pub fn add_projectile(&mut self, projectile: Projectile) -> Result<(), SpawnError> {
        let nonce = identity_of(&projectile)?;
        self.projectiles.insert(nonce, projectile);
        Ok(())
    }

    pub fn add_wall(&mut self, wall: Wall) -> Result<(), SpawnError> {
        let nonce = identity_of(&wall)?;
        self.walls.insert(nonce, wall);
        Ok(())
    }

    pub fn add_floor(&mut self, floor: Floor) -> Result<(), SpawnError> {
        let nonce = identity_of(&floor)?;
        self.floors.insert(nonce, floor);
        Ok(())
    }

    /// Routes any entity variant to its collection.
    pub fn spawn(&mut self, object: SimObject) -> Result<(), SpawnError> {
        match object {
            SimObject::Actor(actor) => self.add_player(actor),
            SimObject::Projectile(projectile) => self.add_projectile(projectile),
            SimObject::Wall(wall) => self.add_wall(wall),
            SimObject::Floor(floor) => self.add_floor(floor),
            SimObject::Contrail(_) => Err(SpawnError::Untracked {
                kind: EntityKind::Contrail,
            }),
        }
    }

    pub fn remove_player(&mut self, nonce: Nonce) -> Option<Actor> {
        self.actors.remove(&nonce)
    }

    pub fn remove_projectile(&mut self, nonce: Nonce) -> Option<Projectile> {
        self.projectiles.remove(&nonce)
    }

    pub fn remove_wall(&mut self, nonce: Nonce) -> Option<Wall> {
        self.walls.remove(&nonce)
    }

    pub fn remove_floor(&mut self, nonce: Nonce) -> Option<Floor> {
        self.floors.remove(&nonce)
    }

    /// Actors overlapping `projectile`, in actor insertion order, owner excluded.
    pub fn players_colliding(&self, projectile: &Projectile) -> Vec<Nonce> {
        colliding_actors(&self.actors, projectile)
    }

    /// Removes one point of health; the actor is removed once it reaches zero.
    /// Returns true when this call removed the actor.
    pub fn hurt_player(&mut self, nonce: Nonce) -> bool {
        hurt_actor(&mut self.actors, nonce)
    }

    /// Runs one simulation step at `ctx.server_time`.
    ///
    /// Projectiles are visited in insertion order. Each one is moved, tested
    /// against the actors still alive, and removed when it hit somebody or left
    /// the map. Every actor it overlaps is damaged, but only the first one is
    /// reported in [`Self::destroyed_projectiles`].
    pub fn tick(&mut self, ctx: &SimulationContext) -> TickReport {
        self.destroyed_projectiles.clear();
        let mut report = TickReport {
            server_time: ctx.server_time,
            ..TickReport::default()
        };
        let mut spent: Vec<Nonce> = Vec::new();

        for (&nonce, projectile) in self.projectiles.iter_mut() {
            projectile.advance(ctx, &self.map);
            report.projectiles_advanced += 1;

            let hit_players = colliding_actors(&self.actors, projectile);
            let out_of_bounds = projectile.is_out_of_bounds(&self.map);

            if let Some(&first) = hit_players.first() {
                self.destroyed_projectiles.push(DestroyedProjectile {
                    player_nonce: first,
                    nonce,
                });
            }
            if out_of_bounds || !hit_players.is_empty() {
                spent.push(nonce);
            }

            for victim in hit_players {
                report.hits += 1;
                debug!(
                    victim = %victim,
                    shooter = %projectile.player_nonce(),
                    projectile = %nonce,
                    "player hit"
                );
                if hurt_actor(&mut self.actors, victim) {
                    report.eliminated.push(victim);
                }
            }
        }

        for nonce in spent {
            if self.projectiles.remove(&nonce).is_some() {
                report.projectiles_removed += 1;
            }
        }

        report
    }

    pub fn actor_snapshots(&self) -> Vec<ActorSnapshot> {
        self.actors
            .iter()
            .map(|(&nonce, actor)| ActorSnapshot::new(nonce, actor))
            .collect()
    }

    pub fn projectile_snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles
            .iter()
            .map(|(&nonce, projectile)| ProjectileSnapshot::new(nonce, projectile))
            .collect()
    }

    pub fn wall_snapshots(&self) -> Vec<StructureSnapshot> {
        self.walls
            .iter()
            .map(|(&nonce, wall)| StructureSnapshot::new(nonce, wall))
            .collect()
    }

    pub fn floor_snapshots(&self) -> Vec<StructureSnapshot> {
        self.floors
            .iter()
            .map(|(&nonce, floor)| StructureSnapshot::new(nonce, floor))
            .collect()
    }
}

fn identity_of<E: Entity>(entity: &E) -> Result<Nonce, SpawnError> {
    entity.nonce().ok_or(SpawnError::MissingIdentity {
        kind: entity.kind(),
    })
}

fn colliding_actors(actors: &EntityMap<Nonce, Actor>, projectile: &Projectile) -> Vec<Nonce> {
    actors
        .iter()
        .filter(|(nonce, actor)| {
            **nonce != projectile.player_nonce() && entities_collide(*actor, projectile)
        })
        .map(|(&nonce, _)| nonce)
        .collect()
}

fn hurt_actor(actors: &mut EntityMap<Nonce, Actor>, nonce: Nonce) -> bool {
    let Some(actor) = actors.get_mut(&nonce) else {
        return false;
    };
    if !actor.take_damage(1) {
        return false;
    }

    actors.remove(&nonce);
    info!(player = %nonce, "player eliminated");
    true
}
