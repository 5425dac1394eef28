//! Drag-and-drop scene: boxes and disks that hover, drag, and pull neighbours along.

use gaffer_engine::coords::{Rect, Vec2};
use gaffer_engine::input::DragSnapshot;
use gaffer_engine::scene::{DrawList, ZIndex};

use crate::entity::{Entity, EntityId, Shape, HOVER_SPIN};

/// Half extent of the zone around a grabbed disk whose entities follow it.
pub const AFFECT_RADIUS: f32 = 150.0;

/// A grabbed entity and the offset from the grab point to its position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grab {
    pub id: EntityId,
    pub decay: Vec2,
}

/// Active drag gesture.
///
/// Invariant: `affected` is only non-empty when the primary is a disk, and it
/// is fixed when the drag starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub primary: Grab,
    pub affected: Vec<Grab>,
}

/// Optional callbacks fired from inside `integrate`.
///
/// None of them are required.
#[derive(Default)]
pub struct SceneHooks {
    /// Fired once per entity hover transition. All leaving transitions of a
    /// tick fire before the entering ones.
    pub on_hover_change: Option<Box<dyn FnMut(bool)>>,
    pub on_drag_start: Option<Box<dyn FnMut(EntityId)>>,
    pub on_drag_end: Option<Box<dyn FnMut(EntityId)>>,
}

/// Scene state machine driven once per fixed tick by a [`DragSnapshot`].
pub struct DragScene {
    entities: Vec<Entity>,
    drag: Option<DragState>,
    hooks: SceneHooks,
    last_dt: f32,
}

impl DragScene {
    pub fn new(entities: Vec<Entity>, hooks: SceneHooks) -> Self {
        Self {
            entities,
            drag: None,
            hooks,
            last_dt: 0.0,
        }
    }

    /// The scene shown by the `boxes` demo.
    pub fn demo(hooks: SceneHooks) -> Self {
        Self::new(demo_layout(), hooks)
    }

    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Runs one fixed step: the drag/hover state machine against `snapshot`,
    /// then every entity's own integration.
    pub fn integrate(&mut self, snapshot: &DragSnapshot, dt: f64) {
        let dt = dt as f32;
        self.last_dt = dt;

        match (snapshot.down, snapshot.moved, snapshot.up) {
            (None, moved, _) => {
                let hit = moved.and_then(|p| self.hit_test(p));
                self.set_hover(|e| Some(e.id) == hit);
            }
            (Some(_), _, Some(_)) => {
                self.end_drag();
                self.set_hover(|_| false);
            }
            (Some(down), Some(moved), None) => {
                match self.drag.take() {
                    Some(drag) => {
                        self.follow(&drag, moved);
                        self.drag = Some(drag);
                    }
                    None => self.start_drag(down),
                }
                self.set_hover(|_| false);
            }
            // Pressed but not moved yet: no drag, but a held button still
            // suppresses hover.
            (Some(_), None, None) => self.set_hover(|_| false),
        }

        for e in &mut self.entities {
            e.target_spin = if e.hover { HOVER_SPIN } else { 0.0 };
            e.integrate(dt);
        }
    }

    /// Records every entity into `list`, extrapolating rotation by `alpha` of a tick.
    pub fn draw(&self, list: &mut DrawList, alpha: f64) {
        let lead = self.last_dt * alpha as f32;
        for e in &self.entities {
            e.draw(list, lead);
        }
    }

    /// Indices of the entities from bottom to top.
    fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entities.len()).collect();
        order.sort_by_key(|&i| self.entities[i].z);
        order
    }

    /// First entity in paint order whose hit box contains `p`.
    fn hit_test(&self, p: Vec2) -> Option<EntityId> {
        self.paint_order()
            .into_iter()
            .map(|i| &self.entities[i])
            .find(|e| e.hit(p))
            .map(|e| e.id)
    }

    fn top_z(&self) -> ZIndex {
        self.entities.iter().map(|e| e.z).max().unwrap_or_default()
    }

    fn start_drag(&mut self, down: Vec2) {
        let Some(id) = self.hit_test(down) else { return };

        let top = self.top_z().above();
        let Some(primary) = self.entities.iter_mut().find(|e| e.id == id) else { return };
        primary.z = top;
        let (origin, shape) = (primary.pos, primary.shape);

        let affected = match shape {
            Shape::Disk => {
                let zone = Rect::from_center(origin, Vec2::new(AFFECT_RADIUS, AFFECT_RADIUS));
                self.entities
                    .iter()
                    .filter(|e| e.id != id && zone.contains(e.pos))
                    .map(|e| Grab { id: e.id, decay: e.pos - down })
                    .collect()
            }
            Shape::Box => Vec::new(),
        };

        log::debug!("drag start: {:?} with {} affected", id, affected.len());

        self.drag = Some(DragState {
            primary: Grab { id, decay: origin - down },
            affected,
        });

        if let Some(hook) = self.hooks.on_drag_start.as_mut() {
            hook(id);
        }
    }

    fn follow(&mut self, drag: &DragState, moved: Vec2) {
        for grab in std::iter::once(&drag.primary).chain(&drag.affected) {
            if let Some(e) = self.entities.iter_mut().find(|e| e.id == grab.id) {
                e.target = moved + grab.decay;
            }
        }
    }

    fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else { return };

        log::debug!("drag end: {:?}", drag.primary.id);
        if let Some(hook) = self.hooks.on_drag_end.as_mut() {
            hook(drag.primary.id);
        }
    }

    fn set_hover<F>(&mut self, hovered: F)
    where
        F: Fn(&Entity) -> bool,
    {
        let next: Vec<bool> = self.entities.iter().map(&hovered).collect();

        for leaving in [true, false] {
            for (e, &now) in self.entities.iter_mut().zip(&next) {
                let changed = e.hover != now;
                if !changed || now == leaving {
                    continue;
                }
                e.hover = now;
                if let Some(hook) = self.hooks.on_hover_change.as_mut() {
                    hook(now);
                }
            }
        }
    }
}

/// Initial entities of the `boxes` demo, bottom to top.
pub fn demo_layout() -> Vec<Entity> {
    let spots = [
        (Shape::Box, 200.0, 200.0),
        (Shape::Box, 420.0, 260.0),
        (Shape::Box, 700.0, 420.0),
        (Shape::Box, 1500.0, 250.0),
        (Shape::Disk, 1000.0, 500.0),
        (Shape::Box, 1080.0, 590.0),
        (Shape::Box, 900.0, 380.0),
        (Shape::Disk, 1600.0, 700.0),
        (Shape::Disk, 400.0, 750.0),
    ];

    spots
        .into_iter()
        .enumerate()
        .map(|(i, (shape, x, y))| {
            Entity::new(EntityId(i as u32), shape, Vec2::new(x, y), ZIndex::new(i as i32))
        })
        .collect()
}
