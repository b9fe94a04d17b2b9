//! ParticleStore - fixed-capacity particle slots plus position maps
//!
//! Unlike a per-cell grid, particles here live in numbered slots and the
//! update pass walks slots in index order. That order is what the particle
//! debugger steps through, so slot ids must stay stable: particles are only
//! renumbered by `reload_order`.
//!
//! Two position layers map a cell back to its slot id:
//! - material: solids, powders, liquids, gases (one per cell)
//! - energy: photons, which may sit on top of a material particle

use crate::elements::{is_energy, ElementId, EL_EMPTY};

/// Sentinel stored in position maps for "no particle"
pub const NO_PARTICLE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub kind: ElementId,
    pub x: u32,
    pub y: u32,
    pub vx: f32,
    pub vy: f32,
    pub temp: f32,
    pub life: u16,
    /// Element-specific scratch value
    pub tmp: i32,
}

impl Particle {
    pub const EMPTY: Particle = Particle {
        kind: EL_EMPTY,
        x: 0,
        y: 0,
        vx: 0.0,
        vy: 0.0,
        temp: 0.0,
        life: 0,
        tmp: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == EL_EMPTY
    }
}

pub struct ParticleStore {
    width: u32,
    height: u32,
    parts: Vec<Particle>,
    material_map: Vec<u32>,
    energy_map: Vec<u32>,
    live: usize,
    // Every slot below this index is occupied
    free_hint: usize,
}

impl ParticleStore {
    pub fn new(width: u32, height: u32, capacity: usize) -> Self {
        let cells = (width as usize) * (height as usize);
        Self {
            width,
            height,
            parts: vec![Particle::EMPTY; capacity],
            material_map: vec![NO_PARTICLE; cells],
            energy_map: vec![NO_PARTICLE; cells],
            live: 0,
            free_hint: 0,
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    /// Number of slots (N)
    #[inline]
    pub fn capacity(&self) -> usize { self.parts.len() }

    /// Number of occupied slots
    #[inline]
    pub fn live_count(&self) -> usize { self.live }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn cell(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    // === Slot access ===
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.parts.get(index)
    }

    /// Slot type, `EL_EMPTY` for free or out-of-range slots
    #[inline]
    pub fn kind(&self, index: usize) -> ElementId {
        self.parts.get(index).map(|p| p.kind).unwrap_or(EL_EMPTY)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.parts.iter().enumerate().filter(|(_, p)| !p.is_empty())
    }

    pub fn set_temp(&mut self, index: usize, temp: f32) -> bool {
        match self.parts.get_mut(index) {
            Some(p) if !p.is_empty() => {
                p.temp = temp;
                true
            }
            _ => false,
        }
    }

    pub fn set_velocity(&mut self, index: usize, vx: f32, vy: f32) {
        if let Some(p) = self.parts.get_mut(index) {
            p.vx = vx;
            p.vy = vy;
        }
    }

    pub fn set_life(&mut self, index: usize, life: u16) {
        if let Some(p) = self.parts.get_mut(index) {
            p.life = life;
        }
    }

    pub fn set_tmp(&mut self, index: usize, tmp: i32) {
        if let Some(p) = self.parts.get_mut(index) {
            p.tmp = tmp;
        }
    }

    // === Position lookups ===
    /// Material particle at (x, y)
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Self::decode(self.material_map[self.cell(x, y)])
    }

    /// Energy particle at (x, y)
    #[inline]
    pub fn energy_at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Self::decode(self.energy_map[self.cell(x, y)])
    }

    /// Frontmost particle at (x, y): energy layer above material layer
    pub fn stack_edit_particle_id(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        self.energy_at(x, y).or_else(|| self.at(x, y))
    }

    #[inline]
    fn decode(raw: u32) -> Option<usize> {
        if raw == NO_PARTICLE { None } else { Some(raw as usize) }
    }

    // === Lifecycle ===
    /// Occupy the lowest free slot. Fails when out of bounds, when the
    /// cell's layer is taken, or when every slot is in use.
    pub fn create(&mut self, kind: ElementId, x: u32, y: u32, temp: f32, life: u16) -> Option<usize> {
        if kind == EL_EMPTY || x >= self.width || y >= self.height {
            return None;
        }
        let cell = self.cell(x, y);
        let energy = is_energy(kind);
        let occupied = if energy { self.energy_map[cell] } else { self.material_map[cell] };
        if occupied != NO_PARTICLE {
            return None;
        }

        let index = (self.free_hint..self.parts.len()).find(|&i| self.parts[i].is_empty())?;
        self.free_hint = index + 1;

        self.parts[index] = Particle {
            kind,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            temp,
            life,
            tmp: 0,
        };
        if energy {
            self.energy_map[cell] = index as u32;
        } else {
            self.material_map[cell] = index as u32;
        }
        self.live += 1;
        Some(index)
    }

    pub fn kill(&mut self, index: usize) -> bool {
        let Some(p) = self.parts.get(index).copied() else {
            return false;
        };
        if p.is_empty() {
            return false;
        }
        let cell = self.cell(p.x, p.y);
        let map = if is_energy(p.kind) { &mut self.energy_map } else { &mut self.material_map };
        if map[cell] == index as u32 {
            map[cell] = NO_PARTICLE;
        }
        self.parts[index] = Particle::EMPTY;
        self.live -= 1;
        self.free_hint = self.free_hint.min(index);
        true
    }

    /// Change a particle's element in place (same layer only)
    pub fn transmute(&mut self, index: usize, kind: ElementId) -> bool {
        match self.parts.get_mut(index) {
            Some(p) if !p.is_empty() && kind != EL_EMPTY && is_energy(p.kind) == is_energy(kind) => {
                p.kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Move a particle to a cell whose layer slot is free
    pub fn move_to(&mut self, index: usize, x: u32, y: u32) -> bool {
        let Some(p) = self.parts.get(index).copied() else {
            return false;
        };
        if p.is_empty() || x >= self.width || y >= self.height {
            return false;
        }
        let from = self.cell(p.x, p.y);
        let to = self.cell(x, y);
        let map = if is_energy(p.kind) { &mut self.energy_map } else { &mut self.material_map };
        if map[to] != NO_PARTICLE {
            return false;
        }
        if map[from] == index as u32 {
            map[from] = NO_PARTICLE;
        }
        map[to] = index as u32;
        let part = &mut self.parts[index];
        part.x = x;
        part.y = y;
        true
    }

    /// Swap the cells of two material particles
    pub fn swap_positions(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let (Some(pa), Some(pb)) = (self.parts.get(a).copied(), self.parts.get(b).copied()) else {
            return false;
        };
        if pa.is_empty() || pb.is_empty() || is_energy(pa.kind) || is_energy(pb.kind) {
            return false;
        }
        let ca = self.cell(pa.x, pa.y);
        let cb = self.cell(pb.x, pb.y);
        self.material_map[ca] = b as u32;
        self.material_map[cb] = a as u32;
        self.parts[a].x = pb.x;
        self.parts[a].y = pb.y;
        self.parts[b].x = pa.x;
        self.parts[b].y = pa.y;
        true
    }

    pub fn clear(&mut self) {
        self.parts.fill(Particle::EMPTY);
        self.material_map.fill(NO_PARTICLE);
        self.energy_map.fill(NO_PARTICLE);
        self.live = 0;
        self.free_hint = 0;
    }

    /// Renumber live particles in scan order (row-major, material before
    /// energy) and pack them into the lowest slots.
    pub fn reload_order(&mut self) {
        let mut live: Vec<Particle> = self.parts.iter().filter(|p| !p.is_empty()).copied().collect();
        live.sort_by_key(|p| (p.y, p.x, is_energy(p.kind)));

        self.parts.fill(Particle::EMPTY);
        self.material_map.fill(NO_PARTICLE);
        self.energy_map.fill(NO_PARTICLE);

        for (index, p) in live.iter().enumerate() {
            self.parts[index] = *p;
            let cell = self.cell(p.x, p.y);
            if is_energy(p.kind) {
                self.energy_map[cell] = index as u32;
            } else {
                self.material_map[cell] = index as u32;
            }
        }
        self.live = live.len();
        self.free_hint = live.len();
    }
}
