//! Element Definitions
//!
//! A small fixed content table. Ids are dense: the id is the index into
//! `ELEMENT_DATA`. Id 0 is always the empty slot marker.
//!
//! Temperatures are in °C. Colors are ABGR packed (0xAABBGGRR) so they can be
//! copied straight into a canvas buffer.

pub type ElementId = u8;

pub const EL_EMPTY: ElementId = 0;
pub const EL_STONE: ElementId = 1;
pub const EL_SAND: ElementId = 2;
pub const EL_WATER: ElementId = 3;
pub const EL_STEAM: ElementId = 4;
pub const EL_PHOTON: ElementId = 5;
pub const EL_ISOTOPE: ElementId = 6;

pub const ELEMENT_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    None,
    Solid,
    Powder,
    Liquid,
    Gas,
    Energy,
}

/// Per-element behavior dispatch key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorKind {
    None,
    Powder,
    Liquid,
    Gas,
    Energy,
    Isotope,
}

pub type ElementFlags = u32;

pub const FLAG_NONE: ElementFlags = 0;
/// Emits photons on its own
pub const FLAG_RADIOACTIVE: ElementFlags = 1 << 0;
/// Energy particles pass through it
pub const FLAG_PHOTON_PASS: ElementFlags = 1 << 1;
/// Life counts down every update; the particle dies at zero
pub const FLAG_LIFE_DECAY: ElementFlags = 1 << 2;

#[derive(Clone, Copy, Debug)]
pub struct ElementProps {
    pub name: &'static str,
    pub color: u32,
    pub category: Category,
    /// Relative weight; heavier movers displace lighter fluids
    pub weight: u8,
    pub default_temp: f32,
    /// 0..=255, 0 = perfect insulator
    pub heat_conductivity: u8,
    /// Initial life (0 = infinite)
    pub lifetime: u16,
    pub flags: ElementFlags,
}

/// Temperature thresholds that turn one element into another
#[derive(Clone, Copy, Debug)]
pub struct PhaseChange {
    pub high: Option<(f32, ElementId)>,
    pub low: Option<(f32, ElementId)>,
}

pub const ELEMENT_DATA: [ElementProps; ELEMENT_COUNT] = [
    ElementProps {
        name: "Empty",
        color: 0xFF0A0A0A,
        category: Category::None,
        weight: 0,
        default_temp: 20.0,
        heat_conductivity: 0,
        lifetime: 0,
        flags: FLAG_NONE,
    },
    ElementProps {
        name: "Stone",
        color: 0xFF808080,
        category: Category::Solid,
        weight: 100,
        default_temp: 20.0,
        heat_conductivity: 90,
        lifetime: 0,
        flags: FLAG_NONE,
    },
    ElementProps {
        name: "Sand",
        color: 0xFF80C0E0,
        category: Category::Powder,
        weight: 90,
        default_temp: 20.0,
        heat_conductivity: 150,
        lifetime: 0,
        flags: FLAG_PHOTON_PASS,
    },
    ElementProps {
        name: "Water",
        color: 0xFFE06020,
        category: Category::Liquid,
        weight: 30,
        default_temp: 20.0,
        heat_conductivity: 29,
        lifetime: 0,
        flags: FLAG_PHOTON_PASS,
    },
    ElementProps {
        name: "Steam",
        color: 0xFFE0C0B0,
        category: Category::Gas,
        weight: 1,
        default_temp: 120.0,
        heat_conductivity: 48,
        lifetime: 0,
        flags: FLAG_PHOTON_PASS,
    },
    ElementProps {
        name: "Photon",
        color: 0xFFFFFFFF,
        category: Category::Energy,
        weight: 0,
        default_temp: 700.0,
        heat_conductivity: 251,
        lifetime: 680,
        flags: FLAG_LIFE_DECAY,
    },
    ElementProps {
        name: "Isotope",
        color: 0xFF306050,
        category: Category::Powder,
        weight: 90,
        default_temp: 24.0,
        heat_conductivity: 251,
        lifetime: 0,
        flags: FLAG_RADIOACTIVE | FLAG_PHOTON_PASS,
    },
];

pub const BEHAVIOR_KIND_BY_ID: [BehaviorKind; ELEMENT_COUNT] = [
    BehaviorKind::None,
    BehaviorKind::None,
    BehaviorKind::Powder,
    BehaviorKind::Liquid,
    BehaviorKind::Gas,
    BehaviorKind::Energy,
    BehaviorKind::Isotope,
];

pub const PHASE_CHANGES: [PhaseChange; ELEMENT_COUNT] = [
    PhaseChange { high: None, low: None },
    PhaseChange { high: None, low: None },
    PhaseChange { high: None, low: None },
    PhaseChange { high: Some((100.0, EL_STEAM)), low: None },
    PhaseChange { high: None, low: Some((98.0, EL_WATER)) },
    PhaseChange { high: None, low: None },
    PhaseChange { high: None, low: None },
];

#[inline]
pub fn is_valid_element_id(id: ElementId) -> bool {
    (id as usize) < ELEMENT_COUNT
}

#[inline]
pub fn props(id: ElementId) -> Option<&'static ElementProps> {
    ELEMENT_DATA.get(id as usize)
}

#[inline]
pub fn behavior_kind(id: ElementId) -> BehaviorKind {
    BEHAVIOR_KIND_BY_ID
        .get(id as usize)
        .copied()
        .unwrap_or(BehaviorKind::None)
}

#[inline]
pub fn category(id: ElementId) -> Category {
    props(id).map(|p| p.category).unwrap_or(Category::None)
}

/// Energy particles live on their own position layer
#[inline]
pub fn is_energy(id: ElementId) -> bool {
    category(id) == Category::Energy
}

#[inline]
pub fn is_fluid(id: ElementId) -> bool {
    matches!(category(id), Category::Liquid | Category::Gas)
}

#[inline]
pub fn has_flag(id: ElementId, flag: ElementFlags) -> bool {
    props(id).map(|p| p.flags & flag != 0).unwrap_or(false)
}

/// Element this one turns into at `temp`, if any
pub fn check_phase_change(id: ElementId, temp: f32) -> Option<ElementId> {
    let pc = PHASE_CHANGES.get(id as usize)?;
    if let Some((threshold, new_el)) = pc.high {
        if temp > threshold {
            return Some(new_el);
        }
    }
    if let Some((threshold, new_el)) = pc.low {
        if temp < threshold {
            return Some(new_el);
        }
    }
    None
}
