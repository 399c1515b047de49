//! Body parts: the nodes of an entity's anatomy arena
//!
//! A part is a value record addressed by index. The old limb/organ class
//! split collapses into a kind tag plus a set of function tags; organ
//! efficiency is recomputed inside the damage/heal paths.

use serde::{Deserialize, Serialize};

/// Structural kind of a body part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    #[default]
    Generic,
    Limb,
    Organ,
}

/// Limb subtype, `None` for non-limbs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbKind {
    Arm,
    Leg,
    Head,
    Tail,
    #[default]
    None,
}

/// Organ subtype, `None` for non-organs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganKind {
    Heart,
    Lung,
    Brain,
    Stomach,
    Liver,
    Kidney,
    Eye,
    #[default]
    None,
}

/// Semantic function a part contributes to, independent of its kind
///
/// Aggregate efficiency per tag drives the physiology stages; the vital
/// tags (circulation, respiration, neural) also feed the death check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionTag {
    /// Oxygen transport; losing all vital carriers stops the heart
    Circulation,
    /// Oxygen intake
    Respiration,
    /// Consciousness and action
    Neural,
    /// Converts food to energy
    Digestion,
    /// Removes toxins
    Filtration,
    /// Regulates stress and adrenaline recovery
    Endocrine,
    /// Walking and running
    Motility,
    /// Weapon handling and leverage
    Manipulation,
    /// Vision
    Sight,
    /// Passive hit-point recovery
    Regeneration,
}

impl FunctionTag {
    /// Tags whose total loss can kill, subject to the physiology config
    pub fn is_vital_function(&self) -> bool {
        matches!(
            self,
            FunctionTag::Circulation | FunctionTag::Respiration | FunctionTag::Neural
        )
    }
}

/// One node in an entity's body hierarchy
///
/// Parts live in `AnatomyComponent::parts` and reference each other only
/// by index; `parent_index` is always smaller than the part's own index
/// when the arena was built in traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPart {
    // Identification
    pub name: String,
    pub kind: PartKind,
    pub limb_kind: LimbKind,
    pub organ_kind: OrganKind,

    // Status
    pub max_hitpoints: i32,
    pub current_hitpoints: i32,
    pub vital: bool,
    pub poison_immune: bool,
    pub functional: bool,
    /// Damage per tick due to bleeding
    pub bleeding_intensity: i32,
    /// 0.0 to 100.0
    pub pain_level: f32,
    /// 1.0 = intact, 0.0 = severed
    pub arterial_integrity: f32,
    /// Flat damage reduction
    pub armor_value: i32,

    // Spatial information relative to parent
    pub relative_x: f32,
    pub relative_y: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,

    // Hierarchy (indices into the owning arena)
    /// -1 if root
    pub parent_index: i32,
    pub children: Vec<usize>,

    // Specific properties (merged from the old limb/organ split)
    pub strength: f32,
    pub dexterity: f32,
    /// 0.0 to 1.0, tracks current/max for organs
    pub efficiency: f32,

    // Semantic tags
    pub tags: Vec<FunctionTag>,
}

impl BodyPart {
    pub fn new(name: &str, hp: i32, vital: bool, armor: i32, width: f32, height: f32, depth: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: PartKind::Generic,
            limb_kind: LimbKind::None,
            organ_kind: OrganKind::None,
            max_hitpoints: hp,
            current_hitpoints: hp,
            vital,
            poison_immune: false,
            functional: true,
            bleeding_intensity: 0,
            pain_level: 0.0,
            arterial_integrity: 1.0,
            armor_value: armor,
            relative_x: 0.0,
            relative_y: 0.0,
            width,
            height,
            depth,
            parent_index: -1,
            children: Vec::new(),
            strength: 0.0,
            dexterity: 0.0,
            efficiency: 1.0,
            tags: Vec::new(),
        }
    }

    /// Presented cross-section, used as the hit-selection weight
    pub fn target_weight(&self) -> f32 {
        self.width * self.height
    }

    /// Functional and with hit points remaining
    pub fn can_function(&self) -> bool {
        self.functional && self.current_hitpoints > 0
    }

    pub fn is_damaged(&self) -> bool {
        self.current_hitpoints < self.max_hitpoints
    }

    /// Apply hit-point loss, clamped to [0, max]
    ///
    /// Dropping to zero clears the functional flag; organ efficiency
    /// tracks the damage ratio.
    pub fn take_damage(&mut self, damage: i32) {
        self.current_hitpoints = (self.current_hitpoints - damage).min(self.max_hitpoints);
        if self.current_hitpoints <= 0 {
            self.current_hitpoints = 0;
            self.functional = false;
        }
        self.update_efficiency();
    }

    /// Restore hit points, clamped to max; a part back above zero
    /// regains its own functional flag (cascade may clear it again)
    pub fn heal(&mut self, amount: i32) {
        self.current_hitpoints = (self.current_hitpoints + amount).min(self.max_hitpoints);
        if self.current_hitpoints > 0 {
            self.functional = true;
        }
        self.update_efficiency();
    }

    fn update_efficiency(&mut self) {
        if self.kind == PartKind::Organ && self.max_hitpoints > 0 {
            self.efficiency = self.current_hitpoints as f32 / self.max_hitpoints as f32;
        }
    }

    pub fn add_tag(&mut self, tag: FunctionTag) {
        self.tags.push(tag);
    }

    pub fn has_tag(&self, tag: FunctionTag) -> bool {
        self.tags.contains(&tag)
    }
}
