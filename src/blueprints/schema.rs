//! Body templates - the blueprint format an anatomy is instantiated from
//!
//! A template is an ordered list of part blueprints. Parents are named
//! either by explicit index or by part name ("ROOT" for none); resolution
//! happens in a second pass so a child may be listed before its parent.

use serde::{Deserialize, Serialize};

use crate::anatomy::component::PhysiologyConfig;
use crate::anatomy::part::{FunctionTag, LimbKind, OrganKind, PartKind};

/// Blueprint for a single body part in a template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartBlueprint {
    pub name: String,
    pub kind: PartKind,
    pub limb_kind: LimbKind,
    pub organ_kind: OrganKind,

    // Base stats
    pub max_hp: i32,
    /// Structurally vital: losing this part kills regardless of config
    pub vital: bool,
    pub poison_immune: bool,
    pub armor: i32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,

    // Hierarchy: explicit index wins over name; "ROOT" means no parent
    pub parent_name: String,
    pub parent_index: i32,
    pub relative_x: f32,
    pub relative_y: f32,

    // Specifics
    pub tags: Vec<FunctionTag>,
    pub strength: f32,
    pub dexterity: f32,
    pub efficiency: f32,
}

impl Default for PartBlueprint {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: PartKind::Generic,
            limb_kind: LimbKind::None,
            organ_kind: OrganKind::None,
            max_hp: 10,
            vital: false,
            poison_immune: false,
            armor: 0,
            width: 0.5,
            height: 0.5,
            depth: 0.5,
            parent_name: "ROOT".to_string(),
            parent_index: -1,
            relative_x: 0.0,
            relative_y: 0.0,
            tags: Vec::new(),
            strength: 0.0,
            dexterity: 0.0,
            efficiency: 1.0,
        }
    }
}

impl PartBlueprint {
    pub fn new(name: &str, parent: &str, max_hp: i32, kind: PartKind) -> Self {
        Self {
            name: name.to_string(),
            parent_name: parent.to_string(),
            max_hp,
            kind,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.relative_x = x;
        self.relative_y = y;
        self
    }

    pub fn sized(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    pub fn vital(mut self) -> Self {
        self.vital = true;
        self
    }

    pub fn armored(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn tagged(mut self, tag: FunctionTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Complete blueprint for an entity's anatomy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    #[serde(default)]
    pub physiology: PhysiologyConfig,
    #[serde(default)]
    pub parts: Vec<PartBlueprint>,
}

impl BodyTemplate {
    pub fn new(name: &str, physiology: PhysiologyConfig) -> Self {
        Self {
            name: name.to_string(),
            physiology,
            parts: Vec::new(),
        }
    }

    pub fn add_part(&mut self, part: PartBlueprint) {
        self.parts.push(part);
    }
}
