//! Catalog of body templates
//!
//! Ships the built-in bodies and loads custom ones from TOML. Organ
//! presets are free functions so templates can mix biological and
//! mechanical variants of the same slot.

use serde::Deserialize;

use crate::anatomy::component::PhysiologyConfig;
use crate::anatomy::part::{FunctionTag, LimbKind, OrganKind, PartKind};
use crate::blueprints::schema::{BodyTemplate, PartBlueprint};
use crate::core::error::{MarrowError, Result};

fn limb(name: &str, parent: &str, kind: LimbKind, hp: i32, w: f32, h: f32, d: f32) -> PartBlueprint {
    let mut part = PartBlueprint::new(name, parent, hp, PartKind::Limb).sized(w, h, d);
    part.limb_kind = kind;
    part
}

fn organ(name: &str, parent: &str, kind: OrganKind, hp: i32, size: f32) -> PartBlueprint {
    let mut part = PartBlueprint::new(name, parent, hp, PartKind::Organ).sized(size, size, size);
    part.organ_kind = kind;
    part
}

/// Biological heart: small, fragile, the sole circulation carrier
pub fn biological_heart(parent: &str) -> PartBlueprint {
    organ("Heart", parent, OrganKind::Heart, 10, 0.15)
        .vital()
        .tagged(FunctionTag::Circulation)
}

pub fn biological_lung(name: &str, parent: &str) -> PartBlueprint {
    organ(name, parent, OrganKind::Lung, 15, 0.2)
        .vital()
        .tagged(FunctionTag::Respiration)
}

pub fn biological_brain(parent: &str) -> PartBlueprint {
    organ("Brain", parent, OrganKind::Brain, 5, 0.1)
        .vital()
        .tagged(FunctionTag::Neural)
}

pub fn biological_eye(name: &str, parent: &str, x: f32, y: f32) -> PartBlueprint {
    organ(name, parent, OrganKind::Eye, 5, 0.03)
        .at(x, y)
        .tagged(FunctionTag::Sight)
}

/// Armored pump analog of a heart, for construct bodies
pub fn mechanical_pump(parent: &str) -> PartBlueprint {
    organ("Hydraulic Pump", parent, OrganKind::Heart, 25, 0.15)
        .vital()
        .armored(2)
        .tagged(FunctionTag::Circulation)
}

pub fn positronic_core(parent: &str) -> PartBlueprint {
    organ("Positronic Core", parent, OrganKind::Brain, 15, 0.1)
        .vital()
        .armored(3)
        .tagged(FunctionTag::Neural)
}

pub fn optic_sensor(name: &str, parent: &str, x: f32, y: f32) -> PartBlueprint {
    organ(name, parent, OrganKind::Eye, 10, 0.03)
        .at(x, y)
        .armored(1)
        .tagged(FunctionTag::Sight)
}

/// Standard human body: torso root, head, paired arms/legs, organs inside
pub fn human() -> BodyTemplate {
    let mut t = BodyTemplate::new("Human", PhysiologyConfig::default());

    let mut torso = limb("Torso", "ROOT", LimbKind::None, 50, 0.6, 0.8, 0.3);
    torso.vital = true;
    t.add_part(torso);

    t.add_part(biological_heart("Torso"));
    t.add_part(biological_lung("Left Lung", "Torso").at(-0.15, 0.0));
    t.add_part(biological_lung("Right Lung", "Torso").at(0.15, 0.0));
    t.add_part(organ("Stomach", "Torso", OrganKind::Stomach, 10, 0.15)
        .at(0.0, 0.25)
        .tagged(FunctionTag::Digestion));
    t.add_part(organ("Liver", "Torso", OrganKind::Liver, 12, 0.15)
        .at(0.1, 0.2)
        .tagged(FunctionTag::Filtration));

    let mut head = limb("Head", "Torso", LimbKind::Head, 20, 0.3, 0.3, 0.25).at(0.0, -0.6);
    head.vital = true;
    t.add_part(head);

    t.add_part(biological_brain("Head"));
    t.add_part(biological_eye("Left Eye", "Head", -0.05, 0.05));
    t.add_part(biological_eye("Right Eye", "Head", 0.05, 0.05));

    let mut left_arm = limb("Left Arm", "Torso", LimbKind::Arm, 30, 0.2, 0.7, 0.15).at(-0.5, 0.0);
    left_arm.strength = 1.0;
    left_arm.dexterity = 1.0;
    left_arm.tags.push(FunctionTag::Manipulation);
    t.add_part(left_arm);

    let mut right_arm = limb("Right Arm", "Torso", LimbKind::Arm, 30, 0.2, 0.7, 0.15).at(0.5, 0.0);
    right_arm.strength = 1.0;
    right_arm.dexterity = 1.0;
    right_arm.tags.push(FunctionTag::Manipulation);
    t.add_part(right_arm);

    t.add_part(
        limb("Left Leg", "Torso", LimbKind::Leg, 30, 0.2, 0.8, 0.15)
            .at(-0.2, 0.6)
            .tagged(FunctionTag::Motility),
    );
    t.add_part(
        limb("Right Leg", "Torso", LimbKind::Leg, 30, 0.2, 0.8, 0.15)
            .at(0.2, 0.6)
            .tagged(FunctionTag::Motility),
    );

    t
}

/// Mechanical body: no blood, oxygen or pain; dies with its core
pub fn construct() -> BodyTemplate {
    let mut t = BodyTemplate::new(
        "Construct",
        PhysiologyConfig {
            has_blood: false,
            needs_oxygen: false,
            feels_pain: false,
            can_bleed: false,
            has_nervous_system: true,
            has_metabolism: true,
            base_metabolic_rate: 0.2,
            max_blood_volume: 0.0,
        },
    );

    let mut chassis = PartBlueprint::new("Chassis", "ROOT", 80, PartKind::Generic)
        .sized(0.7, 0.9, 0.4)
        .armored(3);
    chassis.vital = true;
    t.add_part(chassis);

    // Circulation-tagged but the config has no blood, so losing the pump
    // degrades function without killing the machine
    t.add_part(mechanical_pump("Chassis"));
    t.add_part(positronic_core("Chassis").at(0.0, -0.3));
    t.add_part(optic_sensor("Optic Sensor", "Chassis", 0.0, -0.4));

    t.add_part(
        limb("Left Servo Arm", "Chassis", LimbKind::Arm, 40, 0.2, 0.7, 0.15)
            .at(-0.55, 0.0)
            .armored(2)
            .tagged(FunctionTag::Manipulation),
    );
    t.add_part(
        limb("Right Servo Arm", "Chassis", LimbKind::Arm, 40, 0.2, 0.7, 0.15)
            .at(0.55, 0.0)
            .armored(2)
            .tagged(FunctionTag::Manipulation),
    );
    t.add_part(
        limb("Left Tread", "Chassis", LimbKind::Leg, 50, 0.25, 0.6, 0.25)
            .at(-0.25, 0.7)
            .armored(2)
            .tagged(FunctionTag::Motility),
    );
    t.add_part(
        limb("Right Tread", "Chassis", LimbKind::Leg, 50, 0.25, 0.6, 0.25)
            .at(0.25, 0.7)
            .armored(2)
            .tagged(FunctionTag::Motility),
    );

    t
}

/// Quadruped predator body
pub fn wolf() -> BodyTemplate {
    let mut t = BodyTemplate::new("Wolf", PhysiologyConfig {
        max_blood_volume: 3.0,
        base_metabolic_rate: 0.7,
        ..PhysiologyConfig::default()
    });

    let mut torso = limb("Torso", "ROOT", LimbKind::None, 40, 0.9, 0.4, 0.35);
    torso.vital = true;
    t.add_part(torso);

    t.add_part(biological_heart("Torso"));
    t.add_part(biological_lung("Left Lung", "Torso").at(-0.1, 0.0));
    t.add_part(biological_lung("Right Lung", "Torso").at(0.1, 0.0));

    let mut head = limb("Head", "Torso", LimbKind::Head, 15, 0.25, 0.25, 0.3).at(-0.55, 0.0);
    head.vital = true;
    t.add_part(head);
    t.add_part(biological_brain("Head"));
    t.add_part(biological_eye("Left Eye", "Head", -0.04, -0.04));
    t.add_part(biological_eye("Right Eye", "Head", 0.04, -0.04));

    for (name, x) in [
        ("Front Left Leg", -0.35),
        ("Front Right Leg", -0.3),
        ("Rear Left Leg", 0.35),
        ("Rear Right Leg", 0.3),
    ] {
        t.add_part(
            limb(name, "Torso", LimbKind::Leg, 15, 0.1, 0.4, 0.1)
                .at(x, 0.35)
                .tagged(FunctionTag::Motility),
        );
    }

    t.add_part(limb("Tail", "Torso", LimbKind::Tail, 8, 0.08, 0.35, 0.08).at(0.5, -0.1));

    t
}

/// Catalog of all known body templates
#[derive(Debug, Clone, Default)]
pub struct BodyCatalog {
    templates: Vec<BodyTemplate>,
}

impl BodyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in bodies
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(human());
        catalog.add(construct());
        catalog.add(wolf());
        catalog
    }

    pub fn add(&mut self, template: BodyTemplate) {
        self.templates.push(template);
    }

    pub fn get(&self, name: &str) -> Option<&BodyTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> &[BodyTemplate] {
        &self.templates
    }

    /// Parse templates from TOML text
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlTemplates =
            toml::from_str(content).map_err(|e| MarrowError::TemplateError(e.to_string()))?;
        let mut catalog = Self::new();
        for template in data.templates {
            if template.name.is_empty() {
                return Err(MarrowError::TemplateError("template without a name".into()));
            }
            catalog.add(template);
        }
        Ok(catalog)
    }

    /// Load templates from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}

/// TOML representation of a templates file
#[derive(Debug, Deserialize)]
struct TomlTemplates {
    templates: Vec<BodyTemplate>,
}
