//! Anatomy component: the flattened body-part arena plus physiology state
//!
//! Owns every part of one entity's body. Structural queries and mutations
//! live here; the per-tick physiology math lives in
//! `physiology::processor` and reads through this component.

use serde::{Deserialize, Serialize};

use crate::anatomy::part::{BodyPart, FunctionTag, LimbKind, PartKind};

/// What kind of body this is, biologically
///
/// Non-standard bodies (constructs, fungal creatures) turn flags off and
/// the corresponding physiology stages and death checks stop applying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysiologyConfig {
    pub has_blood: bool,
    pub needs_oxygen: bool,
    pub has_metabolism: bool,
    pub feels_pain: bool,
    pub can_bleed: bool,
    pub has_nervous_system: bool,
    /// Energy burned per tick
    pub base_metabolic_rate: f32,
    pub max_blood_volume: f32,
}

impl Default for PhysiologyConfig {
    fn default() -> Self {
        Self {
            has_blood: true,
            needs_oxygen: true,
            has_metabolism: true,
            feels_pain: true,
            can_bleed: true,
            has_nervous_system: true,
            base_metabolic_rate: 0.5,
            max_blood_volume: 5.0,
        }
    }
}

/// Per-entity anatomy: part arena, physiology configuration and state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnatomyComponent {
    pub parts: Vec<BodyPart>,
    pub config: PhysiologyConfig,

    // Physiology state
    pub blood_volume: f32,
    pub max_blood_volume: f32,
    /// 0.0 to 100.0
    pub oxygen_saturation: f32,
    pub stored_energy: f32,
    pub hydration: f32,
    pub accumulated_pain: f32,
    pub stress_level: f32,
    pub adrenaline_level: f32,
}

impl Default for AnatomyComponent {
    fn default() -> Self {
        Self::new(PhysiologyConfig::default())
    }
}

impl AnatomyComponent {
    pub fn new(config: PhysiologyConfig) -> Self {
        let max_blood = config.max_blood_volume;
        Self {
            parts: Vec::new(),
            config,
            blood_volume: max_blood,
            max_blood_volume: max_blood,
            oxygen_saturation: 100.0,
            stored_energy: 2000.0,
            hydration: 100.0,
            accumulated_pain: 0.0,
            stress_level: 0.0,
            adrenaline_level: 0.0,
        }
    }

    /// Append a part to the arena, returning its index
    pub fn add_part(&mut self, part: BodyPart) -> usize {
        self.parts.push(part);
        self.parts.len() - 1
    }

    /// Append a part as a child of an existing one
    ///
    /// Returns `None` without mutating anything when the parent index is
    /// out of range.
    pub fn add_child_part(&mut self, parent_index: usize, mut part: BodyPart) -> Option<usize> {
        if parent_index >= self.parts.len() {
            return None;
        }
        part.parent_index = parent_index as i32;
        let child_index = self.add_part(part);
        self.parts[parent_index].children.push(child_index);
        Some(child_index)
    }

    /// Linear scan by name; names are only unique within one entity
    pub fn find_part_index(&self, name: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.name == name)
    }

    pub fn part(&self, index: usize) -> Option<&BodyPart> {
        self.parts.get(index)
    }

    pub fn part_mut(&mut self, index: usize) -> Option<&mut BodyPart> {
        self.parts.get_mut(index)
    }

    /// Is the body as a whole still capable of living?
    ///
    /// Function-aware vitality: a vital part tagged only with functions
    /// the physiology config does not require (a "vital" lung on a body
    /// that needs no oxygen) is excluded. A vital part carrying no vital
    /// function tag at all is structurally vital, and its loss alone is
    /// fatal. A required function dies with its last vital contributor.
    pub fn is_functional(&self) -> bool {
        for part in &self.parts {
            if part.vital
                && !part.can_function()
                && !part.tags.iter().any(|t| t.is_vital_function())
            {
                return false;
            }
        }

        let required = [
            (FunctionTag::Circulation, self.config.has_blood),
            (FunctionTag::Respiration, self.config.needs_oxygen),
            (FunctionTag::Neural, self.config.has_nervous_system),
        ];
        for (tag, needed) in required {
            if !needed {
                continue;
            }
            let mut contributors = 0;
            let mut working = 0;
            for part in &self.parts {
                if part.vital && part.has_tag(tag) {
                    contributors += 1;
                    if part.can_function() {
                        working += 1;
                    }
                }
            }
            if contributors > 0 && working == 0 {
                return false;
            }
        }
        true
    }

    /// Damage a part by name; unknown names are a no-op
    pub fn take_damage_to_part(&mut self, name: &str, amount: i32) {
        if let Some(index) = self.find_part_index(name) {
            self.parts[index].take_damage(amount);
        }
    }

    /// Overwrite the part at `index`, keeping the slot's hierarchy links
    ///
    /// Structural surgery: the replacement inherits the old part's parent
    /// and children, so a prosthetic drops into the same place in the
    /// tree. Out-of-range indices are a no-op.
    pub fn replace_part(&mut self, index: usize, mut new_part: BodyPart) {
        let Some(slot) = self.parts.get_mut(index) else {
            return;
        };
        new_part.parent_index = slot.parent_index;
        new_part.children = std::mem::take(&mut slot.children);
        *slot = new_part;
    }

    /// Propagate functional failure down the hierarchy
    ///
    /// Single forward pass; correct because parents always sit at smaller
    /// indices than their children.
    pub fn cascade_functionality(&mut self) {
        for i in 0..self.parts.len() {
            let parent = self.parts[i].parent_index;
            if parent >= 0 && !self.parts[parent as usize].functional {
                self.parts[i].functional = false;
            }
        }
    }

    /// Mean efficiency of all parts tagged for `tag`
    ///
    /// A body with no parts for a function gets 1.0: the function is
    /// abstracted away, not failing.
    pub fn function_efficiency(&self, tag: FunctionTag) -> f32 {
        let mut total = 0.0;
        let mut count = 0;
        for part in &self.parts {
            if part.has_tag(tag) {
                total += part.efficiency;
                count += 1;
            }
        }
        if count == 0 {
            1.0
        } else {
            total / count as f32
        }
    }

    /// Melee reach: 1.5 with at least one working arm, else 1.0
    pub fn combat_reach(&self) -> f32 {
        let has_working_arm = self.parts.iter().any(|p| {
            p.kind == PartKind::Limb && p.limb_kind == LimbKind::Arm && p.can_function()
        });
        if has_working_arm {
            1.5
        } else {
            1.0
        }
    }

    /// Movement multiplier from leg status: all legs 1.0, some 0.5,
    /// none 0.0; a body without legs moves unimpeded
    pub fn movement_factor(&self) -> f32 {
        let mut total = 0;
        let mut working = 0;
        for part in &self.parts {
            if part.kind == PartKind::Limb && part.limb_kind == LimbKind::Leg {
                total += 1;
                if part.can_function() {
                    working += 1;
                }
            }
        }
        if total == 0 {
            1.0
        } else if working == 0 {
            0.0
        } else if working < total {
            0.5
        } else {
            1.0
        }
    }

    pub fn total_bleeding(&self) -> i32 {
        self.parts.iter().map(|p| p.bleeding_intensity).sum()
    }

    pub fn is_bleeding(&self) -> bool {
        self.parts.iter().any(|p| p.bleeding_intensity > 0)
    }

    pub fn blood_ratio(&self) -> f32 {
        if self.max_blood_volume > 0.0 {
            self.blood_volume / self.max_blood_volume
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anatomy::part::OrganKind;

    fn limb(name: &str, hp: i32) -> BodyPart {
        let mut part = BodyPart::new(name, hp, false, 0, 0.2, 0.7, 0.15);
        part.kind = PartKind::Limb;
        part.limb_kind = LimbKind::Arm;
        part
    }

    fn tagged_organ(name: &str, hp: i32, tag: FunctionTag) -> BodyPart {
        let mut part = BodyPart::new(name, hp, true, 0, 0.15, 0.15, 0.15);
        part.kind = PartKind::Organ;
        part.organ_kind = OrganKind::Heart;
        part.add_tag(tag);
        part
    }

    fn simple_body() -> AnatomyComponent {
        let mut anatomy = AnatomyComponent::default();
        let torso = anatomy.add_part(BodyPart::new("Torso", 50, true, 0, 0.6, 0.8, 0.3));
        anatomy
            .add_child_part(torso, tagged_organ("Heart", 10, FunctionTag::Circulation))
            .unwrap();
        let arm = anatomy.add_child_part(torso, limb("Left Arm", 30)).unwrap();
        anatomy
            .add_child_part(arm, BodyPart::new("Left Hand", 10, false, 0, 0.1, 0.1, 0.1))
            .unwrap();
        anatomy
    }

    #[test]
    fn test_add_child_part_links_both_ways() {
        let anatomy = simple_body();
        let arm = anatomy.find_part_index("Left Arm").unwrap();
        let hand = anatomy.find_part_index("Left Hand").unwrap();
        assert_eq!(anatomy.parts[hand].parent_index, arm as i32);
        assert!(anatomy.parts[arm].children.contains(&hand));
    }

    #[test]
    fn test_add_child_part_rejects_bad_parent() {
        let mut anatomy = simple_body();
        let before = anatomy.parts.len();
        assert!(anatomy.add_child_part(99, limb("Ghost Arm", 30)).is_none());
        assert_eq!(anatomy.parts.len(), before);
    }

    #[test]
    fn test_parent_indices_precede_children() {
        let anatomy = simple_body();
        for (i, part) in anatomy.parts.iter().enumerate() {
            assert!(part.parent_index < i as i32);
        }
    }

    #[test]
    fn test_cascade_disables_descendants() {
        let mut anatomy = simple_body();
        let arm = anatomy.find_part_index("Left Arm").unwrap();
        anatomy.parts[arm].take_damage(30);
        anatomy.cascade_functionality();
        let hand = anatomy.find_part_index("Left Hand").unwrap();
        assert!(!anatomy.parts[hand].functional);
        // Hand keeps its hit points, only the flag cascades
        assert_eq!(anatomy.parts[hand].current_hitpoints, 10);
    }

    #[test]
    fn test_cascade_full_depth_in_one_pass() {
        let mut anatomy = simple_body();
        let torso = anatomy.find_part_index("Torso").unwrap();
        anatomy.parts[torso].take_damage(50);
        anatomy.cascade_functionality();
        assert!(anatomy.parts.iter().all(|p| !p.functional));
    }

    #[test]
    fn test_is_functional_idempotent() {
        let mut anatomy = simple_body();
        anatomy.take_damage_to_part("Heart", 10);
        let first = anatomy.is_functional();
        assert_eq!(first, anatomy.is_functional());
        assert!(!first);
    }

    #[test]
    fn test_structurally_vital_part_loss_is_fatal() {
        let mut anatomy = simple_body();
        anatomy.take_damage_to_part("Torso", 50);
        assert!(!anatomy.is_functional());
    }

    #[test]
    fn test_vital_part_for_disabled_function_is_excluded() {
        let mut anatomy = AnatomyComponent::new(PhysiologyConfig {
            needs_oxygen: false,
            ..PhysiologyConfig::default()
        });
        anatomy.add_part(tagged_organ("Gas Exchanger", 15, FunctionTag::Respiration));
        anatomy.take_damage_to_part("Gas Exchanger", 15);
        assert!(anatomy.is_functional());
    }

    #[test]
    fn test_redundant_vital_contributors() {
        let mut anatomy = AnatomyComponent::default();
        anatomy.add_part(tagged_organ("Left Lung", 15, FunctionTag::Respiration));
        anatomy.add_part(tagged_organ("Right Lung", 15, FunctionTag::Respiration));
        anatomy.take_damage_to_part("Left Lung", 15);
        assert!(anatomy.is_functional());
        anatomy.take_damage_to_part("Right Lung", 15);
        assert!(!anatomy.is_functional());
    }

    #[test]
    fn test_take_damage_to_unknown_part_is_noop() {
        let mut anatomy = simple_body();
        let snapshot: Vec<i32> = anatomy.parts.iter().map(|p| p.current_hitpoints).collect();
        anatomy.take_damage_to_part("Wing", 10);
        let after: Vec<i32> = anatomy.parts.iter().map(|p| p.current_hitpoints).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_replace_part_keeps_links() {
        let mut anatomy = simple_body();
        let arm = anatomy.find_part_index("Left Arm").unwrap();
        let parent = anatomy.parts[arm].parent_index;
        let children = anatomy.parts[arm].children.clone();

        let mut prosthetic = limb("Prosthetic Arm", 40);
        prosthetic.armor_value = 3;
        anatomy.replace_part(arm, prosthetic);

        assert_eq!(anatomy.parts[arm].name, "Prosthetic Arm");
        assert_eq!(anatomy.parts[arm].parent_index, parent);
        assert_eq!(anatomy.parts[arm].children, children);
    }

    #[test]
    fn test_function_efficiency_averages() {
        let mut anatomy = AnatomyComponent::default();
        anatomy.add_part(tagged_organ("Left Lung", 10, FunctionTag::Respiration));
        anatomy.add_part(tagged_organ("Right Lung", 10, FunctionTag::Respiration));
        anatomy.take_damage_to_part("Left Lung", 5);
        let eff = anatomy.function_efficiency(FunctionTag::Respiration);
        assert!((eff - 0.75).abs() < 1e-6);
        // Absent functions read as perfect
        assert_eq!(anatomy.function_efficiency(FunctionTag::Filtration), 1.0);
    }

    #[test]
    fn test_combat_reach_and_movement() {
        let mut anatomy = AnatomyComponent::default();
        let arm = anatomy.add_part(limb("Right Arm", 30));
        let mut leg = limb("Right Leg", 30);
        leg.limb_kind = LimbKind::Leg;
        let leg_idx = anatomy.add_part(leg);

        assert_eq!(anatomy.combat_reach(), 1.5);
        assert_eq!(anatomy.movement_factor(), 1.0);

        anatomy.parts[arm].take_damage(30);
        anatomy.parts[leg_idx].take_damage(30);
        assert_eq!(anatomy.combat_reach(), 1.0);
        assert_eq!(anatomy.movement_factor(), 0.0);
    }
}
