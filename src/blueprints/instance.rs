//! Template instantiation - turning a blueprint into a live anatomy
//!
//! Two passes: create every part, then resolve hierarchy. The split
//! exists because a blueprint may name a parent that appears later in
//! the listing.

use crate::anatomy::component::AnatomyComponent;
use crate::anatomy::part::BodyPart;
use crate::blueprints::schema::BodyTemplate;

/// Instantiate an anatomy from a template
pub fn instantiate(template: &BodyTemplate) -> AnatomyComponent {
    let mut anatomy = AnatomyComponent::new(template.physiology.clone());

    // Pass 1: create all parts
    for blueprint in &template.parts {
        let mut part = BodyPart::new(
            &blueprint.name,
            blueprint.max_hp,
            blueprint.vital,
            blueprint.armor,
            blueprint.width,
            blueprint.height,
            blueprint.depth,
        );
        part.kind = blueprint.kind;
        part.limb_kind = blueprint.limb_kind;
        part.organ_kind = blueprint.organ_kind;
        part.poison_immune = blueprint.poison_immune;
        part.relative_x = blueprint.relative_x;
        part.relative_y = blueprint.relative_y;
        part.strength = blueprint.strength;
        part.dexterity = blueprint.dexterity;
        part.efficiency = blueprint.efficiency;
        part.tags = blueprint.tags.clone();
        anatomy.add_part(part);
    }

    // Pass 2: resolve hierarchy now that every part exists
    for (i, blueprint) in template.parts.iter().enumerate() {
        let parent = if blueprint.parent_index >= 0 {
            Some(blueprint.parent_index as usize)
        } else if blueprint.parent_name != "ROOT" && !blueprint.parent_name.is_empty() {
            anatomy.find_part_index(&blueprint.parent_name)
        } else {
            None
        };

        // Unknown or self-referencing parents leave the part a root
        if let Some(parent) = parent {
            if parent < anatomy.parts.len() && parent != i {
                anatomy.parts[i].parent_index = parent as i32;
                anatomy.parts[parent].children.push(i);
            }
        }
    }

    anatomy
}
