//! Hit-location resolution against an anatomy's part geometry
//!
//! Walks the hierarchy from the root parts to the deepest part whose
//! box contains the offset. Containment of a parent is necessary but not
//! sufficient: failing every child falls back to the parent itself.

use crate::anatomy::component::AnatomyComponent;

/// Find the deepest part containing a local-space offset
///
/// Only root parts are tried as entry points, in arena order; the first
/// whose box contains the point wins. Offsets use the same unit as part
/// width/height, centered on each part.
pub fn determine_hit_location(
    anatomy: &AnatomyComponent,
    local_x: f32,
    local_y: f32,
) -> Option<usize> {
    for (index, part) in anatomy.parts.iter().enumerate() {
        if part.parent_index < 0 {
            let x = local_x - part.relative_x;
            let y = local_y - part.relative_y;
            if let Some(hit) = check_hit_recursive(anatomy, index, x, y) {
                return Some(hit);
            }
        }
    }
    None
}

fn check_hit_recursive(
    anatomy: &AnatomyComponent,
    index: usize,
    local_x: f32,
    local_y: f32,
) -> Option<usize> {
    let part = anatomy.parts.get(index)?;

    let half_w = part.width / 2.0;
    let half_h = part.height / 2.0;
    if local_x < -half_w || local_x > half_w || local_y < -half_h || local_y > half_h {
        return None;
    }

    for &child_index in &part.children {
        let Some(child) = anatomy.parts.get(child_index) else {
            continue;
        };
        // Re-express the point in the child's local frame
        let child_x = local_x - child.relative_x;
        let child_y = local_y - child.relative_y;
        if let Some(hit) = check_hit_recursive(anatomy, child_index, child_x, child_y) {
            return Some(hit);
        }
    }

    // No internal part hit, so the point lands on this part
    Some(index)
}
