//! Physiology integration tests
//!
//! Multi-tick scenarios through the full Simulation surface: bleeding
//! out, hypoxia, starvation, healing and the activation life cycle.

use marrow::blueprints::catalog::{construct, human};
use marrow::core::config::SimulationConfig;
use marrow::core::types::TilePos;
use marrow::ecs::world::World;
use marrow::simulation::tick::Simulation;

fn no_clot_config() -> SimulationConfig {
    SimulationConfig {
        clot_chance: 0.0,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_bleed_out_timeline() {
    let mut sim = Simulation::seeded(no_clot_config(), 31);
    let mut world = World::new();
    let id = world.spawn("bleeder", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    // Intensity 10 with clotting disabled: 0.5 L per tick
    assert!(sim.inflict_wound(&mut world, id, "Torso", 0, 10));

    for tick in 1..=10 {
        sim.run_tick(&mut world);
        let anatomy = world.anatomy(id).unwrap();
        let expected = (5.0 - 0.5 * tick as f32).max(0.0);
        assert!(
            (anatomy.blood_volume - expected).abs() < 1e-4,
            "tick {tick}: blood {} expected {expected}",
            anatomy.blood_volume
        );
    }

    // Empty at tick 10; shock damage accrued while the ratio sat below
    // one half (ticks 6 through 10)
    let anatomy = world.anatomy(id).unwrap();
    assert_eq!(anatomy.blood_volume, 0.0);
    assert_eq!(world.health(id).unwrap().current_health, 95);
    // Still bleeding, so still active
    assert!(sim.scheduler.is_active(id));
}

#[test]
fn test_arterial_wound_is_self_sustaining() {
    let mut sim = Simulation::seeded(no_clot_config(), 32);
    let mut world = World::new();
    let id = world.spawn("victim", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    {
        let anatomy = world.anatomy_mut(id).unwrap();
        let torso = anatomy.find_part_index("Torso").unwrap();
        anatomy.parts[torso].arterial_integrity = 0.1;
    }

    sim.run_tick(&mut world);
    let anatomy = world.anatomy(id).unwrap();
    let torso = anatomy.find_part_index("Torso").unwrap();
    assert_eq!(anatomy.parts[torso].bleeding_intensity, 5);

    // Even with clotting the artery keeps the wound open
    let mut clotting = Simulation::seeded(SimulationConfig::default(), 33);
    clotting.register(&world, id);
    for _ in 0..20 {
        clotting.run_tick(&mut world);
    }
    let anatomy = world.anatomy(id).unwrap();
    assert!(anatomy.parts[torso].bleeding_intensity >= 5);
}

#[test]
fn test_hypoxia_kills_through_the_brain() {
    let mut sim = Simulation::seeded(no_clot_config(), 34);
    let mut world = World::new();
    let id = world.spawn("choking", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    {
        let anatomy = world.anatomy_mut(id).unwrap();
        // Lungs at 1 hp still count as functioning for the vitals check,
        // but their efficiency is too low to recover oxygen
        anatomy.take_damage_to_part("Left Lung", 14);
        anatomy.take_damage_to_part("Right Lung", 14);
        // Too depleted to heal the lungs back
        anatomy.stored_energy = 100.0;
    }

    let mut died_at = None;
    for tick in 1..=80 {
        // Pain from the ruined lungs keeps the entity active; drive the
        // ticks directly to stay independent of that margin
        if sim.advance_tick(&mut world, id).is_some() {
            died_at = Some(tick);
            break;
        }
        world.tick();
    }

    let died_at = died_at.expect("hypoxia should have been lethal");
    // Saturation drains 2 per tick from 100; damage starts under 30,
    // the 5 hp brain fails a handful of ticks later
    assert!(died_at > 35, "died implausibly early at {died_at}");
    assert!(died_at < 50, "died implausibly late at {died_at}");

    let anatomy = world.anatomy(id).unwrap();
    let brain = anatomy.find_part_index("Brain").unwrap();
    assert_eq!(anatomy.parts[brain].current_hitpoints, 0);
}

#[test]
fn test_starvation_grinds_health_down() {
    let mut sim = Simulation::seeded(no_clot_config(), 35);
    let mut world = World::new();
    let id = world.spawn("famished", &human(), TilePos::new(0, 0));
    world.anatomy_mut(id).unwrap().stored_energy = 0.0;

    // Starvation is below the activation predicate's radar, so the
    // driver pushes ticks explicitly
    for _ in 0..99 {
        sim.advance_tick(&mut world, id);
        world.tick();
    }
    assert!(world.is_alive(id));
    assert_eq!(world.health(id).unwrap().current_health, 1);

    sim.advance_tick(&mut world, id);
    assert!(!world.is_alive(id));
}

#[test]
fn test_healing_prioritizes_vitals_end_to_end() {
    let mut sim = Simulation::seeded(no_clot_config(), 36);
    let mut world = World::new();
    let id = world.spawn("mender", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    {
        let anatomy = world.anatomy_mut(id).unwrap();
        anatomy.take_damage_to_part("Heart", 3);
        anatomy.take_damage_to_part("Left Arm", 10);
    }
    // A health deficit keeps the entity heal-eligible in the scheduler
    world.health_mut(id).unwrap().take_damage(13);

    sim.run_tick(&mut world);
    let anatomy = world.anatomy(id).unwrap();
    let heart = anatomy.find_part_index("Heart").unwrap();
    let arm = anatomy.find_part_index("Left Arm").unwrap();
    // One heal per tick, vital first
    assert_eq!(anatomy.parts[heart].current_hitpoints, 8);
    assert_eq!(anatomy.parts[arm].current_hitpoints, 20);

    // The heart finishes before the arm sees a single point
    for _ in 0..2 {
        sim.run_tick(&mut world);
    }
    let anatomy = world.anatomy(id).unwrap();
    assert_eq!(anatomy.parts[heart].current_hitpoints, 10);
    assert_eq!(anatomy.parts[arm].current_hitpoints, 20);

    sim.run_tick(&mut world);
    let anatomy = world.anatomy(id).unwrap();
    assert_eq!(anatomy.parts[arm].current_hitpoints, 21);
}

#[test]
fn test_healed_entity_settles_out_of_the_active_set() {
    let mut sim = Simulation::seeded(no_clot_config(), 37);
    let mut world = World::new();
    let id = world.spawn("mender", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    {
        let anatomy = world.anatomy_mut(id).unwrap();
        anatomy.take_damage_to_part("Left Arm", 2);
        // Just enough reserve for the two heals; once it dips under the
        // healing threshold the scheduler lets the entity go quiescent
        anatomy.stored_energy = 512.0;
    }
    world.health_mut(id).unwrap().take_damage(2);

    let mut settled_at = None;
    for tick in 1..=30 {
        sim.run_tick(&mut world);
        if !sim.scheduler.is_active(id) {
            settled_at = Some(tick);
            break;
        }
    }
    // Tick 1 heals the first point; tick 2 heals the second and drops
    // the reserve under the threshold, ending the entity's active stint
    assert_eq!(settled_at, Some(2));
    let anatomy = world.anatomy(id).unwrap();
    let arm = anatomy.find_part_index("Left Arm").unwrap();
    assert_eq!(anatomy.parts[arm].current_hitpoints, 30);
}

#[test]
fn test_construct_is_immune_to_biology() {
    let mut sim = Simulation::seeded(no_clot_config(), 38);
    let mut world = World::new();
    let id = world.spawn("unit-7", &construct(), TilePos::new(0, 0));
    sim.register(&world, id);

    // A savaged pump and a "bleeding" flag mean nothing to a machine
    assert!(sim.inflict_wound(&mut world, id, "Hydraulic Pump", 20, 5));

    for _ in 0..50 {
        sim.run_tick(&mut world);
        sim.scheduler.mark_active(id);
    }

    assert!(world.is_alive(id));
    let anatomy = world.anatomy(id).unwrap();
    assert_eq!(anatomy.oxygen_saturation, 100.0);
    assert_eq!(anatomy.accumulated_pain, 0.0);
    assert_eq!(world.health(id).unwrap().current_health, 100);
}

#[test]
fn test_pain_spike_raises_adrenaline_then_stress() {
    let mut sim = Simulation::seeded(no_clot_config(), 39);
    let mut world = World::new();
    let id = world.spawn("shaken", &human(), TilePos::new(0, 0));
    sim.register(&world, id);

    // Heavy damage across several parts pushes aggregate pain high
    // enough that the adrenaline response outpaces its own decay
    {
        let anatomy = world.anatomy_mut(id).unwrap();
        anatomy.take_damage_to_part("Left Arm", 29);
        anatomy.take_damage_to_part("Right Arm", 29);
        anatomy.take_damage_to_part("Left Leg", 29);
        anatomy.take_damage_to_part("Right Leg", 29);
        anatomy.take_damage_to_part("Torso", 25);
        // Keep the healer from eroding the scenario mid-test
        anatomy.stored_energy = 100.0;
    }

    sim.run_tick(&mut world);
    let anatomy = world.anatomy(id).unwrap();
    assert!(anatomy.adrenaline_level > 0.0);
    assert!(anatomy.stress_level > 0.0);

    let stress_early = anatomy.stress_level;
    for _ in 0..30 {
        sim.run_tick(&mut world);
    }
    // Sustained pain keeps stress climbing
    let anatomy = world.anatomy(id).unwrap();
    assert!(anatomy.stress_level > stress_early);
    assert!(anatomy.stress_level <= 100.0);
}
