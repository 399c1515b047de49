//! Marrow - entry point
//!
//! A small interactive driver around the simulation: spawn bodies, run
//! ticks, throw attacks, and watch the physiology respond.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use marrow::blueprints::catalog::BodyCatalog;
use marrow::combat::damage::DamageInfo;
use marrow::core::config::SimulationConfig;
use marrow::core::error::Result;
use marrow::core::types::{EntityId, TilePos};
use marrow::ecs::world::World;
use marrow::entity::combatant::CombatStats;
use marrow::simulation::tick::{Simulation, SimulationEvent};

#[derive(Parser, Debug)]
#[command(name = "marrow", about = "Anatomical damage and physiology simulation")]
struct Args {
    /// Seed for deterministic runs; omitted means fresh entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Optional TOML file overriding simulation tunables
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("marrow=debug")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };

    let mut world = World::new();
    let mut sim = match args.seed {
        Some(seed) => Simulation::seeded(config, seed),
        None => Simulation::new(config),
    };

    let catalog = BodyCatalog::with_defaults();
    spawn_initial_population(&mut world, &mut sim, &catalog);

    println!("\n=== MARROW ===");
    println!("Anatomical damage and physiology simulation");
    println!();
    println!("Commands:");
    println!("  tick / t              - Advance simulation by one tick");
    println!("  run <n>               - Run n simulation ticks");
    println!("  spawn <template> <name> - Spawn a body from the catalog");
    println!("  attack <a> <b>        - Resolve an attack from a onto b");
    println!("  wound <name> <part> <dmg> <bleed> - Inflict a direct wound");
    println!("  status / s            - Show entity status");
    println!("  quit / q              - Exit");
    println!();

    loop {
        display_status(&world, &sim);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let events = sim.run_tick(&mut world);
            report_events(&world, events);
            println!("Tick {} complete.", world.current_tick);
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&world);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            match rest.parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        let events = sim.run_tick(&mut world);
                        report_events(&world, events);
                    }
                    println!("Completed {} ticks. Now at tick {}.", n, world.current_tick);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("spawn ") {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(template), Some(name)) => match catalog.get(template) {
                    Some(template) => {
                        let id = world.spawn(name, template, TilePos::new(0, 0));
                        world.set_combat_stats(id, CombatStats::brawler());
                        sim.register(&world, id);
                        println!("Spawned {} ({:?})", name, id);
                    }
                    None => println!("Unknown template. Try: Human, Construct, Wolf"),
                },
                _ => println!("Usage: spawn <template> <name>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("attack ") {
            let mut parts = rest.split_whitespace();
            match (
                parts.next().and_then(|n| find_entity(&world, n)),
                parts.next().and_then(|n| find_entity(&world, n)),
            ) {
                (Some(attacker), Some(defender)) => {
                    let info = world
                        .combat_stats(attacker)
                        .map(CombatStats::damage_info)
                        .unwrap_or_else(|| {
                            DamageInfo::new(8.0, marrow::combat::damage::DamageKind::Blunt)
                        });
                    let result = sim.resolve_attack(&mut world, attacker, defender, &info);
                    if result.hit {
                        println!(
                            "Hit {} for {:.0} damage{}{}{}",
                            result.part_name,
                            result.damage_dealt,
                            if result.critical { " (critical)" } else { "" },
                            if result.part_destroyed { " - destroyed" } else { "" },
                            if result.arterial_hit { " - arterial!" } else { "" },
                        );
                    } else {
                        println!("Miss.");
                    }
                }
                _ => println!("Usage: attack <attacker-name> <defender-name>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("wound ") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if let [name, part, dmg, bleed] = parts.as_slice() {
                match (
                    find_entity(&world, name),
                    dmg.parse::<i32>(),
                    bleed.parse::<i32>(),
                ) {
                    (Some(id), Ok(dmg), Ok(bleed)) => {
                        if sim.inflict_wound(&mut world, id, part, dmg, bleed) {
                            println!("Wounded {} on {}.", name, part);
                        } else {
                            println!("No such part.");
                        }
                    }
                    _ => println!("Usage: wound <name> <part> <damage> <bleed>"),
                }
            } else {
                println!("Usage: wound <name> <part> <damage> <bleed>");
            }
            continue;
        }

        println!("Unknown command: {}", input);
    }

    println!("Goodbye.");
    Ok(())
}

fn spawn_initial_population(world: &mut World, sim: &mut Simulation, catalog: &BodyCatalog) {
    let human = catalog.get("Human").expect("built-in template");
    let wolf = catalog.get("Wolf").expect("built-in template");

    let aldo = world.spawn("Aldo", human, TilePos::new(0, 0));
    world.set_combat_stats(aldo, CombatStats::swordsman());
    sim.register(world, aldo);

    let berra = world.spawn("Berra", human, TilePos::new(1, 0));
    world.set_combat_stats(berra, CombatStats::spearman());
    sim.register(world, berra);

    let fang = world.spawn("Fang", wolf, TilePos::new(3, 2));
    world.set_combat_stats(fang, CombatStats::brawler());
    sim.register(world, fang);

    tracing::info!(count = world.entity_count(), "initial population spawned");
}

fn find_entity(world: &World, name: &str) -> Option<EntityId> {
    world.entities().find(|&id| world.name(id) == Some(name))
}

fn report_events(world: &World, events: Vec<SimulationEvent>) {
    for event in events {
        match event {
            SimulationEvent::Died { entity } => {
                let name = world.name(entity).unwrap_or("?");
                println!("*** {} has died. ***", name);
            }
        }
    }
}

fn display_status(world: &World, sim: &Simulation) {
    println!(
        "\n[tick {} | {} entities | {} active]",
        world.current_tick,
        world.entity_count(),
        sim.scheduler.active_count()
    );
}

fn display_detailed_status(world: &World) {
    for id in world.entities() {
        let name = world.name(id).unwrap_or("?");
        let Some(health) = world.health(id) else {
            continue;
        };
        let status = if health.alive { "alive" } else { "dead" };
        print!(
            "  {:<10} {} hp {}/{}",
            name, status, health.current_health, health.max_health
        );
        if let Some(anatomy) = world.anatomy(id) {
            print!(
                "  blood {:.1}/{:.1}L  o2 {:.0}%  pain {:.0}  stress {:.0}",
                anatomy.blood_volume,
                anatomy.max_blood_volume,
                anatomy.oxygen_saturation,
                anatomy.accumulated_pain,
                anatomy.stress_level
            );
            let wounded: Vec<String> = anatomy
                .parts
                .iter()
                .filter(|p| p.is_damaged() || p.bleeding_intensity > 0)
                .map(|p| {
                    format!(
                        "{} {}/{}{}",
                        p.name,
                        p.current_hitpoints,
                        p.max_hitpoints,
                        if p.bleeding_intensity > 0 {
                            format!(" bleeding {}", p.bleeding_intensity)
                        } else {
                            String::new()
                        }
                    )
                })
                .collect();
            if !wounded.is_empty() {
                print!("  [{}]", wounded.join(", "));
            }
        }
        println!();
    }
}
