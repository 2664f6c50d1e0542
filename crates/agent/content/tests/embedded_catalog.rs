use agent_content::ArchetypeLoader;
use agent_core::{ColliderSet, OpenGround, RoomId, Simulation, SpawnParams, World};
use glam::Vec3;

#[test]
fn every_embedded_archetype_spawns_and_ticks() {
    let catalog = ArchetypeLoader::embedded().unwrap();
    let mut sim = Simulation::new(World::new(ColliderSet::new(), OpenGround::new(), 0));

    for (index, (name, config)) in catalog.iter().enumerate() {
        let at = Vec3::new(index as f32 * 3.0, 0.0, 0.0);
        sim.spawn(config, SpawnParams::new(at, RoomId(0)))
            .unwrap_or_else(|e| panic!("{name}: {e}"));
    }

    assert_eq!(sim.tick(0.1), catalog.len());
}

#[test]
fn unknown_names_fall_back_to_builtin_archetypes() {
    let catalog = ArchetypeLoader::embedded().unwrap();

    assert!(catalog.get("Boss").is_none());
    assert!(catalog.resolve("Boss").is_some());
    assert!(catalog.resolve("dragon").is_none());
}
