use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

const SHIPPED: &str = include_str!("../../../config/archetypes.ron");

#[test]
fn default_tables_match_the_shipped_values() {
    let table = ArchetypeTable::default();
    let small = table.get(table.id_of("small").unwrap());
    assert_eq!(small.lives, 1);
    assert_eq!(small.score, 10);

    let ship = table.get(table.first_of(ActorClass::Ship));
    assert_eq!(ship.lives, 3);

    let ammo = AmmoTable::default();
    assert_eq!(ammo.get(AmmoClass::ShipShot).capacity, 64);
    assert_eq!(ammo.get(AmmoClass::Bomb).damage, 5);
    assert_eq!(ammo.get(AmmoClass::EnemyShot).lifespan_ms, 2000);
}

#[test]
fn shipped_ron_file_parses() {
    let (table, ammo) = ArchetypeTable::from_ron_str(SHIPPED).expect("config/archetypes.ron");
    assert_eq!(table.ids_of(ActorClass::Asteroid).count(), 5);
    assert_eq!(table.get(table.id_of("ship").unwrap()).hit_window_ms, 500);
    // Omitted fields fall back to serde defaults.
    assert_eq!(table.get(table.id_of("enemy").unwrap()).spawn_weight, 1);
    assert_eq!(ammo.get(AmmoClass::EnemyShot).capacity, 5);
}

#[test]
fn unknown_archetype_is_an_error() {
    let table = ArchetypeTable::default();
    let err = table.id_of("huge").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownArchetype(ref n) if n == "huge"));
}

#[test]
fn rejects_duplicates_and_bad_ranges() {
    let mut entries = vec![
        actor("ship", ActorClass::Ship, (1.0, 1.0), 3, 0, (0.0, 0.0), 0.0),
        actor("enemy", ActorClass::Enemy, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
        actor("rock", ActorClass::Asteroid, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
    ];
    entries.push(entries[2].clone());
    assert!(matches!(ArchetypeTable::new(entries), Err(ConfigError::Duplicate(_))));

    let backwards = vec![
        actor("ship", ActorClass::Ship, (1.0, 1.0), 3, 0, (0.0, 0.0), 0.0),
        actor("enemy", ActorClass::Enemy, (1.0, 1.0), 1, 1, (5.0, 2.0), 0.0),
        actor("rock", ActorClass::Asteroid, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
    ];
    assert!(matches!(ArchetypeTable::new(backwards), Err(ConfigError::Invalid { .. })));

    let no_lives = vec![
        actor("ship", ActorClass::Ship, (1.0, 1.0), 0, 0, (0.0, 0.0), 0.0),
        actor("enemy", ActorClass::Enemy, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
        actor("rock", ActorClass::Asteroid, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
    ];
    assert!(matches!(ArchetypeTable::new(no_lives), Err(ConfigError::Invalid { .. })));
}

#[test]
fn every_class_must_be_present() {
    let only_ship = vec![actor("ship", ActorClass::Ship, (1.0, 1.0), 3, 0, (0.0, 0.0), 0.0)];
    assert!(matches!(
        ArchetypeTable::new(only_ship),
        Err(ConfigError::MissingClass(ActorClass::Enemy))
    ));

    let no_bombs = vec![
        ammo("small", AmmoClass::ShipShot, (1.0, 1.0), 1, 100, 1.0, 2),
        ammo("long", AmmoClass::EnemyShot, (1.0, 1.0), 1, 100, 1.0, 2),
    ];
    assert!(matches!(AmmoTable::new(no_bombs), Err(ConfigError::MissingAmmo(AmmoClass::Bomb))));
}

#[test]
fn malformed_ron_reports_parse_error() {
    let err = ArchetypeTable::from_ron_str("(archetypes: [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn weighted_pick_only_returns_the_requested_class_and_skips_zero_weights() {
    let mut entries: Vec<ArchetypeConfig> = vec![
        actor("ship", ActorClass::Ship, (1.0, 1.0), 3, 0, (0.0, 0.0), 0.0),
        actor("enemy", ActorClass::Enemy, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
        actor("never", ActorClass::Asteroid, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
        actor("always", ActorClass::Asteroid, (1.0, 1.0), 1, 1, (1.0, 2.0), 0.0),
    ];
    entries[2].spawn_weight = 0;
    let table = ArchetypeTable::new(entries).unwrap();
    let always = table.id_of("always").unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(table.pick_weighted(ActorClass::Asteroid, &mut rng), always);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ArchetypeTable::from_ron_file("config/does-not-exist.ron").unwrap_err();
    assert!(matches!(err, ConfigError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn shipped_file_only_overrides_weights_and_the_ship_hit_window() {
    let (shipped, shipped_ammo) = ArchetypeTable::from_ron_str(SHIPPED).unwrap();
    let builtin = ArchetypeTable::default();
    assert_eq!(shipped.entries.len(), builtin.entries.len());

    for (file, base) in shipped.entries.iter().zip(&builtin.entries) {
        let normalized = ArchetypeConfig {
            spawn_weight: base.spawn_weight,
            hit_window_ms: base.hit_window_ms,
            ..file.clone()
        };
        assert_eq!(&normalized, base);
        if file.class != ActorClass::Ship {
            assert_eq!(file.hit_window_ms, 0, "{}", file.name);
        }
    }
    assert_eq!(builtin.get(builtin.first_of(ActorClass::Ship)).hit_window_ms, 0);
    assert!(builtin.entries.iter().all(|e| e.spawn_weight == 1));

    for (file, base) in shipped_ammo.iter().zip(AmmoTable::default().iter()) {
        assert_eq!(file, base);
    }
}
