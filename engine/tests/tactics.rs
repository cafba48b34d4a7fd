use skirmish_engine::builder::build_character;
use skirmish_engine::combat::tactics::take_action;
use skirmish_engine::content::Bestiary;
use skirmish_engine::life::death_sweep;
use skirmish_engine::{Actor, ActorKey, ActorKind, Archetype, CombatState, Dice, Side};

const ROSTER: &str = r#"{
  "Dummy": {
    "stats": { "str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10 },
    "ac": 10, "hp": 50, "atk": 0, "actions": 1, "attacks": [1]
  },
  "Brute": {
    "stats": { "str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10 },
    "ac": 10, "hp": 50, "atk": 10, "actions": 2, "attacks": [3, 5]
  },
  "Breather": {
    "stats": { "str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10 },
    "ac": 10, "hp": 50, "atk": 10, "actions": 1, "attacks": [3],
    "special": { "name": "Breath", "cooldown": 2, "targets": "all", "dc": 15, "save": "dex", "dmg": 10 }
  },
  "Regenerator": {
    "stats": { "str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10 },
    "ac": 10, "hp": 20, "atk": 10, "actions": 1, "attacks": [3],
    "special": { "name": "Regeneration", "cooldown": 1, "targets": "self", "dmg": 10 }
  }
}"#;

fn spawn(kind: &str, name: &str) -> Actor {
    let bestiary = Bestiary::from_json_str(ROSTER).expect("roster");
    bestiary.get(kind).expect("record").spawn(name)
}

fn hero(archetype: Archetype, level: u32, name: &str) -> Actor {
    let mut dice = Dice::from_seed(level as u64);
    build_character(archetype, level, name, &mut dice).expect("build")
}

fn hp(state: &CombatState, side: Side, name: &str) -> i32 {
    state
        .actor(&ActorKey::new(side, name))
        .map(|a| a.hp)
        .unwrap_or(0)
}

fn attack_lines(state: &mut CombatState) -> usize {
    state
        .take_log()
        .iter()
        .filter(|l| l.starts_with("[ATTACK]"))
        .count()
}

#[test]
fn monster_uses_each_attack_slot_in_order() {
    let mut state = CombatState::new(vec![spawn("Dummy", "hero")], vec![spawn("Brute", "Brute (0)")]);
    let mut dice = Dice::from_scripted(vec![10]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Adversaries, "Brute (0)"));
    // 3 + 10 and 5 + 10
    assert_eq!(hp(&state, Side::Party, "hero"), 50 - 13 - 15);
}

#[test]
fn ready_area_special_hits_every_opponent() {
    let mut state = CombatState::new(
        vec![spawn("Dummy", "a"), spawn("Dummy", "b")],
        vec![spawn("Breather", "Breather (0)")],
    );
    let mut dice = Dice::from_scripted(vec![1]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Adversaries, "Breather (0)"));
    assert_eq!(hp(&state, Side::Party, "a"), 40);
    assert_eq!(hp(&state, Side::Party, "b"), 40);
}

#[test]
fn self_special_heals_when_bloodied() {
    let mut troll = spawn("Regenerator", "Troll (0)");
    troll.hp = 4;
    let mut state = CombatState::new(vec![spawn("Dummy", "hero")], vec![troll]);
    let mut dice = Dice::from_scripted(vec![10]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Adversaries, "Troll (0)"));
    assert_eq!(hp(&state, Side::Adversaries, "Troll (0)"), 14);
    assert_eq!(hp(&state, Side::Party, "hero"), 50);
}

#[test]
fn self_special_attacks_when_healthy() {
    let mut state = CombatState::new(
        vec![spawn("Dummy", "hero")],
        vec![spawn("Regenerator", "Troll (0)")],
    );
    let mut dice = Dice::from_scripted(vec![10]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Adversaries, "Troll (0)"));
    assert_eq!(hp(&state, Side::Party, "hero"), 50 - 13);
}

#[test]
fn fighter_spends_banked_heal_then_surges() {
    let mut fighter = hero(Archetype::Fighter, 20, "fighter");
    fighter.hp = fighter.max_hp - 1;
    let max_hp = fighter.max_hp;
    let mut wall = spawn("Dummy", "Wall");
    wall.ac = 100;
    wall.hp = 1000;
    let mut state = CombatState::new(vec![fighter], vec![wall]).record_log();
    let key = ActorKey::new(Side::Party, "fighter");

    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &key);

    let me = state.actor(&key).expect("alive");
    assert_eq!(me.hp, max_hp);
    let ActorKind::Fighter(pool) = &me.kind else {
        panic!("not a fighter");
    };
    assert_eq!(pool.banked_heal, 0);
    assert_eq!(pool.surges, 0);
    // four actions, one spent healing, two refunded
    assert_eq!(attack_lines(&mut state), 5);
}

#[test]
fn fighter_rallies_below_half() {
    let mut fighter = hero(Archetype::Fighter, 18, "fighter");
    fighter.hp = 1;
    let rally = match &fighter.kind {
        ActorKind::Fighter(pool) => pool.rally.expect("rally at 18"),
        _ => unreachable!(),
    };
    let mut wall = spawn("Dummy", "Wall");
    wall.ac = 100;
    let mut state = CombatState::new(vec![fighter], vec![wall]);
    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Party, "fighter"));
    assert_eq!(hp(&state, Side::Party, "fighter"), 1 + rally);
}

#[test]
fn rogue_ambushes_in_the_opening_round() {
    for (level, expected) in [(17, 2), (16, 1), (1, 1)] {
        let mut wall = spawn("Dummy", "Wall");
        wall.ac = 100;
        let mut state =
            CombatState::new(vec![hero(Archetype::Rogue, level, "rogue")], vec![wall]).record_log();
        let mut dice = Dice::from_scripted(vec![5]);
        take_action(&mut state, &mut dice, &ActorKey::new(Side::Party, "rogue"));
        assert_eq!(attack_lines(&mut state), expected, "level {}", level);
    }
}

#[test]
fn rogue_adds_precision_damage() {
    let rogue = hero(Archetype::Rogue, 3, "rogue");
    let bonus = rogue.attack_bonus;
    let ActorKind::Rogue(pool) = &rogue.kind else {
        panic!("not a rogue");
    };
    let extra = pool.precision_damage;
    let mut target = spawn("Dummy", "Target");
    target.ac = 1;
    let mut state = CombatState::new(vec![rogue], vec![target]);
    let key = ActorKey::new(Side::Party, "rogue");
    // d8 then the d20; every roll is 3
    let mut dice = Dice::from_scripted(vec![3]);
    take_action(&mut state, &mut dice, &key);
    assert_eq!(hp(&state, Side::Adversaries, "Target"), 50 - (3 + bonus + extra));
}

#[test]
fn rogue_precision_damage_is_the_same_every_turn() {
    let rogue = hero(Archetype::Rogue, 3, "rogue");
    let mut target = spawn("Dummy", "Target");
    target.ac = 1;
    target.hp = 200;
    target.max_hp = 200;
    let mut state = CombatState::new(vec![rogue], vec![target]);
    let key = ActorKey::new(Side::Party, "rogue");

    let mut dice = Dice::from_scripted(vec![3]);
    take_action(&mut state, &mut dice, &key);
    let first = 200 - hp(&state, Side::Adversaries, "Target");
    take_action(&mut state, &mut dice, &key);
    let second = 200 - first - hp(&state, Side::Adversaries, "Target");
    assert_eq!(first, second);
}

#[test]
fn cleric_heal_is_capped_at_max() {
    let cleric = hero(Archetype::Cleric, 5, "cleric");
    let mut fighter = hero(Archetype::Fighter, 5, "fighter");
    fighter.hp = fighter.max_hp - 1;
    let max_hp = fighter.max_hp;
    let mut wall = spawn("Dummy", "Wall");
    wall.ac = 100;
    let mut state = CombatState::new(vec![cleric, fighter], vec![wall]);
    let key = ActorKey::new(Side::Party, "cleric");

    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &key);

    assert_eq!(hp(&state, Side::Party, "fighter"), max_hp);
    let ActorKind::Cleric(pool) = &state.actor(&key).expect("alive").kind else {
        panic!("not a cleric");
    };
    assert_eq!(pool.book.slots[3], 1);
}

#[test]
fn cleric_heals_the_lowest_hp_ally() {
    let cleric = hero(Archetype::Cleric, 1, "cleric");
    let mut rogue = hero(Archetype::Rogue, 1, "rogue");
    let mut wizard = hero(Archetype::Wizard, 1, "wizard");
    rogue.hp = 3;
    wizard.hp = 2;
    let mut state = CombatState::new(vec![cleric, rogue, wizard], vec![spawn("Dummy", "Wall")]);
    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Party, "cleric"));
    assert_eq!(hp(&state, Side::Party, "rogue"), 3);
    assert!(hp(&state, Side::Party, "wizard") > 2);
}

#[test]
fn cleric_revives_a_fallen_ally() {
    let cleric = hero(Archetype::Cleric, 7, "cleric");
    let mut fighter = hero(Archetype::Fighter, 7, "fighter");
    fighter.hp = 0;
    let mut wall = spawn("Dummy", "Wall");
    wall.ac = 100;
    let mut state = CombatState::new(vec![cleric, fighter], vec![wall]);
    death_sweep(&mut state);
    let key = ActorKey::new(Side::Party, "cleric");

    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &key);

    assert_eq!(hp(&state, Side::Party, "fighter"), 1);
    assert!(state.registry(Side::Party).is_empty());
    let ActorKind::Cleric(pool) = &state.actor(&key).expect("alive").kind else {
        panic!("not a cleric");
    };
    assert!(!pool.book.has_slot(4));
}

#[test]
fn wizard_blasts_a_crowd() {
    let wizard = hero(Archetype::Wizard, 5, "wizard");
    let ActorKind::Wizard(book) = &wizard.kind else {
        panic!("not a wizard");
    };
    let fireball = 28 + book.spell_attack;
    let mut state = CombatState::new(
        vec![wizard],
        vec![spawn("Dummy", "a"), spawn("Dummy", "b"), spawn("Dummy", "c")],
    );
    let key = ActorKey::new(Side::Party, "wizard");
    let mut dice = Dice::from_scripted(vec![1]);
    take_action(&mut state, &mut dice, &key);

    for name in ["a", "b", "c"] {
        let left = hp(&state, Side::Adversaries, name);
        assert_eq!(left, (50 - fireball).max(0), "{}", name);
    }
    let ActorKind::Wizard(book) = &state.actor(&key).expect("alive").kind else {
        panic!("not a wizard");
    };
    assert_eq!(book.slots, vec![4, 2, 3, 2]);
}

#[test]
fn wizard_overchannels_without_slots() {
    let mut wizard = hero(Archetype::Wizard, 13, "wizard");
    let ActorKind::Wizard(book) = &mut wizard.kind else {
        panic!("not a wizard");
    };
    book.slots.clear();
    let damage = 30 + book.spell_attack + 7;
    let mut a = spawn("Dummy", "a");
    let mut b = spawn("Dummy", "b");
    a.hp = 500;
    b.hp = 500;
    let mut state = CombatState::new(vec![wizard], vec![a, b]);
    let mut dice = Dice::from_scripted(vec![1]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Party, "wizard"));
    assert_eq!(hp(&state, Side::Adversaries, "a"), 500 - damage);
    assert_eq!(hp(&state, Side::Adversaries, "b"), 500 - damage);
}

#[test]
fn spent_low_level_wizard_swings_a_staff() {
    let mut wizard = hero(Archetype::Wizard, 1, "wizard");
    if let ActorKind::Wizard(book) = &mut wizard.kind {
        book.slots.clear();
    }
    let mut state = CombatState::new(vec![wizard], vec![spawn("Dummy", "Target")]).record_log();
    let mut dice = Dice::from_scripted(vec![5]);
    take_action(&mut state, &mut dice, &ActorKey::new(Side::Party, "wizard"));
    let log = state.take_log();
    assert!(log.iter().all(|l| !l.starts_with("[SPELL]")));
    assert_eq!(log.iter().filter(|l| l.starts_with("[ATTACK]")).count(), 1);
}
