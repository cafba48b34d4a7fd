use proptest::prelude::*;
use skirmish_engine::{ability_bonus, Dice};

#[test]
fn ability_bonus_rounds_down() {
    assert_eq!(ability_bonus(8), -1);
    assert_eq!(ability_bonus(9), -1);
    assert_eq!(ability_bonus(10), 0);
    assert_eq!(ability_bonus(11), 0);
    assert_eq!(ability_bonus(12), 1);
}

#[test]
fn ability_bonus_is_clamped() {
    assert_eq!(ability_bonus(1), -5);
    assert_eq!(ability_bonus(0), -5);
    assert_eq!(ability_bonus(30), 5);
}

#[test]
fn ability_bonus_table() {
    let line = [3, 8, 9, 10, 11, 12, 17, 20]
        .iter()
        .map(|s| ability_bonus(*s).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    insta::assert_snapshot!(line, @"-4 -1 -1 0 0 1 3 5");
}

#[test]
fn scripted_dice_cycle_through_their_rolls() {
    let mut dice = Dice::from_scripted(vec![1, 5, 15]);
    let rolls: Vec<i32> = (0..5).map(|_| dice.d20()).collect();
    assert_eq!(rolls, vec![1, 5, 15, 1, 5]);
}

#[test]
fn picking_from_one_candidate_consumes_no_roll() {
    let mut dice = Dice::from_scripted(vec![7, 2]);
    assert_eq!(dice.pick(1), 0);
    assert_eq!(dice.pick(0), 0);
    assert_eq!(dice.d20(), 7);
    // roll 2 of a pick over three candidates is index 1
    assert_eq!(dice.pick(3), 1);
}

proptest! {
    #[test]
    fn ability_bonus_is_monotonic(a in 1..=30i32, b in 1..=30i32) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ability_bonus(lo) <= ability_bonus(hi));
    }

    #[test]
    fn seeded_rolls_stay_in_range(seed in any::<u64>(), sides in 1u32..=100) {
        let mut dice = Dice::from_seed(seed);
        for _ in 0..50 {
            let roll = dice.roll_die(sides);
            prop_assert!(roll >= 1 && roll <= sides as i32);
        }
    }

    #[test]
    fn same_seed_replays_the_same_rolls(seed in any::<u64>()) {
        let mut a = Dice::from_seed(seed);
        let mut b = Dice::from_seed(seed);
        let left: Vec<i32> = (0..20).map(|_| a.d20()).collect();
        let right: Vec<i32> = (0..20).map(|_| b.d20()).collect();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn pick_is_a_valid_index(seed in any::<u64>(), len in 1usize..50) {
        let mut dice = Dice::from_seed(seed);
        prop_assert!(dice.pick(len) < len);
    }
}
