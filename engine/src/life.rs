use crate::combat::state::{ActorKey, CombatState, Side};
use crate::Actor;

/// Move every living actor at 0 HP or below into its side's terminal
/// registry. Returns how many actors were moved; a second call with no
/// intervening damage moves nobody.
pub fn death_sweep(state: &mut CombatState) -> usize {
    let mut moved = 0;
    for side in [Side::Adversaries, Side::Party] {
        let dead: Vec<String> = state
            .live(side)
            .iter()
            .filter(|(_, actor)| actor.hp <= 0)
            .map(|(name, _)| name.clone())
            .collect();
        for name in dead {
            if let Some(actor) = state.live_mut(side).shift_remove(&name) {
                state.note(format!("[DEAD][{}] drops at {} HP", name, actor.hp));
                state.registry_mut(side).insert(name, actor);
                moved += 1;
            }
        }
    }
    moved
}

/// Healing; never raises HP above the maximum. Returns HP actually restored.
pub fn heal(actor: &mut Actor, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let before = actor.hp;
    actor.hp = (actor.hp + amount).min(actor.max_hp);
    (actor.hp - before).max(0)
}

/// Heal the living actor at `key` and log it. Returns HP restored.
pub fn heal_actor(state: &mut CombatState, key: &ActorKey, amount: i32) -> i32 {
    let Some(actor) = state.actor_mut(key) else {
        return 0;
    };
    let before = actor.hp;
    let restored = heal(actor, amount);
    let after = actor.hp;
    state.note(format!(
        "[HEAL][{}] +{} HP ({} → {})",
        key.name, restored, before, after
    ));
    restored
}

/// Bring a fallen actor back into play at 1 HP. Refuses when the name is
/// not in the registry or an actor of that name is already alive.
pub fn revive(state: &mut CombatState, side: Side, name: &str) -> bool {
    if state.live(side).contains_key(name) {
        return false;
    }
    let Some(mut actor) = state.registry_mut(side).shift_remove(name) else {
        return false;
    };
    actor.hp = 1;
    state.live_mut(side).insert(name.to_string(), actor);
    state.note(format!("[REVIVE][{}] returns to the fight at 1 HP", name));
    true
}
