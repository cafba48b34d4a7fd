use crate::combat::state::ActorKey;
use crate::Dice;

/// Turn order for the whole encounter: party keys then adversary keys,
/// drawn one at a time from the shrinking pool so every permutation is
/// equally likely.
pub fn build(party: Vec<ActorKey>, adversaries: Vec<ActorKey>, dice: &mut Dice) -> Vec<ActorKey> {
    let mut pool: Vec<ActorKey> = party.into_iter().chain(adversaries).collect();
    let mut order = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        let idx = dice.pick(pool.len());
        order.push(pool.remove(idx));
    }
    order
}

/// Next `(turn, round)`; wraps to the next round after the last slot.
pub fn advance(turn: usize, round: u32, len: usize) -> (usize, u32) {
    if turn + 1 >= len {
        (0, round + 1)
    } else {
        (turn + 1, round)
    }
}
