pub mod attack;
pub mod encounter;
pub mod initiative;
pub mod save;
pub mod state;
pub mod tactics;
