pub mod attack_stat;
pub mod base_stat;
pub mod block_stat;
pub mod dig_stat;
pub mod game;
pub mod player;
pub mod receive_stat;
pub mod serve_stat;
pub mod set_stat;
