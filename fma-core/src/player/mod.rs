pub mod choices;
pub mod lap_info;
pub mod player_inputs;
