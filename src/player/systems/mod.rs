//! Player domain: system modules for the controller update.

pub(crate) mod input;
pub(crate) mod jump;
pub(crate) mod movement;
pub(crate) mod sensors;
pub(crate) mod wall;

pub(crate) use input::{apply_input, sample_input};
pub(crate) use jump::update_jump;
pub(crate) use movement::{apply_fall_death, apply_horizontal_movement};
pub(crate) use sensors::refresh_sensors;
pub(crate) use wall::{handle_wall_jump_end, update_facing, update_wall_machine};
