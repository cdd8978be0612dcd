mod power_levels_content;
mod room_power_levels;
