pub mod app;
mod answer_popup;
mod game_over_overlay;
mod mode_controls;
mod settings_modal;
mod states_list;
mod states_map;
mod status_panel;
mod timer_controls;

pub use app::App;
