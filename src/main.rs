mod catalog;
mod components;
mod config;
mod model;
mod session;
mod storage;
mod timer;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
