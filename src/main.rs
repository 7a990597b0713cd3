mod wgpu_stuff;
use wgpu_stuff::framework;
use wgpu_stuff::sim;

mod bodies;
mod config;
mod render;

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    crate::framework::run::<sim::Sim>("gravity")
}
