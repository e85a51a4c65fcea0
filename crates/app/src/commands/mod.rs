pub mod roadmap;
pub mod settings;
