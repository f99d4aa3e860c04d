pub mod actions;
pub mod applications;
pub mod datasources;
pub mod pages;
pub mod system_settings;
pub mod users;
pub mod workspaces;
