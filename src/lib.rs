pub mod app;

pub use app::NameforgeApp;
