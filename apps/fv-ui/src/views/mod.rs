pub mod map_view;
pub mod run_view;

pub use map_view::MapView;
pub use run_view::RunView;
