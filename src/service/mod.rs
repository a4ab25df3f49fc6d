//! Service layer orchestrating config, filter files and the pool.

mod presets;
mod report;
mod selection_service;

pub use presets::PresetStore;
pub use report::SelectionReport;
pub use selection_service::SelectionService;
