// Services
// Views, snapshot import/export, marketplace lookup, the add flow and settings.

pub mod add_bookmark_flow;
pub mod collection_serializer;
pub mod file_transfer;
pub mod metadata_resolver;
pub mod settings_engine;
pub mod view_engine;
