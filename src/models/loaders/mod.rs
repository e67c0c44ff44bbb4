pub mod text_loader;

pub use text_loader::{file_name, list_files, load_text};
