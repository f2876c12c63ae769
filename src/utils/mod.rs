pub mod paths;

pub use paths::{
    format_path_with_tilde, open_conversation_file, validate_file_size, write_atomically,
};
