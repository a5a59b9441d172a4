pub mod xdg_root;

pub use xdg_root::{config_home, default_state_file, global_config_path, state_home};
