//! Process-wide state shared by the CLI commands and the dev server.

mod state;

pub use state::{
    clear_build_error, is_serving, is_shutdown, last_build_error, register_server,
    set_build_error, set_serving, setup_shutdown_handler,
};
