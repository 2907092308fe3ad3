//! InstaCook recipe API - integration test support.
//!
//! This crate re-exports the workspace crates so that integration tests can
//! reach everything through `instacook_test::` paths.

pub mod component {
    pub use instacook_core::{types, validation};
    pub use instacook_service::{auth, error, recipe, user};

    pub mod db {
        pub use instacook_db::db::*;

        pub mod connection {
            pub use instacook_app::db_handler::DbProviderHandler;
            pub use instacook_db::db::connection::*;
        }
    }

    pub mod model {
        pub use instacook_db::model::*;
    }

    pub mod config {
        pub use instacook_app::config::ConfigHandler;
        pub use instacook_core::config::*;
    }
}

pub mod app {
    pub use instacook_app::*;

    pub mod api {
        pub use instacook_app::app::api::*;
    }
}
