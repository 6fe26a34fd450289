pub mod metals_api;
