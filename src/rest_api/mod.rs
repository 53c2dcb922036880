pub mod api;
pub mod openapi_server;
