// Infrastructure layer - Configuration, encoding and HTTP adapters
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod json_mapper;
