mod common;

mod aws_refresh;
mod server_api;
