pub mod get_token;
