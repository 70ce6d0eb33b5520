mod test_auth_flow;
mod test_config;
mod test_http_api;
