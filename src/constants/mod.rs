pub struct Env {
    pub jwt_secret: String,
    pub token_expiration: u64,
    pub database_url: String,
    pub frontend_url: String,
    pub production: bool,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        // A missing secret aborts startup; there is no default.
        let jwt_secret = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");

        let token_expiration = std::env::var("TOKEN_EXPIRATION")
            .unwrap_or_else(|_| "604800".to_string())
            .parse::<u64>()
            .expect("TOKEN_EXPIRATION must be a valid u64 integer");

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let production = std::env::var("APP_ENV").as_deref() == Ok("production");
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        Env { jwt_secret, token_expiration, database_url, frontend_url, production, ip, port }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
