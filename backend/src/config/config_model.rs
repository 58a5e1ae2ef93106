#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub auth: AuthSecret,
    pub stripe: Stripe,
    pub frontend: Frontend,
    pub email: Option<Email>,
    pub sms: Option<Sms>,
    pub admin: Admin,
    /// Optional settings that were missing or malformed; logged once at startup.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AuthSecret {
    pub jwt_secret: String,
    pub audience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Stripe {
    pub secret_key: String,
    pub webhook_secret: String,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct Frontend {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Email {
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Sms {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct Admin {
    pub alert_phone: Option<String>,
}
