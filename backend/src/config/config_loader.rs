use anyhow::{Context, Result};
use url::Url;

use super::config_model::{
    Admin, AuthSecret, BackendServer, Database, DotEnvyConfig, Email, Frontend, Sms, Stripe,
};

const DEFAULT_MAX_DB_CONNECTIONS: u32 = 10;
const DEFAULT_CURRENCY: &str = "usd";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let mut warnings = Vec::new();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let max_connections = match optional("DATABASE_MAX_CONNECTIONS") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warnings.push(format!(
                "DATABASE_MAX_CONNECTIONS={} is invalid, using {}",
                raw, DEFAULT_MAX_DB_CONNECTIONS
            ));
            DEFAULT_MAX_DB_CONNECTIONS
        }),
        None => DEFAULT_MAX_DB_CONNECTIONS,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections,
    };

    let auth = get_auth_secret()?;

    let stripe = Stripe {
        secret_key: required("STRIPE_SECRET_KEY")?,
        webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
        currency: optional("STRIPE_CURRENCY")
            .map(|currency| currency.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    };

    let base_url = required("FRONTEND_BASE_URL")?;
    Url::parse(&base_url).context("FRONTEND_BASE_URL is invalid")?;
    let frontend = Frontend {
        base_url: base_url.trim_end_matches('/').to_string(),
    };

    let email = match (optional("RESEND_API_KEY"), optional("EMAIL_FROM")) {
        (Some(api_key), Some(from)) => Some(Email { api_key, from }),
        (None, None) => {
            warnings.push("RESEND_API_KEY/EMAIL_FROM not set, email notifications disabled".to_string());
            None
        }
        _ => {
            warnings.push(
                "RESEND_API_KEY and EMAIL_FROM must be set together, email notifications disabled"
                    .to_string(),
            );
            None
        }
    };

    let sms = match (
        optional("TWILIO_ACCOUNT_SID"),
        optional("TWILIO_AUTH_TOKEN"),
        optional("TWILIO_FROM_NUMBER"),
    ) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => Some(Sms {
            account_sid,
            auth_token,
            from_number,
        }),
        _ => {
            warnings.push("Twilio settings incomplete, SMS notifications disabled".to_string());
            None
        }
    };

    let admin = Admin {
        alert_phone: optional("ADMIN_ALERT_PHONE"),
    };
    if admin.alert_phone.is_none() {
        warnings.push("ADMIN_ALERT_PHONE not set, admin booking alerts disabled".to_string());
    }

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        stripe,
        frontend,
        email,
        sms,
        admin,
        warnings,
    })
}

pub fn get_auth_secret() -> Result<AuthSecret> {
    dotenvy::dotenv().ok();

    Ok(AuthSecret {
        jwt_secret: required("JWT_SECRET")?,
        audience: optional("JWT_AUDIENCE"),
    })
}

fn required(key: &str) -> Result<String> {
    optional(key).with_context(|| format!("{} is missing", key))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
