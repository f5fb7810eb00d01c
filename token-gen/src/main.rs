use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, ValueEnum};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

/// Mint an HMAC-signed bearer token for local testing of profile-service.
///
/// The token follows the issuer contract the service expects:
/// - `sub` = "{user_id},{email}"
/// - `exp` = now + ttl (a negative ttl produces an already expired token)
/// - `roles` = [{"id": .., "name": ..}, ..]
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Base64-encoded HMAC secret (same value as the service's JWT_SECRET)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    #[arg(long)]
    user_id: i64,

    #[arg(long)]
    email: String,

    /// Role as ID:NAME, e.g. --role 1:USER --role 2:ADMIN
    #[arg(long = "role", value_name = "ID:NAME", value_parser = parse_role)]
    roles: Vec<(i64, String)>,

    /// Lifetime in seconds. Negative values mint an expired token.
    #[arg(long, default_value_t = 3600, allow_negative_numbers = true)]
    ttl_seconds: i64,

    #[arg(long, value_enum, default_value_t = Alg::Hs256)]
    alg: Alg,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Alg {
    Hs256,
    Hs384,
    Hs512,
}

impl From<Alg> for Algorithm {
    fn from(alg: Alg) -> Self {
        match alg {
            Alg::Hs256 => Algorithm::HS256,
            Alg::Hs384 => Algorithm::HS384,
            Alg::Hs512 => Algorithm::HS512,
        }
    }
}

fn parse_role(s: &str) -> Result<(i64, String), String> {
    let (id, name) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ID:NAME, got '{}'", s))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("role id '{}' is not an integer", id))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("role name must not be empty".to_string());
    }
    Ok((id, name.to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.email.contains(',') {
        return Err("email must not contain ',' (it is the subject separator)".into());
    }

    let secret = STANDARD.decode(args.secret.trim())?;
    if secret.len() < 32 {
        return Err(format!(
            "secret must be at least 256 bits, got {}",
            secret.len() * 8
        )
        .into());
    }

    let iat = chrono::Utc::now().timestamp();
    let exp = iat + args.ttl_seconds;

    let roles: Vec<_> = args
        .roles
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();

    let claims = json!({
        "sub": format!("{},{}", args.user_id, args.email),
        "iat": iat,
        "exp": exp,
        "roles": roles,
    });

    let mut header = Header::new(args.alg.into());
    header.typ = Some("JWT".to_string());
    let token = jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(&secret))?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("sub: {}", claims["sub"]);
    println!("exp: {}", exp);
    println!("roles: {}", serde_json::Value::Array(roles));

    Ok(())
}
