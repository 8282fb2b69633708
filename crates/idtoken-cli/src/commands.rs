use crate::args::{DecodeArgs, VerifyArgs};
use idtoken::{Claims, Token, TokenValidator, TrustedIssuerConfig, unix_now};
use std::io::{self, Read, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Token(#[from] idtoken::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no token given on the command line or stdin")]
    NoToken,
}

impl CliError {
    /// Process exit code: 1 for rejected claims, 2 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Token(idtoken::Error::InvalidToken(_)) => 1,
            _ => 2,
        }
    }
}

pub fn verify(args: VerifyArgs, stdin: impl Read, mut out: impl Write) -> Result<(), CliError> {
    let raw = read_token(args.token, stdin)?;

    let config = match (args.project_id, args.credentials) {
        (Some(project_id), _) => TrustedIssuerConfig::new(project_id)?,
        (None, Some(path)) => TrustedIssuerConfig::from_service_account_file(path)?,
        (None, None) => TrustedIssuerConfig::from_env()?,
    };
    let now = args.now.unwrap_or_else(unix_now);

    tracing::debug!(project = config.project_id(), now, "verifying token");

    let validator = TokenValidator::new(config);
    let token = validator.verify(&raw, now)?;

    if args.json {
        writeln!(out, "{}", token.claims().to_json())?;
    } else {
        writeln!(
            out,
            "valid: {} (project {})",
            token.subject().unwrap_or("<no sub>"),
            validator.config().project_id()
        )?;
        write_claims(&mut out, token.claims())?;
    }
    Ok(())
}

pub fn decode(args: DecodeArgs, stdin: impl Read, mut out: impl Write) -> Result<(), CliError> {
    let raw = read_token(args.token, stdin)?;
    let token = Token::parse(&raw)?;

    if args.json {
        writeln!(out, "{}", token.claims().to_json())?;
        return Ok(());
    }

    if let Some(header) = token.header() {
        writeln!(out, "alg: {}", header.algorithm)?;
        if let Some(kid) = &header.key_id {
            writeln!(out, "kid: {kid}")?;
        }
        writeln!(out)?;
    }
    write_claims(&mut out, token.claims())?;
    Ok(())
}

fn read_token(arg: Option<String>, mut stdin: impl Read) -> Result<String, CliError> {
    let raw = match arg {
        Some(token) => token,
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    let raw = raw.trim();
    // Accept a pasted Authorization header value
    let raw = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if raw.is_empty() {
        return Err(CliError::NoToken);
    }
    Ok(raw.to_string())
}

fn write_claims(out: &mut impl Write, claims: &Claims) -> io::Result<()> {
    for (name, value) in claims.iter() {
        writeln!(out, "{name} = {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use idtoken::InvalidReason;

    const NOW: i64 = 1_700_000_000;

    fn token(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","kid":"k1"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(b"sig")
        )
    }

    fn valid_token() -> String {
        token(&format!(
            r#"{{"exp":{},"iat":{},"iss":"https://securetoken.google.com/proj1","aud":"proj1","sub":"uid-1"}}"#,
            NOW + 3600,
            NOW - 10
        ))
    }

    fn verify_args(token: Option<String>) -> VerifyArgs {
        VerifyArgs {
            token,
            project_id: Some("proj1".into()),
            credentials: None,
            now: Some(NOW),
            json: false,
        }
    }

    #[test]
    fn test_verify_valid() {
        let mut out = Vec::new();
        verify(verify_args(Some(valid_token())), io::empty(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("valid: uid-1 (project proj1)\n"));
        assert!(out.contains("aud = proj1\n"));
        assert!(out.contains(&format!("exp = {}\n", NOW + 3600)));
    }

    #[test]
    fn test_verify_from_stdin_json() {
        let stdin = format!("Bearer {}\n", valid_token());
        let mut args = verify_args(None);
        args.json = true;

        let mut out = Vec::new();
        verify(args, stdin.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with('{'));
        assert!(out.contains(r#""sub":"uid-1""#));
    }

    #[test]
    fn test_verify_rejected() {
        let mut args = verify_args(Some(valid_token()));
        args.now = Some(NOW + 3600);

        let err = verify(args, io::empty(), io::sink()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Token(idtoken::Error::InvalidToken(InvalidReason::Expired))
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_verify_wrong_project() {
        let mut args = verify_args(Some(valid_token()));
        args.project_id = Some("proj2".into());

        let err = verify(args, io::empty(), io::sink()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Invalid ID token: bad issuer");
    }

    #[test]
    fn test_verify_malformed() {
        let err = verify(verify_args(Some("abc".into())), io::empty(), io::sink()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_verify_with_credentials_file() {
        let path = std::env::temp_dir().join(format!("idtoken-cli-{}-sa.json", std::process::id()));
        std::fs::write(&path, r#"{"type":"service_account","project_id":"proj1"}"#).unwrap();

        let mut args = verify_args(Some(valid_token()));
        args.project_id = None;
        args.credentials = Some(path.clone());

        let mut out = Vec::new();
        let result = verify(args, io::empty(), &mut out);
        std::fs::remove_file(&path).ok();

        result.unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("valid: uid-1 (project proj1)"));
    }

    #[test]
    fn test_configuration_error_exit_code() {
        let mut args = verify_args(Some(valid_token()));
        args.project_id = Some("not a project".into());

        let err = verify(args, io::empty(), io::sink()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Token(idtoken::Error::ConfigurationInvalid(_))
        ));
        assert_eq!(err.exit_code(), 2);

        let mut args = verify_args(Some(valid_token()));
        args.project_id = None;
        args.credentials = Some("/definitely/not/here.json".into());
        assert_eq!(verify(args, io::empty(), io::sink()).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_empty_stdin() {
        let err = verify(verify_args(None), "  \n".as_bytes(), io::sink()).unwrap_err();
        assert!(matches!(err, CliError::NoToken));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_decode_expired_token() {
        let raw = token(r#"{"exp":1,"aud":"anything"}"#);
        let mut out = Vec::new();
        decode(
            DecodeArgs {
                token: Some(raw),
                json: false,
            },
            io::empty(),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "alg: RS256\nkid: k1\n\naud = anything\nexp = 1\n");
    }
}
