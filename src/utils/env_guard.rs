use std::fs;
use std::path::Path;

fn write_minimal_env_template(file: &mut fs::File) -> std::io::Result<()> {
    use std::io::Write;
    writeln!(file, "# Reactive Looper backend and console configuration")?;
    writeln!(file)?;
    writeln!(file, "RPC_URL=\"https://sepolia.infura.io/v3/CHANGE_ME\"")?;
    writeln!(file, "NETWORK=\"sepolia\"")?;
    writeln!(file, "# FAUCET_PRIVATE_KEY=\"0x...\"")?;
    writeln!(file, "API_BIND_ADDR=\"127.0.0.1:3000\"")?;
    writeln!(file)?;
    writeln!(file, "API_BASE_URL=\"http://127.0.0.1:3000\"")?;
    writeln!(file, "LOOPER_PRODUCT=\"looper\"")?;
    writeln!(file, "LOOPER_EXPLAIN_CONFIG=false")?;
    writeln!(file)?;
    writeln!(file, "RUST_LOG=\"info,reactive_looper=info\"")?;
    Ok(())
}

/// Parses one `.env` line into a key/value pair. Quotes and trailing
/// comments are stripped.
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value_no_comment = value.split('#').next().unwrap_or("").trim();
    let quoted = value_no_comment.len() >= 2
        && ((value_no_comment.starts_with('"') && value_no_comment.ends_with('"'))
            || (value_no_comment.starts_with('\'') && value_no_comment.ends_with('\'')));
    let parsed = if quoted {
        &value_no_comment[1..value_no_comment.len() - 1]
    } else {
        value_no_comment
    };
    Some((key, parsed))
}

fn load_dot_env() {
    let path = Path::new(".env");
    if !path.exists() {
        return;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ENV] Failed to read .env: {}", e);
            return;
        }
    };

    for (key, value) in content.lines().filter_map(parse_env_line) {
        // Explicit environment wins over the file.
        if std::env::var_os(key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
    }
}

fn ensure_env_example_exists() {
    let env_example = Path::new(".env.example");
    if !env_example.exists() {
        if let Ok(mut file) = fs::File::create(env_example) {
            let _ = write_minimal_env_template(&mut file);
        }
    }
}

pub fn harden_env_setup() {
    ensure_env_example_exists();
    load_dot_env();
    if std::env::var("FAUCET_PRIVATE_KEY").is_err() {
        eprintln!("[ENV] WARN: FAUCET_PRIVATE_KEY is not set; /api/faucet will refuse requests");
    }
    if std::env::var("RPC_URL").is_err() {
        eprintln!("[ENV] WARN: RPC_URL is not set; using the placeholder Sepolia endpoint");
    }
}

#[cfg(test)]
mod tests {
    use super::parse_env_line;

    #[test]
    fn parses_quoted_values_and_strips_comments() {
        assert_eq!(
            parse_env_line("RPC_URL=\"http://localhost:8545\" # local node"),
            Some(("RPC_URL", "http://localhost:8545"))
        );
        assert_eq!(parse_env_line("NETWORK='sepolia'"), Some(("NETWORK", "sepolia")));
        assert_eq!(parse_env_line("# FAUCET_PRIVATE_KEY=abc"), None);
        assert_eq!(parse_env_line("   "), None);
        assert_eq!(parse_env_line("=value"), None);
    }
}
