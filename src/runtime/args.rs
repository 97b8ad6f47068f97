use crate::utils::config::parse_bool_flag;

/// Binaries are configured from the environment only; the single runtime
/// switch is `LOOPER_EXPLAIN_CONFIG`, which prints the resolved settings and
/// exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeArgs {
    pub explain_config: bool,
}

fn parse_runtime_args_from_iter<I, S>(args: I) -> anyhow::Result<RuntimeArgs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let supplied_args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .collect::<Vec<_>>();
    if !supplied_args.is_empty() {
        let joined = supplied_args.join(" ");
        return Err(anyhow::anyhow!(
            "CLI arguments are disabled in this build. Configure .env keys instead (RPC_URL, FAUCET_PRIVATE_KEY, API_BIND_ADDR, API_BASE_URL, LOOPER_PRODUCT, LOOPER_EXPLAIN_CONFIG). Received args: {}",
            joined
        ));
    }

    let explain_config = std::env::var("LOOPER_EXPLAIN_CONFIG")
        .ok()
        .and_then(|raw| parse_bool_flag(&raw))
        .unwrap_or(false);

    Ok(RuntimeArgs { explain_config })
}

pub fn parse_runtime_args() -> anyhow::Result<RuntimeArgs> {
    parse_runtime_args_from_iter(std::env::args().skip(1))
}
