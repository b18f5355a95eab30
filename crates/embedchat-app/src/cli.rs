use std::path::PathBuf;

use clap::Parser;

use embedchat_config::{ApiHost, EmbedConfig};

/// EmbedChat: a desktop window around a hosted chat agent.
#[derive(Parser, Debug)]
#[command(name = "embedchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Agent token, overriding the config file.
    #[arg(long)]
    pub token: Option<String>,

    /// Deployment to reach (prod, eu, sg, staging, local).
    #[arg(long, value_parser = parse_api_host)]
    pub api_host: Option<ApiHost>,

    /// Start with the dark appearance.
    #[arg(long)]
    pub dark: bool,

    /// Print the launch URL and exit.
    #[arg(long)]
    pub print_url: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_api_host(name: &str) -> Result<ApiHost, String> {
    ApiHost::parse(name).ok_or_else(|| format!("unknown api host '{name}'"))
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut EmbedConfig) {
        if let Some(token) = &self.token {
            config.agent.token = token.clone();
        }
        if let Some(host) = self.api_host {
            config.agent.api_host = host;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedchat_config::AgentConfig;

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "embedchat",
            "--token",
            "acme",
            "--api-host",
            "EU",
            "--dark",
            "--print-url",
        ])
        .unwrap();
        assert_eq!(args.token.as_deref(), Some("acme"));
        assert_eq!(args.api_host, Some(ApiHost::Eu));
        assert!(args.dark);
        assert!(args.print_url);
    }

    #[test]
    fn rejects_unknown_host() {
        let err = Args::try_parse_from(["embedchat", "--api-host", "moon"]).unwrap_err();
        assert!(err.to_string().contains("unknown api host 'moon'"));
    }

    #[test]
    fn apply_overrides_only_given_fields() {
        let mut config = EmbedConfig {
            agent: AgentConfig::new("from-file").with_target("sales"),
            ..EmbedConfig::default()
        };

        Args::try_parse_from(["embedchat"]).unwrap().apply(&mut config);
        assert_eq!(config.agent.token, "from-file");

        Args::try_parse_from(["embedchat", "--token", "cli", "--api-host", "local"])
            .unwrap()
            .apply(&mut config);
        assert_eq!(config.agent.token, "cli");
        assert_eq!(config.agent.api_host, ApiHost::Local);
        assert_eq!(config.agent.target.as_deref(), Some("sales"));
    }
}
