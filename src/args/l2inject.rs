use std::{net::Ipv4Addr, path::PathBuf};

/// Source address written into the frame when nothing else is configured
const DEFAULT_SOURCE: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 2);

#[derive(clap::Parser)]
#[clap(author, version, about="Inject a hand-built UDP frame through a raw link-layer socket", long_about = None)]
pub struct Args {
    #[command(flatten)]
    config_data: Config,

    /// Path to a config file to read
    #[clap(short = 'c', long = "config", conflicts_with = "Config")]
    config_file: Option<PathBuf>,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Get the frame configuration from either the config file or the CLI
    pub fn data(&self) -> Result<Config, Box<dyn std::error::Error>> {
        match self.config_file {
            Some(ref path) => {
                log::debug!("Reading config from {}", path.display());
                let file = std::fs::File::open(path)
                    .map_err(|error| format!("could not open {}: {error}", path.display()))?;
                serde_json::from_reader(file)
                    .map_err(|error| format!("could not parse {}: {error}", path.display()).into())
            }
            None => Ok(self.config_data.clone()),
        }
    }
}

/// What to send and where. Specifiable via either CLI args or a config file
#[derive(Debug, clap::Args, serde::Deserialize, Clone, PartialEq, Eq)]
#[group()]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Network interface to send the frame out of
    #[clap(short, long, default_value_t = ("lo").to_string())]
    #[serde(default = "default_interface")]
    pub interface: String,

    /// IPv4 source address to write into the frame
    #[clap(long = "source", default_value_t = DEFAULT_SOURCE)]
    #[serde(rename = "source", default = "default_source")]
    pub source_address: Ipv4Addr,

    /// Replace the frame's IPv4 destination address
    #[clap(long = "destination")]
    #[serde(rename = "destination", default)]
    pub destination_address: Option<Ipv4Addr>,

    /// Replace the frame's UDP source port
    #[clap(long)]
    #[serde(default)]
    pub source_port: Option<u16>,

    /// Replace the frame's UDP destination port
    #[clap(long)]
    #[serde(default)]
    pub destination_port: Option<u16>,

    /// Replace the frame's payload with this string
    #[clap(long)]
    #[serde(default)]
    pub payload: Option<String>,

    /// Recompute the UDP checksum after editing the frame (left stale otherwise)
    #[clap(long)]
    #[serde(default)]
    pub fix_udp_checksum: bool,
}

fn default_interface() -> String {
    "lo".to_string()
}

fn default_source() -> Ipv4Addr {
    DEFAULT_SOURCE
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["l2inject"]).unwrap();
        let config = args.data().unwrap();
        assert_eq!(config.interface, "lo");
        assert_eq!(config.source_address, Ipv4Addr::new(127, 0, 0, 2));
        assert_eq!(config.destination_address, None);
        assert_eq!(config.payload, None);
        assert!(!config.fix_udp_checksum);
        assert!(!args.verbose);
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::try_parse_from([
            "l2inject",
            "-i",
            "eth0",
            "--source",
            "192.0.2.1",
            "--destination",
            "192.0.2.2",
            "--destination-port",
            "9000",
            "--payload",
            "ping",
            "--fix-udp-checksum",
            "-v",
        ])
        .unwrap();
        let config = args.data().unwrap();
        assert_eq!(config.interface, "eth0");
        assert_eq!(config.source_address, Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(config.destination_address, Some(Ipv4Addr::new(192, 0, 2, 2)));
        assert_eq!(config.source_port, None);
        assert_eq!(config.destination_port, Some(9000));
        assert_eq!(config.payload.as_deref(), Some("ping"));
        assert!(config.fix_udp_checksum);
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_rejects_bad_address() {
        assert!(Args::try_parse_from(["l2inject", "--source", "127.0.0"]).is_err());
    }

    #[test]
    fn test_config_file_conflicts_with_cli_config() {
        assert!(
            Args::try_parse_from(["l2inject", "-c", "l2inject.json", "--source", "10.0.0.1"])
                .is_err()
        );
    }

    #[test]
    fn test_config_json_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.interface, "lo");
        assert_eq!(config.source_address, DEFAULT_SOURCE);
        assert!(!config.fix_udp_checksum);
    }

    #[test]
    fn test_config_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "interface": "eth1",
                "source": "10.0.0.10",
                "destination": "10.0.0.11",
                "source_port": 1234,
                "payload": "Hello",
                "fix_udp_checksum": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.interface, "eth1");
        assert_eq!(config.source_address, Ipv4Addr::new(10, 0, 0, 10));
        assert_eq!(config.destination_address, Some(Ipv4Addr::new(10, 0, 0, 11)));
        assert_eq!(config.source_port, Some(1234));
        assert_eq!(config.destination_port, None);
        assert!(config.fix_udp_checksum);
    }

    #[test]
    fn test_config_json_rejects_unknown_fields() {
        assert!(serde_json::from_str::<Config>(r#"{"interfase": "eth0"}"#).is_err());
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("l2inject-test-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"interface": "eth2", "source": "198.51.100.1"}"#).unwrap();

        let args = Args::try_parse_from(["l2inject", "-c", path.to_str().unwrap()]).unwrap();
        let config = args.data();
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.interface, "eth2");
        assert_eq!(config.source_address, Ipv4Addr::new(198, 51, 100, 1));
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["l2inject", "-c", "/nonexistent/l2inject.json"]).unwrap();
        let error = args.data().unwrap_err().to_string();
        assert!(
            error.starts_with("could not open /nonexistent/l2inject.json: "),
            "{error}"
        );
    }

    #[test]
    fn test_malformed_config_file() {
        let path =
            std::env::temp_dir().join(format!("l2inject-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"source": "not an address"}"#).unwrap();

        let args = Args::try_parse_from(["l2inject", "-c", path.to_str().unwrap()]).unwrap();
        let error = args.data().unwrap_err().to_string();
        std::fs::remove_file(&path).unwrap();

        assert!(error.starts_with("could not parse "), "{error}");
    }
}
