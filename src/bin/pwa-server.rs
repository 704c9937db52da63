use std::env;
use std::sync::Arc;

use admin_pwa::settings::{HttpSettingsReader, SettingsReader, StaticSettings};
use admin_pwa::{AppConfig, CachePolicy, api, embed};

fn print_usage() {
    eprintln!("Usage: pwa-server [OPTIONS]");
    eprintln!();
    eprintln!("Serves /pwa/manifest.json and /pwa/sw.js for an admin application.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --host <HOST>        Bind address (default: 127.0.0.1)");
    eprintln!("  --port <PORT>        Bind port (default: {})", api::DEFAULT_PORT);
    eprintln!("  --base-url <URL>     Host settings endpoint base URL");
    eprintln!("  --token <TOKEN>      Admin token for the settings endpoint");
    eprintln!("  --fixture            Serve fixed default settings (no host needed)");
    eprintln!("  --print-embeds       Print the head/body snippets and exit");
    eprintln!("  -h, --help           Show this help");
}

#[tokio::main]
async fn main() -> admin_pwa::Result<()> {
    env_logger::init();

    let mut config = AppConfig::load()?;
    let mut fixture = false;
    let mut print_embeds = false;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                i += 1;
                if i < args.len() {
                    config.api.host = args[i].clone();
                } else {
                    eprintln!("Error: --host requires a value");
                    std::process::exit(1);
                }
            }
            "--port" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(port) => config.api.port = port,
                    None => {
                        eprintln!("Error: --port requires a numeric value");
                        std::process::exit(1);
                    }
                }
            }
            "--base-url" => {
                i += 1;
                if i < args.len() {
                    config.directus.base_url = args[i].clone();
                } else {
                    eprintln!("Error: --base-url requires a value");
                    std::process::exit(1);
                }
            }
            "--token" => {
                i += 1;
                if i < args.len() {
                    config.directus.admin_token = Some(args[i].clone());
                } else {
                    eprintln!("Error: --token requires a value");
                    std::process::exit(1);
                }
            }
            "--fixture" => fixture = true,
            "--print-embeds" => print_embeds = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Error: unknown option '{other}'");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if print_embeds {
        print!(
            "{}",
            embed::head_tags(&config.pwa.theme_color, &config.pwa.app_title)
        );
        print!("{}", embed::body_script());
        return Ok(());
    }

    let reader: Arc<dyn SettingsReader> = if fixture {
        Arc::new(StaticSettings::default())
    } else {
        log::info!("Reading settings from {}", config.directus.base_url);
        Arc::new(HttpSettingsReader::new(
            config.directus.base_url.clone(),
            config.directus.admin_token.clone(),
        ))
    };

    let policy = CachePolicy::new(config.pwa.policy_version);
    let app = api::router(reader, &policy);
    api::run_server(&config.api.host, config.api.port, app).await
}
