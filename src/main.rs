mod cli;

use clever_api::output::save_response;
use clever_api::{CleverClient, ClientError, Config, ListParams, ResourceKind};
use log::{error, info};

fn main() -> anyhow::Result<()> {
    let cmd = cli::build_cli();
    let matches = cmd.get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    let version_flag = matches.get_flag("version");

    cli::init_logging(log_level.as_deref());

    if version_flag {
        println!("clever-api {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let role = match matches.get_one::<String>("role") {
        Some(r) => cli::normalize_role(r),
        None => cli::prompt_role()?,
    };

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(ClientError::MissingToken) => {
            error!("CLEVER_API_TOKEN is not set.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    let output_dir = matches
        .get_one::<String>("output-dir")
        .cloned()
        .unwrap_or_else(|| cfg.output_dir.clone());
    let limit = matches.get_one::<u32>("limit").copied().unwrap_or(1);

    let mut client = CleverClient::from_config(&cfg)?;
    let mut saved = 0usize;
    for kind in ResourceKind::ALL {
        let mut params = ListParams::limit(limit);
        if kind == ResourceKind::Users {
            params.role = cli::role_filter(&role);
        }
        let data = client.resource(kind).get_all(&params);
        match save_response(data.as_ref(), &format!("{}.json", kind), &output_dir) {
            Ok(Some(_)) => saved += 1,
            Ok(None) => {}
            Err(e) => error!("Failed to save {}: {}", kind, e),
        }
    }
    info!(
        "Saved {} of {} resources to {}",
        saved,
        ResourceKind::ALL.len(),
        output_dir
    );
    Ok(())
}
